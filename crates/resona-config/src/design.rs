//! Filter design file format and operations.

use std::fmt;
use std::path::Path;

use resona_core::{FilterKind, FilterSpec, FrequencySweep, TimeDomainSimulator, linspace};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::units::parse_component_value;

/// A component value as written in a design file: a bare number in base SI
/// units, or text with an SI prefix and optional unit (`"10m"`, `"4.7 kΩ"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentValue {
    /// Value in base units (Ω, H, F).
    Number(f64),
    /// Prefixed text, resolved with [`parse_component_value`].
    Text(String),
}

impl ComponentValue {
    /// Resolve to base units. `field` names the value in error messages.
    pub fn resolve(&self, field: &str) -> Result<f64, ConfigError> {
        match self {
            ComponentValue::Number(v) => Ok(*v),
            ComponentValue::Text(text) => parse_component_value(text).ok_or_else(|| {
                ConfigError::invalid_value(
                    field,
                    text.as_str(),
                    "expected a number with an optional SI prefix (p, n, u, m, k, M, G)",
                )
            }),
        }
    }
}

impl From<f64> for ComponentValue {
    fn from(value: f64) -> Self {
        ComponentValue::Number(value)
    }
}

impl From<&str> for ComponentValue {
    fn from(text: &str) -> Self {
        ComponentValue::Text(text.to_string())
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentValue::Number(v) => write!(f, "{v}"),
            ComponentValue::Text(text) => f.write_str(text),
        }
    }
}

/// Explicit frequency sweep (rad/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// First angular frequency.
    pub start: f64,
    /// Last angular frequency.
    pub stop: f64,
    /// Number of log-spaced points.
    #[serde(default = "default_sweep_points")]
    pub points: usize,
}

fn default_sweep_points() -> usize {
    2000
}

/// Time base for step and impulse responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransientConfig {
    /// Simulated span in seconds; seven dominant time constants when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Number of samples.
    #[serde(default = "default_transient_points")]
    pub points: usize,
}

fn default_transient_points() -> usize {
    100
}

impl Default for TransientConfig {
    fn default() -> Self {
        Self {
            duration: None,
            points: default_transient_points(),
        }
    }
}

/// One filter design.
///
/// # TOML Format
///
/// ```toml
/// name = "Band-pass reference"
/// description = "Series RLC, output across R"
/// kind = "band-pass"
/// resistance = 100
/// inductance = "10m"
/// capacitance = "1u"
///
/// [sweep]
/// start = 10.0
/// stop = 1e7
/// points = 4000
///
/// [transient]
/// duration = 2e-3
/// points = 500
/// ```
///
/// `sweep` and `transient` are optional; without them the topology's default
/// grid and seven dominant time constants are used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDesign {
    /// Display name.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Topology name (`low-pass`, `high-pass`, `band-pass`, `notch` or an
    /// alias).
    pub kind: String,

    /// Resistance (Ω).
    pub resistance: ComponentValue,

    /// Inductance (H); band-pass and notch only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inductance: Option<ComponentValue>,

    /// Capacitance (F).
    pub capacitance: ComponentValue,

    /// Explicit frequency sweep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepConfig>,

    /// Transient time base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient: Option<TransientConfig>,
}

impl FilterDesign {
    /// Create a design from component values in base units.
    pub fn new(
        name: impl Into<String>,
        kind: FilterKind,
        resistance: impl Into<ComponentValue>,
        inductance: Option<ComponentValue>,
        capacitance: impl Into<ComponentValue>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: kind.name().to_string(),
            resistance: resistance.into(),
            inductance,
            capacitance: capacitance.into(),
            sweep: None,
            transient: None,
        }
    }

    /// Capture a validated spec as a design.
    pub fn from_spec(name: impl Into<String>, spec: &FilterSpec) -> Self {
        Self::new(
            name,
            spec.kind(),
            spec.resistance(),
            spec.inductance().map(ComponentValue::from),
            spec.capacitance(),
        )
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set an explicit sweep.
    pub fn with_sweep(mut self, sweep: SweepConfig) -> Self {
        self.sweep = Some(sweep);
        self
    }

    /// Set the transient time base.
    pub fn with_transient(mut self, transient: TransientConfig) -> Self {
        self.transient = Some(transient);
        self
    }

    /// Load a design from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a design from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the design to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        write_toml(path.as_ref(), &self.to_toml()?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parsed topology.
    pub fn filter_kind(&self) -> Result<FilterKind, ConfigError> {
        self.kind.parse().map_err(|_| {
            ConfigError::invalid_value(
                "kind",
                self.kind.as_str(),
                "expected low-pass, high-pass, band-pass or notch",
            )
        })
    }

    /// Resolve component values and validate them.
    pub fn to_spec(&self) -> Result<FilterSpec, ConfigError> {
        let kind = self.filter_kind()?;
        let resistance = self.resistance.resolve("resistance")?;
        let inductance = self
            .inductance
            .as_ref()
            .map(|l| l.resolve("inductance"))
            .transpose()?;
        let capacitance = self.capacitance.resolve("capacitance")?;
        Ok(FilterSpec::new(kind, resistance, inductance, capacitance)?)
    }

    /// Frequency sweep for this design.
    pub fn frequency_sweep(&self) -> Result<FrequencySweep, ConfigError> {
        match self.sweep {
            Some(s) => Ok(FrequencySweep::new(s.start, s.stop, s.points)?),
            None => Ok(FrequencySweep::for_spec(&self.to_spec()?)?),
        }
    }

    /// Time base for transient responses of `simulator`.
    pub fn time_base(&self, simulator: &TimeDomainSimulator) -> Result<Vec<f64>, ConfigError> {
        let transient = self.transient.unwrap_or_default();
        let t = match transient.duration {
            Some(duration) => linspace(0.0, duration, transient.points)?,
            None => simulator.default_time_base(transient.points)?,
        };
        Ok(t)
    }
}

pub(crate) fn write_toml(path: &Path, content: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
}
