//! Shared CLI helpers used across multiple commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use resona_config::{
    ComponentValue, FilterDesign, format_component_value, get_factory_preset,
    parse_component_value,
};
use resona_core::{CharacteristicFrequencies, FilterKind, FilterSpec, SolverStrategy};

/// Filter selection shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Filter topology
    #[arg(long, value_enum, conflicts_with_all = ["preset", "design"])]
    pub kind: Option<KindArg>,

    /// Resistance in ohms (accepts SI prefixes: 100, 4.7k)
    #[arg(short = 'R', long, value_parser = parse_value)]
    pub resistance: Option<f64>,

    /// Inductance in henries (band-pass and notch: 10m)
    #[arg(short = 'L', long, value_parser = parse_value)]
    pub inductance: Option<f64>,

    /// Capacitance in farads (1u, 5.3n)
    #[arg(short = 'C', long, value_parser = parse_value)]
    pub capacitance: Option<f64>,

    /// Factory preset name
    #[arg(long, conflicts_with = "design")]
    pub preset: Option<String>,

    /// Design TOML file
    #[arg(long)]
    pub design: Option<PathBuf>,
}

/// Topology names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// RC low-pass
    #[value(alias = "lp")]
    LowPass,
    /// RC high-pass
    #[value(alias = "hp")]
    HighPass,
    /// Series RLC band-pass
    #[value(alias = "bp")]
    BandPass,
    /// Series RLC notch
    #[value(alias = "band-stop")]
    Notch,
}

impl From<KindArg> for FilterKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::LowPass => FilterKind::LowPass,
            KindArg::HighPass => FilterKind::HighPass,
            KindArg::BandPass => FilterKind::BandPass,
            KindArg::Notch => FilterKind::Notch,
        }
    }
}

/// Cutoff derivation selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrategyArg {
    /// Closed form where available, numeric for the notch
    #[default]
    Auto,
    /// Closed-form circuit formulas
    ClosedForm,
    /// Root finding on |H(jω)|
    Numeric,
    /// Closed form checked against the numeric path
    CrossChecked,
}

impl From<StrategyArg> for SolverStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Auto => SolverStrategy::Auto,
            StrategyArg::ClosedForm => SolverStrategy::ClosedForm,
            StrategyArg::Numeric => SolverStrategy::Numeric,
            StrategyArg::CrossChecked => SolverStrategy::CrossChecked,
        }
    }
}

/// Parse a component value for clap's `value_parser`.
pub fn parse_value(s: &str) -> Result<f64, String> {
    parse_component_value(s)
        .ok_or_else(|| format!("invalid component value '{s}' (expected e.g. 100, 4.7k, 10m, 1u)"))
}

impl FilterArgs {
    /// Resolve the selection to a design.
    ///
    /// A design file or preset supplies every value; component flags given
    /// alongside override the corresponding values.
    pub fn load_design(&self) -> anyhow::Result<FilterDesign> {
        let mut design = if let Some(path) = &self.design {
            FilterDesign::load(path)?
        } else if let Some(name) = &self.preset {
            get_factory_preset(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "Preset '{name}' not found. Use 'resona presets list' to see available presets."
                )
            })?
        } else {
            let Some(kind) = self.kind else {
                anyhow::bail!("Select a filter with --kind, --preset or --design");
            };
            let (Some(r), Some(c)) = (self.resistance, self.capacitance) else {
                anyhow::bail!("--kind needs both -R/--resistance and -C/--capacitance");
            };
            let kind = FilterKind::from(kind);
            return Ok(FilterDesign::new(
                kind.name(),
                kind,
                r,
                self.inductance.map(ComponentValue::from),
                c,
            ));
        };

        if let Some(r) = self.resistance {
            design.resistance = r.into();
        }
        if let Some(l) = self.inductance {
            design.inductance = Some(l.into());
        }
        if let Some(c) = self.capacitance {
            design.capacitance = c.into();
        }
        Ok(design)
    }
}

/// Validate a design into an engine spec.
pub fn to_spec(design: &FilterDesign) -> anyhow::Result<FilterSpec> {
    Ok(design.to_spec()?)
}

/// One-line component summary, e.g. `R = 100 Ω, L = 10 mH, C = 1 µF`.
pub fn describe_components(spec: &FilterSpec) -> String {
    let mut parts = vec![format!("R = {}Ω", spaced(spec.resistance()))];
    if let Some(l) = spec.inductance() {
        parts.push(format!("L = {}H", spaced(l)));
    }
    parts.push(format!("C = {}F", spaced(spec.capacitance())));
    parts.join(", ")
}

fn spaced(value: f64) -> String {
    let text = format_component_value(value);
    if text.ends_with(|c: char| c.is_ascii_digit()) {
        format!("{text} ")
    } else {
        text
    }
}

/// Print characteristic frequencies as an aligned block.
pub fn print_characteristics(cf: &CharacteristicFrequencies) {
    let label = if cf.kind.is_two_sided() { "ω0" } else { "ωc" };
    println!(
        "  {label:<10} {:>14.4} rad/s  ({:.4} Hz)",
        cf.omega_0,
        hz(cf.omega_0)
    );
    if let (Some(lower), Some(upper)) = (cf.lower_cutoff(), cf.upper_cutoff()) {
        println!("  {:<10} {:>14.4} rad/s  ({:.4} Hz)", "ωc1", lower, hz(lower));
        println!("  {:<10} {:>14.4} rad/s  ({:.4} Hz)", "ωc2", upper, hz(upper));
    }
    if let Some(bw) = cf.bandwidth {
        println!("  {:<10} {:>14.4} rad/s  ({:.4} Hz)", "BW", bw, hz(bw));
    }
    if let Some(q) = cf.quality_factor {
        println!("  {:<10} {:>14.6}", "Q", q);
    }
    println!("  {:<10} {:>14}", "strategy", cf.strategy.name());
    for d in &cf.diagnostics {
        println!(
            "  warning: {} derivations disagree: {:.9e} vs {:.9e} (relative error {:.2e})",
            d.quantity, d.primary, d.alternative, d.relative_error
        );
    }
}

/// Characteristic frequencies as JSON.
pub fn characteristics_json(cf: &CharacteristicFrequencies) -> serde_json::Value {
    let diagnostics: Vec<_> = cf
        .diagnostics
        .iter()
        .map(|d| {
            serde_json::json!({
                "quantity": d.quantity,
                "primary": d.primary,
                "alternative": d.alternative,
                "relative_error": d.relative_error,
            })
        })
        .collect();

    serde_json::json!({
        "kind": cf.kind.name(),
        "omega_0": cf.omega_0,
        "cutoffs": cf.cutoffs.to_vec(),
        "bandwidth": cf.bandwidth,
        "quality_factor": cf.quality_factor,
        "strategy": cf.strategy.name(),
        "diagnostics": diagnostics,
    })
}

/// Angular frequency to Hz.
pub fn hz(omega: f64) -> f64 {
    omega / std::f64::consts::TAU
}

/// Indices of at most `rows` evenly spread samples, always including the last.
pub fn table_rows(len: usize, rows: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let step = (len / rows.max(1)).max(1);
    let mut indices: Vec<usize> = (0..len).step_by(step).collect();
    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> FilterArgs {
        FilterArgs {
            kind: None,
            resistance: None,
            inductance: None,
            capacitance: None,
            preset: None,
            design: None,
        }
    }

    #[test]
    fn parse_value_accepts_prefixes() {
        assert_eq!(parse_value("4.7k"), Ok(4700.0));
        assert!(parse_value("abc").is_err());
    }

    #[test]
    fn components_build_a_design() {
        let design = FilterArgs {
            kind: Some(KindArg::BandPass),
            resistance: Some(100.0),
            inductance: Some(10e-3),
            capacitance: Some(1e-6),
            ..args()
        }
        .load_design()
        .unwrap();
        assert_eq!(design.filter_kind().unwrap(), FilterKind::BandPass);
        assert!(design.to_spec().is_ok());
    }

    #[test]
    fn nothing_selected_is_an_error() {
        assert!(args().load_design().is_err());
    }

    #[test]
    fn preset_values_can_be_overridden() {
        let design = FilterArgs {
            preset: Some("lowpass-reference".into()),
            resistance: Some(2000.0),
            ..args()
        }
        .load_design()
        .unwrap();
        let spec = design.to_spec().unwrap();
        assert_eq!(spec.resistance(), 2000.0);
        assert!((spec.time_constant() - 2e-3).abs() < 1e-15);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let err = FilterArgs {
            preset: Some("wah".into()),
            ..args()
        }
        .load_design()
        .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn component_summary() {
        let spec = FilterSpec::band_pass(100.0, 10e-3, 1e-6).unwrap();
        assert_eq!(describe_components(&spec), "R = 100 Ω, L = 10 mH, C = 1 µF");
    }

    #[test]
    fn table_rows_include_last() {
        assert_eq!(table_rows(10, 3), vec![0, 3, 6, 9]);
        assert_eq!(table_rows(5, 20), vec![0, 1, 2, 3, 4]);
        assert!(table_rows(0, 5).is_empty());
    }
}
