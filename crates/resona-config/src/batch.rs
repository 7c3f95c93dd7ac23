//! Multiple designs in one file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::design::write_toml;
use crate::error::ConfigError;
use crate::FilterDesign;

/// A batch of designs analyzed together.
///
/// ```toml
/// name = "Lab 3"
///
/// [[designs]]
/// name = "LP"
/// kind = "low-pass"
/// resistance = "1k"
/// capacitance = "1u"
///
/// [[designs]]
/// name = "BP"
/// kind = "band-pass"
/// resistance = 100
/// inductance = "10m"
/// capacitance = "1u"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignBatch {
    /// Optional batch name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Designs in file order.
    #[serde(default)]
    pub designs: Vec<FilterDesign>,
}

impl DesignBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a design.
    pub fn with_design(mut self, design: FilterDesign) -> Self {
        self.designs.push(design);
        self
    }

    /// Load a batch from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a batch from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the batch to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        write_toml(path.as_ref(), &self.to_toml()?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of designs.
    pub fn len(&self) -> usize {
        self.designs.len()
    }

    /// True if the batch holds no designs.
    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    /// Iterate over the designs.
    pub fn iter(&self) -> std::slice::Iter<'_, FilterDesign> {
        self.designs.iter()
    }
}

impl<'a> IntoIterator for &'a DesignBatch {
    type Item = &'a FilterDesign;
    type IntoIter = std::slice::Iter<'a, FilterDesign>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
