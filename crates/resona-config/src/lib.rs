//! Filter design files for resona.
//!
//! This crate maps human-written TOML designs onto the validated engine types
//! in `resona-core`.
//!
//! # Features
//!
//! - **Designs**: one filter per file, with optional sweep and transient settings
//! - **Batches**: many designs in one file via `[[designs]]` tables
//! - **Component values**: SI prefixes and unit symbols (`"10m"`, `"4.7 kΩ"`)
//! - **Factory Presets**: the reference circuits, always available
//!
//! # Example
//!
//! ```rust
//! use resona_config::FilterDesign;
//! use resona_core::FilterKind;
//!
//! let design = FilterDesign::from_toml(r#"
//! name = "RC"
//! kind = "low-pass"
//! resistance = "1k"
//! capacitance = "1u"
//! "#).unwrap();
//!
//! let spec = design.to_spec().unwrap();
//! assert_eq!(spec.kind(), FilterKind::LowPass);
//! assert!((spec.time_constant() - 1e-3).abs() < 1e-15);
//! ```

mod batch;
mod design;
mod error;
mod units;

/// Factory designs bundled with the library.
pub mod factory_presets;

pub use batch::DesignBatch;
pub use design::{ComponentValue, FilterDesign, SweepConfig, TransientConfig};
pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use units::{format_component_value, parse_component_value};
