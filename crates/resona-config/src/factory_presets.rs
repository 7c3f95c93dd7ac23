//! Factory designs bundled with the library.
//!
//! These are the reference circuits used throughout the documentation and
//! tests. They are embedded at compile time and always available.

use crate::FilterDesign;

/// Factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "bandpass-reference",
    "lowpass-reference",
    "highpass-mixture",
    "notch-form-default",
];

/// TOML content for factory presets.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("bandpass-reference", BANDPASS_REFERENCE),
    ("lowpass-reference", LOWPASS_REFERENCE),
    ("highpass-mixture", HIGHPASS_MIXTURE),
    ("notch-form-default", NOTCH_FORM_DEFAULT),
];

/// Series RLC band-pass with ω0 = 10 krad/s and Q = 1.
const BANDPASS_REFERENCE: &str = r#"
name = "Band-pass reference"
description = "Series RLC, output across R: w0 = 10 krad/s, BW = 10 krad/s, Q = 1"
kind = "band-pass"
resistance = 100
inductance = "10m"
capacitance = "1u"

[transient]
duration = 2e-3
points = 500
"#;

/// RC low-pass with ωc = 1 krad/s.
const LOWPASS_REFERENCE: &str = r#"
name = "Low-pass reference"
description = "RC low-pass, tau = 1 ms, wc = 1 krad/s"
kind = "low-pass"
resistance = "1k"
capacitance = "1u"
"#;

/// RC high-pass separating a 5 Hz drift from a 200 Hz tone.
const HIGHPASS_MIXTURE: &str = r#"
name = "High-pass mixture"
description = "RC high-pass near 300 Hz for a 5 Hz + 200 Hz tone mixture"
kind = "high-pass"
resistance = "100k"
capacitance = "5.3n"

[transient]
duration = 0.8
points = 2000
"#;

/// Series RLC notch with the interactive form's default values.
const NOTCH_FORM_DEFAULT: &str = r#"
name = "Notch form default"
description = "Series RLC notch, output across L and C: w0 = 31.6 krad/s"
kind = "notch"
resistance = 100
inductance = "1m"
capacitance = "1u"
"#;

/// Get all factory presets.
pub fn factory_presets() -> Vec<FilterDesign> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| FilterDesign::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal or display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use resona_config::get_factory_preset;
///
/// let design = get_factory_preset("bandpass-reference").unwrap();
/// assert_eq!(design.name, "Band-pass reference");
/// ```
pub fn get_factory_preset(name: &str) -> Option<FilterDesign> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return FilterDesign::from_toml(toml).ok();
        }
    }

    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| FilterDesign::from_toml(toml).ok())
        .find(|design| design.name.to_lowercase() == name_lower)
}

/// Get the internal names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a name matches a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
