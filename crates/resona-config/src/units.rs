//! Component values with SI prefixes.

/// Unit symbols accepted after a value, longest first.
const UNITS: &[&str] = &["ohms", "ohm", "Ω", "H", "F"];

/// Parse a component value such as `"4.7k"`, `"10 mH"`, `"1µF"` or
/// `"100 ohm"` into base SI units.
///
/// Supported prefixes: `p`, `n`, `u`/`µ`/`μ`, `m`, `k`, `M`, `G`. Prefixes are
/// case-sensitive (`m` is milli, `M` is mega). A trailing unit symbol is
/// accepted and ignored; plain numbers (including exponent notation such as
/// `"1e-6"`) pass through unchanged.
///
/// Returns `None` if the text is not a number with an optional prefix and
/// unit.
///
/// # Example
///
/// ```rust
/// use resona_config::parse_component_value;
///
/// assert_eq!(parse_component_value("4.7k"), Some(4700.0));
/// assert_eq!(parse_component_value("10 mH"), Some(10e-3));
/// assert_eq!(parse_component_value("abc"), None);
/// ```
pub fn parse_component_value(text: &str) -> Option<f64> {
    let mut value = text.trim();
    for unit in UNITS {
        if let Some(stripped) = value.strip_suffix(unit) {
            value = stripped.trim_end();
            break;
        }
    }

    if let Ok(number) = value.parse::<f64>() {
        return Some(number);
    }

    let prefix = value.chars().next_back()?;
    let multiplier = match prefix {
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' | 'μ' => 1e-6,
        'm' => 1e-3,
        'k' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        _ => return None,
    };
    let mantissa = value[..value.len() - prefix.len_utf8()].trim_end();
    mantissa.parse::<f64>().ok().map(|v| v * multiplier)
}

/// Format a value with the closest engineering prefix, e.g. `10 m`.
pub fn format_component_value(value: f64) -> String {
    const PREFIXES: &[(f64, &str)] = &[
        (1e9, "G"),
        (1e6, "M"),
        (1e3, "k"),
        (1.0, ""),
        (1e-3, "m"),
        (1e-6, "µ"),
        (1e-9, "n"),
        (1e-12, "p"),
    ];

    let magnitude = value.abs();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return format!("{value}");
    }
    let (scale, prefix) = PREFIXES
        .iter()
        .find(|(scale, _)| magnitude >= scale * (1.0 - 1e-12))
        .copied()
        .unwrap_or((1e-12, "p"));
    let scaled = value / scale;
    let text = format!("{scaled:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text} {prefix}").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() <= 1e-12 * b.abs())
    }

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_component_value("100"), Some(100.0));
        assert_eq!(parse_component_value(" 1e-6 "), Some(1e-6));
        assert_eq!(parse_component_value("5.3e-9"), Some(5.3e-9));
    }

    #[test]
    fn prefixes() {
        assert!(close(parse_component_value("10m"), 10e-3));
        assert!(close(parse_component_value("1u"), 1e-6));
        assert!(close(parse_component_value("1µ"), 1e-6));
        assert!(close(parse_component_value("5.3n"), 5.3e-9));
        assert!(close(parse_component_value("22p"), 22e-12));
        assert!(close(parse_component_value("4.7k"), 4.7e3));
        assert!(close(parse_component_value("2.2M"), 2.2e6));
        assert!(close(parse_component_value("1G"), 1e9));
    }

    #[test]
    fn units_are_ignored() {
        assert!(close(parse_component_value("100 ohm"), 100.0));
        assert!(close(parse_component_value("100ohms"), 100.0));
        assert!(close(parse_component_value("4.7kΩ"), 4.7e3));
        assert!(close(parse_component_value("10 mH"), 10e-3));
        assert!(close(parse_component_value("1 µF"), 1e-6));
        assert!(close(parse_component_value("2F"), 2.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_component_value(""), None);
        assert_eq!(parse_component_value("k"), None);
        assert_eq!(parse_component_value("10x"), None);
        assert_eq!(parse_component_value("H"), None);
        assert_eq!(parse_component_value("ten"), None);
    }

    #[test]
    fn formatting() {
        assert_eq!(format_component_value(10e-3), "10 m");
        assert_eq!(format_component_value(4700.0), "4.7 k");
        assert_eq!(format_component_value(100.0), "100");
        assert_eq!(format_component_value(1e-6), "1 µ");
        assert_eq!(format_component_value(5.3e-9), "5.3 n");
    }
}
