//! Text parsing - sizes like "42.5 eu" and conversions like "eu->cm"

use shoesize_core::{SizeError, SizeUnit};

/// Parse a size string like "42 eu", "9.5US" or "10.43\""
pub fn parse_size(s: &str) -> Result<(f64, SizeUnit), SizeError> {
    let s = s.trim();

    // Find where the number ends and the unit begins
    let mut split_pos = 0;
    let mut found_digit = false;

    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() || c == '.' || c == ',' || c == '-' || c == '+' {
            found_digit = true;
            split_pos = i + c.len_utf8();
        } else {
            split_pos = i;
            break;
        }
    }

    if !found_digit {
        return Err(SizeError::Parse(format!("no number found in: '{}'", s)));
    }

    let num_str = s[..split_pos].trim();
    let unit_str = s[split_pos..].trim();

    let value = parse_number(num_str)?;

    if unit_str.is_empty() {
        return Err(SizeError::Parse(format!("missing unit in: '{}'", s)));
    }
    let unit: SizeUnit = unit_str.parse()?;

    Ok((value, unit))
}

/// Parse a conversion string like "eu->cm", "US→UK" or "uk to eu"
pub fn parse_conversion(s: &str) -> Result<(SizeUnit, SizeUnit), SizeError> {
    let parts: Vec<&str> = if s.contains("->") {
        s.split("->").collect()
    } else if s.contains('→') {
        s.split('→').collect()
    } else if s.contains(" to ") {
        s.split(" to ").collect()
    } else {
        return Err(SizeError::Parse(format!(
            "invalid conversion format: '{}', expected 'unit1->unit2'", s
        )));
    };

    if parts.len() != 2 {
        return Err(SizeError::Parse(format!(
            "invalid conversion format: '{}', expected 'unit1->unit2'", s
        )));
    }

    Ok((parts[0].parse()?, parts[1].parse()?))
}

/// Form-field sanitation: accept only finite, positive numbers
///
/// Empty, non-numeric and non-positive input yields `None`, so the caller
/// keeps showing its last valid value instead of reporting an error.
pub fn sanitize_input(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    parse_number(s).ok().filter(|v| *v > 0.0)
}

/// Decimal number, accepting a comma as decimal separator
fn parse_number(s: &str) -> Result<f64, SizeError> {
    let normalized = s.replace(',', ".");
    let value: f64 = normalized.parse()
        .map_err(|_| SizeError::Parse(format!("invalid number: '{}'", s)))?;
    if !value.is_finite() {
        return Err(SizeError::NonFinite { value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("42 eu").unwrap(), (42.0, SizeUnit::Eu));
        assert_eq!(parse_size("9.5US").unwrap(), (9.5, SizeUnit::Us));
        assert_eq!(parse_size("  26,5 cm ").unwrap(), (26.5, SizeUnit::Cm));
        assert_eq!(parse_size("10.43\"").unwrap(), (10.43, SizeUnit::In));
        assert_eq!(parse_size("8 inches").unwrap(), (8.0, SizeUnit::In));
    }

    #[test]
    fn test_parse_size_errors() {
        assert!(matches!(parse_size("eu"), Err(SizeError::Parse(_))));
        assert!(matches!(parse_size("42"), Err(SizeError::Parse(_))));
        assert!(matches!(parse_size("4.2.1 eu"), Err(SizeError::Parse(_))));
        assert_eq!(parse_size("42 mm").unwrap_err(), SizeError::InvalidUnit("mm".to_string()));
    }

    #[test]
    fn test_parse_conversion() {
        assert_eq!(parse_conversion("eu->cm").unwrap(), (SizeUnit::Eu, SizeUnit::Cm));
        assert_eq!(parse_conversion("US→UK").unwrap(), (SizeUnit::Us, SizeUnit::Uk));
        assert_eq!(parse_conversion("inches to eu").unwrap(), (SizeUnit::In, SizeUnit::Eu));
    }

    #[test]
    fn test_parse_conversion_errors() {
        assert!(matches!(parse_conversion("eu cm"), Err(SizeError::Parse(_))));
        assert!(matches!(parse_conversion("eu->us->uk"), Err(SizeError::Parse(_))));
        assert!(matches!(parse_conversion("eu->mm"), Err(SizeError::InvalidUnit(_))));
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("42"), Some(42.0));
        assert_eq!(sanitize_input(" 9,5 "), Some(9.5));
        assert_eq!(sanitize_input(""), None);
        assert_eq!(sanitize_input("abc"), None);
        assert_eq!(sanitize_input("0"), None);
        assert_eq!(sanitize_input("-3"), None);
        assert_eq!(sanitize_input("NaN"), None);
        assert_eq!(sanitize_input("inf"), None);
    }
}
