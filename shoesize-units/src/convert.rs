//! Size conversion through the centimeter pivot

use shoesize_core::{Category, SizeError, SizeUnit, SizeValue};
use tracing::trace;
use crate::table::FORMULAS;

/// Decimal places applied to converted results
pub const DEFAULT_PRECISION: u32 = 2;

/// Largest precision accepted by `with_precision`
pub const MAX_PRECISION: u32 = 10;

/// Stateless converter carrying only its rounding precision
///
/// `Copy` and free of shared state, so it can be used from any thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionEngine {
    precision: u32,
}

impl ConversionEngine {
    pub const fn new() -> Self {
        Self { precision: DEFAULT_PRECISION }
    }

    /// Set result precision in decimal places (capped at `MAX_PRECISION`)
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision.min(MAX_PRECISION);
        self
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Convert `value` from one unit to another for a category
    ///
    /// Identity conversions return `value` untouched. Everything else goes
    /// unit -> cm -> unit and is rounded exactly once, at the end.
    pub fn convert(&self, value: f64, from: SizeUnit, to: SizeUnit, category: Category) -> Result<f64, SizeError> {
        if !value.is_finite() {
            return Err(SizeError::NonFinite { value });
        }
        if from == to {
            return Ok(value);
        }

        let cm = to_canonical(value, from, category)?;
        let raw = from_canonical(cm, to, category)?;
        let result = round_to(raw, self.precision);

        if !result.is_finite() {
            return Err(SizeError::NonFinite { value: result });
        }

        trace!(%from, %to, %category, value, cm, result, "converted size");
        Ok(result)
    }

    /// Convert a `SizeValue`, keeping its category
    pub fn convert_value(&self, size: SizeValue, to: SizeUnit) -> Result<SizeValue, SizeError> {
        let value = self.convert(size.value, size.unit, to, size.category)?;
        Ok(SizeValue::new(value, to, size.category))
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert with the default two-decimal precision
pub fn convert(value: f64, from: SizeUnit, to: SizeUnit, category: Category) -> Result<f64, SizeError> {
    ConversionEngine::new().convert(value, from, to, category)
}

/// Convert using textual unit and category tokens
pub fn convert_str(value: f64, from: &str, to: &str, category: &str) -> Result<f64, SizeError> {
    let from: SizeUnit = from.parse()?;
    let to: SizeUnit = to.parse()?;
    let category: Category = category.parse()?;
    convert(value, from, to, category)
}

/// Size in `from` -> foot length in centimeters (unrounded)
pub fn to_canonical(value: f64, from: SizeUnit, category: Category) -> Result<f64, SizeError> {
    Ok(FORMULAS.transform(category, from)?.to_canonical(value))
}

/// Foot length in centimeters -> size in `to` (unrounded)
pub fn from_canonical(cm: f64, to: SizeUnit, category: Category) -> Result<f64, SizeError> {
    Ok(FORMULAS.transform(category, to)?.from_canonical(cm))
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        // Too large to carry a fractional part anyway
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eu_to_cm() {
        assert_eq!(convert(42.0, SizeUnit::Eu, SizeUnit::Cm, Category::Men).unwrap(), 26.5);
    }

    #[test]
    fn test_cm_to_eu() {
        assert_eq!(convert(26.5, SizeUnit::Cm, SizeUnit::Eu, Category::Men).unwrap(), 42.0);
    }

    #[test]
    fn test_inches_to_cm() {
        assert_eq!(convert(10.43, SizeUnit::In, SizeUnit::Cm, Category::Men).unwrap(), 26.49);
    }

    #[test]
    fn test_cm_to_inches() {
        assert_eq!(convert(26.5, SizeUnit::Cm, SizeUnit::In, Category::Women).unwrap(), 10.43);
    }

    #[test]
    fn test_us_men_vs_women() {
        let men = convert(8.0, SizeUnit::Us, SizeUnit::Cm, Category::Men).unwrap();
        let women = convert(8.0, SizeUnit::Us, SizeUnit::Cm, Category::Women).unwrap();
        assert_eq!(men, 26.19);
        assert_eq!(women, 24.88);
        assert_ne!(men, women);
    }

    #[test]
    fn test_eu_to_us_men() {
        // 42 EU = 26.5 cm = (26.5 - 24.5) / 0.846 + 6
        assert_eq!(convert(42.0, SizeUnit::Eu, SizeUnit::Us, Category::Men).unwrap(), 8.36);
        assert_eq!(convert(42.0, SizeUnit::Eu, SizeUnit::Uk, Category::Men).unwrap(), 7.86);
    }

    #[test]
    fn test_kids_formulas() {
        // (10 + 10) * 0.8 = 16 cm
        assert_eq!(convert(10.0, SizeUnit::Us, SizeUnit::Cm, Category::Kids).unwrap(), 16.0);
        assert_eq!(convert(10.0, SizeUnit::Us, SizeUnit::Uk, Category::Kids).unwrap(), 10.0);
        // (16 + 0.5) * 1.5
        assert_eq!(convert(16.0, SizeUnit::Cm, SizeUnit::Eu, Category::Kids).unwrap(), 24.75);
    }

    #[test]
    fn test_kids_eu_differs_from_adults() {
        let kids = convert(30.0, SizeUnit::Eu, SizeUnit::Cm, Category::Kids).unwrap();
        let men = convert(30.0, SizeUnit::Eu, SizeUnit::Cm, Category::Men).unwrap();
        assert_eq!(kids, 19.5);
        assert_eq!(men, 18.5);
    }

    #[test]
    fn test_identity_is_untouched() {
        let v = 42.123456;
        for unit in SizeUnit::ALL {
            assert_eq!(convert(v, unit, unit, Category::Women).unwrap(), v);
        }
    }

    #[test]
    fn test_nan_fails() {
        let err = convert(f64::NAN, SizeUnit::Eu, SizeUnit::Us, Category::Men).unwrap_err();
        assert!(matches!(err, SizeError::NonFinite { .. }));
    }

    #[test]
    fn test_infinite_fails_even_for_identity() {
        assert!(convert(f64::INFINITY, SizeUnit::Cm, SizeUnit::Cm, Category::Men).is_err());
        assert!(convert(f64::NEG_INFINITY, SizeUnit::Eu, SizeUnit::Cm, Category::Men).is_err());
    }

    #[test]
    fn test_overflowing_result_fails() {
        let err = convert(f64::MAX, SizeUnit::In, SizeUnit::Cm, Category::Men).unwrap_err();
        assert!(matches!(err, SizeError::NonFinite { .. }));
    }

    #[test]
    fn test_non_positive_values_are_converted() {
        assert_eq!(convert(0.0, SizeUnit::Cm, SizeUnit::Eu, Category::Men).unwrap(), 2.25);
        assert_eq!(convert(-1.0, SizeUnit::In, SizeUnit::Cm, Category::Men).unwrap(), -2.54);
    }

    #[test]
    fn test_convert_str() {
        assert_eq!(convert_str(42.0, "EU", "cm", "men").unwrap(), 26.5);
        assert_eq!(
            convert_str(42.0, "mm", "cm", "men").unwrap_err(),
            SizeError::InvalidUnit("mm".to_string())
        );
        assert_eq!(
            convert_str(42.0, "eu", "cm", "dogs").unwrap_err(),
            SizeError::InvalidCategory("dogs".to_string())
        );
    }

    #[test]
    fn test_precision() {
        let engine = ConversionEngine::new().with_precision(4);
        assert_eq!(engine.convert(10.43, SizeUnit::In, SizeUnit::Cm, Category::Men).unwrap(), 26.4922);

        let engine = ConversionEngine::new().with_precision(0);
        assert_eq!(engine.convert(10.43, SizeUnit::In, SizeUnit::Cm, Category::Men).unwrap(), 26.0);

        assert_eq!(ConversionEngine::new().with_precision(99).precision(), MAX_PRECISION);
    }

    #[test]
    fn test_convert_value_keeps_category() {
        let size = SizeValue::new(8.0, SizeUnit::Us, Category::Women);
        let cm = ConversionEngine::default().convert_value(size, SizeUnit::Cm).unwrap();
        assert_eq!(cm, SizeValue::new(24.88, SizeUnit::Cm, Category::Women));
    }

    #[test]
    fn test_canonical_is_unrounded() {
        let cm = to_canonical(10.43, SizeUnit::In, Category::Men).unwrap();
        assert_relative_eq!(cm, 26.4922, epsilon = 1e-9);
        let inches = from_canonical(cm, SizeUnit::In, Category::Men).unwrap();
        assert_relative_eq!(inches, 10.43, epsilon = 1e-9);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(26.4922, 2), 26.49);
        assert_eq!(round_to(2.675, 1), 2.7);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(f64::MAX, 2), f64::MAX);
    }
}
