//! Server configuration from the environment

use std::env;
use shoesize_core::Category;
use shoesize_units::{DEFAULT_PRECISION, MAX_PRECISION};
use tracing::warn;

pub const PRECISION_VAR: &str = "SHOESIZE_PRECISION";
pub const CATEGORY_VAR: &str = "SHOESIZE_CATEGORY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Decimal places for converted values
    pub precision: u32,
    /// Category used when a tool call does not name one
    pub default_category: Category,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            default_category: Category::Men,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; malformed values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(PRECISION_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(p) if p <= MAX_PRECISION => config.precision = p,
                _ => warn!(value = %raw, "ignoring invalid {}", PRECISION_VAR),
            }
        }

        if let Some(raw) = lookup(CATEGORY_VAR) {
            match raw.parse::<Category>() {
                Ok(c) => config.default_category = c,
                Err(e) => warn!(error = %e, "ignoring invalid {}", CATEGORY_VAR),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
        assert_eq!(Config::default().precision, 2);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[(PRECISION_VAR, "1"), (CATEGORY_VAR, "Women")]));
        assert_eq!(config.precision, 1);
        assert_eq!(config.default_category, Category::Women);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[(PRECISION_VAR, "lots"), (CATEGORY_VAR, "dogs")]));
        assert_eq!(config, Config::default());

        let config = Config::from_lookup(lookup(&[(PRECISION_VAR, "11")]));
        assert_eq!(config.precision, DEFAULT_PRECISION);
    }
}
