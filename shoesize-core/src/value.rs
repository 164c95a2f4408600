//! A size paired with its standard and category

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::{Category, SizeUnit};

/// Transient conversion input or output
///
/// The category only affects US and UK numbers, but it always travels with
/// the value so a chained conversion keeps using the same formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeValue {
    pub value: f64,
    pub unit: SizeUnit,
    #[serde(default)]
    pub category: Category,
}

impl SizeValue {
    pub fn new(value: f64, unit: SizeUnit, category: Category) -> Self {
        Self { value, unit, category }
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.value, self.unit, self.category)
    }
}
