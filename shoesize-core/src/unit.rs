//! Sizing standards and wearer categories

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::SizeError;

/// A shoe sizing standard, or a physical length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    /// Continental European (Paris point) size
    Eu,
    /// United States size
    Us,
    /// United Kingdom size
    Uk,
    /// Foot length in centimeters
    Cm,
    /// Foot length in inches
    In,
}

impl SizeUnit {
    /// All units, in display order
    pub const ALL: [SizeUnit; 5] = [SizeUnit::Eu, SizeUnit::Us, SizeUnit::Uk, SizeUnit::Cm, SizeUnit::In];

    /// Lowercase token used in text and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeUnit::Eu => "eu",
            SizeUnit::Us => "us",
            SizeUnit::Uk => "uk",
            SizeUnit::Cm => "cm",
            SizeUnit::In => "in",
        }
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            SizeUnit::Eu => "EU",
            SizeUnit::Us => "US",
            SizeUnit::Uk => "UK",
            SizeUnit::Cm => "cm",
            SizeUnit::In => "in",
        }
    }

    /// Input increment a form or slider would use for this unit
    pub fn step(&self) -> f64 {
        match self {
            SizeUnit::Eu | SizeUnit::Us | SizeUnit::Uk => 0.5,
            SizeUnit::Cm | SizeUnit::In => 0.1,
        }
    }

    /// Whether the unit is a physical length rather than a size number
    pub fn is_length(&self) -> bool {
        matches!(self, SizeUnit::Cm | SizeUnit::In)
    }
}

impl FromStr for SizeUnit {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eu" | "eur" | "european" => Ok(SizeUnit::Eu),
            "us" | "usa" => Ok(SizeUnit::Us),
            "uk" | "gb" => Ok(SizeUnit::Uk),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => Ok(SizeUnit::Cm),
            "in" | "inch" | "inches" | "\"" => Ok(SizeUnit::In),
            _ => Err(SizeError::InvalidUnit(s.trim().to_string())),
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Wearer population the sizing formulas apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Men,
    Women,
    Kids,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Men, Category::Women, Category::Kids];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Men => "men",
            Category::Women => "women",
            Category::Kids => "kids",
        }
    }
}

impl FromStr for Category {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "men" | "man" | "m" | "male" | "mens" => Ok(Category::Men),
            "women" | "woman" | "w" | "female" | "womens" => Ok(Category::Women),
            "kids" | "kid" | "k" | "child" | "children" => Ok(Category::Kids),
            _ => Err(SizeError::InvalidCategory(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
