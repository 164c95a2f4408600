//! Shoesize Units - shoe size conversion engine
//!
//! Converts sizes between sizing standards for a wearer category, routing
//! every conversion through foot length in centimeters:
//!
//! - EU (Paris point)
//! - US and UK (per-category affine fits)
//! - Centimeters and inches (physical length)
//!
//! The engine is a pure function module. It never reads or writes shared
//! state, rounds once at the end of a conversion and fails fast on unknown
//! tokens or non-finite numbers.

mod table;
mod convert;
mod parse;
mod chart;

pub use table::{AffineTransform, FormulaTable, FORMULAS, CM_PER_INCH, PARIS_POINT_CM};
pub use convert::{
    convert, convert_str, to_canonical, from_canonical, round_to,
    ConversionEngine, DEFAULT_PRECISION, MAX_PRECISION,
};
pub use parse::{parse_size, parse_conversion, sanitize_input};
pub use chart::{convert_all, size_chart, SizeRow, MAX_CHART_ROWS};

pub use shoesize_core::{Category, SizeError, SizeUnit, SizeValue};
