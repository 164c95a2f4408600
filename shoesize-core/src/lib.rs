//! Shoesize Core
//!
//! Fundamental types shared by the conversion engine and its callers:
//! sizing standards, wearer categories, sized values and errors.

mod error;
mod unit;
mod value;

pub use error::{codes, ErrorReport, SizeError};
pub use unit::{Category, SizeUnit};
pub use value::SizeValue;

/// Convenient re-exports
pub mod prelude {
    pub use crate::{Category, ErrorReport, SizeError, SizeUnit, SizeValue};
}
