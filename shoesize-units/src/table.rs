//! Formula table - one affine transform per (category, unit)
//!
//! Every unit maps to foot length in centimeters through
//! `cm = (size - offset) * slope + base`, and back through the exact
//! algebraic inverse. Keeping both directions on one record is what makes
//! a unit -> cm -> unit round trip consistent.

use std::collections::HashMap;
use std::sync::LazyLock;
use shoesize_core::{Category, SizeError, SizeUnit};

/// One inch is 2.54 cm by definition
pub const CM_PER_INCH: f64 = 2.54;

/// Each EU size step is one Paris point (2/3 cm)
pub const PARIS_POINT_CM: f64 = 2.0 / 3.0;

/// Global formula table
pub static FORMULAS: LazyLock<FormulaTable> = LazyLock::new(FormulaTable::new);

/// Linear relation between a size number and foot length in cm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    /// Size number at which `base` applies
    pub offset: f64,
    /// Centimeters per size step (always positive)
    pub slope: f64,
    /// Foot length in cm at `offset`
    pub base: f64,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform { offset: 0.0, slope: 1.0, base: 0.0 };

    pub const fn new(offset: f64, slope: f64, base: f64) -> Self {
        Self { offset, slope, base }
    }

    /// Size number -> centimeters
    pub fn to_canonical(&self, size: f64) -> f64 {
        (size - self.offset) * self.slope + self.base
    }

    /// Centimeters -> size number
    pub fn from_canonical(&self, cm: f64) -> f64 {
        (cm - self.base) / self.slope + self.offset
    }
}

/// Registry of transforms keyed by category and unit
pub struct FormulaTable {
    transforms: HashMap<(Category, SizeUnit), AffineTransform>,
}

impl FormulaTable {
    pub fn new() -> Self {
        let mut table = FormulaTable { transforms: HashMap::new() };
        table.register_all();
        table
    }

    /// Look up the transform for a unit within a category
    pub fn get(&self, category: Category, unit: SizeUnit) -> Option<&AffineTransform> {
        self.transforms.get(&(category, unit))
    }

    /// Like `get`, but a missing entry is an `InvalidUnit` error
    pub fn transform(&self, category: Category, unit: SizeUnit) -> Result<&AffineTransform, SizeError> {
        self.get(category, unit)
            .ok_or_else(|| SizeError::InvalidUnit(format!("{} ({})", unit.as_str(), category)))
    }

    /// Number of registered transforms
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    fn register(&mut self, category: Category, unit: SizeUnit, transform: AffineTransform) {
        self.transforms.insert((category, unit), transform);
    }

    fn register_all(&mut self) {
        for category in Category::ALL {
            self.register_length_units(category);
        }
        self.register_men();
        self.register_women();
        self.register_kids();
    }

    fn register_length_units(&mut self, category: Category) {
        self.register(category, SizeUnit::Cm, AffineTransform::IDENTITY);
        self.register(category, SizeUnit::In, AffineTransform::new(0.0, CM_PER_INCH, 0.0));
    }

    fn register_men(&mut self) {
        // EU = (cm + 1.5) * 1.5
        self.register(Category::Men, SizeUnit::Eu, AffineTransform::new(0.0, PARIS_POINT_CM, -1.5));
        self.register(Category::Men, SizeUnit::Us, AffineTransform::new(6.0, 0.846, 24.5));
        self.register(Category::Men, SizeUnit::Uk, AffineTransform::new(5.5, 0.846, 24.5));
    }

    fn register_women(&mut self) {
        self.register(Category::Women, SizeUnit::Eu, AffineTransform::new(0.0, PARIS_POINT_CM, -1.5));
        self.register(Category::Women, SizeUnit::Us, AffineTransform::new(4.0, 0.846, 21.5));
        self.register(Category::Women, SizeUnit::Uk, AffineTransform::new(3.0, 0.846, 22.5));
    }

    fn register_kids(&mut self) {
        // Kids use a smaller last allowance and one shared US/UK approximation
        self.register(Category::Kids, SizeUnit::Eu, AffineTransform::new(0.0, PARIS_POINT_CM, -0.5));
        self.register(Category::Kids, SizeUnit::Us, AffineTransform::new(-10.0, 0.8, 0.0));
        self.register(Category::Kids, SizeUnit::Uk, AffineTransform::new(-10.0, 0.8, 0.0));
    }
}

impl Default for FormulaTable {
    fn default() -> Self {
        Self::new()
    }
}
