//! Size rows across every unit, and range charts built from them

use serde::{Deserialize, Serialize};
use shoesize_core::{Category, SizeError, SizeUnit};
use tracing::debug;
use crate::ConversionEngine;

/// Largest chart `size_chart` will build
pub const MAX_CHART_ROWS: usize = 1000;

/// One size expressed in every unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRow {
    pub category: Category,
    pub eu: f64,
    pub us: f64,
    pub uk: f64,
    pub cm: f64,
    #[serde(rename = "in")]
    pub inches: f64,
}

impl SizeRow {
    /// Value for a single unit
    pub fn get(&self, unit: SizeUnit) -> f64 {
        match unit {
            SizeUnit::Eu => self.eu,
            SizeUnit::Us => self.us,
            SizeUnit::Uk => self.uk,
            SizeUnit::Cm => self.cm,
            SizeUnit::In => self.inches,
        }
    }
}

impl ConversionEngine {
    /// Express `value` in every unit; the source column echoes `value`
    pub fn convert_all(&self, value: f64, from: SizeUnit, category: Category) -> Result<SizeRow, SizeError> {
        let to = |unit| self.convert(value, from, unit, category);
        Ok(SizeRow {
            category,
            eu: to(SizeUnit::Eu)?,
            us: to(SizeUnit::Us)?,
            uk: to(SizeUnit::Uk)?,
            cm: to(SizeUnit::Cm)?,
            inches: to(SizeUnit::In)?,
        })
    }

    /// Rows for `start..=end` in `from`, stepping by `step`
    pub fn size_chart(
        &self,
        category: Category,
        from: SizeUnit,
        start: f64,
        end: f64,
        step: f64,
    ) -> Result<Vec<SizeRow>, SizeError> {
        for v in [start, end, step] {
            if !v.is_finite() {
                return Err(SizeError::NonFinite { value: v });
            }
        }
        if step <= 0.0 {
            return Err(SizeError::InvalidRange(format!("step must be positive, got {}", step)));
        }
        if end < start {
            return Err(SizeError::InvalidRange(format!("end {} is before start {}", end, start)));
        }

        // Tolerate float drift so `end` itself is included
        let steps = ((end - start) / step + 1e-9).floor();
        if steps >= MAX_CHART_ROWS as f64 {
            return Err(SizeError::InvalidRange(format!(
                "chart would have more than {} rows", MAX_CHART_ROWS
            )));
        }
        let count = steps as usize + 1;

        debug!(%category, %from, start, end, step, count, "building size chart");

        (0..count)
            .map(|i| {
                // Multiply rather than accumulate to keep rows on the grid
                let value = crate::round_to(start + step * i as f64, crate::MAX_PRECISION);
                self.convert_all(value, from, category)
            })
            .collect()
    }
}

/// `ConversionEngine::convert_all` with default precision
pub fn convert_all(value: f64, from: SizeUnit, category: Category) -> Result<SizeRow, SizeError> {
    ConversionEngine::new().convert_all(value, from, category)
}

/// `ConversionEngine::size_chart` with default precision
pub fn size_chart(category: Category, from: SizeUnit, start: f64, end: f64, step: f64) -> Result<Vec<SizeRow>, SizeError> {
    ConversionEngine::new().size_chart(category, from, start, end, step)
}
