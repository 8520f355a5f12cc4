//! Scalar field storage shared by all solvers
//!
//! Every solver owns its fields as flat `Vec<f64>` buffers in row-major order.
//! Temperatures go through `T⁴` in the radiative balance, so fields are kept
//! in double precision.

use serde::{Deserialize, Serialize};

use crate::grid::{NX, NY};

/// Max/min/mean of a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Largest cell value
    pub max: f64,
    /// Smallest cell value
    pub min: f64,
    /// Arithmetic mean over all cells
    pub avg: f64,
}

/// Dense 2D scalar field
///
/// Stores values as a flat `Vec<f64>` in row-major order (`j * width + i`).
/// Used for temperature, carrier density and each velocity component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    /// Field values in row-major order
    pub data: Vec<f64>,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl ScalarField {
    /// Create a field with given dimensions, initialized to zero
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, 0.0)
    }

    /// Create a field with given dimensions, every cell set to `value`
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f64) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Create a field on the simulation grid (`NX × NY`) filled with `value`
    #[must_use]
    pub fn on_grid(value: f64) -> Self {
        Self::with_value(NX, NY, value)
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.width && j < self.height, "Coordinates out of bounds");
        self.data[j * self.width + i]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(i < self.width && j < self.height, "Coordinates out of bounds");
        self.data[j * self.width + i] = value;
    }

    /// Max, min and arithmetic mean of the field
    ///
    /// An empty field summarises to zeros. A NaN cell makes every entry NaN,
    /// so a diverged field never reports a plausible range.
    #[must_use]
    pub fn summary(&self) -> FieldSummary {
        if self.data.is_empty() {
            return FieldSummary {
                max: 0.0,
                min: 0.0,
                avg: 0.0,
            };
        }

        let (max, min, sum) = self.data.iter().fold(
            (f64::NEG_INFINITY, f64::INFINITY, 0.0),
            |(max, min, sum), &v| (nan_max(max, v), nan_min(min, v), sum + v),
        );

        FieldSummary {
            max,
            min,
            avg: sum / self.data.len() as f64,
        }
    }

    /// Population standard deviation of the field
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let n = self.data.len() as f64;
        let mean = self.data.iter().sum::<f64>() / n;
        let var = self.data.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        var.sqrt()
    }
}

/// `f64::max` that returns NaN when either side is NaN
pub(crate) fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// `f64::min` that returns NaN when either side is NaN
pub(crate) fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}
