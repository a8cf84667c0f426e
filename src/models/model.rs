//! The fitted price-vs-mileage spline.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given mileage (for least squares)
//! - predict the price at a mileage given the coefficients (for MAE/ranking)
//!
//! Both clamp the mileage into the training range first, so predictions
//! outside the observed mileages extrapolate flat from the nearest boundary.

use serde::{Deserialize, Serialize};

use crate::math::{basis_len, bspline_basis, extended_knots};

/// Immutable spline model: knots, degree, coefficients, and training range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    knots: Vec<f64>,
    degree: usize,
    coefficients: Vec<f64>,
    mileage_min: f64,
    mileage_max: f64,
}

impl TrainedModel {
    /// Assemble a model from fitted coefficients.
    ///
    /// Returns `None` if the range is degenerate or the coefficient count
    /// does not match the basis size.
    pub fn new(
        mileage_min: f64,
        mileage_max: f64,
        n_knots: usize,
        degree: usize,
        coefficients: Vec<f64>,
    ) -> Option<Self> {
        let knots = extended_knots(mileage_min, mileage_max, n_knots, degree)?;
        if coefficients.len() != basis_len(knots.len(), degree) {
            return None;
        }
        Some(Self {
            knots,
            degree,
            coefficients,
            mileage_min,
            mileage_max,
        })
    }

    /// Predicted price at `mileage`, clamped to the training range.
    pub fn predict(&self, mileage: f64) -> f64 {
        let mut row = vec![0.0; self.coefficients.len()];
        fill_design_row(&self.knots, self.degree, self.clamp(mileage), &mut row);
        row.iter().zip(&self.coefficients).map(|(b, c)| b * c).sum()
    }

    pub fn clamp(&self, mileage: f64) -> f64 {
        mileage.clamp(self.mileage_min, self.mileage_max)
    }

    pub fn mileage_range(&self) -> (f64, f64) {
        (self.mileage_min, self.mileage_max)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Knot count over the training range (boundaries included).
    pub fn n_knots(&self) -> usize {
        self.knots.len() - 2 * self.degree
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

/// Fill a design row for a (pre-clamped) mileage.
///
/// # Panics
/// Panics if `out` does not match the basis size of `knots` and `degree`.
pub fn fill_design_row(knots: &[f64], degree: usize, mileage: f64, out: &mut [f64]) {
    bspline_basis(knots, degree, mileage, out);
}
