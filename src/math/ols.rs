//! Least squares solver.
//!
//! The spline fit is linear in its coefficients, so each candidate knot
//! count reduces to:
//!
//! ```text
//! minimize Σ (price_i - b(mileage_i)^T c)^2
//! ```
//!
//! Implementation choices:
//! - SVD solve, which handles the tall design matrix (more listings than
//!   basis columns). Nalgebra's `QR::solve` is meant for square systems.
//! - Basis columns whose support holds no training mileage are all-zero;
//!   the SVD tolerance drops them instead of failing.

use nalgebra::{DMatrix, DVector};

/// Singular-value cutoffs relative to the largest singular value, tried in
/// order until the solve yields finite coefficients.
const RELATIVE_TOLERANCES: [f64; 3] = [1e-12, 1e-10, 1e-8];

/// Least squares coefficients for `x * c ≈ y` via SVD.
///
/// Returns `None` for an empty or mismatched system, an all-zero design
/// matrix, or when no tolerance produces finite coefficients.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() == 0 || x.ncols() == 0 || x.nrows() != y.len() {
        return None;
    }

    let svd = x.clone().svd(true, true);
    let largest = svd.singular_values.max();
    if !(largest.is_finite() && largest > 0.0) {
        return None;
    }

    RELATIVE_TOLERANCES
        .iter()
        .filter_map(|rel| svd.solve(y, rel * largest).ok())
        .find(|c| c.iter().all(|v| v.is_finite()))
}
