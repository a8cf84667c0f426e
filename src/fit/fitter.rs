//! Low-level fitting routines for a single knot plan.
//!
//! Given:
//! - training listings `(mileage_i, price_i)`
//! - a knot count and degree
//!
//! we place the knots over the training mileage range, build the B-spline
//! design matrix, and solve an ordinary least squares problem for the
//! spline coefficients.

use nalgebra::{DMatrix, DVector};

use crate::domain::CleanListing;
use crate::error::{EvalError, EvalResult};
use crate::math::{basis_len, extended_knots, solve_least_squares};
use crate::models::{TrainedModel, fill_design_row};

/// Number of points used to check the shape of a fitted curve.
const SHAPE_SAMPLES: usize = 64;

/// Fit a spline with `n_knots` knots of `degree` to the training listings.
pub fn fit_spline(train: &[CleanListing], n_knots: usize, degree: usize) -> EvalResult<TrainedModel> {
    if train.is_empty() {
        return Err(EvalError::InsufficientData {
            stage: "spline fit",
            available: 0,
            required: n_knots + degree,
        });
    }

    let (lo, hi) = mileage_range(train);
    let knots = extended_knots(lo, hi, n_knots, degree).ok_or_else(|| EvalError::InsufficientData {
        stage: "spline fit (mileage range)",
        available: 1,
        required: 2,
    })?;
    let p = basis_len(knots.len(), degree);
    let n = train.len();

    let mut x = DMatrix::<f64>::zeros(n, p);
    let mut y = DVector::<f64>::zeros(n);
    let mut row = vec![0.0; p];

    for (i, listing) in train.iter().enumerate() {
        fill_design_row(&knots, degree, listing.mileage, &mut row);
        for (j, v) in row.iter().enumerate() {
            x[(i, j)] = *v;
        }
        y[i] = listing.price;
    }

    let coefficients = solve_least_squares(&x, &y).ok_or_else(|| {
        EvalError::Numerical(format!(
            "least squares failed for {n_knots} knots at degree {degree}"
        ))
    })?;

    TrainedModel::new(lo, hi, n_knots, degree, coefficients.iter().copied().collect())
        .ok_or_else(|| EvalError::Numerical("fitted coefficients do not match the spline basis".to_string()))
}

/// Mean absolute error of `model` over `data`.
///
/// Returns `None` for an empty slice.
pub fn mean_absolute_error(model: &TrainedModel, data: &[CleanListing]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let total: f64 = data.iter().map(|l| (model.predict(l.mileage) - l.price).abs()).sum();
    Some(total / data.len() as f64)
}

/// True if the curve never rises by more than a small tolerance across its
/// training range.
pub fn is_non_increasing(model: &TrainedModel) -> bool {
    let (lo, hi) = model.mileage_range();
    let mut prev = model.predict(lo);
    if !prev.is_finite() {
        return false;
    }

    // Tolerance: allow numerical noise relative to the price level.
    let eps = 1e-9 * prev.abs().max(1.0);

    for i in 1..SHAPE_SAMPLES {
        let u = i as f64 / (SHAPE_SAMPLES as f64 - 1.0);
        let yi = model.predict(lo + u * (hi - lo));
        if !yi.is_finite() || yi - prev > eps {
            return false;
        }
        prev = yi;
    }

    true
}

fn mileage_range(data: &[CleanListing]) -> (f64, f64) {
    data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), l| {
        (lo.min(l.mileage), hi.max(l.mileage))
    })
}
