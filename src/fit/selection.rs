//! Fit orchestration: split, knot plan, shape guardrail, held-out MAE.
//!
//! Steps:
//! 1. Reject datasets smaller than `min_dataset`
//! 2. Seeded train/validation split
//! 3. Resolve the knot plan from distinct training mileages
//! 4. Fit; under `KnotPolicy::Auto` with the monotone guard on, walk down
//!    the knot counts until the curve is non-increasing (keep the first fit
//!    if none is)
//! 5. MAE over the validation listings

use tracing::{debug, info, warn};

use crate::domain::{CleanListing, EvalConfig, KnotPolicy, MonotoneGuard};
use crate::error::{EvalError, EvalResult};
use crate::fit::fitter::{fit_spline, is_non_increasing, mean_absolute_error};
use crate::fit::knots::{KnotPlan, candidate_knot_counts, distinct_count, resolve_knot_plan};
use crate::fit::split::split_indices;
use crate::models::TrainedModel;

/// Output of a fit: the model plus its held-out error.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutput {
    pub model: TrainedModel,
    /// Mean absolute error over the validation listings.
    pub mae: f64,
    pub n_train: usize,
    pub n_validation: usize,
    /// Whether the chosen curve passed the non-increasing check.
    pub monotone: bool,
}

/// Fit the price-vs-mileage spline to `dataset`.
pub fn fit(dataset: &[CleanListing], config: &EvalConfig) -> EvalResult<FitOutput> {
    config.validate()?;

    if dataset.len() < config.min_dataset {
        return Err(EvalError::InsufficientData {
            stage: "fit",
            available: dataset.len(),
            required: config.min_dataset,
        });
    }
    if let Some(bad) = dataset
        .iter()
        .find(|l| !(l.price.is_finite() && l.price > 0.0 && l.mileage.is_finite() && l.mileage >= 0.0))
    {
        return Err(EvalError::InvalidInput(format!(
            "dataset contains an invalid listing (price={}, mileage={})",
            bad.price, bad.mileage
        )));
    }

    let split = split_indices(dataset.len(), config.validation_split, config.seed)?;
    let train: Vec<CleanListing> = split.train.iter().map(|&i| dataset[i]).collect();
    let validation: Vec<CleanListing> = split.validation.iter().map(|&i| dataset[i]).collect();

    let train_mileages: Vec<f64> = train.iter().map(|l| l.mileage).collect();
    let plan = resolve_knot_plan(config.knots, config.degree, distinct_count(&train_mileages))?;
    debug!(n_knots = plan.n_knots, degree = plan.degree, "resolved knot plan");

    let (model, monotone) = fit_with_guard(&train, plan, config)?;

    let mae = mean_absolute_error(&model, &validation).ok_or(EvalError::InsufficientData {
        stage: "validation",
        available: 0,
        required: 1,
    })?;

    info!(
        n_train = train.len(),
        n_validation = validation.len(),
        n_knots = model.n_knots(),
        degree = model.degree(),
        mae,
        "fitted price curve"
    );

    Ok(FitOutput {
        model,
        mae,
        n_train: train.len(),
        n_validation: validation.len(),
        monotone,
    })
}

fn fit_with_guard(
    train: &[CleanListing],
    plan: KnotPlan,
    config: &EvalConfig,
) -> EvalResult<(TrainedModel, bool)> {
    let first = fit_spline(train, plan.n_knots, plan.degree)?;
    let first_monotone = is_non_increasing(&first);

    let guard_applies = config.monotone == MonotoneGuard::Prefer && config.knots == KnotPolicy::Auto;
    if first_monotone || !guard_applies {
        return Ok((first, first_monotone));
    }

    // The guard is a preference, not a reason to fail a fit: a candidate
    // that cannot be solved is skipped.
    for n_knots in candidate_knot_counts(plan).into_iter().skip(1) {
        match fit_spline(train, n_knots, plan.degree) {
            Ok(model) if is_non_increasing(&model) => {
                debug!(n_knots, "monotone guard picked fewer knots");
                return Ok((model, true));
            }
            Ok(_) => {}
            Err(e) => debug!(n_knots, error = %e, "skipping knot candidate"),
        }
    }

    warn!(
        n_knots = plan.n_knots,
        "no non-increasing price curve found; keeping the unconstrained fit"
    );
    Ok((first, false))
}
