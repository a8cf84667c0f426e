//! Shared session pipeline used by every CLI command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! raw listings -> clean -> trim outliers -> fit -> evaluate/rank
//!
//! A session owns its dataset and model; nothing is shared between
//! sessions, so back-to-back queries cannot interfere.

use tracing::info;

use crate::domain::{CleanListing, Dataset, DatasetStats, EvalConfig, EvaluationResult, OfferQuery, RankedOffer, RawListing};
use crate::error::{EvalError, EvalResult};
use crate::fit::{FitOutput, fit};
use crate::io::{clean_with_report, filter_outliers};
use crate::report::{evaluate, rank};

/// All computed outputs of a single session.
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub stats: DatasetStats,
    pub dataset: Dataset,
    pub fit: FitOutput,
    /// Present when the session was run with an offer query.
    pub evaluation: Option<EvaluationResult>,
    pub offers: Vec<RankedOffer>,
}

/// Run one evaluation session for `query`.
pub fn run_session(raw: &[RawListing], query: &OfferQuery, config: &EvalConfig) -> EvalResult<SessionOutput> {
    validate_query(query)?;
    run(raw, Some(query), config)
}

/// Run a session without an offer: fit and rank only.
pub fn run_ranking(raw: &[RawListing], config: &EvalConfig) -> EvalResult<SessionOutput> {
    run(raw, None, config)
}

fn run(raw: &[RawListing], query: Option<&OfferQuery>, config: &EvalConfig) -> EvalResult<SessionOutput> {
    config.validate()?;

    let report = clean_with_report(raw);
    let n_clean = report.dataset.len();

    let dataset = match config.outlier_iqr_k {
        Some(k) => filter_outliers(&report.dataset, k),
        None => report.dataset,
    };

    let stats = compute_stats(raw.len(), n_clean, &dataset).ok_or(EvalError::InsufficientData {
        stage: "cleaning",
        available: 0,
        required: config.min_dataset,
    })?;

    let fit = fit(&dataset, config)?;

    let evaluation = match query {
        Some(q) => Some(evaluate(&fit.model, fit.mae, q.mileage, q.price)?),
        None => None,
    };
    let offers = rank(&fit.model, &dataset, config.top_n);

    if let Some(result) = &evaluation {
        info!(
            verdict = %result.verdict,
            predicted = result.predicted_price,
            "evaluated offer"
        );
    }

    Ok(SessionOutput {
        stats,
        dataset,
        fit,
        evaluation,
        offers,
    })
}

fn validate_query(query: &OfferQuery) -> EvalResult<()> {
    if !(query.mileage.is_finite() && query.mileage >= 0.0) {
        return Err(EvalError::InvalidInput(format!(
            "mileage must be a non-negative number, got {}",
            query.mileage
        )));
    }
    if !(query.price.is_finite() && query.price > 0.0) {
        return Err(EvalError::InvalidInput(format!(
            "asked price must be a positive number, got {}",
            query.price
        )));
    }
    Ok(())
}

fn compute_stats(n_raw: usize, n_clean: usize, dataset: &[CleanListing]) -> Option<DatasetStats> {
    if dataset.is_empty() {
        return None;
    }

    let mut stats = DatasetStats {
        n_raw,
        n_clean,
        n_used: dataset.len(),
        price_min: f64::INFINITY,
        price_max: f64::NEG_INFINITY,
        mileage_min: f64::INFINITY,
        mileage_max: f64::NEG_INFINITY,
    };
    for l in dataset {
        stats.price_min = stats.price_min.min(l.price);
        stats.price_max = stats.price_max.max(l.price);
        stats.mileage_min = stats.mileage_min.min(l.mileage);
        stats.mileage_max = stats.mileage_max.max(l.mileage);
    }
    Some(stats)
}
