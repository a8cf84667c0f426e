//! Offer evaluation against the fitted curve.
//!
//! The fair band is `predicted ± mae`: the held-out MAE is reused directly
//! as the tolerance rather than a fitted prediction interval.

use crate::domain::{EvaluationResult, Verdict};
use crate::error::{EvalError, EvalResult};
use crate::models::TrainedModel;

/// Fair-price interval around a prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FairBand {
    pub low: f64,
    pub high: f64,
}

impl FairBand {
    pub fn around(predicted: f64, mae: f64) -> Self {
        Self {
            low: predicted - mae,
            high: predicted + mae,
        }
    }

    /// Classify an asked price. Both band edges count as fair.
    pub fn verdict(&self, asked: f64) -> Verdict {
        if asked < self.low {
            Verdict::Great
        } else if asked > self.high {
            Verdict::Overpriced
        } else {
            Verdict::Fair
        }
    }
}

/// Evaluate an offer at `mileage` asking `asked_price`.
pub fn evaluate(model: &TrainedModel, mae: f64, mileage: f64, asked_price: f64) -> EvalResult<EvaluationResult> {
    ensure_non_negative("mileage", mileage)?;
    ensure_non_negative("asked price", asked_price)?;
    ensure_non_negative("mae", mae)?;

    let predicted_price = model.predict(mileage);
    if !predicted_price.is_finite() {
        return Err(EvalError::Numerical(format!("non-finite prediction at mileage {mileage}")));
    }

    let band = FairBand::around(predicted_price, mae);
    Ok(EvaluationResult {
        predicted_price,
        fair_low: band.low,
        fair_high: band.high,
        verdict: band.verdict(asked_price),
        mae,
    })
}

fn ensure_non_negative(name: &str, value: f64) -> EvalResult<()> {
    if !value.is_finite() {
        return Err(EvalError::InvalidInput(format!("{name} must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(EvalError::InvalidInput(format!("{name} must not be negative, got {value}")));
    }
    Ok(())
}
