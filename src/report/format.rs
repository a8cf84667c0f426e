//! Formatted terminal output for a session.
//!
//! We keep formatting code in one place so:
//! - the fitting/evaluation code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::SessionOutput;
use crate::domain::{DatasetStats, EvaluationResult, OfferQuery, RankedOffer};
use crate::fit::FitOutput;

/// Format the dataset and fit diagnostics.
pub fn format_run_summary(stats: &DatasetStats, fit: &FitOutput) -> String {
    let mut out = String::new();

    out.push_str("=== carval - used-car offer evaluator ===\n");
    out.push_str(&format!(
        "Listings: read={} | clean={} | used={}\n",
        stats.n_raw, stats.n_clean, stats.n_used
    ));
    out.push_str(&format!(
        "Price: [{}, {}] CHF | Mileage: [{}, {}] km\n",
        fmt_chf(stats.price_min),
        fmt_chf(stats.price_max),
        fmt_km(stats.mileage_min),
        fmt_km(stats.mileage_max),
    ));

    let (lo, hi) = fit.model.mileage_range();
    out.push_str("\nModel:\n");
    out.push_str(&format!(
        "- spline: {} knots, degree {} over [{}, {}] km{}\n",
        fit.model.n_knots(),
        fit.model.degree(),
        fmt_km(lo),
        fmt_km(hi),
        if fit.monotone { "" } else { " (not monotone)" },
    ));
    out.push_str(&format!(
        "- split: train={} validation={}\n",
        fit.n_train, fit.n_validation
    ));
    out.push_str(&format!("- MAE (held-out): CHF {}\n", fmt_chf(fit.mae)));

    out
}

/// Format the verdict for one offer.
pub fn format_evaluation(query: &OfferQuery, result: &EvaluationResult) -> String {
    let mut out = String::new();

    let brand = if query.brand.is_empty() { "offer" } else { query.brand.as_str() };
    out.push_str(&format!(
        "\n{brand}: CHF {} at {} km -> {}\n",
        fmt_chf(query.price),
        fmt_km(query.mileage),
        result.verdict.display_name(),
    ));
    out.push_str(&format!("Predicted price: CHF {}\n", fmt_chf(result.predicted_price)));
    out.push_str(&format!(
        "Fair price range: CHF {} - CHF {}\n",
        fmt_chf(result.fair_low),
        fmt_chf(result.fair_high)
    ));

    out
}

/// Format the lucrative-offer table.
pub fn format_offers(offers: &[RankedOffer]) -> String {
    let mut out = String::new();

    if offers.is_empty() {
        out.push_str("\nNo lucrative offers found.\n");
        return out;
    }

    out.push_str(&format!("\nTop {} lucrative offers:\n", offers.len()));
    out.push_str(format!("{:>3} {:>12} {:>12} {:>12}\n", "#", "price", "mileage", "below_fit").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<3} {:-<12} {:-<12} {:-<12}\n", "", "", "", "").trim_end());
    out.push('\n');

    for (i, o) in offers.iter().enumerate() {
        out.push_str(
            format!(
                "{:>3} {:>12} {:>12} {:>12}\n",
                i + 1,
                fmt_chf(o.price),
                fmt_km(o.mileage),
                fmt_chf(o.score)
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format everything a session produced.
pub fn format_session(session: &SessionOutput, query: Option<&OfferQuery>) -> String {
    let mut out = format_run_summary(&session.stats, &session.fit);
    if let (Some(query), Some(result)) = (query, session.evaluation.as_ref()) {
        out.push_str(&format_evaluation(query, result));
    }
    out.push_str(&format_offers(&session.offers));
    out
}

fn fmt_chf(v: f64) -> String {
    format!("{v:.2}")
}

fn fmt_km(v: f64) -> String {
    format!("{v:.0}")
}
