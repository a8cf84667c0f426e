//! Shared domain types.
//!
//! Raw scraped records are kept deliberately loose (`RawField`) so that the
//! cleaner is the single place where untrusted strings become numbers. Every
//! type downstream of the cleaner carries validated, finite values only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};

/// A single scraped field: whatever the page yielded, untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

impl From<String> for RawField {
    fn from(value: String) -> Self {
        RawField::Text(value)
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl<T: Into<RawField>> From<Option<T>> for RawField {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawField::Missing)
    }
}

/// A listing as handed over by the scraper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: RawField,
    #[serde(default)]
    pub mileage: RawField,
}

impl RawListing {
    pub fn new(title: impl Into<String>, price: impl Into<RawField>, mileage: impl Into<RawField>) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            mileage: mileage.into(),
        }
    }
}

/// A validated observation: `price > 0`, `mileage >= 0`, both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CleanListing {
    pub price: f64,
    pub mileage: f64,
}

/// Cleaned listings in scrape order.
pub type Dataset = Vec<CleanListing>;

/// Summary stats about a cleaning run.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_raw: usize,
    pub n_clean: usize,
    pub n_used: usize,
    pub price_min: f64,
    pub price_max: f64,
    pub mileage_min: f64,
    pub mileage_max: f64,
}

/// Qualitative classification of an offer against the fair band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Great,
    Fair,
    Overpriced,
}

impl Verdict {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Verdict::Great => "great offer",
            Verdict::Fair => "fair offer",
            Verdict::Overpriced => "overpriced",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of evaluating one offer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub predicted_price: f64,
    pub fair_low: f64,
    pub fair_high: f64,
    pub verdict: Verdict,
    pub mae: f64,
}

/// A listing scored against the fitted curve. Higher score = more underpriced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedOffer {
    pub price: f64,
    pub mileage: f64,
    pub score: f64,
}

/// The offer a user asks about.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferQuery {
    /// Informational only; filtering by brand happens in the scraper.
    pub brand: String,
    pub mileage: f64,
    pub price: f64,
}

/// How many spline knots (boundaries included) to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnotPolicy {
    /// Scale with the number of distinct training mileages, capped at
    /// [`KnotPolicy::AUTO_MAX`]. May lower the degree on tiny datasets.
    Auto,
    /// Exactly this many knots, at the configured degree.
    Fixed(usize),
}

impl KnotPolicy {
    pub const AUTO_MIN: usize = 2;
    pub const AUTO_MAX: usize = 5;
    /// Distinct mileages per additional auto knot.
    pub const AUTO_STRIDE: usize = 20;
}

impl fmt::Display for KnotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnotPolicy::Auto => f.write_str("auto"),
            KnotPolicy::Fixed(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for KnotPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(KnotPolicy::Auto);
        }
        s.parse::<usize>()
            .map(KnotPolicy::Fixed)
            .map_err(|_| format!("expected 'auto' or a knot count, got '{s}'"))
    }
}

/// Shape guardrail: prefer a non-increasing price curve.
///
/// Applied as a candidate filter after fitting, never as a hard constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonotoneGuard {
    Off,
    Prefer,
}

/// Every tunable of an evaluation session.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalConfig {
    /// Fraction of the dataset held out for the MAE estimate.
    pub validation_split: f64,
    /// Fewest cleaned listings a fit is attempted on.
    pub min_dataset: usize,
    pub knots: KnotPolicy,
    /// Spline degree (cubic by default).
    pub degree: usize,
    /// Number of lucrative offers to report.
    pub top_n: usize,
    /// Seed for the train/validation shuffle.
    pub seed: u64,
    /// IQR multiplier for outlier trimming; `None` disables trimming.
    pub outlier_iqr_k: Option<f64>,
    pub monotone: MonotoneGuard,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            validation_split: 0.2,
            min_dataset: 5,
            knots: KnotPolicy::Auto,
            degree: 3,
            top_n: 3,
            seed: 42,
            outlier_iqr_k: Some(1.5),
            monotone: MonotoneGuard::Prefer,
        }
    }
}

impl EvalConfig {
    pub const MAX_DEGREE: usize = 5;

    pub fn validate(&self) -> EvalResult<()> {
        if !(self.validation_split.is_finite() && self.validation_split > 0.0 && self.validation_split < 1.0) {
            return Err(EvalError::InvalidConfig(format!(
                "validation split must be in (0, 1), got {}",
                self.validation_split
            )));
        }
        if self.min_dataset < 2 {
            return Err(EvalError::InvalidConfig(format!(
                "minimum dataset size must be >= 2, got {}",
                self.min_dataset
            )));
        }
        if let KnotPolicy::Fixed(n) = self.knots {
            if n < 2 {
                return Err(EvalError::InvalidConfig(format!("knot count must be >= 2, got {n}")));
            }
        }
        if !(1..=Self::MAX_DEGREE).contains(&self.degree) {
            return Err(EvalError::InvalidConfig(format!(
                "spline degree must be in 1..={}, got {}",
                Self::MAX_DEGREE,
                self.degree
            )));
        }
        if let Some(k) = self.outlier_iqr_k {
            if !(k.is_finite() && k > 0.0) {
                return Err(EvalError::InvalidConfig(format!("outlier IQR factor must be > 0, got {k}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_listing_deserializes_mixed_fields() {
        let json = r#"[
            {"title": "BMW 320d", "price": "CHF 25'900.–", "mileage": 119333},
            {"title": "BMW 318i", "price": null},
            {"price": 18500.0, "mileage": "Neues Fahrzeug"}
        ]"#;
        let rows: Vec<RawListing> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].price, RawField::Text("CHF 25'900.–".to_string()));
        assert_eq!(rows[0].mileage, RawField::Number(119333.0));
        assert_eq!(rows[1].price, RawField::Missing);
        assert_eq!(rows[1].mileage, RawField::Missing);
        assert_eq!(rows[2].title, "");
        assert_eq!(rows[2].price, RawField::Number(18500.0));
    }

    #[test]
    fn knot_policy_parses_auto_and_counts() {
        assert_eq!("auto".parse::<KnotPolicy>().unwrap(), KnotPolicy::Auto);
        assert_eq!(" 4 ".parse::<KnotPolicy>().unwrap(), KnotPolicy::Fixed(4));
        assert!("many".parse::<KnotPolicy>().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        let config = EvalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_n, 3);
        assert_eq!(config.min_dataset, 5);
        assert!((config.validation_split - 0.2).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_bad_tunables() {
        let bad_split = EvalConfig {
            validation_split: 1.0,
            ..EvalConfig::default()
        };
        assert!(matches!(bad_split.validate(), Err(EvalError::InvalidConfig(_))));

        let bad_knots = EvalConfig {
            knots: KnotPolicy::Fixed(1),
            ..EvalConfig::default()
        };
        assert!(matches!(bad_knots.validate(), Err(EvalError::InvalidConfig(_))));

        let bad_degree = EvalConfig {
            degree: 0,
            ..EvalConfig::default()
        };
        assert!(matches!(bad_degree.validate(), Err(EvalError::InvalidConfig(_))));
    }
}
