//! Scraped-record ingest and normalization.
//!
//! This module turns loosely typed scraper output into a clean set of
//! `(price, mileage)` pairs that are safe to fit.
//!
//! Design goals:
//! - **Never fail**: a bad record is dropped, not reported as an error
//! - **Row-level reasons**: every drop is recorded (and logged at debug level)
//! - **Deterministic behavior**: output order follows input order
//! - **Separation of concerns**: no fitting logic here

use tracing::{debug, info};

use crate::domain::{CleanListing, Dataset, RawField, RawListing};

/// Mileage strings the site uses for cars that were never registered.
const NEW_VEHICLE_MARKERS: [&str; 4] = ["neues fahrzeug", "neuwagen", "new", "neu"];

/// Why a raw record was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    MissingPrice,
    MissingMileage,
    UnparsablePrice(String),
    UnparsableMileage(String),
    NonPositivePrice(f64),
    NegativeMileage(f64),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::MissingPrice => write!(f, "missing price"),
            RejectReason::MissingMileage => write!(f, "missing mileage"),
            RejectReason::UnparsablePrice(s) => write!(f, "unparsable price '{s}'"),
            RejectReason::UnparsableMileage(s) => write!(f, "unparsable mileage '{s}'"),
            RejectReason::NonPositivePrice(v) => write!(f, "non-positive price {v}"),
            RejectReason::NegativeMileage(v) => write!(f, "negative mileage {v}"),
        }
    }
}

/// A dropped record: its position in the input and the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct RowReject {
    pub index: usize,
    pub title: String,
    pub reason: RejectReason,
}

/// Cleaning output: the dataset plus every rejected row.
#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    pub dataset: Dataset,
    pub rejected: Vec<RowReject>,
    pub rows_read: usize,
}

/// Normalize raw records into a dataset, silently dropping unusable ones.
pub fn clean(raw: &[RawListing]) -> Dataset {
    clean_with_report(raw).dataset
}

/// Like [`clean`], but keeps the per-row rejection reasons.
pub fn clean_with_report(raw: &[RawListing]) -> CleanReport {
    let mut dataset = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();

    for (index, listing) in raw.iter().enumerate() {
        match normalize_listing(listing) {
            Ok(clean) => dataset.push(clean),
            Err(reason) => {
                debug!(index, title = %listing.title, %reason, "dropping listing");
                rejected.push(RowReject {
                    index,
                    title: listing.title.clone(),
                    reason,
                });
            }
        }
    }

    info!(
        rows_read = raw.len(),
        rows_used = dataset.len(),
        rows_dropped = rejected.len(),
        "cleaned scraped listings"
    );

    CleanReport {
        dataset,
        rejected,
        rows_read: raw.len(),
    }
}

fn normalize_listing(listing: &RawListing) -> Result<CleanListing, RejectReason> {
    let price = match &listing.price {
        RawField::Missing => return Err(RejectReason::MissingPrice),
        RawField::Number(v) => Some(*v),
        RawField::Text(s) => parse_number(s),
    }
    .filter(|v| v.is_finite())
    .ok_or_else(|| RejectReason::UnparsablePrice(field_text(&listing.price)))?;

    if price <= 0.0 {
        return Err(RejectReason::NonPositivePrice(price));
    }

    let mileage = match &listing.mileage {
        RawField::Missing => return Err(RejectReason::MissingMileage),
        RawField::Number(v) => Some(*v),
        RawField::Text(s) if is_new_vehicle(s) => Some(0.0),
        RawField::Text(s) => parse_number(s),
    }
    .filter(|v| v.is_finite())
    .ok_or_else(|| RejectReason::UnparsableMileage(field_text(&listing.mileage)))?;

    if mileage < 0.0 {
        return Err(RejectReason::NegativeMileage(mileage));
    }

    Ok(CleanListing { price, mileage })
}

/// Parse a scraped numeric string such as `"CHF 25'900.–"` or `"119'333 km"`.
///
/// Everything except ASCII digits, `.` and `-` is stripped. Trailing `.` and
/// `-` are price suffix decoration (`".–"`, `".-"`) and are dropped. Dots are
/// grouping separators when there is more than one (`"1.234.567"`) or when a
/// single dot is followed by exactly three digits (`"25.900"`); otherwise a
/// single dot is the decimal point (`"18450.50"`).
pub fn parse_number(s: &str) -> Option<f64> {
    let kept: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let mut kept = kept.trim_end_matches(['.', '-']).to_string();

    let grouped = match kept.matches('.').count() {
        0 => false,
        1 => kept
            .split_once('.')
            .is_some_and(|(_, frac)| frac.len() == 3 && frac.chars().all(|c| c.is_ascii_digit())),
        _ => true,
    };
    if grouped {
        kept.retain(|c| c != '.');
    }

    if !kept.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    kept.parse::<f64>().ok()
}

fn is_new_vehicle(s: &str) -> bool {
    let s = s.trim().to_lowercase();
    NEW_VEHICLE_MARKERS.iter().any(|m| *m == s)
}

fn field_text(field: &RawField) -> String {
    match field {
        RawField::Number(v) => v.to_string(),
        RawField::Text(s) => s.clone(),
        RawField::Missing => String::new(),
    }
}
