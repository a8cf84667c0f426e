//! Interquartile-range trimming of a cleaned dataset.
//!
//! Scraped classifieds contain the occasional leasing teaser price or a
//! mistyped mileage. Listings outside `[Q1 - k·IQR, Q3 + k·IQR]` on either
//! axis are removed before fitting.
//!
//! Mileage quartiles are computed over `mileage > 0` only; zero-mileage
//! (new) cars always pass the mileage bound.

use tracing::info;

use crate::domain::{CleanListing, Dataset};

/// Below this size quartiles are too unstable to trim anything.
const MIN_FILTER_LEN: usize = 4;

/// Remove price and mileage outliers. Order is preserved.
pub fn filter_outliers(dataset: &[CleanListing], k: f64) -> Dataset {
    if dataset.len() < MIN_FILTER_LEN {
        return dataset.to_vec();
    }

    let mut prices: Vec<f64> = dataset.iter().map(|l| l.price).collect();
    let mut mileages: Vec<f64> = dataset.iter().map(|l| l.mileage).filter(|m| *m > 0.0).collect();

    let Some((p_lo, p_hi)) = iqr_bounds(&mut prices, k) else {
        return dataset.to_vec();
    };
    let mileage_bounds = iqr_bounds(&mut mileages, k);

    let kept: Dataset = dataset
        .iter()
        .filter(|l| l.price >= p_lo && l.price <= p_hi)
        .filter(|l| match mileage_bounds {
            Some((m_lo, m_hi)) => l.mileage == 0.0 || (l.mileage >= m_lo && l.mileage <= m_hi),
            None => true,
        })
        .copied()
        .collect();

    info!(
        before = dataset.len(),
        after = kept.len(),
        price_lo = p_lo,
        price_hi = p_hi,
        "trimmed outliers"
    );
    kept
}

fn iqr_bounds(values: &mut [f64], k: f64) -> Option<(f64, f64)> {
    values.sort_by(|a, b| a.total_cmp(b));
    let q1 = percentile_sorted(values, 25.0)?;
    let q3 = percentile_sorted(values, 75.0)?;
    let iqr = q3 - q1;
    Some((q1 - k * iqr, q3 + k * iqr))
}

/// Percentile with linear interpolation between order statistics.
///
/// `sorted` must be ascending. Returns `None` when empty.
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pct = pct.clamp(0.0, 100.0);
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, mileage: f64) -> CleanListing {
        CleanListing { price, mileage }
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile_sorted(&v, 0.0), Some(1.0));
        assert_eq!(percentile_sorted(&v, 100.0), Some(4.0));
        assert!((percentile_sorted(&v, 25.0).unwrap() - 1.75).abs() < 1e-12);
        assert!((percentile_sorted(&v, 50.0).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(percentile_sorted(&[], 50.0), None);
    }

    #[test]
    fn filter_removes_price_outlier() {
        let mut data: Vec<CleanListing> = (0..10)
            .map(|i| listing(20000.0 + 500.0 * i as f64, 50000.0 + 5000.0 * i as f64))
            .collect();
        data.push(listing(999.0, 60000.0));
        let kept = filter_outliers(&data, 1.5);
        assert_eq!(kept.len(), 10);
        assert!(kept.iter().all(|l| l.price >= 20000.0));
    }

    #[test]
    fn filter_keeps_new_cars_and_drops_mileage_outlier() {
        let mut data: Vec<CleanListing> = (0..10)
            .map(|i| listing(20000.0 + 100.0 * i as f64, 50000.0 + 1000.0 * i as f64))
            .collect();
        data.push(listing(20500.0, 0.0));
        data.push(listing(20500.0, 900000.0));
        let kept = filter_outliers(&data, 1.5);
        assert_eq!(kept.len(), 11);
        assert!(kept.iter().any(|l| l.mileage == 0.0));
        assert!(kept.iter().all(|l| l.mileage < 900000.0));
    }

    #[test]
    fn filter_leaves_tiny_datasets_alone() {
        let data = vec![listing(1.0, 1.0), listing(1000000.0, 2.0)];
        assert_eq!(filter_outliers(&data, 1.5), data);
    }
}
