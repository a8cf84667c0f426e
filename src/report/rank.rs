//! Lucrative-offer ranking.

use std::cmp::Ordering;

use crate::domain::{CleanListing, RankedOffer};
use crate::models::TrainedModel;

/// Score every listing and return the `top_n` most underpriced.
///
/// `score = predicted - price`. Ordering is score descending, then price
/// ascending, then dataset order (the sort is stable).
pub fn rank(model: &TrainedModel, dataset: &[CleanListing], top_n: usize) -> Vec<RankedOffer> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut scored: Vec<RankedOffer> = dataset
        .iter()
        .map(|l| RankedOffer {
            price: l.price,
            mileage: l.mileage,
            score: model.predict(l.mileage) - l.price,
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| cmp_price(a, b)));
    scored.truncate(top_n);
    scored
}

fn cmp_price(a: &RankedOffer, b: &RankedOffer) -> Ordering {
    a.price.total_cmp(&b.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, mileage: f64) -> CleanListing {
        CleanListing { price, mileage }
    }

    fn line_model() -> TrainedModel {
        // 30000 at 0 km down to 10000 at 100000 km.
        TrainedModel::new(0.0, 100000.0, 2, 1, vec![30000.0, 10000.0]).unwrap()
    }

    #[test]
    fn rank_orders_by_score_descending() {
        let data = vec![
            listing(25000.0, 20000.0), // predicted 26000, score 1000
            listing(15000.0, 50000.0), // predicted 20000, score 5000
            listing(16000.0, 80000.0), // predicted 14000, score -2000
            listing(21000.0, 40000.0), // predicted 22000, score 1000
        ];
        let ranked = rank(&line_model(), &data, 10);
        assert_eq!(ranked.len(), 4);
        for w in ranked.windows(2) {
            assert!(w[0].score >= w[1].score);
        }
        assert_eq!(ranked[0].price, 15000.0);
        assert!((ranked[0].score - 5000.0).abs() < 1e-6);
        // Equal scores: cheaper first.
        assert_eq!(ranked[1].price, 21000.0);
        assert_eq!(ranked[2].price, 25000.0);
        assert_eq!(ranked[3].price, 16000.0);
    }

    #[test]
    fn rank_ties_keep_dataset_order() {
        // Flat curve: the score depends on price only, whatever the mileage.
        let flat = TrainedModel::new(0.0, 100000.0, 2, 1, vec![20000.0, 20000.0]).unwrap();
        let data = vec![
            listing(18000.0, 70000.0),
            listing(17000.0, 10000.0),
            listing(18000.0, 30000.0),
            listing(18000.0, 90000.0),
        ];
        let ranked = rank(&flat, &data, 4);
        let mileages: Vec<f64> = ranked.iter().map(|o| o.mileage).collect();
        assert_eq!(mileages, vec![10000.0, 70000.0, 30000.0, 90000.0]);
        assert_eq!(ranked[1].score, ranked[2].score);
    }

    #[test]
    fn rank_truncates_to_top_n() {
        let data: Vec<CleanListing> = (0..10).map(|i| listing(10000.0 + i as f64 * 100.0, 50000.0)).collect();
        assert_eq!(rank(&line_model(), &data, 3).len(), 3);
        assert_eq!(rank(&line_model(), &data[..2], 3).len(), 2);
        assert!(rank(&line_model(), &data, 0).is_empty());
        assert!(rank(&line_model(), &[], 3).is_empty());
    }

    #[test]
    fn rank_is_idempotent() {
        let data: Vec<CleanListing> = (0..25)
            .map(|i| listing(12000.0 + (i * 977 % 13000) as f64, (i * 3917 % 100000) as f64))
            .collect();
        let model = line_model();
        assert_eq!(rank(&model, &data, 5), rank(&model, &data, 5));
    }
}
