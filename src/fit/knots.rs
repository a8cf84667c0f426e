//! Knot count policy.
//!
//! The number of spline knots follows the number of distinct training
//! mileages: few listings get few knots (close to a polynomial), larger
//! scrapes get more curvature, capped so the curve stays smooth.
//!
//! A spline with `n_knots` knots and degree `d` has `n_knots + d - 1`
//! coefficients; we require at least `n_knots + d` distinct mileages so the
//! fit is never exactly interpolating.

use crate::domain::KnotPolicy;
use crate::error::{EvalError, EvalResult};

/// Resolved knot count and degree for one fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnotPlan {
    pub n_knots: usize,
    pub degree: usize,
}

impl KnotPlan {
    pub fn required_distinct(self) -> usize {
        self.n_knots + self.degree
    }
}

/// Count distinct values (exact equality after sorting).
pub fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    sorted.len()
}

/// Resolve the knot plan for `distinct` training mileages.
///
/// `Fixed` is exact and fails if the data cannot support it. `Auto` shrinks
/// the knot count first, then the degree (down to linear), before failing.
pub fn resolve_knot_plan(policy: KnotPolicy, degree: usize, distinct: usize) -> EvalResult<KnotPlan> {
    match policy {
        KnotPolicy::Fixed(n_knots) => {
            let plan = KnotPlan { n_knots, degree };
            if distinct < plan.required_distinct() {
                return Err(insufficient(distinct, plan.required_distinct()));
            }
            Ok(plan)
        }
        KnotPolicy::Auto => {
            let n_knots = (KnotPolicy::AUTO_MIN + distinct / KnotPolicy::AUTO_STRIDE)
                .clamp(KnotPolicy::AUTO_MIN, KnotPolicy::AUTO_MAX);
            let mut plan = KnotPlan { n_knots, degree };
            while distinct < plan.required_distinct() {
                if plan.n_knots > KnotPolicy::AUTO_MIN {
                    plan.n_knots -= 1;
                } else if plan.degree > 1 {
                    plan.degree -= 1;
                } else {
                    return Err(insufficient(distinct, plan.required_distinct()));
                }
            }
            Ok(plan)
        }
    }
}

/// Knot counts to try, most flexible first, for the monotone guard.
pub fn candidate_knot_counts(plan: KnotPlan) -> Vec<usize> {
    (KnotPolicy::AUTO_MIN..=plan.n_knots.max(KnotPolicy::AUTO_MIN)).rev().collect()
}

fn insufficient(available: usize, required: usize) -> EvalError {
    EvalError::InsufficientData {
        stage: "spline fit (distinct training mileages)",
        available,
        required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_count_ignores_duplicates() {
        assert_eq!(distinct_count(&[3.0, 1.0, 3.0, 2.0, 1.0]), 3);
        assert_eq!(distinct_count(&[]), 0);
    }

    #[test]
    fn auto_scales_with_data_and_caps() {
        assert_eq!(resolve_knot_plan(KnotPolicy::Auto, 3, 98).unwrap(), KnotPlan { n_knots: 5, degree: 3 });
        assert_eq!(resolve_knot_plan(KnotPolicy::Auto, 3, 45).unwrap(), KnotPlan { n_knots: 4, degree: 3 });
        assert_eq!(resolve_knot_plan(KnotPolicy::Auto, 3, 10).unwrap(), KnotPlan { n_knots: 2, degree: 3 });
    }

    #[test]
    fn auto_lowers_degree_on_tiny_data() {
        assert_eq!(resolve_knot_plan(KnotPolicy::Auto, 3, 4).unwrap(), KnotPlan { n_knots: 2, degree: 2 });
        assert_eq!(resolve_knot_plan(KnotPolicy::Auto, 3, 3).unwrap(), KnotPlan { n_knots: 2, degree: 1 });
        assert!(matches!(
            resolve_knot_plan(KnotPolicy::Auto, 3, 2),
            Err(EvalError::InsufficientData { available: 2, required: 3, .. })
        ));
    }

    #[test]
    fn fixed_requires_knots_plus_degree() {
        assert!(resolve_knot_plan(KnotPolicy::Fixed(5), 3, 8).is_ok());
        assert!(matches!(
            resolve_knot_plan(KnotPolicy::Fixed(5), 3, 7),
            Err(EvalError::InsufficientData { available: 7, required: 8, .. })
        ));
    }

    #[test]
    fn candidates_descend_to_two() {
        assert_eq!(candidate_knot_counts(KnotPlan { n_knots: 5, degree: 3 }), vec![5, 4, 3, 2]);
        assert_eq!(candidate_knot_counts(KnotPlan { n_knots: 2, degree: 1 }), vec![2]);
    }
}
