//! B-spline basis functions.
//!
//! We use an *extended uniform* knot vector: `n_knots` equally spaced knots
//! over `[lo, hi]`, plus `degree` further knots on each side at the same
//! spacing. This yields `n_knots + degree - 1` basis functions that form a
//! partition of unity on `[lo, hi]`, including the right endpoint, without
//! the repeated-knot special cases of a clamped vector.
//!
//! Numerical notes:
//! - Evaluation is Cox–de Boor bottom-up, `O(len · degree)` per point.
//! - Zero-width spans are skipped (0/0 is taken as 0).

/// Build the extended uniform knot vector over `[lo, hi]`.
///
/// Returns `None` unless `lo < hi` (both finite) and `n_knots >= 2`.
pub fn extended_knots(lo: f64, hi: f64, n_knots: usize, degree: usize) -> Option<Vec<f64>> {
    if !(lo.is_finite() && hi.is_finite() && hi > lo) || n_knots < 2 {
        return None;
    }
    let step = (hi - lo) / (n_knots as f64 - 1.0);
    let d = degree as f64;
    let len = n_knots + 2 * degree;
    Some((0..len).map(|i| lo + (i as f64 - d) * step).collect())
}

/// Number of basis functions for a knot vector of `knots_len` and `degree`.
pub fn basis_len(knots_len: usize, degree: usize) -> usize {
    knots_len.saturating_sub(degree + 1)
}

/// Evaluate all B-spline basis functions at `x` into `out`.
///
/// # Panics
/// Panics if `out.len() != basis_len(knots.len(), degree)`.
pub fn bspline_basis(knots: &[f64], degree: usize, x: f64, out: &mut [f64]) {
    let n_basis = basis_len(knots.len(), degree);
    assert_eq!(out.len(), n_basis, "basis output length mismatch");

    // Degree-0 indicators over every knot span.
    let spans = knots.len() - 1;
    let mut n: Vec<f64> = (0..spans)
        .map(|i| if knots[i] <= x && x < knots[i + 1] { 1.0 } else { 0.0 })
        .collect();

    for p in 1..=degree {
        for i in 0..(spans - p) {
            let left_den = knots[i + p] - knots[i];
            let right_den = knots[i + p + 1] - knots[i + 1];
            let left = if left_den > 0.0 { (x - knots[i]) / left_den * n[i] } else { 0.0 };
            let right = if right_den > 0.0 {
                (knots[i + p + 1] - x) / right_den * n[i + 1]
            } else {
                0.0
            };
            n[i] = left + right;
        }
    }

    out.copy_from_slice(&n[..n_basis]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_knots_spacing_and_length() {
        let knots = extended_knots(0.0, 100.0, 5, 3).unwrap();
        assert_eq!(knots.len(), 11);
        assert!((knots[0] + 75.0).abs() < 1e-12);
        assert!((knots[3] - 0.0).abs() < 1e-12);
        assert!((knots[7] - 100.0).abs() < 1e-12);
        assert!((knots[10] - 175.0).abs() < 1e-12);
        assert!(extended_knots(5.0, 5.0, 5, 3).is_none());
        assert!(extended_knots(0.0, 1.0, 1, 3).is_none());
    }

    #[test]
    fn basis_is_partition_of_unity_inside_range() {
        for &degree in &[1usize, 2, 3] {
            let knots = extended_knots(0.0, 150000.0, 5, degree).unwrap();
            let mut out = vec![0.0; basis_len(knots.len(), degree)];
            assert_eq!(out.len(), 5 + degree - 1);
            for &x in &[0.0, 1.0, 37500.0, 80000.0, 149999.0, 150000.0] {
                bspline_basis(&knots, degree, x, &mut out);
                let sum: f64 = out.iter().sum();
                assert!((sum - 1.0).abs() < 1e-9, "degree {degree}, x={x}: sum={sum}");
                assert!(out.iter().all(|v| *v >= -1e-12));
            }
        }
    }

    #[test]
    fn linear_basis_is_hat_function() {
        let knots = extended_knots(0.0, 2.0, 3, 1).unwrap();
        let mut out = vec![0.0; 3];
        bspline_basis(&knots, 1, 0.5, &mut out);
        assert!((out[0] - 0.5).abs() < 1e-12);
        assert!((out[1] - 0.5).abs() < 1e-12);
        assert!(out[2].abs() < 1e-12);
    }
}
