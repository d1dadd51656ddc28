//! Euclidean distance restricted to a feature subset.

use crate::common_types::FeatureSubset;
use num_traits::{AsPrimitive, Float};

/// Calculates the Euclidean distance between `a` and `b` over the coordinates
/// named in `subset` (1-based).
///
/// An empty subset gives a distance of 0 between any two vectors, so every
/// training instance is equidistant and the classifier falls back to its
/// first-seen rule.
///
/// # Panics
/// Panics if a feature in `subset` exceeds the length of `a` or `b`. The
/// leave-one-out scorer checks this once per call before scanning.
pub fn euclidean_distance<F>(a: &[F], b: &[F], subset: &FeatureSubset) -> f64
where
    F: Float + AsPrimitive<f64>,
{
    let sum_sq_diff: f64 = subset
        .offsets()
        .map(|offset| {
            let diff: f64 = (a[offset] - b[offset]).as_();
            diff * diff
        })
        .sum();
    sum_sq_diff.sqrt()
}
