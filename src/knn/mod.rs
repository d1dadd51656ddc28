//! One-nearest-neighbor classification over a feature subset.

pub mod distance;

use crate::common_types::{DataPoint, FeatureSubset};
use num_traits::{AsPrimitive, Float};

pub use distance::euclidean_distance;

/// Returns the label of the training instance closest to `query` under the
/// Euclidean distance restricted to `subset`.
///
/// The scan keeps a candidate only when its distance is strictly smaller than
/// the best so far, so the first instance wins ties. `training` is any iterator
/// of instance references; the leave-one-out scorer uses that to skip the held
/// out position without copying the dataset.
///
/// Returns `None` when `training` is empty.
pub fn nearest_label<'a, F, L, I>(training: I, query: &DataPoint<F, L>, subset: &FeatureSubset) -> Option<L>
where
    F: Float + AsPrimitive<f64> + 'a,
    L: Clone + 'a,
    I: IntoIterator<Item = &'a DataPoint<F, L>>,
{
    let mut nearest: Option<(f64, &'a DataPoint<F, L>)> = None;

    for candidate in training {
        let distance = euclidean_distance(&query.features, &candidate.features, subset);
        match nearest {
            Some((best, _)) if distance >= best => {}
            _ => nearest = Some((distance, candidate)),
        }
    }

    nearest.map(|(_, point)| point.label.clone())
}
