//! Leave-one-out accuracy of the one-nearest-neighbor classifier.

use std::collections::HashMap;

use num_traits::{AsPrimitive, Float};
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::common_types::{DataPoint, FeatureSubset};
use crate::error::{Result, SelectionError};
use crate::knn::nearest_label;

/// Anything that can score a feature subset with an accuracy in `[0, 100]`.
///
/// The search drivers only depend on this trait.
pub trait SubsetEvaluator: Sync {
    /// Number of features a subset may draw from (`1..=num_features`).
    fn num_features(&self) -> usize;

    fn evaluate(&self, subset: &FeatureSubset) -> Result<f64>;
}

/// Scores subsets by leave-one-out validation over a borrowed dataset.
///
/// Each instance is held out in turn and classified against every other
/// instance by position, so duplicates of the held-out instance still count as
/// training data while the instance itself never does.
pub struct LeaveOneOut<'a, F, L> {
    dataset: &'a [DataPoint<F, L>],
    num_features: usize,
    parallel: bool,
    cache: Option<Mutex<HashMap<Vec<usize>, f64>>>,
}

impl<'a, F, L> LeaveOneOut<'a, F, L>
where
    F: Float + AsPrimitive<f64> + Send + Sync,
    L: Clone + PartialEq + Send + Sync,
{
    /// Creates a scorer. The feature count is the shortest instance's length,
    /// so any subset that passes validation is in range for every instance.
    pub fn new(dataset: &'a [DataPoint<F, L>]) -> Self {
        let num_features = dataset.iter().map(DataPoint::num_features).min().unwrap_or(0);
        Self {
            dataset,
            num_features,
            parallel: false,
            cache: None,
        }
    }

    /// Classify held-out instances on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Memoize accuracies by subset content. This never changes a result.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache.then(|| Mutex::new(HashMap::new()));
        self
    }

    /// Number of cached subsets, if caching is enabled.
    pub fn cached_len(&self) -> Option<usize> {
        self.cache.as_ref().map(|cache| cache.lock().len())
    }

    /// Leave-one-out accuracy of `subset` as a percentage.
    ///
    /// A dataset of one instance scores 0: its only classification has an
    /// empty training set and no prediction. An empty dataset also scores 0.
    pub fn score(&self, subset: &FeatureSubset) -> Result<f64> {
        self.check_subset(subset)?;

        if self.dataset.is_empty() {
            tracing::warn!("Leave-one-out on an empty dataset; reporting 0% accuracy");
            return Ok(0.0);
        }

        let key = subset.sorted();
        if let Some(cache) = &self.cache {
            if let Some(&accuracy) = cache.lock().get(&key) {
                return Ok(accuracy);
            }
        }

        let correct = if self.parallel {
            (0..self.dataset.len())
                .into_par_iter()
                .filter(|&i| self.is_correct(i, subset))
                .count()
        } else {
            (0..self.dataset.len()).filter(|&i| self.is_correct(i, subset)).count()
        };

        let accuracy = 100.0 * correct as f64 / self.dataset.len() as f64;
        tracing::trace!(%subset, correct, total = self.dataset.len(), accuracy, "Scored subset");

        if let Some(cache) = &self.cache {
            cache.lock().insert(key, accuracy);
        }
        Ok(accuracy)
    }

    /// Whether the instance at `held_out` is classified correctly by the rest.
    fn is_correct(&self, held_out: usize, subset: &FeatureSubset) -> bool {
        let query = &self.dataset[held_out];
        let training = self
            .dataset
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != held_out)
            .map(|(_, point)| point);

        nearest_label(training, query, subset).is_some_and(|label| label == query.label)
    }

    fn check_subset(&self, subset: &FeatureSubset) -> Result<()> {
        if subset.contains(0) {
            return Err(SelectionError::ZeroFeatureIndex);
        }
        match subset.max_feature() {
            Some(feature) if feature > self.num_features && !self.dataset.is_empty() => {
                Err(SelectionError::FeatureOutOfRange {
                    feature,
                    available: self.num_features,
                })
            }
            _ => Ok(()),
        }
    }
}

impl<F, L> SubsetEvaluator for LeaveOneOut<'_, F, L>
where
    F: Float + AsPrimitive<f64> + Send + Sync,
    L: Clone + PartialEq + Send + Sync,
{
    fn num_features(&self) -> usize {
        self.num_features
    }

    fn evaluate(&self, subset: &FeatureSubset) -> Result<f64> {
        self.score(subset)
    }
}
