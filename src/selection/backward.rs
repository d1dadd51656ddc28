//! Backward elimination: shrink the full set one feature at a time.

use super::{Algorithm, FeatureSearch, SearchObserver, SearchResult};
use crate::common_types::FeatureSubset;
use crate::error::{Result, SelectionError};
use crate::validation::SubsetEvaluator;

impl<E: SubsetEvaluator> FeatureSearch<'_, E> {
    /// Starts from every feature and runs `num_features - 1` steps, so one
    /// feature is always left. Candidates follow the current subset's order,
    /// and the first candidate seen wins a tie.
    pub fn backward_elimination(&self, observer: &mut dyn SearchObserver) -> Result<SearchResult> {
        let num_features = self.evaluator.num_features();
        if num_features == 0 {
            return Err(SelectionError::NoFeatures);
        }

        self.search(
            Algorithm::BackwardElimination,
            FeatureSubset::full(num_features),
            num_features - 1,
            |current| current.iter().map(|feature| (feature, current.without(feature))).collect(),
            observer,
        )
    }
}
