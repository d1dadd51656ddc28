//! Forward selection: grow the subset one feature at a time.

use super::{Algorithm, FeatureSearch, SearchObserver, SearchResult};
use crate::common_types::FeatureSubset;
use crate::error::{Result, SelectionError};
use crate::validation::SubsetEvaluator;

impl<E: SubsetEvaluator> FeatureSearch<'_, E> {
    /// Starts from the empty subset (scored like any other subset) and runs
    /// exactly `num_features` steps. Each step tries every feature not yet
    /// selected in ascending order, so ties go to the smallest feature index.
    pub fn forward_selection(&self, observer: &mut dyn SearchObserver) -> Result<SearchResult> {
        let num_features = self.evaluator.num_features();
        if num_features == 0 {
            return Err(SelectionError::NoFeatures);
        }

        self.search(
            Algorithm::ForwardSelection,
            FeatureSubset::empty(),
            num_features,
            |current| {
                (1..=num_features)
                    .filter(|&feature| !current.contains(feature))
                    .map(|feature| (feature, current.with(feature)))
                    .collect()
            },
            observer,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::common_types::Instance;
    use crate::selection::testing::ScriptedEvaluator;
    use crate::selection::NoopObserver;
    use crate::validation::LeaveOneOut;

    #[test]
    fn test_each_step_adds_one_new_feature() {
        let evaluator = ScriptedEvaluator::new(4, 25.0).set(&[3], 50.0).set(&[3, 1], 70.0);
        let result = FeatureSearch::new(&evaluator).forward_selection(&mut NoopObserver).unwrap();

        assert_eq!(result.steps.len(), 4);
        for (i, step) in result.steps.iter().enumerate() {
            assert_eq!(step.step, i + 1);
            assert_eq!(step.subset.len(), i + 1);
            assert_eq!(step.candidates.len(), 4 - i);
        }
        let order: Vec<usize> = result.steps.iter().map(|s| s.feature).collect();
        // Ties at steps 3 and 4 go to the smallest remaining index.
        assert_eq!(order, vec![3, 1, 2, 4]);
        assert_eq!(result.steps[3].subset.as_slice(), &[3, 1, 2, 4]);
    }

    #[test]
    fn test_regression_keeps_best_overall() {
        // Every candidate at step 2 is worse than step 1.
        let evaluator = ScriptedEvaluator::new(3, 0.0)
            .set(&[], 40.0)
            .set(&[1], 60.0)
            .set(&[2], 90.0)
            .set(&[3], 30.0)
            .set(&[2, 1], 70.0)
            .set(&[2, 3], 80.0)
            .set(&[1, 2, 3], 85.0);
        let result = FeatureSearch::new(&evaluator).forward_selection(&mut NoopObserver).unwrap();

        assert_eq!(result.initial.accuracy, 40.0);
        assert_eq!(result.steps[0].feature, 2);
        assert!(result.steps[0].improved);
        assert_eq!(result.steps[1].feature, 3);
        assert_eq!(result.steps[1].accuracy, 80.0);
        assert!(!result.steps[1].improved);
        assert_eq!(result.steps[2].accuracy, 85.0);
        assert!(!result.steps[2].improved);

        assert_eq!(result.best.subset, [2].into_iter().collect::<FeatureSubset>());
        assert_eq!(result.best.accuracy, 90.0);
        assert!(result.accuracy_decreased);
        assert_eq!(result.final_accuracy(), 85.0);
    }

    #[test]
    fn test_empty_subset_can_stay_best() {
        let evaluator = ScriptedEvaluator::new(2, 10.0).set(&[], 50.0);
        let result = FeatureSearch::new(&evaluator).forward_selection(&mut NoopObserver).unwrap();
        assert!(result.best.subset.is_empty());
        assert_eq!(result.best.accuracy, 50.0);
        assert!(result.accuracy_decreased);
    }

    #[test]
    fn test_no_features_is_an_error() {
        let evaluator = ScriptedEvaluator::new(0, 0.0);
        let err = FeatureSearch::new(&evaluator).forward_selection(&mut NoopObserver);
        assert!(matches!(err, Err(SelectionError::NoFeatures)));
    }

    #[test]
    fn test_picks_the_informative_feature_on_real_data() {
        // Feature 1 alone puts every instance next to the opposite class;
        // feature 2 separates the classes.
        let dataset = vec![
            Instance::new(vec![0.0, 0.0], 1),
            Instance::new(vec![1.0, 10.0], 2),
            Instance::new(vec![2.0, 0.0], 1),
            Instance::new(vec![3.0, 10.0], 2),
        ];
        let scorer = LeaveOneOut::new(&dataset);
        let only_first: FeatureSubset = [1].into_iter().collect();
        assert_eq!(scorer.score(&only_first).unwrap(), 0.0);

        let result = FeatureSearch::new(&scorer).forward_selection(&mut NoopObserver).unwrap();
        assert_eq!(result.steps[0].feature, 2);
        assert_eq!(result.steps[0].accuracy, 100.0);
        assert_eq!(result.best.accuracy, 100.0);
        assert_eq!(result.best.subset, [2].into_iter().collect::<FeatureSubset>());
    }
}
