//! End-to-end scenarios: file on disk, loader, scorer, search, report.

use std::io::Write;

use pretty_assertions::assert_eq;

use nn_feature_selection::data::synthetic::{self, SyntheticSpec};
use nn_feature_selection::data::{self, LoadOptions, Normalization};
use nn_feature_selection::report::ConsoleReporter;
use nn_feature_selection::{
    Algorithm, FeatureSearch, FeatureSubset, Instance, LeaveOneOut, NoopObserver, SelectionError,
};

fn subset(features: &[usize]) -> FeatureSubset {
    features.iter().copied().collect()
}

#[test]
fn twins_and_outlier_score_two_thirds() {
    let dataset = vec![
        Instance::new(vec![0.0, 0.0], 1),
        Instance::new(vec![0.0, 0.0], 1),
        Instance::new(vec![10.0, 10.0], 2),
    ];
    let accuracy = LeaveOneOut::new(&dataset).score(&subset(&[1, 2])).unwrap();
    assert!((accuracy - 66.666_666_666_666_67).abs() < 1e-9);
}

#[test]
fn forward_selection_finds_the_separating_feature() {
    let dataset = vec![
        Instance::new(vec![0.0, 0.0], 1),
        Instance::new(vec![1.0, 10.0], 2),
        Instance::new(vec![2.0, 0.0], 1),
        Instance::new(vec![3.0, 10.0], 2),
    ];
    let scorer = LeaveOneOut::new(&dataset);
    assert_eq!(scorer.score(&subset(&[1])).unwrap(), 0.0);
    assert_eq!(scorer.score(&subset(&[1, 2])).unwrap(), 100.0);

    let result = FeatureSearch::new(&scorer).forward_selection(&mut NoopObserver).unwrap();
    let chosen: Vec<usize> = result.steps.iter().map(|s| s.feature).collect();
    assert_eq!(chosen, vec![2, 1]);
    assert_eq!(result.best.accuracy, 100.0);
    assert_eq!(result.best.subset, subset(&[2]));
}

#[test]
fn regression_step_still_advances() {
    // Feature 1 separates the classes; feature 2 is large noise that ruins the
    // neighbor structure once added.
    let dataset = vec![
        Instance::new(vec![0.0, 0.0], 1),
        Instance::new(vec![0.1, 50.0], 1),
        Instance::new(vec![5.0, 1.0], 2),
        Instance::new(vec![5.1, 49.0], 2),
    ];
    let scorer = LeaveOneOut::new(&dataset);
    let result = FeatureSearch::new(&scorer).forward_selection(&mut NoopObserver).unwrap();

    assert_eq!(result.steps[0].subset, subset(&[1]));
    assert_eq!(result.steps[0].accuracy, 100.0);
    assert_eq!(result.steps[1].subset, subset(&[1, 2]));
    assert!(result.steps[1].accuracy < 100.0);
    assert!(!result.steps[1].improved);
    assert_eq!(result.best.subset, subset(&[1]));
    assert_eq!(result.best.accuracy, 100.0);
    assert!(result.accuracy_decreased);
}

#[test]
fn file_to_report_pipeline() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "1.0000000e+00  1.0e+00  8.0e+00  2.0e+00").unwrap();
    writeln!(file, "2.0000000e+00  9.0e+00  7.0e+00  3.0e+00").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "1.0000000e+00  2.0e+00  1.0e+00  9.0e+00").unwrap();
    writeln!(file, "2.0000000e+00  8.0e+00  2.0e+00  1.0e+00").unwrap();
    file.flush().unwrap();

    let options = LoadOptions {
        normalization: Normalization::MinMax,
        skip_leading_features: 0,
    };
    let dataset = data::load_dataset(file.path(), &options).unwrap();
    assert_eq!(dataset.len(), 4);
    assert!(dataset.iter().flat_map(|p| &p.features).all(|v| (0.0..=1.0).contains(v)));

    let scorer = LeaveOneOut::new(&dataset);
    let mut reporter = ConsoleReporter::new(Vec::new());
    let result = FeatureSearch::new(&scorer)
        .run(Algorithm::BackwardElimination, &mut reporter)
        .unwrap();
    let text = String::from_utf8(reporter.into_inner()).unwrap();

    // Dropping feature 2 already reaches 100%; dropping feature 3 afterwards
    // keeps 100%, which is not a strict improvement.
    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.steps[0].feature, 2);
    assert_eq!(result.steps[1].subset, subset(&[1]));
    assert_eq!(result.steps[1].accuracy, 100.0);
    assert_eq!(result.best.subset, subset(&[1, 3]));
    assert_eq!(result.best.accuracy, 100.0);
    assert!(!result.accuracy_decreased);
    assert!(text.contains("Running Backward Elimination..."));
    assert!(text.contains("Using all features {1,2,3}"));
    assert!(text.contains("The best feature subset is {1,3}, which has an accuracy of 100.0%"));
}

#[test]
fn synthetic_data_recovers_informative_features() {
    let spec = SyntheticSpec::new(80, 5, 3).with_informative(vec![4]);
    let dataset = synthetic::generate(&spec);
    let scorer = LeaveOneOut::new(&dataset).with_cache(true);
    let result = FeatureSearch::new(&scorer).forward_selection(&mut NoopObserver).unwrap();

    assert_eq!(result.steps[0].feature, 4);
    assert!(result.best.subset.contains(4));
    assert_eq!(result.best.accuracy, 100.0);
}

#[test]
fn mismatched_subset_fails_fast() {
    let dataset = vec![Instance::new(vec![0.0], 1), Instance::new(vec![1.0], 2)];
    let err = LeaveOneOut::new(&dataset).score(&subset(&[1, 2])).unwrap_err();
    assert!(matches!(err, SelectionError::FeatureOutOfRange { feature: 2, available: 1 }));
}
