//! Greedy stepwise feature search.
//!
//! Both drivers share one loop: at every step they score each candidate subset
//! through a [`SubsetEvaluator`], move to the candidate with the strictly
//! greatest accuracy (earliest candidate on ties), and keep a separate record of
//! the best subset seen over the whole run. The current subset keeps moving even
//! when every candidate is worse than that record.

pub mod backward;
pub mod forward;

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common_types::FeatureSubset;
use crate::error::{Result, SelectionError};
use crate::validation::SubsetEvaluator;

/// The two supported search directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    ForwardSelection,
    BackwardElimination,
}

impl Algorithm {
    /// Parses the menu choice (`1`/`2`) or a name (`forward`, `backward`).
    pub fn from_choice(choice: &str) -> Result<Self> {
        match choice.trim().to_ascii_lowercase().as_str() {
            "1" | "forward" | "forward_selection" | "forward-selection" => Ok(Self::ForwardSelection),
            "2" | "backward" | "backward_elimination" | "backward-elimination" => {
                Ok(Self::BackwardElimination)
            }
            _ => Err(SelectionError::InvalidAlgorithm(choice.trim().to_string())),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_choice(s)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForwardSelection => write!(f, "Forward Selection"),
            Self::BackwardElimination => write!(f, "Backward Elimination"),
        }
    }
}

/// One evaluated subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub subset: FeatureSubset,
    pub accuracy: f64,
}

/// The outcome of one search step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStep {
    /// 1-based step number.
    pub step: usize,
    /// The feature added (forward) or removed (backward) at this step.
    pub feature: usize,
    pub subset: FeatureSubset,
    pub accuracy: f64,
    /// Every candidate scored at this step, in evaluation order.
    pub candidates: Vec<TraceEntry>,
    /// Whether this step strictly improved on the best accuracy so far.
    pub improved: bool,
}

/// The full trajectory and the best subset seen over the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub algorithm: Algorithm,
    pub num_features: usize,
    /// The starting point: the empty subset (forward) or all features (backward).
    pub initial: TraceEntry,
    pub steps: Vec<SearchStep>,
    pub best: TraceEntry,
    /// Set when the last step ended below the best accuracy seen.
    pub accuracy_decreased: bool,
}

impl SearchResult {
    /// Accuracy the search ended on.
    pub fn final_accuracy(&self) -> f64 {
        self.steps.last().map_or(self.initial.accuracy, |s| s.accuracy)
    }

    /// Every candidate evaluated, in order, after the initial subset.
    pub fn trace(&self) -> impl Iterator<Item = &TraceEntry> {
        self.steps.iter().flat_map(|s| s.candidates.iter())
    }
}

/// Receives progress from a running search. All hooks default to no-ops.
pub trait SearchObserver {
    fn on_start(&mut self, _algorithm: Algorithm, _initial: &TraceEntry) -> Result<()> {
        Ok(())
    }

    fn on_candidate(&mut self, _entry: &TraceEntry) -> Result<()> {
        Ok(())
    }

    fn on_step(&mut self, _step: &SearchStep, _best: &TraceEntry) -> Result<()> {
        Ok(())
    }

    fn on_finish(&mut self, _result: &SearchResult) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// A scored candidate together with the feature that produced it.
#[derive(Debug, Clone)]
struct Candidate {
    feature: usize,
    entry: TraceEntry,
}

/// Picks the candidate with the strictly greatest accuracy; on ties the one
/// that comes first in `candidates` wins.
fn select_best(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates
        .iter()
        .enumerate()
        .max_by_key(|(position, c)| (OrderedFloat(c.entry.accuracy), Reverse(*position)))
        .map(|(_, c)| c)
}

/// Greedy search driver over a subset evaluator.
pub struct FeatureSearch<'e, E> {
    evaluator: &'e E,
    parallel: bool,
}

impl<'e, E: SubsetEvaluator> FeatureSearch<'e, E> {
    pub fn new(evaluator: &'e E) -> Self {
        Self {
            evaluator,
            parallel: false,
        }
    }

    /// Score the candidates of a step concurrently. Selection still follows
    /// candidate order, so the trajectory is the same as a sequential run.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn run(&self, algorithm: Algorithm, observer: &mut dyn SearchObserver) -> Result<SearchResult> {
        match algorithm {
            Algorithm::ForwardSelection => self.forward_selection(observer),
            Algorithm::BackwardElimination => self.backward_elimination(observer),
        }
    }

    fn evaluate_candidates(&self, candidates: Vec<(usize, FeatureSubset)>) -> Result<Vec<Candidate>> {
        let score = |(feature, subset): (usize, FeatureSubset)| -> Result<Candidate> {
            let accuracy = self.evaluator.evaluate(&subset)?;
            Ok(Candidate {
                feature,
                entry: TraceEntry { subset, accuracy },
            })
        };

        if self.parallel {
            candidates.into_par_iter().map(score).collect()
        } else {
            candidates.into_iter().map(score).collect()
        }
    }

    /// The loop shared by both directions. `candidates_for` lists, in
    /// tie-breaking order, the `(feature, subset)` pairs reachable from the
    /// current subset.
    fn search<C>(
        &self,
        algorithm: Algorithm,
        start: FeatureSubset,
        num_steps: usize,
        candidates_for: C,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchResult>
    where
        C: Fn(&FeatureSubset) -> Vec<(usize, FeatureSubset)>,
    {
        let start_accuracy = self.evaluator.evaluate(&start)?;
        let initial = TraceEntry {
            subset: start,
            accuracy: start_accuracy,
        };
        tracing::info!(%algorithm, subset = %initial.subset, accuracy = initial.accuracy, "Starting search");
        observer.on_start(algorithm, &initial)?;

        let mut current = initial.clone();
        let mut best = initial.clone();
        let mut steps = Vec::with_capacity(num_steps);

        for step in 1..=num_steps {
            let scored = self.evaluate_candidates(candidates_for(&current.subset))?;
            for candidate in &scored {
                tracing::debug!(step, subset = %candidate.entry.subset, accuracy = candidate.entry.accuracy, "Evaluated candidate");
                observer.on_candidate(&candidate.entry)?;
            }

            let Some(chosen) = select_best(&scored) else {
                tracing::warn!(step, "No candidates left; stopping early");
                break;
            };
            let feature = chosen.feature;
            current = chosen.entry.clone();

            let improved = current.accuracy > best.accuracy;
            if improved {
                best = current.clone();
            }

            let record = SearchStep {
                step,
                feature,
                subset: current.subset.clone(),
                accuracy: current.accuracy,
                candidates: scored.into_iter().map(|c| c.entry).collect(),
                improved,
            };
            tracing::info!(
                step,
                feature,
                subset = %record.subset,
                accuracy = record.accuracy,
                best_accuracy = best.accuracy,
                "Step complete"
            );
            observer.on_step(&record, &best)?;
            steps.push(record);
        }

        let accuracy_decreased = current.accuracy < best.accuracy;
        let result = SearchResult {
            algorithm,
            num_features: self.evaluator.num_features(),
            initial,
            steps,
            best,
            accuracy_decreased,
        };
        tracing::info!(
            best_subset = %result.best.subset,
            best_accuracy = result.best.accuracy,
            accuracy_decreased,
            "Search finished"
        );
        observer.on_finish(&result)?;
        Ok(result)
    }
}
