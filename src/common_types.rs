//! Data structures shared by the classifier, the scorer and the search drivers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a single labeled instance.
///
/// - `F`: The type of the features (e.g., `f64`, `f32`).
/// - `L`: The type of the label (an integer class in the dataset format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint<F, L> {
    pub features: Vec<F>,
    pub label: L,
}

impl<F, L> DataPoint<F, L> {
    pub fn new(features: Vec<F>, label: L) -> Self {
        DataPoint { features, label }
    }

    pub fn num_features(&self) -> usize {
        self.features.len()
    }
}

/// The instance type produced by the dataset loader.
pub type Instance = DataPoint<f64, i64>;

/// A set of 1-based feature indices.
///
/// Equality and hashing look only at which features are present; the insertion
/// order is kept so traces can show the order features were added in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSubset {
    features: Vec<usize>,
}

impl FeatureSubset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// All features `1..=num_features`, ascending.
    pub fn full(num_features: usize) -> Self {
        Self {
            features: (1..=num_features).collect(),
        }
    }

    /// Returns a new subset with `feature` appended. Adding a present feature
    /// returns an unchanged copy.
    pub fn with(&self, feature: usize) -> Self {
        let mut features = self.features.clone();
        if !features.contains(&feature) {
            features.push(feature);
        }
        Self { features }
    }

    /// Returns a new subset without `feature`, preserving the order of the rest.
    pub fn without(&self, feature: usize) -> Self {
        Self {
            features: self
                .features
                .iter()
                .copied()
                .filter(|&f| f != feature)
                .collect(),
        }
    }

    pub fn contains(&self, feature: usize) -> bool {
        self.features.contains(&feature)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.features.iter().copied()
    }

    /// 0-based storage offsets, in insertion order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.features.iter().map(|&f| f - 1)
    }

    pub fn max_feature(&self) -> Option<usize> {
        self.features.iter().copied().max()
    }

    /// Sorted feature indices; the identity of the subset as a set.
    pub fn sorted(&self) -> Vec<usize> {
        let mut sorted = self.features.clone();
        sorted.sort_unstable();
        sorted
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.features
    }
}

impl FromIterator<usize> for FeatureSubset {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut subset = FeatureSubset::empty();
        for feature in iter {
            if !subset.contains(feature) {
                subset.features.push(feature);
            }
        }
        subset
    }
}

impl PartialEq for FeatureSubset {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for FeatureSubset {}

impl std::hash::Hash for FeatureSubset {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl fmt::Display for FeatureSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, feature) in self.features.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{feature}")?;
        }
        write!(f, "}}")
    }
}
