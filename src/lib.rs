//! Greedy feature selection for a one-nearest-neighbor classifier.
//!
//! Every candidate feature subset is scored by leave-one-out validation: each
//! instance is classified by its nearest neighbor among the others, using the
//! Euclidean distance over the subset's features. Forward selection grows a
//! subset from nothing; backward elimination shrinks the full set. Both record
//! the best subset seen across all steps, which can differ from where the
//! search ends.
//!
//! ```
//! use nn_feature_selection::{FeatureSearch, Instance, LeaveOneOut, NoopObserver};
//!
//! let dataset = vec![
//!     Instance::new(vec![0.0, 0.0], 1),
//!     Instance::new(vec![1.0, 10.0], 2),
//!     Instance::new(vec![2.0, 0.0], 1),
//!     Instance::new(vec![3.0, 10.0], 2),
//! ];
//! let scorer = LeaveOneOut::new(&dataset);
//! let result = FeatureSearch::new(&scorer).forward_selection(&mut NoopObserver).unwrap();
//! assert_eq!(result.best.subset.as_slice(), &[2]);
//! assert_eq!(result.best.accuracy, 100.0);
//! ```

pub mod common_types;
pub mod config;
pub mod data;
pub mod error;
pub mod knn;
pub mod report;
pub mod selection;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use common_types::{DataPoint, FeatureSubset, Instance};
pub use config::SelectionConfig;
pub use error::{Result, SelectionError};
pub use knn::{euclidean_distance, nearest_label};
pub use selection::{
    Algorithm, FeatureSearch, NoopObserver, SearchObserver, SearchResult, SearchStep, TraceEntry,
};
pub use validation::{LeaveOneOut, SubsetEvaluator};
