//! Per-feature rescaling applied once, before any search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common_types::Instance;

/// Normalization policy applied column by column over the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Leave raw values untouched.
    None,
    /// Rescale each feature to `[0, 1]`.
    MinMax,
    /// Subtract the mean and divide by the population standard deviation.
    #[default]
    ZScore,
}

impl FromStr for Normalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" | "raw" => Ok(Self::None),
            "min_max" | "minmax" => Ok(Self::MinMax),
            "z_score" | "zscore" => Ok(Self::ZScore),
            other => Err(format!("unknown normalization {other:?} (expected none, min-max or z-score)")),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::MinMax => write!(f, "min-max"),
            Self::ZScore => write!(f, "z-score"),
        }
    }
}

/// Rescales every feature column in place. Constant columns become 0.
pub fn normalize(dataset: &mut [Instance], normalization: Normalization) {
    let num_features = dataset.first().map_or(0, Instance::num_features);
    if dataset.is_empty() || normalization == Normalization::None {
        return;
    }

    for column in 0..num_features {
        let values = dataset.iter().map(|p| p.features[column]);
        let (shift, scale) = match normalization {
            Normalization::None => (0.0, 1.0),
            Normalization::MinMax => {
                let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
                (min, max - min)
            }
            Normalization::ZScore => {
                let n = dataset.len() as f64;
                let mean = values.sum::<f64>() / n;
                let variance = dataset
                    .iter()
                    .map(|p| {
                        let d = p.features[column] - mean;
                        d * d
                    })
                    .sum::<f64>()
                    / n;
                (mean, variance.sqrt())
            }
        };

        for point in dataset.iter_mut() {
            let value = &mut point.features[column];
            *value = if scale > 0.0 { (*value - shift) / scale } else { 0.0 };
        }
    }
}
