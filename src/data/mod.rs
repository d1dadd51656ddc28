//! Loading labeled instances from the whitespace-separated dataset format.
//!
//! Each non-blank line is `label feature_1 feature_2 ...`. Labels may be written
//! as integers or as integral reals (`2.0000000e+00`). All rows must have the
//! same number of features.

pub mod normalize;
pub mod synthetic;

use std::fs;
use std::io::Write;
use std::path::Path;

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::common_types::Instance;
use crate::error::{Result, SelectionError};

pub use normalize::{normalize, Normalization};

/// How raw rows become the dataset handed to the search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub normalization: Normalization,
    /// Leading feature columns to drop, e.g. a sentinel column of zeros.
    pub skip_leading_features: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            normalization: Normalization::ZScore,
            skip_leading_features: 0,
        }
    }
}

/// Reads and normalizes a dataset file.
pub fn load_dataset(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Vec<Instance>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let dataset = parse_dataset(&contents, options)?;
    tracing::info!(
        path = %path.display(),
        instances = dataset.len(),
        features = dataset.first().map_or(0, Instance::num_features),
        normalization = ?options.normalization,
        "Loaded dataset"
    );
    Ok(dataset)
}

/// Parses dataset text, drops skipped columns, then normalizes over the whole
/// dataset.
///
/// Statistics include every instance, so during leave-one-out the held-out
/// instance has already influenced its own scaling.
pub fn parse_dataset(contents: &str, options: &LoadOptions) -> Result<Vec<Instance>> {
    let mut dataset: Vec<Instance> = Vec::new();
    let mut width: Option<usize> = None;

    for (index, line) in contents.lines().enumerate() {
        let line_no = index + 1;
        let mut tokens = line.split_whitespace();
        let Some(label_token) = tokens.next() else {
            continue;
        };
        let label = parse_label(label_token).ok_or_else(|| {
            SelectionError::parse(line_no, format!("invalid class label {label_token:?}"))
        })?;

        let features = tokens
            .map(|token| {
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| SelectionError::parse(line_no, format!("invalid feature value {token:?}")))
            })
            .collect::<Result<Vec<f64>>>()?;

        match width {
            None => width = Some(features.len()),
            Some(expected) if expected != features.len() => {
                return Err(SelectionError::parse(
                    line_no,
                    format!("expected {} features, found {}", expected, features.len()),
                ));
            }
            Some(_) => {}
        }

        let features = features.into_iter().skip(options.skip_leading_features).collect();
        dataset.push(Instance::new(features, label));
    }

    if dataset.is_empty() {
        return Err(SelectionError::dataset("no instances found"));
    }
    if dataset[0].features.is_empty() {
        return Err(SelectionError::dataset("instances have no features"));
    }

    normalize(&mut dataset, options.normalization);
    Ok(dataset)
}

fn parse_label(token: &str) -> Option<i64> {
    if let Ok(label) = token.parse::<i64>() {
        return Some(label);
    }
    let value = token.parse::<f64>().ok()?;
    if value.fract() != 0.0 {
        return None;
    }
    // `None` for anything outside the i64 range, NaN and infinities included.
    value.to_i64()
}

/// Writes instances in the dataset format, one per line.
pub fn write_dataset<W: Write>(mut writer: W, dataset: &[Instance]) -> Result<()> {
    for point in dataset {
        write!(writer, "{}", point.label)?;
        for value in &point.features {
            write!(writer, "  {:.7e}", value)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
