//! Python bindings, built with `--features python` (e.g. through maturin).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::common_types::{FeatureSubset, Instance};
use crate::error::SelectionError;
use crate::selection::{Algorithm, FeatureSearch, NoopObserver, SearchResult};
use crate::validation::LeaveOneOut;

impl From<SelectionError> for PyErr {
    fn from(err: SelectionError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Accepts `[(label, [features...]), ...]` or `[{'label': ..., 'features': [...]}, ...]`.
fn extract_dataset(data_py: &Bound<'_, PyList>) -> PyResult<Vec<Instance>> {
    let mut dataset = Vec::with_capacity(data_py.len());
    for item_py in data_py {
        if let Ok(dict) = item_py.downcast::<PyDict>() {
            let features = dict
                .get_item("features")?
                .ok_or_else(|| PyValueError::new_err("Missing 'features' key"))?
                .extract::<Vec<f64>>()?;
            let label = dict
                .get_item("label")?
                .ok_or_else(|| PyValueError::new_err("Missing 'label' key"))?
                .extract::<i64>()?;
            dataset.push(Instance::new(features, label));
        } else if let Ok((label, features)) = item_py.extract::<(i64, Vec<f64>)>() {
            dataset.push(Instance::new(features, label));
        } else {
            return Err(pyo3::exceptions::PyTypeError::new_err(
                "Instances must be (label, [features...]) tuples or {'label': ..., 'features': [...]} dicts",
            ));
        }
    }
    Ok(dataset)
}

fn run_search(data_py: &Bound<'_, PyList>, algorithm: Algorithm, parallel: bool) -> PyResult<(Vec<usize>, f64)> {
    let dataset = extract_dataset(data_py)?;
    let scorer = LeaveOneOut::new(&dataset).with_parallel(parallel);
    let result: SearchResult = FeatureSearch::new(&scorer)
        .with_parallel(parallel)
        .run(algorithm, &mut NoopObserver)?;
    Ok((result.best.subset.as_slice().to_vec(), result.best.accuracy))
}

/// Leave-one-out accuracy (percent) of the 1-NN classifier on the given
/// 1-based features.
#[pyfunction]
fn leave_one_out_accuracy(data: &Bound<'_, PyList>, features: Vec<usize>) -> PyResult<f64> {
    let dataset = extract_dataset(data)?;
    let subset: FeatureSubset = features.into_iter().collect();
    Ok(LeaveOneOut::new(&dataset).score(&subset)?)
}

/// Runs forward selection; returns `(best_features, best_accuracy)`.
#[pyfunction]
#[pyo3(signature = (data, parallel = false))]
fn forward_selection(data: &Bound<'_, PyList>, parallel: bool) -> PyResult<(Vec<usize>, f64)> {
    run_search(data, Algorithm::ForwardSelection, parallel)
}

/// Runs backward elimination; returns `(best_features, best_accuracy)`.
#[pyfunction]
#[pyo3(signature = (data, parallel = false))]
fn backward_elimination(data: &Bound<'_, PyList>, parallel: bool) -> PyResult<(Vec<usize>, f64)> {
    run_search(data, Algorithm::BackwardElimination, parallel)
}

/// The module name must match `lib.name` in `Cargo.toml`.
#[pymodule]
fn nn_feature_selection(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(leave_one_out_accuracy, m)?)?;
    m.add_function(wrap_pyfunction!(forward_selection, m)?)?;
    m.add_function(wrap_pyfunction!(backward_elimination, m)?)?;
    Ok(())
}
