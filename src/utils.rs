//! Python-boundary helpers: array extraction and argument validation for the
//! PyO3 bindings in `lib.rs`.
#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::projection::core::{
    config::ProjectionConfig,
    method::ProjectionMethod,
    table::{EmissionRecord, EntityYearTable},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Borrow or copy a 1-D float64 input (ndarray, pandas Series, or sequence).
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Extract a sequence of years. Any integer-like elements are accepted.
#[cfg(feature = "python-bindings")]
pub fn extract_years(raw: &Bound<'_, PyAny>, name: &str) -> PyResult<Vec<i32>> {
    if let Ok(years) = raw.extract::<Vec<i32>>() {
        return Ok(years);
    }
    raw.call_method0("tolist").and_then(|list| list.extract::<Vec<i32>>()).map_err(|_| {
        PyTypeError::new_err(format!("{name} must be a 1-D sequence of integer years"))
    })
}

/// Extract a sequence of entity identifiers (list, ndarray of str, or
/// pandas Series).
#[cfg(feature = "python-bindings")]
pub fn extract_entities(raw: &Bound<'_, PyAny>) -> PyResult<Vec<String>> {
    if let Ok(ids) = raw.extract::<Vec<String>>() {
        return Ok(ids);
    }
    raw.call_method0("tolist")
        .and_then(|list| list.extract::<Vec<String>>())
        .map_err(|_| PyTypeError::new_err("entities must be a 1-D sequence of str"))
}

/// Zip column inputs into a validated [`EntityYearTable`].
#[cfg(feature = "python-bindings")]
pub fn build_table<'py>(
    py: Python<'py>, entities: &Bound<'py, PyAny>, years: &Bound<'py, PyAny>,
    values: &Bound<'py, PyAny>,
) -> PyResult<EntityYearTable> {
    let ids = extract_entities(entities)?;
    let years = extract_years(years, "years")?;
    let values_arr = extract_f64_array(py, values)?;
    let values = values_arr.as_slice().map_err(|_| {
        PyValueError::new_err("values must be a 1-D contiguous float64 array or sequence")
    })?;

    if ids.len() != years.len() || ids.len() != values.len() {
        return Err(PyValueError::new_err(format!(
            "entities, years, and values must have equal length (got {}, {}, {})",
            ids.len(),
            years.len(),
            values.len()
        )));
    }

    let rows = ids
        .into_iter()
        .zip(years)
        .zip(values.iter().copied())
        .map(|((entity, year), value)| EmissionRecord::new(entity, year, value))
        .collect();
    Ok(EntityYearTable::new(rows)?)
}

/// Build a validated [`ProjectionConfig`] from keyword arguments.
#[cfg(feature = "python-bindings")]
pub fn build_config(
    method: Option<&str>, use_bootstrap: Option<bool>, confidence_level: Option<f64>,
    bootstrap_samples: Option<usize>, min_historical_years: Option<usize>,
    moving_average_window: Option<usize>, seed: Option<u64>,
) -> PyResult<ProjectionConfig> {
    let defaults = ProjectionConfig::default();

    let method = match method {
        Some(name) => name.parse::<ProjectionMethod>()?,
        None => defaults.method,
    };

    let config = ProjectionConfig::new(
        confidence_level.unwrap_or(defaults.confidence_level),
        bootstrap_samples.unwrap_or(defaults.bootstrap_samples),
        min_historical_years.unwrap_or(defaults.min_historical_years),
        moving_average_window.unwrap_or(defaults.moving_average_window),
        method,
        use_bootstrap.unwrap_or(defaults.use_bootstrap),
    )?;

    Ok(match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}
