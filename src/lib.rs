//! emission_projections — per-entity emission trend projections with
//! uncertainty, with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the projection engine to Python via the `_emission_projections`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing class and functions used by the
//! `emission_projections` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the [`projection`] module as the public crate surface.
//! - Define the `Projections` `#[pyclass]`, the `project_all`,
//!   `compare_methods`, and `load_projections` functions, and the
//!   `#[pymodule]` initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in [`projection`]; this file performs only FFI
//!   glue, input conversion, and error mapping.
//! - Python inputs arrive as three aligned columns (entities, years, values)
//!   and are validated through `EntityYearTable::new`, so the same
//!   rejection rules apply as for Rust callers.
//!
//! Conventions
//! -----------
//! - Keyword arguments left as `None` take the `ProjectionConfig` defaults.
//! - `ProjectionError` values surface in Python as `ValueError`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in [`projection`] and by the
//!   integration tests under `tests/`. The PyO3 layer is exercised from
//!   Python.

pub mod projection;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    projection::{batch::ProjectionTable, io, summary::ProjectionSummary},
    utils::{build_config, build_table},
};

/// Projections — Python-facing wrapper around a [`ProjectionTable`].
///
/// Purpose
/// -------
/// Hold the result of a batch or comparison run and expose it column-wise so
/// Python callers can build a `pandas.DataFrame` without per-row overhead.
///
/// Fields
/// ------
/// - `inner`: [`ProjectionTable`]
///   Records in entity first-appearance order, then year order.
///
/// Notes
/// -----
/// - Column getters copy into fresh NumPy arrays / lists on each call.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "emission_projections.projection")]
pub struct Projections {
    inner: ProjectionTable,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Projections {
    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Entity identifier per record.
    #[getter]
    pub fn entity_identifier(&self) -> Vec<String> {
        self.inner.iter().map(|r| r.entity.clone()).collect()
    }

    #[getter]
    pub fn year<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i32>> {
        self.inner.iter().map(|r| r.year).collect::<Vec<_>>().into_pyarray(py)
    }

    #[getter]
    pub fn projected_value<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.column(py, |r| r.projected_value)
    }

    #[getter]
    pub fn lower_bound<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.column(py, |r| r.lower_bound)
    }

    #[getter]
    pub fn upper_bound<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.column(py, |r| r.upper_bound)
    }

    #[getter]
    pub fn standard_error<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.column(py, |r| r.standard_error)
    }

    /// Requested method name per record (`linear`, `exponential`,
    /// `moving_average`).
    #[getter]
    pub fn method(&self) -> Vec<&'static str> {
        self.inner.iter().map(|r| r.method.as_str()).collect()
    }

    #[getter]
    pub fn historical_year_count<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<usize>> {
        self.inner.iter().map(|r| r.historical_year_count).collect::<Vec<_>>().into_pyarray(py)
    }

    /// Text report of per-year totals and the largest final-year emitters.
    #[pyo3(signature = (top_n = 10))]
    pub fn summary(&self, top_n: usize) -> String {
        ProjectionSummary::with_top_n(&self.inner, top_n).to_string()
    }

    /// Write the records as CSV to `path`.
    pub fn save(&self, path: &str) -> PyResult<()> {
        io::save_projections(&self.inner, path)?;
        Ok(())
    }
}

#[cfg(feature = "python-bindings")]
impl Projections {
    fn column<'py>(
        &self, py: Python<'py>, field: impl Fn(&crate::projection::ProjectionRecord) -> f64,
    ) -> Bound<'py, PyArray1<f64>> {
        self.inner.iter().map(field).collect::<Vec<f64>>().into_pyarray(py)
    }
}

/// Project every entity with at least `min_historical_years` distinct years.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (
        entities,
        years,
        values,
        future_years,
        method = None,
        use_bootstrap = None,
        confidence_level = None,
        bootstrap_samples = None,
        min_historical_years = None,
        moving_average_window = None,
        seed = None,
    ),
    text_signature = "(entities, years, values, future_years, /, method=None, use_bootstrap=None, \
                      confidence_level=None, bootstrap_samples=None, min_historical_years=None, \
                      moving_average_window=None, seed=None)"
)]
#[allow(clippy::too_many_arguments)]
pub fn project_all<'py>(
    py: Python<'py>, entities: &Bound<'py, PyAny>, years: &Bound<'py, PyAny>,
    values: &Bound<'py, PyAny>, future_years: &Bound<'py, PyAny>, method: Option<&str>,
    use_bootstrap: Option<bool>, confidence_level: Option<f64>, bootstrap_samples: Option<usize>,
    min_historical_years: Option<usize>, moving_average_window: Option<usize>, seed: Option<u64>,
) -> PyResult<Projections> {
    let table = build_table(py, entities, years, values)?;
    let future = utils::extract_years(future_years, "future_years")?;
    let config = build_config(
        method,
        use_bootstrap,
        confidence_level,
        bootstrap_samples,
        min_historical_years,
        moving_average_window,
        seed,
    )?;

    let inner = py.allow_threads(|| projection::batch::project_all(&table, &future, &config));
    Ok(Projections { inner })
}

/// Project one entity with every method, bootstrap disabled.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (
        entities,
        years,
        values,
        entity,
        future_years,
        confidence_level = None,
        moving_average_window = None,
    ),
    text_signature = "(entities, years, values, entity, future_years, /, confidence_level=None, \
                      moving_average_window=None)"
)]
pub fn compare_methods<'py>(
    py: Python<'py>, entities: &Bound<'py, PyAny>, years: &Bound<'py, PyAny>,
    values: &Bound<'py, PyAny>, entity: &str, future_years: &Bound<'py, PyAny>,
    confidence_level: Option<f64>, moving_average_window: Option<usize>,
) -> PyResult<Projections> {
    let table = build_table(py, entities, years, values)?;
    let future = utils::extract_years(future_years, "future_years")?;
    let config =
        build_config(None, Some(false), confidence_level, None, None, moving_average_window, None)?;

    let inner = projection::batch::compare_methods(&table, entity, &future, &config);
    Ok(Projections { inner })
}

/// Read a projection CSV written by `Projections.save`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
pub fn load_projections(path: &str) -> PyResult<Projections> {
    let inner = io::load_projections(path)?;
    Ok(Projections { inner })
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _emission_projections(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    let projection_mod = PyModule::new(py, "projection")?;
    projection_mod.add_class::<Projections>()?;
    projection_mod.add_function(wrap_pyfunction!(project_all, &projection_mod)?)?;
    projection_mod.add_function(wrap_pyfunction!(compare_methods, &projection_mod)?)?;
    projection_mod.add_function(wrap_pyfunction!(load_projections, &projection_mod)?)?;
    m.add_submodule(&projection_mod)?;

    py.import("sys")?
        .getattr("modules")?
        .set_item("emission_projections.projection", &projection_mod)?;

    Ok(())
}
