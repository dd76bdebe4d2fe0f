//! projection::errors — boundary error types and Python bridges.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used at the edges of the
//! projection engine: configuration validation, entity-year table
//! construction, method parsing, and CSV import/export. The numerical core
//! (trend models, bootstrap, per-entity projector, batch orchestrator) never
//! returns these errors; degenerate numeric conditions there are recovered
//! locally.
//!
//! Key behaviors
//! -------------
//! - Define [`ProjectionResult`] and [`ProjectionError`] as the canonical
//!   result and error types for fallible projection entry points.
//! - Attach human-readable `Display` messages that embed the offending value
//!   (confidence level, row index, entity, year) so logs are meaningful
//!   without additional context.
//! - Normalize `csv`, `std::io`, and `anyhow` failures into string-carrying
//!   variants so the enum stays `Clone + PartialEq`. An `anyhow` error whose
//!   root cause is an I/O error lands in `Io` with its context chain.
//! - Implement `From<ProjectionError> for PyErr` when the `python-bindings`
//!   feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Insufficient history and degenerate fits are *not* errors; they are
//!   signaled by omission from the output or by a model fallback.
//! - Duplicate `(entity, year)` rows are a precondition violation and are
//!   rejected when the input table is built, before any projection runs.
//!
//! Conventions
//! -----------
//! - Row indices are 0-based positions in the input passed to the table
//!   builder (CSV header excluded).
//! - Messages are phrased in terms of domain constraints ("confidence level
//!   must lie in (0, 1)") rather than low-level details.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages embed their payloads and that
//!   the `From` conversions land in the expected variants.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// ProjectionError — failures at the boundary of the projection engine.
///
/// Variants
/// --------
/// - `InvalidConfidenceLevel { level }`
///   Confidence level is non-finite or outside the open interval (0, 1).
/// - `InvalidBootstrapSamples { samples }`
///   Bootstrap sample count is zero.
/// - `InvalidWindow { window }`
///   Moving-average window is zero.
/// - `InvalidMinHistory { years }`
///   Minimum historical-year gate is zero.
/// - `UnknownMethod { name }`
///   Method name does not match `linear`, `exponential`, or
///   `moving_average`.
/// - `EmptyEntity { row }`
///   An input row has an empty or whitespace-only entity identifier.
/// - `NonFiniteValue { row, value }` / `NegativeValue { row, value }`
///   An input emission total is NaN/±∞ or below zero.
/// - `DuplicateYear { entity, year }`
///   The same entity reports the same year more than once.
/// - `Csv(String)` / `Io(String)`
///   Tabular import/export failures, with the underlying message.
/// - `Anyhow(String)`
///   Catch-all for errors raised through `anyhow`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    // ---- Configuration ----
    InvalidConfidenceLevel { level: f64 },
    InvalidBootstrapSamples { samples: usize },
    InvalidWindow { window: usize },
    InvalidMinHistory { years: usize },
    UnknownMethod { name: String },

    // ---- Input table ----
    EmptyEntity { row: usize },
    NonFiniteValue { row: usize, value: f64 },
    NegativeValue { row: usize, value: f64 },
    DuplicateYear { entity: String, year: i32 },

    // ---- Tabular I/O ----
    Csv(String),
    Io(String),

    // ---- Anyhow catchall ----
    Anyhow(String),
}

impl std::error::Error for ProjectionError {}

impl std::fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            ProjectionError::InvalidConfidenceLevel { level } => {
                write!(f, "Invalid confidence level: {level}. Must lie in (0, 1).")
            }
            ProjectionError::InvalidBootstrapSamples { samples } => {
                write!(f, "Invalid bootstrap sample count: {samples}. Must be at least 1.")
            }
            ProjectionError::InvalidWindow { window } => {
                write!(f, "Invalid moving-average window: {window}. Must be at least 1.")
            }
            ProjectionError::InvalidMinHistory { years } => {
                write!(f, "Invalid minimum historical years: {years}. Must be at least 1.")
            }
            ProjectionError::UnknownMethod { name } => write!(
                f,
                "Unknown projection method {name:?} \
                 (expected 'linear', 'exponential', or 'moving_average')."
            ),

            // ---- Input table ----
            ProjectionError::EmptyEntity { row } => {
                write!(f, "Row {row}: entity identifier must not be empty.")
            }
            ProjectionError::NonFiniteValue { row, value } => {
                write!(f, "Row {row}: emission value {value} must be a finite number.")
            }
            ProjectionError::NegativeValue { row, value } => {
                write!(f, "Row {row}: emission value {value} must be non-negative.")
            }
            ProjectionError::DuplicateYear { entity, year } => {
                write!(f, "Entity {entity:?} reports year {year} more than once.")
            }

            // ---- Tabular I/O ----
            ProjectionError::Csv(msg) => write!(f, "CSV error: {msg}"),
            ProjectionError::Io(msg) => write!(f, "I/O error: {msg}"),

            // ---- Anyhow catchall ----
            ProjectionError::Anyhow(msg) => write!(f, "Projection error: {msg}"),
        }
    }
}

impl From<csv::Error> for ProjectionError {
    fn from(err: csv::Error) -> Self {
        ProjectionError::Csv(err.to_string())
    }
}

impl From<std::io::Error> for ProjectionError {
    fn from(err: std::io::Error) -> Self {
        ProjectionError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for ProjectionError {
    fn from(err: anyhow::Error) -> Self {
        let msg = format!("{err:#}");
        if err.root_cause().is::<std::io::Error>() {
            ProjectionError::Io(msg)
        } else {
            ProjectionError::Anyhow(msg)
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ProjectionError> for PyErr {
    fn from(err: ProjectionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
