//! projection — trend extrapolation of per-entity emission series with
//! quantified uncertainty.
//!
//! Purpose
//! -------
//! Take a validated entity-year table of annual emission totals and project
//! every sufficiently long series into future years, reporting a point
//! estimate, a confidence interval, and a standard error per (entity, year).
//! This is the main entry point of the crate and the surface the Python
//! bindings depend on.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds the data model: the method selector, the validated
//!   [`ProjectionConfig`], per-entity [`HistoricalSeries`], and the input
//!   [`EntityYearTable`].
//! - [`models`] implements the linear, exponential, and moving-average trend
//!   kernels behind the [`TrendModel`] selector, which routes degenerate
//!   inputs to a well-defined kernel before fitting.
//! - [`bootstrap`] builds percentile intervals by resampling the history.
//! - [`projector`] turns one series into labeled [`ProjectionRecord`]s;
//!   [`batch`] drives it over a whole table and compares methods.
//! - [`summary`] aggregates a [`ProjectionTable`] into a run report and
//!   [`io`] reads and writes the CSV formats.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration is passed explicitly as a [`ProjectionConfig`] value;
//!   there is no process-wide state.
//! - Only the boundary (config construction, table construction, method
//!   parsing, CSV I/O) returns [`ProjectionError`]. Short histories are
//!   omitted from the output and degenerate fits fall back locally.
//! - Every record satisfies `lower_bound ≤ projected_value ≤ upper_bound`.
//!
//! Conventions
//! -----------
//! - Years are `i32` calendar years in tables and `f64` inside the models.
//! - Output order is entity first-appearance order, then requested-year
//!   order.
//! - Logging goes through `tracing` in [`batch`] and [`io`] only; the
//!   library never installs a subscriber.
//!
//! Downstream usage
//! ----------------
//! 1. Build an [`EntityYearTable`] from rows or with
//!    [`io::read_entity_year_csv`].
//! 2. Configure a run with [`ProjectionConfig::new`] or `Default`, then
//!    `with_method` / `with_bootstrap` / `with_seed`.
//! 3. Call [`project_all`] (or [`compare_methods`] for one entity).
//! 4. Inspect the [`ProjectionTable`], summarize it with
//!    [`ProjectionSummary::from_table`], or persist it with
//!    [`io::save_projections`].
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own contract.
//! - `tests/integration_projection_pipeline.rs` runs CSV → batch → summary →
//!   CSV end to end and checks linear fits against a reference solver.
//! - `tests/property_bootstrap.rs` checks interval ordering and the
//!   exponential fallback with `proptest`.

pub mod batch;
pub mod bootstrap;
pub mod core;
pub mod errors;
pub mod io;
pub mod models;
pub mod projector;
pub mod summary;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::batch::{ProjectionTable, compare_methods, project_all};
pub use self::bootstrap::{BootstrapEstimate, bootstrap_projection};
pub use self::core::{
    EmissionRecord, EntityYearTable, HistoricalSeries, ProjectionConfig, ProjectionMethod,
};
pub use self::errors::{ProjectionError, ProjectionResult};
pub use self::models::{TrendForecast, TrendModel};
pub use self::projector::{ProjectionRecord, project_entity};
pub use self::summary::ProjectionSummary;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use emission_projections::projection::prelude::*;

pub mod prelude {
    pub use super::{
        EmissionRecord, EntityYearTable, ProjectionConfig, ProjectionError, ProjectionMethod,
        ProjectionRecord, ProjectionResult, ProjectionSummary, ProjectionTable, compare_methods,
        project_all,
    };
}
