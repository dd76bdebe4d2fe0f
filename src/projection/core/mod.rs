//! core — data model of the projection engine.
//!
//! - [`method`]: the requested trend family ([`ProjectionMethod`]).
//! - [`config`]: validated run configuration ([`ProjectionConfig`]).
//! - [`series`]: one entity's chronologically sorted history
//!   ([`HistoricalSeries`]).
//! - [`table`]: the validated input table ([`EntityYearTable`]) and its rows
//!   ([`EmissionRecord`]).

pub mod config;
pub mod method;
pub mod series;
pub mod table;

pub use self::config::ProjectionConfig;
pub use self::method::ProjectionMethod;
pub use self::series::HistoricalSeries;
pub use self::table::{EmissionRecord, EntityYearTable};
