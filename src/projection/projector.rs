//! projector — labeled projection records for a single entity.
//!
//! Purpose
//! -------
//! Turn one entity's historical series into one [`ProjectionRecord`] per
//! requested future year, using either the trend model's analytic standard
//! error or a percentile bootstrap for the interval.
//!
//! Key behaviors
//! -------------
//! - Fewer than two historical points → no records.
//! - Analytic path: the selected model runs once on the full series;
//!   bounds are `prediction ± z · se`.
//! - Bootstrap path: point estimate and bounds come from
//!   [`bootstrap_projection`]; the reported standard error is
//!   `(upper − lower) / (2 · z)`.
//! - Records carry the *requested* method, even when a fallback kernel ran,
//!   plus the number of historical years used.
//!
//! Invariants & assumptions
//! ------------------------
//! - `lower_bound ≤ projected_value ≤ upper_bound` for every record.
//! - The projector never fails; it does not log.
use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::projection::{
    bootstrap::bootstrap_projection,
    core::{config::ProjectionConfig, method::ProjectionMethod, series::HistoricalSeries},
    models::TrendModel,
};

/// Smallest series the projector will extrapolate.
pub const MIN_PROJECTABLE_POINTS: usize = 2;

/// ProjectionRecord — one projected (entity, year) row.
///
/// Fields
/// ------
/// - `entity`: `String`
///   Entity identifier (`entity_identifier` in CSV).
/// - `year`: `i32`
///   Future calendar year.
/// - `projected_value`: `f64`
///   Point estimate (bootstrap mean when bootstrapping).
/// - `lower_bound`, `upper_bound`: `f64`
///   Interval bounds at the configured confidence level.
/// - `standard_error`: `f64`
///   Analytic standard error, or the interval-implied one on the bootstrap
///   path.
/// - `method`: [`ProjectionMethod`]
///   Requested trend family.
/// - `historical_year_count`: `usize`
///   Number of historical observations the projection was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    #[serde(rename = "entity_identifier")]
    pub entity: String,
    pub year: i32,
    pub projected_value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub standard_error: f64,
    pub method: ProjectionMethod,
    pub historical_year_count: usize,
}

/// Project one entity's series into `future_years`.
///
/// Parameters
/// ----------
/// - `entity`: `&str`
///   Identifier copied into every record.
/// - `series`: `&HistoricalSeries`
///   Chronologically sorted history.
/// - `future_years`: `&[i32]`
///   Years to project, in output order. Years inside or before the
///   historical range are allowed.
/// - `method`: [`ProjectionMethod`]
///   Requested trend family; overrides `config.method`.
/// - `use_bootstrap`: `bool`
///   Overrides `config.use_bootstrap`.
/// - `config`: `&ProjectionConfig`
///   Confidence level, bootstrap sample count, and moving-average window.
/// - `rng`: `&mut R`
///   Consumed only on the bootstrap path.
///
/// Returns
/// -------
/// `Vec<ProjectionRecord>`
///   One record per future year, or empty when the series has fewer than
///   two points.
pub fn project_entity<R: Rng + ?Sized>(
    entity: &str, series: &HistoricalSeries, future_years: &[i32], method: ProjectionMethod,
    use_bootstrap: bool, config: &ProjectionConfig, rng: &mut R,
) -> Vec<ProjectionRecord> {
    let n = series.len();
    if n < MIN_PROJECTABLE_POINTS {
        return Vec::new();
    }

    let x = series.x();
    let y = series.y();
    let future_x: Array1<f64> = future_years.iter().map(|&year| f64::from(year)).collect();
    let z = config.z_score();

    let (point, lower, upper, std_error) = if use_bootstrap {
        let estimate =
            bootstrap_projection(x.view(), y.view(), future_x.view(), method, config, rng);
        let std_error = (&estimate.upper - &estimate.lower) / (2.0 * z);
        (estimate.mean, estimate.lower, estimate.upper, std_error)
    } else {
        let model = TrendModel::select(method, y.view(), config.moving_average_window);
        let forecast = model.forecast(x.view(), y.view(), future_x.view());
        let half_width = &forecast.std_errors * z;
        let lower = &forecast.predictions - &half_width;
        let upper = &forecast.predictions + &half_width;
        (forecast.predictions, lower, upper, forecast.std_errors)
    };

    future_years
        .iter()
        .enumerate()
        .map(|(k, &year)| ProjectionRecord {
            entity: entity.to_string(),
            year,
            projected_value: point[k],
            lower_bound: lower[k],
            upper_bound: upper[k],
            standard_error: std_error[k],
            method,
            historical_year_count: n,
        })
        .collect()
}
