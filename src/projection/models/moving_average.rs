//! Moving-average trend: recent slope extrapolated from the last observation.
//!
//! Three regimes, selected by
//! [`TrendModel::select`](crate::projection::models::TrendModel::select):
//! - fewer points than the window: flat at the historical mean
//!   ([`project_mean_level`]);
//! - a window of exactly one point: flat at the last value with zero error
//!   ([`project_last_level`]);
//! - otherwise the window slope ([`project_window_trend`]).
//!
//! The standard error is the population standard deviation of the values
//! involved, a volatility proxy rather than a propagated fit error.
use ndarray::{ArrayView1, s};

use crate::projection::models::{
    TrendForecast,
    ols::{LineFit, mean, population_std},
};

/// Slope of the last `window` points, extrapolated from the last value.
///
/// Parameters
/// ----------
/// - `x`, `y`: `ArrayView1<f64>`
///   Chronologically sorted history with `len ≥ window ≥ 2`.
/// - `future_x`: `ArrayView1<f64>`
///   Points to predict.
/// - `window`: `usize`
///   Trailing window length.
///
/// Returns
/// -------
/// `TrendForecast`
///   - `predictions[k] = y_last + slope · (future_x[k] − x_last)`, where
///     `slope` is the least-squares slope of the window re-centered so its
///     first point sits at `x = 0`.
///   - `std_errors[k] = population std of the window values` for every `k`.
///
/// Panics
/// ------
/// - If `window > x.len()` or the inputs are empty; the selector never routes
///   such inputs here.
pub fn project_window_trend(
    x: ArrayView1<f64>, y: ArrayView1<f64>, future_x: ArrayView1<f64>, window: usize,
) -> TrendForecast {
    let n = x.len();
    let recent_x = x.slice(s![n - window..]);
    let recent_y = y.slice(s![n - window..]);

    let origin = recent_x[0];
    let shifted_x = recent_x.mapv(|v| v - origin);
    let slope = LineFit::fit(shifted_x.view(), recent_y).slope;

    let last_x = x[n - 1];
    let last_value = y[n - 1];
    let volatility = population_std(recent_y);

    TrendForecast {
        predictions: future_x.mapv(|x0| last_value + slope * (x0 - last_x)),
        std_errors: future_x.mapv(|_| volatility),
    }
}

/// Flat forecast at the mean of all values, with their population standard
/// deviation as the error. Empty input forecasts `0.0` with zero error.
pub fn project_mean_level(y: ArrayView1<f64>, future_x: ArrayView1<f64>) -> TrendForecast {
    let level = mean(y);
    let spread = population_std(y);
    TrendForecast { predictions: future_x.mapv(|_| level), std_errors: future_x.mapv(|_| spread) }
}

/// Flat forecast at the last observed value with zero error (one-point
/// window, slope undefined).
pub fn project_last_level(y: ArrayView1<f64>, future_x: ArrayView1<f64>) -> TrendForecast {
    let last = if y.is_empty() { 0.0 } else { y[y.len() - 1] };
    TrendForecast::with_zero_errors(future_x.mapv(|_| last))
}
