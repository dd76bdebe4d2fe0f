//! models — point-estimate trend extrapolators with first-order errors.
//!
//! Purpose
//! -------
//! Map a historical `(x, y)` series and a set of future points to point
//! predictions and one standard error per future point. Three families are
//! available (linear, exponential, moving average); all of them are
//! infallible.
//!
//! Key behaviors
//! -------------
//! - [`TrendModel::select`] inspects the requested [`ProjectionMethod`] and
//!   the data *before* fitting and returns the variant that is actually
//!   defined for that input:
//!   - exponential on a series with any value ≤ 0 (or no values) → linear;
//!   - moving average with fewer points than the window → historical mean;
//!   - moving average with a one-point window → last value.
//! - [`TrendModel::forecast`] runs the selected kernel and always returns a
//!   [`TrendForecast`]; degenerate numerics are handled by substitution
//!   (zero slope, zero or spread-based error), never by an error value.
//! - An exponential forecast that overflows `f64` (any prediction or error
//!   not finite) is replaced by the linear forecast of the same series.
//! - [`forecast`] composes both steps for callers that only hold a method.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x` and `y` have equal length and `x` is sorted ascending. Duplicate
//!   `x` values are allowed (bootstrap resamples produce them) and act as
//!   extra weight on that year.
//! - `predictions.len() == std_errors.len() == future_x.len()` and every
//!   standard error is ≥ 0.
//!
//! Conventions
//! -----------
//! - `x` holds calendar years as `f64`. Fits are computed in centered form,
//!   so no rescaling of years is needed.
//! - `future_x` may contain any real value, including years before the last
//!   observation.
//!
//! Testing notes
//! -------------
//! - Each kernel module has unit tests for its closed-form behavior; the
//!   selector and fallback contracts are tested here.
pub mod exponential;
pub mod linear;
pub mod moving_average;
pub mod ols;

use ndarray::{Array1, ArrayView1};

use crate::projection::core::method::ProjectionMethod;

/// TrendForecast — predictions and standard errors aligned with `future_x`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendForecast {
    /// Point prediction per future point.
    pub predictions: Array1<f64>,
    /// First-order standard error per future point (≥ 0).
    pub std_errors: Array1<f64>,
}

impl TrendForecast {
    /// Wrap predictions with an all-zero error vector of the same length.
    pub fn with_zero_errors(predictions: Array1<f64>) -> Self {
        let std_errors = Array1::zeros(predictions.len());
        TrendForecast { predictions, std_errors }
    }

    /// Number of future points.
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// `true` when every prediction and standard error is finite.
    pub fn is_finite(&self) -> bool {
        self.predictions.iter().chain(self.std_errors.iter()).all(|v| v.is_finite())
    }
}

/// TrendModel — the kernel that will actually run on a given series.
///
/// Variants
/// --------
/// - `Linear`: degree-1 least squares ([`linear::project`]).
/// - `Exponential`: log-linear least squares on strictly positive data
///   ([`exponential::project`]).
/// - `WindowTrend { window }`: slope of the last `window ≥ 2` points from
///   the last value ([`moving_average::project_window_trend`]).
/// - `MeanLevel`: flat at the historical mean; moving average with fewer
///   points than its window ([`moving_average::project_mean_level`]).
/// - `LastLevel`: flat at the last value; moving average with a one-point
///   window ([`moving_average::project_last_level`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendModel {
    Linear,
    Exponential,
    WindowTrend { window: usize },
    MeanLevel,
    LastLevel,
}

impl TrendModel {
    /// Route a requested method to the kernel defined for `y`.
    ///
    /// Parameters
    /// ----------
    /// - `method`: [`ProjectionMethod`]
    ///   Requested trend family.
    /// - `y`: `ArrayView1<f64>`
    ///   Historical values the kernel will be fitted on.
    /// - `window`: `usize`
    ///   Moving-average window; ignored by the other families. A window of
    ///   `0` is treated as `1`.
    ///
    /// Returns
    /// -------
    /// `TrendModel`
    ///   The variant that is well defined for `y`. Never fails.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use emission_projections::projection::core::method::ProjectionMethod;
    /// # use emission_projections::projection::models::TrendModel;
    /// let y = array![4.0, 0.0, 6.0];
    /// assert_eq!(
    ///     TrendModel::select(ProjectionMethod::Exponential, y.view(), 3),
    ///     TrendModel::Linear
    /// );
    /// assert_eq!(
    ///     TrendModel::select(ProjectionMethod::MovingAverage, y.view(), 5),
    ///     TrendModel::MeanLevel
    /// );
    /// ```
    pub fn select(method: ProjectionMethod, y: ArrayView1<f64>, window: usize) -> TrendModel {
        match method {
            ProjectionMethod::Linear => TrendModel::Linear,
            ProjectionMethod::Exponential => {
                if exponential::is_admissible(y) {
                    TrendModel::Exponential
                } else {
                    TrendModel::Linear
                }
            }
            ProjectionMethod::MovingAverage => {
                let window = window.max(1);
                if y.len() < window {
                    TrendModel::MeanLevel
                } else if window == 1 {
                    TrendModel::LastLevel
                } else {
                    TrendModel::WindowTrend { window }
                }
            }
        }
    }

    /// Run the kernel on `(x, y)` and predict at `future_x`.
    ///
    /// Preconditions are those established by [`select`](Self::select) for
    /// the same `y`; constructing a variant by hand for an input it does not
    /// admit (e.g. `WindowTrend` longer than the series) may panic.
    ///
    /// `Exponential` falls back to [`linear::project`] when `exp` overflows
    /// at any future point.
    pub fn forecast(
        &self, x: ArrayView1<f64>, y: ArrayView1<f64>, future_x: ArrayView1<f64>,
    ) -> TrendForecast {
        match *self {
            TrendModel::Linear => linear::project(x, y, future_x),
            TrendModel::Exponential => {
                let out = exponential::project(x, y, future_x);
                if out.is_finite() { out } else { linear::project(x, y, future_x) }
            }
            TrendModel::WindowTrend { window } => {
                moving_average::project_window_trend(x, y, future_x, window)
            }
            TrendModel::MeanLevel => moving_average::project_mean_level(y, future_x),
            TrendModel::LastLevel => moving_average::project_last_level(y, future_x),
        }
    }
}

/// Select and run the trend model for `method` in one step.
///
/// Equivalent to `TrendModel::select(method, y, window).forecast(x, y, future_x)`.
pub fn forecast(
    method: ProjectionMethod, x: ArrayView1<f64>, y: ArrayView1<f64>, future_x: ArrayView1<f64>,
    window: usize,
) -> TrendForecast {
    TrendModel::select(method, y, window).forecast(x, y, future_x)
}
