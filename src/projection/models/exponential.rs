//! Exponential trend `y = a · exp(b · x)` fitted by log-linearization.
//!
//! The kernel here assumes strictly positive `y`. Routing of non-positive or
//! empty series to the linear model happens in
//! [`TrendModel::select`](crate::projection::models::TrendModel::select),
//! and the switch to linear after an overflowing `exp` happens in
//! [`TrendModel::forecast`](crate::projection::models::TrendModel::forecast).
use ndarray::ArrayView1;

use crate::projection::models::{TrendForecast, ols::LineFit};

/// Returns `true` when the log-linear fit is defined for `y`.
pub fn is_admissible(y: ArrayView1<f64>) -> bool {
    !y.is_empty() && y.iter().all(|&v| v > 0.0)
}

/// Fit `ln(y) = ln(a) + b · x` by least squares and extrapolate.
///
/// Parameters
/// ----------
/// - `x`, `y`: `ArrayView1<f64>`
///   Historical regressor and strictly positive response.
/// - `future_x`: `ArrayView1<f64>`
///   Points to predict.
///
/// Returns
/// -------
/// `TrendForecast`
///   - `predictions[k] = exp(ln(a) + b · future_x[k])`.
///   - `std_errors[k] = predictions[k] · sqrt(mean(rₗ²))` where `rₗ` are the
///     log-space residuals. This is a first-order propagation of log-space
///     dispersion into level space, not an exact interval.
///
/// Panics
/// ------
/// - Never panics. Non-positive `y` produces NaN through `ln`; callers must
///   check [`is_admissible`] first. Steep fits far from the data can
///   overflow to `∞`.
pub fn project(
    x: ArrayView1<f64>, y: ArrayView1<f64>, future_x: ArrayView1<f64>,
) -> TrendForecast {
    let log_y = y.mapv(f64::ln);
    let fit = LineFit::fit(x, log_y.view());

    let log_mse = if fit.n == 0 { 0.0 } else { fit.ssr(x, log_y.view()) / fit.n as f64 };
    let dispersion = log_mse.sqrt();

    let predictions = future_x.mapv(|x0| fit.predict(x0).exp());
    let std_errors = predictions.mapv(|p| p * dispersion);

    TrendForecast { predictions, std_errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify that an exact geometric series is extrapolated exactly with
    // zero dispersion.
    //
    // Given
    // -----
    // - y = 100 · 1.1^(x − 2020) for x = 2020..2023, future 2025.
    //
    // Expect
    // ------
    // - prediction = 100 · 1.1^5, standard error ≈ 0.
    fn project_extrapolates_geometric_growth() {
        // Arrange
        let x = array![2020.0, 2021.0, 2022.0, 2023.0];
        let y = x.mapv(|v| 100.0 * 1.1_f64.powf(v - 2020.0));
        let future = array![2025.0];

        // Act
        let out = project(x.view(), y.view(), future.view());

        // Assert
        let expected = 100.0 * 1.1_f64.powi(5);
        assert!((out.predictions[0] - expected).abs() < 1e-8, "got {}", out.predictions[0]);
        assert!(out.std_errors[0].abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Check that the standard error scales the prediction by the log-space
    // root-mean-square residual.
    //
    // Given
    // -----
    // - x = [0, 1, 2], y = [1, e, 1], so ln(y) = [0, 1, 0] has no trend.
    //
    // Expect
    // ------
    // - Flat prediction exp(1/3).
    // - std_error / prediction equals sqrt(mean(r²)) with r the residuals
    //   of ln(y) on x.
    fn project_standard_error_is_prediction_times_log_rms() {
        // Arrange
        let x = array![0.0, 1.0, 2.0];
        let y = array![1.0, std::f64::consts::E, 1.0];
        let future = array![3.0, 4.0];
        // ln(y) = [0, 1, 0]: slope 0, intercept 1/3, residuals [-1/3, 2/3, -1/3].
        let rms = ((1.0 / 9.0 + 4.0 / 9.0 + 1.0 / 9.0) / 3.0_f64).sqrt();

        // Act
        let out = project(x.view(), y.view(), future.view());

        // Assert
        for k in 0..2 {
            assert!((out.predictions[k] - (1.0_f64 / 3.0).exp()).abs() < 1e-12);
            assert!((out.std_errors[k] / out.predictions[k] - rms).abs() < 1e-12);
        }
    }

    #[test]
    fn admissibility_requires_strictly_positive_values() {
        assert!(is_admissible(array![1.0, 2.0].view()));
        assert!(!is_admissible(array![1.0, 0.0].view()));
        assert!(!is_admissible(array![-1.0, 2.0].view()));
        assert!(!is_admissible(ndarray::Array1::<f64>::zeros(0).view()));
    }
}
