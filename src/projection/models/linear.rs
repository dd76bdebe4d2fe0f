//! Linear trend: degree-1 least squares with a classical prediction-interval
//! standard error.
use ndarray::ArrayView1;

use crate::projection::models::{TrendForecast, ols::LineFit};

/// Fit a straight line to `(x, y)` and extrapolate it to `future_x`.
///
/// Parameters
/// ----------
/// - `x`, `y`: `ArrayView1<f64>`
///   Historical regressor (years) and response, equal length, sorted or not.
/// - `future_x`: `ArrayView1<f64>`
///   Points to predict. Any real value is accepted, including points before
///   the last historical year.
///
/// Returns
/// -------
/// `TrendForecast`
///   - `predictions[k] = intercept + slope · future_x[k]`.
///   - For `n > 2`, `std_errors[k] = sqrt(mse · (1 + 1/n + (x₀ − x̄)² / Sxx))`
///     with `mse = SSR / (n − 2)`. The leverage term is dropped when every
///     `x` is equal.
///   - For `n ≤ 2`, every standard error is `0.0` (no residual degrees of
///     freedom).
///
/// Notes
/// -----
/// - With two points the line interpolates them exactly; with one point (or a
///   degenerate design) it is flat through `mean(y)`.
pub fn project(x: ArrayView1<f64>, y: ArrayView1<f64>, future_x: ArrayView1<f64>) -> TrendForecast {
    let fit = LineFit::fit(x, y);
    let predictions = future_x.mapv(|x0| fit.predict(x0));

    let n = fit.n;
    if n <= 2 {
        return TrendForecast::with_zero_errors(predictions);
    }

    let n_f = n as f64;
    let mse = fit.ssr(x, y) / (n_f - 2.0);
    let std_errors = future_x.mapv(|x0| {
        let leverage =
            if fit.is_degenerate() { 0.0 } else { (x0 - fit.x_mean).powi(2) / fit.sxx };
        (mse * (1.0 + 1.0 / n_f + leverage)).sqrt()
    });

    TrendForecast { predictions, std_errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact extrapolation on a noiseless line.
    // - The prediction-interval standard error against a hand computation.
    // - The n ≤ 2 zero-error branch.
    //
    // Agreement with a reference least-squares solver is checked in the
    // integration tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify extrapolation and zero standard error on a perfect line.
    //
    // Given
    // -----
    // - `[(2020,100),(2021,110),(2022,120),(2023,130)]`, future `[2024, 2019]`.
    //
    // Expect
    // ------
    // - Predictions `[140, 90]` (backward extrapolation allowed).
    // - Standard errors `[0, 0]` because residuals vanish.
    fn project_extrapolates_exact_line_both_directions() {
        // Arrange
        let x = array![2020.0, 2021.0, 2022.0, 2023.0];
        let y = array![100.0, 110.0, 120.0, 130.0];
        let future = array![2024.0, 2019.0];

        // Act
        let out = project(x.view(), y.view(), future.view());

        // Assert
        assert!((out.predictions[0] - 140.0).abs() < 1e-9);
        assert!((out.predictions[1] - 90.0).abs() < 1e-9);
        assert!(out.std_errors.iter().all(|&se| se.abs() < 1e-6));
    }

    #[test]
    // Purpose
    // -------
    // Check the standard-error formula against a hand-computed value.
    //
    // Given
    // -----
    // - x = [0, 1, 2, 3], y = [1, 3, 2, 5]; future x₀ = 4.
    // - OLS: slope 1.1, intercept 1.1, SSR = 2.7, mse = 1.35,
    //   x̄ = 1.5, Sxx = 5.
    //
    // Expect
    // ------
    // - prediction = 5.5.
    // - se = sqrt(1.35 · (1 + 1/4 + 6.25/5)) = sqrt(3.375).
    fn project_standard_error_matches_prediction_interval_formula() {
        // Arrange
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = array![1.0, 3.0, 2.0, 5.0];
        let future = array![4.0];

        // Act
        let out = project(x.view(), y.view(), future.view());

        // Assert
        assert!((out.predictions[0] - 5.5).abs() < 1e-12);
        assert!((out.std_errors[0] - 3.375_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn project_with_two_points_has_zero_errors() {
        let x = array![2020.0, 2022.0];
        let y = array![5.0, 9.0];
        let future = array![2023.0, 2024.0];

        let out = project(x.view(), y.view(), future.view());

        assert!((out.predictions[0] - 11.0).abs() < 1e-9);
        assert!((out.predictions[1] - 13.0).abs() < 1e-9);
        assert_eq!(out.std_errors.to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn project_on_repeated_year_drops_leverage_term() {
        // A bootstrap resample that drew the same year three times.
        let x = array![2021.0, 2021.0, 2021.0];
        let y = array![4.0, 4.0, 7.0];
        let future = array![2030.0];

        let out = project(x.view(), y.view(), future.view());

        assert!((out.predictions[0] - 5.0).abs() < 1e-12);
        // SSR = 1 + 1 + 4 = 6, mse = 6, se = sqrt(6 · 4/3).
        assert!((out.std_errors[0] - 8.0_f64.sqrt()).abs() < 1e-12);
    }
}
