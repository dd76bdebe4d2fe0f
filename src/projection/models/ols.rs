//! Degree-1 least squares and the small summary statistics shared by the
//! trend models.
//!
//! The fit is computed in centered form (`slope = Sxy / Sxx`) so calendar
//! years around 2000 do not cost precision. A zero `Sxx` (every `x` equal,
//! which a bootstrap resample can produce) yields a flat line through
//! `mean(y)` instead of a division by zero.
use ndarray::ArrayView1;

/// `Sxx` values at or below this are treated as a degenerate design.
pub const SXX_TOL: f64 = 1e-12;

/// Least-squares line `y = intercept + slope · x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// Mean of the regressor used in the fit.
    pub x_mean: f64,
    /// Centered sum of squares `Σ(xᵢ − x̄)²`.
    pub sxx: f64,
    /// Number of points in the fit.
    pub n: usize,
}

impl LineFit {
    /// Fit `y` on `x` by ordinary least squares.
    ///
    /// Inputs must have equal length. An empty input gives the zero line;
    /// a degenerate design (`sxx ≤ SXX_TOL`) gives `slope = 0` and
    /// `intercept = mean(y)`.
    pub fn fit(x: ArrayView1<f64>, y: ArrayView1<f64>) -> LineFit {
        let n = x.len();
        let x_mean = mean(x);
        let y_mean = mean(y);

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            let dx = xi - x_mean;
            sxx += dx * dx;
            sxy += dx * (yi - y_mean);
        }

        let slope = if sxx > SXX_TOL { sxy / sxx } else { 0.0 };
        LineFit { slope, intercept: y_mean - slope * x_mean, x_mean, sxx, n }
    }

    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Residual sum of squares of the fit over `(x, y)`.
    pub fn ssr(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        x.iter().zip(y.iter()).map(|(&xi, &yi)| (yi - self.predict(xi)).powi(2)).sum()
    }

    /// Whether the regressor had no spread.
    pub fn is_degenerate(&self) -> bool {
        self.sxx <= SXX_TOL
    }
}

/// Arithmetic mean, `0.0` for an empty view.
pub fn mean(v: ArrayView1<f64>) -> f64 {
    v.mean().unwrap_or(0.0)
}

/// Population standard deviation (`ddof = 0`), `0.0` for an empty view.
pub fn population_std(v: ArrayView1<f64>) -> f64 {
    if v.is_empty() { 0.0 } else { v.std(0.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify slope and intercept on an exact line expressed in calendar
    // years.
    //
    // Given
    // -----
    // - `y = 3 + 2·(x − 2000)` at x = 2000..2004.
    //
    // Expect
    // ------
    // - `slope == 2`, prediction at 2010 equals 23, residuals vanish.
    fn fit_recovers_exact_line_on_calendar_years() {
        // Arrange
        let x = array![2000.0, 2001.0, 2002.0, 2003.0, 2004.0];
        let y = x.mapv(|v| 3.0 + 2.0 * (v - 2000.0));

        // Act
        let fit = LineFit::fit(x.view(), y.view());

        // Assert
        assert!((fit.slope - 2.0).abs() < 1e-10);
        assert!((fit.predict(2010.0) - 23.0).abs() < 1e-8);
        assert!(fit.ssr(x.view(), y.view()) < 1e-16);
        assert!((fit.sxx - 10.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a design with identical x values does not divide by zero.
    //
    // Given
    // -----
    // - x = [2021, 2021, 2021], y = [1, 2, 6].
    //
    // Expect
    // ------
    // - `slope == 0`, the line passes through `mean(y) = 3`, degenerate flag set.
    fn fit_on_constant_regressor_is_flat_through_mean() {
        // Arrange
        let x = array![2021.0, 2021.0, 2021.0];
        let y = array![1.0, 2.0, 6.0];

        // Act
        let fit = LineFit::fit(x.view(), y.view());

        // Assert
        assert_eq!(fit.slope, 0.0);
        assert!((fit.predict(2030.0) - 3.0).abs() < 1e-12);
        assert!(fit.is_degenerate());
    }

    #[test]
    fn summary_statistics_handle_empty_views() {
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(mean(empty.view()), 0.0);
        assert_eq!(population_std(empty.view()), 0.0);

        let fit = LineFit::fit(empty.view(), empty.view());
        assert_eq!(fit.n, 0);
        assert_eq!(fit.predict(5.0), 0.0);
    }

    #[test]
    fn population_std_uses_n_in_the_denominator() {
        let v = array![10.0, 12.0, 14.0];
        assert!((population_std(v.view()) - (8.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }
}
