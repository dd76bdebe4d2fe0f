//! Projection method selector.
//!
//! [`ProjectionMethod`] names the trend model a caller asks for. It is a pure
//! label: whether the requested model can actually be fitted on a given
//! series (e.g. the exponential model on non-positive data) is decided later
//! by [`TrendModel::select`](crate::projection::models::TrendModel::select).
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::projection::errors::{ProjectionError, ProjectionResult};

/// Trend model requested for a projection run.
///
/// - `Linear`: degree-1 least squares with a classical prediction-interval
///   standard error.
/// - `Exponential`: log-linear least squares, `y = a·exp(b·x)`.
/// - `MovingAverage`: slope of the last `window` points extrapolated from the
///   last observed value.
///
/// Serialized (CSV, Python) as `linear`, `exponential`, `moving_average`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMethod {
    #[default]
    Linear,
    Exponential,
    MovingAverage,
}

impl ProjectionMethod {
    /// Every method, in the order used by method comparison.
    pub const ALL: [ProjectionMethod; 3] =
        [ProjectionMethod::Linear, ProjectionMethod::Exponential, ProjectionMethod::MovingAverage];

    /// Canonical lowercase name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionMethod::Linear => "linear",
            ProjectionMethod::Exponential => "exponential",
            ProjectionMethod::MovingAverage => "moving_average",
        }
    }
}

impl fmt::Display for ProjectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionMethod {
    type Err = ProjectionError;

    /// Parse a method name, case-insensitively.
    ///
    /// Accepts `linear`, `exponential`/`exp`, and
    /// `moving_average`/`moving-average`/`ma`.
    ///
    /// Errors
    /// ------
    /// - `ProjectionError::UnknownMethod` for any other name.
    fn from_str(s: &str) -> ProjectionResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(ProjectionMethod::Linear),
            "exponential" | "exp" => Ok(ProjectionMethod::Exponential),
            "moving_average" | "moving-average" | "ma" => Ok(ProjectionMethod::MovingAverage),
            _ => Err(ProjectionError::UnknownMethod { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_round_trip_through_from_str() {
        for method in ProjectionMethod::ALL {
            let parsed: ProjectionMethod = method.as_str().parse().expect("canonical name parses");
            assert_eq!(parsed, method);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that aliases and mixed case are accepted and unknown names are
    // rejected with the original spelling preserved.
    //
    // Given
    // -----
    // - "MA", " Exp ", and "cubic".
    //
    // Expect
    // ------
    // - MovingAverage, Exponential, and `UnknownMethod { name: "cubic" }`.
    fn from_str_accepts_aliases_and_rejects_unknown_names() {
        // Act
        let ma = "MA".parse::<ProjectionMethod>();
        let exp = " Exp ".parse::<ProjectionMethod>();
        let bad = "cubic".parse::<ProjectionMethod>();

        // Assert
        assert_eq!(ma, Ok(ProjectionMethod::MovingAverage));
        assert_eq!(exp, Ok(ProjectionMethod::Exponential));
        assert_eq!(bad, Err(ProjectionError::UnknownMethod { name: "cubic".to_string() }));
    }

    #[test]
    fn default_method_is_linear() {
        assert_eq!(ProjectionMethod::default(), ProjectionMethod::Linear);
    }
}
