//! Projection configuration — explicit knobs threaded into every call.
//!
//! Purpose
//! -------
//! Collect the configuration surface of the projection engine in a single,
//! validated value so that the bootstrap estimator, per-entity projector, and
//! batch orchestrator receive their settings as parameters instead of reading
//! process-wide constants.
//!
//! Key behaviors
//! -------------
//! - [`ProjectionConfig::new`] validates the numeric knobs once; downstream
//!   code relies on `0 < confidence_level < 1`, `bootstrap_samples ≥ 1`,
//!   `moving_average_window ≥ 1`, and `min_historical_years ≥ 1`.
//! - `with_*` setters adjust the non-numeric switches (method, bootstrap
//!   flag, seed) without re-validation.
//! - [`ProjectionConfig::z_score`] derives the two-sided normal quantile for
//!   the configured confidence level.
//!
//! Conventions
//! -----------
//! - `seed = Some(s)` makes bootstrap draws reproducible: each entity gets a
//!   generator derived from `s` and its identifier. `None` draws from OS
//!   entropy.
//!
//! Testing notes
//! -------------
//! - Unit tests cover defaults, each validation branch, and the z-score at
//!   the default 95% level.
use statrs::distribution::{ContinuousCDF, Normal};

use crate::projection::{
    core::method::ProjectionMethod,
    errors::{ProjectionError, ProjectionResult},
};

/// Default two-sided confidence level for projection intervals.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;
/// Default number of bootstrap resamples per entity.
pub const DEFAULT_BOOTSTRAP_SAMPLES: usize = 1000;
/// Default minimum number of distinct historical years for an entity to be projected.
pub const DEFAULT_MIN_HISTORICAL_YEARS: usize = 3;
/// Default number of trailing points used by the moving-average model.
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 3;

/// ProjectionConfig — configuration for projection runs.
///
/// Purpose
/// -------
/// Bundle every setting consumed by the projection engine: interval
/// confidence, bootstrap effort, the minimum-history gate, the moving-average
/// window, the model selector, the bootstrap switch, and an optional RNG
/// seed.
///
/// Fields
/// ------
/// - `confidence_level`: `f64`
///   Two-sided confidence level of the reported bounds, in (0, 1).
/// - `bootstrap_samples`: `usize`
///   Number of resamples drawn by the bootstrap estimator, ≥ 1.
/// - `min_historical_years`: `usize`
///   Entities with fewer distinct years are skipped by the batch
///   orchestrator, ≥ 1.
/// - `moving_average_window`: `usize`
///   Trailing window of the moving-average model, ≥ 1.
/// - `method`: [`ProjectionMethod`]
///   Trend model used by batch and single-entity projections.
/// - `use_bootstrap`: `bool`
///   Percentile-bootstrap intervals when `true`, analytic intervals
///   otherwise.
/// - `seed`: `Option<u64>`
///   Base seed for reproducible bootstrap draws.
///
/// Invariants
/// ----------
/// - Values built through [`ProjectionConfig::new`] or `Default` satisfy the
///   ranges above. Fields are public for inspection; mutating them directly
///   bypasses validation.
///
/// Notes
/// -----
/// - The defaults mirror the engine's documented constants: 0.95, 1000, 3,
///   3, linear, bootstrap off, no seed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Two-sided confidence level of the reported bounds.
    pub confidence_level: f64,
    /// Number of bootstrap resamples.
    pub bootstrap_samples: usize,
    /// Minimum distinct historical years required by the batch gate.
    pub min_historical_years: usize,
    /// Trailing window of the moving-average model.
    pub moving_average_window: usize,
    /// Trend model selector.
    pub method: ProjectionMethod,
    /// Whether to derive bounds from the percentile bootstrap.
    pub use_bootstrap: bool,
    /// Optional base seed for bootstrap resampling.
    pub seed: Option<u64>,
}

impl ProjectionConfig {
    /// Construct a validated [`ProjectionConfig`].
    ///
    /// Parameters
    /// ----------
    /// - `confidence_level`: `f64`
    ///   Must be finite and satisfy `0 < confidence_level < 1`.
    /// - `bootstrap_samples`: `usize`
    ///   Must be at least 1.
    /// - `min_historical_years`: `usize`
    ///   Must be at least 1.
    /// - `moving_average_window`: `usize`
    ///   Must be at least 1.
    /// - `method`: [`ProjectionMethod`]
    ///   Trend model selector.
    /// - `use_bootstrap`: `bool`
    ///   Bootstrap switch.
    ///
    /// Returns
    /// -------
    /// `ProjectionResult<ProjectionConfig>`
    ///   The configuration with `seed = None`; use
    ///   [`with_seed`](Self::with_seed) for reproducible bootstrap runs.
    ///
    /// Errors
    /// ------
    /// - `ProjectionError::InvalidConfidenceLevel`
    /// - `ProjectionError::InvalidBootstrapSamples`
    /// - `ProjectionError::InvalidMinHistory`
    /// - `ProjectionError::InvalidWindow`
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use emission_projections::projection::core::config::ProjectionConfig;
    /// # use emission_projections::projection::core::method::ProjectionMethod;
    /// let config = ProjectionConfig::new(0.90, 500, 3, 3, ProjectionMethod::Exponential, true)?
    ///     .with_seed(7);
    /// assert_eq!(config.seed, Some(7));
    /// # Ok::<(), emission_projections::projection::errors::ProjectionError>(())
    /// ```
    pub fn new(
        confidence_level: f64, bootstrap_samples: usize, min_historical_years: usize,
        moving_average_window: usize, method: ProjectionMethod, use_bootstrap: bool,
    ) -> ProjectionResult<Self> {
        if !confidence_level.is_finite() || confidence_level <= 0.0 || confidence_level >= 1.0 {
            return Err(ProjectionError::InvalidConfidenceLevel { level: confidence_level });
        }
        if bootstrap_samples == 0 {
            return Err(ProjectionError::InvalidBootstrapSamples { samples: bootstrap_samples });
        }
        if min_historical_years == 0 {
            return Err(ProjectionError::InvalidMinHistory { years: min_historical_years });
        }
        if moving_average_window == 0 {
            return Err(ProjectionError::InvalidWindow { window: moving_average_window });
        }

        Ok(ProjectionConfig {
            confidence_level,
            bootstrap_samples,
            min_historical_years,
            moving_average_window,
            method,
            use_bootstrap,
            seed: None,
        })
    }

    /// Replace the trend model selector.
    pub fn with_method(mut self, method: ProjectionMethod) -> Self {
        self.method = method;
        self
    }

    /// Turn percentile-bootstrap intervals on or off.
    pub fn with_bootstrap(mut self, use_bootstrap: bool) -> Self {
        self.use_bootstrap = use_bootstrap;
        self
    }

    /// Fix the base seed used to derive per-entity bootstrap generators.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Two-sided standard-normal quantile `Φ⁻¹((1 + c) / 2)` for the
    /// configured confidence level `c` (≈ 1.959964 at 0.95).
    pub fn z_score(&self) -> f64 {
        Normal::standard().inverse_cdf((1.0 + self.confidence_level) / 2.0)
    }

    /// Lower and upper percentile ranks, in `[0, 1]`, of a two-sided interval
    /// at the configured confidence level.
    pub fn percentile_ranks(&self) -> (f64, f64) {
        let tail = (1.0 - self.confidence_level) / 2.0;
        (tail, 1.0 - tail)
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        ProjectionConfig {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            bootstrap_samples: DEFAULT_BOOTSTRAP_SAMPLES,
            min_historical_years: DEFAULT_MIN_HISTORICAL_YEARS,
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            method: ProjectionMethod::Linear,
            use_bootstrap: false,
            seed: None,
        }
    }
}
