//! bootstrap — percentile-bootstrap intervals for trend-model projections.
//!
//! Purpose
//! -------
//! Approximate the sampling distribution of a trend model's predictions by
//! resampling the historical `(x, y)` pairs with replacement, refitting the
//! model on every resample, and summarizing the resulting predictions per
//! future point.
//!
//! Key behaviors
//! -------------
//! - Each resample draws `n` indices uniformly with replacement, stably sorts
//!   the drawn pairs by `x` (repeated years stay adjacent and in draw order),
//!   and runs the model chosen by [`TrendModel::select`] for *that* resample.
//!   A resample whose years all coincide is handled by the zero-`Sxx` branch
//!   of the fit.
//! - Bounds are the `(1 − c)/2` and `1 − (1 − c)/2` percentiles of the
//!   resampled predictions, with linear interpolation between order
//!   statistics.
//! - Bounds are widened to contain the cross-sample mean, so
//!   `lower ≤ mean ≤ upper` holds for every future point.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x` and `y` have equal length `n ≥ 1`; callers gate on `n ≥ 2`.
//! - `n_samples ≥ 1` (validated by `ProjectionConfig::new`).
//! - Randomness comes only from the `rng` argument. [`entity_rng`] derives a
//!   reproducible per-entity generator from an optional base seed.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the percentile interpolation, seeded reproducibility,
//!   bound ordering across methods, and the zero-width interval of a
//!   constant series. Property-based checks of bound ordering live in
//!   `tests/property_bootstrap.rs`.
use ndarray::{Array1, Array2, ArrayView1};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::projection::{
    core::{config::ProjectionConfig, method::ProjectionMethod},
    models::TrendModel,
};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
const SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// BootstrapEstimate — per-future-point summary of the resampled predictions.
///
/// Fields
/// ------
/// - `mean`: `Array1<f64>`
///   Cross-sample mean prediction.
/// - `lower`, `upper`: `Array1<f64>`
///   Percentile bounds, widened to contain `mean`.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapEstimate {
    pub mean: Array1<f64>,
    pub lower: Array1<f64>,
    pub upper: Array1<f64>,
}

/// Resample, refit, and summarize a trend model's predictions.
///
/// Parameters
/// ----------
/// - `x`, `y`: `ArrayView1<f64>`
///   Historical years (as `f64`) and values, equal length, `n ≥ 1`.
/// - `future_x`: `ArrayView1<f64>`
///   Points to predict.
/// - `method`: [`ProjectionMethod`]
///   Trend family; routed per resample through [`TrendModel::select`].
/// - `config`: `&ProjectionConfig`
///   Supplies the resample count, the percentile ranks of the configured
///   confidence level, and the moving-average window.
/// - `rng`: `&mut R`
///   Source of the resampling indices.
///
/// Returns
/// -------
/// `BootstrapEstimate`
///   Arrays of length `future_x.len()`.
///
/// Panics
/// ------
/// - If `x` is empty (no index can be drawn).
pub fn bootstrap_projection<R: Rng + ?Sized>(
    x: ArrayView1<f64>, y: ArrayView1<f64>, future_x: ArrayView1<f64>, method: ProjectionMethod,
    config: &ProjectionConfig, rng: &mut R,
) -> BootstrapEstimate {
    let n = x.len();
    let n_samples = config.bootstrap_samples;
    let window = config.moving_average_window;
    let horizon = future_x.len();
    let mut samples = Array2::<f64>::zeros((n_samples, horizon));
    let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(n);

    for mut row in samples.rows_mut() {
        pairs.clear();
        pairs.extend((0..n).map(|_| {
            let i = rng.gen_range(0..n);
            (x[i], y[i])
        }));
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let x_b: Array1<f64> = pairs.iter().map(|&(xi, _)| xi).collect();
        let y_b: Array1<f64> = pairs.iter().map(|&(_, yi)| yi).collect();
        let model = TrendModel::select(method, y_b.view(), window);
        row.assign(&model.forecast(x_b.view(), y_b.view(), future_x).predictions);
    }

    summarize(&samples, config.percentile_ranks())
}

/// Column-wise mean and `(lower, upper)` percentile bounds of a
/// `n_samples × horizon` matrix.
fn summarize(samples: &Array2<f64>, (lower_rank, upper_rank): (f64, f64)) -> BootstrapEstimate {
    let horizon = samples.ncols();

    let mut mean = Array1::<f64>::zeros(horizon);
    let mut lower = Array1::<f64>::zeros(horizon);
    let mut upper = Array1::<f64>::zeros(horizon);

    for (k, column) in samples.columns().into_iter().enumerate() {
        let mut sorted = column.to_vec();
        sorted.sort_by(f64::total_cmp);

        let m = column.mean().unwrap_or(0.0);
        mean[k] = m;
        lower[k] = percentile(&sorted, lower_rank).min(m);
        upper[k] = percentile(&sorted, upper_rank).max(m);
    }

    BootstrapEstimate { mean, lower, upper }
}

/// Percentile of ascending `sorted` at `rank ∈ [0, 1]`, linearly
/// interpolating between the two nearest order statistics.
///
/// Returns `0.0` for an empty slice. `rank` is clamped to `[0, 1]`.
pub fn percentile(sorted: &[f64], rank: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        len => {
            let h = rank.clamp(0.0, 1.0) * (len - 1) as f64;
            let lo = h.floor() as usize;
            let hi = (lo + 1).min(len - 1);
            let frac = h - lo as f64;
            sorted[lo] + frac * (sorted[hi] - sorted[lo])
        }
    }
}

/// Generator for one entity's bootstrap draws.
///
/// With `Some(seed)` the generator is a pure function of the seed and the
/// entity identifier (FNV-1a), so batch results do not depend on entity
/// order. With `None` it is seeded from OS entropy.
pub fn entity_rng(seed: Option<u64>, entity: &str) -> StdRng {
    match seed {
        Some(seed) => {
            let hash = entity.bytes().fold(FNV_OFFSET_BASIS, |h, b| {
                (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
            });
            StdRng::seed_from_u64(seed.wrapping_mul(SEED_MIX) ^ hash)
        }
        None => StdRng::from_entropy(),
    }
}
