//! Historical series — one entity's (year, value) observations.
//!
//! Purpose
//! -------
//! Represent the slice of the entity-year table that belongs to a single
//! entity, sorted chronologically and exposed as `f64` arrays ready for the
//! trend models.
//!
//! Invariants & assumptions
//! ------------------------
//! - Years are unique within a series. [`HistoricalSeries::from_points`]
//!   keeps the first occurrence of a repeated year; the entity-year table
//!   rejects duplicates before a series is ever built from it, so the
//!   dedup branch only matters for series assembled by hand.
//! - Points are stored in ascending year order regardless of input order.
//! - Values are not validated here; finiteness and non-negativity are
//!   enforced at the table boundary.
use ndarray::Array1;

/// HistoricalSeries — chronologically ordered observations of one entity.
///
/// Fields
/// ------
/// - `years`: `Vec<i32>`
///   Ascending, unique calendar years.
/// - `values`: `Vec<f64>`
///   Observations aligned one-to-one with `years`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoricalSeries {
    years: Vec<i32>,
    values: Vec<f64>,
}

impl HistoricalSeries {
    /// Build a series from `(year, value)` pairs in any order.
    ///
    /// The pairs are stably sorted by year; for a repeated year only the
    /// first pair in input order survives.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use emission_projections::projection::core::series::HistoricalSeries;
    /// let series = HistoricalSeries::from_points([(2022, 14.0), (2020, 10.0), (2021, 12.0)]);
    /// assert_eq!(series.years(), &[2020, 2021, 2022]);
    /// assert_eq!(series.values(), &[10.0, 12.0, 14.0]);
    /// ```
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let mut pairs: Vec<(i32, f64)> = points.into_iter().collect();
        pairs.sort_by_key(|&(year, _)| year);
        pairs.dedup_by_key(|&mut (year, _)| year);

        let (years, values) = pairs.into_iter().unzip();
        HistoricalSeries { years, values }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Ascending observation years.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Observations aligned with [`years`](Self::years).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Years as the regressor `x` used by the trend models.
    pub fn x(&self) -> Array1<f64> {
        self.years.iter().map(|&year| f64::from(year)).collect()
    }

    /// Values as the response `y` used by the trend models.
    pub fn y(&self) -> Array1<f64> {
        Array1::from(self.values.clone())
    }
}
