//! Entity-year input table — validated company-year emission totals.
//!
//! Purpose
//! -------
//! Hold the flat table supplied by the upstream aggregation stage (one row
//! per entity-year) and expose it grouped by entity, in first-appearance
//! order, as [`HistoricalSeries`] slices.
//!
//! Key behaviors
//! -------------
//! - [`EntityYearTable::new`] validates every row once: non-empty entity
//!   identifier, finite and non-negative emissions, and unique
//!   `(entity, year)` pairs.
//! - Grouping preserves the order in which entities first appear so batch
//!   output is deterministic and mirrors the input.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed table never contains a repeated year for the same
//!   entity; duplicate rows are a precondition violation of the upstream
//!   stage and are reported as `ProjectionError::DuplicateYear` instead of
//!   being summed or silently dropped.
//! - Years need not be contiguous nor start at a common base year.
//!
//! Conventions
//! -----------
//! - Serialized column names are `entity_identifier`, `year`,
//!   `total_emissions`; `company` and `total_emissions_mt` are accepted as
//!   aliases when reading.
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::projection::{
    core::series::HistoricalSeries,
    errors::{ProjectionError, ProjectionResult},
};

/// One entity-year row of the input table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    /// Entity (company) identifier.
    #[serde(rename = "entity_identifier", alias = "company")]
    pub entity: String,
    /// Calendar year of the observation.
    pub year: i32,
    /// Total emissions of the entity in that year.
    #[serde(alias = "total_emissions_mt")]
    pub total_emissions: f64,
}

impl EmissionRecord {
    pub fn new(entity: impl Into<String>, year: i32, total_emissions: f64) -> Self {
        EmissionRecord { entity: entity.into(), year, total_emissions }
    }
}

/// EntityYearTable — validated input table grouped by entity.
///
/// Purpose
/// -------
/// Serve as the single entry point for historical data into the projection
/// engine. Every downstream component may assume clean, duplicate-free
/// per-entity series.
///
/// Fields
/// ------
/// - `rows`: `Vec<EmissionRecord>`
///   Input rows in their original order.
/// - `entities`: `Vec<String>`
///   Distinct entity identifiers in first-appearance order.
/// - `groups`: `Vec<Vec<usize>>`
///   Row indices of each entity, aligned with `entities`.
/// - `slots`: `HashMap<String, usize>`
///   Position of each entity in `entities` and `groups`.
///
/// Performance
/// -----------
/// - Construction is O(n) expected time with one hash lookup per row.
/// - Per-entity lookups ([`series`](Self::series),
///   [`distinct_years`](Self::distinct_years)) are O(1) expected.
/// - [`series`](Self::series) and [`iter_series`](Self::iter_series)
///   allocate one small series per entity on demand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityYearTable {
    rows: Vec<EmissionRecord>,
    entities: Vec<String>,
    groups: Vec<Vec<usize>>,
    slots: HashMap<String, usize>,
}

impl EntityYearTable {
    /// Validate rows and group them by entity.
    ///
    /// Parameters
    /// ----------
    /// - `rows`: `Vec<EmissionRecord>`
    ///   Entity-year rows in any order.
    ///
    /// Returns
    /// -------
    /// `ProjectionResult<EntityYearTable>`
    ///   The grouped table; an empty `rows` vector yields an empty table.
    ///
    /// Errors
    /// ------
    /// - `ProjectionError::EmptyEntity { row }`
    ///   The identifier is empty or whitespace.
    /// - `ProjectionError::NonFiniteValue { row, value }`
    ///   `total_emissions` is NaN or ±∞.
    /// - `ProjectionError::NegativeValue { row, value }`
    ///   `total_emissions < 0`.
    /// - `ProjectionError::DuplicateYear { entity, year }`
    ///   The entity already has a row for that year.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use emission_projections::projection::core::table::{EmissionRecord, EntityYearTable};
    /// let table = EntityYearTable::new(vec![
    ///     EmissionRecord::new("Acme", 2021, 12.0),
    ///     EmissionRecord::new("Borealis", 2020, 4.0),
    ///     EmissionRecord::new("Acme", 2020, 10.0),
    /// ])?;
    /// assert_eq!(table.entities(), &["Acme".to_string(), "Borealis".to_string()]);
    /// assert_eq!(table.distinct_years("Acme"), 2);
    /// # Ok::<(), emission_projections::projection::errors::ProjectionError>(())
    /// ```
    pub fn new(rows: Vec<EmissionRecord>) -> ProjectionResult<Self> {
        let mut entities: Vec<String> = Vec::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut seen: HashSet<(&str, i32)> = HashSet::with_capacity(rows.len());

        for (row, record) in rows.iter().enumerate() {
            if record.entity.trim().is_empty() {
                return Err(ProjectionError::EmptyEntity { row });
            }
            let value = record.total_emissions;
            if !value.is_finite() {
                return Err(ProjectionError::NonFiniteValue { row, value });
            }
            if value < 0.0 {
                return Err(ProjectionError::NegativeValue { row, value });
            }
            if !seen.insert((record.entity.as_str(), record.year)) {
                return Err(ProjectionError::DuplicateYear {
                    entity: record.entity.clone(),
                    year: record.year,
                });
            }

            let slot = match slots.get(record.entity.as_str()) {
                Some(&slot) => slot,
                None => {
                    entities.push(record.entity.clone());
                    groups.push(Vec::new());
                    slots.insert(record.entity.clone(), groups.len() - 1);
                    groups.len() - 1
                }
            };
            groups[slot].push(row);
        }

        Ok(EntityYearTable { rows, entities, groups, slots })
    }

    /// Input rows in their original order.
    pub fn rows(&self) -> &[EmissionRecord] {
        &self.rows
    }

    /// Distinct entity identifiers in first-appearance order.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct years reported by `entity` (0 when absent).
    ///
    /// Equal to the entity's row count, since construction rejects repeated
    /// years.
    pub fn distinct_years(&self, entity: &str) -> usize {
        self.group(entity).map_or(0, <[usize]>::len)
    }

    /// Historical series of `entity`, or `None` if it has no rows.
    pub fn series(&self, entity: &str) -> Option<HistoricalSeries> {
        self.group(entity).map(|idx| self.build_series(idx))
    }

    /// Every entity with its historical series, in first-appearance order.
    pub fn iter_series(&self) -> impl Iterator<Item = (&str, HistoricalSeries)> + '_ {
        self.entities
            .iter()
            .zip(self.groups.iter())
            .map(|(entity, idx)| (entity.as_str(), self.build_series(idx)))
    }

    fn group(&self, entity: &str) -> Option<&[usize]> {
        self.slots.get(entity).map(|&slot| self.groups[slot].as_slice())
    }

    fn build_series(&self, idx: &[usize]) -> HistoricalSeries {
        HistoricalSeries::from_points(
            idx.iter().map(|&i| (self.rows[i].year, self.rows[i].total_emissions)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Grouping order and per-entity series extraction.
    // - Each validation branch of `EntityYearTable::new`.
    //
    // They intentionally DO NOT cover:
    // - CSV parsing of rows, which is exercised in `projection::io`.
    // -------------------------------------------------------------------------

    fn rows() -> Vec<EmissionRecord> {
        vec![
            EmissionRecord::new("Acme", 2022, 14.0),
            EmissionRecord::new("Borealis", 2020, 4.0),
            EmissionRecord::new("Acme", 2020, 10.0),
            EmissionRecord::new("Acme", 2021, 12.0),
        ]
    }

    #[test]
    // Purpose
    // -------
    // Verify that entities are grouped in first-appearance order and that
    // each series is sorted by year.
    //
    // Given
    // -----
    // - Acme rows for 2022, 2020, 2021 interleaved with one Borealis row.
    //
    // Expect
    // ------
    // - `entities() == ["Acme", "Borealis"]`.
    // - Acme series years `[2020, 2021, 2022]` with values `[10, 12, 14]`.
    fn new_groups_entities_in_first_appearance_order() {
        // Act
        let table = EntityYearTable::new(rows()).expect("valid rows");

        // Assert
        assert_eq!(table.entities(), &["Acme".to_string(), "Borealis".to_string()]);
        let acme = table.series("Acme").expect("Acme present");
        assert_eq!(acme.years(), &[2020, 2021, 2022]);
        assert_eq!(acme.values(), &[10.0, 12.0, 14.0]);
        assert_eq!(table.distinct_years("Acme"), 3);
        assert_eq!(table.distinct_years("Borealis"), 1);
        assert_eq!(table.distinct_years("Nobody"), 0);
        assert!(table.series("Nobody").is_none());
    }

    #[test]
    fn iter_series_visits_every_entity_once() {
        let table = EntityYearTable::new(rows()).expect("valid rows");

        let visited: Vec<(&str, usize)> = table.iter_series().map(|(e, s)| (e, s.len())).collect();

        assert_eq!(visited, vec![("Acme", 3), ("Borealis", 1)]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a repeated `(entity, year)` pair is rejected rather than
    // summed or overwritten.
    //
    // Given
    // -----
    // - Two Acme rows for 2021.
    //
    // Expect
    // ------
    // - `DuplicateYear { entity: "Acme", year: 2021 }`.
    fn new_rejects_duplicate_entity_year() {
        // Arrange
        let mut input = rows();
        input.push(EmissionRecord::new("Acme", 2021, 99.0));

        // Act
        let result = EntityYearTable::new(input);

        // Assert
        assert_eq!(
            result,
            Err(ProjectionError::DuplicateYear { entity: "Acme".to_string(), year: 2021 })
        );
    }

    #[test]
    fn new_rejects_invalid_rows_with_row_index() {
        let blank = vec![EmissionRecord::new("  ", 2020, 1.0)];
        assert_eq!(EntityYearTable::new(blank), Err(ProjectionError::EmptyEntity { row: 0 }));

        let negative =
            vec![EmissionRecord::new("A", 2020, 1.0), EmissionRecord::new("A", 2021, -2.0)];
        assert_eq!(
            EntityYearTable::new(negative),
            Err(ProjectionError::NegativeValue { row: 1, value: -2.0 })
        );

        let infinite = vec![EmissionRecord::new("A", 2020, f64::INFINITY)];
        match EntityYearTable::new(infinite) {
            Err(ProjectionError::NonFiniteValue { row: 0, value }) => assert!(value.is_infinite()),
            other => panic!("expected NonFiniteValue, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Check per-entity lookups on a large, interleaved table.
    //
    // Given
    // -----
    // - 2_000 entities with `i % 7 + 1` years each, rows interleaved year by
    //   year so every entity's rows are scattered across the input.
    //
    // Expect
    // ------
    // - First-appearance order `E0, E1, …`.
    // - Each entity's series and distinct-year count match its own rows.
    fn lookups_resolve_every_entity_of_a_large_table() {
        // Arrange
        let n_entities = 2_000;
        let years_of = |i: usize| i % 7 + 1;
        let mut input = Vec::new();
        for offset in 0..7 {
            for i in (0..n_entities).filter(|&i| offset < years_of(i)) {
                let year = 2000 + offset as i32;
                input.push(EmissionRecord::new(format!("E{i}"), year, (i + offset) as f64));
            }
        }

        // Act
        let table = EntityYearTable::new(input).expect("valid rows");

        // Assert
        assert_eq!(table.entities().len(), n_entities);
        for i in [0, 1, 6, 999, 1_234, n_entities - 1] {
            let entity = format!("E{i}");
            assert_eq!(table.entities()[i], entity);
            assert_eq!(table.distinct_years(&entity), years_of(i));
            let series = table.series(&entity).expect("entity present");
            assert_eq!(series.len(), years_of(i));
            assert_eq!(series.values()[0], i as f64);
        }
        assert_eq!(table.distinct_years("E2000"), 0);
    }

    #[test]
    fn empty_input_builds_empty_table() {
        let table = EntityYearTable::new(Vec::new()).expect("empty input is valid");
        assert!(table.is_empty());
        assert!(table.entities().is_empty());
        assert_eq!(table.iter_series().count(), 0);
    }
}
