//! summary — aggregate report over a projection table.
//!
//! [`ProjectionSummary`] collects the figures a run report needs: how many
//! entities were projected, which years, the per-year totals of point
//! estimates and bounds across entities, and the largest projected emitters
//! in the final projection year. `Display` renders the report as text.
use std::{collections::BTreeMap, fmt};

use crate::projection::batch::ProjectionTable;

/// Number of emitters listed in the final-year ranking by default.
pub const DEFAULT_TOP_N: usize = 10;

/// Column sums of one projection year across entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearTotal {
    pub year: i32,
    pub projected: f64,
    pub lower: f64,
    pub upper: f64,
}

/// One entry of the final-year ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct TopEmitter {
    pub entity: String,
    pub projected: f64,
}

/// ProjectionSummary — run-level aggregates of a [`ProjectionTable`].
///
/// Fields
/// ------
/// - `entity_count`: `usize`
///   Distinct projected entities.
/// - `years`: `Vec<i32>`
///   Distinct projection years, ascending.
/// - `totals`: `Vec<YearTotal>`
///   Per-year sums, aligned with `years`.
/// - `final_year`: `Option<i32>`
///   Largest projection year; `None` for an empty table.
/// - `top_emitters`: `Vec<TopEmitter>`
///   Highest point estimates in `final_year`, descending, at most `top_n`.
///   Ties keep table order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionSummary {
    pub entity_count: usize,
    pub years: Vec<i32>,
    pub totals: Vec<YearTotal>,
    pub final_year: Option<i32>,
    pub top_emitters: Vec<TopEmitter>,
}

impl ProjectionSummary {
    /// Summarize `table` with the default ranking length.
    pub fn from_table(table: &ProjectionTable) -> Self {
        Self::with_top_n(table, DEFAULT_TOP_N)
    }

    /// Summarize `table`, keeping at most `top_n` final-year emitters.
    pub fn with_top_n(table: &ProjectionTable, top_n: usize) -> Self {
        let mut by_year: BTreeMap<i32, YearTotal> = BTreeMap::new();
        for record in table {
            let total = by_year.entry(record.year).or_insert(YearTotal {
                year: record.year,
                projected: 0.0,
                lower: 0.0,
                upper: 0.0,
            });
            total.projected += record.projected_value;
            total.lower += record.lower_bound;
            total.upper += record.upper_bound;
        }

        let years: Vec<i32> = by_year.keys().copied().collect();
        let totals: Vec<YearTotal> = by_year.into_values().collect();
        let final_year = years.last().copied();

        let mut top_emitters: Vec<TopEmitter> = match final_year {
            Some(final_year) => table
                .iter()
                .filter(|r| r.year == final_year)
                .map(|r| TopEmitter { entity: r.entity.clone(), projected: r.projected_value })
                .collect(),
            None => Vec::new(),
        };
        top_emitters.sort_by(|a, b| b.projected.total_cmp(&a.projected));
        top_emitters.truncate(top_n);

        ProjectionSummary {
            entity_count: table.entities().len(),
            years,
            totals,
            final_year,
            top_emitters,
        }
    }
}

impl fmt::Display for ProjectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{rule}")?;
        writeln!(f, "PROJECTION SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Entities projected: {}", self.entity_count)?;
        writeln!(f, "Projection years: {:?}", self.years)?;

        writeln!(f)?;
        writeln!(f, "Total projected emissions (all entities):")?;
        for t in &self.totals {
            writeln!(f, "  {}: {:.2} (CI: [{:.2}, {:.2}])", t.year, t.projected, t.lower, t.upper)?;
        }

        if let Some(final_year) = self.final_year {
            writeln!(f)?;
            writeln!(f, "Top {} projected emitters in {final_year}:", self.top_emitters.len())?;
            for (rank, e) in self.top_emitters.iter().enumerate() {
                writeln!(f, "  {}. {}: {:.2}", rank + 1, e.entity, e.projected)?;
            }
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{core::method::ProjectionMethod, projector::ProjectionRecord};

    fn record(entity: &str, year: i32, value: f64) -> ProjectionRecord {
        ProjectionRecord {
            entity: entity.to_string(),
            year,
            projected_value: value,
            lower_bound: value - 1.0,
            upper_bound: value + 2.0,
            standard_error: 0.5,
            method: ProjectionMethod::Linear,
            historical_year_count: 4,
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify per-year totals and the final-year ranking.
    //
    // Given
    // -----
    // - Three entities projected to 2030 and 2031 (records out of year
    //   order for one entity).
    //
    // Expect
    // ------
    // - Years [2030, 2031]; totals equal the column sums.
    // - Ranking in 2031 is C > A > B, truncated to 2 with `top_n = 2`.
    fn summary_totals_equal_column_sums_and_rank_final_year() {
        // Arrange
        let table = ProjectionTable::new(vec![
            record("A", 2030, 10.0),
            record("A", 2031, 11.0),
            record("B", 2031, 4.0),
            record("B", 2030, 3.0),
            record("C", 2030, 20.0),
            record("C", 2031, 25.0),
        ]);

        // Act
        let summary = ProjectionSummary::with_top_n(&table, 2);

        // Assert
        assert_eq!(summary.entity_count, 3);
        assert_eq!(summary.years, vec![2030, 2031]);
        assert_eq!(summary.final_year, Some(2031));
        assert_eq!(
            summary.totals[0],
            YearTotal { year: 2030, projected: 33.0, lower: 30.0, upper: 39.0 }
        );
        assert_eq!(
            summary.totals[1],
            YearTotal { year: 2031, projected: 40.0, lower: 37.0, upper: 46.0 }
        );
        let ranked: Vec<_> = summary.top_emitters.iter().map(|e| e.entity.as_str()).collect();
        assert_eq!(ranked, vec!["C", "A"]);
    }

    #[test]
    fn empty_table_summary_has_no_final_year() {
        let summary = ProjectionSummary::from_table(&ProjectionTable::default());

        assert_eq!(summary.entity_count, 0);
        assert!(summary.totals.is_empty());
        assert_eq!(summary.final_year, None);
        assert!(summary.to_string().contains("Entities projected: 0"));
    }

    #[test]
    fn display_lists_totals_and_ranking() {
        let table = ProjectionTable::new(vec![record("Acme", 2035, 12.5)]);

        let text = ProjectionSummary::from_table(&table).to_string();

        assert!(text.contains("PROJECTION SUMMARY"));
        assert!(text.contains("2035: 12.50 (CI: [11.50, 14.50])"));
        assert!(text.contains("1. Acme: 12.50"));
    }
}
