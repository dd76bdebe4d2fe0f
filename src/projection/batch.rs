//! batch — projection of every entity in an entity-year table.
//!
//! Purpose
//! -------
//! Drive the per-entity projector across a whole [`EntityYearTable`]: apply
//! the minimum-history gate, give each entity its own generator, and
//! concatenate the results into a [`ProjectionTable`]. A comparison entry
//! point runs all three trend families on a single entity.
//!
//! Key behaviors
//! -------------
//! - Entities with fewer than `config.min_historical_years` distinct years
//!   are skipped silently (a `debug!` line is emitted).
//! - Output order is entity first-appearance order, then future-year order.
//! - No qualifying entity yields an empty table, not an error.
//! - Progress is logged at `info` level every [`PROGRESS_EVERY`] projected
//!   entities, plus a closing summary line.
//!
//! Invariants & assumptions
//! ------------------------
//! - Each entity reads only its own series. With `config.seed = Some(s)`
//!   an entity's bootstrap draws depend only on `s` and its identifier.
use tracing::{debug, info};

use crate::projection::{
    bootstrap::entity_rng,
    core::{config::ProjectionConfig, method::ProjectionMethod, table::EntityYearTable},
    projector::{ProjectionRecord, project_entity},
};

/// Entities projected between two progress log lines.
pub const PROGRESS_EVERY: usize = 10;

/// ProjectionTable — write-once concatenation of projection records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectionTable {
    records: Vec<ProjectionRecord>,
}

impl ProjectionTable {
    pub fn new(records: Vec<ProjectionRecord>) -> Self {
        ProjectionTable { records }
    }

    pub fn records(&self) -> &[ProjectionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectionRecord> {
        self.records.iter()
    }

    /// Distinct entity identifiers in record order.
    pub fn entities(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for record in &self.records {
            if !out.contains(&record.entity.as_str()) {
                out.push(record.entity.as_str());
            }
        }
        out
    }

    /// Records of one entity, in year order as produced.
    pub fn for_entity<'a>(
        &'a self, entity: &'a str,
    ) -> impl Iterator<Item = &'a ProjectionRecord> + 'a {
        self.records.iter().filter(move |r| r.entity == entity)
    }
}

impl<'a> IntoIterator for &'a ProjectionTable {
    type Item = &'a ProjectionRecord;
    type IntoIter = std::slice::Iter<'a, ProjectionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Project every entity with enough history.
///
/// Parameters
/// ----------
/// - `table`: `&EntityYearTable`
///   Validated historical data.
/// - `future_years`: `&[i32]`
///   Years to project for each entity.
/// - `config`: `&ProjectionConfig`
///   Supplies the method, bootstrap switch, history gate, and seed.
///
/// Returns
/// -------
/// `ProjectionTable`
///   Possibly empty; never an error.
///
/// Examples
/// --------
/// ```rust
/// # use emission_projections::projection::{
/// #     batch::project_all,
/// #     core::{config::ProjectionConfig, table::{EmissionRecord, EntityYearTable}},
/// # };
/// let table = EntityYearTable::new(vec![
///     EmissionRecord::new("Acme", 2020, 10.0),
///     EmissionRecord::new("Acme", 2021, 12.0),
///     EmissionRecord::new("Acme", 2022, 14.0),
///     EmissionRecord::new("Tiny", 2022, 1.0),
/// ])?;
/// let out = project_all(&table, &[2023, 2024], &ProjectionConfig::default());
/// assert_eq!(out.len(), 2);
/// assert_eq!(out.entities(), vec!["Acme"]);
/// # Ok::<(), emission_projections::projection::errors::ProjectionError>(())
/// ```
pub fn project_all(
    table: &EntityYearTable, future_years: &[i32], config: &ProjectionConfig,
) -> ProjectionTable {
    info!(
        entities = table.entities().len(),
        horizon = future_years.len(),
        method = %config.method,
        bootstrap = config.use_bootstrap,
        "projecting entity-year table"
    );

    let mut records = Vec::new();
    let mut projected = 0usize;
    let mut skipped = 0usize;

    for (entity, series) in table.iter_series() {
        let years = table.distinct_years(entity);
        if years < config.min_historical_years {
            debug!(entity, years, min = config.min_historical_years, "skipping entity");
            skipped += 1;
            continue;
        }

        let mut rng = entity_rng(config.seed, entity);
        let entity_records = project_entity(
            entity,
            &series,
            future_years,
            config.method,
            config.use_bootstrap,
            config,
            &mut rng,
        );
        if entity_records.is_empty() {
            skipped += 1;
            continue;
        }
        records.extend(entity_records);

        projected += 1;
        if projected % PROGRESS_EVERY == 0 {
            info!(projected, "projection progress");
        }
    }

    info!(projected, skipped, records = records.len(), "projection finished");
    ProjectionTable::new(records)
}

/// Project one entity with every method, bootstrap disabled.
///
/// Records are concatenated in [`ProjectionMethod::ALL`] order (linear,
/// exponential, moving average). An entity absent from `table`, or with
/// fewer than two points, yields an empty table. The history gate of
/// `config` does not apply here.
pub fn compare_methods(
    table: &EntityYearTable, entity: &str, future_years: &[i32], config: &ProjectionConfig,
) -> ProjectionTable {
    let Some(series) = table.series(entity) else {
        debug!(entity, "entity not found for method comparison");
        return ProjectionTable::default();
    };

    let mut rng = entity_rng(config.seed, entity);
    let records = ProjectionMethod::ALL
        .into_iter()
        .flat_map(|method| {
            project_entity(entity, &series, future_years, method, false, config, &mut rng)
        })
        .collect();

    ProjectionTable::new(records)
}
