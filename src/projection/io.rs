//! io — CSV import of entity-year data and export/import of projections.
//!
//! Input columns: `entity_identifier, year, total_emissions` (`company` and
//! `total_emissions_mt` are accepted as aliases). Output columns:
//! `entity_identifier, year, projected_value, lower_bound, upper_bound,
//! standard_error, method, historical_year_count`.
//!
//! The reader/writer variants work on any `Read`/`Write`; the path variants
//! wrap them with buffered files and log what they did. Failing to open or
//! create a file yields `ProjectionError::Io` naming the path.
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::Context;
use tracing::info;

use crate::projection::{
    batch::ProjectionTable,
    core::table::{EmissionRecord, EntityYearTable},
    errors::ProjectionResult,
    projector::ProjectionRecord,
};

/// Parse and validate an entity-year table from CSV.
///
/// Errors
/// ------
/// - `ProjectionError::Csv` for malformed rows or missing columns.
/// - Any validation error of [`EntityYearTable::new`].
pub fn read_entity_year<R: Read>(reader: R) -> ProjectionResult<EntityYearTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let rows = csv_reader.deserialize::<EmissionRecord>().collect::<Result<Vec<_>, _>>()?;
    EntityYearTable::new(rows)
}

/// [`read_entity_year`] from a file path.
pub fn read_entity_year_csv<P: AsRef<Path>>(path: P) -> ProjectionResult<EntityYearTable> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let table = read_entity_year(BufReader::new(file))?;
    info!(
        path = %path.display(),
        rows = table.len(),
        entities = table.entities().len(),
        "loaded entity-year table"
    );
    Ok(table)
}

/// Write projection records as CSV with a header row.
pub fn write_projections<W: Write>(table: &ProjectionTable, writer: W) -> ProjectionResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in table {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read projection records written by [`write_projections`].
pub fn read_projections<R: Read>(reader: R) -> ProjectionResult<ProjectionTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let records = csv_reader.deserialize::<ProjectionRecord>().collect::<Result<Vec<_>, _>>()?;
    Ok(ProjectionTable::new(records))
}

/// Save a projection table to `path`, creating or truncating the file.
pub fn save_projections<P: AsRef<Path>>(table: &ProjectionTable, path: P) -> ProjectionResult<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_projections(table, BufWriter::new(file))?;
    info!(path = %path.display(), records = table.len(), "saved projections");
    Ok(())
}

/// Load a projection table previously written by [`save_projections`].
pub fn load_projections<P: AsRef<Path>>(path: P) -> ProjectionResult<ProjectionTable> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let table = read_projections(BufReader::new(file))?;
    info!(path = %path.display(), records = table.len(), "loaded projections");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{core::method::ProjectionMethod, errors::ProjectionError};

    #[test]
    // Purpose
    // -------
    // Verify that both the canonical and the aliased input headers parse.
    //
    // Given
    // -----
    // - One CSV with `entity_identifier,year,total_emissions`.
    // - One CSV with `company,year,total_emissions_mt`.
    //
    // Expect
    // ------
    // - Identical tables grouping two entities in first-appearance order.
    fn read_entity_year_accepts_canonical_and_aliased_headers() {
        // Arrange
        let canonical = "entity_identifier,year,total_emissions\n\
                         Acme,2020,10.5\nBorealis,2020,3\nAcme,2021,11\n";
        let aliased = "company,year,total_emissions_mt\n\
                       Acme,2020,10.5\nBorealis,2020,3\nAcme,2021,11\n";

        // Act
        let a = read_entity_year(canonical.as_bytes()).expect("canonical parses");
        let b = read_entity_year(aliased.as_bytes()).expect("aliased parses");

        // Assert
        assert_eq!(a, b);
        assert_eq!(a.entities(), &["Acme".to_string(), "Borealis".to_string()]);
        assert_eq!(a.distinct_years("Acme"), 2);
    }

    #[test]
    fn read_entity_year_rejects_duplicate_years() {
        let input = "entity_identifier,year,total_emissions\nAcme,2020,1\nAcme,2020,2\n";

        let err = read_entity_year(input.as_bytes()).unwrap_err();

        assert_eq!(err, ProjectionError::DuplicateYear { entity: "Acme".into(), year: 2020 });
    }

    #[test]
    fn read_entity_year_reports_malformed_values_as_csv_errors() {
        let input = "entity_identifier,year,total_emissions\nAcme,twenty,1\n";

        let err = read_entity_year(input.as_bytes()).unwrap_err();

        assert!(matches!(err, ProjectionError::Csv(_)), "{err:?}");
    }

    #[test]
    fn written_projections_use_documented_header_and_method_names() {
        let table = ProjectionTable::new(vec![ProjectionRecord {
            entity: "Acme".into(),
            year: 2030,
            projected_value: 1.5,
            lower_bound: 1.0,
            upper_bound: 2.0,
            standard_error: 0.25,
            method: ProjectionMethod::MovingAverage,
            historical_year_count: 6,
        }]);
        let mut buf = Vec::new();

        write_projections(&table, &mut buf).expect("write succeeds");

        let text = String::from_utf8(buf).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "entity_identifier,year,projected_value,lower_bound,upper_bound,\
                 standard_error,method,historical_year_count"
            )
        );
        assert_eq!(lines.next(), Some("Acme,2030,1.5,1.0,2.0,0.25,moving_average,6"));
    }

    #[test]
    fn load_projections_on_missing_file_is_io_error_naming_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = load_projections(dir.path().join("absent.csv")).unwrap_err();

        match err {
            ProjectionError::Io(msg) => assert!(msg.starts_with("opening "), "{msg}"),
            other => panic!("expected Io variant, got {other:?}"),
        }
    }

    #[test]
    fn file_errors_name_the_offending_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing_dir = dir.path().join("no_such_dir");

        let read = read_entity_year_csv(missing_dir.join("company_year.csv")).unwrap_err();
        let save = save_projections(&ProjectionTable::default(), missing_dir.join("out.csv"))
            .unwrap_err();

        assert!(read.to_string().contains("company_year.csv"), "{read}");
        assert!(save.to_string().contains("creating"), "{save}");
        assert!(save.to_string().contains("out.csv"), "{save}");
    }
}
