use crate::core::models::result::{RAW_REQUIRED_COLUMNS, RawResultRow, StandardResultRow};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("Cannot access result table '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "Result table '{path}' is missing required column(s): {columns}",
        path = path.display(),
        columns = columns.join(", ")
    )]
    MissingColumns { path: PathBuf, columns: Vec<String> },
    #[error("Invalid data in result table '{path}': {source}", path = path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Reads the predictor's raw result table.
///
/// The header is validated before any row is decoded; every missing required column is
/// reported at once. Columns beyond `id`, `sequence` and `Solubility_hat` are ignored.
pub fn read_raw_results<P: AsRef<Path>>(path: P) -> Result<Vec<RawResultRow>, ResultsError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ResultsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_raw_results_from(file, path)
}

fn read_raw_results_from<R: Read>(
    reader: R,
    source_path: &Path,
) -> Result<Vec<RawResultRow>, ResultsError> {
    let csv_error = |source: csv::Error| ResultsError::Csv {
        path: source_path.to_path_buf(),
        source,
    };

    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let missing: Vec<String> = RAW_REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ResultsError::MissingColumns {
            path: source_path.to_path_buf(),
            columns: missing,
        });
    }

    let rows = csv_reader
        .deserialize::<RawResultRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error)?;
    debug!("Read {} raw result row(s) from {:?}", rows.len(), source_path);
    Ok(rows)
}

/// Reshapes raw rows into the standardized schema, one output row per raw row.
pub fn normalize(rows: Vec<RawResultRow>, predictor: &str) -> Vec<StandardResultRow> {
    rows.into_iter()
        .map(|raw| StandardResultRow::from_raw(raw, predictor))
        .collect()
}

pub fn write_standard_results<W: Write>(
    rows: &[StandardResultRow],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the standardized table to `dest` atomically.
///
/// Rows go to a temporary file beside `dest`, which replaces `dest` only after the whole
/// table has been written and synced. On any error `dest` is left untouched.
pub fn persist_standard_results(
    rows: &[StandardResultRow],
    dest: &Path,
) -> Result<(), ResultsError> {
    let io_error = |source: io::Error| ResultsError::Io {
        path: dest.to_path_buf(),
        source,
    };

    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(parent).map_err(io_error)?;

    write_standard_results(rows, &mut staged).map_err(|source| ResultsError::Csv {
        path: dest.to_path_buf(),
        source,
    })?;
    staged.as_file().sync_all().map_err(io_error)?;
    staged.persist(dest).map_err(|e| io_error(e.error))?;

    debug!("Persisted {} standardized row(s) to {:?}", rows.len(), dest);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::result::{DEFAULT_PREDICTOR_NAME, STANDARD_COLUMNS};
    use std::fs;
    use tempfile::tempdir;

    fn raw(id: &str, seq: &str, score: f64) -> RawResultRow {
        RawResultRow {
            id: id.into(),
            sequence: seq.into(),
            solubility_hat: Some(score),
        }
    }

    #[test]
    fn reads_rows_and_ignores_extra_columns() {
        let table = "id,sequence,Solubility_hat,extra\nseq1,MKT,0.734,x\nseq2,AGV,0.1,y\n";
        let rows = read_raw_results_from(table.as_bytes(), Path::new("Output.csv")).unwrap();
        assert_eq!(rows, vec![raw("seq1", "MKT", 0.734), raw("seq2", "AGV", 0.1)]);
    }

    #[test]
    fn reports_every_missing_column() {
        let table = "id,score\nseq1,0.5\n";
        let err = read_raw_results_from(table.as_bytes(), Path::new("Output.csv")).unwrap_err();
        match err {
            ResultsError::MissingColumns { columns, .. } => {
                assert_eq!(columns, vec!["sequence", "Solubility_hat"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_score_is_kept_as_absent_and_written_as_na() {
        let table = "id,sequence,Solubility_hat\nseq1,MKT,0.7\nseq2,AGV,\n";
        let rows = read_raw_results_from(table.as_bytes(), Path::new("Output.csv")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].solubility_hat, None);

        let mut buffer = Vec::new();
        write_standard_results(&normalize(rows, DEFAULT_PREDICTOR_NAME), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "seq1,MKT,GATSol,0.7,NA,NA");
        assert_eq!(lines[2], "seq2,AGV,GATSol,NA,NA,NA");
    }

    #[test]
    fn non_numeric_score_is_a_csv_error() {
        let table = "id,sequence,Solubility_hat\nseq1,MKT,high\n";
        let err = read_raw_results_from(table.as_bytes(), Path::new("Output.csv")).unwrap_err();
        assert!(matches!(err, ResultsError::Csv { .. }));
    }

    #[test]
    fn missing_table_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = read_raw_results(dir.path().join("Output.csv")).unwrap_err();
        assert!(matches!(err, ResultsError::Io { .. }));
    }

    #[test]
    fn standardized_table_has_fixed_columns_and_na_probabilities() {
        let rows = normalize(vec![raw("seq1", "MKT", 0.734)], DEFAULT_PREDICTOR_NAME);
        let mut buffer = Vec::new();
        write_standard_results(&rows, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), STANDARD_COLUMNS.join(","));
        assert_eq!(lines.next().unwrap(), "seq1,MKT,GATSol,0.734,NA,NA");
        assert!(lines.next().is_none());
    }

    #[test]
    fn persist_replaces_destination_and_leaves_no_stray_files() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.csv");
        fs::write(&dest, "stale").unwrap();

        let rows = normalize(
            vec![raw("a", "MK", 0.5), raw("b", "TA", 0.25)],
            DEFAULT_PREDICTOR_NAME,
        );
        persist_standard_results(&rows, &dest).unwrap();

        let content = fs::read_to_string(&dest).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("b,TA,GATSol,0.25,NA,NA"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn persist_into_missing_directory_fails_without_output() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing").join("out.csv");
        let rows = normalize(vec![raw("a", "MK", 0.5)], DEFAULT_PREDICTOR_NAME);
        let err = persist_standard_results(&rows, &dest).unwrap_err();
        assert!(matches!(err, ResultsError::Io { .. }));
        assert!(!dest.exists());
    }
}
