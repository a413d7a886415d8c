use super::config::PipelineLayout;
use super::error::EngineError;
use crate::core::models::record::SequenceRecord;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Result of checking every record for its structure file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub directory: PathBuf,
    pub checked: usize,
    pub missing: Vec<String>,
}

impl AssetReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Converts an incomplete report into [`EngineError::MissingAssets`] carrying the
    /// full missing set.
    pub fn into_result(self) -> Result<(), EngineError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(EngineError::MissingAssets {
                directory: self.directory,
                ids: self.missing,
            })
        }
    }
}

/// Checks that `<structure_dir>/<id>.<ext>` exists as a regular file for every record.
///
/// Every record is visited; missing identifiers are collected in input order.
pub fn check_structures(records: &[SequenceRecord], layout: &PipelineLayout) -> AssetReport {
    if !layout.structure_dir.is_dir() {
        warn!(
            "Structure directory {:?} does not exist; no structure can be found.",
            layout.structure_dir
        );
    }

    let missing: Vec<String> = records
        .iter()
        .filter(|record| {
            let path = layout.structure_path(record.id());
            let present = path.is_file();
            if !present {
                debug!("No structure file at {:?}", path);
            }
            !present
        })
        .map(|record| record.id().to_string())
        .collect();

    AssetReport {
        directory: layout.structure_dir.clone(),
        checked: records.len(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{LayoutNames, PipelineLayout};
    use std::fs;
    use tempfile::tempdir;

    fn records(ids: &[&str]) -> Vec<SequenceRecord> {
        ids.iter().map(|id| SequenceRecord::new(*id, "MKT")).collect()
    }

    #[test]
    fn complete_when_every_structure_exists() {
        let dir = tempdir().unwrap();
        let layout = PipelineLayout::new(dir.path(), &LayoutNames::default());
        fs::create_dir_all(&layout.structure_dir).unwrap();
        fs::write(layout.structure_path("a"), "END\n").unwrap();
        fs::write(layout.structure_path("b"), "END\n").unwrap();

        let report = check_structures(&records(&["a", "b"]), &layout);
        assert!(report.is_complete());
        assert_eq!(report.checked, 2);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn reports_complete_missing_set_in_input_order() {
        let dir = tempdir().unwrap();
        let layout = PipelineLayout::new(dir.path(), &LayoutNames::default());
        fs::create_dir_all(&layout.structure_dir).unwrap();
        fs::write(layout.structure_path("b"), "END\n").unwrap();

        let report = check_structures(&records(&["c", "b", "a"]), &layout);
        assert_eq!(report.missing, vec!["c", "a"]);

        match report.into_result() {
            Err(EngineError::MissingAssets { ids, .. }) => assert_eq!(ids, vec!["c", "a"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn directory_named_like_a_structure_does_not_count() {
        let dir = tempdir().unwrap();
        let layout = PipelineLayout::new(dir.path(), &LayoutNames::default());
        fs::create_dir_all(layout.structure_path("a")).unwrap();

        let report = check_structures(&records(&["a"]), &layout);
        assert_eq!(report.missing, vec!["a"]);
    }

    #[test]
    fn absent_structure_directory_marks_everything_missing() {
        let dir = tempdir().unwrap();
        let layout = PipelineLayout::new(dir.path(), &LayoutNames::default());
        let report = check_structures(&records(&["a", "b"]), &layout);
        assert_eq!(report.missing, vec!["a", "b"]);
    }
}
