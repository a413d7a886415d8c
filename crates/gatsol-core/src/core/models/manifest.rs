use super::record::SequenceRecord;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("Input contains no sequence records")]
    Empty,

    #[error("Duplicate sequence identifiers: {}", .0.join(", "))]
    DuplicateIdentifiers(Vec<String>),
}

/// The ordered set of records submitted to a single prediction run.
///
/// Row order always matches the input FASTA, and identifiers are unique: the external
/// pipeline writes one file per identifier, so a repeated identifier would silently
/// overwrite an earlier record's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunManifest {
    records: Vec<SequenceRecord>,
}

impl RunManifest {
    /// Builds a manifest, rejecting empty input and duplicate identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::DuplicateIdentifiers`] listing every repeated identifier
    /// once, in the order it was first repeated.
    pub fn from_records(records: Vec<SequenceRecord>) -> Result<Self, ManifestError> {
        if records.is_empty() {
            return Err(ManifestError::Empty);
        }

        let mut seen = HashSet::with_capacity(records.len());
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for record in &records {
            if !seen.insert(record.id()) && reported.insert(record.id()) {
                duplicates.push(record.id().to_string());
            }
        }

        if !duplicates.is_empty() {
            return Err(ManifestError::DuplicateIdentifiers(duplicates));
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(SequenceRecord::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, seq: &str) -> SequenceRecord {
        SequenceRecord::new(id, seq)
    }

    #[test]
    fn preserves_input_order() {
        let manifest =
            RunManifest::from_records(vec![rec("seq2", "AGV"), rec("seq1", "MKT")]).unwrap();
        let ids: Vec<_> = manifest.ids().collect();
        assert_eq!(ids, vec!["seq2", "seq1"]);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(
            RunManifest::from_records(vec![]),
            Err(ManifestError::Empty)
        );
    }

    #[test]
    fn reports_each_duplicate_once() {
        let result = RunManifest::from_records(vec![
            rec("a", "M"),
            rec("b", "M"),
            rec("a", "K"),
            rec("b", "K"),
            rec("a", "T"),
            rec("c", "T"),
        ]);
        assert_eq!(
            result,
            Err(ManifestError::DuplicateIdentifiers(vec![
                "a".to_string(),
                "b".to_string()
            ]))
        );
    }
}
