use std::fmt;

/// A single protein entry read from the input FASTA.
///
/// Records are created once by the FASTA reader and never mutated afterwards; every
/// later stage of a run borrows them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceRecord {
    id: String,
    sequence: String,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Renders the record as a single-entry FASTA document (`>id\nSEQUENCE\n`).
    pub fn to_fasta_entry(&self) -> String {
        format!(">{}\n{}\n", self.id, self.sequence)
    }
}

impl fmt::Display for SequenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} aa)", self.id, self.sequence.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fasta_entry_has_header_and_trailing_newline() {
        let record = SequenceRecord::new("seq1", "MKTAYIAK");
        assert_eq!(record.to_fasta_entry(), ">seq1\nMKTAYIAK\n");
    }

    #[test]
    fn display_reports_identifier_and_length() {
        let record = SequenceRecord::new("lacZ", "MTMITDSL");
        assert_eq!(record.to_string(), "lacZ (8 aa)");
    }
}
