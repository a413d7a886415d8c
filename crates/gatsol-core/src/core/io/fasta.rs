use crate::core::models::record::SequenceRecord;
use bio::io::fasta;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("Cannot read FASTA file '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed FASTA record #{record}: {message}")]
    Parse { record: usize, message: String },
    #[error("FASTA input contains no records")]
    Empty,
}

/// Parses every record of a FASTA file, preserving file order.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>, FastaError> {
    let path = path.as_ref();
    debug!("Reading FASTA records from {:?}", path);
    let file = File::open(path).map_err(|source| FastaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_from(file)
}

/// Parses FASTA records from any reader.
///
/// The identifier is the first whitespace-delimited token of each header line; the
/// description is discarded. Residues are upper-cased.
pub fn read_from<R: Read>(reader: R) -> Result<Vec<SequenceRecord>, FastaError> {
    let reader = fasta::Reader::new(reader);
    let mut records = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record_num = index + 1;
        let record = result.map_err(|e| FastaError::Parse {
            record: record_num,
            message: e.to_string(),
        })?;
        record.check().map_err(|msg| FastaError::Parse {
            record: record_num,
            message: msg.to_string(),
        })?;

        let sequence = String::from_utf8(record.seq().to_ascii_uppercase()).map_err(|e| {
            FastaError::Parse {
                record: record_num,
                message: e.to_string(),
            }
        })?;
        records.push(SequenceRecord::new(record.id(), sequence));
    }

    if records.is_empty() {
        return Err(FastaError::Empty);
    }
    debug!("Parsed {} FASTA record(s).", records.len());
    Ok(records)
}
