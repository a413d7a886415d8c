use crate::core::io::pdb::{TruncationStats, truncate_chain};
use crate::engine::error::EngineError;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, instrument};

/// Writes a copy of `input` to `output` without the coordinate records of `chain_id`
/// beyond residue `max_residue`.
///
/// The output is staged beside its destination and only moved into place once complete.
#[instrument(skip_all, name = "truncate_workflow", fields(chain = %chain_id, max_residue))]
pub fn run(
    input: &Path,
    output: &Path,
    chain_id: char,
    max_residue: i32,
) -> Result<TruncationStats, EngineError> {
    let reader = BufReader::new(File::open(input).map_err(|e| EngineError::io(input, e))?);

    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staged = NamedTempFile::new_in(parent).map_err(|e| EngineError::io(output, e))?;
    let mut writer = BufWriter::new(staged);

    let stats = truncate_chain(reader, &mut writer, chain_id, max_residue)
        .map_err(|e| EngineError::io(input, e))?;
    let staged = writer
        .into_inner()
        .map_err(|e| EngineError::io(output, e.into_error()))?;
    staged
        .persist(output)
        .map_err(|e| EngineError::io(output, e.error))?;

    info!(
        "Truncated {:?} to residue {} of chain {} -> {:?} ({} coordinate line(s) removed)",
        input, max_residue, chain_id, output, stats.coordinates_dropped
    );
    Ok(stats)
}
