use super::config::PipelineLayout;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::io::manifest::write_manifest_to_path;
use crate::core::models::manifest::RunManifest;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedInputs {
    pub fasta_files: Vec<PathBuf>,
    pub manifest_path: PathBuf,
}

/// Creates `path` and its parents if needed.
///
/// An existing directory is accepted as-is; an existing non-directory is an error.
pub fn ensure_dir(path: &Path) -> Result<(), EngineError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(EngineError::io(
            path,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "path exists but is not a directory",
            ),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Creating directory {:?}", path);
            fs::create_dir_all(path).map_err(|source| EngineError::io(path, source))
        }
        Err(source) => Err(EngineError::io(path, source)),
    }
}

/// Writes one single-entry FASTA file per record and the manifest table into the
/// pipeline's preparation area.
pub fn materialize(
    manifest: &RunManifest,
    layout: &PipelineLayout,
    reporter: &ProgressReporter,
) -> Result<MaterializedInputs, EngineError> {
    ensure_dir(&layout.prepare_dir)?;
    ensure_dir(&layout.fasta_dir)?;

    reporter.report(Progress::TaskStart {
        total_steps: manifest.records().len() as u64,
    });
    let mut fasta_files = Vec::with_capacity(manifest.records().len());
    for record in manifest.records() {
        let path = layout.record_fasta_path(record.id());
        fs::write(&path, record.to_fasta_entry())
            .map_err(|source| EngineError::io(&path, source))?;
        debug!("Wrote {} to {:?}", record, path);
        fasta_files.push(path);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    write_manifest_to_path(manifest, &layout.manifest_path)
        .map_err(|e| EngineError::io(&layout.manifest_path, e.into()))?;

    info!(
        "Materialized {} record(s) and manifest {:?}",
        fasta_files.len(),
        layout.manifest_path
    );
    Ok(MaterializedInputs {
        fasta_files,
        manifest_path: layout.manifest_path.clone(),
    })
}
