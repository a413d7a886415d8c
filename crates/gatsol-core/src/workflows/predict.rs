use crate::core::io::{fasta, results};
use crate::core::models::manifest::RunManifest;
use crate::engine::assets::check_structures;
use crate::engine::config::RunConfig;
use crate::engine::error::EngineError;
use crate::engine::invoker::{PipelineInvoker, PipelineStatus};
use crate::engine::materialize::materialize;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{RunStage, RunTracker};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{error, info, instrument, warn};

const WORK_AREA_PREFIX: &str = "gatsolkit-";
const RAW_SNAPSHOT_NAME: &str = "raw_output.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub rows_written: usize,
    pub output_path: PathBuf,
    pub stages: Vec<RunStage>,
}

impl RunSummary {
    pub fn final_stage(&self) -> RunStage {
        self.stages.last().copied().unwrap_or(RunStage::Init)
    }
}

/// Runs one prediction batch end to end.
///
/// The run either writes a complete standardized table to `output` or leaves `output`
/// untouched. The scoped work area is removed on every exit path.
#[instrument(skip_all, name = "predict_workflow")]
pub fn run(
    input: &Path,
    output: &Path,
    config: &RunConfig,
    invoker: &dyn PipelineInvoker,
    reporter: &ProgressReporter,
) -> Result<RunSummary, EngineError> {
    let mut tracker = RunTracker::new();

    let work_area = create_work_area(config)?;
    info!("Acquired work area {:?}", work_area.path());

    let result = execute(
        &mut tracker,
        work_area.path(),
        input,
        output,
        config,
        invoker,
        reporter,
    );

    let work_path = work_area.path().to_path_buf();
    if let Err(e) = work_area.close() {
        warn!("Failed to remove work area {:?}: {}", work_path, e);
    }

    match result {
        Ok(counts) => Ok(RunSummary {
            records: counts.records,
            rows_written: counts.rows_written,
            output_path: output.to_path_buf(),
            stages: tracker.history().to_vec(),
        }),
        Err(e) => {
            let failed_in = tracker.fail();
            error!("Run failed during stage '{}': {}", failed_in, e);
            Err(e)
        }
    }
}

fn create_work_area(config: &RunConfig) -> Result<TempDir, EngineError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(WORK_AREA_PREFIX);
    match &config.work_root {
        Some(root) => builder
            .tempdir_in(root)
            .map_err(|e| EngineError::io(root, e)),
        None => builder
            .tempdir()
            .map_err(|e| EngineError::io(std::env::temp_dir(), e)),
    }
}

struct RunCounts {
    records: usize,
    rows_written: usize,
}

fn enter(
    tracker: &mut RunTracker,
    reporter: &ProgressReporter,
    stage: RunStage,
) -> Result<(), EngineError> {
    tracker.advance(stage)?;
    reporter.report(Progress::StageStart { stage });
    Ok(())
}

fn execute(
    tracker: &mut RunTracker,
    work_dir: &Path,
    input: &Path,
    output: &Path,
    config: &RunConfig,
    invoker: &dyn PipelineInvoker,
    reporter: &ProgressReporter,
) -> Result<RunCounts, EngineError> {
    let layout = &config.layout;

    // === Stage 1: Read input ===
    enter(tracker, reporter, RunStage::ReadInput)?;
    let records = fasta::read_records(input)?;
    let manifest = RunManifest::from_records(records)?;
    let record_count = manifest.records().len();
    info!("Read {} sequence record(s) from {:?}", record_count, input);
    reporter.report(Progress::StageFinish {
        stage: RunStage::ReadInput,
    });

    // === Stage 2: Structure availability gate ===
    enter(tracker, reporter, RunStage::CheckAssets)?;
    let report = check_structures(manifest.records(), layout);
    let (missing, checked) = (report.missing.len(), report.checked);
    if let Err(e) = report.into_result() {
        tracker.advance(RunStage::Abort)?;
        warn!(
            "{} of {} record(s) lack a structure file; aborting before materialization.",
            missing, checked
        );
        return Err(e);
    }
    reporter.report(Progress::StageFinish {
        stage: RunStage::CheckAssets,
    });

    // === Stage 3: Materialize pipeline inputs ===
    enter(tracker, reporter, RunStage::Materialize)?;
    materialize(&manifest, layout, reporter)?;
    reporter.report(Progress::StageFinish {
        stage: RunStage::Materialize,
    });

    // === Stage 4: Invoke the external pipeline ===
    enter(tracker, reporter, RunStage::Invoke)?;
    if remove_stale_output(&layout.raw_output_path)? {
        reporter.message(format!(
            "Removed stale {:?} left by an earlier run",
            layout.raw_output_path
        ));
    }
    let status = invoker.invoke(&layout.tools_dir)?;
    if let PipelineStatus::Failed { code } = status {
        return Err(EngineError::PipelineExecution {
            command: invoker.describe(),
            reason: match code {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            },
        });
    }
    reporter.report(Progress::StageFinish {
        stage: RunStage::Invoke,
    });

    // === Stage 5: Normalize output ===
    enter(tracker, reporter, RunStage::Normalize)?;
    let snapshot = work_dir.join(RAW_SNAPSHOT_NAME);
    fs::copy(&layout.raw_output_path, &snapshot)
        .map_err(|e| EngineError::io(&layout.raw_output_path, e))?;
    let raw_rows = results::read_raw_results(&snapshot)?;
    let rows = results::normalize(raw_rows, &config.predictor_name);
    results::persist_standard_results(&rows, output)?;

    if rows.len() != record_count {
        warn!(
            "Pipeline returned {} row(s) for {} input record(s).",
            rows.len(),
            record_count
        );
        reporter.message(format!(
            "Pipeline returned {} row(s) for {} sequence(s)",
            rows.len(),
            record_count
        ));
    }
    reporter.report(Progress::StageFinish {
        stage: RunStage::Normalize,
    });

    tracker.advance(RunStage::Done)?;
    info!("Wrote {} standardized row(s) to {:?}", rows.len(), output);
    Ok(RunCounts {
        records: record_count,
        rows_written: rows.len(),
    })
}

/// A result table left over from an earlier run must never be mistaken for this run's.
/// Returns whether a stale table was removed.
fn remove_stale_output(path: &Path) -> Result<bool, EngineError> {
    match fs::remove_file(path) {
        Ok(()) => {
            warn!("Removed stale pipeline output {:?} before invocation.", path);
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(EngineError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::RunConfigBuilder;
    use std::cell::Cell;
    use tempfile::tempdir;

    struct CountingInvoker {
        calls: Cell<usize>,
    }

    impl PipelineInvoker for CountingInvoker {
        fn invoke(&self, _working_dir: &Path) -> Result<PipelineStatus, EngineError> {
            self.calls.set(self.calls.get() + 1);
            Ok(PipelineStatus::Success)
        }
    }

    #[test]
    fn malformed_fasta_fails_before_invocation() {
        let root = tempdir().unwrap();
        let input = root.path().join("in.fasta");
        fs::write(&input, "not fasta\n").unwrap();

        let config = RunConfigBuilder::new()
            .install_root(root.path().join("Predict"))
            .build()
            .unwrap();
        let invoker = CountingInvoker {
            calls: Cell::new(0),
        };

        let err = run(
            &input,
            &root.path().join("out.csv"),
            &config,
            &invoker,
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InputParse(_)));
        assert_eq!(invoker.calls.get(), 0);
    }

    #[test]
    fn stale_output_is_removed_and_missing_output_is_not_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Output.csv");
        fs::write(&path, "old").unwrap();
        assert!(remove_stale_output(&path).unwrap());
        assert!(!path.exists());
        assert!(!remove_stale_output(&path).unwrap());
    }
}
