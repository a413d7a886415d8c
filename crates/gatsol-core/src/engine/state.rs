use super::error::EngineError;
use std::fmt;
use tracing::trace;

/// Stages of a prediction run.
///
/// ```text
/// Init → ReadInput → CheckAssets → Materialize → Invoke → Normalize → Done
///                                ↘ Abort ↘
///                    (any non-terminal stage) → Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStage {
    Init,
    ReadInput,
    CheckAssets,
    Abort,
    Materialize,
    Invoke,
    Normalize,
    Done,
    Failed,
}

impl RunStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStage::Done | RunStage::Failed)
    }

    pub fn can_transition_to(self, next: RunStage) -> bool {
        use RunStage::*;
        match (self, next) {
            (from, Failed) => !from.is_terminal(),
            (Init, ReadInput)
            | (ReadInput, CheckAssets)
            | (CheckAssets, Abort)
            | (CheckAssets, Materialize)
            | (Materialize, Invoke)
            | (Invoke, Normalize)
            | (Normalize, Done) => true,
            _ => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RunStage::Init => "Init",
            RunStage::ReadInput => "Reading input",
            RunStage::CheckAssets => "Checking structure files",
            RunStage::Abort => "Abort",
            RunStage::Materialize => "Preparing pipeline inputs",
            RunStage::Invoke => "Running predictor pipeline",
            RunStage::Normalize => "Normalizing results",
            RunStage::Done => "Done",
            RunStage::Failed => "Failed",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tracks the current stage of a run and every stage it passed through.
#[derive(Debug, Clone)]
pub struct RunTracker {
    current: RunStage,
    history: Vec<RunStage>,
}

impl Default for RunTracker {
    fn default() -> Self {
        Self {
            current: RunStage::Init,
            history: vec![RunStage::Init],
        }
    }
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> RunStage {
        self.current
    }

    pub fn history(&self) -> &[RunStage] {
        &self.history
    }

    pub fn advance(&mut self, next: RunStage) -> Result<(), EngineError> {
        if !self.current.can_transition_to(next) {
            return Err(EngineError::Internal(format!(
                "illegal run transition {:?} -> {:?}",
                self.current, next
            )));
        }
        trace!("Run stage {:?} -> {:?}", self.current, next);
        self.current = next;
        self.history.push(next);
        Ok(())
    }

    /// Moves to [`RunStage::Failed`] unless the run already ended. Returns the stage the
    /// run was in when it failed.
    pub fn fail(&mut self) -> RunStage {
        let failed_in = self.current;
        if !failed_in.is_terminal() {
            self.current = RunStage::Failed;
            self.history.push(RunStage::Failed);
        }
        failed_in
    }
}
