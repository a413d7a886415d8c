use crate::core::io::fasta::FastaError;
use crate::core::io::results::ResultsError;
use crate::core::models::manifest::ManifestError;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Fasta(#[from] FastaError),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Input parse error: {0}")]
    InputParse(#[from] InputError),

    #[error(
        "Missing structure files in '{directory}' for {count} sequence(s): {ids}",
        directory = directory.display(),
        count = ids.len(),
        ids = ids.join(", ")
    )]
    MissingAssets { directory: PathBuf, ids: Vec<String> },

    #[error("Pipeline execution failed ({command}): {reason}")]
    PipelineExecution { command: String, reason: String },

    #[error("Pipeline execution timed out after {timeout:?} ({command})")]
    PipelineTimeout { command: String, timeout: Duration },

    #[error("Result normalization failed: {0}")]
    Schema(#[from] ResultsError),

    #[error("I/O error at '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl From<FastaError> for EngineError {
    fn from(e: FastaError) -> Self {
        Self::InputParse(e.into())
    }
}

impl From<ManifestError> for EngineError {
    fn from(e: ManifestError) -> Self {
        Self::InputParse(e.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InputParse,
    MissingAsset,
    PipelineExecution,
    Schema,
    Io,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InputParse => "input parse error",
            ErrorKind::MissingAsset => "missing structure asset",
            ErrorKind::PipelineExecution => "pipeline execution error",
            ErrorKind::Schema => "schema error",
            ErrorKind::Io => "I/O error",
            ErrorKind::Internal => "internal error",
        };
        f.write_str(name)
    }
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InputParse(_) => ErrorKind::InputParse,
            EngineError::MissingAssets { .. } => ErrorKind::MissingAsset,
            EngineError::PipelineExecution { .. } | EngineError::PipelineTimeout { .. } => {
                ErrorKind::PipelineExecution
            }
            EngineError::Schema(ResultsError::Io { .. }) => ErrorKind::Io,
            EngineError::Schema(_) => ErrorKind::Schema,
            EngineError::Io { .. } => ErrorKind::Io,
            EngineError::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_assets_message_lists_every_identifier() {
        let err = EngineError::MissingAssets {
            directory: PathBuf::from("/opt/Predict/NEED_to_PREPARE/pdb"),
            ids: vec!["seq1".into(), "seq7".into()],
        };
        let message = err.to_string();
        assert!(message.contains("2 sequence(s)"));
        assert!(message.contains("seq1, seq7"));
        assert_eq!(err.kind(), ErrorKind::MissingAsset);
    }

    #[test]
    fn fasta_and_manifest_errors_are_input_parse_errors() {
        let err: EngineError = FastaError::Empty.into();
        assert_eq!(err.kind(), ErrorKind::InputParse);

        let err: EngineError = ManifestError::DuplicateIdentifiers(vec!["a".into()]).into();
        assert_eq!(err.kind(), ErrorKind::InputParse);
        assert!(err.to_string().contains("Duplicate sequence identifiers: a"));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let err: EngineError = ResultsError::MissingColumns {
            path: PathBuf::from("Output.csv"),
            columns: vec!["Solubility_hat".into()],
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }
}
