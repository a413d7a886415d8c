use gatsolkit::engine::config::ConfigError;
use gatsolkit::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl CliError {
    /// Short label naming the kind of failure, printed before the message.
    pub fn label(&self) -> String {
        match self {
            CliError::Engine(e) => e.kind().to_string(),
            CliError::Config(_) | CliError::FileParsing { .. } => "configuration error".into(),
            CliError::Io(_) => "I/O error".into(),
            CliError::Argument(_) => "invalid argument".into(),
            CliError::Other(_) => "error".into(),
        }
    }
}
