use super::config::ConfigError;
use super::error::EngineError;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How the external pipeline process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Success,
    /// Non-zero exit; `code` is `None` when the process was killed by a signal.
    Failed { code: Option<i32> },
}

impl From<std::process::ExitStatus> for PipelineStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        if status.success() {
            PipelineStatus::Success
        } else {
            PipelineStatus::Failed {
                code: status.code(),
            }
        }
    }
}

/// The capability of running the external predictor pipeline once.
///
/// The working directory is always passed explicitly; implementations must never rely
/// on or change the process-wide current directory.
pub trait PipelineInvoker {
    fn invoke(&self, working_dir: &Path) -> Result<PipelineStatus, EngineError>;

    /// Human-readable description used in logs and error messages.
    fn describe(&self) -> String {
        "external pipeline".to_string()
    }
}

/// Runs the pipeline as a child process, by default `bash Predict.sh`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInvoker {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl Default for ShellInvoker {
    fn default() -> Self {
        Self {
            program: "bash".to_string(),
            args: vec!["Predict.sh".to_string()],
            timeout: None,
        }
    }
}

impl ShellInvoker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// Builds an invoker from a command line split into words (`["bash", "Predict.sh"]`).
    pub fn from_command(command: &[String]) -> Result<Self, ConfigError> {
        let (program, args) = command
            .split_first()
            .ok_or(ConfigError::MissingParameter("pipeline.command"))?;
        if program.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "pipeline.command",
                reason: "program name cannot be empty".to_string(),
            });
        }
        Ok(Self::new(program.clone(), args.to_vec()))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn wait_with_timeout(&self, child: &mut Child) -> Result<PipelineStatus, EngineError> {
        let exec_error = |e: std::io::Error| EngineError::PipelineExecution {
            command: self.command_line(),
            reason: format!("failed while waiting for process: {}", e),
        };

        let Some(timeout) = self.timeout else {
            return child.wait().map(Into::into).map_err(exec_error);
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait().map_err(exec_error)? {
                return Ok(status.into());
            }
            if Instant::now() >= deadline {
                warn!(
                    "Pipeline exceeded timeout of {:?}; killing process {}.",
                    timeout,
                    child.id()
                );
                if let Err(e) = child.kill() {
                    warn!("Failed to kill pipeline process: {}", e);
                }
                if let Err(e) = child.wait() {
                    warn!("Failed to reap killed pipeline process: {}", e);
                }
                return Err(EngineError::PipelineTimeout {
                    command: self.command_line(),
                    timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Drains `stream` to EOF, logging each line. Bytes that are not UTF-8 are logged
/// lossily; the pipe is never closed early, so the child never sees a broken pipe.
fn forward_lines<R: Read + Send + 'static>(stream: R, label: &'static str) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    debug!(
                        target: "gatsolkit::pipeline",
                        "[{}] {}",
                        label,
                        line.trim_end_matches(['\r', '\n'])
                    );
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("Stopped reading pipeline {}: {}", label, e);
                    break;
                }
            }
        }
    })
}

impl PipelineInvoker for ShellInvoker {
    fn invoke(&self, working_dir: &Path) -> Result<PipelineStatus, EngineError> {
        if !working_dir.is_dir() {
            return Err(EngineError::PipelineExecution {
                command: self.command_line(),
                reason: format!(
                    "working directory '{}' does not exist",
                    working_dir.display()
                ),
            });
        }

        info!("Running `{}` in {:?}", self.command_line(), working_dir);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EngineError::PipelineExecution {
                command: self.command_line(),
                reason: if e.kind() == std::io::ErrorKind::NotFound {
                    format!("program '{}' not found", self.program)
                } else {
                    format!("could not start process: {}", e)
                },
            })?;

        let forwarders: Vec<_> = [
            child.stdout.take().map(|s| forward_lines(s, "stdout")),
            child.stderr.take().map(|s| forward_lines(s, "stderr")),
        ]
        .into_iter()
        .flatten()
        .collect();

        let status = self.wait_with_timeout(&mut child);
        // Grandchildren of a killed pipeline may still hold the pipes open.
        if !matches!(status, Err(EngineError::PipelineTimeout { .. })) {
            for handle in forwarders {
                if handle.join().is_err() {
                    warn!("Pipeline output forwarder panicked.");
                }
            }
        }

        let status = status?;
        debug!("Pipeline exited with {:?}", status);
        Ok(status)
    }

    fn describe(&self) -> String {
        self.command_line()
    }
}
