use gatsolkit::engine::config::RunConfig;
use gatsolkit::engine::invoker::ShellInvoker;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub run_config: RunConfig,
    pub invoker: ShellInvoker,
}
