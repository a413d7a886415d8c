use crate::cli::PredictArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use gatsolkit::engine::invoker::PipelineInvoker;
use gatsolkit::engine::progress::ProgressReporter;
use gatsolkit::workflows;
use tracing::{info, warn};

pub async fn run(args: PredictArgs) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let app_config = build_config(&args)?;
    let layout = &app_config.run_config.layout;
    info!(
        "Pipeline root: {:?}; command: `{}`",
        layout.install_root,
        app_config.invoker.describe()
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Predicting solubility for sequences in {}...",
        app_config.input_path.display()
    );
    info!("Invoking the core prediction workflow...");

    let outcome = tokio::task::block_in_place(|| {
        workflows::predict::run(
            &app_config.input_path,
            &app_config.output_path,
            &app_config.run_config,
            &app_config.invoker,
            &reporter,
        )
    });
    progress_handler.clear();
    let summary = outcome?;

    if summary.rows_written < summary.records {
        warn!(
            "{} of {} record(s) have no prediction.",
            summary.records - summary.rows_written,
            summary.records
        );
        println!(
            "Warning: the pipeline returned {} prediction(s) for {} sequence(s).",
            summary.rows_written, summary.records
        );
    }

    println!("Done. Results written to {}", summary.output_path.display());
    Ok(())
}
