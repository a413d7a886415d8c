use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::PredictArgs;
use crate::error::{CliError, Result};
use gatsolkit::engine::config::RunConfigBuilder;
use gatsolkit::engine::invoker::ShellInvoker;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn build_config(args: &PredictArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let pipeline_file = file_config.pipeline.take().unwrap_or_default();
    let install_root = resolve_install_root(
        args.predict_dir.as_deref(),
        pipeline_file.install_root.as_deref(),
        &defaults.install_root,
    )?;
    let command = pipeline_file.command.unwrap_or(defaults.command);
    let timeout_secs = args
        .timeout_secs
        .or(pipeline_file.timeout_secs)
        .or(defaults.timeout_secs);
    if timeout_secs == Some(0) {
        return Err(CliError::Config(
            "`pipeline.timeout-secs` must be greater than zero".to_string(),
        ));
    }

    let mut layout_names = file_config
        .layout
        .take()
        .unwrap_or_default()
        .merged_over(defaults.layout);
    if let Some(ext) = &args.structure_extension {
        layout_names.structure_extension = ext.clone();
    }

    let predictor_name = file_config
        .predictor_name
        .unwrap_or(defaults.predictor_name);

    let run_config = RunConfigBuilder::new()
        .install_root(install_root)
        .layout_names(layout_names)
        .predictor_name(predictor_name)
        .build()?;

    let invoker = ShellInvoker::from_command(&command)?
        .with_timeout(timeout_secs.map(Duration::from_secs));

    Ok(AppConfig {
        input_path: args.fasta.clone(),
        output_path: args.out.clone(),
        run_config,
        invoker,
    })
}

fn resolve_install_root(
    cli_arg: Option<&Path>,
    file_arg: Option<&str>,
    default_arg: &str,
) -> Result<PathBuf> {
    let path = cli_arg
        .map(Path::to_path_buf)
        .or_else(|| file_arg.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default_arg));
    Ok(std::path::absolute(path)?)
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "predictor-name" => config.predictor_name = Some(value_str.to_string()),
            "pipeline.install-root" => {
                config
                    .pipeline
                    .get_or_insert_with(Default::default)
                    .install_root = Some(value_str.to_string());
            }
            "pipeline.command" => {
                config.pipeline.get_or_insert_with(Default::default).command = Some(
                    value_str.split_whitespace().map(str::to_string).collect(),
                );
            }
            "pipeline.timeout-secs" => {
                config
                    .pipeline
                    .get_or_insert_with(Default::default)
                    .timeout_secs = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "layout.structure-extension" => {
                config
                    .layout
                    .get_or_insert_with(Default::default)
                    .structure_extension = Some(value_str.to_string());
            }
            "layout.output-file" => {
                config.layout.get_or_insert_with(Default::default).output_file =
                    Some(value_str.to_string());
            }
            "layout.tools-dir" => {
                config.layout.get_or_insert_with(Default::default).tools_dir =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
