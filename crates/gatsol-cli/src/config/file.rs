use crate::error::{CliError, Result};
use gatsolkit::engine::config::LayoutNames;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePipelineConfig {
    pub install_root: Option<String>,
    pub command: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileLayoutConfig {
    pub prepare_dir: Option<String>,
    pub fasta_dir: Option<String>,
    pub structure_dir: Option<String>,
    pub manifest_file: Option<String>,
    pub tools_dir: Option<String>,
    pub output_file: Option<String>,
    pub structure_extension: Option<String>,
}

impl FileLayoutConfig {
    /// Fills unset names from `base`.
    pub fn merged_over(self, base: LayoutNames) -> LayoutNames {
        LayoutNames {
            prepare_dir: self.prepare_dir.unwrap_or(base.prepare_dir),
            fasta_dir: self.fasta_dir.unwrap_or(base.fasta_dir),
            structure_dir: self.structure_dir.unwrap_or(base.structure_dir),
            manifest_file: self.manifest_file.unwrap_or(base.manifest_file),
            tools_dir: self.tools_dir.unwrap_or(base.tools_dir),
            output_file: self.output_file.unwrap_or(base.output_file),
            structure_extension: self
                .structure_extension
                .unwrap_or(base.structure_extension),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub predictor_name: Option<String>,
    pub pipeline: Option<FilePipelineConfig>,
    pub layout: Option<FileLayoutConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_all_sections() {
        let config: FileConfig = toml::from_str(
            r#"
            predictor-name = "GATSol-v2"

            [pipeline]
            install-root = "/opt/GATSol/Predict"
            command = ["bash", "Predict.sh", "--cpu"]
            timeout-secs = 600

            [layout]
            structure-extension = "cif"
            output-file = "Result.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.predictor_name.as_deref(), Some("GATSol-v2"));
        let pipeline = config.pipeline.unwrap();
        assert_eq!(pipeline.timeout_secs, Some(600));
        assert_eq!(pipeline.command.unwrap().len(), 3);

        let names = config.layout.unwrap().merged_over(LayoutNames::default());
        assert_eq!(names.structure_extension, "cif");
        assert_eq!(names.output_file, "Result.csv");
        assert_eq!(names.tools_dir, "tools");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pipeline]\ninstall-dir = \"Predict\"\n").unwrap();
        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
