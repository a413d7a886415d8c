use crate::core::models::result::DEFAULT_PREDICTOR_NAME;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Relative names that make up the external pipeline's directory contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNames {
    pub prepare_dir: String,
    pub fasta_dir: String,
    pub structure_dir: String,
    pub manifest_file: String,
    pub tools_dir: String,
    pub output_file: String,
    pub structure_extension: String,
}

impl Default for LayoutNames {
    fn default() -> Self {
        Self {
            prepare_dir: "NEED_to_PREPARE".to_string(),
            fasta_dir: "fasta".to_string(),
            structure_dir: "pdb".to_string(),
            manifest_file: "list.csv".to_string(),
            tools_dir: "tools".to_string(),
            output_file: "Output.csv".to_string(),
            structure_extension: "pdb".to_string(),
        }
    }
}

/// Fully-qualified paths of every location the external pipeline reads or writes.
///
/// ```text
/// <install_root>/
/// ├── NEED_to_PREPARE/
/// │   ├── fasta/<id>.fasta
/// │   ├── pdb/<id>.pdb        (supplied by the caller)
/// │   └── list.csv
/// ├── tools/                  (working directory of the pipeline)
/// └── Output.csv              (written by the pipeline)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineLayout {
    pub install_root: PathBuf,
    pub prepare_dir: PathBuf,
    pub fasta_dir: PathBuf,
    pub structure_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub tools_dir: PathBuf,
    pub raw_output_path: PathBuf,
    pub structure_extension: String,
}

impl PipelineLayout {
    pub fn new(install_root: &Path, names: &LayoutNames) -> Self {
        let prepare_dir = install_root.join(&names.prepare_dir);
        Self {
            install_root: install_root.to_path_buf(),
            fasta_dir: prepare_dir.join(&names.fasta_dir),
            structure_dir: prepare_dir.join(&names.structure_dir),
            manifest_path: prepare_dir.join(&names.manifest_file),
            tools_dir: install_root.join(&names.tools_dir),
            raw_output_path: install_root.join(&names.output_file),
            structure_extension: names.structure_extension.clone(),
            prepare_dir,
        }
    }

    pub fn structure_path(&self, id: &str) -> PathBuf {
        self.structure_dir
            .join(format!("{}.{}", id, self.structure_extension))
    }

    pub fn record_fasta_path(&self, id: &str) -> PathBuf {
        self.fasta_dir.join(format!("{}.fasta", id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub layout: PipelineLayout,
    pub predictor_name: String,
    /// Parent directory of the scoped work area; the system temp dir when unset.
    pub work_root: Option<PathBuf>,
}

#[derive(Default)]
pub struct RunConfigBuilder {
    install_root: Option<PathBuf>,
    layout_names: Option<LayoutNames>,
    predictor_name: Option<String>,
    work_root: Option<PathBuf>,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install_root(mut self, path: PathBuf) -> Self {
        self.install_root = Some(path);
        self
    }
    pub fn layout_names(mut self, names: LayoutNames) -> Self {
        self.layout_names = Some(names);
        self
    }
    pub fn predictor_name(mut self, name: impl Into<String>) -> Self {
        self.predictor_name = Some(name.into());
        self
    }
    pub fn work_root(mut self, path: PathBuf) -> Self {
        self.work_root = Some(path);
        self
    }

    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let install_root = self
            .install_root
            .ok_or(ConfigError::MissingParameter("install_root"))?;
        if !install_root.is_absolute() {
            return Err(ConfigError::InvalidParameter {
                name: "install_root",
                reason: format!("'{}' is not an absolute path", install_root.display()),
            });
        }

        let names = self.layout_names.unwrap_or_default();
        let named_parts = [
            ("prepare_dir", &names.prepare_dir),
            ("fasta_dir", &names.fasta_dir),
            ("structure_dir", &names.structure_dir),
            ("manifest_file", &names.manifest_file),
            ("tools_dir", &names.tools_dir),
            ("output_file", &names.output_file),
        ];
        for (name, value) in named_parts {
            let path = Path::new(value.as_str());
            if value.trim().is_empty() || path.is_absolute() {
                return Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("'{}' must be a non-empty relative path", value),
                });
            }
        }
        let extension = names
            .structure_extension
            .trim_start_matches('.')
            .to_string();
        if extension.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "structure_extension",
                reason: "extension cannot be empty".to_string(),
            });
        }
        let names = LayoutNames {
            structure_extension: extension,
            ..names
        };

        let predictor_name = self
            .predictor_name
            .unwrap_or_else(|| DEFAULT_PREDICTOR_NAME.to_string());
        if predictor_name.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "predictor_name",
                reason: "predictor tag cannot be empty".to_string(),
            });
        }

        Ok(RunConfig {
            layout: PipelineLayout::new(&install_root, &names),
            predictor_name,
            work_root: self.work_root,
        })
    }
}
