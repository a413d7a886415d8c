use gatsolkit::core::models::result::DEFAULT_PREDICTOR_NAME;
use gatsolkit::engine::config::LayoutNames;

pub struct DefaultsConfig {
    pub install_root: String,
    pub command: Vec<String>,
    pub timeout_secs: Option<u64>,
    pub predictor_name: String,
    pub layout: LayoutNames,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            install_root: "Predict".to_string(),
            command: vec!["bash".to_string(), "Predict.sh".to_string()],
            timeout_secs: None,
            predictor_name: DEFAULT_PREDICTOR_NAME.to_string(),
            layout: LayoutNames::default(),
        }
    }
}
