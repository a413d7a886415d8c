use serde::{Deserialize, Serialize, Serializer};

/// Marker written for values the wrapped predictor cannot provide.
pub const NOT_AVAILABLE: &str = "NA";

/// Default value of the `Predictor` column.
pub const DEFAULT_PREDICTOR_NAME: &str = "GATSol";

/// Columns the predictor's raw result table must carry.
pub const RAW_REQUIRED_COLUMNS: [&str; 3] = ["id", "sequence", "Solubility_hat"];

/// Column order of the standardized benchmarking table.
pub const STANDARD_COLUMNS: [&str; 6] = [
    "Accession",
    "Sequence",
    "Predictor",
    "SolubilityScore",
    "Probability_Soluble",
    "Probability_Insoluble",
];

/// One row of the external pipeline's native output table.
///
/// An empty `Solubility_hat` cell (pandas' rendering of NaN) reads as `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawResultRow {
    pub id: String,
    pub sequence: String,
    #[serde(rename = "Solubility_hat")]
    pub solubility_hat: Option<f64>,
}

/// One row of the standardized benchmarking table.
///
/// Field declaration order is the on-disk column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardResultRow {
    #[serde(rename = "Accession")]
    pub accession: String,
    #[serde(rename = "Sequence")]
    pub sequence: String,
    #[serde(rename = "Predictor")]
    pub predictor: String,
    #[serde(rename = "SolubilityScore", serialize_with = "na_when_absent")]
    pub solubility_score: Option<f64>,
    #[serde(rename = "Probability_Soluble", serialize_with = "na_when_absent")]
    pub probability_soluble: Option<f64>,
    #[serde(rename = "Probability_Insoluble", serialize_with = "na_when_absent")]
    pub probability_insoluble: Option<f64>,
}

impl StandardResultRow {
    /// GATSol emits a single continuous score, never class probabilities, so both
    /// probability columns stay absent.
    pub fn from_raw(raw: RawResultRow, predictor: &str) -> Self {
        Self {
            accession: raw.id,
            sequence: raw.sequence,
            predictor: predictor.to_string(),
            solubility_score: raw.solubility_hat,
            probability_soluble: None,
            probability_insoluble: None,
        }
    }
}

fn na_when_absent<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}
