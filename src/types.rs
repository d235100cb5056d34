use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Readout mode shared by every task of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readout {
    Point,
    Track,
}

impl Readout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Readout::Point => "point",
            Readout::Track => "track",
        }
    }
}

/// Post-processing applied to raw densities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

/// POST /predict body as sent by the evaluator.
///
/// Every field is optional so that missing keys are reported by validation.
/// Bodies are read through `validate::parse_request`, which names the field
/// of any wrongly typed value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub readout: Option<String>,
    pub prediction_tasks: Option<Vec<TaskRequest>>,
    pub sequences: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_ranges: Option<BTreeMap<String, Vec<i64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_seq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_seq: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub cell_type: Option<String>,
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
}

/// Successful POST /predict response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictor_name: String,
    pub bin_size: u32,
    pub prediction_tasks: Vec<TaskPrediction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPrediction {
    pub name: String,
    pub type_requested: String,
    pub type_actual: Vec<String>,
    pub cell_type_requested: String,
    pub cell_type_actual: String,
    pub species_requested: String,
    pub species_actual: String,
    pub scale_prediction_requested: Option<Scale>,
    pub scale_prediction_actual: Scale,
    pub predictions: BTreeMap<String, Vec<f64>>,
}

/// GET /formats response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportedFormats {
    pub predictor_name: String,
    pub predictor_supported_request_formats: Vec<String>,
    pub predictor_supported_response_formats: Vec<String>,
}

/// Built-in GET /help document
#[derive(Debug, Clone, Serialize)]
pub struct HelpMessage {
    pub predictor_name: String,
    pub version: String,
    pub description: String,
    pub readouts: Vec<Readout>,
    pub scales: Vec<Scale>,
    pub track_window: usize,
    pub bin_size: u32,
    pub sequence_alphabet: String,
    pub prediction_range_convention: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_type_field_renamed() {
        let task: TaskRequest = serde_json::from_value(serde_json::json!({
            "name": "t1",
            "type": "accessibility",
            "cell_type": "HepG2",
            "species": "homo_sapiens"
        }))
        .unwrap();
        assert_eq!(task.r#type.as_deref(), Some("accessibility"));
        assert!(task.scale.is_none());
    }

    #[test]
    fn test_scale_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Scale::Log).unwrap(), "log");
        assert_eq!(serde_json::to_value(Scale::default()).unwrap(), "linear");
    }

    #[test]
    fn test_missing_requested_scale_echoes_null() {
        let task = TaskPrediction {
            name: "t".to_string(),
            type_requested: "accessibility".to_string(),
            type_actual: vec!["NA".to_string()],
            cell_type_requested: "K562".to_string(),
            cell_type_actual: "NA".to_string(),
            species_requested: "homo_sapiens".to_string(),
            species_actual: "NA".to_string(),
            scale_prediction_requested: None,
            scale_prediction_actual: Scale::Linear,
            predictions: BTreeMap::new(),
        };
        let value = serde_json::to_value(&task).unwrap();
        assert!(value["scale_prediction_requested"].is_null());
        assert_eq!(value["scale_prediction_actual"], "linear");
    }
}
