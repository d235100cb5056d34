use super::{AppState, encoded_response};
use crate::cpg::CpgEngine;
use crate::predict::{BIN_SIZE, PREDICTOR_NAME};
use crate::sequence::NUCLEOTIDE_ALPHABET;
use crate::types::{HelpMessage, Readout, Scale};
use crate::{Error, Result};
use axum::{extract::State, http::HeaderMap, response::Response};
use serde_json::Value;
use std::path::Path;

pub async fn get_help(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    encoded_response(&headers, state.help.as_ref())
}

/// Build the /help document once at startup, from `path` when given.
///
/// A `predictor_name` entry is added to file-provided documents that lack one.
pub fn help_document(path: Option<&Path>, engine: &CpgEngine) -> Result<Value> {
    let mut document = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<Value>(&text).map_err(|e| {
                Error::Internal(format!("invalid help file {}: {}", path.display(), e))
            })?
        }
        None => {
            let message = HelpMessage {
                predictor_name: PREDICTOR_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "Baseline predictor reporting CpG dinucleotide density per \
                    100 bases. Point readouts give the whole-sequence density, track readouts \
                    a sliding-window density per position."
                    .to_string(),
                readouts: vec![Readout::Point, Readout::Track],
                scales: vec![Scale::Linear, Scale::Log],
                track_window: engine.window(),
                bin_size: BIN_SIZE,
                sequence_alphabet: String::from_utf8_lossy(NUCLEOTIDE_ALPHABET).into_owned(),
                prediction_range_convention: "zero-based half-open [start, end)".to_string(),
            };
            serde_json::to_value(message).map_err(|e| Error::Internal(e.to_string()))?
        }
    };

    let Some(object) = document.as_object_mut() else {
        return Err(Error::Internal("help document must be a JSON object".to_string()));
    };
    object
        .entry("predictor_name")
        .or_insert_with(|| Value::String(PREDICTOR_NAME.to_string()));

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::num::NonZeroUsize;

    #[test]
    fn test_builtin_help() {
        let engine = CpgEngine::new(NonZeroUsize::new(50).unwrap());
        let help = help_document(None, &engine).unwrap();
        assert_eq!(help["predictor_name"], PREDICTOR_NAME);
        assert_eq!(help["track_window"], 50);
        assert_eq!(help["readouts"], serde_json::json!(["point", "track"]));
    }

    #[test]
    fn test_help_file_gets_predictor_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"model": "cpg", "author": "lab"}}"#).unwrap();

        let help = help_document(Some(file.path()), &CpgEngine::default()).unwrap();
        assert_eq!(help["model"], "cpg");
        assert_eq!(help["predictor_name"], PREDICTOR_NAME);
    }

    #[test]
    fn test_help_file_must_be_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        assert!(help_document(Some(file.path()), &CpgEngine::default()).is_err());
    }

    #[test]
    fn test_missing_help_file() {
        let path = Path::new("/nonexistent/help.json");
        let result = help_document(Some(path), &CpgEngine::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
