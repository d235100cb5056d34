use crate::cpg::CpgEngine;
use crate::types::{PredictionResponse, TaskPrediction};
use crate::validate::ValidatedRequest;
use std::collections::BTreeMap;

/// Name reported in every response from this predictor
pub const PREDICTOR_NAME: &str = "CpG Predictor";

/// Output positions are single bases; densities are never re-binned
pub const BIN_SIZE: u32 = 1;

/// Placeholder for metadata this predictor does not specialize on
const NOT_APPLICABLE: &str = "NA";

/// Run the engine over a validated request and assemble the response.
///
/// Raw densities depend only on the readout, so they are computed once per
/// sequence and shared by every task; each task only rescales them.
pub fn predict(request: &ValidatedRequest, engine: &CpgEngine) -> PredictionResponse {
    let raw: BTreeMap<String, Vec<f64>> = request
        .sequences
        .trimmed()
        .into_iter()
        .map(|(id, seq)| {
            let values = engine.compute(&seq, request.readout);
            (id, values)
        })
        .collect();

    let prediction_tasks = request
        .tasks
        .iter()
        .map(|task| {
            let scale = task.scale();
            let predictions = raw
                .iter()
                .map(|(id, values)| (id.clone(), scale.apply_all(values.clone())))
                .collect();

            TaskPrediction {
                name: task.name.clone(),
                type_requested: task.r#type.clone(),
                type_actual: vec![NOT_APPLICABLE.to_string()],
                cell_type_requested: task.cell_type.clone(),
                cell_type_actual: NOT_APPLICABLE.to_string(),
                species_requested: task.species.clone(),
                species_actual: NOT_APPLICABLE.to_string(),
                scale_prediction_requested: task.scale_requested,
                scale_prediction_actual: scale,
                predictions,
            }
        })
        .collect();

    tracing::info!(
        "predicted {} task(s) over {} sequence(s), readout {}",
        request.tasks.len(),
        request.sequences.len(),
        request.readout.as_str()
    );

    PredictionResponse {
        predictor_name: PREDICTOR_NAME.to_string(),
        bin_size: BIN_SIZE,
        prediction_tasks,
    }
}
