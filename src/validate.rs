//! Request validation.
//!
//! [`parse_request`] reads a decoded body into a [`PredictionRequest`],
//! rejecting wrongly typed values by field path. [`validate`] then turns the
//! request into a [`ValidatedRequest`] or fails on the first violated check.
//! Nothing is computed before every check has passed.

use crate::sequence::{PredictionRange, SequenceStore, invalid_bases};
use crate::types::{PredictionRequest, Readout, Scale, TaskRequest};
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

/// Readouts known to the evaluation API that this predictor does not produce
const UNSUPPORTED_READOUTS: &[&str] = &["interaction_matrix"];

/// A task after validation; requested metadata is kept verbatim for echoing
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionTask {
    pub name: String,
    pub r#type: String,
    pub cell_type: String,
    pub species: String,
    pub scale_requested: Option<Scale>,
}

impl PredictionTask {
    /// Scale applied to this task's output; linear unless requested otherwise
    pub fn scale(&self) -> Scale {
        self.scale_requested.unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub readout: Readout,
    pub tasks: Vec<PredictionTask>,
    pub sequences: SequenceStore,
}

/// Read a decoded body field by field. Missing keys and `null` become `None`
/// so that [`validate`] reports them; values of the wrong type fail here.
pub fn parse_request(body: Value) -> Result<PredictionRequest> {
    let Value::Object(mut body) = body else {
        return Err(Error::validation("request", "body must be a mapping of keys to values"));
    };

    let prediction_tasks = match take(&mut body, "prediction_tasks") {
        None => None,
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| parse_task(index, item))
                .collect::<Result<Vec<_>>>()?,
        ),
        Some(_) => {
            return Err(Error::validation("prediction_tasks", "must be a list of task objects"));
        }
    };

    let sequences = match take(&mut body, "sequences") {
        None => None,
        Some(Value::Object(entries)) => Some(
            entries
                .into_iter()
                .map(|(id, seq)| {
                    let field = format!("sequences.{}", id);
                    let seq = expect_string(&field, seq)?;
                    Ok((id, seq))
                })
                .collect::<Result<BTreeMap<_, _>>>()?,
        ),
        Some(_) => {
            return Err(Error::validation("sequences", "must be a mapping of id to sequence"));
        }
    };

    let prediction_ranges = match take(&mut body, "prediction_ranges") {
        None => None,
        Some(Value::Object(entries)) => Some(
            entries
                .into_iter()
                .map(|(id, bounds)| {
                    let field = format!("prediction_ranges.{}", id);
                    let bounds = parse_bounds(&field, bounds)?;
                    Ok((id, bounds))
                })
                .collect::<Result<BTreeMap<_, _>>>()?,
        ),
        Some(_) => {
            return Err(Error::validation(
                "prediction_ranges",
                "must be a mapping of id to [start, end]",
            ));
        }
    };

    Ok(PredictionRequest {
        readout: optional_string("readout", take(&mut body, "readout"))?,
        prediction_tasks,
        sequences,
        prediction_ranges,
        upstream_seq: optional_string("upstream_seq", take(&mut body, "upstream_seq"))?,
        downstream_seq: optional_string("downstream_seq", take(&mut body, "downstream_seq"))?,
    })
}

/// Remove `key`, treating `null` as absent
fn take(body: &mut Map<String, Value>, key: &str) -> Option<Value> {
    body.remove(key).filter(|v| !v.is_null())
}

fn expect_string(field: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Array(_) => Err(Error::validation(field, "should only have 1 value")),
        _ => Err(Error::validation(field, "value should be a string")),
    }
}

fn optional_string(field: &str, value: Option<Value>) -> Result<Option<String>> {
    value.map(|v| expect_string(field, v)).transpose()
}

fn parse_task(index: usize, item: Value) -> Result<TaskRequest> {
    let Value::Object(mut task) = item else {
        return Err(Error::validation(
            format!("prediction_tasks[{}]", index),
            "must be a task object",
        ));
    };
    let mut string = |key: &str| {
        let field = format!("prediction_tasks[{}].{}", index, key);
        optional_string(&field, take(&mut task, key))
    };

    Ok(TaskRequest {
        name: string("name")?,
        r#type: string("type")?,
        cell_type: string("cell_type")?,
        species: string("species")?,
        scale: string("scale")?,
    })
}

fn parse_bounds(field: &str, bounds: Value) -> Result<Vec<i64>> {
    let Value::Array(items) = bounds else {
        return Err(Error::validation(field, "range must be a list"));
    };
    items
        .iter()
        .map(|v| {
            v.as_i64().ok_or_else(|| {
                Error::validation(field, format!("values must be integers, got {}", v))
            })
        })
        .collect()
}

pub fn validate(request: PredictionRequest) -> Result<ValidatedRequest> {
    let readout = parse_readout(request.readout.as_deref())?;
    let tasks = validate_tasks(request.prediction_tasks)?;

    let sequences = request
        .sequences
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::validation("sequences", "must be a non-empty mapping of id to sequence")
        })?;
    for (id, seq) in &sequences {
        check_bases(&format!("sequence '{}'", id), seq)?;
    }

    let mut ranges = Vec::new();
    for (id, bounds) in request.prediction_ranges.unwrap_or_default() {
        let field = format!("prediction_ranges.{}", id);
        let seq = sequences.get(&id).ok_or_else(|| {
            Error::validation(
                &field,
                format!("sequence id '{}' is not present in 'sequences'", id),
            )
        })?;
        if let Some(range) = parse_range(&field, &bounds, seq.len())? {
            ranges.push((id, range));
        }
    }

    let upstream = request.upstream_seq.unwrap_or_default();
    let downstream = request.downstream_seq.unwrap_or_default();
    check_flank("upstream_seq", &upstream)?;
    check_flank("downstream_seq", &downstream)?;

    let store = ranges
        .into_iter()
        .fold(SequenceStore::new(sequences), |store, (id, range)| {
            store.with_range(id, range)
        })
        .with_flanks(upstream, downstream);

    Ok(ValidatedRequest {
        readout,
        tasks,
        sequences: store,
    })
}

fn parse_readout(readout: Option<&str>) -> Result<Readout> {
    match readout {
        None => Err(Error::validation("readout", "mandatory key is missing")),
        Some("point") => Ok(Readout::Point),
        Some("track") => Ok(Readout::Track),
        Some(other) if UNSUPPORTED_READOUTS.contains(&other) => Err(Error::validation(
            "readout",
            format!("this predictor cannot process '{}' readouts", other),
        )),
        Some(other) => Err(Error::validation(
            "readout",
            format!("'{}' is not recognized, choose from ['point', 'track']", other),
        )),
    }
}

fn validate_tasks(tasks: Option<Vec<TaskRequest>>) -> Result<Vec<PredictionTask>> {
    let tasks = tasks
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::validation("prediction_tasks", "must be a non-empty list"))?;

    let mut seen = HashSet::new();
    tasks
        .into_iter()
        .enumerate()
        .map(|(index, task)| {
            let field = |key: &str| format!("prediction_tasks[{}].{}", index, key);

            let name = task
                .name
                .filter(|n| !n.is_empty())
                .ok_or_else(|| Error::validation(field("name"), "must be a non-empty string"))?;
            if !seen.insert(name.clone()) {
                return Err(Error::validation(
                    field("name"),
                    format!("duplicate task name '{}'", name),
                ));
            }

            let missing = |key: &str| {
                Error::validation(
                    field(key),
                    format!("mandatory key missing from prediction task '{}'", name),
                )
            };
            let r#type = task.r#type.ok_or_else(|| missing("type"))?;
            let cell_type = task.cell_type.ok_or_else(|| missing("cell_type"))?;
            let species = task.species.ok_or_else(|| missing("species"))?;

            let scale_requested = match task.scale.as_deref() {
                None => None,
                Some("linear") => Some(Scale::Linear),
                Some("log") => Some(Scale::Log),
                Some(other) => {
                    return Err(Error::validation(
                        field("scale"),
                        format!("'{}' is not recognized, choose from ['linear', 'log']", other),
                    ));
                }
            };

            Ok(PredictionTask {
                name,
                r#type,
                cell_type,
                species,
                scale_requested,
            })
        })
        .collect()
}

fn check_bases(label: &str, seq: &str) -> Result<()> {
    if seq.is_empty() {
        return Err(Error::PredictionFailed(format!("{} is empty", label)));
    }
    let invalid = invalid_bases(seq);
    if !invalid.is_empty() {
        return Err(Error::PredictionFailed(format!(
            "{} has invalid character(s): {:?}",
            label, invalid
        )));
    }
    Ok(())
}

fn check_flank(field: &str, flank: &str) -> Result<()> {
    if flank.is_empty() {
        return Ok(());
    }
    check_bases(field, flank)
}

/// `[]` means the whole sequence; otherwise `[start, end]` with 0 <= start < end <= len
fn parse_range(field: &str, bounds: &[i64], seq_len: usize) -> Result<Option<PredictionRange>> {
    let (start, end) = match bounds {
        [] => return Ok(None),
        [start, end] => (*start, *end),
        _ => {
            return Err(Error::validation(
                field,
                format!("range must have 2 elements, got {}", bounds.len()),
            ));
        }
    };

    if start < 0 || end < 0 {
        return Err(Error::validation(
            field,
            format!("indices must be non-negative, got [{}, {}]", start, end),
        ));
    }
    if start >= end {
        return Err(Error::validation(
            field,
            format!("start ({}) must be less than end ({})", start, end),
        ));
    }
    // both are non-negative here
    let (start, end) = (start as usize, end as usize);
    if end > seq_len {
        return Err(Error::validation(
            field,
            format!("end ({}) exceeds sequence length {}", end, seq_len),
        ));
    }

    Ok(Some(PredictionRange { start, end }))
}
