//! Working sequences for a single request.
//!
//! [`SequenceStore`] owns the request's sequences, trims each one to its
//! declared prediction range and attaches flanks. Trimming happens once;
//! every task then reads the same working sequences.

use std::collections::BTreeMap;

/// Accepted nucleotide codes (uppercase; input is matched case-insensitively)
pub const NUCLEOTIDE_ALPHABET: &[u8] = b"ACGTN";

/// Distinct characters of `seq` outside [`NUCLEOTIDE_ALPHABET`], in order of appearance
pub fn invalid_bases(seq: &str) -> Vec<char> {
    let mut invalid: Vec<char> = Vec::new();
    for c in seq.chars() {
        let ok = c.is_ascii() && NUCLEOTIDE_ALPHABET.contains(&(c as u8).to_ascii_uppercase());
        if !ok && !invalid.contains(&c) {
            invalid.push(c);
        }
    }
    invalid
}

/// Half-open `[start, end)` interval in original-sequence coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionRange {
    pub start: usize,
    pub end: usize,
}

/// Sequences of one request, keyed by id
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    sequences: BTreeMap<String, String>,
    ranges: BTreeMap<String, PredictionRange>,
    upstream: String,
    downstream: String,
}

impl SequenceStore {
    pub fn new(sequences: BTreeMap<String, String>) -> Self {
        Self {
            sequences,
            ..Default::default()
        }
    }

    /// Declared range for `id`. Callers check bounds first.
    pub fn with_range(mut self, id: impl Into<String>, range: PredictionRange) -> Self {
        self.ranges.insert(id.into(), range);
        self
    }

    pub fn with_flanks(
        mut self,
        upstream: impl Into<String>,
        downstream: impl Into<String>,
    ) -> Self {
        self.upstream = upstream.into();
        self.downstream = downstream.into();
        self
    }

    pub(crate) fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn range(&self, id: &str) -> Option<PredictionRange> {
        self.ranges.get(id).copied()
    }

    /// Produce the working sequences: each sequence cut to its range (or kept
    /// whole) and wrapped in the flanks.
    pub fn trimmed(&self) -> BTreeMap<String, Vec<u8>> {
        self.sequences
            .iter()
            .map(|(id, seq)| {
                let bytes = seq.as_bytes();
                let core = match self.ranges.get(id) {
                    Some(range) => {
                        tracing::debug!(
                            "sequence '{}' trimmed to [{}, {})",
                            id,
                            range.start,
                            range.end
                        );
                        &bytes[range.start..range.end]
                    }
                    None => bytes,
                };

                let mut working =
                    Vec::with_capacity(self.upstream.len() + core.len() + self.downstream.len());
                working.extend_from_slice(self.upstream.as_bytes());
                working.extend_from_slice(core);
                working.extend_from_slice(self.downstream.as_bytes());
                (id.clone(), working)
            })
            .collect()
    }
}
