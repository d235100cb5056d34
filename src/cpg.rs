//! CpG density computation.
//!
//! A CpG site is any position `i` where bases `i` and `i + 1` read `CG`
//! (case-insensitive). Sites are counted independently, so `CGCG` holds two.
//! Densities are reported per 100 bases.

use crate::types::Readout;
use std::num::NonZeroUsize;

/// Sliding window width (bases) used for track readouts unless configured otherwise.
pub const DEFAULT_TRACK_WINDOW: usize = 100;

/// Returns true if a CpG dinucleotide starts at `pair[0]`
#[inline]
fn is_cpg(pair: &[u8]) -> bool {
    pair[0].eq_ignore_ascii_case(&b'C') && pair[1].eq_ignore_ascii_case(&b'G')
}

/// Count CpG sites fully contained in `seq`
pub fn count_cpg(seq: &[u8]) -> usize {
    seq.windows(2).filter(|pair| is_cpg(pair)).count()
}

/// Build a prefix sum of CpG start positions.
/// pref[i] = # of CpG sites starting in seq[0..i], so pref.len() == seq.len() + 1
fn cpg_prefix(seq: &[u8]) -> Vec<u32> {
    let mut pref = Vec::with_capacity(seq.len() + 1);
    let mut running = 0u32;
    pref.push(running);
    for i in 0..seq.len() {
        if i + 1 < seq.len() && is_cpg(&seq[i..i + 2]) {
            running += 1;
        }
        pref.push(running);
    }
    pref
}

/// Whole-sequence CpG density per 100 bases. Sequences shorter than a
/// dinucleotide have density 0.
pub fn point_density(seq: &[u8]) -> f64 {
    if seq.len() < 2 {
        return 0.0;
    }
    count_cpg(seq) as f64 * 100.0 / seq.len() as f64
}

/// Sliding-window CpG density with stride 1.
///
/// Output index `p` covers `seq[p..p + window]`; a site counts only when both
/// of its bases fall inside the window. When the sequence is shorter than the
/// window the whole sequence is used as a single window.
pub fn track_density(seq: &[u8], window: NonZeroUsize) -> Vec<f64> {
    let w = window.get();
    if seq.len() < w {
        return vec![point_density(seq)];
    }

    let pref = cpg_prefix(seq);
    (0..=seq.len() - w)
        .map(|p| {
            // sites starting in [p, p + w - 1) end inside the window
            let sites = pref[p + w - 1] - pref[p];
            sites as f64 * 100.0 / w as f64
        })
        .collect()
}

/// Stateless CpG engine configured with a track window width
#[derive(Debug, Clone, Copy)]
pub struct CpgEngine {
    window: NonZeroUsize,
}

impl Default for CpgEngine {
    fn default() -> Self {
        Self {
            window: NonZeroUsize::new(DEFAULT_TRACK_WINDOW).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl CpgEngine {
    pub fn new(window: NonZeroUsize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window.get()
    }

    /// Raw (linear) densities for one working sequence
    pub fn compute(&self, seq: &[u8], readout: Readout) -> Vec<f64> {
        match readout {
            Readout::Point => vec![point_density(seq)],
            Readout::Track => track_density(seq, self.window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_count_overlapping_sites() {
        assert_eq!(count_cpg(b"ACGCGT"), 2);
        assert_eq!(count_cpg(b"CGCG"), 2);
        assert_eq!(count_cpg(b"cgCg"), 2);
        assert_eq!(count_cpg(b"GC"), 0);
        assert_eq!(count_cpg(b""), 0);
    }

    #[test]
    fn test_point_density() {
        let value = point_density(b"ACGCGT");
        assert!((value - 200.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_density_short_sequence() {
        assert_eq!(point_density(b""), 0.0);
        assert_eq!(point_density(b"C"), 0.0);
        assert_eq!(point_density(b"CG"), 50.0);
    }

    #[test]
    fn test_track_density_window_four() {
        assert_eq!(track_density(b"ACGCGT", w(4)), vec![25.0, 50.0, 25.0]);
    }

    #[test]
    fn test_track_density_matches_point_on_each_window() {
        let seq = b"TTCGACGCGNNCGTACGGCGCAT";
        let window = 7;
        let track = track_density(seq, w(window));
        assert_eq!(track.len(), seq.len() - window + 1);
        for (p, value) in track.iter().enumerate() {
            let expected = point_density(&seq[p..p + window]);
            assert!((value - expected).abs() < 1e-12, "window at {}", p);
        }
    }

    #[test]
    fn test_track_density_sequence_shorter_than_window() {
        let track = track_density(b"ACGCGT", w(DEFAULT_TRACK_WINDOW));
        assert_eq!(track.len(), 1);
        assert!((track[0] - point_density(b"ACGCGT")).abs() < 1e-12);
    }

    #[test]
    fn test_track_density_window_equals_length() {
        assert_eq!(track_density(b"CGCG", w(4)), vec![50.0]);
    }

    #[test]
    fn test_track_density_default_window() {
        let seq = "CG".repeat(75);
        let track = track_density(seq.as_bytes(), w(DEFAULT_TRACK_WINDOW));
        assert_eq!(track.len(), 150 - DEFAULT_TRACK_WINDOW + 1);
        // a 100bp window over CGCG... starting on C holds 50 sites, on G holds 49
        assert_eq!(track[0], 50.0);
        assert_eq!(track[1], 49.0);
    }

    #[test]
    fn test_engine_dispatches_on_readout() {
        let engine = CpgEngine::new(w(4));
        assert_eq!(engine.compute(b"ACGCGT", Readout::Point).len(), 1);
        assert_eq!(engine.compute(b"ACGCGT", Readout::Track).len(), 3);
        assert_eq!(CpgEngine::default().window(), DEFAULT_TRACK_WINDOW);
    }
}
