//! Three-pass coarse-to-fine refinement of transient candidates.
//!
//! The coarse pass scans the whole signal and enumerates every accepted
//! rise. Each candidate is then re-scanned twice over the narrow window its
//! previous pass flagged, at a smaller level step each time, to pin the
//! onset down to finer frame granularity. A pass that finds nothing inside
//! its window leaves the window and the reported position exactly as the
//! last successful pass resolved them.

use crate::leveling::{frame_length, level_sequence};
use crate::tracker::{PeakAndValleyInfo, scan_levels};

/// Number of detection passes in the cascade.
pub(crate) const PASS_COUNT: usize = 3;

/// One transient after full refinement: the reported onset position and the
/// per-pass diagnostic records.
#[derive(Debug, Clone)]
pub(crate) struct RefinedTransient {
    pub(crate) position: usize,
    pub(crate) records: [PeakAndValleyInfo; PASS_COUNT],
}

/// Runs the full cascade over a signal.
///
/// Candidates come back in ascending position order: the coarse scan walks
/// the signal left to right and refinement never leaves a candidate's own
/// window, so distinct candidates cannot reorder.
pub(crate) fn run_cascade(
    samples: &[f64],
    sample_rate: u32,
    valley_to_peak_ratio: f64,
    level_steps: [f64; PASS_COUNT],
) -> Vec<RefinedTransient> {
    let coarse_length = frame_length(level_steps[0], sample_rate);
    let coarse_levels = level_sequence(samples, coarse_length, level_steps[0]);
    let candidates = scan_levels(&coarse_levels, valley_to_peak_ratio, coarse_length, 0);
    tracing::debug!("coarse pass found {} candidate rises", candidates.len());

    candidates
        .into_iter()
        .map(|candidate| {
            refine_candidate(samples, sample_rate, valley_to_peak_ratio, level_steps, candidate)
        })
        .collect()
}

fn refine_candidate(
    samples: &[f64],
    sample_rate: u32,
    valley_to_peak_ratio: f64,
    level_steps: [f64; PASS_COUNT],
    coarse: PeakAndValleyInfo,
) -> RefinedTransient {
    let mut window = (coarse.valley_point, coarse.peak_point);
    let mut position = coarse.peak_point;
    let mut records = [
        coarse,
        PeakAndValleyInfo::empty(),
        PeakAndValleyInfo::empty(),
    ];

    for pass in 1..PASS_COUNT {
        match refine_window(
            samples,
            sample_rate,
            valley_to_peak_ratio,
            level_steps[pass],
            window,
        ) {
            Some(info) => {
                window = (info.valley_point, info.peak_point);
                position = info.peak_point;
                records[pass] = info;
            }
            None => {
                tracing::trace!(
                    "pass {} found no rise in window [{}, {}], keeping previous result",
                    pass + 1,
                    window.0,
                    window.1
                );
            }
        }
    }

    RefinedTransient { position, records }
}

/// Re-scans one candidate window at a finer level step.
///
/// Returns the first accepted rise, or `None` when the window holds fewer
/// than two complete frames or no rise satisfies the ratio test at this
/// resolution.
fn refine_window(
    samples: &[f64],
    sample_rate: u32,
    valley_to_peak_ratio: f64,
    level_step: f64,
    (start, end): (usize, usize),
) -> Option<PeakAndValleyInfo> {
    let length = frame_length(level_step, sample_rate);
    let window = &samples[start..=end];
    if window.len() < length.saturating_mul(2) {
        return None;
    }

    let levels = level_sequence(window, length, level_step);
    scan_levels(&levels, valley_to_peak_ratio, length, start)
        .into_iter()
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_STEPS: [f64; PASS_COUNT] = [11.60998, 5.80499, 0.725623];

    /// Silence, then a linear attack to `amplitude` and a linear decay back
    /// to zero.
    fn burst(silence: usize, attack: usize, decay: usize, amplitude: f64) -> Vec<f64> {
        let mut samples = vec![0.0; silence];
        for i in 0..attack {
            samples.push(amplitude * (i + 1) as f64 / attack as f64);
        }
        for i in 0..decay {
            samples.push(amplitude * (1.0 - (i + 1) as f64 / decay as f64));
        }
        samples
    }

    #[test]
    fn test_empty_and_short_signals_produce_no_candidates() {
        assert!(run_cascade(&[], 44_100, 1.5, DEFAULT_STEPS).is_empty());
        assert!(run_cascade(&[0.9; 100], 44_100, 1.5, DEFAULT_STEPS).is_empty());
    }

    #[test]
    fn test_passes_nest_inside_the_coarse_window() {
        let samples = burst(10_000, 100, 30_000, 0.9);
        let refined = run_cascade(&samples, 44_100, 1.5, DEFAULT_STEPS);

        assert_eq!(refined.len(), 1);
        let records = &refined[0].records;
        assert!(records.iter().all(|record| !record.is_empty()));

        for pass in 1..PASS_COUNT {
            assert!(records[pass].valley_point >= records[pass - 1].valley_point);
            assert!(records[pass].peak_point <= records[pass - 1].peak_point);
        }
        assert_eq!(refined[0].position, records[2].peak_point);
    }

    #[test]
    fn test_pass_without_rise_keeps_previous_result() {
        // A third step far coarser than the second cannot fit two frames
        // into the refined window, so the final pass comes back empty.
        let samples = burst(10_000, 100, 30_000, 0.9);
        let steps = [11.60998, 5.80499, 20.0];
        let refined = run_cascade(&samples, 44_100, 1.5, steps);

        assert_eq!(refined.len(), 1);
        let records = &refined[0].records;
        assert!(!records[1].is_empty());
        assert!(records[2].is_empty());
        assert_eq!(refined[0].position, records[1].peak_point);
    }

    #[test]
    fn test_candidates_keep_ascending_order() {
        let mut samples = burst(10_000, 100, 20_000, 0.9);
        samples.extend(burst(10_000, 100, 20_000, 0.8));
        let refined = run_cascade(&samples, 44_100, 1.5, DEFAULT_STEPS);

        assert_eq!(refined.len(), 2);
        assert!(refined[0].position < refined[1].position);
    }
}
