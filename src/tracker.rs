//! Valley-to-peak rise scanning over quantized envelope levels.
//!
//! One detection pass walks a level sequence produced by
//! [`leveling`](crate::leveling) and looks for a local minimum (the
//! *valley*) followed by a local maximum (the *peak*) whose rise is steep
//! enough to count as a transient. The scan is a small state machine:
//!
//! 1. While the level stays at or below the current valley, the valley
//!    advances. A flat stretch therefore ends at the frame just before the
//!    rise.
//! 2. Once the level exceeds the valley, the running maximum is tracked as
//!    the current peak. Ties do not advance the peak, so a plateau keeps its
//!    first frame.
//! 3. When the level falls below the current peak, or the range ends while a
//!    rise is in progress, the candidate rise is evaluated: it is accepted
//!    iff `peak ≥ valley × ratio` and `peak > valley`. Either way the valley
//!    restarts at the current frame and scanning continues, so a rejected
//!    weak rise never hides a following stronger one.
//!
//! All-silent and all-flat sequences never leave step 1 and produce no
//! candidates.

use serde::{Deserialize, Serialize};

/// Diagnostic record of one accepted valley-to-peak rise.
///
/// Sample positions are absolute indices into the analyzed signal:
/// `valley_point` is the first sample of the valley frame and `peak_point`
/// the last sample of the peak frame, so the inclusive range
/// `[valley_point, peak_point]` spans every frame the rise covered.
/// `valley_point <= peak_point` holds for every non-empty record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakAndValleyInfo {
    /// Absolute sample index where the valley frame begins.
    pub valley_point: usize,
    /// Absolute sample index where the peak frame ends.
    pub peak_point: usize,
    /// Quantized levels traversed from the valley frame to the peak frame,
    /// inclusive; empty when the pass found no rise.
    pub plotted_points: Vec<u32>,
}

impl PeakAndValleyInfo {
    /// The degenerate record of a pass that found no rise: both points zero,
    /// no plotted levels.
    pub const fn empty() -> Self {
        Self {
            valley_point: 0,
            peak_point: 0,
            plotted_points: Vec::new(),
        }
    }

    /// Returns `true` when the record's pass found no rise.
    pub fn is_empty(&self) -> bool {
        self.plotted_points.is_empty()
    }
}

impl Default for PeakAndValleyInfo {
    fn default() -> Self {
        Self::empty()
    }
}

/// Scans a level sequence and returns every accepted rise, in order.
///
/// `frame_length` and `base_sample` anchor frame indices back to absolute
/// sample positions: the level at index `i` describes the samples
/// `base_sample + i * frame_length ..` for one frame.
pub(crate) fn scan_levels(
    levels: &[u32],
    valley_to_peak_ratio: f64,
    frame_length: usize,
    base_sample: usize,
) -> Vec<PeakAndValleyInfo> {
    let mut rises = Vec::new();
    if levels.len() < 2 {
        return rises;
    }

    let mut valley = 0_usize;
    let mut peak: Option<usize> = None;

    for current in 1..levels.len() {
        let level = levels[current];
        match peak {
            None => {
                if level <= levels[valley] {
                    valley = current;
                } else {
                    peak = Some(current);
                }
            }
            Some(p) => {
                if level > levels[p] {
                    peak = Some(current);
                } else if level < levels[p] {
                    if let Some(info) =
                        evaluate_rise(levels, valley, p, valley_to_peak_ratio, frame_length, base_sample)
                    {
                        rises.push(info);
                    }
                    valley = current;
                    peak = None;
                }
            }
        }
    }

    // A rise still in progress at the end of the range is a candidate too.
    if let Some(p) = peak {
        if let Some(info) =
            evaluate_rise(levels, valley, p, valley_to_peak_ratio, frame_length, base_sample)
        {
            rises.push(info);
        }
    }

    rises
}

fn evaluate_rise(
    levels: &[u32],
    valley: usize,
    peak: usize,
    valley_to_peak_ratio: f64,
    frame_length: usize,
    base_sample: usize,
) -> Option<PeakAndValleyInfo> {
    let valley_level = levels[valley];
    let peak_level = levels[peak];

    let non_trivial = peak_level > valley_level;
    let steep_enough = f64::from(peak_level) >= f64::from(valley_level) * valley_to_peak_ratio;
    if !(non_trivial && steep_enough) {
        return None;
    }

    Some(PeakAndValleyInfo {
        valley_point: base_sample + valley * frame_length,
        peak_point: base_sample + (peak + 1) * frame_length - 1,
        plotted_points: levels[valley..=peak].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_yields_no_rises() {
        assert!(scan_levels(&[0, 0, 0, 0], 1.5, 4, 0).is_empty());
    }

    #[test]
    fn test_flat_signal_yields_no_rises() {
        assert!(scan_levels(&[5, 5, 5, 5], 1.5, 4, 0).is_empty());
    }

    #[test]
    fn test_falling_signal_yields_no_rises() {
        assert!(scan_levels(&[9, 5, 3, 1], 1.5, 4, 0).is_empty());
    }

    #[test]
    fn test_degenerate_sequences_yield_no_rises() {
        assert!(scan_levels(&[], 1.5, 4, 0).is_empty());
        assert!(scan_levels(&[7], 1.5, 4, 0).is_empty());
    }

    #[test]
    fn test_simple_rise_is_recorded() {
        let rises = scan_levels(&[0, 0, 3, 1], 1.5, 4, 0);

        assert_eq!(rises.len(), 1);
        // Ties advance the valley, so it sits on the frame before the rise.
        assert_eq!(rises[0].valley_point, 4);
        assert_eq!(rises[0].peak_point, 11);
        assert_eq!(rises[0].plotted_points, vec![0, 3]);
    }

    #[test]
    fn test_rise_at_end_of_range_is_evaluated() {
        let rises = scan_levels(&[1, 1, 4], 1.5, 10, 0);

        assert_eq!(rises.len(), 1);
        assert_eq!(rises[0].valley_point, 10);
        assert_eq!(rises[0].peak_point, 29);
        assert_eq!(rises[0].plotted_points, vec![1, 4]);
    }

    #[test]
    fn test_ratio_rejects_shallow_rise() {
        // 3 >= 2 * 1.5 accepts, 3 < 2 * 2.0 rejects.
        assert_eq!(scan_levels(&[2, 2, 3, 2], 1.5, 4, 0).len(), 1);
        assert!(scan_levels(&[2, 2, 3, 2], 2.0, 4, 0).is_empty());
    }

    #[test]
    fn test_rejected_rise_does_not_hide_later_rise() {
        let rises = scan_levels(&[2, 2, 3, 2, 8, 1], 2.0, 4, 0);

        assert_eq!(rises.len(), 1);
        // The valley restarted on the fall frame after the rejected rise.
        assert_eq!(rises[0].valley_point, 12);
        assert_eq!(rises[0].plotted_points, vec![2, 8]);
    }

    #[test]
    fn test_plateau_keeps_first_peak_frame() {
        let rises = scan_levels(&[0, 5, 5, 2], 1.5, 4, 0);

        assert_eq!(rises.len(), 1);
        assert_eq!(rises[0].valley_point, 0);
        assert_eq!(rises[0].peak_point, 7);
        assert_eq!(rises[0].plotted_points, vec![0, 5]);
    }

    #[test]
    fn test_multiple_rises_come_back_in_order() {
        let rises = scan_levels(&[0, 3, 1, 6, 2], 1.5, 4, 0);

        assert_eq!(rises.len(), 2);
        assert!(rises[0].valley_point < rises[1].valley_point);
        assert!(rises[0].peak_point < rises[1].peak_point);
        assert_eq!(rises[0].plotted_points, vec![0, 3]);
        assert_eq!(rises[1].plotted_points, vec![1, 6]);
    }

    #[test]
    fn test_base_sample_offsets_points() {
        let rises = scan_levels(&[0, 2, 0], 1.0, 10, 100);

        assert_eq!(rises.len(), 1);
        assert_eq!(rises[0].valley_point, 100);
        assert_eq!(rises[0].peak_point, 119);
    }

    #[test]
    fn test_rise_from_silence_always_accepted() {
        // A zero valley satisfies any ratio.
        let rises = scan_levels(&[0, 1, 0], 100.0, 4, 0);
        assert_eq!(rises.len(), 1);
    }

    #[test]
    fn test_empty_record_invariants() {
        let record = PeakAndValleyInfo::empty();

        assert!(record.is_empty());
        assert_eq!(record.valley_point, 0);
        assert_eq!(record.peak_point, 0);
        assert_eq!(record, PeakAndValleyInfo::default());
    }
}
