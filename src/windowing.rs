//! In-place amplitude windowing.
//!
//! These functions shape a buffer (or a percent sub-range of one) with a
//! smoothing envelope, tapering the edges of spliced audio regions so cuts
//! land without clicks. A Blackman window fades a segment in and out while
//! its complement keeps the edges and notches out the middle; the linear
//! fade is a cheap triangular ramp over a whole buffer.
//!
//! Sub-ranges are addressed in percent of the buffer length. A selected
//! segment shorter than two samples is left untouched.

use std::f64::consts::PI;

use crate::error::{TransientError, TransientResult};

/// Blackman coefficient at position `n` of a window whose last position is
/// `last`.
fn blackman_weight(n: f64, last: f64) -> f64 {
    0.42 - 0.5 * (2.0 * PI * n / last).cos() + 0.08 * (4.0 * PI * n / last).cos()
}

/// Resolves a percent range into sample indices (start inclusive, end
/// exclusive).
fn segment_bounds(
    len: usize,
    start_percent: f64,
    end_percent: f64,
) -> TransientResult<(usize, usize)> {
    if !(0.0..=100.0).contains(&start_percent) || !(0.0..=100.0).contains(&end_percent) {
        return Err(TransientError::InvalidParameter(format!(
            "window percents must lie in [0, 100], got {start_percent} and {end_percent}"
        )));
    }
    if start_percent > end_percent {
        return Err(TransientError::InvalidParameter(format!(
            "window start percent {start_percent} exceeds end percent {end_percent}"
        )));
    }

    let start = (start_percent / 100.0 * len as f64).round() as usize;
    let end = (end_percent / 100.0 * len as f64).round() as usize;
    Ok((start.min(len), end.min(len)))
}

/// Applies a Blackman window to a percent sub-range of `samples`.
///
/// The window spans exactly the selected segment, so the segment fades in
/// from (near) zero, crests at its center and fades back out. Passing
/// `0.0, 100.0` windows the whole buffer.
///
/// # Errors
/// [`TransientError::InvalidParameter`] when a percent lies outside
/// `[0, 100]` or the range is inverted.
pub fn blackman_window(
    samples: &mut [f64],
    start_percent: f64,
    end_percent: f64,
) -> TransientResult<()> {
    let (start, end) = segment_bounds(samples.len(), start_percent, end_percent)?;
    let segment = &mut samples[start..end];
    if segment.len() < 2 {
        return Ok(());
    }

    let last = (segment.len() - 1) as f64;
    for (n, sample) in segment.iter_mut().enumerate() {
        *sample *= blackman_weight(n as f64, last);
    }
    Ok(())
}

/// Applies the complement of a Blackman window to a percent sub-range of
/// `samples`.
///
/// Each sample is scaled by one minus the Blackman coefficient, so the
/// segment keeps its edges and suppresses its center. Splitting a buffer
/// through [`blackman_window`] and this function yields two parts that sum
/// back to the original.
///
/// # Errors
/// [`TransientError::InvalidParameter`] when a percent lies outside
/// `[0, 100]` or the range is inverted.
pub fn inverse_blackman_window(
    samples: &mut [f64],
    start_percent: f64,
    end_percent: f64,
) -> TransientResult<()> {
    let (start, end) = segment_bounds(samples.len(), start_percent, end_percent)?;
    let segment = &mut samples[start..end];
    if segment.len() < 2 {
        return Ok(());
    }

    let last = (segment.len() - 1) as f64;
    for (n, sample) in segment.iter_mut().enumerate() {
        *sample *= 1.0 - blackman_weight(n as f64, last);
    }
    Ok(())
}

/// Applies a triangular fade-in/fade-out over the whole buffer.
///
/// The first and last samples go to zero and the center is left at full
/// amplitude. Buffers shorter than two samples are left untouched.
pub fn linear_fade_in_out(samples: &mut [f64]) {
    if samples.len() < 2 {
        return;
    }

    let last = (samples.len() - 1) as f64;
    for (i, sample) in samples.iter_mut().enumerate() {
        *sample *= 1.0 - (2.0 * i as f64 / last - 1.0).abs();
    }
}

#[cfg(test)]
mod tests {
    use approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_blackman_shape() {
        let mut samples = vec![1.0; 101];
        blackman_window(&mut samples, 0.0, 100.0).unwrap();

        // Near zero at both edges, unity at the center.
        assert!(samples[0].abs() < 1e-12);
        assert!(samples[100].abs() < 1e-12);
        assert_approx_eq!(samples[50], 1.0, 1e-10);

        // Monotone rise over the first half.
        for pair in samples[..51].windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_blackman_sub_range_leaves_rest_untouched() {
        let mut samples = vec![1.0; 100];
        blackman_window(&mut samples, 25.0, 75.0).unwrap();

        for &sample in &samples[..25] {
            assert_eq!(sample, 1.0);
        }
        for &sample in &samples[75..] {
            assert_eq!(sample, 1.0);
        }
        // The segment itself was tapered.
        assert!(samples[25].abs() < 1e-12);
        assert!(samples[50] < 1.0);
    }

    #[test]
    fn test_blackman_and_inverse_sum_to_original() {
        let original: Vec<f64> = (0..64).map(|i| 0.5 + 0.01 * i as f64).collect();

        let mut windowed = original.clone();
        let mut inverted = original.clone();
        blackman_window(&mut windowed, 0.0, 100.0).unwrap();
        inverse_blackman_window(&mut inverted, 0.0, 100.0).unwrap();

        for i in 0..original.len() {
            assert_approx_eq!(windowed[i] + inverted[i], original[i], 1e-10);
        }
    }

    #[test]
    fn test_inverse_blackman_keeps_edges() {
        let mut samples = vec![1.0; 101];
        inverse_blackman_window(&mut samples, 0.0, 100.0).unwrap();

        assert_approx_eq!(samples[0], 1.0, 1e-10);
        assert_approx_eq!(samples[100], 1.0, 1e-10);
        assert!(samples[50].abs() < 1e-12);
    }

    #[test]
    fn test_invalid_percents_are_rejected() {
        let mut samples = vec![1.0; 10];

        assert!(matches!(
            blackman_window(&mut samples, -5.0, 50.0),
            Err(TransientError::InvalidParameter(_))
        ));
        assert!(matches!(
            blackman_window(&mut samples, 0.0, 120.0),
            Err(TransientError::InvalidParameter(_))
        ));
        assert!(matches!(
            blackman_window(&mut samples, 80.0, 20.0),
            Err(TransientError::InvalidParameter(_))
        ));
        assert!(matches!(
            inverse_blackman_window(&mut samples, f64::NAN, 100.0),
            Err(TransientError::InvalidParameter(_))
        ));

        // Rejected calls leave the buffer untouched.
        assert!(samples.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn test_degenerate_segments_are_untouched() {
        let mut samples = vec![0.7; 100];
        blackman_window(&mut samples, 50.0, 50.0).unwrap();
        blackman_window(&mut samples, 50.0, 51.0).unwrap();
        assert!(samples.iter().all(|&s| s == 0.7));

        let mut single = [0.3];
        linear_fade_in_out(&mut single);
        assert_eq!(single[0], 0.3);

        let mut empty: [f64; 0] = [];
        linear_fade_in_out(&mut empty);
    }

    #[test]
    fn test_linear_fade_shape() {
        let mut samples = vec![1.0; 5];
        linear_fade_in_out(&mut samples);

        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[4], 0.0);
        assert_approx_eq!(samples[1], 0.5, 1e-10);
        assert_approx_eq!(samples[2], 1.0, 1e-10);
        assert_approx_eq!(samples[3], 0.5, 1e-10);
    }
}
