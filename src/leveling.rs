//! Amplitude envelope extraction and level quantization.
//!
//! A detection pass works on a quantized approximation of the signal's
//! amplitude envelope rather than on raw samples. Each pass is parameterized
//! by a *level step*, a duration in milliseconds with two roles:
//!
//! - It selects the analysis frame length: `step × sample_rate / 1000`
//!   samples per frame (rounded, at least one). The detector's default steps
//!   correspond to 512-, 256- and 32-sample frames at 44.1 kHz, so time
//!   resolution scales consistently across sample rates.
//! - It selects the amplitude granularity: a frame's peak magnitude,
//!   expressed as a percentage of full scale, is divided by the step and
//!   rounded down to produce the frame's level. Full scale therefore
//!   quantizes into `⌊100 / step⌋` levels, so the coarse step sees a few
//!   large level jumps while the smaller steps discriminate finely.
//!
//! Only complete frames contribute envelope points; trailing samples that do
//! not fill a frame are not scanned at that pass.

/// Full-scale amplitude expressed in percent, the numerator of the
/// level-quantization scale.
const FULL_SCALE_PERCENT: f64 = 100.0;

/// Number of samples contributing to one envelope point at the given level
/// step.
///
/// # Arguments
/// * `level_step` - Pass resolution in milliseconds
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// Frame length in samples, never less than one.
pub fn frame_length(level_step: f64, sample_rate: u32) -> usize {
    (level_step * f64::from(sample_rate) / 1000.0).round().max(1.0) as usize
}

/// Extracts the peak-magnitude envelope of a signal.
///
/// Each complete `frame_length`-sized frame contributes one envelope point:
/// the largest absolute sample value inside the frame. Trailing samples that
/// do not fill a frame are ignored, as is a zero frame length.
pub fn peak_envelope(samples: &[f64], frame_length: usize) -> Vec<f64> {
    if frame_length == 0 {
        return Vec::new();
    }

    samples
        .chunks_exact(frame_length)
        .map(|frame| {
            frame
                .iter()
                .fold(0.0_f64, |peak, &sample| peak.max(sample.abs()))
        })
        .collect()
}

/// Quantizes a peak magnitude into a discrete envelope level.
///
/// The magnitude is a fraction of full scale (`0.0..=1.0` for normalized
/// audio). It is expressed as a percentage of full scale and divided by the
/// level step, rounded down, so a larger magnitude never yields a smaller
/// level and a smaller step yields more levels per unit amplitude.
pub fn quantize_level(magnitude: f64, level_step: f64) -> u32 {
    (magnitude * FULL_SCALE_PERCENT / level_step).floor() as u32
}

/// Quantized envelope of a signal at the given frame length and level step.
///
/// Convenience composition of [`peak_envelope`] and [`quantize_level`]; this
/// is the sequence a detection pass scans.
pub fn level_sequence(samples: &[f64], frame_length: usize, level_step: f64) -> Vec<u32> {
    peak_envelope(samples, frame_length)
        .into_iter()
        .map(|magnitude| quantize_level(magnitude, level_step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_steps_map_to_reference_frames() {
        // The detector defaults are the millisecond spans of 512/256/32
        // sample frames at 44.1 kHz.
        assert_eq!(frame_length(11.60998, 44_100), 512);
        assert_eq!(frame_length(5.80499, 44_100), 256);
        assert_eq!(frame_length(0.725623, 44_100), 32);
    }

    #[test]
    fn test_frame_length_scales_with_sample_rate() {
        assert_eq!(frame_length(11.60998, 22_050), 256);
        assert_eq!(frame_length(11.60998, 88_200), 1024);
    }

    #[test]
    fn test_frame_length_is_at_least_one_sample() {
        assert_eq!(frame_length(0.725623, 500), 1);
    }

    #[test]
    fn test_peak_envelope_takes_frame_maxima() {
        let samples = vec![0.1, -0.4, 0.2, 0.0, -0.9, 0.3, 0.5];
        let envelope = peak_envelope(&samples, 2);

        // The trailing sample does not fill a frame and is dropped.
        assert_eq!(envelope, vec![0.4, 0.2, 0.9]);
    }

    #[test]
    fn test_peak_envelope_empty_for_short_input() {
        assert!(peak_envelope(&[0.5, 0.5], 3).is_empty());
        assert!(peak_envelope(&[0.5], 0).is_empty());
    }

    #[test]
    fn test_quantize_level_is_floor_of_percent_over_step() {
        assert_eq!(quantize_level(0.0, 11.60998), 0);
        assert_eq!(quantize_level(0.9, 11.60998), 7);
        assert_eq!(quantize_level(0.9, 5.80499), 15);
        assert_eq!(quantize_level(0.9, 0.725623), 124);
        // Full scale resolves to ⌊100 / step⌋ levels per pass.
        assert_eq!(quantize_level(1.0, 11.60998), 8);
        assert_eq!(quantize_level(1.0, 5.80499), 17);
        assert_eq!(quantize_level(1.0, 0.725623), 137);
    }

    #[test]
    fn test_quantize_level_is_monotonic() {
        let mut previous = 0;
        for i in 0..=100 {
            let level = quantize_level(i as f64 / 100.0, 5.80499);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_level_sequence_quantizes_envelope() {
        let samples = vec![0.0, 0.0, 0.3, -0.6, 0.05, 0.0];
        let levels = level_sequence(&samples, 2, 11.60998);

        assert_eq!(levels, vec![0, 5, 0]);
    }
}
