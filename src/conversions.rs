//! Conversions between `f64` signals and signed 16-bit PCM.
//!
//! The mapping is asymmetric so the full `i16` range is reachable:
//! non-negative samples scale by 32767 and negative samples by 32768, both
//! rounded to the nearest integer with ties away from zero. Converting an
//! `i16` to `f64` and back is lossless for every one of the 65536 values.
//! Out-of-range input clamps to the nearest rail.

use crate::error::{TransientError, TransientResult};
use crate::signal::Signal;

/// Converts one sample from `f64` to signed 16-bit PCM.
///
/// Input outside `[-1.0, 1.0]` clamps to `i16::MIN` / `i16::MAX`.
pub fn sample_to_signed16(sample: f64) -> i16 {
    if sample > 0.0 {
        if sample < 1.0 {
            (sample * 32767.0 + 0.5) as i16
        } else {
            i16::MAX
        }
    } else if sample < -1.0 {
        i16::MIN
    } else {
        (sample * 32768.0 - 0.5) as i16
    }
}

/// Converts one sample from signed 16-bit PCM to `f64` in `[-1.0, 1.0]`.
pub fn sample_from_signed16(sample: i16) -> f64 {
    if sample >= 0 {
        f64::from(sample) / 32767.0
    } else {
        f64::from(sample) / 32768.0
    }
}

/// Converts a whole signal to signed 16-bit PCM.
pub fn signal_to_signed16(signal: &Signal) -> Vec<i16> {
    signal
        .samples()
        .iter()
        .map(|&sample| sample_to_signed16(sample))
        .collect()
}

/// Builds a signal from signed 16-bit PCM samples.
pub fn signal_from_signed16(samples: &[i16]) -> Signal {
    samples
        .iter()
        .map(|&sample| sample_from_signed16(sample))
        .collect()
}

/// Interleaves two mono signals into left/right 16-bit stereo frames.
///
/// # Errors
/// [`TransientError::DimensionMismatch`] when the channels differ in length.
pub fn interleave_stereo(left: &Signal, right: &Signal) -> TransientResult<Vec<i16>> {
    if left.len() != right.len() {
        return Err(TransientError::DimensionMismatch(format!(
            "stereo channels must be the same length, got {} and {}",
            left.len(),
            right.len()
        )));
    }

    let mut interleaved = Vec::with_capacity(left.len() * 2);
    for (l, r) in left.samples().iter().zip(right.samples()) {
        interleaved.push(sample_to_signed16(*l));
        interleaved.push(sample_to_signed16(*r));
    }
    Ok(interleaved)
}

/// Splits interleaved 16-bit stereo frames into two mono signals.
///
/// # Errors
/// [`TransientError::DimensionMismatch`] when the sample count is odd.
pub fn deinterleave_stereo(interleaved: &[i16]) -> TransientResult<(Signal, Signal)> {
    if interleaved.len() % 2 != 0 {
        return Err(TransientError::DimensionMismatch(format!(
            "interleaved stereo data must hold an even number of samples, got {}",
            interleaved.len()
        )));
    }

    let mut left = Signal::with_capacity(interleaved.len() / 2);
    let mut right = Signal::with_capacity(interleaved.len() / 2);
    for frame in interleaved.chunks_exact(2) {
        left.push_sample(sample_from_signed16(frame[0]));
        right.push_sample(sample_from_signed16(frame[1]));
    }
    Ok((left, right))
}
