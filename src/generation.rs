//! Deterministic test-signal generation.
//!
//! Small generators for synthesizing material with a known transient
//! structure: silence, steady tones and attack/decay bursts. Useful for
//! exercising detection without shipping audio fixtures.

use std::f64::consts::PI;
use std::time::Duration;

use crate::signal::Signal;

fn sample_count(duration: Duration, sample_rate: u32) -> usize {
    (duration.as_secs_f64() * f64::from(sample_rate)).round() as usize
}

/// Generates a silent signal of the given duration.
pub fn silence(duration: Duration, sample_rate: u32) -> Signal {
    let mut signal = Signal::new();
    signal.add_silence(sample_count(duration, sample_rate));
    signal
}

/// Generates a sine tone at the given frequency and amplitude.
pub fn sine_wave(frequency: f64, duration: Duration, sample_rate: u32, amplitude: f64) -> Signal {
    let count = sample_count(duration, sample_rate);
    let mut signal = Signal::with_capacity(count);
    for i in 0..count {
        let t = i as f64 / f64::from(sample_rate);
        signal.push_sample(amplitude * (2.0 * PI * frequency * t).sin());
    }
    signal
}

/// Generates a transient-shaped burst.
///
/// The signal ramps linearly up to `amplitude` over the attack duration and
/// decays linearly back to zero over the decay duration, which is the
/// envelope shape of a plucked or struck onset.
pub fn attack_burst(attack: Duration, decay: Duration, sample_rate: u32, amplitude: f64) -> Signal {
    let attack_count = sample_count(attack, sample_rate);
    let decay_count = sample_count(decay, sample_rate);

    let mut signal = Signal::with_capacity(attack_count + decay_count);
    for i in 0..attack_count {
        signal.push_sample(amplitude * (i + 1) as f64 / attack_count as f64);
    }
    for i in 0..decay_count {
        signal.push_sample(amplitude * (1.0 - (i + 1) as f64 / decay_count as f64));
    }
    signal
}
