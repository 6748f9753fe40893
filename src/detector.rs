//! The transient detection engine and its configuration.
//!
//! [`TransientDetector`] locates the sample positions of transients (sharp
//! onsets of energy such as drum hits or plucks) in a mono signal. Detection
//! runs as a cascade of three passes over the quantized amplitude envelope:
//! a coarse pass scans the whole signal for valley-to-peak rises that pass
//! the configured ratio test, then two finer passes re-scan each hit's own
//! neighborhood to pin the onset down to progressively shorter frames. The
//! result is a [`TransientAnalysis`] carrying the ordered onset positions
//! together with the per-pass [`PeakAndValleyInfo`] diagnostics of every
//! confirmed transient.

use serde::{Deserialize, Serialize};

use crate::cascade::{PASS_COUNT, RefinedTransient, run_cascade};
use crate::error::{TransientError, TransientResult};
use crate::signal::Signal;
use crate::tracker::PeakAndValleyInfo;

/// Identifies one of the three detection passes in diagnostic queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// The coarse pass over the entire signal.
    First,
    /// The medium refinement pass over each candidate's window.
    Second,
    /// The fine refinement pass that settles the reported position.
    Third,
}

impl Step {
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }
}

/// Tunable parameters of a [`TransientDetector`].
///
/// The three level steps are durations in milliseconds with a dual role per
/// pass: they fix the analysis frame length for that pass and the amplitude
/// granularity of its envelope levels (see [`leveling`](crate::leveling)).
/// The defaults are the spans of 512-, 256- and 32-sample frames at the
/// 44.1 kHz reference rate and are the same at every sample rate; the frame
/// lengths derived from them scale with the rate, so detection resolves the
/// same time spans on differently-sampled material.
///
/// Setters perform no range clamping. The configuration is checked once per
/// [`TransientDetector::find_transients`] call instead, so an intermediate
/// nonsensical value assigned between calls never causes an error on its
/// own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum required ratio of peak level to valley level for a rise to be
    /// accepted as a transient. Higher values accept only stronger onsets.
    pub valley_to_peak_ratio: f64,
    /// Level step of the coarse pass, in milliseconds.
    pub first_level_step: f64,
    /// Level step of the medium pass, in milliseconds.
    pub second_level_step: f64,
    /// Level step of the fine pass, in milliseconds.
    pub third_level_step: f64,
}

impl DetectorConfig {
    /// Creates the default configuration.
    ///
    /// - Valley-to-peak ratio of 1.5
    /// - 11.60998 ms coarse step (512-sample frames at 44.1 kHz)
    /// - 5.80499 ms medium step (256-sample frames at 44.1 kHz)
    /// - 0.725623 ms fine step (32-sample frames at 44.1 kHz)
    ///
    /// The step values are load-bearing defaults: sample positions reported
    /// for reference material depend on them, so they are reproduced here
    /// digit for digit rather than derived.
    pub const fn new() -> Self {
        Self {
            valley_to_peak_ratio: 1.5,
            first_level_step: 11.60998,
            second_level_step: 5.80499,
            third_level_step: 0.725623,
        }
    }

    /// Configuration that accepts weak onsets.
    ///
    /// Halves the default ratio so shallow rises out of a quiet but non-zero
    /// noise floor still register. Useful for soft material such as fingered
    /// guitar or brushed percussion.
    pub const fn sensitive() -> Self {
        let mut config = Self::new();
        config.valley_to_peak_ratio = 0.5;
        config
    }

    /// Configuration that accepts only pronounced onsets.
    ///
    /// Requires a tenfold level rise, which keeps hard drum hits and drops
    /// everything else. Useful when onsets anchor coarse edit points and
    /// false positives cost more than misses.
    pub const fn selective() -> Self {
        let mut config = Self::new();
        config.valley_to_peak_ratio = 10.0;
        config
    }

    /// Checks that the configuration describes a runnable detection.
    ///
    /// Level steps must be finite and positive; the ratio must be finite and
    /// non-negative.
    ///
    /// # Returns
    /// `Ok(())` when valid, otherwise a description of the offending field.
    pub fn validate(&self) -> Result<(), String> {
        let steps = [
            ("first_level_step", self.first_level_step),
            ("second_level_step", self.second_level_step),
            ("third_level_step", self.third_level_step),
        ];
        for (name, step) in steps {
            if !step.is_finite() || step <= 0.0 {
                return Err(format!("{name} must be finite and positive, got {step}"));
            }
        }

        if !self.valley_to_peak_ratio.is_finite() || self.valley_to_peak_ratio < 0.0 {
            return Err(format!(
                "valley_to_peak_ratio must be finite and non-negative, got {}",
                self.valley_to_peak_ratio
            ));
        }

        Ok(())
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Cascaded multi-resolution transient detector.
///
/// A detector is constructed once per sample rate and may be reused for any
/// number of signals at that rate. Detection itself takes `&self` and
/// returns a fresh [`TransientAnalysis`] per call, so a detector is freely
/// shareable across threads and earlier results never go stale when the
/// configuration changes between calls.
///
/// # Examples
///
/// ```
/// use audio_transients::{Signal, TransientDetector};
///
/// // 20k samples of silence, then a sharp attack with a long decay.
/// let mut signal = Signal::new();
/// signal.add_silence(20_000);
/// for i in 0..100 {
///     signal.push_sample(0.9 * (i + 1) as f64 / 100.0);
/// }
/// for i in 0..30_000 {
///     signal.push_sample(0.9 * (1.0 - (i + 1) as f64 / 30_000.0));
/// }
///
/// let detector = TransientDetector::new(44_100);
/// let analysis = detector.find_transients(&signal)?;
/// assert_eq!(analysis.transient_count(), 1);
/// # Ok::<(), audio_transients::TransientError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransientDetector {
    sample_rate: u32,
    config: DetectorConfig,
}

impl TransientDetector {
    /// Creates a detector with the default configuration for the given
    /// sample rate.
    pub const fn new(sample_rate: u32) -> Self {
        Self::with_config(sample_rate, DetectorConfig::new())
    }

    /// Creates a detector with an explicit configuration.
    pub const fn with_config(sample_rate: u32, config: DetectorConfig) -> Self {
        Self {
            sample_rate,
            config,
        }
    }

    /// Sample rate the detector was constructed for, in Hz.
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Current configuration.
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Minimum required peak-to-valley level ratio.
    pub const fn valley_to_peak_ratio(&self) -> f64 {
        self.config.valley_to_peak_ratio
    }

    /// Sets the minimum required peak-to-valley level ratio.
    ///
    /// Only future [`find_transients`](Self::find_transients) calls are
    /// affected.
    pub fn set_valley_to_peak_ratio(&mut self, ratio: f64) {
        self.config.valley_to_peak_ratio = ratio;
    }

    /// Level step of the coarse pass, in milliseconds.
    pub const fn first_level_step(&self) -> f64 {
        self.config.first_level_step
    }

    /// Sets the level step of the coarse pass, in milliseconds.
    pub fn set_first_level_step(&mut self, step: f64) {
        self.config.first_level_step = step;
    }

    /// Level step of the medium pass, in milliseconds.
    pub const fn second_level_step(&self) -> f64 {
        self.config.second_level_step
    }

    /// Sets the level step of the medium pass, in milliseconds.
    pub fn set_second_level_step(&mut self, step: f64) {
        self.config.second_level_step = step;
    }

    /// Level step of the fine pass, in milliseconds.
    pub const fn third_level_step(&self) -> f64 {
        self.config.third_level_step
    }

    /// Sets the level step of the fine pass, in milliseconds.
    pub fn set_third_level_step(&mut self, step: f64) {
        self.config.third_level_step = step;
    }

    /// Locates every transient in a signal.
    ///
    /// Runs the three-pass cascade once over the whole signal and returns
    /// the onset positions in strictly ascending sample order, together with
    /// the per-pass diagnostics of each confirmed transient. Detection is a
    /// pure function of the signal and the configuration at call time:
    /// identical inputs produce identical analyses, and configuration
    /// changes after the call leave the returned analysis untouched.
    ///
    /// Empty, silent and constant signals are not errors; they yield an
    /// analysis with zero transients.
    ///
    /// # Errors
    /// [`TransientError::InvalidParameter`] when the current configuration
    /// fails [`DetectorConfig::validate`].
    pub fn find_transients(&self, signal: &Signal) -> TransientResult<TransientAnalysis> {
        self.config
            .validate()
            .map_err(|e| TransientError::InvalidParameter(format!("Invalid detector config: {e}")))?;

        let level_steps = [
            self.config.first_level_step,
            self.config.second_level_step,
            self.config.third_level_step,
        ];
        let refined = run_cascade(
            signal.samples(),
            self.sample_rate,
            self.config.valley_to_peak_ratio,
            level_steps,
        );
        tracing::debug!(
            "detected {} transient(s) in {} samples",
            refined.len(),
            signal.len()
        );

        Ok(TransientAnalysis::from_refined(refined))
    }
}

/// The result of one [`TransientDetector::find_transients`] call.
///
/// Owns both the final transient positions and the diagnostic records of
/// every pass, indexed by transient (in detection order) and by [`Step`].
/// Analyses are plain values: they stay valid indefinitely, independent of
/// the detector and of any later detection calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransientAnalysis {
    positions: Vec<usize>,
    records: Vec<[PeakAndValleyInfo; PASS_COUNT]>,
}

impl TransientAnalysis {
    pub(crate) fn from_refined(refined: Vec<RefinedTransient>) -> Self {
        let mut positions = Vec::with_capacity(refined.len());
        let mut records = Vec::with_capacity(refined.len());
        for transient in refined {
            positions.push(transient.position);
            records.push(transient.records);
        }
        Self { positions, records }
    }

    /// Onset sample positions in strictly ascending order.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of transients found.
    pub fn transient_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` when no transients were found.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Diagnostic record of one transient at one detection pass.
    ///
    /// The record of the [`Step::First`] pass is always non-empty. A finer
    /// pass that found no rise inside its window is represented by the empty
    /// record ([`PeakAndValleyInfo::empty`]); the reported position then
    /// comes from the last pass with a non-empty record.
    ///
    /// # Errors
    /// [`TransientError::UnknownTransient`] when `transient` is not below
    /// [`transient_count`](Self::transient_count).
    ///
    /// # Examples
    ///
    /// ```
    /// use audio_transients::{Signal, Step, TransientDetector};
    ///
    /// let mut signal = Signal::new();
    /// signal.add_silence(20_000);
    /// for i in 0..100 {
    ///     signal.push_sample((i + 1) as f64 / 100.0);
    /// }
    /// signal.add_silence(20_000);
    ///
    /// let detector = TransientDetector::new(44_100);
    /// let analysis = detector.find_transients(&signal)?;
    ///
    /// let coarse = analysis.peak_and_valley_info(0, Step::First)?;
    /// assert!(coarse.valley_point <= coarse.peak_point);
    /// assert!(analysis.peak_and_valley_info(99, Step::First).is_err());
    /// # Ok::<(), audio_transients::TransientError>(())
    /// ```
    pub fn peak_and_valley_info(
        &self,
        transient: usize,
        step: Step,
    ) -> TransientResult<&PeakAndValleyInfo> {
        self.records
            .get(transient)
            .map(|passes| &passes[step.index()])
            .ok_or(TransientError::UnknownTransient(transient))
    }
}
