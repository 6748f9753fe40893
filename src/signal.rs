//! A growable buffer of mono audio samples.
//!
//! [`Signal`] is the sample container the rest of the crate consumes. The
//! detector borrows it read-only for the duration of a detection call, while
//! the windowing functions mutate it in place through
//! [`samples_mut`](Signal::samples_mut). Samples are `f64` values
//! conceptually in the range `[-1.0, 1.0]`.

use serde::{Deserialize, Serialize};

/// An ordered sequence of normalized mono audio samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    samples: Vec<f64>,
}

impl Signal {
    /// Creates an empty signal.
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Creates an empty signal with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Creates a signal that takes ownership of an existing sample vector.
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Appends a single sample.
    pub fn push_sample(&mut self, sample: f64) {
        self.samples.push(sample);
    }

    /// Appends `sample_count` samples of digital silence (zeros).
    pub fn add_silence(&mut self, sample_count: usize) {
        self.samples.resize(self.samples.len() + sample_count, 0.0);
    }

    /// Appends all samples of another signal.
    pub fn append(&mut self, other: &Self) {
        self.samples.extend_from_slice(&other.samples);
    }

    /// Read-only view of the samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Mutable view of the samples, for in-place processing such as
    /// [`windowing`](crate::windowing).
    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Number of samples in the signal.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl From<Vec<f64>> for Signal {
    fn from(samples: Vec<f64>) -> Self {
        Self::from_samples(samples)
    }
}

impl FromIterator<f64> for Signal {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl Extend<f64> for Signal {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

impl AsRef<[f64]> for Signal {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}
