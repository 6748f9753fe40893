// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms
// #![warn(clippy::unreachable)] // Detects unreachable code

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::box_collection)] // Warns on boxed `Vec`, `String`, etc.
#![warn(clippy::vec_box)] // Avoids using `Vec<Box<T>>` when unnecessary
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_safety_doc)] // Docs for `unsafe` functions
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![deny(missing_docs)] // Documentation is a must for release

//! # AudioTransients
//!
//! A transient detection library for Rust that locates the onsets of drum
//! hits and other sharp attacks in audio signals, precisely enough to anchor
//! the edit points of time-stretching and beat-slicing pipelines.
//!
//! ## Overview
//!
//! Detection works on the amplitude envelope rather than the raw waveform.
//! The signal is cut into fixed-length frames, each frame is reduced to its
//! peak magnitude and that magnitude is quantized into a small integer
//! level. A transient is a valley-to-peak rise in the level sequence that
//! passes a configurable ratio test. The engine runs this scan three times
//! per hit (a coarse pass over the whole signal, then two progressively
//! finer passes over each hit's own neighborhood), so reported positions
//! carry fine-pass precision without fine-pass cost over the full signal.
//!
//! ## Installation
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! audio_transients = "0.1.0"
//! ```
//!
//! or more easily with:
//! ```bash
//! cargo add audio_transients
//! ```
//!
//! ## Quick Start
//!
//! ### Locating Transients
//!
//! ```rust
//! use std::time::Duration;
//!
//! use audio_transients::{TransientDetector, generation};
//!
//! // A quarter second of silence, then a sharp 10 ms attack.
//! let mut signal = generation::silence(Duration::from_millis(250), 44_100);
//! signal.append(&generation::attack_burst(
//!     Duration::from_millis(10),
//!     Duration::from_millis(500),
//!     44_100,
//!     0.9,
//! ));
//!
//! let detector = TransientDetector::new(44_100);
//! let analysis = detector.find_transients(&signal)?;
//!
//! assert_eq!(analysis.transient_count(), 1);
//! println!("onset near sample {}", analysis.positions()[0]);
//! # Ok::<(), audio_transients::TransientError>(())
//! ```
//!
//! ### Inspecting Detection Passes
//!
//! Each confirmed transient keeps a [`PeakAndValleyInfo`] record per pass,
//! describing the envelope rise that triggered it:
//!
//! ```rust
//! use audio_transients::{Signal, Step, TransientDetector};
//!
//! let mut signal = Signal::new();
//! signal.add_silence(20_000);
//! for i in 0..100 {
//!     signal.push_sample((i + 1) as f64 / 100.0);
//! }
//! signal.add_silence(20_000);
//!
//! let detector = TransientDetector::new(44_100);
//! let analysis = detector.find_transients(&signal)?;
//!
//! let fine = analysis.peak_and_valley_info(0, Step::Third)?;
//! println!("rise from sample {} to {}", fine.valley_point, fine.peak_point);
//! # Ok::<(), audio_transients::TransientError>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`TransientResult`], with error causes
//! split by variant for precise handling:
//!
//! ```rust
//! use audio_transients::{Signal, TransientDetector, TransientError};
//!
//! let mut detector = TransientDetector::new(44_100);
//! detector.set_first_level_step(0.0);
//!
//! match detector.find_transients(&Signal::new()) {
//!     Ok(analysis) => println!("{} transients", analysis.transient_count()),
//!     Err(TransientError::InvalidParameter(msg)) => eprintln!("Invalid parameter: {msg}"),
//!     Err(other_err) => eprintln!("Other error: {other_err}"),
//! }
//! ```
//!
//! ## Documentation
//!
//! Full API documentation is available at
//! [docs.rs/audio_transients](https://docs.rs/audio_transients).
//!
//! ## License
//!
//! MIT License
//!
//! ## Contributing
//!
//! Contributions are welcome! Please feel free to submit a Pull Request.

mod cascade;
mod detector;
mod error;
mod signal;
mod tracker;

pub mod conversions;
pub mod generation;
pub mod leveling;
pub mod windowing;

pub use crate::detector::{DetectorConfig, Step, TransientAnalysis, TransientDetector};
pub use crate::error::{TransientError, TransientResult};
pub use crate::signal::Signal;
pub use crate::tracker::PeakAndValleyInfo;
