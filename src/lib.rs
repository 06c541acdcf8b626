//! WaveLab - Additive Waveform Synthesis Engine
//!
//! WaveLab composes a sound from independent waveform components, each
//! with its own shape, frequency, duration, and amplitude:
//! 1. Components render themselves into sample buffers
//! 2. The mixer pads and sums those buffers on a common timeline
//! 3. The analyzer produces a one-sided magnitude spectrum for display
//! 4. The file sink emits a playable WAV per update
//!
//! # Architecture
//!
//! The engine is synchronous and single-threaded: every operation runs
//! to completion on the calling thread. A GUI or CLI shell holds the
//! only mutable reference to a [`Session`] and drives it in response to
//! discrete user actions. Visualization and playback are external
//! collaborators consuming plain numeric sequences and file paths.

pub mod cli;
pub mod engine;
pub mod error;
pub mod session;
pub mod synth;

pub use error::{Result, WavelabError};
pub use session::{Session, SessionUpdate};
pub use synth::{MixOutput, SignalMixer, Spectrum, SpectrumAnalyzer, WaveComponent, WaveShape};
