//! Synthesis Core
//!
//! Waveform generation, duration-aligned mixing, and spectral analysis.
//! Everything here is pure computation over in-memory buffers; file
//! emission lives in [`crate::engine`].

mod component;
mod mixer;
mod spectrum;

pub use component::{WaveComponent, WaveShape};
pub use mixer::{ClearPolicy, MixOutput, SignalMixer};
pub use spectrum::{Spectrum, SpectrumAnalyzer, AMPLITUDE_NORM};
