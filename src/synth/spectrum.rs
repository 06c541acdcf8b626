//! Spectral analysis
//!
//! One-sided magnitude spectrum of a real-valued signal via a real-input
//! FFT. No windowing, no zero-padding: the display gets the raw discrete
//! transform of whatever the mixer produced.

use realfft::{num_complex::Complex32, RealFftPlanner};
use serde::Serialize;

use crate::error::{Result, WavelabError};

/// Fixed-point full-scale divisor applied before the transform
///
/// Matches the 32-bit signed encoding width used for persisted audio,
/// so spectral magnitude is comparable in scale to the emitted file.
/// Independent of sample rate and buffer length.
pub const AMPLITUDE_NORM: f32 = 2_147_483_648.0; // 2^31

/// Discrete frequency-vs-magnitude spectrum
///
/// `frequencies` and `magnitudes` are the same length; frequencies are
/// non-negative and strictly increasing, from DC up to the Nyquist bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrum {
    /// Bin center frequencies in Hz, spaced at sample_rate / buffer_length
    pub frequencies: Vec<f32>,
    /// Absolute value of each complex transform coefficient
    pub magnitudes: Vec<f32>,
}

impl Spectrum {
    /// Number of frequency bins
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True for a zero-bin spectrum (never produced by `analyze`)
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// The (frequency, magnitude) of the strongest bin
    pub fn dominant(&self) -> Option<(f32, f32)> {
        self.frequencies
            .iter()
            .zip(self.magnitudes.iter())
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(&f, &m)| (f, m))
    }

    /// The `n` strongest bins as (frequency, magnitude), strongest first
    pub fn top_bins(&self, n: usize) -> Vec<(f32, f32)> {
        let mut bins: Vec<(f32, f32)> = self
            .frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
            .collect();
        bins.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        bins.truncate(n);
        bins
    }
}

/// Computes one-sided magnitude spectra of real-valued signals
///
/// Wraps a real-FFT planner so repeated analyses of same-length buffers
/// reuse their plan.
pub struct SpectrumAnalyzer {
    planner: RealFftPlanner<f32>,
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
        }
    }

    /// Analyze a signal at the given sample rate
    ///
    /// Input amplitude is divided by 2^31 before the transform; the
    /// result has `len/2 + 1` bins at multiples of `rate / len` Hz.
    ///
    /// # Errors
    /// `EmptySignal` for a zero-length buffer; `Spectrum` if the
    /// transform itself fails.
    pub fn analyze(&mut self, samples: &[f32], sample_rate: u32) -> Result<Spectrum> {
        if samples.is_empty() {
            return Err(WavelabError::EmptySignal);
        }

        let n = samples.len();
        let r2c = self.planner.plan_fft_forward(n);

        // The transform scratches over its input, so it gets the
        // normalized copy rather than the caller's buffer.
        let mut input: Vec<f32> = samples.iter().map(|&s| s / AMPLITUDE_NORM).collect();
        let mut output: Vec<Complex32> = r2c.make_output_vec();

        r2c.process(&mut input, &mut output)
            .map_err(|e| WavelabError::Spectrum {
                reason: e.to_string(),
            })?;

        let bin_width = sample_rate as f64 / n as f64;
        let frequencies = (0..output.len())
            .map(|k| (k as f64 * bin_width) as f32)
            .collect();
        let magnitudes = output.iter().map(|c| c.norm()).collect();

        Ok(Spectrum {
            frequencies,
            magnitudes,
        })
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
