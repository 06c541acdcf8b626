//! Waveform components
//!
//! A `WaveComponent` is one user-specified oscillator: shape, duration,
//! frequency, and amplitude, fixed at construction. It knows how to
//! render itself into a sample buffer at a given sample rate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WavelabError};

/// Supported periodic waveform shapes
///
/// A closed enum rather than a string key: every consumer matches it
/// exhaustively, so an unhandled shape is a compile error. Unknown
/// names are rejected at the parse boundary by [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveShape {
    Sine,
    Sawtooth,
    Square,
    Triangle,
}

impl WaveShape {
    /// All supported shapes, in display order
    pub const ALL: [WaveShape; 4] = [
        WaveShape::Sine,
        WaveShape::Sawtooth,
        WaveShape::Square,
        WaveShape::Triangle,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            WaveShape::Sine => "sine",
            WaveShape::Sawtooth => "sawtooth",
            WaveShape::Square => "square",
            WaveShape::Triangle => "triangle",
        }
    }

    /// Evaluate the unit waveform at time `t` seconds for frequency `freq`.
    ///
    /// All shapes range over [-1, 1]. Phase math runs in f64; `p` below
    /// is the fractional position within the current period.
    fn sample(&self, freq: f64, t: f64) -> f64 {
        match self {
            WaveShape::Sine => (2.0 * std::f64::consts::PI * freq * t).sin(),
            WaveShape::Sawtooth => {
                // Standard non-symmetric ramp from -1 to 1 over each period
                let p = (freq * t).fract();
                2.0 * p - 1.0
            }
            WaveShape::Square => {
                // 50% duty cycle, +1 over the first half-period
                let p = (freq * t).fract();
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            WaveShape::Triangle => {
                // Symmetric: rises -1 to 1 over the first half-period, falls back
                let p = (freq * t).fract();
                if p < 0.5 {
                    4.0 * p - 1.0
                } else {
                    3.0 - 4.0 * p
                }
            }
        }
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveShape {
    type Err = WavelabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" => Ok(WaveShape::Sine),
            "sawtooth" => Ok(WaveShape::Sawtooth),
            "square" => Ok(WaveShape::Square),
            "triangle" => Ok(WaveShape::Triangle),
            other => Err(WavelabError::UnknownShape {
                shape: other.to_string(),
            }),
        }
    }
}

/// One additive oscillator: shape, duration, frequency, amplitude
///
/// Immutable once created; the mixer holds components by list position
/// and a session discards them wholesale on reset. Construction
/// validates every parameter, so a `WaveComponent` in hand is always
/// renderable. The engine accepts only already-parsed numeric values
/// here; evaluating user-entered expressions is the shell's problem and
/// deliberately unsupported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveComponent {
    shape: WaveShape,
    duration_secs: u32,
    frequency: f32,
    amplitude: f32,
}

impl WaveComponent {
    /// Create a new component, validating all parameters
    ///
    /// # Arguments
    /// * `shape` - Waveform shape
    /// * `duration_secs` - Duration in whole seconds, at least 1
    /// * `frequency` - Frequency in Hz, finite and positive
    /// * `amplitude` - Linear amplitude scale factor, finite
    ///
    /// # Errors
    /// `InvalidParameter` if any value is out of range.
    pub fn new(shape: WaveShape, duration_secs: u32, frequency: f32, amplitude: f32) -> Result<Self> {
        if duration_secs == 0 {
            return Err(WavelabError::InvalidParameter {
                field: "duration",
                reason: "must be at least 1 second".to_string(),
            });
        }
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(WavelabError::InvalidParameter {
                field: "frequency",
                reason: format!("must be a positive number of Hz, got {}", frequency),
            });
        }
        if !amplitude.is_finite() {
            return Err(WavelabError::InvalidParameter {
                field: "amplitude",
                reason: format!("must be finite, got {}", amplitude),
            });
        }
        Ok(Self {
            shape,
            duration_secs,
            frequency,
            amplitude,
        })
    }

    /// Waveform shape
    pub fn shape(&self) -> WaveShape {
        self.shape
    }

    /// Duration in whole seconds
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Frequency in Hz
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Linear amplitude scale factor
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Render this component into a sample buffer
    ///
    /// Generates `duration_secs * sample_rate` samples evenly spaced
    /// over the half-open interval [0, duration) - the right endpoint is
    /// excluded so the buffer holds exactly one sample per time step
    /// with no boundary duplicate.
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        let num_samples = self.duration_secs as usize * sample_rate as usize;
        let rate = sample_rate as f64;
        let freq = self.frequency as f64;
        let amp = self.amplitude as f64;

        (0..num_samples)
            .map(|i| {
                let t = i as f64 / rate;
                (self.shape.sample(freq, t) * amp) as f32
            })
            .collect()
    }

    /// Number of samples `render` will produce at the given rate
    pub fn num_samples(&self, sample_rate: u32) -> usize {
        self.duration_secs as usize * sample_rate as usize
    }
}

impl fmt::Display for WaveComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}Hz {}s x{}",
            self.shape, self.frequency, self.duration_secs, self.amplitude
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
