//! Audio file sink
//!
//! Serializes aggregate signals to uncompressed PCM WAV files in a
//! per-user application-data directory. Files are finalized before any
//! path is handed to a playback collaborator, so "path returned" means
//! "ready to play".

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use log::warn;

use crate::error::{Result, WavelabError};

/// Directory name under the platform application-data root
///
/// Linux: `~/.local/share/WaveLab`, macOS: `~/Library/Application
/// Support/WaveLab`, Windows: `%APPDATA%/WaveLab`.
pub const APP_DIR_NAME: &str = "WaveLab";

/// Default sample rate for emitted files
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Export format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFormat {
    /// Target sample rate in Hz
    pub sample_rate: u32,
    /// Bit depth: 16, 24, or 32 (32 = IEEE float)
    pub bit_depth: u16,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_depth: 24,
        }
    }
}

impl ExportFormat {
    /// Create a new export format with the given sample rate and bit depth
    pub fn new(sample_rate: u32, bit_depth: u16) -> Self {
        ExportFormat {
            sample_rate,
            bit_depth,
        }
    }
}

/// Write a mono signal to a WAV file
///
/// Samples are expected in nominal [-1, 1] range; integer bit depths
/// scale and clamp, 32-bit writes IEEE float verbatim. The writer is
/// finalized before returning, so a successful return means the file is
/// flushed and closed.
///
/// # Errors
/// `UnsupportedBitDepth` for depths other than 16/24/32; `Encode` if
/// the WAV writer fails; `Io` on filesystem errors surfaced by hound.
pub fn export_signal(samples: &[f32], path: &Path, format: ExportFormat) -> Result<()> {
    if !matches!(format.bit_depth, 16 | 24 | 32) {
        return Err(WavelabError::UnsupportedBitDepth {
            bits: format.bit_depth,
        });
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: format.sample_rate,
        bits_per_sample: format.bit_depth,
        sample_format: if format.bit_depth == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| WavelabError::Encode {
        reason: e.to_string(),
    })?;

    match format.bit_depth {
        16 => {
            for &sample in samples {
                let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                writer
                    .write_sample(scaled)
                    .map_err(|e| WavelabError::Encode {
                        reason: e.to_string(),
                    })?;
            }
        }
        24 => {
            for &sample in samples {
                // 24-bit stored as i32 in hound
                let scaled = (sample * 8388607.0).clamp(-8388608.0, 8388607.0) as i32;
                writer
                    .write_sample(scaled)
                    .map_err(|e| WavelabError::Encode {
                        reason: e.to_string(),
                    })?;
            }
        }
        // 32-bit: IEEE float, written verbatim
        _ => {
            for &sample in samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| WavelabError::Encode {
                        reason: e.to_string(),
                    })?;
            }
        }
    }

    writer.finalize().map_err(|e| WavelabError::Encode {
        reason: e.to_string(),
    })?;

    Ok(())
}

/// Platform application-data directory for emitted wave files
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .ok_or(WavelabError::NoDataDir)
}

/// Create the data directory if absent
///
/// A pre-existing directory is not an error.
pub fn ensure_data_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// File name for the aggregate of `component_count` components
///
/// Keyed by component count, so re-mixing the same session overwrites
/// by name instead of accumulating duplicates.
pub fn wave_file_name(component_count: usize) -> String {
    format!("wave_sum_{}.wav", component_count)
}

/// Delete emitted wave files from the data directory, best effort
///
/// Skips non-`.wav` entries. Per-file failures are logged and skipped;
/// only an unreadable directory is an error. Returns how many files
/// were removed.
pub fn clear_wave_files(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("wav") {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => warn!("Failed to delete {}: {}", path.display(), e),
        }
    }
    Ok(removed)
}

// ============================================================================
// Tests
// ============================================================================
