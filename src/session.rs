//! Session state
//!
//! One `Session` owns the mixer, the analyzer, and the file sink for a
//! single run of the tool. The shell (GUI or CLI) holds the only
//! mutable reference and drives it synchronously: add a wave, get back
//! everything the visualization and playback collaborators need.
//!
//! There is no background work and no locking; operations run to
//! completion on the calling thread, and the shell must not interleave
//! two update sequences.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::engine::{clear_wave_files, ensure_data_dir, export_signal, wave_file_name, ExportFormat};
use crate::error::Result;
use crate::synth::{ClearPolicy, SignalMixer, Spectrum, SpectrumAnalyzer, WaveComponent};

/// Everything produced by one mix-analyze-emit cycle
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    /// Time in seconds for each aggregate sample
    pub time_axis: Vec<f32>,
    /// The mixed signal
    pub aggregate: Vec<f32>,
    /// Padded per-component buffers when plot-all is enabled
    pub components: Option<Vec<Vec<f32>>>,
    /// One-sided magnitude spectrum of the aggregate
    pub spectrum: Spectrum,
    /// Path of the emitted WAV, `None` if the write failed
    pub wave_path: Option<PathBuf>,
}

/// A single synthesis session: components, spectra, and emitted files
pub struct Session {
    mixer: SignalMixer,
    analyzer: SpectrumAnalyzer,
    wave_dir: PathBuf,
    format: ExportFormat,
    current_wave: Option<PathBuf>,
}

impl Session {
    /// Open a session writing into the given directory
    ///
    /// The directory is created if absent; a pre-existing directory is
    /// fine. The mixer's sample rate is taken from the export format so
    /// synthesis and emission always agree.
    pub fn new(wave_dir: PathBuf, format: ExportFormat, clear_policy: ClearPolicy) -> Result<Self> {
        ensure_data_dir(&wave_dir)?;
        Ok(Self {
            mixer: SignalMixer::with_clear_policy(format.sample_rate, clear_policy),
            analyzer: SpectrumAnalyzer::new(),
            wave_dir,
            format,
            current_wave: None,
        })
    }

    /// Add a component and run a full update cycle
    ///
    /// Returns the new `SessionUpdate`; never `None` in practice since
    /// the mixer just gained a component, but the signature mirrors
    /// [`Session::update`] for callers that treat both uniformly.
    pub fn add_wave(&mut self, component: WaveComponent) -> Result<Option<SessionUpdate>> {
        info!("Adding component: {}", component);
        self.mixer.add(component);
        self.update()
    }

    /// Add a component without running an update
    ///
    /// For shells that batch several additions and then call
    /// [`Session::update`] once, instead of emitting a file per add.
    pub fn add_component(&mut self, component: WaveComponent) {
        info!("Adding component: {}", component);
        self.mixer.add(component);
    }

    /// Mix, analyze, and emit the current state
    ///
    /// Returns `Ok(None)` when no components are present - nothing to
    /// render, analyze, or play. A failed file write is logged and
    /// non-fatal: the in-memory result is still returned, with
    /// `wave_path: None`, and the previously emitted file (if any)
    /// remains the playable one.
    pub fn update(&mut self) -> Result<Option<SessionUpdate>> {
        let Some(mix) = self.mixer.mix() else {
            return Ok(None);
        };

        let spectrum = self
            .analyzer
            .analyze(&mix.aggregate, self.mixer.sample_rate())?;

        let path = self.wave_dir.join(wave_file_name(self.mixer.len()));
        let wave_path = match export_signal(&mix.aggregate, &path, self.format) {
            Ok(()) => {
                info!("Wrote {}", path.display());
                self.current_wave = Some(path.clone());
                Some(path)
            }
            Err(e) => {
                warn!("Failed to write {}: {}", path.display(), e);
                None
            }
        };

        Ok(Some(SessionUpdate {
            time_axis: mix.time_axis,
            aggregate: mix.aggregate,
            components: mix.components,
            spectrum,
            wave_path,
        }))
    }

    /// Path of the most recently emitted file, finalized and ready to play
    pub fn current_wave(&self) -> Option<&Path> {
        self.current_wave.as_deref()
    }

    /// Enable or disable per-component buffer retention for future updates
    ///
    /// Toggling does not retroactively recompute anything; the next
    /// update re-renders every component and carries the buffers then.
    pub fn set_plot_all(&mut self, enabled: bool) {
        self.mixer.set_keep_component_buffers(enabled);
    }

    /// Components currently in the session
    pub fn components(&self) -> &[WaveComponent] {
        self.mixer.components()
    }

    /// True when no components have been added since the last reset
    pub fn is_empty(&self) -> bool {
        self.mixer.is_empty()
    }

    /// The mixer's fixed sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.mixer.sample_rate()
    }

    /// Delete emitted files and drop all components
    ///
    /// File deletion is best effort; I/O failures are logged and the
    /// in-memory reset proceeds regardless. Whether the session's
    /// maximum duration survives is the mixer's configured clear policy.
    pub fn reset(&mut self) {
        match clear_wave_files(&self.wave_dir) {
            Ok(n) if n > 0 => info!("Removed {} wave file(s)", n),
            Ok(_) => {}
            Err(e) => warn!("Could not clear {}: {}", self.wave_dir.display(), e),
        }
        self.current_wave = None;
        self.mixer.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::WaveShape;
    use tempfile::tempdir;

    const RATE: u32 = 8000;

    fn test_session(dir: &Path) -> Session {
        Session::new(
            dir.to_path_buf(),
            ExportFormat::new(RATE, 24),
            ClearPolicy::Preserve,
        )
        .unwrap()
    }

    fn sine(duration_secs: u32, frequency: f32) -> WaveComponent {
        WaveComponent::new(WaveShape::Sine, duration_secs, frequency, 1.0).unwrap()
    }

    #[test]
    fn test_update_on_empty_session() {
        let dir = tempdir().unwrap();
        let mut session = test_session(dir.path());

        assert!(session.update().unwrap().is_none());
        assert!(session.current_wave().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_add_wave_emits_numbered_file() {
        let dir = tempdir().unwrap();
        let mut session = test_session(dir.path());

        let update = session.add_wave(sine(1, 440.0)).unwrap().unwrap();
        let path = update.wave_path.unwrap();
        assert_eq!(path.file_name().unwrap(), "wave_sum_1.wav");
        assert!(path.exists());
        assert_eq!(session.current_wave().unwrap(), path);

        let update = session.add_wave(sine(2, 220.0)).unwrap().unwrap();
        assert_eq!(
            update.wave_path.unwrap().file_name().unwrap(),
            "wave_sum_2.wav"
        );
        assert_eq!(update.aggregate.len(), 2 * RATE as usize);
    }

    #[test]
    fn test_update_carries_spectrum() {
        let dir = tempdir().unwrap();
        let mut session = test_session(dir.path());

        let update = session.add_wave(sine(1, 440.0)).unwrap().unwrap();
        assert_eq!(update.spectrum.len(), RATE as usize / 2 + 1);
        let (freq, _) = update.spectrum.dominant().unwrap();
        assert!((freq - 440.0).abs() < 1.0);
    }

    #[test]
    fn test_plot_all_affects_future_updates_only() {
        let dir = tempdir().unwrap();
        let mut session = test_session(dir.path());

        let first = session.add_wave(sine(1, 440.0)).unwrap().unwrap();
        assert!(first.components.is_none());

        session.set_plot_all(true);
        let second = session.add_wave(sine(1, 220.0)).unwrap().unwrap();
        let parts = second.components.unwrap();
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_reset_removes_files_and_components() {
        let dir = tempdir().unwrap();
        let mut session = test_session(dir.path());

        session.add_wave(sine(1, 440.0)).unwrap();
        session.add_wave(sine(1, 220.0)).unwrap();
        assert!(!session.is_empty());

        session.reset();
        assert!(session.is_empty());
        assert!(session.current_wave().is_none());
        let wavs = std::fs::read_dir(dir.path())
            .unwrap()
            .filter(|e| {
                e.as_ref().unwrap().path().extension().and_then(|x| x.to_str()) == Some("wav")
            })
            .count();
        assert_eq!(wavs, 0);

        // The session stays usable after a reset
        let update = session.add_wave(sine(1, 330.0)).unwrap().unwrap();
        assert!(update.wave_path.is_some());
    }
}
