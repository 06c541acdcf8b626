//! Integration Tests
//!
//! End-to-end tests for the WaveLab synthesis pipeline: component
//! construction through mixing, spectral analysis, and WAV emission.

use approx::assert_relative_eq;
use hound::WavReader;
use tempfile::tempdir;

use wavelab::engine::{export_signal, wave_file_name, ExportFormat};
use wavelab::synth::{ClearPolicy, SignalMixer, SpectrumAnalyzer, WaveComponent, WaveShape};
use wavelab::{Session, WavelabError};

const RATE: u32 = 44100;

fn component(shape: WaveShape, duration_secs: u32, frequency: f32, amplitude: f32) -> WaveComponent {
    WaveComponent::new(shape, duration_secs, frequency, amplitude).unwrap()
}

// === Full Pipeline Tests ===

#[test]
fn test_concert_pitch_pipeline() {
    // One 440 Hz sine, one second, unit amplitude: 44100 samples with a
    // dominant spectral peak at the bin nearest 440 Hz
    let c = component(WaveShape::Sine, 1, 440.0, 1.0);

    let mut mixer = SignalMixer::new(RATE);
    mixer.add(c);

    let out = mixer.mix().expect("non-empty mix");
    assert_eq!(out.aggregate.len(), 44100);

    let mut analyzer = SpectrumAnalyzer::new();
    let spectrum = analyzer.analyze(&out.aggregate, RATE).unwrap();
    assert_eq!(spectrum.len(), 44100 / 2 + 1);

    let (freq, _) = spectrum.dominant().unwrap();
    assert!(
        (freq - 440.0).abs() < RATE as f32 / 44100.0,
        "dominant bin at {} Hz",
        freq
    );
}

#[test]
fn test_mixed_durations_pipeline() {
    // 1s + 2s components: aggregate spans 2s, first second is the sum,
    // second second is the longer component alone
    let short = component(WaveShape::Square, 1, 200.0, 0.4);
    let long = component(WaveShape::Sine, 2, 100.0, 0.6);

    let mut mixer = SignalMixer::new(RATE);
    mixer.add(short.clone());
    mixer.add(long.clone());

    let out = mixer.mix().unwrap();
    assert_eq!(out.aggregate.len(), 2 * RATE as usize);

    let a = short.render(RATE);
    let b = long.render(RATE);
    let n = RATE as usize;

    for i in (0..n).step_by(997) {
        assert_relative_eq!(out.aggregate[i], a[i] + b[i], epsilon = 1e-6);
    }
    for i in (n..2 * n).step_by(997) {
        assert_relative_eq!(out.aggregate[i], b[i], epsilon = 1e-6);
    }
}

#[test]
fn test_all_shapes_stay_within_amplitude() {
    let mut mixer = SignalMixer::new(8000);
    for shape in WaveShape::ALL {
        mixer.add(component(shape, 1, 330.0, 0.25));
    }

    let out = mixer.mix().unwrap();
    // Four components at 0.25 can never exceed unit amplitude
    let peak = out.aggregate.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak <= 1.0 + 1e-6);
}

// === File Emission Tests ===

#[test]
fn test_aggregate_survives_24bit_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roundtrip.wav");

    let mut mixer = SignalMixer::new(8000);
    mixer.add(component(WaveShape::Sine, 1, 440.0, 0.5));
    mixer.add(component(WaveShape::Triangle, 1, 220.0, 0.3));
    let out = mixer.mix().unwrap();

    export_signal(&out.aggregate, &path, ExportFormat::new(8000, 24)).unwrap();

    let mut reader = WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_rate, 8000);
    let decoded: Vec<f32> = reader
        .samples::<i32>()
        .map(|s| s.unwrap() as f32 / 8388607.0)
        .collect();

    assert_eq!(decoded.len(), out.aggregate.len());
    for (orig, dec) in out.aggregate.iter().zip(decoded.iter()) {
        assert!(
            (orig - dec).abs() < 1e-3,
            "Sample mismatch: {} vs {}",
            orig,
            dec
        );
    }
}

#[test]
fn test_session_lifecycle() {
    let dir = tempdir().unwrap();
    let mut session = Session::new(
        dir.path().to_path_buf(),
        ExportFormat::new(8000, 24),
        ClearPolicy::Preserve,
    )
    .unwrap();

    // Empty session: nothing to mix, analyze, or play
    assert!(session.update().unwrap().is_none());

    // Incremental adds emit files keyed by component count
    session
        .add_wave(component(WaveShape::Sine, 1, 440.0, 1.0))
        .unwrap();
    let update = session
        .add_wave(component(WaveShape::Sawtooth, 2, 110.0, 0.5))
        .unwrap()
        .unwrap();

    assert_eq!(update.aggregate.len(), 2 * 8000);
    assert_eq!(update.time_axis.len(), update.aggregate.len());
    let path = update.wave_path.unwrap();
    assert_eq!(path.file_name().unwrap(), wave_file_name(2).as_str());
    assert!(path.exists());
    assert_eq!(session.current_wave().unwrap(), path);

    // Reset removes emitted files but keeps the session usable
    session.reset();
    assert!(session.is_empty());
    assert!(!path.exists());

    let update = session
        .add_wave(component(WaveShape::Sine, 1, 330.0, 1.0))
        .unwrap()
        .unwrap();
    // Preserve policy: the 2s timeline from before the reset still applies
    assert_eq!(update.aggregate.len(), 2 * 8000);
}

// === Engine Contract Tests ===

#[test]
fn test_unknown_shape_is_configuration_error() {
    let err = "whitenoise".parse::<WaveShape>().unwrap_err();
    match err {
        WavelabError::UnknownShape { shape } => assert_eq!(shape, "whitenoise"),
        other => panic!("Expected UnknownShape, got: {:?}", other),
    }
}

#[test]
fn test_spectrum_bins_match_rate_and_length() {
    let c = component(WaveShape::Sine, 2, 500.0, 1.0);
    let buf = c.render(4000);

    let mut analyzer = SpectrumAnalyzer::new();
    let spectrum = analyzer.analyze(&buf, 4000).unwrap();

    // 8000 samples at 4 kHz: 4001 bins, 0.5 Hz apart, ending at 2 kHz
    assert_eq!(spectrum.len(), 4001);
    assert_relative_eq!(spectrum.frequencies[1], 0.5, epsilon = 1e-4);
    assert_relative_eq!(
        *spectrum.frequencies.last().unwrap(),
        2000.0,
        epsilon = 1e-2
    );

    let (freq, _) = spectrum.dominant().unwrap();
    assert_relative_eq!(freq, 500.0, epsilon = 0.5);
}

#[test]
fn test_mix_idempotent_across_analysis() {
    // Analysis must not perturb the mixer's buffers
    let mut mixer = SignalMixer::new(8000);
    mixer.add(component(WaveShape::Sine, 1, 440.0, 1.0));

    let first = mixer.mix().unwrap();
    let mut analyzer = SpectrumAnalyzer::new();
    analyzer.analyze(&first.aggregate, 8000).unwrap();

    let second = mixer.mix().unwrap();
    assert_eq!(first.aggregate, second.aggregate);
}
