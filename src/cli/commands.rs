//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command. Wave specs are
//! parsed with plain `str::parse` - numeric text only, never evaluated
//! as expressions.

use std::path::PathBuf;

use log::info;
use serde_json::json;

use crate::engine::{clear_wave_files, default_data_dir, ExportFormat};
use crate::error::{Result, WavelabError};
use crate::session::Session;
use crate::synth::{ClearPolicy, SignalMixer, SpectrumAnalyzer, WaveComponent, WaveShape};

/// Parse a `shape:freq:duration[:amplitude]` spec into a component
pub fn parse_wave_spec(spec: &str) -> Result<WaveComponent> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(WavelabError::InvalidParameter {
            field: "wave spec",
            reason: format!("expected shape:freq:duration[:amplitude], got '{}'", spec),
        });
    }

    let shape: WaveShape = parts[0].parse()?;
    let frequency: f32 = parts[1]
        .trim()
        .parse()
        .map_err(|_| WavelabError::InvalidParameter {
            field: "frequency",
            reason: format!("not a number: '{}'", parts[1]),
        })?;
    let duration_secs: u32 = parts[2]
        .trim()
        .parse()
        .map_err(|_| WavelabError::InvalidParameter {
            field: "duration",
            reason: format!("not a whole number of seconds: '{}'", parts[2]),
        })?;
    let amplitude: f32 = if parts.len() == 4 {
        parts[3]
            .trim()
            .parse()
            .map_err(|_| WavelabError::InvalidParameter {
                field: "amplitude",
                reason: format!("not a number: '{}'", parts[3]),
            })?
    } else {
        1.0
    };

    WaveComponent::new(shape, duration_secs, frequency, amplitude)
}

/// Synthesize the given wave specs and emit the aggregate WAV.
pub fn render(
    waves: &[String],
    rate: u32,
    bit_depth: u16,
    out_dir: Option<PathBuf>,
    plot_all: bool,
    json: bool,
) -> Result<()> {
    let components = waves
        .iter()
        .map(|s| parse_wave_spec(s))
        .collect::<Result<Vec<_>>>()?;

    let dir = match out_dir {
        Some(d) => d,
        None => default_data_dir()?,
    };
    info!(
        "Rendering {} component(s) at {} Hz into {}",
        components.len(),
        rate,
        dir.display()
    );

    let mut session = Session::new(dir, ExportFormat::new(rate, bit_depth), ClearPolicy::Preserve)?;
    session.set_plot_all(plot_all);
    for component in components {
        session.add_component(component);
    }

    let Some(update) = session.update()? else {
        println!("No components to render");
        return Ok(());
    };

    let peak = update.aggregate.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    let duration_secs = update.aggregate.len() as f64 / rate as f64;
    let dominant = update.spectrum.dominant();

    if json {
        let summary = json!({
            "components": session.components(),
            "sample_rate": rate,
            "bit_depth": bit_depth,
            "num_samples": update.aggregate.len(),
            "duration_secs": duration_secs,
            "peak": peak,
            "dominant": dominant.map(|(f, m)| json!({"frequency": f, "magnitude": m})),
            "component_buffers": update.components.as_ref().map(|p| p.len()),
            "wave_path": update.wave_path,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Mixed {} component(s): {} samples, {:.1}s at {} Hz",
            session.components().len(),
            update.aggregate.len(),
            duration_secs,
            rate
        );
        println!("Peak amplitude: {:.4}", peak);
        if let Some((freq, _)) = dominant {
            println!("Dominant frequency: {:.1} Hz", freq);
        }
        if peak > 1.0 {
            println!("Note: aggregate exceeds full scale and will clip in the file");
        }
        match &update.wave_path {
            Some(path) => println!("Wrote: {}", path.display()),
            None => println!("File write failed; see log"),
        }
    }

    Ok(())
}

/// Print the strongest spectrum bins of the mixed signal.
pub fn spectrum(waves: &[String], rate: u32, top: usize, json: bool) -> Result<()> {
    let mut mixer = SignalMixer::new(rate);
    for spec in waves {
        mixer.add(parse_wave_spec(spec)?);
    }

    let Some(mix) = mixer.mix() else {
        println!("No components to analyze");
        return Ok(());
    };

    let mut analyzer = SpectrumAnalyzer::new();
    let spectrum = analyzer.analyze(&mix.aggregate, rate)?;
    let bin_width = rate as f64 / mix.aggregate.len() as f64;
    let bins = spectrum.top_bins(top);

    if json {
        let out = json!({
            "sample_rate": rate,
            "num_bins": spectrum.len(),
            "bin_width": bin_width,
            "top": bins
                .iter()
                .map(|(f, m)| json!({"frequency": f, "magnitude": m}))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "{} bins, {:.3} Hz apart, up to {:.1} Hz",
            spectrum.len(),
            bin_width,
            spectrum.frequencies.last().copied().unwrap_or(0.0)
        );
        for (freq, mag) in bins {
            println!("{:>10.2} Hz  {:.6e}", freq, mag);
        }
    }

    Ok(())
}

/// List supported waveform shapes.
pub fn shapes() -> Result<()> {
    for shape in WaveShape::ALL {
        println!("{}", shape);
    }
    Ok(())
}

/// Delete emitted wave files from the data directory.
pub fn clear() -> Result<()> {
    let dir = default_data_dir()?;
    if !dir.is_dir() {
        println!("Nothing to clear");
        return Ok(());
    }

    let removed = clear_wave_files(&dir)?;
    println!("Removed {} wave file(s) from {}", removed, dir.display());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
