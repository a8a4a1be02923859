//! Offline WAV ingestion: turns a PCM file into the same windowed
//! level metrics the live sampler produces.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use tracing::{info, warn};

use crate::audio::quality::QualityMonitor;
use crate::audio::sampler::{LevelSampler, SamplerConfig, DEFAULT_SAMPLE_INTERVAL};
use crate::types::AudioMetrics;

/// Decode a WAV file, downmix to mono, and emit 100 ms RMS/peak windows
/// through the level sampler.
pub fn read_wav_metrics(path: &Path) -> Result<AudioMetrics> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("failed to open WAV file {:?}", path))?;
    let spec = reader.spec();
    ensure!(spec.channels > 0, "WAV file {:?} reports zero channels", path);

    let samples = decode_mono(&mut reader, spec)
        .with_context(|| format!("failed to decode samples from {:?}", path))?;
    info!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        samples = samples.len(),
        "decoded WAV input"
    );

    Ok(window_levels(&samples, spec.sample_rate))
}

fn decode_mono(
    reader: &mut hound::WavReader<std::io::BufReader<std::fs::File>>,
    spec: hound::WavSpec,
) -> Result<Vec<f32>> {
    let channels = spec.channels as usize;
    let raw: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };
    if channels == 1 {
        return Ok(raw);
    }
    let mono = raw
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();
    Ok(mono)
}

/// Slice mono samples into fixed windows and feed the sampler; the
/// quality monitor runs alongside so obvious capture problems surface in
/// the log even for offline files.
fn window_levels(samples: &[f32], sample_rate: u32) -> AudioMetrics {
    let window_size = ((sample_rate as f64 * DEFAULT_SAMPLE_INTERVAL) as usize).max(1);
    let mut sampler = LevelSampler::new(SamplerConfig::default());
    let mut monitor = QualityMonitor::new();

    for window in samples.chunks(window_size) {
        let rms = window_rms(window);
        let peak = window
            .iter()
            .map(|sample| sample.abs())
            .fold(0.0_f32, f32::max)
            .clamp(0.0, 1.0);
        if let Some(warning) = monitor.observe(rms, peak) {
            warn!(?warning, "recording quality warning while ingesting WAV");
        }
        sampler.push(rms, peak);
    }
    sampler.finish()
}

fn window_rms(window: &[f32]) -> f32 {
    if window.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = window.iter().map(|sample| sample * sample).sum();
    (sum_sq / window.len() as f32).sqrt().clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn windows_carry_rms_and_peak() {
        // 1 second at 1 kHz: 0.5 s of steady signal then 0.5 s of silence
        let mut samples = vec![0.5_f32; 500];
        samples.extend(vec![0.0_f32; 500]);
        let metrics = window_levels(&samples, 1_000);

        assert_eq!(metrics.rms_windows().len(), 10);
        assert_relative_eq!(metrics.duration(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.rms_windows()[0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(metrics.peak_windows()[0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(metrics.rms_windows()[9], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn partial_final_window_still_counts() {
        let samples = vec![0.2_f32; 150];
        let metrics = window_levels(&samples, 1_000);
        assert_eq!(metrics.rms_windows().len(), 2);
        assert_relative_eq!(metrics.rms_windows()[1], 0.2, epsilon = 1e-6);
    }

    #[test]
    fn empty_window_rms_is_zero() {
        assert_eq!(window_rms(&[]), 0.0);
    }

    #[test]
    fn round_trips_a_written_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..8_000 {
            let t = i as f32 / 8_000.0;
            let value = (t * 2.0 * std::f32::consts::PI * 220.0).sin() * 0.25;
            writer.write_sample((value * i16::MAX as f32) as i16).unwrap();
        }
        writer.finalize().unwrap();

        let metrics = read_wav_metrics(&path).unwrap();
        assert_eq!(metrics.rms_windows().len(), 10);
        assert_relative_eq!(metrics.duration(), 1.0, epsilon = 1e-9);
        // a steady sine at amplitude 0.25 has RMS near 0.177
        assert_relative_eq!(metrics.rms_windows()[4], 0.177, epsilon = 0.01);
    }
}
