//! Tick-driven level sampler owning the in-progress metric buffers.
//!
//! One `push` per sampling tick, always from the same control thread;
//! `finish` consumes the sampler and freezes the immutable
//! [`AudioMetrics`] snapshot the scoring pipeline reads.

use tracing::debug;

use crate::types::AudioMetrics;

/// Reference cadence: one sample every 100 ms.
pub const DEFAULT_SAMPLE_INTERVAL: f64 = 0.1;
/// Ticks to skip before noise-floor calibration starts.
const CALIBRATION_WARMUP_SECS: f64 = 0.5;
/// Samples averaged to estimate the session noise floor.
const CALIBRATION_SAMPLE_COUNT: usize = 3;
/// Margin added on top of the averaged warm-up level.
const CALIBRATION_MARGIN: f32 = 0.005;

#[derive(Debug, Clone, Copy)]
pub struct SamplerConfig {
    /// Seconds between samples.
    pub interval: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}

/// Accumulates `(rms, peak)` level pairs during a recording.
#[derive(Debug)]
pub struct LevelSampler {
    interval: f64,
    rms_windows: Vec<f32>,
    peak_windows: Vec<f32>,
    warmup_ticks: usize,
    calibration_window: Vec<f32>,
    calibrated_floor: Option<f32>,
}

impl LevelSampler {
    pub fn new(config: SamplerConfig) -> Self {
        let interval = if config.interval > 0.0 {
            config.interval
        } else {
            DEFAULT_SAMPLE_INTERVAL
        };
        Self {
            interval,
            rms_windows: Vec::new(),
            peak_windows: Vec::new(),
            warmup_ticks: (CALIBRATION_WARMUP_SECS / interval).ceil() as usize,
            calibration_window: Vec::with_capacity(CALIBRATION_SAMPLE_COUNT),
            calibrated_floor: None,
        }
    }

    /// Record one level sample. Values are clamped into [0, 1].
    pub fn push(&mut self, rms: f32, peak: f32) {
        let rms = rms.clamp(0.0, 1.0);
        let peak = peak.clamp(0.0, 1.0);
        self.rms_windows.push(rms);
        self.peak_windows.push(peak);
        self.maybe_calibrate(rms);
    }

    /// Session noise floor estimated from the first samples after warm-up.
    /// Advisory only: live quality warnings may use it, the scoring
    /// profile never does.
    pub fn calibrated_noise_floor(&self) -> Option<f32> {
        self.calibrated_floor
    }

    /// Seconds of audio represented by the samples pushed so far.
    pub fn elapsed(&self) -> f64 {
        self.rms_windows.len() as f64 * self.interval
    }

    pub fn sample_count(&self) -> usize {
        self.rms_windows.len()
    }

    /// Stop sampling and freeze the snapshot.
    pub fn finish(self) -> AudioMetrics {
        let duration = self.elapsed();
        debug!(
            windows = self.rms_windows.len(),
            duration_secs = duration,
            calibrated_floor = ?self.calibrated_floor,
            "level sampler finished"
        );
        AudioMetrics::new(self.rms_windows, self.peak_windows, duration)
    }

    fn maybe_calibrate(&mut self, rms: f32) {
        if self.calibrated_floor.is_some() || self.rms_windows.len() <= self.warmup_ticks {
            return;
        }
        self.calibration_window.push(rms);
        if self.calibration_window.len() == CALIBRATION_SAMPLE_COUNT {
            let average =
                self.calibration_window.iter().sum::<f32>() / CALIBRATION_SAMPLE_COUNT as f32;
            self.calibrated_floor = Some(average + CALIBRATION_MARGIN);
            debug!(floor = average + CALIBRATION_MARGIN, "noise floor calibrated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn finish_freezes_every_pushed_sample() {
        let mut sampler = LevelSampler::new(SamplerConfig::default());
        for _ in 0..20 {
            sampler.push(0.3, 0.5);
        }
        assert_relative_eq!(sampler.elapsed(), 2.0, epsilon = 1e-9);
        let metrics = sampler.finish();
        assert_eq!(metrics.rms_windows().len(), 20);
        assert_eq!(metrics.peak_windows().len(), 20);
        assert_relative_eq!(metrics.duration(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let mut sampler = LevelSampler::new(SamplerConfig::default());
        sampler.push(1.7, -0.4);
        let metrics = sampler.finish();
        assert_eq!(metrics.rms_windows(), &[1.0]);
        assert_eq!(metrics.peak_windows(), &[0.0]);
    }

    #[test]
    fn calibration_uses_first_samples_after_warmup() {
        let mut sampler = LevelSampler::new(SamplerConfig::default());
        // warm-up covers the first 5 ticks at the default cadence
        for _ in 0..5 {
            sampler.push(0.9, 0.9);
            assert!(sampler.calibrated_noise_floor().is_none());
        }
        sampler.push(0.010, 0.02);
        sampler.push(0.020, 0.03);
        assert!(sampler.calibrated_noise_floor().is_none());
        sampler.push(0.030, 0.04);
        let floor = sampler.calibrated_noise_floor().unwrap();
        assert_relative_eq!(floor, 0.020 + 0.005, epsilon = 1e-6);
        // later samples never re-calibrate
        sampler.push(0.5, 0.6);
        assert_relative_eq!(
            sampler.calibrated_noise_floor().unwrap(),
            floor,
            epsilon = 1e-9
        );
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let sampler = LevelSampler::new(SamplerConfig { interval: 0.0 });
        assert_eq!(sampler.sample_count(), 0);
        assert_eq!(sampler.elapsed(), 0.0);
    }
}
