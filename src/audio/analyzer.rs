//! Pure statistical derivation over a frozen [`AudioMetrics`] snapshot.
//!
//! Every function here is total: an empty window sequence yields a
//! zero/neutral value, never an error. Thresholds arrive as explicit
//! parameters so the scoring profile stays the single source of truth.

use crate::types::AudioMetrics;

/// A maximal run of consecutive silent windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauseRun {
    /// Index of the first silent window in the run.
    pub start_window: usize,
    /// Number of consecutive silent windows.
    pub window_count: usize,
    /// Run length in seconds.
    pub duration: f64,
}

/// Mean of the RMS windows; 0 when empty.
pub fn average_rms(metrics: &AudioMetrics) -> f64 {
    let windows = metrics.rms_windows();
    if windows.is_empty() {
        return 0.0;
    }
    windows.iter().map(|&v| v as f64).sum::<f64>() / windows.len() as f64
}

/// Sample standard deviation (n-1 denominator); 0 when n <= 1.
pub fn rms_std_dev(metrics: &AudioMetrics) -> f64 {
    let windows = metrics.rms_windows();
    if windows.len() <= 1 {
        return 0.0;
    }
    let mean = average_rms(metrics);
    let sum_sq: f64 = windows
        .iter()
        .map(|&v| {
            let delta = v as f64 - mean;
            delta * delta
        })
        .sum();
    (sum_sq / (windows.len() - 1) as f64).sqrt()
}

/// Windows louder than `mean + multiplier * stddev`.
pub fn spike_count(metrics: &AudioMetrics, multiplier: f64) -> usize {
    let windows = metrics.rms_windows();
    if windows.is_empty() {
        return 0;
    }
    let threshold = average_rms(metrics) + multiplier * rms_std_dev(metrics);
    windows.iter().filter(|&&v| (v as f64) > threshold).count()
}

/// Fraction of windows below `noise_floor`; 0 when empty.
pub fn silence_ratio(metrics: &AudioMetrics, noise_floor: f32) -> f64 {
    let windows = metrics.rms_windows();
    if windows.is_empty() {
        return 0.0;
    }
    let silent = windows.iter().filter(|&&v| v < noise_floor).count();
    silent as f64 / windows.len() as f64
}

/// Maximal runs of consecutive silent windows. A single window below the
/// floor already starts a run; there is no minimum run length.
pub fn pause_runs(metrics: &AudioMetrics, floor: f32) -> Vec<PauseRun> {
    let window_duration = metrics.window_duration();
    let mut runs = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    for (idx, &rms) in metrics.rms_windows().iter().enumerate() {
        if rms < floor {
            match current.as_mut() {
                Some((_, count)) => *count += 1,
                None => current = Some((idx, 1)),
            }
        } else if let Some((start, count)) = current.take() {
            runs.push(PauseRun {
                start_window: start,
                window_count: count,
                duration: count as f64 * window_duration,
            });
        }
    }
    if let Some((start, count)) = current {
        runs.push(PauseRun {
            start_window: start,
            window_count: count,
            duration: count as f64 * window_duration,
        });
    }
    runs
}

/// Number of maximal silent runs.
pub fn pause_count(metrics: &AudioMetrics, floor: f32) -> usize {
    pause_runs(metrics, floor).len()
}

/// Maximal non-silent runs per minute; 0 when duration is 0.
pub fn voiced_segments_per_minute(metrics: &AudioMetrics, floor: f32) -> f64 {
    if metrics.duration() == 0.0 {
        return 0.0;
    }
    let mut segments = 0usize;
    let mut in_segment = false;
    for &rms in metrics.rms_windows() {
        if rms >= floor {
            if !in_segment {
                segments += 1;
                in_segment = true;
            }
        } else {
            in_segment = false;
        }
    }
    segments as f64 / (metrics.duration() / 60.0)
}

/// Each RMS value divided by the maximum; identity when the max is 0.
/// Display helper only.
pub fn normalized_waveform(metrics: &AudioMetrics) -> Vec<f32> {
    let windows = metrics.rms_windows();
    let max = windows.iter().cloned().fold(0.0_f32, f32::max);
    if max == 0.0 {
        return windows.to_vec();
    }
    windows.iter().map(|&v| v / max).collect()
}
