//! Live recording-quality classification over a trailing sample window.

use std::collections::VecDeque;

use tracing::debug;

/// Trailing samples inspected on every tick (2 s at the default cadence).
const TRAILING_WINDOW: usize = 20;
/// Trailing average below this reads as an inaudible speaker.
const QUIET_AVERAGE_MAX: f32 = 0.02;
/// Any trailing peak above this reads as clipping-level input.
const LOUD_PEAK_MIN: f32 = 0.95;
/// Band of steady low-level energy that suggests background noise
/// rather than speech.
const NOISY_AVERAGE_MAX: f32 = 0.06;
const NOISY_PEAK_MAX: f32 = 0.3;

/// At most one warning is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityWarning {
    TooQuiet,
    TooLoud,
    NoisyEnvironment,
    Clear,
}

/// Classifies recent level samples and reports transitions.
///
/// `observe` returns `Some` only when the classification changes, so a
/// sustained condition signals exactly once.
#[derive(Debug)]
pub struct QualityMonitor {
    window: VecDeque<(f32, f32)>,
    current: QualityWarning,
}

impl Default for QualityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityMonitor {
    pub fn new() -> Self {
        Self {
            window: VecDeque::with_capacity(TRAILING_WINDOW),
            current: QualityWarning::Clear,
        }
    }

    pub fn current(&self) -> QualityWarning {
        self.current
    }

    /// Feed one `(rms, peak)` sample; returns the new classification when
    /// it differs from the previous tick.
    pub fn observe(&mut self, rms: f32, peak: f32) -> Option<QualityWarning> {
        if self.window.len() == TRAILING_WINDOW {
            self.window.pop_front();
        }
        self.window.push_back((rms, peak));
        if self.window.len() < TRAILING_WINDOW {
            return None;
        }
        let next = self.classify();
        if next == self.current {
            return None;
        }
        debug!(from = ?self.current, to = ?next, "recording quality changed");
        self.current = next;
        Some(next)
    }

    fn classify(&self) -> QualityWarning {
        let average =
            self.window.iter().map(|(rms, _)| rms).sum::<f32>() / self.window.len() as f32;
        let peak_max = self
            .window
            .iter()
            .map(|(_, peak)| *peak)
            .fold(0.0_f32, f32::max);

        if peak_max > LOUD_PEAK_MIN {
            QualityWarning::TooLoud
        } else if average < QUIET_AVERAGE_MAX {
            QualityWarning::TooQuiet
        } else if average < NOISY_AVERAGE_MAX && peak_max < NOISY_PEAK_MAX {
            QualityWarning::NoisyEnvironment
        } else {
            QualityWarning::Clear
        }
    }
}
