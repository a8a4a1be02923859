//! Core types for the speakscore feedback pipeline

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Immutable level-measurement snapshot for one completed recording.
///
/// One RMS and one peak sample per sampling tick, both on a linear
/// [0.0, 1.0] scale. Frozen when recording stops; everything downstream
/// reads from this and never writes back.
#[derive(Debug, Clone, Default)]
pub struct AudioMetrics {
    rms_windows: Vec<f32>,
    peak_windows: Vec<f32>,
    duration: f64,
}

impl AudioMetrics {
    /// Build a snapshot, clamping every window into [0, 1] and equalizing
    /// sequence lengths. Upstream samplers already guarantee both, so the
    /// clamps only matter for hand-built or deserialized inputs.
    pub fn new(rms_windows: Vec<f32>, peak_windows: Vec<f32>, duration: f64) -> Self {
        let len = rms_windows.len().min(peak_windows.len());
        let mut rms = rms_windows;
        let mut peak = peak_windows;
        rms.truncate(len);
        peak.truncate(len);
        for value in rms.iter_mut().chain(peak.iter_mut()) {
            *value = value.clamp(0.0, 1.0);
        }
        Self {
            rms_windows: rms,
            peak_windows: peak,
            duration: duration.max(0.0),
        }
    }

    pub fn rms_windows(&self) -> &[f32] {
        &self.rms_windows
    }

    pub fn peak_windows(&self) -> &[f32] {
        &self.peak_windows
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_empty(&self) -> bool {
        self.rms_windows.is_empty()
    }

    /// Duration of a single window in seconds, or 0 when there are none.
    pub fn window_duration(&self) -> f64 {
        if self.rms_windows.is_empty() {
            0.0
        } else {
            self.duration / self.rms_windows.len() as f64
        }
    }
}

/// Transcript handed over by the external speech-to-text collaborator.
/// Absent entirely when the user disables transcription; a cancelled
/// transcription must be dropped upstream, never passed in partially.
#[derive(Debug, Clone, Default)]
pub struct TranscriptionResult {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone)]
pub struct TranscriptSegment {
    pub text: String,
    pub timestamp: f64,
    pub duration: f64,
    pub confidence: f32,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, timestamp: f64, duration: f64, confidence: f32) -> Self {
        Self {
            text: text.into(),
            timestamp,
            duration,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Rolling averages over a user's recent sessions for one scenario,
/// computed externally. Every field is independently optional; present
/// fields shift scoring thresholds, absent ones leave them untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineMetrics {
    pub segments_per_minute: Option<f64>,
    pub average_level: Option<f64>,
    pub silence_ratio: Option<f64>,
    pub volume_stability: Option<f64>,
    pub words_per_minute: Option<f64>,
}

/// Conversation type being rehearsed. Selects a weight table and nothing
/// else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioCategory {
    Boundaries,
    Career,
    Relationships,
    Difficult,
}

impl ScenarioCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boundaries => "boundaries",
            Self::Career => "career",
            Self::Relationships => "relationships",
            Self::Difficult => "difficult",
        }
    }
}

impl FromStr for ScenarioCategory {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "boundaries" => Ok(Self::Boundaries),
            "career" => Ok(Self::Career),
            "relationships" => Ok(Self::Relationships),
            "difficult" => Ok(Self::Difficult),
            other => Err(format!(
                "unknown scenario '{}' (expected boundaries, career, relationships or difficult)",
                other
            )),
        }
    }
}

/// Coaching style preference. Carries a fixed weight bias; never changes
/// penalty or bonus magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachTone {
    Gentle,
    Direct,
    Executive,
}

impl CoachTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gentle => "gentle",
            Self::Direct => "direct",
            Self::Executive => "executive",
        }
    }
}

impl FromStr for CoachTone {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "gentle" => Ok(Self::Gentle),
            "direct" => Ok(Self::Direct),
            "executive" => Ok(Self::Executive),
            other => Err(format!(
                "unknown coach tone '{}' (expected gentle, direct or executive)",
                other
            )),
        }
    }
}
