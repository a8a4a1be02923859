//! Runtime-configurable session inputs parsed from JSON.

use anyhow::{ensure, Result};
use serde::Deserialize;

use crate::types::{AudioMetrics, BaselineMetrics, TranscriptSegment, TranscriptionResult};

/// A recorded session as dumped by a recorder: raw metric arrays plus an
/// optional transcript.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeSession {
    #[serde(alias = "rmsWindows")]
    pub rms_windows: Vec<f32>,
    #[serde(alias = "peakWindows")]
    pub peak_windows: Vec<f32>,
    #[serde(alias = "durationSeconds")]
    pub duration: f64,
    #[serde(default)]
    pub transcript: Option<RuntimeTranscript>,
}

impl RuntimeSession {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.duration.is_finite() && self.duration >= 0.0,
            "session duration must be a non-negative number"
        );
        ensure!(
            self.rms_windows.len() == self.peak_windows.len(),
            "rms_windows and peak_windows must have the same length (got {} and {})",
            self.rms_windows.len(),
            self.peak_windows.len()
        );
        if let Some(transcript) = &self.transcript {
            transcript.validate()?;
        }
        Ok(())
    }

    pub fn to_metrics(&self) -> AudioMetrics {
        AudioMetrics::new(
            self.rms_windows.clone(),
            self.peak_windows.clone(),
            self.duration,
        )
    }

    pub fn to_transcript(&self) -> Option<TranscriptionResult> {
        self.transcript.as_ref().map(RuntimeTranscript::to_result)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeTranscript {
    pub text: String,
    #[serde(default)]
    pub segments: Vec<RuntimeSegment>,
}

impl RuntimeTranscript {
    fn validate(&self) -> Result<()> {
        for (idx, segment) in self.segments.iter().enumerate() {
            ensure!(
                segment.duration.is_finite() && segment.duration >= 0.0,
                "transcript segment {} duration must be non-negative",
                idx
            );
        }
        Ok(())
    }

    pub fn to_result(&self) -> TranscriptionResult {
        TranscriptionResult {
            text: self.text.clone(),
            segments: self
                .segments
                .iter()
                .map(|segment| {
                    TranscriptSegment::new(
                        segment.text.clone(),
                        segment.timestamp,
                        segment.duration,
                        segment.confidence,
                    )
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeSegment {
    pub text: String,
    #[serde(default, alias = "start")]
    pub timestamp: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

fn full_confidence() -> f32 {
    1.0
}

/// Rolling baseline averages as exported by the session history store.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RuntimeBaseline {
    #[serde(default, alias = "segmentsPerMinute")]
    pub segments_per_minute: Option<f64>,
    #[serde(default, alias = "averageLevel")]
    pub average_level: Option<f64>,
    #[serde(default, alias = "silenceRatio")]
    pub silence_ratio: Option<f64>,
    #[serde(default, alias = "volumeStability")]
    pub volume_stability: Option<f64>,
    #[serde(default, alias = "wordsPerMinute")]
    pub words_per_minute: Option<f64>,
}

impl RuntimeBaseline {
    pub fn to_baseline(&self) -> BaselineMetrics {
        BaselineMetrics {
            segments_per_minute: self.segments_per_minute,
            average_level: self.average_level,
            silence_ratio: self.silence_ratio,
            volume_stability: self.volume_stability,
            words_per_minute: self.words_per_minute,
        }
    }
}

/// A previously persisted scores record, re-read for trend deltas. Only
/// the four dimension values matter; derived fields are recomputed.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RuntimePreviousScores {
    pub clarity: u8,
    pub pacing: u8,
    pub tone: u8,
    pub confidence: u8,
}
