//! Whole-session scoring pipeline: profile composition, analysis
//! extraction, dimension scoring, aggregation.

use tracing::info;

use crate::scoring::analysis::{extract_analyses, SessionAnalyses};
use crate::scoring::{build_profile, FeedbackScores};
use crate::types::{AudioMetrics, BaselineMetrics, CoachTone, ScenarioCategory, TranscriptionResult};

/// Everything one completed session produces: the persisted scores plus
/// the read-only analyses that back raw-count displays.
#[derive(Debug, Clone, Copy)]
pub struct SessionReport {
    pub scores: FeedbackScores,
    pub analyses: SessionAnalyses,
}

/// Score one completed session.
///
/// Pure and synchronous over immutable inputs; safe to run on any worker
/// thread. The profile is composed fresh for this pass and discarded. A
/// cancelled transcription must arrive here as `None`, never as a
/// partial transcript.
pub fn score_session(
    metrics: &AudioMetrics,
    transcript: Option<&TranscriptionResult>,
    scenario: ScenarioCategory,
    baseline: Option<&BaselineMetrics>,
    coach_tone: CoachTone,
) -> SessionReport {
    let profile = build_profile(scenario, baseline, coach_tone);
    let analyses = extract_analyses(metrics, transcript, &profile);

    let clarity = analyses.clarity.score(&profile);
    let pacing = analyses.pacing.score(&profile);
    let tone = analyses.tone.score(&profile);
    let confidence = analyses.confidence.score(&profile);
    let scores =
        FeedbackScores::from_dimensions(clarity, pacing, tone, confidence, &profile.weights);

    info!(
        scenario = scenario.as_str(),
        clarity,
        pacing,
        tone,
        confidence,
        overall = scores.overall,
        tier = scores.tier.as_str(),
        "session scored"
    );
    SessionReport { scores, analyses }
}
