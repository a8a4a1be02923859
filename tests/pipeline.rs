use speakscore::scoring::{Dimension, FeedbackScores, ScoreDelta, ScoreWeights};
use speakscore::session::score_session;
use speakscore::types::{
    AudioMetrics, CoachTone, ScenarioCategory, TranscriptSegment, TranscriptionResult,
};

fn default_report(metrics: &AudioMetrics) -> speakscore::session::SessionReport {
    score_session(metrics, None, ScenarioCategory::Career, None, CoachTone::Gentle)
}

#[test]
fn empty_session_scores_deterministically() {
    let metrics = AudioMetrics::new(Vec::new(), Vec::new(), 0.0);
    let first = default_report(&metrics);
    let second = default_report(&metrics);
    assert_eq!(first.scores, second.scores);
    assert!(first.scores.overall <= 100);
    assert_eq!(first.analyses.pacing.pause_count, 0);
    assert_eq!(first.analyses.pacing.words_per_minute, None);
}

#[test]
fn alternating_speech_and_pause_is_non_degenerate() {
    // 120 windows alternating voiced and near-silent over 12 seconds
    let rms: Vec<f32> = (0..120)
        .map(|i| if i % 2 == 0 { 0.4 } else { 0.02 })
        .collect();
    let peaks = rms.clone();
    let metrics = AudioMetrics::new(rms, peaks, 12.0);
    let report = default_report(&metrics);

    assert!(report.analyses.pacing.pause_count > 0);
    assert!(report.analyses.pacing.voiced_segments_per_minute > 0.0);
    assert!((40..=100).contains(&report.scores.pacing));
    assert!((40..=100).contains(&report.scores.tone));
}

#[test]
fn overall_is_always_the_floored_average() {
    for clarity in (0..=100).step_by(7) {
        for pacing in (0..=100).step_by(13) {
            for tone in (0..=100).step_by(17) {
                for confidence in (0..=100).step_by(23) {
                    let scores = FeedbackScores::from_dimensions(
                        clarity,
                        pacing,
                        tone,
                        confidence,
                        &ScoreWeights::default(),
                    );
                    let expected = (clarity as u16 + pacing as u16 + tone as u16
                        + confidence as u16)
                        / 4;
                    assert_eq!(scores.overall as u16, expected);
                }
            }
        }
    }
}

#[test]
fn all_equal_scores_resolve_to_clarity() {
    let scores = FeedbackScores::from_dimensions(72, 72, 72, 72, &ScoreWeights::default());
    assert_eq!(scores.primary_strength, Dimension::Clarity);
    assert_eq!(scores.primary_weakness, Dimension::Clarity);
    assert_eq!(scores.weighted_strength, Dimension::Clarity);
    assert_eq!(scores.weighted_weakness, Dimension::Clarity);
}

#[test]
fn transcript_signals_reach_every_dimension() {
    let text = "Um I think I'm sorry but we will definitely hit the goal \
                and I'm excited because the plan is great and therefore we can move";
    let transcript = TranscriptionResult {
        text: text.to_string(),
        segments: vec![
            TranscriptSegment::new("um i think i'm sorry but we will", 0.0, 6.0, 0.95),
            TranscriptSegment::new("definitely hit the goal", 6.0, 5.0, 0.4),
        ],
    };
    let rms: Vec<f32> = (0..110)
        .map(|i| if i % 11 == 10 { 0.01 } else { 0.35 })
        .collect();
    let peaks = rms.clone();
    let metrics = AudioMetrics::new(rms, peaks, 11.0);

    let with_transcript = score_session(
        &metrics,
        Some(&transcript),
        ScenarioCategory::Career,
        None,
        CoachTone::Gentle,
    );
    let audio_only = default_report(&metrics);

    let analyses = &with_transcript.analyses;
    assert!(analyses.clarity.filler_count > 0);
    assert!(analyses.confidence.hedging_count > 0);
    assert!(analyses.confidence.apologetic_count > 0);
    assert!(analyses.tone.positive_count > 0);
    assert_eq!(analyses.clarity.low_confidence_segments, 1);
    assert!(analyses.pacing.words_per_minute.is_some());
    assert_eq!(audio_only.analyses.pacing.words_per_minute, None);

    // lexical penalties and bonuses only exist on the transcript side
    assert_ne!(with_transcript.scores.clarity, audio_only.scores.clarity);
}

#[test]
fn cancelled_transcription_scores_like_audio_only() {
    let rms = vec![0.3_f32; 200];
    let peaks = rms.clone();
    let metrics = AudioMetrics::new(rms, peaks, 20.0);
    // a cancelled transcription is discarded upstream and arrives as None
    let report = score_session(&metrics, None, ScenarioCategory::Boundaries, None, CoachTone::Direct);
    assert_eq!(report.analyses.confidence.word_count, 0);
    assert!(report.scores.overall <= 100);
}

#[test]
fn deltas_line_up_with_score_movement() {
    let quiet = AudioMetrics::new(vec![0.02_f32; 300], vec![0.05; 300], 30.0);
    let steady = AudioMetrics::new(vec![0.35_f32; 300], vec![0.45; 300], 30.0);
    let previous = default_report(&quiet).scores;
    let current = default_report(&steady).scores;

    let delta = ScoreDelta::between(&current, &previous);
    assert_eq!(
        delta.confidence,
        current.confidence as i16 - previous.confidence as i16
    );
    assert_eq!(delta.overall, current.overall as i16 - previous.overall as i16);
    // the louder steadier take cannot score lower on confidence
    assert!(delta.confidence >= 0);
}
