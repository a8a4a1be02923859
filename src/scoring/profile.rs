//! Threshold and weight tables governing one scoring pass.
//!
//! A profile is built fresh for every pass from scenario, coach tone and
//! optional baseline, and never mutated afterwards; each adjustment step
//! returns a new value.

use tracing::debug;

use crate::types::{BaselineMetrics, CoachTone, ScenarioCategory};

/// Fraction of the gap between a user's baseline rate and the default
/// band midpoint that personalization closes.
const BASELINE_SHIFT_FACTOR: f64 = 0.25;
/// Personalized pacing bands never leave this corridor.
const SEGMENT_RATE_FLOOR: f64 = 6.0;
const SEGMENT_RATE_CEILING: f64 = 60.0;
/// Personalized level and silence limits never pass these bounds.
const LEVEL_MINIMUM_FLOOR: f64 = 0.05;
const SILENCE_RATIO_CEILING: f64 = 0.7;

/// Level-measurement thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioThresholds {
    /// Floor for the silence-ratio statistic.
    pub noise_floor: f32,
    /// Floor for pause and voiced-run detection. Sits above the silence
    /// floor so breathy near-silence still reads as a pause.
    pub pause_floor: f32,
    pub spike_stddev_multiplier: f64,
    pub spike_count_max: u32,
    /// Average level below this reads as an inaudible delivery.
    pub average_level_minimum: f64,
    /// Silence ratio above this reads as a stalled delivery.
    pub silence_ratio_max: f64,
    /// RMS deviation below this counts as steady volume.
    pub volume_stability_max: f64,
    /// Voiced-segment-rate bands (segments per minute), used when no
    /// transcript is available.
    pub segment_rate_slow: f64,
    pub segment_rate_fast: f64,
    pub segment_rate_optimal_low: f64,
    pub segment_rate_optimal_high: f64,
    pub segment_rate_penalty_divisor: f64,
    pub segment_rate_penalty_max: i32,
    /// Pause-duration buckets in seconds.
    pub short_pause_max_secs: f64,
    pub medium_pause_max_secs: f64,
    pub long_pause_count_max: u32,
    /// A take longer than this with zero pauses reads as rushing.
    pub expected_pause_after_secs: f64,
}

impl Default for AudioThresholds {
    fn default() -> Self {
        Self {
            noise_floor: 0.01,
            pause_floor: 0.05,
            spike_stddev_multiplier: 2.0,
            spike_count_max: 5,
            average_level_minimum: 0.12,
            silence_ratio_max: 0.45,
            volume_stability_max: 0.08,
            segment_rate_slow: 12.0,
            segment_rate_fast: 45.0,
            segment_rate_optimal_low: 18.0,
            segment_rate_optimal_high: 35.0,
            segment_rate_penalty_divisor: 1.5,
            segment_rate_penalty_max: 25,
            short_pause_max_secs: 0.5,
            medium_pause_max_secs: 1.5,
            long_pause_count_max: 3,
            expected_pause_after_secs: 30.0,
        }
    }
}

/// Transcript-derived thresholds: base scores, per-unit penalties with
/// independent caps, and bonus bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NlpThresholds {
    pub clarity_base: i32,
    pub filler_penalty_per: i32,
    pub filler_penalty_max: i32,
    pub repeated_penalty_per: i32,
    pub repeated_penalty_max: i32,
    pub incomplete_penalty_per: i32,
    pub incomplete_penalty_max: i32,
    pub low_confidence_penalty_per: i32,
    pub low_confidence_penalty_max: i32,
    /// Transcript segments below this confidence count against clarity.
    pub low_confidence_threshold: f32,
    pub average_word_length_bonus_threshold: f64,
    pub average_word_length_bonus: i32,

    pub pacing_base: i32,
    pub wpm_slow: f64,
    pub wpm_fast: f64,
    pub wpm_optimal_low: f64,
    pub wpm_optimal_high: f64,
    pub wpm_penalty_divisor: f64,
    pub optimal_band_bonus: i32,

    pub confidence_base: i32,
    pub hedging_penalty_per: i32,
    pub hedging_penalty_max: i32,
    pub weak_opener_penalty_per: i32,
    pub weak_opener_penalty_max: i32,
    pub apologetic_penalty_per: i32,
    pub apologetic_penalty_max: i32,
    pub assertive_bonus_per: i32,
    pub assertive_bonus_max: i32,
    pub question_ratio_threshold: f64,
    pub question_ratio_penalty: i32,

    pub tone_base: i32,
    pub sentiment_multiplier: f64,
    pub emotion_balance_threshold: i32,
    pub emotion_balance_bonus: i32,
    pub formal_optimal_min: u32,
    pub formal_optimal_max: u32,
    pub formal_bonus: i32,
    pub formal_excess_threshold: u32,
    pub formal_excess_penalty: i32,
    pub contraction_optimal_min: u32,
    pub contraction_optimal_max: u32,
    pub contraction_bonus: i32,
}

impl Default for NlpThresholds {
    fn default() -> Self {
        Self {
            clarity_base: 90,
            filler_penalty_per: 3,
            filler_penalty_max: 30,
            repeated_penalty_per: 2,
            repeated_penalty_max: 10,
            incomplete_penalty_per: 4,
            incomplete_penalty_max: 12,
            low_confidence_penalty_per: 2,
            low_confidence_penalty_max: 10,
            low_confidence_threshold: 0.5,
            average_word_length_bonus_threshold: 6.0,
            average_word_length_bonus: 5,

            pacing_base: 75,
            wpm_slow: 100.0,
            wpm_fast: 180.0,
            wpm_optimal_low: 120.0,
            wpm_optimal_high: 160.0,
            wpm_penalty_divisor: 2.0,
            optimal_band_bonus: 10,

            confidence_base: 80,
            hedging_penalty_per: 3,
            hedging_penalty_max: 20,
            weak_opener_penalty_per: 4,
            weak_opener_penalty_max: 12,
            apologetic_penalty_per: 5,
            apologetic_penalty_max: 15,
            assertive_bonus_per: 2,
            assertive_bonus_max: 10,
            question_ratio_threshold: 0.12,
            question_ratio_penalty: 8,

            tone_base: 75,
            sentiment_multiplier: 15.0,
            emotion_balance_threshold: 2,
            emotion_balance_bonus: 5,
            formal_optimal_min: 1,
            formal_optimal_max: 3,
            formal_bonus: 4,
            formal_excess_threshold: 6,
            formal_excess_penalty: 4,
            contraction_optimal_min: 2,
            contraction_optimal_max: 10,
            contraction_bonus: 3,
        }
    }
}

/// Flat score adjustments driven by audio statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreTuning {
    /// Confidence penalty when the average level sits under the minimum.
    pub quiet_level_penalty: i32,
    /// Clarity penalty when the silence ratio exceeds its cap.
    pub excess_silence_penalty: i32,
    /// Tone penalty when the spike count exceeds its cap.
    pub spike_penalty: i32,
    /// Confidence bonus for steady volume at an audible level.
    pub steady_volume_bonus: i32,
    /// Pacing penalty for a long take with zero pauses.
    pub rushing_penalty: i32,
    /// Pacing penalty per long pause beyond the cap.
    pub long_pause_penalty_per: i32,
    /// Pacing bonus when medium pauses dominate.
    pub intentional_pause_bonus: i32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            quiet_level_penalty: 10,
            excess_silence_penalty: 8,
            spike_penalty: 6,
            steady_volume_bonus: 5,
            rushing_penalty: 10,
            long_pause_penalty_per: 3,
            intentional_pause_bonus: 5,
        }
    }
}

/// Per-dimension multipliers used for strength/weakness selection and any
/// weighted aggregation. Raw 0-100 scores are never scaled by these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub clarity: f64,
    pub pacing: f64,
    pub tone: f64,
    pub confidence: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            clarity: 1.0,
            pacing: 1.0,
            tone: 1.0,
            confidence: 1.0,
        }
    }
}

impl ScoreWeights {
    fn multiplied(self, other: ScoreWeights) -> ScoreWeights {
        ScoreWeights {
            clarity: self.clarity * other.clarity,
            pacing: self.pacing * other.pacing,
            tone: self.tone * other.tone,
            confidence: self.confidence * other.confidence,
        }
    }
}

/// What matters most per conversation type.
fn scenario_weights(scenario: ScenarioCategory) -> ScoreWeights {
    match scenario {
        ScenarioCategory::Boundaries => ScoreWeights {
            clarity: 1.1,
            pacing: 0.9,
            tone: 1.0,
            confidence: 1.2,
        },
        ScenarioCategory::Career => ScoreWeights {
            clarity: 1.2,
            pacing: 1.0,
            tone: 0.95,
            confidence: 1.1,
        },
        ScenarioCategory::Relationships => ScoreWeights {
            clarity: 1.0,
            pacing: 0.95,
            tone: 1.25,
            confidence: 1.0,
        },
        ScenarioCategory::Difficult => ScoreWeights {
            clarity: 1.05,
            pacing: 0.9,
            tone: 1.15,
            confidence: 1.15,
        },
    }
}

/// Fixed bias per coaching style, applied on top of scenario weights.
fn coach_tone_bias(tone: CoachTone) -> ScoreWeights {
    match tone {
        CoachTone::Gentle => ScoreWeights {
            clarity: 0.95,
            pacing: 1.0,
            tone: 1.15,
            confidence: 0.95,
        },
        CoachTone::Direct => ScoreWeights {
            clarity: 1.05,
            pacing: 1.0,
            tone: 0.9,
            confidence: 1.1,
        },
        CoachTone::Executive => ScoreWeights {
            clarity: 1.15,
            pacing: 1.1,
            tone: 0.85,
            confidence: 1.05,
        },
    }
}

/// The full configuration for one scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoringProfile {
    pub audio: AudioThresholds,
    pub nlp: NlpThresholds,
    pub tuning: ScoreTuning,
    pub weights: ScoreWeights,
}

/// Compose defaults with the scenario weight table, the coach tone bias
/// and bounded baseline personalization.
pub fn build_profile(
    scenario: ScenarioCategory,
    baseline: Option<&BaselineMetrics>,
    coach_tone: CoachTone,
) -> ScoringProfile {
    let mut profile = ScoringProfile {
        weights: scenario_weights(scenario).multiplied(coach_tone_bias(coach_tone)),
        ..ScoringProfile::default()
    };
    if let Some(baseline) = baseline {
        profile = personalize(profile, baseline);
    }
    debug!(
        scenario = scenario.as_str(),
        coach_tone = coach_tone.as_str(),
        personalized = baseline.is_some(),
        "scoring profile built"
    );
    profile
}

/// Shift thresholds toward the user's own baseline, within hard bounds.
/// Every baseline field is independently optional.
fn personalize(mut profile: ScoringProfile, baseline: &BaselineMetrics) -> ScoringProfile {
    let audio = &mut profile.audio;
    if let Some(rate) = baseline.segments_per_minute {
        let midpoint = (audio.segment_rate_optimal_low + audio.segment_rate_optimal_high) / 2.0;
        // clamp the shift itself so the slow floor and fast ceiling hold
        // while the four thresholds keep their ordering
        let shift = (BASELINE_SHIFT_FACTOR * (rate - midpoint))
            .max(SEGMENT_RATE_FLOOR - audio.segment_rate_slow)
            .min(SEGMENT_RATE_CEILING - audio.segment_rate_fast);
        audio.segment_rate_slow += shift;
        audio.segment_rate_fast += shift;
        audio.segment_rate_optimal_low += shift;
        audio.segment_rate_optimal_high += shift;
    }
    if let Some(level) = baseline.average_level {
        audio.average_level_minimum =
            (audio.average_level_minimum.min(level * 0.6)).max(LEVEL_MINIMUM_FLOOR);
    }
    if let Some(silence) = baseline.silence_ratio {
        audio.silence_ratio_max =
            (audio.silence_ratio_max.max(silence + 0.1)).min(SILENCE_RATIO_CEILING);
    }
    profile
}
