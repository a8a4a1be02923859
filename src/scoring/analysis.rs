//! Per-dimension analysis value objects and their scoring formulas.
//!
//! Each analysis holds raw counts and measurements captured once per
//! session; `score` starts from a profile base, applies ordered additive
//! adjustments with independent caps, and clamps to [0, 100] last. Every
//! formula is total: zero denominators disable the dependent adjustment
//! instead of failing.

use tracing::debug;

use crate::audio::analyzer;
use crate::lexical::PatternCounts;
use crate::scoring::profile::ScoringProfile;
use crate::types::{AudioMetrics, TranscriptionResult};

fn clamp_score(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

fn capped(count: u32, per_unit: i32, cap: i32) -> i64 {
    (count as i64 * per_unit as i64).min(cap as i64)
}

/// How cleanly the delivery reads: fillers, repeats, trailing-off
/// sentences, transcription certainty, dead air.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClarityAnalysis {
    pub filler_count: u32,
    pub repeated_word_count: u32,
    pub incomplete_count: u32,
    pub low_confidence_segments: u32,
    pub average_word_length: f64,
    pub silence_ratio: f64,
}

impl ClarityAnalysis {
    pub fn score(&self, profile: &ScoringProfile) -> u8 {
        let nlp = &profile.nlp;
        let mut score = nlp.clarity_base as i64;
        score -= capped(self.filler_count, nlp.filler_penalty_per, nlp.filler_penalty_max);
        score -= capped(
            self.repeated_word_count,
            nlp.repeated_penalty_per,
            nlp.repeated_penalty_max,
        );
        score -= capped(
            self.incomplete_count,
            nlp.incomplete_penalty_per,
            nlp.incomplete_penalty_max,
        );
        score -= capped(
            self.low_confidence_segments,
            nlp.low_confidence_penalty_per,
            nlp.low_confidence_penalty_max,
        );
        if self.average_word_length > nlp.average_word_length_bonus_threshold {
            score += nlp.average_word_length_bonus as i64;
        }
        if self.silence_ratio > profile.audio.silence_ratio_max {
            score -= profile.tuning.excess_silence_penalty as i64;
        }
        clamp_score(score)
    }
}

/// Delivery rhythm: words per minute when a transcript exists, voiced
/// segment rate otherwise, plus pause structure.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PacingAnalysis {
    /// Absent without a transcript or when duration is zero.
    pub words_per_minute: Option<f64>,
    pub voiced_segments_per_minute: f64,
    pub pause_count: u32,
    pub short_pauses: u32,
    pub medium_pauses: u32,
    pub long_pauses: u32,
    pub duration: f64,
}

impl PacingAnalysis {
    pub fn score(&self, profile: &ScoringProfile) -> u8 {
        let nlp = &profile.nlp;
        let audio = &profile.audio;
        let tuning = &profile.tuning;
        let mut score = nlp.pacing_base as i64;

        match self.words_per_minute {
            Some(wpm) => {
                if wpm < nlp.wpm_slow {
                    score -= ((nlp.wpm_slow - wpm) / nlp.wpm_penalty_divisor).round() as i64;
                } else if wpm > nlp.wpm_fast {
                    score -= ((wpm - nlp.wpm_fast) / nlp.wpm_penalty_divisor).round() as i64;
                } else if wpm >= nlp.wpm_optimal_low && wpm <= nlp.wpm_optimal_high {
                    score += nlp.optimal_band_bonus as i64;
                }
            }
            None if self.duration > 0.0 => {
                let rate = self.voiced_segments_per_minute;
                if rate < audio.segment_rate_slow {
                    let penalty = ((audio.segment_rate_slow - rate)
                        / audio.segment_rate_penalty_divisor)
                        .round() as i64;
                    score -= penalty.min(audio.segment_rate_penalty_max as i64);
                } else if rate > audio.segment_rate_fast {
                    let penalty = ((rate - audio.segment_rate_fast)
                        / audio.segment_rate_penalty_divisor)
                        .round() as i64;
                    score -= penalty.min(audio.segment_rate_penalty_max as i64);
                } else if rate >= audio.segment_rate_optimal_low
                    && rate <= audio.segment_rate_optimal_high
                {
                    score += nlp.optimal_band_bonus as i64;
                }
            }
            None => {}
        }

        if self.pause_count == 0 && self.duration > audio.expected_pause_after_secs {
            score -= tuning.rushing_penalty as i64;
        }
        if self.long_pauses > audio.long_pause_count_max {
            score -= (self.long_pauses - audio.long_pause_count_max) as i64
                * tuning.long_pause_penalty_per as i64;
        }
        if self.medium_pauses > self.short_pauses && self.medium_pauses > self.long_pauses {
            score += tuning.intentional_pause_bonus as i64;
        }
        clamp_score(score)
    }
}

/// How assured the delivery sounds: hedges, weak openers, apologies,
/// assertive phrasing, questioning, and vocal steadiness.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfidenceAnalysis {
    pub hedging_count: u32,
    pub weak_opener_count: u32,
    pub apologetic_count: u32,
    pub assertive_count: u32,
    pub question_word_count: u32,
    pub word_count: u32,
    pub average_level: f64,
    pub level_std_dev: f64,
}

impl ConfidenceAnalysis {
    pub fn score(&self, profile: &ScoringProfile) -> u8 {
        let nlp = &profile.nlp;
        let mut score = nlp.confidence_base as i64;
        score -= capped(self.hedging_count, nlp.hedging_penalty_per, nlp.hedging_penalty_max);
        score -= capped(
            self.weak_opener_count,
            nlp.weak_opener_penalty_per,
            nlp.weak_opener_penalty_max,
        );
        score -= capped(
            self.apologetic_count,
            nlp.apologetic_penalty_per,
            nlp.apologetic_penalty_max,
        );
        score += capped(
            self.assertive_count,
            nlp.assertive_bonus_per,
            nlp.assertive_bonus_max,
        );
        if self.word_count > 0 {
            let ratio = self.question_word_count as f64 / self.word_count as f64;
            if ratio > nlp.question_ratio_threshold {
                score -= nlp.question_ratio_penalty as i64;
            }
        }
        if self.average_level < profile.audio.average_level_minimum {
            score -= profile.tuning.quiet_level_penalty as i64;
        } else if self.level_std_dev < profile.audio.volume_stability_max {
            score += profile.tuning.steady_volume_bonus as i64;
        }
        clamp_score(score)
    }
}

/// Emotional coloring: sentiment balance, formality, conversational
/// register, volume spikes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToneAnalysis {
    /// In [-1, 1].
    pub sentiment_score: f64,
    pub positive_count: u32,
    pub negative_count: u32,
    pub formal_count: u32,
    pub contraction_count: u32,
    pub spike_count: u32,
}

impl ToneAnalysis {
    pub fn score(&self, profile: &ScoringProfile) -> u8 {
        let nlp = &profile.nlp;
        let mut score = nlp.tone_base as i64;
        score += (self.sentiment_score * nlp.sentiment_multiplier).round() as i64;

        let balance = self.positive_count as i64 - self.negative_count as i64;
        if balance > nlp.emotion_balance_threshold as i64 {
            score += nlp.emotion_balance_bonus as i64;
        } else if balance < -(nlp.emotion_balance_threshold as i64) {
            score -= nlp.emotion_balance_bonus as i64;
        }

        if (nlp.formal_optimal_min..=nlp.formal_optimal_max).contains(&self.formal_count) {
            score += nlp.formal_bonus as i64;
        } else if self.formal_count > nlp.formal_excess_threshold {
            score -= nlp.formal_excess_penalty as i64;
        }

        if (nlp.contraction_optimal_min..=nlp.contraction_optimal_max)
            .contains(&self.contraction_count)
        {
            score += nlp.contraction_bonus as i64;
        }

        if self.spike_count > profile.audio.spike_count_max {
            score -= profile.tuning.spike_penalty as i64;
        }
        clamp_score(score)
    }
}

/// The four analyses for one session, derived in a single pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionAnalyses {
    pub clarity: ClarityAnalysis,
    pub pacing: PacingAnalysis,
    pub confidence: ConfidenceAnalysis,
    pub tone: ToneAnalysis,
}

/// Derive every per-dimension analysis from the frozen metrics and the
/// optional transcript. Pure; thresholds come from the profile.
pub fn extract_analyses(
    metrics: &AudioMetrics,
    transcript: Option<&TranscriptionResult>,
    profile: &ScoringProfile,
) -> SessionAnalyses {
    let audio = &profile.audio;
    let counts = PatternCounts::from_transcript(transcript);

    let average_level = analyzer::average_rms(metrics);
    let level_std_dev = analyzer::rms_std_dev(metrics);
    let spike_count = analyzer::spike_count(metrics, audio.spike_stddev_multiplier) as u32;
    let silence_ratio = analyzer::silence_ratio(metrics, audio.noise_floor);
    let runs = analyzer::pause_runs(metrics, audio.pause_floor);
    let voiced_rate = analyzer::voiced_segments_per_minute(metrics, audio.pause_floor);

    let mut short_pauses = 0u32;
    let mut medium_pauses = 0u32;
    let mut long_pauses = 0u32;
    for run in &runs {
        if run.duration <= audio.short_pause_max_secs {
            short_pauses += 1;
        } else if run.duration <= audio.medium_pause_max_secs {
            medium_pauses += 1;
        } else {
            long_pauses += 1;
        }
    }

    let low_confidence_segments = transcript
        .map(|result| {
            result
                .segments
                .iter()
                .filter(|segment| segment.confidence < profile.nlp.low_confidence_threshold)
                .count() as u32
        })
        .unwrap_or(0);

    let words_per_minute = match transcript {
        Some(_) if metrics.duration() > 0.0 => {
            Some(counts.word_count as f64 / (metrics.duration() / 60.0))
        }
        _ => None,
    };

    debug!(
        windows = metrics.rms_windows().len(),
        pauses = runs.len(),
        words = counts.word_count,
        has_transcript = transcript.is_some(),
        "session analyses extracted"
    );

    SessionAnalyses {
        clarity: ClarityAnalysis {
            filler_count: counts.filler,
            repeated_word_count: counts.repeated_words,
            incomplete_count: counts.incomplete,
            low_confidence_segments,
            average_word_length: counts.average_word_length,
            silence_ratio,
        },
        pacing: PacingAnalysis {
            words_per_minute,
            voiced_segments_per_minute: voiced_rate,
            pause_count: runs.len() as u32,
            short_pauses,
            medium_pauses,
            long_pauses,
            duration: metrics.duration(),
        },
        confidence: ConfidenceAnalysis {
            hedging_count: counts.hedging,
            weak_opener_count: counts.weak_openers,
            apologetic_count: counts.apologetic,
            assertive_count: counts.assertive,
            question_word_count: counts.question_words,
            word_count: counts.word_count,
            average_level,
            level_std_dev,
        },
        tone: ToneAnalysis {
            sentiment_score: counts.sentiment_score(),
            positive_count: counts.positive,
            negative_count: counts.negative,
            formal_count: counts.formal,
            contraction_count: counts.contractions,
            spike_count,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TranscriptSegment;

    fn profile() -> ScoringProfile {
        ScoringProfile::default()
    }

    #[test]
    fn clarity_penalties_cap_independently() {
        let analysis = ClarityAnalysis {
            filler_count: 50,
            repeated_word_count: 50,
            incomplete_count: 50,
            low_confidence_segments: 50,
            ..ClarityAnalysis::default()
        };
        // 90 - 30 - 10 - 12 - 10 = 28; each penalty saturates at its cap
        assert_eq!(analysis.score(&profile()), 28);
    }

    #[test]
    fn clarity_rewards_longer_words() {
        let wordy = ClarityAnalysis {
            average_word_length: 6.5,
            ..ClarityAnalysis::default()
        };
        let plain = ClarityAnalysis::default();
        assert_eq!(wordy.score(&profile()), plain.score(&profile()) + 5);
    }

    #[test]
    fn pacing_prefers_the_optimal_band() {
        let optimal = PacingAnalysis {
            words_per_minute: Some(140.0),
            pause_count: 2,
            short_pauses: 2,
            duration: 20.0,
            ..PacingAnalysis::default()
        };
        let neutral = PacingAnalysis {
            words_per_minute: Some(110.0),
            ..optimal
        };
        assert_eq!(optimal.score(&profile()), 85);
        assert_eq!(neutral.score(&profile()), 75);
    }

    #[test]
    fn pacing_slow_penalty_scales_with_gap() {
        let crawl = PacingAnalysis {
            words_per_minute: Some(60.0),
            pause_count: 1,
            duration: 20.0,
            ..PacingAnalysis::default()
        };
        // (100 - 60) / 2 = 20 off the base
        assert_eq!(crawl.score(&profile()), 55);
    }

    #[test]
    fn pacing_flags_unbroken_long_takes() {
        let rushed = PacingAnalysis {
            words_per_minute: Some(140.0),
            pause_count: 0,
            duration: 45.0,
            ..PacingAnalysis::default()
        };
        // optimal band +10, rushing -10
        assert_eq!(rushed.score(&profile()), 75);
    }

    #[test]
    fn pacing_rewards_medium_pause_dominance() {
        let deliberate = PacingAnalysis {
            words_per_minute: Some(110.0),
            pause_count: 5,
            short_pauses: 1,
            medium_pauses: 3,
            long_pauses: 1,
            duration: 40.0,
            ..PacingAnalysis::default()
        };
        assert_eq!(deliberate.score(&profile()), 80);
    }

    #[test]
    fn confidence_question_ratio_needs_words() {
        let silent = ConfidenceAnalysis {
            question_word_count: 10,
            word_count: 0,
            average_level: 0.3,
            level_std_dev: 0.2,
            ..ConfidenceAnalysis::default()
        };
        // zero word count disables the ratio penalty entirely
        assert_eq!(silent.score(&profile()), 80);
    }

    #[test]
    fn confidence_rewards_steady_audible_volume() {
        let steady = ConfidenceAnalysis {
            average_level: 0.3,
            level_std_dev: 0.05,
            ..ConfidenceAnalysis::default()
        };
        let quiet = ConfidenceAnalysis {
            average_level: 0.05,
            level_std_dev: 0.05,
            ..ConfidenceAnalysis::default()
        };
        assert_eq!(steady.score(&profile()), 85);
        // quiet delivery loses the bonus and takes the penalty
        assert_eq!(quiet.score(&profile()), 70);
    }

    #[test]
    fn tone_sentiment_swings_the_score() {
        let upbeat = ToneAnalysis {
            sentiment_score: 1.0,
            positive_count: 4,
            negative_count: 0,
            contraction_count: 3,
            ..ToneAnalysis::default()
        };
        // 75 + 15 + 5 + 3 = 98
        assert_eq!(upbeat.score(&profile()), 98);

        let grim = ToneAnalysis {
            sentiment_score: -1.0,
            positive_count: 0,
            negative_count: 4,
            ..ToneAnalysis::default()
        };
        // 75 - 15 - 5 = 55
        assert_eq!(grim.score(&profile()), 55);
    }

    #[test]
    fn tone_formality_has_a_sweet_spot() {
        let measured = ToneAnalysis {
            formal_count: 2,
            ..ToneAnalysis::default()
        };
        let stiff = ToneAnalysis {
            formal_count: 9,
            ..ToneAnalysis::default()
        };
        assert_eq!(measured.score(&profile()), 79);
        assert_eq!(stiff.score(&profile()), 71);
    }

    #[test]
    fn extraction_buckets_pauses_by_duration() {
        // 0.1 s windows: runs of 3 (0.3 s), 12 (1.2 s) and 20 (2.0 s)
        let mut rms = vec![0.4_f32; 5];
        rms.extend(vec![0.0; 3]);
        rms.extend(vec![0.4; 5]);
        rms.extend(vec![0.0; 12]);
        rms.extend(vec![0.4; 5]);
        rms.extend(vec![0.0; 20]);
        rms.extend(vec![0.4; 5]);
        let len = rms.len();
        let metrics = AudioMetrics::new(rms.clone(), rms, len as f64 * 0.1);

        let analyses = extract_analyses(&metrics, None, &profile());
        assert_eq!(analyses.pacing.pause_count, 3);
        assert_eq!(analyses.pacing.short_pauses, 1);
        assert_eq!(analyses.pacing.medium_pauses, 1);
        assert_eq!(analyses.pacing.long_pauses, 1);
    }

    #[test]
    fn extraction_counts_low_confidence_segments() {
        let transcript = TranscriptionResult {
            text: "we will win".to_string(),
            segments: vec![
                TranscriptSegment::new("we will", 0.0, 1.0, 0.9),
                TranscriptSegment::new("win", 1.0, 0.5, 0.3),
            ],
        };
        let metrics = AudioMetrics::new(vec![0.4; 100], vec![0.5; 100], 10.0);
        let analyses = extract_analyses(&metrics, Some(&transcript), &profile());
        assert_eq!(analyses.clarity.low_confidence_segments, 1);
        // 3 words over 10 seconds is 18 words per minute
        let wpm = analyses.pacing.words_per_minute.unwrap();
        assert!((wpm - 18.0).abs() < 1e-9);
    }

    #[test]
    fn extraction_without_transcript_has_no_wpm() {
        let metrics = AudioMetrics::new(vec![0.4; 10], vec![0.5; 10], 1.0);
        let analyses = extract_analyses(&metrics, None, &profile());
        assert_eq!(analyses.pacing.words_per_minute, None);
        assert_eq!(analyses.confidence.word_count, 0);
    }
}
