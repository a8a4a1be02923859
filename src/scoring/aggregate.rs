//! Aggregation of the four dimension scores into the persisted feedback
//! artifact.

use serde::Serialize;

use crate::scoring::profile::ScoreWeights;

/// The four delivery dimensions, in fixed order. Ties in strength or
/// weakness selection always resolve to the earliest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Clarity,
    Pacing,
    Tone,
    Confidence,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Clarity,
        Dimension::Pacing,
        Dimension::Tone,
        Dimension::Confidence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clarity => "clarity",
            Self::Pacing => "pacing",
            Self::Tone => "tone",
            Self::Confidence => "confidence",
        }
    }
}

/// Categorical bucket derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Excellent,
    Good,
    Developing,
    NeedsWork,
}

impl Tier {
    fn from_overall(overall: u8) -> Self {
        match overall {
            85..=100 => Self::Excellent,
            70..=84 => Self::Good,
            55..=69 => Self::Developing,
            _ => Self::NeedsWork,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Developing => "developing",
            Self::NeedsWork => "needs work",
        }
    }
}

/// One session's scores plus everything derived from them. Immutable;
/// serializes to a flat JSON object for persistence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackScores {
    pub clarity: u8,
    pub pacing: u8,
    pub tone: u8,
    pub confidence: u8,
    pub overall: u8,
    pub tier: Tier,
    pub primary_strength: Dimension,
    pub primary_weakness: Dimension,
    pub weighted_strength: Dimension,
    pub weighted_weakness: Dimension,
}

impl FeedbackScores {
    /// Derive the aggregate fields from four dimension scores. Weights
    /// only influence the weighted strength/weakness picks.
    pub fn from_dimensions(
        clarity: u8,
        pacing: u8,
        tone: u8,
        confidence: u8,
        weights: &ScoreWeights,
    ) -> Self {
        let overall =
            ((clarity as u16 + pacing as u16 + tone as u16 + confidence as u16) / 4) as u8;
        let raw = [
            clarity as f64,
            pacing as f64,
            tone as f64,
            confidence as f64,
        ];
        let weighted = [
            clarity as f64 * weights.clarity,
            pacing as f64 * weights.pacing,
            tone as f64 * weights.tone,
            confidence as f64 * weights.confidence,
        ];
        Self {
            clarity,
            pacing,
            tone,
            confidence,
            overall,
            tier: Tier::from_overall(overall),
            primary_strength: arg_best(&raw),
            primary_weakness: arg_worst(&raw),
            weighted_strength: arg_best(&weighted),
            weighted_weakness: arg_worst(&weighted),
        }
    }

    pub fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Clarity => self.clarity,
            Dimension::Pacing => self.pacing,
            Dimension::Tone => self.tone,
            Dimension::Confidence => self.confidence,
        }
    }
}

/// Highest value wins; earlier dimension wins ties.
fn arg_best(values: &[f64; 4]) -> Dimension {
    let mut best = 0;
    for idx in 1..values.len() {
        if values[idx] > values[best] {
            best = idx;
        }
    }
    Dimension::ALL[best]
}

/// Lowest value wins; earlier dimension wins ties.
fn arg_worst(values: &[f64; 4]) -> Dimension {
    let mut worst = 0;
    for idx in 1..values.len() {
        if values[idx] < values[worst] {
            worst = idx;
        }
    }
    Dimension::ALL[worst]
}

/// Difference between two sessions (current minus previous), for trend
/// display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDelta {
    pub clarity: i16,
    pub pacing: i16,
    pub tone: i16,
    pub confidence: i16,
    pub overall: i16,
}

impl ScoreDelta {
    pub fn between(current: &FeedbackScores, previous: &FeedbackScores) -> Self {
        Self {
            clarity: current.clarity as i16 - previous.clarity as i16,
            pacing: current.pacing as i16 - previous.pacing as i16,
            tone: current.tone as i16 - previous.tone as i16,
            confidence: current.confidence as i16 - previous.confidence as i16,
            overall: current.overall as i16 - previous.overall as i16,
        }
    }
}
