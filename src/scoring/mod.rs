pub mod aggregate;
pub mod analysis;
pub mod profile;

pub use aggregate::{Dimension, FeedbackScores, ScoreDelta, Tier};
pub use analysis::{
    ClarityAnalysis, ConfidenceAnalysis, PacingAnalysis, SessionAnalyses, ToneAnalysis,
};
pub use profile::{build_profile, ScoreWeights, ScoringProfile};
