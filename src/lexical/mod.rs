//! Lexical pattern extraction over a lowercase transcript.
//!
//! Counting is deliberately plain substring containment: phrases match
//! anywhere in the text, case-insensitively, with no word boundaries, and
//! occurrences of one phrase never overlap each other. Downstream scores
//! depend on these exact counts, so the matching rule must not change.

use crate::types::TranscriptionResult;

pub const FILLER_PHRASES: &[&str] = &[
    "um", "uh", "like", "you know", "sort of", "kind of", "basically", "actually", "literally",
    "i mean",
];

pub const HEDGING_PHRASES: &[&str] = &[
    "i think",
    "i guess",
    "i suppose",
    "maybe",
    "perhaps",
    "possibly",
    "probably",
    "it seems",
    "i feel like",
    "i'm not sure",
];

pub const QUESTION_WORDS: &[&str] = &["what", "when", "where", "which", "who", "why", "how"];

pub const WEAK_OPENERS: &[&str] = &[
    "i just",
    "i was just",
    "so basically",
    "i only wanted",
    "if it's okay",
    "i guess i",
];

pub const APOLOGETIC_PHRASES: &[&str] = &[
    "sorry",
    "i apologize",
    "excuse me",
    "forgive me",
    "my bad",
    "i hate to ask",
];

pub const ASSERTIVE_PHRASES: &[&str] = &[
    "i will",
    "i can",
    "i know",
    "i believe",
    "definitely",
    "absolutely",
    "certainly",
    "without a doubt",
    "i'm confident",
    "we will",
];

pub const INCOMPLETE_ENDINGS: &[&str] = &[
    "and um",
    "but uh",
    "so yeah",
    "or whatever",
    "and stuff",
    "you know what i mean",
];

pub const POSITIVE_WORDS: &[&str] = &[
    "great",
    "good",
    "excellent",
    "happy",
    "glad",
    "wonderful",
    "appreciate",
    "thank",
    "love",
    "excited",
    "confident",
    "pleased",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "angry",
    "upset",
    "frustrated",
    "annoyed",
    "worried",
    "afraid",
    "problem",
    "difficult",
];

pub const CONTRACTIONS: &[&str] = &[
    "i'm", "it's", "don't", "can't", "won't", "we're", "you're", "that's", "i've", "i'll", "isn't",
    "didn't", "couldn't", "wouldn't", "let's",
];

pub const FORMAL_PHRASES: &[&str] = &[
    "therefore",
    "furthermore",
    "moreover",
    "consequently",
    "in conclusion",
    "with respect to",
    "in regard to",
    "pursuant",
    "notwithstanding",
];

/// Raw lexical measurements for one transcript. All counts are zero when
/// the transcript is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PatternCounts {
    pub filler: u32,
    pub hedging: u32,
    pub question_words: u32,
    pub weak_openers: u32,
    pub apologetic: u32,
    pub assertive: u32,
    pub incomplete: u32,
    pub positive: u32,
    pub negative: u32,
    pub contractions: u32,
    pub formal: u32,
    pub word_count: u32,
    pub repeated_words: u32,
    pub average_word_length: f64,
}

impl PatternCounts {
    pub fn from_transcript(transcript: Option<&TranscriptionResult>) -> Self {
        match transcript {
            Some(result) => Self::from_text(&result.text),
            None => Self::default(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        let lowercase = text.to_lowercase();
        let words: Vec<&str> = lowercase.split(' ').filter(|word| !word.is_empty()).collect();
        let word_count = words.len() as u32;
        let repeated_words = words.windows(2).filter(|pair| pair[0] == pair[1]).count() as u32;
        let average_word_length = if words.is_empty() {
            0.0
        } else {
            words.iter().map(|word| word.chars().count()).sum::<usize>() as f64
                / words.len() as f64
        };

        Self {
            filler: category_count(&lowercase, FILLER_PHRASES),
            hedging: category_count(&lowercase, HEDGING_PHRASES),
            question_words: category_count(&lowercase, QUESTION_WORDS),
            weak_openers: category_count(&lowercase, WEAK_OPENERS),
            apologetic: category_count(&lowercase, APOLOGETIC_PHRASES),
            assertive: category_count(&lowercase, ASSERTIVE_PHRASES),
            incomplete: category_count(&lowercase, INCOMPLETE_ENDINGS),
            positive: category_count(&lowercase, POSITIVE_WORDS),
            negative: category_count(&lowercase, NEGATIVE_WORDS),
            contractions: category_count(&lowercase, CONTRACTIONS),
            formal: category_count(&lowercase, FORMAL_PHRASES),
            word_count,
            repeated_words,
            average_word_length,
        }
    }

    /// `(positive - negative) / (positive + negative)` in [-1, 1];
    /// 0 when neither polarity appears.
    pub fn sentiment_score(&self) -> f64 {
        let total = self.positive + self.negative;
        if total == 0 {
            return 0.0;
        }
        (self.positive as f64 - self.negative as f64) / total as f64
    }
}

/// Sum of non-overlapping occurrences of every phrase in the category.
fn category_count(text: &str, phrases: &[&str]) -> u32 {
    phrases
        .iter()
        .map(|phrase| text.matches(phrase).count() as u32)
        .sum()
}
