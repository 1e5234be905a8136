//! Offline lexicon backend implementation
//!
//! A word-list sentiment scorer and a passthrough generator for running the
//! service without network access or an API token. Speech synthesis has no
//! offline counterpart, so this backend provides none.

use crate::core::provider::{InferenceError, ResponseGenerator, SentimentClassifier};
use crate::selection::{SentimentLabel, SentimentResult};
use async_trait::async_trait;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "happy", "glad", "joy", "joyful", "excited", "hopeful", "calm", "relaxed",
    "grateful", "thankful", "proud", "love", "loved", "better", "wonderful", "amazing",
    "fantastic", "optimistic", "confident", "peaceful", "content", "cheerful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "sad", "unhappy", "angry", "anxious", "anxiety", "worried", "stressed", "stress",
    "depressed", "depression", "lonely", "alone", "tired", "exhausted", "hopeless", "worthless",
    "suicide", "suicidal", "afraid", "scared", "miserable", "hurt", "crying", "overwhelmed",
    "awful", "terrible", "hate", "empty",
];

/// Word-list sentiment classifier, no network calls
#[derive(Debug, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Score text by counting sentiment words.
    ///
    /// Confidence reflects how one-sided the counts are: all-positive or
    /// all-negative text scores 1.0, a balanced or empty text scores a
    /// neutral 0.5.
    fn score(text: &str) -> SentimentResult {
        let lowered = text.to_lowercase();
        let mut positive = 0usize;
        let mut negative = 0usize;

        for word in lowered.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            if POSITIVE_WORDS.contains(&word) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word) {
                negative += 1;
            }
        }

        if positive == negative {
            return SentimentResult {
                label: SentimentLabel::Neutral,
                confidence: 0.5,
            };
        }

        let total = (positive + negative) as f32;
        let margin = positive.abs_diff(negative) as f32;
        let label = if positive > negative {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };

        SentimentResult {
            label,
            confidence: 0.5 + 0.5 * (margin / total),
        }
    }
}

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentResult, InferenceError> {
        Ok(Self::score(text))
    }

    fn name(&self) -> &str {
        "Lexicon"
    }
}

/// Generator that returns its prompt unchanged
#[derive(Debug, Default)]
pub struct PassthroughGenerator;

impl PassthroughGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResponseGenerator for PassthroughGenerator {
    async fn expand(&self, prompt: &str) -> Result<String, InferenceError> {
        Ok(prompt.to_string())
    }

    fn name(&self) -> &str {
        "Passthrough"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_words_score_positive() {
        let result = LexiconClassifier::score("I feel great and hopeful today");
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!((result.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn negative_words_score_negative() {
        let result = LexiconClassifier::score("I am sad and exhausted");
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!((result.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn text_without_sentiment_words_scores_neutral() {
        let result = LexiconClassifier::score("the meeting is at noon");
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert!((result.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn balanced_text_scores_neutral() {
        let result = LexiconClassifier::score("happy but also sad");
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert!((result.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn margin_drives_confidence() {
        let result = LexiconClassifier::score("happy happy but tired");
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!((result.confidence - (0.5 + 0.5 / 3.0)).abs() < 1e-6);
    }

    #[test]
    fn punctuation_does_not_hide_words() {
        let result = LexiconClassifier::score("I'm worthless.");
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn classifier_trait_reports_lexicon_scores() {
        let classifier = LexiconClassifier::new();
        let result = classifier.classify("feeling grateful").await.unwrap();
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[tokio::test]
    async fn passthrough_returns_prompt_unchanged() {
        let generator = PassthroughGenerator::new();
        let expanded = generator.expand("You seem fine.").await.unwrap();
        assert_eq!(expanded, "You seem fine.");
    }
}
