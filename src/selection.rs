//! Sentiment-to-response selection
//!
//! The one decision procedure of the service: given the raw input text plus
//! the classifier's label and confidence, pick one of the fixed response
//! templates and tag it General or Supportive. Everything around this module
//! (classification, generation, speech) is an external collaborator.

use crate::core::constants::{label, response_type};

/// Confidence required before the sentiment label is trusted. The comparison
/// is strictly greater-than: a score of exactly 0.7 is not confident.
pub const CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Crisis vocabulary checked on NEGATIVE input. Matching is case-insensitive
/// and substring-based, so "suicidenote" matches while "untrustworthy" does
/// not. The list and the threshold above are safety decisions carried over
/// from the product as-is; do not reword or tune them.
pub const CRISIS_KEYWORDS: [&str; 2] = ["suicide", "worthless"];

/// Fixed response templates. Wording is part of the safety surface and is
/// preserved verbatim, typographic apostrophes included.
pub mod template {
    /// Returned when the input is empty or whitespace.
    pub const ASK_FOR_INPUT: &str = "Please provide some input about how you're feeling.";

    /// Returned when the classifier is not confident enough to branch.
    pub const ASK_TO_ELABORATE: &str =
        "I'm not quite sure I understand. Could you elaborate a bit more? I'm here to listen.";

    /// Confident POSITIVE input.
    pub const POSITIVE: &str = "I'm glad you're feeling positive! Tell me more about what’s \
         bringing you joy, and let’s keep this energy up together.";

    /// Confident NEGATIVE input containing crisis vocabulary.
    pub const CRISIS_SUPPORT: &str =
        "I'm really sorry you're feeling this way, but please know you're not alone. It's \
         really important to talk to someone who can provide support. Would you like to share \
         more about what's been making you feel this way? You matter, and it's okay to reach \
         out for help.";

    /// Confident NEGATIVE input without crisis vocabulary.
    pub const TOUGH_TIME: &str = "It sounds like you're going through a tough time. Want to \
         share more about what’s on your mind? I'm here to help you navigate through it.";

    /// Confident NEUTRAL (or unrecognized) input.
    pub const NEUTRAL_PROMPT: &str = "You seem to be feeling neutral. Do you have anything \
         specific on your mind that you'd like to talk about?";
}

/// Categorical sentiment produced by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Parse a wire label, case-insensitively.
    ///
    /// Unrecognized labels collapse to `Neutral`: the selection rules treat
    /// every label other than POSITIVE and NEGATIVE identically, so the
    /// collapse does not change behavior.
    pub fn parse(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            label::POSITIVE => SentimentLabel::Positive,
            label::NEGATIVE => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => label::POSITIVE,
            SentimentLabel::Negative => label::NEGATIVE,
            SentimentLabel::Neutral => label::NEUTRAL,
        }
    }
}

/// Classifier output for one input: the chosen label and the classifier's
/// self-reported probability for it, in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub confidence: f32,
}

/// Coarse tag indicating whether crisis-support wording was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    General,
    Supportive,
}

impl ResponseType {
    /// Display label shown in the UI and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::General => response_type::GENERAL,
            ResponseType::Supportive => response_type::SUPPORTIVE,
        }
    }
}

/// The selector's verdict: a template to respond with and its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub template: &'static str,
    pub response_type: ResponseType,
}

/// Select a response template for the given input and sentiment.
///
/// Rules, applied in order:
///
/// 1. Empty (after trimming) input asks for some input, type General.
/// 2. Confidence at or below [`CONFIDENCE_THRESHOLD`] asks the user to
///    elaborate, type General.
/// 3. POSITIVE gets the encouraging template; NEGATIVE gets the
///    crisis-support template (type Supportive) when the input contains any
///    of [`CRISIS_KEYWORDS`], otherwise the tough-time template; everything
///    else gets the neutral prompt.
///
/// Only rule 3's NEGATIVE branch ever yields `Supportive`.
pub fn select(input_text: &str, label: SentimentLabel, confidence: f32) -> Selection {
    if input_text.trim().is_empty() {
        return Selection {
            template: template::ASK_FOR_INPUT,
            response_type: ResponseType::General,
        };
    }

    if confidence <= CONFIDENCE_THRESHOLD {
        return Selection {
            template: template::ASK_TO_ELABORATE,
            response_type: ResponseType::General,
        };
    }

    match label {
        SentimentLabel::Positive => Selection {
            template: template::POSITIVE,
            response_type: ResponseType::General,
        },
        SentimentLabel::Negative => {
            if mentions_crisis(input_text) {
                Selection {
                    template: template::CRISIS_SUPPORT,
                    response_type: ResponseType::Supportive,
                }
            } else {
                Selection {
                    template: template::TOUGH_TIME,
                    response_type: ResponseType::General,
                }
            }
        }
        SentimentLabel::Neutral => Selection {
            template: template::NEUTRAL_PROMPT,
            response_type: ResponseType::General,
        },
    }
}

/// Case-insensitive substring scan for crisis vocabulary.
fn mentions_crisis(input_text: &str) -> bool {
    let lowered = input_text.to_lowercase();
    CRISIS_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Display prefix reporting what the classifier saw, prepended to every
/// generated response. Format carried over from the original UI.
pub fn sentiment_feedback(sentiment: &SentimentResult) -> String {
    format!(
        "Your input sentiment is detected as **{}** with confidence {:.2}.\n\n",
        sentiment.label.as_str(),
        sentiment.confidence
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_returns_prompt_for_any_sentiment() {
        for label in [
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
        ] {
            for confidence in [0.0, 0.5, 0.99] {
                let selection = select("", label, confidence);
                assert_eq!(selection.template, template::ASK_FOR_INPUT);
                assert_eq!(selection.response_type, ResponseType::General);
            }
        }
    }

    #[test]
    fn whitespace_input_counts_as_empty() {
        let selection = select("  \n\t  ", SentimentLabel::Negative, 0.95);
        assert_eq!(selection.template, template::ASK_FOR_INPUT);
        assert_eq!(selection.response_type, ResponseType::General);
    }

    #[test]
    fn confident_positive_gets_encouragement() {
        let selection = select("I feel great", SentimentLabel::Positive, 0.9);
        assert_eq!(selection.template, template::POSITIVE);
        assert_eq!(selection.response_type, ResponseType::General);
    }

    #[test]
    fn crisis_keyword_triggers_supportive_response() {
        let selection = select("I feel worthless", SentimentLabel::Negative, 0.95);
        assert_eq!(selection.template, template::CRISIS_SUPPORT);
        assert_eq!(selection.response_type, ResponseType::Supportive);
    }

    #[test]
    fn negative_without_crisis_keywords_gets_tough_time() {
        let selection = select("I feel sad", SentimentLabel::Negative, 0.95);
        assert_eq!(selection.template, template::TOUGH_TIME);
        assert_eq!(selection.response_type, ResponseType::General);
    }

    #[test]
    fn neutral_gets_neutral_prompt() {
        let selection = select("meh", SentimentLabel::Neutral, 0.95);
        assert_eq!(selection.template, template::NEUTRAL_PROMPT);
        assert_eq!(selection.response_type, ResponseType::General);
    }

    #[test]
    fn exactly_at_threshold_is_not_confident() {
        let selection = select("anything", SentimentLabel::Positive, 0.70);
        assert_eq!(selection.template, template::ASK_TO_ELABORATE);
        assert_eq!(selection.response_type, ResponseType::General);
    }

    #[test]
    fn just_above_threshold_is_confident() {
        let selection = select("anything", SentimentLabel::Positive, 0.71);
        assert_eq!(selection.template, template::POSITIVE);
        assert_eq!(selection.response_type, ResponseType::General);
    }

    #[test]
    fn low_confidence_wins_over_crisis_keywords() {
        // Rule order: the elaboration prompt applies before the label branch
        // is ever consulted.
        let selection = select("I feel worthless", SentimentLabel::Negative, 0.3);
        assert_eq!(selection.template, template::ASK_TO_ELABORATE);
        assert_eq!(selection.response_type, ResponseType::General);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let selection = select("SUICIDE risk", SentimentLabel::Negative, 0.95);
        assert_eq!(selection.template, template::CRISIS_SUPPORT);
        assert_eq!(selection.response_type, ResponseType::Supportive);
    }

    #[test]
    fn keyword_match_is_substring_based() {
        let selection = select("found a suicidenote", SentimentLabel::Negative, 0.95);
        assert_eq!(selection.response_type, ResponseType::Supportive);

        // "untrustworthy" contains "worth" but not "worthless".
        let selection = select("untrustworthy people", SentimentLabel::Negative, 0.95);
        assert_eq!(selection.template, template::TOUGH_TIME);
        assert_eq!(selection.response_type, ResponseType::General);
    }

    #[test]
    fn crisis_keywords_only_apply_to_negative_input() {
        let selection = select("worthless but somehow happy", SentimentLabel::Positive, 0.9);
        assert_eq!(selection.template, template::POSITIVE);
        assert_eq!(selection.response_type, ResponseType::General);
    }

    #[test]
    fn unknown_labels_fall_back_to_neutral() {
        assert_eq!(SentimentLabel::parse("POSITIVE"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::parse("negative"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::parse("Neutral"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::parse("LABEL_2"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::parse(""), SentimentLabel::Neutral);
    }

    #[test]
    fn feedback_prefix_reports_label_and_confidence() {
        let sentiment = SentimentResult {
            label: SentimentLabel::Positive,
            confidence: 0.9321,
        };
        assert_eq!(
            sentiment_feedback(&sentiment),
            "Your input sentiment is detected as **POSITIVE** with confidence 0.93.\n\n"
        );
    }
}
