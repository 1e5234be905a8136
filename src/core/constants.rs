//! Constants for sentiment labels and response types
//!
//! This module defines string constants used throughout the application for
//! classifier labels, response type tags, audio payload kinds, and
//! user-facing fallback messages.
//! Following JPL Rule 1: All identifiers use clear, descriptive names.

/// Sentiment label constants, as emitted by the classifier
pub mod label {
    /// Positive sentiment label
    pub const POSITIVE: &str = "POSITIVE";

    /// Negative sentiment label
    pub const NEGATIVE: &str = "NEGATIVE";

    /// Neutral sentiment label
    pub const NEUTRAL: &str = "NEUTRAL";
}

/// Response type tags shown alongside every reply
pub mod response_type {
    /// Ordinary conversational reply
    pub const GENERAL: &str = "General Response";

    /// Crisis-support reply
    pub const SUPPORTIVE: &str = "Supportive Response";

    /// Reply produced when a backend call failed
    pub const ERROR: &str = "Error Response";
}

/// Audio payload constants
pub mod audio {
    /// Default clip content type
    pub const MPEG: &str = "audio/mpeg";

    /// Payload kind for clips inlined as a base64 data URI
    pub const KIND_DATA_URI: &str = "data_uri";

    /// Payload kind for clips served from the audio directory
    pub const KIND_FILE: &str = "file";
}

/// User-facing fallback messages for failed backend calls
pub mod fallback {
    /// Shown when sentiment analysis fails
    pub const ANALYZE: &str = "Sorry, I could not analyze that just now. Please try again.";

    /// Shown when response generation or speech synthesis fails
    pub const RESPOND: &str =
        "Sorry, something went wrong while preparing a response. Please try again.";
}
