//! Backend abstraction layer for the inference tasks
//!
//! This module defines one trait per inference task (sentiment analysis,
//! response generation, speech synthesis) so each collaborator can be
//! swapped independently, plus the shared error type for backend calls.

use async_trait::async_trait;
use thiserror::Error;

use crate::audio::AudioClip;
use crate::selection::SentimentResult;

/// Error types for inference backend operations
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Model is loading: {0}")]
    ModelLoading(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Classifies free text into a sentiment label with a confidence score.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Analyze `text` and return its dominant sentiment.
    async fn classify(&self, text: &str) -> Result<SentimentResult, InferenceError>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Expands a response template into a longer conversational reply.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Continue `prompt` with generated text. The returned string includes
    /// the prompt itself.
    async fn expand(&self, prompt: &str) -> Result<String, InferenceError>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Turns reply text into spoken audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` into an audio clip.
    async fn synthesize(&self, text: &str) -> Result<AudioClip, InferenceError>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Supported backend kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    /// Remote hosted inference API
    Hosted,
    /// Offline word-list classifier, no network calls
    Lexicon,
}

impl BackendKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hosted" => Some(BackendKind::Hosted),
            "lexicon" | "local" => Some(BackendKind::Lexicon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BackendKind::Hosted => "hosted",
            BackendKind::Lexicon => "lexicon",
        }
    }
}
