//! Browser-facing API data models
//!
//! Request and response structures for the respond endpoint the embedded web
//! form posts to.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/respond`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondRequest {
    pub text: String,
}

/// What the classifier saw, echoed back for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentReport {
    pub label: String,
    pub confidence: f32,
}

/// Audio handed to the browser: either a self-contained `data:` URI or the
/// path of a stored clip served under `/audio/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioPayload {
    pub kind: String,
    pub src: String,
}

/// Successful respond payload.
///
/// `sentiment` is absent when the input was empty (nothing was classified);
/// `audio` is absent when speech is disabled or skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondResponse {
    pub response_type: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioPayload>,
}
