//! Hosted inference API data models
//!
//! Request and response structures for the model-inference HTTP API
//! (`POST {base_url}/{model_id}` with a JSON body). The same request shape
//! serves all three tasks; responses differ per task.

use serde::{Deserialize, Serialize};

/// Request body accepted by every hosted model endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<GenerationParameters>,
}

impl<'a> InferenceRequest<'a> {
    /// Plain text-in request (sentiment analysis, speech synthesis).
    pub fn text(inputs: &'a str) -> Self {
        Self {
            inputs,
            parameters: None,
        }
    }

    /// Text-generation request with the fixed pipeline parameters.
    pub fn generation(inputs: &'a str) -> Self {
        Self {
            inputs,
            parameters: Some(GenerationParameters::default()),
        }
    }
}

/// Text-generation pipeline parameters. The values match the original
/// pipeline call and are not configurable.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub max_length: u32,
    pub num_return_sequences: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_length: 100,
            num_return_sequences: 1,
        }
    }
}

/// One classifier candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Sentiment response body. The hosted API wraps the candidate list in an
/// outer one-element array; older deployments return the list bare. Both
/// shapes are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SentimentResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl SentimentResponse {
    /// The highest-scoring candidate, if any.
    pub fn top(&self) -> Option<&LabelScore> {
        let scores = match self {
            SentimentResponse::Nested(groups) => groups.first()?,
            SentimentResponse::Flat(scores) => scores,
        };
        scores.iter().max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// One text-generation candidate. `generated_text` includes the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// Error body returned by the hosted API. `estimated_time` is present on the
/// 503 a model returns while it is being loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceErrorBody {
    pub error: String,
    #[serde(default)]
    pub estimated_time: Option<f32>,
}
