//! Hosted inference API backend implementation
//!
//! One HTTP backend serves all three tasks. Each task posts to
//! `{base_url}/{model_id}` with a bearer token; sentiment and generation
//! return JSON, speech synthesis returns raw audio bytes.

use crate::audio::AudioClip;
use crate::core::constants::audio;
use crate::core::provider::{
    InferenceError, ResponseGenerator, SentimentClassifier, SpeechSynthesizer,
};
use crate::models::inference::{
    GeneratedText, InferenceErrorBody, InferenceRequest, SentimentResponse,
};
use crate::selection::{SentimentLabel, SentimentResult};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Backend for the hosted model-inference HTTP API
pub struct HostedInference {
    client: Client,
    api_token: String,
    base_url: String,
    sentiment_model: String,
    generation_model: String,
    speech_model: String,
}

impl HostedInference {
    /// Create a new hosted inference backend
    ///
    /// # Arguments
    ///
    /// * `api_token` - API token for bearer authentication
    /// * `base_url` - Inference API base URL
    /// * `sentiment_model` - Model id for sentiment analysis
    /// * `generation_model` - Model id for response generation
    /// * `speech_model` - Model id for speech synthesis
    /// * `timeout` - Request timeout in seconds
    pub fn new(
        api_token: String,
        base_url: String,
        sentiment_model: String,
        generation_model: String,
        speech_model: String,
        timeout: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_token,
            base_url,
            sentiment_model,
            generation_model,
            speech_model,
        }
    }

    fn model_url(&self, model_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), model_id)
    }

    /// Classify hosted API errors and provide helpful messages
    fn classify_error(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if (error_lower.contains("invalid") && error_lower.contains("token"))
            || error_lower.contains("unauthorized")
        {
            return "Invalid API token. Please check your HF_API_TOKEN configuration.".to_string();
        }

        if error_lower.contains("rate limit") || error_lower.contains("quota") {
            return "Rate limit exceeded. Please wait and try again, or upgrade your API plan."
                .to_string();
        }

        if error_lower.contains("model")
            && (error_lower.contains("not found") || error_lower.contains("does not exist"))
        {
            return "Model not found. Please check your model configuration.".to_string();
        }

        error_detail.to_string()
    }

    /// Map a non-success status and its body to a typed error
    fn error_from_status(status: reqwest::StatusCode, body: &str) -> InferenceError {
        let parsed: Option<InferenceErrorBody> = serde_json::from_str(body).ok();
        let detail = parsed.as_ref().map(|b| b.error.clone()).unwrap_or_else(|| {
            if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        });
        let classified = Self::classify_error(&detail);

        match status.as_u16() {
            401 => InferenceError::Authentication(classified),
            429 => InferenceError::RateLimit(classified),
            400 => InferenceError::BadRequest(classified),
            // A warm-up 503 carries an estimated_time in its body. A 503
            // without one is an ordinary outage, not a loading model.
            503 => match parsed.and_then(|b| b.estimated_time) {
                Some(wait) => InferenceError::ModelLoading(format!(
                    "{classified} Estimated wait: {wait:.0}s."
                )),
                None => InferenceError::Api {
                    status: 503,
                    message: classified,
                },
            },
            _ => InferenceError::Api {
                status: status.as_u16(),
                message: classified,
            },
        }
    }

    /// Internal method to post a request to one model endpoint
    async fn post_model(
        &self,
        model_id: &str,
        request: &InferenceRequest<'_>,
    ) -> Result<reqwest::Response, InferenceError> {
        let url = self.model_url(model_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(request)
            .send()
            .await
            .map_err(|e| InferenceError::Unexpected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Self::error_from_status(status, &error_text));
        }

        Ok(response)
    }
}

#[async_trait]
impl SentimentClassifier for HostedInference {
    async fn classify(&self, text: &str) -> Result<SentimentResult, InferenceError> {
        let request = InferenceRequest::text(text);
        let response = self.post_model(&self.sentiment_model, &request).await?;

        let parsed: SentimentResponse = response.json().await.map_err(|e| {
            InferenceError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        let top = parsed.top().ok_or_else(|| {
            InferenceError::MalformedResponse("Classifier returned no candidates".to_string())
        })?;

        Ok(SentimentResult {
            label: SentimentLabel::parse(&top.label),
            confidence: top.score,
        })
    }

    fn name(&self) -> &str {
        "Hosted Inference API"
    }
}

#[async_trait]
impl ResponseGenerator for HostedInference {
    async fn expand(&self, prompt: &str) -> Result<String, InferenceError> {
        let request = InferenceRequest::generation(prompt);
        let response = self.post_model(&self.generation_model, &request).await?;

        let outputs: Vec<GeneratedText> = response.json().await.map_err(|e| {
            InferenceError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        let first = outputs.into_iter().next().ok_or_else(|| {
            InferenceError::MalformedResponse("Generator returned no candidates".to_string())
        })?;

        Ok(first.generated_text)
    }

    fn name(&self) -> &str {
        "Hosted Inference API"
    }
}

#[async_trait]
impl SpeechSynthesizer for HostedInference {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, InferenceError> {
        let request = InferenceRequest::text(text);
        let response = self.post_model(&self.speech_model, &request).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(audio::MPEG)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| InferenceError::Unexpected(e.to_string()))?;

        if bytes.is_empty() {
            return Err(InferenceError::MalformedResponse(
                "Speech backend returned an empty audio payload".to_string(),
            ));
        }

        Ok(AudioClip {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    fn name(&self) -> &str {
        "Hosted Inference API"
    }
}
