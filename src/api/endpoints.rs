//! API endpoint handlers
//!
//! This module implements the HTTP endpoints for the wellness companion:
//! the embedded web UI, the respond flow, stored-clip serving, and health
//! checks.

use crate::api::ui;
use crate::audio::{self, AudioClip, DeliveryMode};
use crate::core::config::Config;
use crate::core::constants;
use crate::core::constants::{fallback, response_type};
use crate::core::provider::{
    InferenceError, ResponseGenerator, SentimentClassifier, SpeechSynthesizer,
};
use crate::models::api::{AudioPayload, RespondRequest, RespondResponse, SentimentReport};
use crate::selection::{self, SentimentLabel};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub classifier: Arc<dyn SentimentClassifier>,
    pub generator: Arc<dyn ResponseGenerator>,
    /// Absent when speech is disabled or the backend has no synthesizer
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/respond", post(respond))
        .route("/audio/{name}", get(fetch_audio))
        .route("/health", get(health_check))
        .route("/test-connection", get(test_connection))
        .with_state(state)
}

/// Which stage of the respond flow failed
#[derive(Debug)]
enum RespondFailure {
    Analyze(InferenceError),
    Generate(InferenceError),
    Synthesize(InferenceError),
}

impl RespondFailure {
    fn stage(&self) -> &'static str {
        match self {
            RespondFailure::Analyze(_) => "analyze",
            RespondFailure::Generate(_) => "generate",
            RespondFailure::Synthesize(_) => "synthesize",
        }
    }

    /// User-facing message. Upstream detail stays in the server log.
    fn user_message(&self) -> &'static str {
        match self {
            RespondFailure::Analyze(_) => fallback::ANALYZE,
            RespondFailure::Generate(_) | RespondFailure::Synthesize(_) => fallback::RESPOND,
        }
    }

    fn detail(&self) -> &InferenceError {
        match self {
            RespondFailure::Analyze(e)
            | RespondFailure::Generate(e)
            | RespondFailure::Synthesize(e) => e,
        }
    }
}

/// Run the full respond flow: classify, select, expand, synthesize.
///
/// Kept free of axum types so it can be exercised directly with doubles for
/// the three collaborator ports.
async fn assemble_response(
    classifier: &dyn SentimentClassifier,
    generator: &dyn ResponseGenerator,
    synthesizer: Option<&dyn SpeechSynthesizer>,
    config: &Config,
    text: &str,
) -> Result<RespondResponse, RespondFailure> {
    // Empty input gets the prompt template directly, without touching any
    // backend. The label and confidence passed here are irrelevant: the
    // selector's empty-input rule fires first.
    if text.trim().is_empty() {
        let selection = selection::select(text, SentimentLabel::Neutral, 0.0);
        return Ok(RespondResponse {
            response_type: selection.response_type.as_str().to_string(),
            text: selection.template.to_string(),
            sentiment: None,
            audio: None,
        });
    }

    let sentiment = classifier
        .classify(text)
        .await
        .map_err(RespondFailure::Analyze)?;

    let feedback = selection::sentiment_feedback(&sentiment);
    let selection = selection::select(text, sentiment.label, sentiment.confidence);

    let expanded = generator
        .expand(selection.template)
        .await
        .map_err(RespondFailure::Generate)?;
    let full_text = format!("{feedback}{expanded}");

    let audio_payload = match synthesizer {
        Some(synth) => {
            let clip = synth
                .synthesize(&full_text)
                .await
                .map_err(RespondFailure::Synthesize)?;
            match deliver_clip(config, clip).await {
                Ok(payload) => Some(payload),
                Err(e) => {
                    return Err(RespondFailure::Synthesize(InferenceError::Unexpected(
                        e.to_string(),
                    )));
                }
            }
        }
        None => None,
    };

    Ok(RespondResponse {
        response_type: selection.response_type.as_str().to_string(),
        text: full_text,
        sentiment: Some(SentimentReport {
            label: sentiment.label.as_str().to_string(),
            confidence: sentiment.confidence,
        }),
        audio: audio_payload,
    })
}

/// Package a clip per the configured delivery mode
///
/// File delivery does blocking filesystem writes, so it runs on the
/// blocking thread pool rather than the request task.
async fn deliver_clip(config: &Config, clip: AudioClip) -> anyhow::Result<AudioPayload> {
    match config.delivery {
        DeliveryMode::DataUri => Ok(AudioPayload {
            kind: constants::audio::KIND_DATA_URI.to_string(),
            src: clip.to_data_uri(),
        }),
        DeliveryMode::File => {
            let dir = config.audio_dir.clone();
            let name = tokio::task::spawn_blocking(move || audio::store_clip(&dir, &clip))
                .await
                .map_err(|e| anyhow::anyhow!("Audio store task failed: {e}"))??;
            Ok(AudioPayload {
                kind: constants::audio::KIND_FILE.to_string(),
                src: format!("/audio/{name}"),
            })
        }
    }
}

/// POST /api/respond - Analyze input and build a reply
async fn respond(State(state): State<AppState>, Json(request): Json<RespondRequest>) -> Response {
    let request_id = uuid::Uuid::new_v4();

    info!(
        "📥 Respond request {}: {} chars of input",
        request_id,
        request.text.len()
    );

    let result = assemble_response(
        state.classifier.as_ref(),
        state.generator.as_ref(),
        state.synthesizer.as_deref(),
        &state.config,
        &request.text,
    )
    .await;

    match result {
        Ok(response) => {
            info!(
                "✅ Respond request {} completed: {}",
                request_id, response.response_type
            );
            Json(response).into_response()
        }
        Err(failure) => {
            error!(
                "Respond request {} failed at {} stage: {}",
                request_id,
                failure.stage(),
                failure.detail()
            );
            let error_response = json!({
                "response_type": response_type::ERROR,
                "error": {
                    "type": failure.stage(),
                    "message": failure.user_message(),
                }
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)).into_response()
        }
    }
}

/// GET /audio/{name} - Serve a stored clip
async fn fetch_audio(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    if !audio::is_safe_clip_name(&name) {
        warn!("Rejected audio clip name: {:?}", name);
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = state.config.audio_dir.join(&name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let content_type = audio::content_type_for(&name);
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// GET / - Embedded web UI
async fn index() -> Html<&'static str> {
    Html(ui::INDEX_HTML)
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(health_payload(&state))
}

/// Health payload: the backends in use and the speech settings in effect
fn health_payload(state: &AppState) -> serde_json::Value {
    json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "backend": state.config.backend.as_str(),
        "classifier": state.classifier.name(),
        "generator": state.generator.name(),
        "synthesizer": state.synthesizer.as_deref().map(|s| s.name()),
        "speech_enabled": state.synthesizer.is_some(),
        "delivery": state.config.delivery.as_str(),
    })
}

/// GET /test-connection - Exercise the classifier backend once
async fn test_connection(State(state): State<AppState>) -> impl IntoResponse {
    match state.classifier.classify("Hello").await {
        Ok(result) => Json(json!({
            "status": "success",
            "message": format!(
                "Successfully reached the {} backend",
                state.classifier.name()
            ),
            "backend": state.classifier.name(),
            "label": result.label.as_str(),
            "confidence": result.confidence,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            error!("Backend connectivity test failed: {}", e);
            Json(json!({
                "status": "failed",
                "error_type": "API Error",
                "message": e.to_string(),
                "backend": state.classifier.name(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "suggestions": [
                    "Check your API token is valid",
                    "Verify the configured model ids exist",
                    "Check if you have reached rate limits",
                ],
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::BackendKind;
    use crate::selection::{SentimentResult, template};
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct FakeClassifier {
        label: SentimentLabel,
        confidence: f32,
        fail: bool,
    }

    #[async_trait]
    impl SentimentClassifier for FakeClassifier {
        async fn classify(&self, _text: &str) -> Result<SentimentResult, InferenceError> {
            if self.fail {
                return Err(InferenceError::Unexpected("classifier down".to_string()));
            }
            Ok(SentimentResult {
                label: self.label,
                confidence: self.confidence,
            })
        }

        fn name(&self) -> &str {
            "Fake Classifier"
        }
    }

    struct FakeGenerator {
        fail: bool,
    }

    #[async_trait]
    impl ResponseGenerator for FakeGenerator {
        async fn expand(&self, prompt: &str) -> Result<String, InferenceError> {
            if self.fail {
                return Err(InferenceError::Unexpected("generator down".to_string()));
            }
            Ok(format!("{prompt} [expanded]"))
        }

        fn name(&self) -> &str {
            "Fake Generator"
        }
    }

    struct FakeSynth {
        fail: bool,
    }

    #[async_trait]
    impl SpeechSynthesizer for FakeSynth {
        async fn synthesize(&self, _text: &str) -> Result<AudioClip, InferenceError> {
            if self.fail {
                return Err(InferenceError::Unexpected("synth down".to_string()));
            }
            Ok(AudioClip {
                bytes: vec![1, 2, 3],
                content_type: "audio/mpeg".to_string(),
            })
        }

        fn name(&self) -> &str {
            "Fake Synth"
        }
    }

    fn test_config() -> Config {
        Config {
            backend: BackendKind::Hosted,
            api_token: Some("hf_test".to_string()),
            inference_base_url: "https://example.test/models".to_string(),
            sentiment_model: "sentiment".to_string(),
            generation_model: "generation".to_string(),
            speech_model: "speech".to_string(),
            speech_enabled: true,
            delivery: DeliveryMode::DataUri,
            audio_dir: PathBuf::from("audio"),
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: "info".to_string(),
            request_timeout: 5,
        }
    }

    fn classifier(label: SentimentLabel, confidence: f32) -> FakeClassifier {
        FakeClassifier {
            label,
            confidence,
            fail: false,
        }
    }

    fn generator() -> FakeGenerator {
        FakeGenerator { fail: false }
    }

    #[tokio::test]
    async fn empty_input_prompts_without_calling_backends() {
        // Failing doubles prove the early return happens before any call.
        let config = test_config();
        let broken_classifier = FakeClassifier {
            label: SentimentLabel::Neutral,
            confidence: 0.0,
            fail: true,
        };
        let broken_generator = FakeGenerator { fail: true };

        let response =
            assemble_response(&broken_classifier, &broken_generator, None, &config, "   ")
                .await
                .unwrap();

        assert_eq!(response.text, template::ASK_FOR_INPUT);
        assert_eq!(response.response_type, "General Response");
        assert!(response.sentiment.is_none());
        assert!(response.audio.is_none());
    }

    #[tokio::test]
    async fn positive_flow_inlines_audio_as_data_uri() {
        let config = test_config();
        let synth = FakeSynth { fail: false };

        let response = assemble_response(
            &classifier(SentimentLabel::Positive, 0.9),
            &generator(),
            Some(&synth),
            &config,
            "I feel great",
        )
        .await
        .unwrap();

        assert!(
            response
                .text
                .starts_with("Your input sentiment is detected as **POSITIVE** with confidence 0.90.")
        );
        assert!(response.text.contains(template::POSITIVE));
        assert!(response.text.ends_with("[expanded]"));
        assert_eq!(response.response_type, "General Response");

        let sentiment = response.sentiment.unwrap();
        assert_eq!(sentiment.label, "POSITIVE");

        let audio = response.audio.unwrap();
        assert_eq!(audio.kind, "data_uri");
        assert!(audio.src.starts_with("data:audio/mpeg;base64,"));
    }

    #[tokio::test]
    async fn crisis_input_selects_supportive_reply() {
        let config = test_config();

        let response = assemble_response(
            &classifier(SentimentLabel::Negative, 0.95),
            &generator(),
            None,
            &config,
            "I feel worthless",
        )
        .await
        .unwrap();

        assert_eq!(response.response_type, "Supportive Response");
        assert!(response.text.contains(template::CRISIS_SUPPORT));
    }

    #[tokio::test]
    async fn low_confidence_asks_to_elaborate() {
        let config = test_config();

        let response = assemble_response(
            &classifier(SentimentLabel::Positive, 0.5),
            &generator(),
            None,
            &config,
            "hmm",
        )
        .await
        .unwrap();

        assert!(response.text.contains(template::ASK_TO_ELABORATE));
    }

    #[tokio::test]
    async fn classifier_failure_reports_analyze_stage() {
        let config = test_config();
        let broken = FakeClassifier {
            label: SentimentLabel::Neutral,
            confidence: 0.0,
            fail: true,
        };

        let failure = assemble_response(&broken, &generator(), None, &config, "hello")
            .await
            .unwrap_err();

        assert!(matches!(failure, RespondFailure::Analyze(_)));
        assert_eq!(failure.stage(), "analyze");
        assert_eq!(failure.user_message(), fallback::ANALYZE);
        assert!(format!("{failure:?}").contains("classifier down"));
    }

    #[tokio::test]
    async fn generator_failure_reports_generate_stage() {
        let config = test_config();
        let broken = FakeGenerator { fail: true };

        let failure = assemble_response(
            &classifier(SentimentLabel::Positive, 0.9),
            &broken,
            None,
            &config,
            "hello",
        )
        .await
        .unwrap_err();

        assert!(matches!(failure, RespondFailure::Generate(_)));
        assert_eq!(failure.user_message(), fallback::RESPOND);
    }

    #[tokio::test]
    async fn synthesizer_failure_reports_synthesize_stage() {
        let config = test_config();
        let broken = FakeSynth { fail: true };

        let failure = assemble_response(
            &classifier(SentimentLabel::Positive, 0.9),
            &generator(),
            Some(&broken),
            &config,
            "hello",
        )
        .await
        .unwrap_err();

        assert!(matches!(failure, RespondFailure::Synthesize(_)));
        assert_eq!(failure.user_message(), fallback::RESPOND);
    }

    #[tokio::test]
    async fn disabled_speech_omits_audio() {
        let config = test_config();

        let response = assemble_response(
            &classifier(SentimentLabel::Neutral, 0.95),
            &generator(),
            None,
            &config,
            "just checking in",
        )
        .await
        .unwrap();

        assert!(response.audio.is_none());
        assert!(response.sentiment.is_some());
        assert!(response.text.contains(template::NEUTRAL_PROMPT));
    }

    #[tokio::test]
    async fn file_delivery_stores_clip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        config.delivery = DeliveryMode::File;
        config.audio_dir = dir.path().to_path_buf();
        let synth = FakeSynth { fail: false };

        let response = assemble_response(
            &classifier(SentimentLabel::Positive, 0.9),
            &generator(),
            Some(&synth),
            &config,
            "I feel great",
        )
        .await
        .unwrap();

        let audio = response.audio.unwrap();
        assert_eq!(audio.kind, "file");
        let name = audio.src.strip_prefix("/audio/").unwrap();
        let stored = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(stored, vec![1, 2, 3]);
    }

    #[test]
    fn health_reports_every_backend_name() {
        let state = AppState {
            config: Arc::new(test_config()),
            classifier: Arc::new(classifier(SentimentLabel::Positive, 0.9)),
            generator: Arc::new(generator()),
            synthesizer: Some(Arc::new(FakeSynth { fail: false })),
        };

        let payload = health_payload(&state);
        assert_eq!(payload["classifier"], "Fake Classifier");
        assert_eq!(payload["generator"], "Fake Generator");
        assert_eq!(payload["synthesizer"], "Fake Synth");
        assert_eq!(payload["speech_enabled"], true);

        let mut silent = state.clone();
        silent.synthesizer = None;
        let payload = health_payload(&silent);
        assert!(payload["synthesizer"].is_null());
        assert_eq!(payload["speech_enabled"], false);
    }
}
