//! Wellness Companion
//!
//! This application serves a small web form that takes free-text input about
//! how the user is feeling, classifies its sentiment, answers with a
//! supportive reply, and optionally reads the reply aloud through a
//! speech-synthesis backend.

mod api;
mod audio;
mod core;
mod models;
mod selection;

use crate::api::endpoints::{AppState, create_router};
use crate::audio::DeliveryMode;
use crate::core::config::Config;
use crate::core::logging::init_logging;
use crate::core::provider::{
    BackendKind, ResponseGenerator, SentimentClassifier, SpeechSynthesizer,
};
use crate::core::providers::{HostedInference, LexiconClassifier, PassthroughGenerator};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    // Load .env so the API token can live outside the config file
    dotenv::dotenv().ok();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config.log_level);

    // Print startup banner
    print_startup_banner(&config);

    // Validate credentials
    if !config.validate_credentials() {
        error!(
            "Missing API token for the {} backend. Set HF_API_TOKEN or [hosted] api_token.",
            config.backend.as_str()
        );
        std::process::exit(1);
    }

    // Create backends based on configuration
    let (classifier, generator, synthesizer): (
        Arc<dyn SentimentClassifier>,
        Arc<dyn ResponseGenerator>,
        Option<Arc<dyn SpeechSynthesizer>>,
    ) = match config.backend {
        BackendKind::Hosted => {
            let hosted = Arc::new(HostedInference::new(
                config.api_token.clone().unwrap_or_default(),
                config.inference_base_url.clone(),
                config.sentiment_model.clone(),
                config.generation_model.clone(),
                config.speech_model.clone(),
                config.request_timeout,
            ));
            let synthesizer: Option<Arc<dyn SpeechSynthesizer>> = if config.speech_enabled {
                Some(hosted.clone())
            } else {
                None
            };
            (hosted.clone(), hosted, synthesizer)
        }
        BackendKind::Lexicon => {
            if config.speech_enabled {
                warn!("Speech synthesis requires the hosted backend; continuing without audio");
            }
            (
                Arc::new(LexiconClassifier::new()),
                Arc::new(PassthroughGenerator::new()),
                None,
            )
        }
    };

    info!("Using classifier backend: {}", classifier.name());

    // Create application state
    let app_state = AppState {
        config: config.clone(),
        classifier,
        generator,
        synthesizer,
    };

    // Create router
    let app = create_router(app_state);

    // Bind to address
    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("🌿 Wellness Companion v0.1.0");
    println!("✅ Configuration loaded successfully");
    println!("   Backend: {}", config.backend.as_str());
    if config.backend == BackendKind::Hosted {
        println!("   Inference API: {}", config.inference_base_url);
        println!("   Sentiment Model: {}", config.sentiment_model);
        println!("   Generation Model: {}", config.generation_model);
        println!("   Speech Model: {}", config.speech_model);
        println!(
            "   API Token: {}",
            if config.api_token.as_ref().is_some_and(|t| !t.is_empty()) {
                "Configured"
            } else {
                "Missing"
            }
        );
    }
    println!(
        "   Speech: {}",
        if config.speech_enabled {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    println!("   Audio Delivery: {}", config.delivery.as_str());
    if config.delivery == DeliveryMode::File {
        println!("   Audio Directory: {}", config.audio_dir.display());
    }
    println!("   Request Timeout: {}s", config.request_timeout);
    println!("   Server: {}:{}", config.host, config.port);
    println!();
}

/// Print help message
fn print_help() {
    println!("Wellness Companion v0.1.0");
    println!();
    println!("Usage: wellness-companion [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Configuration file (config.toml by default):");
    println!("  backend - Inference backend: hosted, lexicon (required)");
    println!();
    println!("Hosted backend ([hosted] section):");
    println!("  api_token - API token (or set HF_API_TOKEN)");
    println!("  base_url - Inference API base URL");
    println!("  sentiment_model - Sentiment analysis model id");
    println!("  generation_model - Response generation model id");
    println!("  speech_model - Speech synthesis model id");
    println!();
    println!("Speech ([speech] section):");
    println!("  enabled - Synthesize replies to audio (default: true)");
    println!("  delivery - Audio delivery: data-uri, file (default: data-uri)");
    println!("  audio_dir - Directory for stored clips (default: audio)");
    println!();
    println!("Server ([server] and [request] sections):");
    println!("  host - Server host (default: 0.0.0.0)");
    println!("  port - Server port (default: 8096)");
    println!("  log_level - Logging level (default: info)");
    println!("  request_timeout - Upstream timeout in seconds (default: 30)");
    println!();
    println!("Environment variables:");
    println!("  HF_API_TOKEN - API token for the hosted backend (overrides config)");
    println!("  CONFIG_PATH - Path to the TOML config file (default: config.toml)");
    println!("  RUST_LOG - Overrides the configured log level");
}
