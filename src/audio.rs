//! Audio clip handling
//!
//! Synthesized speech reaches the browser in one of two ways: inlined as a
//! base64 data URI, or persisted under the audio directory and served back
//! through the `/audio/{name}` route. Persisted clips are written through a
//! temp file and renamed into place so a concurrent read never sees a
//! partial file.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::core::constants::audio;

/// A synthesized speech clip as returned by a speech backend.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl AudioClip {
    /// Encode the clip as a `data:` URI suitable for an `<audio>` element.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// How synthesized audio is handed to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Inline the clip into the JSON response as a base64 data URI.
    DataUri,
    /// Persist the clip to the audio directory and return its URL path.
    File,
}

impl DeliveryMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "data-uri" | "data_uri" | "datauri" => Some(DeliveryMode::DataUri),
            "file" => Some(DeliveryMode::File),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeliveryMode::DataUri => "data-uri",
            DeliveryMode::File => "file",
        }
    }
}

/// File extension for a clip content type. Unknown types fall back to mp3,
/// matching the default speech model output.
pub fn extension_for(content_type: &str) -> &'static str {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    match essence {
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/ogg" => "ogg",
        _ => "mp3",
    }
}

/// Content type for a stored clip name, derived from its extension.
pub fn content_type_for(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        _ => audio::MPEG,
    }
}

/// Store a clip under `dir` and return its file name.
///
/// Each clip gets a fresh UUID name so concurrent requests never clobber
/// each other's output.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the clip cannot
/// be written.
pub fn store_clip(dir: &Path, clip: &AudioClip) -> anyhow::Result<String> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create audio directory {}", dir.display()))?;

    let name = format!("{}.{}", Uuid::new_v4(), extension_for(&clip.content_type));
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(&clip.bytes)
        .context("Failed to write audio clip")?;
    tmp.persist(dir.join(&name))
        .map_err(|e| anyhow::anyhow!("Failed to persist audio clip {name}: {e}"))?;

    Ok(name)
}

/// Whether a clip name from the URL is safe to look up on disk.
///
/// Only names this service generates are accepted: ASCII alphanumerics,
/// dots, underscores and hyphens, with no parent-directory component.
pub fn is_safe_clip_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
}
