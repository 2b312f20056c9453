//! Wire types for the `generateContent` REST call.
//!
//! Field names follow the service's camelCase JSON exactly.

use serde::{Deserialize, Serialize};

/// Top-level request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; image generation sends a single user turn
    pub contents: Vec<Content>,
    /// Output configuration
    pub generation_config: GenerationConfig,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Turn role; requests send "user"
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    /// Ordered content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One content part: text or inline binary data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
    /// Inline binary payload
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub inline_data: Option<Blob>,
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline binary part.
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(Blob {
                mime_type: Some(mime_type.into()),
                data: data.into(),
            }),
        }
    }
}

/// Base64-encoded binary payload with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// MIME type of the payload
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mime_type: Option<String>,
    /// Base64-encoded bytes
    pub data: String,
}

/// Generation settings: image-only output at a chosen shape and size.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Requested output modalities; image generation sends `["IMAGE"]`
    pub response_modalities: Vec<String>,
    /// Image shape and resolution
    pub image_config: ImageConfig,
}

/// Image output configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Aspect-ratio bucket, e.g. "16:9"
    pub aspect_ratio: String,
    /// Resolution tier, e.g. "2K"
    pub image_size: String,
}

/// Top-level response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates; may be empty
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content; may be absent
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error envelope returned on non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    /// The error body
    pub error: ApiErrorBody,
}

/// Structured error body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Numeric code, mirrors the HTTP status
    #[serde(default)]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Canonical status name, e.g. "RESOURCE_EXHAUSTED"
    #[serde(default)]
    pub status: Option<String>,
}
