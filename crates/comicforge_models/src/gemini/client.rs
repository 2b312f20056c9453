//! REST client for Gemini image generation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use std::env;
use tracing::{debug, instrument, warn};

use comicforge_core::ImageRef;
use comicforge_error::{GenerationError, GenerationErrorKind};
use comicforge_interface::{ImageGenerator, ImageRequest};

use super::GeminiResult;
use super::wire::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageConfig, Part,
};

/// Base URL for the generative language REST API.
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default image model.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

/// Client for the Gemini image-generation REST API.
///
/// Issues a single `generateContent` call per [`ImageRequest`]: one text
/// part, one inline part per character reference image in input order, one
/// inline part for the panel template if present, and an image-only
/// generation config carrying the aspect bucket and resolution tier. The
/// first inline-data part of the first candidate becomes the result.
///
/// Retry lives above this client, in the batch layer.
///
/// # Examples
///
/// ```no_run
/// use comicforge_models::GeminiImageClient;
/// use comicforge_interface::{ImageGenerator, ImageRequest};
/// use comicforge_core::{AspectRatio, ImageSize};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiImageClient::from_env()?;
/// let request = ImageRequest::text_only(
///     "a rooftop chase across a rainy city",
///     AspectRatio::Wide16x9,
///     ImageSize::TwoK,
/// );
/// let image = client.generate(&request).await?;
/// println!("{} bytes of {}", image.data.len(), image.mime_type);
/// # Ok(())
/// # }
/// ```
pub struct GeminiImageClient {
    http: reqwest::Client,
    api_key: String,
    model_name: String,
}

impl std::fmt::Debug for GeminiImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiImageClient")
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

impl GeminiImageClient {
    /// Create a client with an explicit API key and the default model.
    pub fn new(api_key: impl Into<String>) -> GeminiResult<Self> {
        Self::with_model(api_key, DEFAULT_IMAGE_MODEL)
    }

    /// Create a client with an explicit API key and model name.
    pub fn with_model(api_key: impl Into<String>, model_name: impl Into<String>) -> GeminiResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MissingApiKey));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            model_name: model_name.into(),
        })
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    #[instrument(name = "gemini_image_client_from_env")]
    pub fn from_env() -> GeminiResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GenerationError::new(GenerationErrorKind::MissingApiKey))?;
        Self::new(api_key)
    }

    /// The configured model name.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Assemble the wire request for an image request.
    fn build_request(req: &ImageRequest) -> GenerateContentRequest {
        let mut parts = vec![Part::text(&req.prompt)];

        for character in &req.character_images {
            parts.push(Part::inline_data(
                &character.mime_type,
                STANDARD.encode(&character.data),
            ));
        }

        if let Some(template) = &req.template {
            parts.push(Part::inline_data(
                &template.mime_type,
                STANDARD.encode(&template.data),
            ));
        }

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: ImageConfig {
                    aspect_ratio: req.aspect_ratio.as_str().to_string(),
                    image_size: req.image_size.as_str().to_string(),
                },
            },
        }
    }

    /// Pull the result image out of a parsed response.
    ///
    /// Consumes the first inline-data part of the first candidate. Each
    /// missing layer is a distinct empty-result failure so callers can tell
    /// an empty response from a refused one.
    fn extract_image(response: GenerateContentResponse) -> GeminiResult<ImageRef> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;

        let content = candidate
            .content
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::MissingContent))?;

        for part in content.parts {
            if let Some(blob) = part.inline_data {
                let data = STANDARD
                    .decode(blob.data.as_bytes())
                    .map_err(|e| GenerationError::new(GenerationErrorKind::Decode(e.to_string())))?;
                let mime_type = blob.mime_type.unwrap_or_else(|| "image/png".to_string());
                return Ok(ImageRef::new(mime_type, data));
            }
        }

        Err(GenerationError::new(GenerationErrorKind::MissingImageData))
    }

    /// Classify a non-success response.
    ///
    /// Structured signals first (HTTP status, error-envelope status), then
    /// the legacy substring match over the remote message in priority order:
    /// credentials, quota, overload, content policy, generic.
    fn classify_failure(status: StatusCode, body: &str) -> GenerationError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.to_string());

        let kind = match status.as_u16() {
            401 | 403 => GenerationErrorKind::InvalidApiKey,
            429 => GenerationErrorKind::QuotaExceeded,
            503 | 529 => GenerationErrorKind::Overloaded(message),
            _ => Self::classify_message(message),
        };
        GenerationError::new(kind)
    }

    /// Substring fallback over the remote service's phrasing.
    ///
    /// The phrase list is not verified to be exhaustive; unknown wording
    /// falls through to the generic variant with the message unchanged.
    fn classify_message(message: String) -> GenerationErrorKind {
        if message.contains("API key") {
            GenerationErrorKind::InvalidApiKey
        } else if message.contains("billing") || message.contains("quota") {
            GenerationErrorKind::QuotaExceeded
        } else if message.contains("overloaded") || message.contains("503") {
            GenerationErrorKind::Overloaded(message)
        } else if message.contains("No text response") {
            GenerationErrorKind::ContentPolicy
        } else {
            GenerationErrorKind::Api(message)
        }
    }

    /// Issue the REST call and extract the generated image.
    async fn generate_internal(&self, req: &ImageRequest) -> GeminiResult<ImageRef> {
        let url = format!("{}/{}:generateContent", API_BASE, self.model_name);
        let body = Self::build_request(req);

        debug!(
            model = %self.model_name,
            characters = req.character_images.len(),
            has_template = req.template.is_some(),
            aspect_ratio = %req.aspect_ratio,
            image_size = %req.image_size,
            "Sending image generation request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Transport(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = Self::classify_failure(status, &body);
            warn!(status = status.as_u16(), error = %err, "Image generation request failed");
            return Err(err);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Api(e.to_string())))?;

        Self::extract_image(parsed)
    }
}

#[async_trait::async_trait]
impl ImageGenerator for GeminiImageClient {
    #[instrument(name = "gemini_generate", skip(self, request), fields(model = %self.model_name, prompt_len = request.prompt.len()))]
    async fn generate(&self, request: &ImageRequest) -> Result<ImageRef, GenerationError> {
        self.generate_internal(request).await
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comicforge_core::{AspectRatio, ImageSize};
    use comicforge_error::RetryClass;

    fn request_with_refs() -> ImageRequest {
        ImageRequest {
            prompt: "two characters on a bridge".to_string(),
            character_images: vec![
                ImageRef::png(vec![1]),
                ImageRef::new("image/jpeg", vec![2]),
            ],
            template: Some(ImageRef::png(vec![3])),
            aspect_ratio: AspectRatio::Tall3x4,
            image_size: ImageSize::TwoK,
        }
    }

    #[test]
    fn request_parts_keep_input_order() {
        let wire = GeminiImageClient::build_request(&request_with_refs());
        let parts = &wire.contents[0].parts;
        assert_eq!(parts.len(), 4);
        assert!(parts[0].text.is_some());
        assert_eq!(
            parts[1].inline_data.as_ref().unwrap().mime_type.as_deref(),
            Some("image/png")
        );
        assert_eq!(
            parts[2].inline_data.as_ref().unwrap().mime_type.as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            parts[3].inline_data.as_ref().unwrap().mime_type.as_deref(),
            Some("image/png")
        );
        assert_eq!(wire.generation_config.response_modalities, vec!["IMAGE"]);
        assert_eq!(wire.generation_config.image_config.aspect_ratio, "3:4");
        assert_eq!(wire.generation_config.image_config.image_size, "2K");
    }

    #[test]
    fn serialized_request_uses_camel_case() {
        let wire = GeminiImageClient::build_request(&request_with_refs());
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json["generationConfig"]["imageConfig"]["aspectRatio"].is_string());
        assert!(json["contents"][0]["parts"][1]["inlineData"]["mimeType"].is_string());
    }

    #[test]
    fn extract_image_distinguishes_empty_result_layers() {
        let empty = GenerateContentResponse { candidates: vec![] };
        assert_eq!(
            GeminiImageClient::extract_image(empty).unwrap_err().kind,
            GenerationErrorKind::EmptyResponse
        );

        let no_content = GenerateContentResponse {
            candidates: vec![super::super::wire::Candidate {
                content: None,
                finish_reason: Some("STOP".to_string()),
            }],
        };
        assert_eq!(
            GeminiImageClient::extract_image(no_content).unwrap_err().kind,
            GenerationErrorKind::MissingContent
        );

        let text_only = GenerateContentResponse {
            candidates: vec![super::super::wire::Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part::text("no image for you")],
                }),
                finish_reason: None,
            }],
        };
        assert_eq!(
            GeminiImageClient::extract_image(text_only).unwrap_err().kind,
            GenerationErrorKind::MissingImageData
        );
    }

    #[test]
    fn extract_image_takes_first_inline_part() {
        let base64 = STANDARD.encode([9u8, 8, 7]);
        let response = GenerateContentResponse {
            candidates: vec![super::super::wire::Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![
                        Part::text("caption"),
                        Part::inline_data("image/webp", base64.clone()),
                        Part::inline_data("image/png", base64),
                    ],
                }),
                finish_reason: None,
            }],
        };
        let image = GeminiImageClient::extract_image(response).unwrap();
        assert_eq!(image.mime_type, "image/webp");
        assert_eq!(image.data, vec![9, 8, 7]);
    }

    #[test]
    fn classification_prefers_structured_status() {
        let err = GeminiImageClient::classify_failure(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#,
        );
        assert!(err.is_overloaded());

        let err = GeminiImageClient::classify_failure(StatusCode::FORBIDDEN, "nope");
        assert_eq!(err.kind, GenerationErrorKind::InvalidApiKey);

        let err = GeminiImageClient::classify_failure(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert_eq!(err.kind, GenerationErrorKind::QuotaExceeded);
    }

    #[test]
    fn classification_falls_back_to_substrings_in_priority_order() {
        let cases = [
            ("API key not valid", GenerationErrorKind::InvalidApiKey),
            ("billing account required", GenerationErrorKind::QuotaExceeded),
            ("project quota exceeded", GenerationErrorKind::QuotaExceeded),
            ("No text response received", GenerationErrorKind::ContentPolicy),
        ];
        for (message, expected) in cases {
            let err =
                GeminiImageClient::classify_failure(StatusCode::BAD_REQUEST, &format!(r#"{{"error":{{"message":"{}"}}}}"#, message));
            assert_eq!(err.kind, expected, "message: {}", message);
        }

        let err = GeminiImageClient::classify_failure(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"backend returned 503"}}"#,
        );
        assert!(err.is_overloaded());

        let err = GeminiImageClient::classify_failure(StatusCode::BAD_REQUEST, "unrecognized phrasing");
        assert_eq!(
            err.kind,
            GenerationErrorKind::Api("unrecognized phrasing".to_string())
        );
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = GeminiImageClient::new("  ").unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::MissingApiKey);
    }
}
