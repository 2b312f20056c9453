//! Self-contained image references.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A self-contained image payload: mime type plus raw bytes.
///
/// Generation results are synthesized into this form rather than remote
/// URLs, so a completed task carries everything needed to save or archive
/// its page. Serializes as a `data:` URL.
///
/// # Examples
///
/// ```
/// use comicforge_core::ImageRef;
///
/// let image = ImageRef::new("image/png", vec![0x89, 0x50, 0x4E, 0x47]);
/// let url = image.to_data_url();
/// assert_eq!(ImageRef::from_data_url(&url).unwrap(), image);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

impl ImageRef {
    /// Create a new image reference.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Create a PNG image reference.
    pub fn png(data: Vec<u8>) -> Self {
        Self::new("image/png", data)
    }

    /// Encode as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    /// Decode a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self, DataUrlError> {
        let rest = url.strip_prefix("data:").ok_or(DataUrlError::MissingScheme)?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or(DataUrlError::MissingBase64Marker)?;
        let data = STANDARD
            .decode(payload)
            .map_err(|e| DataUrlError::Base64(e.to_string()))?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            data,
        })
    }
}

/// Why a `data:` URL could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DataUrlError {
    /// Input does not start with `data:`
    #[display("not a data URL")]
    MissingScheme,
    /// Input lacks the `;base64,` payload marker
    #[display("data URL is not base64-encoded")]
    MissingBase64Marker,
    /// Payload failed to decode
    #[display("invalid base64 payload: {}", _0)]
    Base64(String),
}

impl std::error::Error for DataUrlError {}

impl Serialize for ImageRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        ImageRef::from_data_url(&url).map_err(D::Error::custom)
    }
}
