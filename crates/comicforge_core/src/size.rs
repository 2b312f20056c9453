//! Requested output resolution tiers.

use serde::{Deserialize, Serialize};

/// Resolution tier requested from the generation API.
///
/// Batch generation always requests [`ImageSize::TwoK`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum ImageSize {
    /// 1K output
    #[display("1K")]
    #[serde(rename = "1K")]
    OneK,
    /// 2K output
    #[display("2K")]
    #[serde(rename = "2K")]
    TwoK,
    /// 4K output
    #[display("4K")]
    #[serde(rename = "4K")]
    FourK,
}

impl ImageSize {
    /// Wire string for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::OneK => "1K",
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

impl std::str::FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1K" | "1k" => Ok(ImageSize::OneK),
            "2K" | "2k" => Ok(ImageSize::TwoK),
            "4K" | "4k" => Ok(ImageSize::FourK),
            _ => Err(format!("Unknown image size: {}", s)),
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize::TwoK
    }
}
