//! Aspect-ratio classification.

use serde::{Deserialize, Serialize};

/// Canonical aspect-ratio buckets accepted by the generation API.
///
/// The `Display` strings are the wire values sent in the generation config.
///
/// # Examples
///
/// ```
/// use comicforge_core::AspectRatio;
///
/// assert_eq!(AspectRatio::classify(896, 1200), AspectRatio::Tall3x4);
/// assert_eq!(AspectRatio::Wide16x9.to_string(), "16:9");
/// ```
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
    strum::EnumIter,
    derive_more::Display,
)]
pub enum AspectRatio {
    /// Square (1:1)
    #[display("1:1")]
    #[serde(rename = "1:1")]
    Square,
    /// Wide landscape (16:9)
    #[display("16:9")]
    #[serde(rename = "16:9")]
    Wide16x9,
    /// Standard landscape (4:3)
    #[display("4:3")]
    #[serde(rename = "4:3")]
    Wide4x3,
    /// Portrait (9:16)
    #[display("9:16")]
    #[serde(rename = "9:16")]
    Tall9x16,
    /// Standard portrait (3:4)
    #[display("3:4")]
    #[serde(rename = "3:4")]
    Tall3x4,
}

impl AspectRatio {
    /// Classify pixel dimensions into a bucket.
    ///
    /// Total for all positive dimensions. Interval boundaries are closed and
    /// checked in precedence order, so 1.10 is square and 1.70 is 16:9.
    pub fn classify(width: u32, height: u32) -> Self {
        Self::from_ratio(f64::from(width) / f64::from(height))
    }

    /// Classify a raw width/height ratio into a bucket.
    pub fn from_ratio(ratio: f64) -> Self {
        // Near-square wins over both tall and wide ranges.
        if (0.90..=1.10).contains(&ratio) {
            return AspectRatio::Square;
        }
        if ratio < 0.90 {
            if (0.50..=0.60).contains(&ratio) {
                return AspectRatio::Tall9x16;
            }
            return AspectRatio::Tall3x4;
        }
        if (1.70..=1.90).contains(&ratio) {
            return AspectRatio::Wide16x9;
        }
        AspectRatio::Wide4x3
    }

    /// Wire string for this bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide16x9 => "16:9",
            AspectRatio::Wide4x3 => "4:3",
            AspectRatio::Tall9x16 => "9:16",
            AspectRatio::Tall3x4 => "3:4",
        }
    }

    /// Human-readable description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            AspectRatio::Square => "square",
            AspectRatio::Wide16x9 => "wide (landscape)",
            AspectRatio::Wide4x3 => "standard (landscape)",
            AspectRatio::Tall9x16 => "portrait",
            AspectRatio::Tall3x4 => "standard (portrait)",
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1:1" => Ok(AspectRatio::Square),
            "16:9" => Ok(AspectRatio::Wide16x9),
            "4:3" => Ok(AspectRatio::Wide4x3),
            "9:16" => Ok(AspectRatio::Tall9x16),
            "3:4" => Ok(AspectRatio::Tall3x4),
            _ => Err(format!("Unknown aspect ratio: {}", s)),
        }
    }
}
