use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::ConverterError;

/// Closed set of output formats the converter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    WebP,
    Avif,
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Canonical media type for this format. Output objects are always tagged
    /// with this, never with whatever the encoder reports.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::WebP => "image/webp",
            Self::Avif => "image/avif",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Display label for history records and notifications
    pub fn label(&self) -> &'static str {
        match self {
            Self::WebP => "WebP",
            Self::Avif => "AVIF",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        }
    }

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::WebP => &["webp"],
            Self::Avif => &["avif"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
        }
    }

    /// Get the primary extension for this format
    pub fn primary_extension(&self) -> &str {
        self.extensions()[0]
    }

    /// Whether the encoder for this format accepts a lossy quality value
    pub fn is_lossy(&self) -> bool {
        !matches!(self, Self::Png)
    }

    /// Get the default quality value for this format
    pub fn default_quality(&self) -> u8 {
        match self {
            Self::WebP | Self::Avif | Self::Jpeg => 90,
            Self::Png => 100, // lossless, quality is ignored
        }
    }

    /// Validate quality value for this format
    pub fn validate_quality(&self, quality: u8) -> bool {
        match self {
            Self::Png => quality <= 100,
            _ => quality > 0 && quality <= 100,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "webp" => Ok(Self::WebP),
            "avif" => Ok(Self::Avif),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(ConverterError::format(format!(
                "Unsupported output format: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_types_are_canonical() {
        assert_eq!(OutputFormat::WebP.media_type(), "image/webp");
        assert_eq!(OutputFormat::Avif.media_type(), "image/avif");
        assert_eq!(OutputFormat::Jpeg.media_type(), "image/jpeg");
        assert_eq!(OutputFormat::Png.media_type(), "image/png");
    }

    #[test]
    fn parse_accepts_both_jpeg_spellings() {
        assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("JPEG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert!("svg".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn png_is_lossless() {
        assert!(!OutputFormat::Png.is_lossy());
        assert!(OutputFormat::Png.validate_quality(0));
        assert!(!OutputFormat::Jpeg.validate_quality(0));
    }
}
