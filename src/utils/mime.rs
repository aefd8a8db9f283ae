//! Media type detection for intake files.
//!
//! CLI files carry no declared MIME type, so the declared type is derived
//! from the file extension before intake validation.

use std::path::Path;

/// Common media type constants.
pub mod types {
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const BMP: &str = "image/bmp";
    pub const TIFF: &str = "image/tiff";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";

    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Returns the media type implied by a file extension.
pub fn from_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "png" => types::PNG,
        "jpg" | "jpeg" => types::JPEG,
        "gif" => types::GIF,
        "webp" => types::WEBP,
        "avif" => types::AVIF,
        "bmp" => types::BMP,
        "tif" | "tiff" => types::TIFF,
        "svg" => types::SVG,
        "ico" => types::ICO,
        _ => types::OCTET_STREAM,
    }
}

/// Returns the media type implied by a path's extension.
pub fn from_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .map(from_extension)
        .unwrap_or(types::OCTET_STREAM)
}

/// Intake rule: a candidate is image-like iff its declared media type starts
/// with `image/`.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn known_image_extensions() {
        assert_eq!(from_extension("PNG"), "image/png");
        assert_eq!(from_extension("jpeg"), "image/jpeg");
        assert_eq!(from_path(&PathBuf::from("a/b/cat.webp")), "image/webp");
    }

    #[test]
    fn unknown_extensions_fall_back_to_octet_stream() {
        assert_eq!(from_extension("pdf"), types::OCTET_STREAM);
        assert_eq!(from_path(&PathBuf::from("noext")), types::OCTET_STREAM);
    }

    #[test]
    fn image_media_type_check() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("image/x-icon"));
        assert!(!is_image_media_type("application/octet-stream"));
        assert!(!is_image_media_type("video/mp4"));
    }
}
