use crate::utils::OutputFormat;

/// Derives the output filename for a converted entry.
///
/// The basename is the original name truncated at its *first* dot, so
/// `photo.v2.jpg` becomes `photo.png` when converting to PNG. This matches
/// the historical behavior; callers that want smarter extension handling must
/// not rely on this function.
pub fn derive_output_name(original: &str, format: OutputFormat) -> String {
    let base = original.split('.').next().unwrap_or(original);
    format!("{}.{}", base, format.primary_extension())
}

/// Formats a byte count as a short human-readable string.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_truncates_at_first_dot() {
        // Everything after the first dot is dropped ("v2.jpg" here), by design.
        assert_eq!(
            derive_output_name("photo.v2.jpg", OutputFormat::Png),
            "photo.png"
        );
        assert_eq!(
            derive_output_name("archive.tar.gz.png", OutputFormat::WebP),
            "archive.webp"
        );
    }

    #[test]
    fn output_name_without_dot_keeps_whole_name() {
        assert_eq!(derive_output_name("photo", OutputFormat::Jpeg), "photo.jpg");
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
