//! Decode → rasterize → re-encode pipeline.
//!
//! The decoded image is blitted onto an RGBA surface sized exactly to its
//! pixel dimensions (no scaling, no color management beyond decoder
//! defaults), then encoded to the target format.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::utils::{ConverterError, ConverterResult, OutputFormat};

/// Transcodes `bytes` to `format`, honoring `quality` for lossy targets.
pub fn transcode(bytes: &[u8], format: OutputFormat, quality: u8) -> ConverterResult<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ConverterError::decode(e.to_string()))?;

    // The canvas: an RGBA surface at the decoded dimensions.
    let surface = decoded.to_rgba8();

    match format {
        OutputFormat::Jpeg => encode_jpeg(&surface, quality),
        OutputFormat::Png => encode_png(&surface),
        OutputFormat::WebP => encode_webp(&surface, quality),
        OutputFormat::Avif => encode_avif(&surface, quality),
    }
}

fn encode_jpeg(surface: &RgbaImage, quality: u8) -> ConverterResult<Vec<u8>> {
    // JPEG has no alpha channel; flatten to RGB first.
    let rgb = DynamicImage::ImageRgba8(surface.clone()).to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ConverterError::encode(e.to_string()))?;
    Ok(buf)
}

fn encode_png(surface: &RgbaImage) -> ConverterResult<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Default, FilterType::Adaptive)
        .write_image(
            surface.as_raw(),
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ConverterError::encode(e.to_string()))?;
    Ok(buf)
}

fn encode_webp(surface: &RgbaImage, quality: u8) -> ConverterResult<Vec<u8>> {
    let encoder = webp::Encoder::from_rgba(surface.as_raw(), surface.width(), surface.height());
    // encode_simple surfaces libwebp failures (e.g. dimensions over the
    // 16383-pixel limit) instead of panicking on them.
    let encoded = encoder
        .encode_simple(false, f32::from(quality))
        .map_err(|e| ConverterError::encode(format!("WebP encoding failed: {e:?}")))?;
    Ok(encoded.to_vec())
}

fn encode_avif(surface: &RgbaImage, quality: u8) -> ConverterResult<Vec<u8>> {
    let pixels: Vec<ravif::RGBA8> = surface
        .pixels()
        .map(|p| ravif::RGBA8::new(p[0], p[1], p[2], p[3]))
        .collect();
    let img = ravif::Img::new(
        pixels.as_slice(),
        surface.width() as usize,
        surface.height() as usize,
    );

    let encoded = ravif::Encoder::new()
        .with_quality(f32::from(quality))
        .with_alpha_quality(f32::from(quality))
        .with_speed(8)
        .encode_rgba(img)
        .map_err(|e| ConverterError::encode(e.to_string()))?;
    Ok(encoded.avif_file)
}
