//! The conversion contract and its production implementation.
//!
//! Codec work is CPU-bound, so [`RasterConverter`] runs each conversion
//! inside `tokio::task::spawn_blocking` and the async runtime is never
//! blocked. The trait seam lets queue tests substitute a mock.

mod codecs;

use std::sync::Arc;
use async_trait::async_trait;

use crate::utils::{ConverterError, ConverterResult, OutputFormat};

pub use codecs::transcode;

/// Pure conversion: (input bytes, target format, quality) → output bytes.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(
        &self,
        bytes: Arc<[u8]>,
        format: OutputFormat,
        quality: u8,
    ) -> ConverterResult<Arc<[u8]>>;
}

/// Converter backed by the in-process codecs.
pub struct RasterConverter;

#[async_trait]
impl Converter for RasterConverter {
    async fn convert(
        &self,
        bytes: Arc<[u8]>,
        format: OutputFormat,
        quality: u8,
    ) -> ConverterResult<Arc<[u8]>> {
        tokio::task::spawn_blocking(move || {
            codecs::transcode(&bytes, format, quality).map(|out| Arc::from(out))
        })
        .await
        .map_err(|e| ConverterError::encode(format!("conversion task panicked: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use std::io::Cursor;

    #[tokio::test]
    async fn raster_converter_round_trips_through_the_blocking_pool() {
        let img = RgbaImage::from_pixel(3, 3, image::Rgba([10, 20, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();

        let bytes: Arc<[u8]> = buf.into_inner().into();
        let out = RasterConverter
            .convert(bytes, OutputFormat::Jpeg, 90)
            .await
            .unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
    }

    #[tokio::test]
    async fn decode_failures_surface_as_errors() {
        let bytes: Arc<[u8]> = b"not an image".to_vec().into();
        let err = RasterConverter
            .convert(bytes, OutputFormat::WebP, 90)
            .await
            .unwrap_err();
        assert!(matches!(err, ConverterError::Decode(_)));
    }
}
