//! Production image decoding behind the [`ImageDecoder`] capability.
//!
//! Format parsing is fully delegated to the `image` crate; the rest of
//! the pipeline only ever sees the decoded [`PixelBuffer`] shape. Format
//! and size policy (which types are accepted, upload ceilings) belongs to
//! the caller — the core reports decode failures but does not police
//! inputs beyond that.

use image::RgbaImage;

use super::types::{ImageDecoder, PixelBuffer};
use super::AnalysisError;

/// Decoder backed by `image::load_from_memory`.
///
/// Animated formats decode to their first frame; everything is converted
/// to RGBA8 so transparency survives into sampling.
#[derive(Debug, Default, Clone, Copy)]
pub struct PixelDecoder;

impl ImageDecoder for PixelDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, AnalysisError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| AnalysisError::Decode(e.to_string()))?;
        let rgba = decoded.to_rgba8();

        tracing::debug!(
            width = rgba.width(),
            height = rgba.height(),
            input_bytes = bytes.len(),
            "Decoded source image"
        );

        Ok(PixelBuffer::from(rgba))
    }
}

/// Mock decoder for tests: ignores the input bytes and returns a solid
/// RGBA fill, or a decode failure when constructed with [`Self::failing`].
pub struct MockDecoder {
    width: u32,
    height: u32,
    fill: [u8; 4],
    fail: bool,
}

impl MockDecoder {
    pub fn solid(width: u32, height: u32, fill: [u8; 4]) -> Self {
        Self {
            width,
            height,
            fill,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            width: 0,
            height: 0,
            fill: [0; 4],
            fail: true,
        }
    }
}

impl ImageDecoder for MockDecoder {
    fn decode(&self, _bytes: &[u8]) -> Result<PixelBuffer, AnalysisError> {
        if self.fail {
            return Err(AnalysisError::Decode("mock decode failure".into()));
        }
        let image = RgbaImage::from_pixel(self.width, self.height, image::Rgba(self.fill));
        Ok(PixelBuffer::from(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(image: &RgbaImage) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image.clone())
            .write_to(&mut cursor, image::ImageFormat::Png)
            .unwrap();
        cursor.into_inner()
    }

    #[test]
    fn decodes_png_dimensions_and_pixels() {
        let source = RgbaImage::from_pixel(7, 5, image::Rgba([10, 20, 30, 255]));
        let bytes = encode_png(&source);

        let buffer = PixelDecoder.decode(&bytes).unwrap();
        assert_eq!(buffer.width(), 7);
        assert_eq!(buffer.height(), 5);
        assert_eq!(buffer.as_image().get_pixel(3, 2).0, [10, 20, 30, 255]);
    }

    #[test]
    fn garbage_bytes_fail_with_decode_error() {
        let garbage = [0xDE, 0xAD, 0xBE, 0xEF].repeat(16);
        let result = PixelDecoder.decode(&garbage);
        assert!(matches!(result, Err(AnalysisError::Decode(_))));
    }

    #[test]
    fn mock_decoder_returns_configured_fill() {
        let decoder = MockDecoder::solid(3, 3, [1, 2, 3, 255]);
        let buffer = decoder.decode(b"ignored").unwrap();
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.as_image().get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn failing_mock_decoder_errors() {
        let result = MockDecoder::failing().decode(b"ignored");
        assert!(matches!(result, Err(AnalysisError::Decode(_))));
    }
}
