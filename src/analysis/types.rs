use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// One decoded image: an owned, immutable width × height grid of RGBA8
/// samples. Built once by the decoder, read once by the sampler, then
/// dropped — nothing retains it across analysis passes.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pixels: RgbaImage,
}

impl PixelBuffer {
    /// Build a buffer from raw RGBA8 bytes in row-major order.
    ///
    /// Fails when `data` does not hold exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AnalysisError> {
        let pixels = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
            AnalysisError::Decode(format!(
                "pixel data length does not match {width}x{height} RGBA dimensions"
            ))
        })?;
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub(crate) fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}

/// Image decoding abstraction (allows mocking for tests).
///
/// The core never parses image formats itself; it only consumes the
/// decoder's output shape. Production code wires in [`super::PixelDecoder`].
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, AnalysisError>;
}

/// The original encoded bytes of one source image.
///
/// Kept unmodified so the fingerprint can embed its sources and the card
/// compositor can redraw them. Serializes as a `data:` URL, which is what
/// share surfaces expect to inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedImage {
    bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Render as `data:<mime>;base64,<payload>`.
    ///
    /// The MIME type is sniffed from the magic bytes; unrecognized content
    /// falls back to `application/octet-stream` rather than failing, since
    /// decode errors are surfaced where the bytes are actually consumed.
    pub fn to_data_url(&self) -> String {
        let mime = image::guess_format(&self.bytes)
            .map(|f| f.to_mime_type())
            .unwrap_or("application/octet-stream");
        format!("data:{mime};base64,{}", BASE64.encode(&self.bytes))
    }
}

impl From<EncodedImage> for String {
    fn from(image: EncodedImage) -> Self {
        image.to_data_url()
    }
}

impl TryFrom<String> for EncodedImage {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let rest = value
            .strip_prefix("data:")
            .ok_or_else(|| "expected a data: URL".to_string())?;
        let (_mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| "expected a base64 data: URL".to_string())?;
        let bytes = BASE64
            .decode(payload)
            .map_err(|e| format!("invalid base64 payload: {e}"))?;
        Ok(Self { bytes })
    }
}

/// The four aesthetic metrics, each an integer on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub brightness: u8,
    pub contrast: u8,
    pub saturation: u8,
    pub density: u8,
}

/// Semantic label assigned to a palette entry by rank and saturation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteRole {
    Dominant,
    Secondary,
    Accent,
    Muted,
}

/// One ranked palette entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    /// Uppercase `#RRGGBB`.
    pub hex: String,
    /// Share of analyzed pixels, floored at 1 so every entry is visible.
    pub pct: u8,
    pub role: PaletteRole,
}

/// The complete style fingerprint of one analysis pass.
///
/// An immutable value object: the sole output of the analysis pipeline and
/// (with its embedded source images) the sole input to the card compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDna {
    /// Exactly five entries, extraction-ranked.
    pub palette: Vec<PaletteColor>,
    pub metrics: Metrics,
    /// At most four tags, first-seen order, no duplicates.
    pub vibe_tags: Vec<String>,
    /// 75, 85 or 92 depending on how many images were supplied.
    pub confidence_score: u8,
    /// The source images, unmodified, in input order.
    pub original_images: Vec<EncodedImage>,
}
