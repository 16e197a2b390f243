//! The analysis orchestrator: the one public entry point that turns
//! encoded screenshots into a [`StyleDna`] fingerprint.
//!
//! Decoding is injected as a trait object so hosts can swap the image
//! backend and tests can bypass format parsing entirely. Each call owns
//! its accumulator from start to finish; two concurrent analyses share
//! nothing.

use super::confidence::confidence_score;
use super::decode::PixelDecoder;
use super::palette::extract_palette;
use super::sampler::SampleAccumulator;
use super::types::{EncodedImage, ImageDecoder, StyleDna};
use super::vibe::derive_vibe_tags;
use super::AnalysisError;

/// Smallest accepted batch.
pub const MIN_IMAGES: usize = 1;

/// Largest accepted batch. Upstream surfaces cap uploads at the same
/// number; the core still enforces it because the confidence scale and
/// the card layout are only defined up to three.
pub const MAX_IMAGES: usize = 3;

/// Drives decode → sample → palette → vibe → confidence over one batch.
pub struct StyleAnalyzer {
    decoder: Box<dyn ImageDecoder>,
}

impl StyleAnalyzer {
    /// Analyzer with the production image decoder.
    pub fn new() -> Self {
        Self::with_decoder(Box::new(PixelDecoder))
    }

    /// Analyzer with a custom decoding backend.
    pub fn with_decoder(decoder: Box<dyn ImageDecoder>) -> Self {
        Self { decoder }
    }

    /// Run one full analysis pass over 1–3 encoded images.
    ///
    /// Fails on an out-of-range count, on any decode failure, and when no
    /// opaque pixels exist across the whole batch. Failures abort the
    /// request — there are no partial fingerprints. Retrying is the
    /// caller's decision; nothing is retried here.
    pub fn analyze(&self, images: &[EncodedImage]) -> Result<StyleDna, AnalysisError> {
        let count = images.len();
        if !(MIN_IMAGES..=MAX_IMAGES).contains(&count) {
            return Err(AnalysisError::InvalidInputCount(count));
        }

        tracing::info!(image_count = count, "Starting style analysis");

        let mut accumulator = SampleAccumulator::new();
        for image in images {
            let buffer = self.decoder.decode(image.bytes())?;
            accumulator.accumulate(&buffer);
        }

        let metrics = accumulator.finalize()?;
        let palette = extract_palette(accumulator.buckets(), accumulator.opaque_samples());
        let vibe_tags = derive_vibe_tags(&metrics);
        let confidence = confidence_score(count);

        tracing::info!(
            brightness = metrics.brightness,
            contrast = metrics.contrast,
            saturation = metrics.saturation,
            density = metrics.density,
            tag_count = vibe_tags.len(),
            confidence,
            "Style analysis complete"
        );

        Ok(StyleDna {
            palette,
            metrics,
            vibe_tags,
            confidence_score: confidence,
            original_images: images.to_vec(),
        })
    }
}

impl Default for StyleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
