//! Fixed-grid sampling and metric accumulation.
//!
//! Every source image is resampled onto a 100×100 analysis grid, which
//! bounds the whole pass to O(images × 10⁴) samples no matter how large
//! the screenshots are. The accumulator is a single owned value built and
//! consumed within one analysis call — there is no shared or static
//! state, so concurrent analyses never interact.

use image::imageops::FilterType;
use image::{imageops, RgbaImage};
use indexmap::IndexMap;

use super::color::{luminance, rgb_to_hsl};
use super::types::{Metrics, PixelBuffer};
use super::AnalysisError;

/// Side length of the square analysis grid.
pub const ANALYSIS_GRID: u32 = 100;

/// Channel step of the coarse color quantization (5 bits per channel,
/// 32 levels, 32768 possible buckets).
pub const BUCKET_SIZE: u8 = 32;

/// Sum of absolute per-channel differences above which two neighboring
/// grid samples count as an edge.
const EDGE_THRESHOLD: u32 = 100;

/// One coarse color cluster: how many grid samples quantized into it,
/// plus the first raw sample seen, kept as the cluster's representative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBucket {
    pub count: u64,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Key type of the bucket map: RGB with each channel floored to its
/// 32-level band.
pub type BucketKey = (u8, u8, u8);

/// Running statistics for one analysis pass, folded over every opaque
/// grid sample of every supplied image.
///
/// Luminance variance is accumulated in streaming form (Σx, Σx²), which
/// matches the population variance of the sample list exactly. The bucket
/// map is insertion-ordered so that equal-count buckets rank the same way
/// on every run.
#[derive(Debug, Default)]
pub struct SampleAccumulator {
    opaque_samples: u64,
    luminance_sum: f64,
    luminance_sq_sum: f64,
    saturation_sum: f64,
    edge_count: u64,
    buckets: IndexMap<BucketKey, ColorBucket>,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fully opaque grid samples folded in so far.
    pub fn opaque_samples(&self) -> u64 {
        self.opaque_samples
    }

    pub fn buckets(&self) -> &IndexMap<BucketKey, ColorBucket> {
        &self.buckets
    }

    /// Resample one image onto the analysis grid and fold its samples in.
    ///
    /// Only fully opaque samples (alpha == 255) contribute to the totals.
    /// The edge heuristic compares each opaque sample against the raw
    /// previous grid sample in scan order — a deliberate 1-D gradient
    /// approximation, restarted per image so the first sample of each
    /// image is never edge-checked. The previous sample's opacity is not
    /// consulted; the comparison reads the grid buffer by index.
    pub fn accumulate(&mut self, image: &PixelBuffer) {
        let grid = resample_to_grid(image);
        let samples = grid.as_raw();

        for i in 0..(ANALYSIS_GRID * ANALYSIS_GRID) as usize {
            let base = i * 4;
            let (r, g, b, a) = (
                samples[base],
                samples[base + 1],
                samples[base + 2],
                samples[base + 3],
            );

            if a < 255 {
                continue;
            }

            self.opaque_samples += 1;

            let lum = luminance(r, g, b);
            self.luminance_sum += lum;
            self.luminance_sq_sum += lum * lum;

            let (_, s, _) = rgb_to_hsl(r, g, b);
            self.saturation_sum += s;

            if i > 0 {
                let prev = i * 4 - 4;
                let diff = samples[base].abs_diff(samples[prev]) as u32
                    + samples[base + 1].abs_diff(samples[prev + 1]) as u32
                    + samples[base + 2].abs_diff(samples[prev + 2]) as u32;
                if diff > EDGE_THRESHOLD {
                    self.edge_count += 1;
                }
            }

            let key = (
                r / BUCKET_SIZE * BUCKET_SIZE,
                g / BUCKET_SIZE * BUCKET_SIZE,
                b / BUCKET_SIZE * BUCKET_SIZE,
            );
            self.buckets
                .entry(key)
                .or_insert(ColorBucket {
                    count: 0,
                    red: r,
                    green: g,
                    blue: b,
                })
                .count += 1;
        }
    }

    /// Derive the final metrics, each rounded and clamped to 0–100.
    ///
    /// Fails explicitly when every sample was transparent; dividing by a
    /// zero sample count must never leak NaN metrics downstream.
    pub fn finalize(&self) -> Result<Metrics, AnalysisError> {
        if self.opaque_samples == 0 {
            return Err(AnalysisError::NoOpaquePixels);
        }
        let n = self.opaque_samples as f64;

        let mean_luminance = self.luminance_sum / n;
        let brightness = mean_luminance / 255.0 * 100.0;

        // Population variance of the luminance samples around their mean.
        let variance = (self.luminance_sq_sum / n - mean_luminance * mean_luminance).max(0.0);
        let contrast = (variance.sqrt() / 128.0 * 100.0 * 1.5).min(100.0);

        let saturation = self.saturation_sum / n;

        let density = (self.edge_count as f64 / n * 100.0 * 3.0).min(100.0);

        let metrics = Metrics {
            brightness: to_metric(brightness),
            contrast: to_metric(contrast),
            saturation: to_metric(saturation),
            density: to_metric(density),
        };

        tracing::debug!(
            samples = self.opaque_samples,
            brightness = metrics.brightness,
            contrast = metrics.contrast,
            saturation = metrics.saturation,
            density = metrics.density,
            "Finalized sample statistics"
        );

        Ok(metrics)
    }
}

fn to_metric(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Downsample a decoded image onto the fixed analysis grid.
///
/// Bilinear is cheap and consistent; the metrics contract only requires
/// that the same filter is applied to every image of every pass.
fn resample_to_grid(image: &PixelBuffer) -> RgbaImage {
    imageops::resize(
        image.as_image(),
        ANALYSIS_GRID,
        ANALYSIS_GRID,
        FilterType::Triangle,
    )
}
