//! Share-card composition: one fingerprint in, one 1200×630 PNG out.
//!
//! A separate pass from analysis — it only reads a finished [`StyleDna`]
//! and re-decodes the source images embedded in it. Rendering either
//! completes fully or fails; there are no partial cards.

use image::RgbaImage;

use crate::analysis::color::parse_hex;
use crate::analysis::types::{ImageDecoder, PixelBuffer, StyleDna};
use crate::analysis::PixelDecoder;

use super::draw::{fill_circle, fill_rounded_rect, stroke_circle, TileRender};
use super::layout;
use super::text::{draw_text, measure_text};
use super::CompositionError;

/// Renders share cards from fingerprints.
pub struct ShareCardRenderer {
    decoder: Box<dyn ImageDecoder>,
}

impl ShareCardRenderer {
    /// Renderer with the production image decoder.
    pub fn new() -> Self {
        Self::with_decoder(Box::new(PixelDecoder))
    }

    /// Renderer with a custom decoding backend.
    pub fn with_decoder(decoder: Box<dyn ImageDecoder>) -> Self {
        Self { decoder }
    }

    /// Composite the card and return its PNG bytes.
    pub fn render(&self, dna: &StyleDna) -> Result<Vec<u8>, CompositionError> {
        let image_count = dna.original_images.len();
        if image_count == 0 {
            return Err(CompositionError::NoSourceImages);
        }
        if image_count > 3 {
            return Err(CompositionError::TooManySourceImages(image_count));
        }

        tracing::info!(image_count, "Rendering share card");

        let sources: Vec<PixelBuffer> = dna
            .original_images
            .iter()
            .map(|image| {
                self.decoder
                    .decode(image.bytes())
                    .map_err(|e| CompositionError::ImageDecode(e.to_string()))
            })
            .collect::<Result<_, _>>()?;

        let mut canvas = RgbaImage::from_pixel(
            layout::CARD_WIDTH,
            layout::CARD_HEIGHT,
            image::Rgba([
                layout::BACKGROUND[0],
                layout::BACKGROUND[1],
                layout::BACKGROUND[2],
                255,
            ]),
        );

        self.draw_media_stack(&mut canvas, &sources);
        self.draw_text_column(&mut canvas, dna)?;

        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(canvas)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .map_err(|e| CompositionError::PngEncode(e.to_string()))?;

        let bytes = bytes.into_inner();
        tracing::info!(png_bytes = bytes.len(), "Share card rendered");
        Ok(bytes)
    }

    fn draw_media_stack(&self, canvas: &mut RgbaImage, sources: &[PixelBuffer]) {
        for placement in layout::media_stack(sources.len()) {
            draw_tile_placement(canvas, &sources[placement.image_index], &placement);
        }
    }

    fn draw_text_column(
        &self,
        canvas: &mut RgbaImage,
        dna: &StyleDna,
    ) -> Result<(), CompositionError> {
        let mut current_y = layout::TITLE_BASELINE;
        draw_text(
            canvas,
            layout::TITLE_TEXT,
            layout::TEXT_X,
            current_y,
            layout::TITLE_SIZE,
            layout::INK,
            1.0,
        );

        current_y += layout::SUBTITLE_OFFSET;
        draw_text(
            canvas,
            layout::SUBTITLE_TEXT,
            layout::TEXT_X,
            current_y,
            layout::SUBTITLE_SIZE,
            layout::MUTED_TEXT,
            1.0,
        );

        // Palette strip.
        current_y += layout::CIRCLE_ROW_OFFSET;
        let radius = layout::CIRCLE_DIAMETER as f32 / 2.0;
        for (i, color) in dna.palette.iter().enumerate() {
            let (r, g, b) = parse_hex(&color.hex)
                .ok_or_else(|| CompositionError::InvalidPaletteColor(color.hex.clone()))?;
            let cx = (layout::TEXT_X
                + i as i64 * (layout::CIRCLE_DIAMETER + layout::CIRCLE_GUTTER))
                as f32
                + radius;
            let cy = current_y as f32 + radius;
            fill_circle(canvas, cx, cy, radius, [r, g, b]);
            stroke_circle(canvas, cx, cy, radius, layout::CIRCLE_STROKE, layout::WHITE);
        }

        // Tag chips, wrapping at the column's right edge.
        current_y += layout::CIRCLE_DIAMETER + layout::CHIP_ROW_OFFSET;
        let mut tag_x = layout::TEXT_X;
        for tag in &dna.vibe_tags {
            let width = measure_text(tag, layout::CHIP_TEXT_SIZE) + layout::CHIP_PAD_X * 2;
            if tag_x + width > layout::CHIP_WRAP_LIMIT {
                tag_x = layout::TEXT_X;
                current_y += layout::CHIP_HEIGHT + layout::CHIP_GAP;
            }

            fill_rounded_rect(
                canvas,
                tag_x as f32,
                current_y as f32,
                width as f32,
                layout::CHIP_HEIGHT as f32,
                layout::CHIP_HEIGHT as f32 / 2.0,
                layout::CHIP_FILL,
            );
            draw_text(
                canvas,
                tag,
                tag_x + layout::CHIP_PAD_X,
                current_y + layout::CHIP_BASELINE_OFFSET,
                layout::CHIP_TEXT_SIZE,
                layout::INK,
                1.0,
            );

            tag_x += width + layout::CHIP_GAP;
        }

        // Metrics summary.
        current_y += layout::METRICS_OFFSET;
        let metrics_line = format!(
            "Density: {} • Contrast: {} • Saturation: {}",
            dna.metrics.density, dna.metrics.contrast, dna.metrics.saturation
        );
        draw_text(
            canvas,
            &metrics_line,
            layout::TEXT_X,
            current_y,
            layout::METRICS_SIZE,
            layout::MUTED_TEXT,
            1.0,
        );

        // Footer brand mark.
        draw_text(
            canvas,
            layout::FOOTER_TEXT,
            layout::TEXT_X,
            layout::CARD_HEIGHT as i64 - layout::FOOTER_BOTTOM_MARGIN,
            layout::FOOTER_SIZE,
            layout::INK,
            layout::FOOTER_OPACITY,
        );

        Ok(())
    }
}

impl Default for ShareCardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_tile_placement(
    canvas: &mut RgbaImage,
    source: &PixelBuffer,
    placement: &layout::TilePlacement,
) {
    super::draw::draw_tile(
        canvas,
        &TileRender {
            source: source.as_image(),
            x: placement.x,
            y: placement.y,
            size: placement.size,
            radius: layout::TILE_RADIUS,
            rotation_deg: placement.rotation_deg,
            shadow_alpha: layout::SHADOW_ALPHA,
            shadow_blur: layout::SHADOW_BLUR,
            shadow_offset_y: layout::SHADOW_OFFSET_Y,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{EncodedImage, Metrics, PaletteColor, PaletteRole};
    use crate::analysis::StyleAnalyzer;
    use image::Rgba;

    fn png_image(width: u32, height: u32, fill: [u8; 4]) -> EncodedImage {
        let image = RgbaImage::from_pixel(width, height, Rgba(fill));
        let mut cursor = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut cursor, image::ImageFormat::Png)
            .unwrap();
        EncodedImage::new(cursor.into_inner())
    }

    fn make_dna(images: Vec<EncodedImage>) -> StyleDna {
        StyleDna {
            palette: vec![
                PaletteColor {
                    hex: "#FF0000".into(),
                    pct: 60,
                    role: PaletteRole::Dominant,
                },
                PaletteColor {
                    hex: "#00FF00".into(),
                    pct: 20,
                    role: PaletteRole::Secondary,
                },
                PaletteColor {
                    hex: "#0000FF".into(),
                    pct: 10,
                    role: PaletteRole::Accent,
                },
                PaletteColor {
                    hex: "#888888".into(),
                    pct: 5,
                    role: PaletteRole::Muted,
                },
                PaletteColor {
                    hex: "#111111".into(),
                    pct: 5,
                    role: PaletteRole::Muted,
                },
            ],
            metrics: Metrics {
                brightness: 55,
                contrast: 40,
                saturation: 62,
                density: 33,
            },
            vibe_tags: vec!["Balanced".into(), "Neutral".into()],
            confidence_score: 75,
            original_images: images,
        }
    }

    fn decode_card(bytes: &[u8]) -> RgbaImage {
        image::load_from_memory(bytes).unwrap().to_rgba8()
    }

    #[test]
    fn card_is_a_1200_by_630_png() {
        let dna = make_dna(vec![png_image(100, 80, [40, 90, 160, 255])]);
        let bytes = ShareCardRenderer::new().render(&dna).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
        let card = decode_card(&bytes);
        assert_eq!(card.width(), 1200);
        assert_eq!(card.height(), 630);
    }

    #[test]
    fn background_is_flat_neutral() {
        let dna = make_dna(vec![png_image(50, 50, [10, 10, 10, 255])]);
        let card = decode_card(&ShareCardRenderer::new().render(&dna).unwrap());

        // Top-left corner is untouched by every layer.
        assert_eq!(card.get_pixel(5, 5).0, [0xF7, 0xF7, 0xF7, 255]);
        assert_eq!(card.get_pixel(1195, 625).0, [0xF7, 0xF7, 0xF7, 255]);
    }

    #[test]
    fn palette_circles_carry_palette_colors() {
        let dna = make_dna(vec![png_image(50, 50, [128, 128, 128, 255])]);
        let card = decode_card(&ShareCardRenderer::new().render(&dna).unwrap());

        // Circle row top is at y=280; centers at x = 64 + 80*i + 32.
        for (i, expected) in [
            [255u8, 0, 0],
            [0, 255, 0],
            [0, 0, 255],
            [0x88, 0x88, 0x88],
            [0x11, 0x11, 0x11],
        ]
        .iter()
        .enumerate()
        {
            let cx = (64 + 80 * i + 32) as u32;
            let pixel = card.get_pixel(cx, 312).0;
            assert_eq!(&pixel[..3], expected, "circle {i}");
        }
    }

    #[test]
    fn media_region_shows_the_source_image() {
        let dna = make_dna(vec![png_image(64, 64, [20, 140, 220, 255])]);
        let card = decode_card(&ShareCardRenderer::new().render(&dna).unwrap());

        // Center of the single 500px tile at (600, 65).
        assert_eq!(card.get_pixel(850, 315).0, [20, 140, 220, 255]);
    }

    #[test]
    fn empty_fingerprint_cannot_be_rendered() {
        let dna = make_dna(vec![]);
        let result = ShareCardRenderer::new().render(&dna);
        assert!(matches!(result, Err(CompositionError::NoSourceImages)));
    }

    #[test]
    fn four_source_images_are_rejected() {
        let dna = make_dna(vec![png_image(8, 8, [0, 0, 0, 255]); 4]);
        let result = ShareCardRenderer::new().render(&dna);
        assert!(matches!(
            result,
            Err(CompositionError::TooManySourceImages(4))
        ));
    }

    #[test]
    fn undecodable_source_fails_without_partial_render() {
        let mut dna = make_dna(vec![png_image(8, 8, [0, 0, 0, 255])]);
        dna.original_images.push(EncodedImage::new(vec![0x00, 0x01]));
        let result = ShareCardRenderer::new().render(&dna);
        assert!(matches!(result, Err(CompositionError::ImageDecode(_))));
    }

    #[test]
    fn malformed_palette_hex_is_rejected() {
        let mut dna = make_dna(vec![png_image(8, 8, [0, 0, 0, 255])]);
        dna.palette[2].hex = "bad".into();
        let result = ShareCardRenderer::new().render(&dna);
        assert!(matches!(
            result,
            Err(CompositionError::InvalidPaletteColor(_))
        ));
    }

    #[test]
    fn rendering_is_byte_identical_across_runs() {
        let dna = make_dna(vec![
            png_image(30, 60, [200, 60, 20, 255]),
            png_image(90, 40, [20, 60, 200, 255]),
        ]);
        let renderer = ShareCardRenderer::new();
        let first = renderer.render(&dna).unwrap();
        let second = renderer.render(&dna).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn three_tiles_render_back_to_front() {
        let dna = make_dna(vec![
            png_image(50, 50, [255, 0, 0, 255]),
            png_image(50, 50, [0, 255, 0, 255]),
            png_image(50, 50, [0, 0, 255, 255]),
        ]);
        let card = decode_card(&ShareCardRenderer::new().render(&dna).unwrap());

        // The first image's tile (600,85)..(1080,565) sits on top; its
        // center shows image 0.
        assert_eq!(card.get_pixel(840, 325).0, [255, 0, 0, 255]);
    }

    #[test]
    fn end_to_end_analysis_to_card() {
        let images = vec![
            png_image(120, 90, [245, 245, 245, 255]),
            png_image(64, 64, [30, 30, 34, 255]),
        ];
        let dna = StyleAnalyzer::new().analyze(&images).unwrap();
        let bytes = ShareCardRenderer::new().render(&dna).unwrap();

        let card = decode_card(&bytes);
        assert_eq!((card.width(), card.height()), (1200, 630));
    }
}
