//! Card typography from embedded 8×8 glyph bitmaps.
//!
//! Glyphs come from the `font8x8` const tables — no font files, no
//! filesystem access, and a fixed advance per character, so both
//! rendering and measurement are deterministic. Each glyph cell is
//! scaled from its 8×8 grid to the requested pixel size with nearest
//! sampling; the advance equals the pixel size.

use font8x8::legacy::BASIC_LEGACY;
use image::RgbaImage;

use super::draw::blend_pixel;

/// Side length of the source glyph grid.
const GLYPH_CELL: u32 = 8;

/// Substitute for characters outside the basic table: a centered square
/// dot, sized for the `•` separator in the metrics line.
const FALLBACK_DOT: [u8; 8] = [0x00, 0x00, 0x00, 0x18, 0x18, 0x00, 0x00, 0x00];

/// Width in pixels of `text` rendered at `size`.
pub fn measure_text(text: &str, size: u32) -> i64 {
    text.chars().count() as i64 * size as i64
}

/// Render `text` with its left edge at `x` and its baseline at
/// `baseline`, at `size` pixels per glyph cell.
pub fn draw_text(
    canvas: &mut RgbaImage,
    text: &str,
    x: i64,
    baseline: i64,
    size: u32,
    color: [u8; 3],
    opacity: f32,
) {
    let top = baseline - size as i64;

    for (index, ch) in text.chars().enumerate() {
        let glyph = match ch as u32 {
            code @ 0..=127 => BASIC_LEGACY[code as usize],
            _ => FALLBACK_DOT,
        };
        let origin_x = x + index as i64 * size as i64;

        for dy in 0..size {
            let gy = (dy * GLYPH_CELL / size) as usize;
            let row = glyph[gy];
            if row == 0 {
                continue;
            }
            for dx in 0..size {
                let gx = dx * GLYPH_CELL / size;
                if row >> gx & 1 == 1 {
                    blend_pixel(
                        canvas,
                        origin_x + dx as i64,
                        top + dy as i64,
                        color,
                        opacity,
                    );
                }
            }
        }
    }
}
