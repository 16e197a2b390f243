//! Fixed layout of the 1200×630 share card.
//!
//! Every value here is compatibility contract: cards rendered from the
//! same fingerprint must stay pixel-equivalent across versions, so none
//! of these are tunable parameters. Vertical text positions are
//! baselines, canvas-style.

pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;

pub const BACKGROUND: [u8; 3] = [0xF7, 0xF7, 0xF7];
pub const INK: [u8; 3] = [0x11, 0x11, 0x11];
pub const MUTED_TEXT: [u8; 3] = [0x88, 0x88, 0x88];
pub const CHIP_FILL: [u8; 3] = [0xEA, 0xEA, 0xEA];
pub const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];

// ── Media stack (center right) ──────────────────────────────────────

pub const MEDIA_X: f32 = 600.0;
pub const MEDIA_Y: f32 = 65.0;
pub const MEDIA_SIZE: f32 = 500.0;
pub const TILE_RADIUS: f32 = 48.0;

pub const SHADOW_ALPHA: f32 = 0.08;
pub const SHADOW_BLUR: f32 = 40.0;
pub const SHADOW_OFFSET_Y: f32 = 20.0;

// ── Left text column ────────────────────────────────────────────────

pub const TEXT_X: i64 = 64;
pub const TITLE_BASELINE: i64 = 160;
pub const TITLE_SIZE: u32 = 48;
pub const SUBTITLE_OFFSET: i64 = 40;
pub const SUBTITLE_SIZE: u32 = 24;

pub const CIRCLE_ROW_OFFSET: i64 = 80;
pub const CIRCLE_DIAMETER: i64 = 64;
pub const CIRCLE_GUTTER: i64 = 16;
pub const CIRCLE_STROKE: f32 = 2.0;

pub const CHIP_ROW_OFFSET: i64 = 48;
pub const CHIP_TEXT_SIZE: u32 = 20;
pub const CHIP_PAD_X: i64 = 24;
pub const CHIP_HEIGHT: i64 = 44;
pub const CHIP_BASELINE_OFFSET: i64 = 28;
pub const CHIP_GAP: i64 = 16;
/// Chips wrap to a new line once the next chip would cross this x.
pub const CHIP_WRAP_LIMIT: i64 = 550;

pub const METRICS_OFFSET: i64 = 96;
pub const METRICS_SIZE: u32 = 20;

pub const FOOTER_TEXT: &str = "stylecard.ai";
pub const FOOTER_SIZE: u32 = 24;
pub const FOOTER_BOTTOM_MARGIN: i64 = 48;
pub const FOOTER_OPACITY: f32 = 0.6;

pub const TITLE_TEXT: &str = "Style DNA";
pub const SUBTITLE_TEXT: &str = "Analyzed by StyleCard";

/// Placement of one source-image tile in the media stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    /// Which source image this tile shows.
    pub image_index: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub rotation_deg: f32,
}

/// Tile placements for a batch, in draw order (back to front).
///
/// The first source image is always the topmost, least-inset,
/// least-rotated tile; later images recede into the stack.
pub fn media_stack(image_count: usize) -> Vec<TilePlacement> {
    let tile = |image_index, dx: f32, dy: f32, inset: f32, rotation_deg| TilePlacement {
        image_index,
        x: MEDIA_X + dx,
        y: MEDIA_Y + dy,
        size: MEDIA_SIZE - inset,
        rotation_deg,
    };

    match image_count {
        1 => vec![tile(0, 0.0, 0.0, 0.0, 0.0)],
        2 => vec![
            tile(1, 40.0, 0.0, 40.0, 4.0),
            tile(0, 0.0, 20.0, 20.0, -2.0),
        ],
        3 => vec![
            tile(2, 80.0, -20.0, 60.0, 6.0),
            tile(1, 40.0, 0.0, 40.0, 2.0),
            tile(0, 0.0, 20.0, 20.0, -3.0),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_image_is_unrotated_and_full_size() {
        let stack = media_stack(1);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack[0].rotation_deg, 0.0);
        assert_eq!(stack[0].size, MEDIA_SIZE);
        assert_eq!((stack[0].x, stack[0].y), (MEDIA_X, MEDIA_Y));
    }

    #[test]
    fn first_image_is_always_drawn_last() {
        for count in 1..=3 {
            let stack = media_stack(count);
            assert_eq!(stack.last().unwrap().image_index, 0);
        }
    }

    #[test]
    fn three_image_stack_geometry() {
        let stack = media_stack(3);
        assert_eq!(stack.len(), 3);

        assert_eq!(stack[0].image_index, 2);
        assert_eq!((stack[0].x, stack[0].y), (680.0, 45.0));
        assert_eq!(stack[0].size, 440.0);
        assert_eq!(stack[0].rotation_deg, 6.0);

        assert_eq!(stack[1].image_index, 1);
        assert_eq!((stack[1].x, stack[1].y), (640.0, 65.0));
        assert_eq!(stack[1].size, 460.0);
        assert_eq!(stack[1].rotation_deg, 2.0);

        assert_eq!(stack[2].image_index, 0);
        assert_eq!((stack[2].x, stack[2].y), (600.0, 85.0));
        assert_eq!(stack[2].size, 480.0);
        assert_eq!(stack[2].rotation_deg, -3.0);
    }

    #[test]
    fn two_image_stack_geometry() {
        let stack = media_stack(2);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack[0].image_index, 1);
        assert_eq!(stack[0].rotation_deg, 4.0);
        assert_eq!(stack[0].size, 460.0);
        assert_eq!(stack[1].image_index, 0);
        assert_eq!(stack[1].rotation_deg, -2.0);
        assert_eq!((stack[1].x, stack[1].y), (600.0, 85.0));
    }

    #[test]
    fn unsupported_counts_have_no_placements() {
        assert!(media_stack(0).is_empty());
        assert!(media_stack(4).is_empty());
    }
}
