pub mod compositor;
pub(crate) mod draw;
pub mod layout;
pub(crate) mod text;

pub use compositor::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("card needs at least one source image")]
    NoSourceImages,

    #[error("card supports at most three source images, got {0}")]
    TooManySourceImages(usize),

    #[error("source image cannot be decoded: {0}")]
    ImageDecode(String),

    #[error("palette color is not valid #RRGGBB hex: {0}")]
    InvalidPaletteColor(String),

    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
}
