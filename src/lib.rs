//! StyleCard analysis core.
//!
//! Everything here is a pure, synchronous function of pixel data: the
//! analysis half turns 1–3 decoded screenshots into a [`StyleDna`]
//! fingerprint (palette, metrics, vibe tags, confidence), and the card
//! half composites a fingerprint plus its source images into a single
//! shareable 1200×630 PNG. No network, no filesystem, no persistence —
//! the surrounding application owns all of that.

pub mod analysis;
pub mod card;

pub use analysis::{
    AnalysisError, EncodedImage, ImageDecoder, Metrics, PaletteColor, PaletteRole, PixelBuffer,
    StyleAnalyzer, StyleDna,
};
pub use card::{CompositionError, ShareCardRenderer};
