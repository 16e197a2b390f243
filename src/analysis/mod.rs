pub mod color;
pub mod confidence;
pub mod decode;
pub mod orchestrator;
pub mod palette;
pub mod sampler;
pub mod types;
pub mod vibe;

pub use confidence::*;
pub use decode::*;
pub use orchestrator::*;
pub use palette::*;
pub use sampler::*;
pub use types::*;
pub use vibe::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("image decoding failed: {0}")]
    Decode(String),

    #[error("expected 1 to 3 images, got {0}")]
    InvalidInputCount(usize),

    #[error("no opaque pixels to analyze")]
    NoOpaquePixels,
}
