//! Confidence scoring: a fixed lookup from input breadth to a score.
//!
//! More screenshots give the fingerprint more evidence, so confidence
//! steps up with the image count. The three values are presentation
//! contract — surfaces display them verbatim.

/// Score for a single-image analysis.
pub const SINGLE_IMAGE: u8 = 75;

/// Score for a two-image analysis.
pub const TWO_IMAGES: u8 = 85;

/// Score for a full three-image analysis.
pub const THREE_IMAGES: u8 = 92;

/// Map the number of analyzed images to a confidence score.
///
/// The orchestrator guarantees counts of 1–3; the middle value covers
/// everything that is neither one nor three.
pub fn confidence_score(image_count: usize) -> u8 {
    match image_count {
        1 => SINGLE_IMAGE,
        3 => THREE_IMAGES,
        _ => TWO_IMAGES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_steps_with_image_count() {
        assert_eq!(confidence_score(1), 75);
        assert_eq!(confidence_score(2), 85);
        assert_eq!(confidence_score(3), 92);
    }

    #[test]
    fn seventy_five_only_for_single_image() {
        for count in 2..=3 {
            assert_ne!(confidence_score(count), SINGLE_IMAGE);
        }
    }

    #[test]
    fn ninety_two_only_for_three_images() {
        for count in 1..=2 {
            assert_ne!(confidence_score(count), THREE_IMAGES);
        }
    }
}
