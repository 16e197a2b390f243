//! Vibe tagging: a fixed, ordered rule table over the four metrics.
//!
//! Rules for different metrics are independent and may all fire; the two
//! branches of one metric are mutually exclusive. The table order, the
//! thresholds and the tag strings are all part of the fingerprint's
//! compatibility contract.

use super::types::Metrics;

/// Maximum number of tags a fingerprint carries.
pub const MAX_TAGS: usize = 4;

/// Derive the descriptive tags for a set of metrics.
///
/// Returns at most [`MAX_TAGS`] tags in first-seen order with duplicates
/// removed; a perfectly average set of metrics yields exactly
/// `["Balanced", "Neutral"]`.
pub fn derive_vibe_tags(metrics: &Metrics) -> Vec<String> {
    let mut tags: Vec<&str> = Vec::new();

    if metrics.brightness < 30 {
        tags.extend(["Dark Mode", "Moody"]);
    } else if metrics.brightness > 85 {
        tags.extend(["Clean", "Airy"]);
    }

    if metrics.saturation < 15 {
        tags.extend(["Monochrome", "Muted"]);
    } else if metrics.saturation > 70 {
        tags.extend(["Vibrant", "Playful"]);
    }

    if metrics.contrast > 70 {
        tags.extend(["High-Contrast", "Editorial"]);
    }

    if metrics.density < 30 {
        tags.extend(["Minimalist", "Spacious"]);
    } else if metrics.density > 75 {
        tags.extend(["Data-Dense", "Complex"]);
    }

    if tags.is_empty() {
        tags.extend(["Balanced", "Neutral"]);
    }

    let mut deduped: Vec<String> = Vec::with_capacity(MAX_TAGS);
    for tag in tags {
        if deduped.len() == MAX_TAGS {
            break;
        }
        if !deduped.iter().any(|seen| seen == tag) {
            deduped.push(tag.to_string());
        }
    }
    deduped
}
