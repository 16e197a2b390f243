//! Palette extraction from accumulated color buckets.
//!
//! This is a ranked-greedy heuristic, not a clustering algorithm: the
//! bucket quantization (32 per channel), the top-8 candidate pool and the
//! Manhattan distance floor of 60 are all part of the fingerprint's
//! compatibility contract and must not be tuned independently.

use indexmap::IndexMap;

use super::color::{rgb_to_hex, rgb_to_hsl};
use super::sampler::{BucketKey, ColorBucket};
use super::types::{PaletteColor, PaletteRole};

/// Number of palette entries produced, always.
pub const PALETTE_LEN: usize = 5;

/// How many top-ranked buckets are considered for the distinct walk.
const CANDIDATE_POOL: usize = 8;

/// Minimum Manhattan RGB distance for a candidate to count as visually
/// distinct from every already-accepted color.
const DISTINCT_DISTANCE: u32 = 60;

/// HSL saturation above which a low-rank palette entry is an accent
/// rather than muted.
const ACCENT_SATURATION: f64 = 30.0;

/// Build the ranked five-color palette from the bucket map.
///
/// Candidates are walked in rank order; a candidate is accepted when it
/// is distinct from all accepted colors (the leader unconditionally). If
/// fewer than five distinct colors exist, the list is padded from the top
/// of the candidate pool — duplicate entries are an accepted tolerance
/// for low-variety images, so the padding is deliberately not deduped.
pub fn extract_palette(
    buckets: &IndexMap<BucketKey, ColorBucket>,
    total_pixels: u64,
) -> Vec<PaletteColor> {
    let mut ranked: Vec<&ColorBucket> = buckets.values().collect();
    // Stable sort: equal counts keep their first-seen order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(CANDIDATE_POOL);

    let mut distinct: Vec<&ColorBucket> = Vec::with_capacity(PALETTE_LEN);
    for &candidate in &ranked {
        if distinct.is_empty() {
            distinct.push(candidate);
            continue;
        }
        let is_distinct = distinct
            .iter()
            .all(|accepted| manhattan(accepted, candidate) >= DISTINCT_DISTANCE);
        if is_distinct && distinct.len() < PALETTE_LEN {
            distinct.push(candidate);
        }
    }

    if !ranked.is_empty() {
        let mut i = 0;
        while distinct.len() < PALETTE_LEN {
            distinct.push(ranked[i % ranked.len()]);
            i += 1;
        }
    }

    distinct
        .iter()
        .take(PALETTE_LEN)
        .enumerate()
        .map(|(index, bucket)| {
            let pct = (bucket.count as f64 / total_pixels as f64 * 100.0)
                .round()
                .max(1.0) as u8;
            PaletteColor {
                hex: rgb_to_hex(bucket.red, bucket.green, bucket.blue),
                pct,
                role: role_for(index, bucket),
            }
        })
        .collect()
}

fn role_for(index: usize, bucket: &ColorBucket) -> PaletteRole {
    match index {
        0 => PaletteRole::Dominant,
        1 => PaletteRole::Secondary,
        _ => {
            let (_, s, _) = rgb_to_hsl(bucket.red, bucket.green, bucket.blue);
            if s > ACCENT_SATURATION {
                PaletteRole::Accent
            } else {
                PaletteRole::Muted
            }
        }
    }
}

fn manhattan(a: &ColorBucket, b: &ColorBucket) -> u32 {
    a.red.abs_diff(b.red) as u32
        + a.green.abs_diff(b.green) as u32
        + a.blue.abs_diff(b.blue) as u32
}
