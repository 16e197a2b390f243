//! Color space conversions shared by the sampler, palette extraction and
//! card rendering.
//!
//! The exact formulas are part of the fingerprint's compatibility
//! contract: metric values and palette roles depend on them, so they are
//! not interchangeable with other RGB↔HSL variants.

/// ITU-R BT.601 luminance of an RGB sample, on the 0–255 scale.
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Convert RGB to HSL: hue in degrees (0–360), saturation and lightness
/// as percentages (0–100).
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // Achromatic: hue is undefined, reported as 0.
        return (0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0 * 360.0, s * 100.0, l * 100.0)
}

/// Uppercase `#RRGGBB` for an RGB triple.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Parse an uppercase or lowercase `#RRGGBB` string back to RGB.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_weights_green_highest() {
        assert!(luminance(0, 255, 0) > luminance(255, 0, 0));
        assert!(luminance(255, 0, 0) > luminance(0, 0, 255));
        assert_eq!(luminance(255, 255, 255), 255.0);
        assert_eq!(luminance(0, 0, 0), 0.0);
    }

    #[test]
    fn pure_red_is_fully_saturated() {
        let (h, s, l) = rgb_to_hsl(255, 0, 0);
        assert_eq!(h, 0.0);
        assert_eq!(s, 100.0);
        assert_eq!(l, 50.0);
    }

    #[test]
    fn grays_have_zero_saturation() {
        for value in [0u8, 64, 128, 200, 255] {
            let (_, s, _) = rgb_to_hsl(value, value, value);
            assert_eq!(s, 0.0, "gray {value} should be achromatic");
        }
    }

    #[test]
    fn pure_green_and_blue_hues() {
        let (h, _, _) = rgb_to_hsl(0, 255, 0);
        assert_eq!(h, 120.0);
        let (h, _, _) = rgb_to_hsl(0, 0, 255);
        assert_eq!(h, 240.0);
    }

    #[test]
    fn hex_is_uppercase_and_padded() {
        assert_eq!(rgb_to_hex(255, 0, 10), "#FF000A");
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
    }

    #[test]
    fn hex_round_trip_is_lossless() {
        for (r, g, b) in [(0, 0, 0), (255, 255, 255), (18, 52, 86), (250, 1, 99)] {
            let hex = rgb_to_hex(r, g, b);
            assert_eq!(parse_hex(&hex), Some((r, g, b)));
        }
    }

    #[test]
    fn parse_hex_rejects_malformed_input() {
        assert_eq!(parse_hex("FF0000"), None);
        assert_eq!(parse_hex("#FF00"), None);
        assert_eq!(parse_hex("#GG0000"), None);
    }
}
