// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast engine - WCAG 1.4.3 Contrast (Minimum) (Level AA)
//!
//! Parses a color literal in hex (`#rgb`, `#rrggbb`), `rgb()`/`rgba()` or
//! `hsl()`/`hsla()` notation, converts it to an RGB triple, and computes the
//! WCAG relative luminance and contrast ratio.
//! - AA: 4.5:1 for normal text (the only threshold applied here)

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum contrast ratio for normal text at WCAG level AA
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;

/// Canonical channel representation every notation converts to
pub type Rgb = [u8; 3];

/// Failure raised by color parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Unsupported color format: {0}")]
    UnsupportedFormat(String),
}

/// The notation a color literal is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Hex,
    Rgb,
    Hsl,
    Unknown,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Hex => "hex",
            ColorMode::Rgb => "rgb",
            ColorMode::Hsl => "hsl",
            ColorMode::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[A-Fa-f0-9]{3}){1,2}$").expect("valid hex regex"));

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(?:[0-9]{1,3}\s*,\s*){2}[0-9]{1,3}(?:\s*,\s*(?:[0-9]*(?:\.[0-9]+)?)\s*)?\)$",
    )
    .expect("valid rgb regex")
});

static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^hsla?\(\s*[0-9]{1,3}\s*,\s*[0-9]{1,3}%\s*,\s*[0-9]{1,3}%\s*(?:,\s*(?:[0-9]*(?:\.[0-9]+)?)\s*)?\)$",
    )
    .expect("valid hsl regex")
});

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid digits regex"));

/// Detect which notation a color literal uses. Surrounding whitespace is ignored.
pub fn detect_color_mode(input: &str) -> ColorMode {
    let input = input.trim();

    if HEX_RE.is_match(input) {
        ColorMode::Hex
    } else if RGB_RE.is_match(input) {
        ColorMode::Rgb
    } else if HSL_RE.is_match(input) {
        ColorMode::Hsl
    } else {
        ColorMode::Unknown
    }
}

/// Convert a color literal in any supported notation to RGB
pub fn convert_to_rgb(color: &str) -> Result<Rgb, ColorError> {
    let unsupported = || ColorError::UnsupportedFormat(color.to_string());

    match detect_color_mode(color) {
        ColorMode::Hex => hex_to_rgb(color.trim()),
        ColorMode::Rgb => {
            let [r, g, b] = leading_channels(color).ok_or_else(unsupported)?;
            let channel = |v: u32| u8::try_from(v).map_err(|_| unsupported());
            Ok([channel(r)?, channel(g)?, channel(b)?])
        }
        ColorMode::Hsl => {
            let [h, s, l] = leading_channels(color).ok_or_else(unsupported)?;
            Ok(hsl_to_rgb(f64::from(h), f64::from(s), f64::from(l)))
        }
        ColorMode::Unknown => Err(unsupported()),
    }
}

/// First three integer runs of a functional notation (alpha is ignored)
fn leading_channels(color: &str) -> Option<[u32; 3]> {
    let mut values = DIGITS_RE
        .find_iter(color)
        .map(|m| m.as_str().parse::<u32>().ok());
    Some([values.next()??, values.next()??, values.next()??])
}

/// Parse `#rgb` or `#rrggbb` into channels.
///
/// The digits after `#` are read as one integer and split by shifting
/// 16/8/0. Shorthand is not expanded, so `#fff` reads as `0x000fff`
/// (`[0, 15, 255]`), not white.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let hex = hex.trim();
    if !HEX_RE.is_match(hex) {
        return Err(ColorError::UnsupportedFormat(hex.to_string()));
    }

    let value = u32::from_str_radix(&hex[1..], 16)
        .map_err(|_| ColorError::UnsupportedFormat(hex.to_string()))?;

    Ok([
        ((value >> 16) & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    ])
}

/// Convert hue (degrees), saturation and lightness (percent) to RGB.
///
/// Hue selects one of six 60 degree sextants in `[0, 360)`. A hue outside
/// that range selects none, so only the lightness offset remains (grey).
/// Saturation and lightness are clamped to 0..=100.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if !(0.0..360.0).contains(&h) {
        (0.0, 0.0, 0.0)
    } else if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let scale = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [scale(r), scale(g), scale(b)]
}

/// Calculate relative luminance per WCAG 2.x
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let srgb = rgb.map(|c| {
        let v = f64::from(c) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * srgb[0] + 0.7152 * srgb[1] + 0.0722 * srgb[2]
}

/// Calculate contrast ratio between two colors
/// Returns a ratio in 1.0..=21.0
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let l1 = relative_luminance(a);
    let l2 = relative_luminance(b);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether two color literals reach the AA contrast threshold for normal text
pub fn check_contrast_ratio(color1: &str, color2: &str) -> Result<bool, ColorError> {
    let rgb1 = convert_to_rgb(color1)?;
    let rgb2 = convert_to_rgb(color2)?;

    let ratio = contrast_ratio(rgb1, rgb2);
    tracing::debug!(color1, color2, ratio, "computed contrast ratio");
    Ok(ratio >= WCAG_AA_NORMAL_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_check_contrast_black_white() {
        assert_eq!(check_contrast_ratio("#FFFFFF", "#000000"), Ok(true));
        assert_eq!(check_contrast_ratio("rgb(255, 255, 255)", "rgb(0, 0, 0)"), Ok(true));
        assert_eq!(check_contrast_ratio("hsl(0, 0%, 100%)", "hsl(0, 0%, 0%)"), Ok(true));
        assert_eq!(check_contrast_ratio("#000000", "hsl(0, 100%, 100%)"), Ok(true));
    }

    #[test]
    fn test_check_contrast_low() {
        assert_eq!(check_contrast_ratio("#777777", "#888888"), Ok(false));
        assert_eq!(check_contrast_ratio("#FFFFFF", "#FFFFFF"), Ok(false));
        assert_eq!(check_contrast_ratio("#000000", "rgba(1, 1, 1)"), Ok(false));
    }

    #[test]
    fn test_check_contrast_unsupported() {
        let err = check_contrast_ratio("invalidColor", "#000000").unwrap_err();
        assert_eq!(err, ColorError::UnsupportedFormat("invalidColor".to_string()));
        assert_eq!(err.to_string(), "Unsupported color format: invalidColor");

        assert!(check_contrast_ratio("#000000", "cmyk(0, 0, 0, 0)").is_err());
    }

    #[test]
    fn test_contrast_ratio_maximum() {
        let white = convert_to_rgb("#FFFFFF").unwrap();
        let black = convert_to_rgb("#000000").unwrap();
        let ratio = contrast_ratio(white, black);
        assert!((ratio - 21.0).abs() < 1e-9, "Black on white should be 21:1, got {}", ratio);
        assert_eq!(contrast_ratio(white, black), contrast_ratio(black, white));
    }

    #[test]
    fn test_relative_luminance() {
        assert!(relative_luminance([0, 0, 0]).abs() < 1e-9);
        assert!((relative_luminance([255, 255, 255]) - 1.0).abs() < 1e-9);
        assert!((relative_luminance([128, 128, 128]) - 0.2159).abs() < 1e-4);
        assert!((relative_luminance([255, 0, 0]) - 0.2126).abs() < 1e-4);
    }

    #[test]
    fn test_convert_to_rgb() {
        assert_eq!(convert_to_rgb("#000000"), Ok([0, 0, 0]));
        assert_eq!(convert_to_rgb("#FFFFFF"), Ok([255, 255, 255]));
        assert_eq!(convert_to_rgb("rgb(255, 0, 0)"), Ok([255, 0, 0]));
        assert_eq!(convert_to_rgb("rgba(0, 128, 0, 0.5)"), Ok([0, 128, 0]));
        assert_eq!(convert_to_rgb("hsl(0, 100%, 50%)"), Ok([255, 0, 0]));
        assert_eq!(convert_to_rgb("  #ffffff  "), Ok([255, 255, 255]));
    }

    #[test]
    fn test_convert_rejects_unknown_and_out_of_range() {
        assert_eq!(
            convert_to_rgb("cmyk(0, 0, 0, 0)"),
            Err(ColorError::UnsupportedFormat("cmyk(0, 0, 0, 0)".to_string()))
        );
        assert!(convert_to_rgb("rgb(300, 0, 0)").is_err());
        assert!(convert_to_rgb("red").is_err());
    }

    #[test]
    fn test_detect_color_mode() {
        assert_eq!(detect_color_mode("#000000"), ColorMode::Hex);
        assert_eq!(detect_color_mode("#abc"), ColorMode::Hex);
        assert_eq!(detect_color_mode("rgb(255, 0, 0)"), ColorMode::Rgb);
        assert_eq!(detect_color_mode("rgba(255,0,0,.5)"), ColorMode::Rgb);
        assert_eq!(detect_color_mode("hsl(0, 100%, 50%)"), ColorMode::Hsl);
        assert_eq!(detect_color_mode("hsla(120, 50%, 50%, 0.3)"), ColorMode::Hsl);
        assert_eq!(detect_color_mode("cmyk(0, 0, 0, 0)"), ColorMode::Unknown);
        assert_eq!(detect_color_mode("#abcd"), ColorMode::Unknown);
        assert_eq!(detect_color_mode("hsl()"), ColorMode::Unknown);
        assert_eq!(detect_color_mode("rgb(1, 2)"), ColorMode::Unknown);
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#000000"), Ok([0, 0, 0]));
        assert_eq!(hex_to_rgb("#FFFFFF"), Ok([255, 255, 255]));
        assert_eq!(hex_to_rgb("#FF0000"), Ok([255, 0, 0]));
        assert!(hex_to_rgb("#zzzzzz").is_err());
        assert!(hex_to_rgb("##fff").is_err());
        assert!(hex_to_rgb("#+fffff").is_err());
        assert!(hex_to_rgb("ffffff").is_err());
    }

    #[test]
    fn test_hsl_to_rgb_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 100.0, 50.0), [255, 0, 0]);
        assert_eq!(hsl_to_rgb(120.0, 100.0, 50.0), [0, 255, 0]);
        assert_eq!(hsl_to_rgb(240.0, 100.0, 50.0), [0, 0, 255]);
    }

    #[test]
    fn test_hsl_to_rgb_sextants() {
        assert_eq!(hsl_to_rgb(60.0, 100.0, 50.0), [255, 255, 0]);
        assert_eq!(hsl_to_rgb(180.0, 100.0, 50.0), [0, 255, 255]);
        assert_eq!(hsl_to_rgb(300.0, 100.0, 50.0), [255, 0, 255]);
        assert_eq!(hsl_to_rgb(359.0, 100.0, 50.0), [255, 0, 4]);
        assert_eq!(hsl_to_rgb(0.0, 0.0, 50.0), [128, 128, 128]);
    }

    #[test]
    fn test_hsl_hue_outside_sextants() {
        assert_eq!(hsl_to_rgb(360.0, 100.0, 50.0), [0, 0, 0]);
        assert_eq!(hsl_to_rgb(-10.0, 100.0, 50.0), [0, 0, 0]);
        assert_eq!(convert_to_rgb("hsl(400, 100%, 50%)"), Ok([0, 0, 0]));
        assert_eq!(convert_to_rgb("hsl(720, 0%, 40%)"), Ok([102, 102, 102]));
    }

    #[test]
    fn test_hex_shorthand_is_not_expanded() {
        assert_eq!(hex_to_rgb("#fff"), Ok([0, 15, 255]));
        assert_eq!(hex_to_rgb("#f0a"), Ok([0, 15, 10]));
        assert_eq!(convert_to_rgb(" #000 "), Ok([0, 0, 0]));
        assert_eq!(check_contrast_ratio("#fff", "#000"), Ok(false));
        assert_eq!(check_contrast_ratio("#ffffff", "#000"), Ok(true));
    }

    proptest! {
        #[test]
        fn test_color_grammars_are_exclusive(
            input in r"(#[0-9a-fA-F]{3,6}|rgba?\([0-9]{1,3}, ?[0-9]{1,3}, ?[0-9]{1,3}(, ?0?\.[0-9])?\)|hsla?\([0-9]{1,3}, ?[0-9]{1,3}%, ?[0-9]{1,3}%(, ?0?\.[0-9])?\)|[#a-z0-9(), %.]{0,16})"
        ) {
            let input = input.trim();
            let matches = [&*HEX_RE, &*RGB_RE, &*HSL_RE]
                .iter()
                .filter(|re| re.is_match(input))
                .count();
            prop_assert!(matches <= 1, "{input:?} matched {matches} grammars");

            let mode = detect_color_mode(input);
            prop_assert_eq!(mode == ColorMode::Unknown, matches == 0);
        }
    }
}
