//! 8-bit sRGB color type

use std::fmt;
use std::str::FromStr;

use crate::error::{ColorError, ParseColorError};

/// An 8-bit sRGB color.
///
/// This is the working type of the whole pipeline: quantizer centroids are
/// rounded to it, merge distances are measured between values of it and the
/// named-color table is stored in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Create a color from unit-range float channels.
    ///
    /// Each channel must be finite and inside `0.0..=1.0`; anything else is
    /// malformed pixel data and yields [`ColorError::InvalidColor`].
    ///
    /// ```
    /// use hue_engine::Rgb;
    ///
    /// assert_eq!(Rgb::from_unit(1.0, 0.0, 0.5).unwrap(), Rgb::new(255, 0, 128));
    /// assert!(Rgb::from_unit(1.2, 0.0, 0.0).is_err());
    /// assert!(Rgb::from_unit(f32::NAN, 0.0, 0.0).is_err());
    /// ```
    pub fn from_unit(r: f32, g: f32, b: f32) -> Result<Self, ColorError> {
        let channel = |v: f32| -> Result<u8, ColorError> {
            if v.is_finite() && (0.0..=1.0).contains(&v) {
                Ok((v * 255.0).round() as u8)
            } else {
                Err(ColorError::InvalidColor { r, g, b })
            }
        };
        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?))
    }

    /// Create a color from float channels on the 0..=255 scale, rounding to
    /// the nearest byte. Used for centroids and merged averages.
    pub(crate) fn from_f32_channels(channels: [f32; 3]) -> Self {
        let byte = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        Self::new(byte(channels[0]), byte(channels[1]), byte(channels[2]))
    }

    #[inline]
    pub(crate) fn channels_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Lowercase `#rrggbb` string.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Squared Euclidean distance in 8-bit RGB space.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        dr * dr + dg * dg + db * db
    }

    /// Euclidean distance in 8-bit RGB space.
    #[inline]
    pub fn distance(self, other: Rgb) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// HSV hue in degrees, `0.0..360.0`, or `None` for achromatic colors
    /// (all three channels equal).
    ///
    /// ```
    /// use hue_engine::Rgb;
    ///
    /// assert_eq!(Rgb::new(255, 0, 0).hue(), Some(0.0));
    /// assert_eq!(Rgb::new(0, 0, 255).hue(), Some(240.0));
    /// assert_eq!(Rgb::new(40, 40, 40).hue(), None);
    /// ```
    pub fn hue(self) -> Option<f32> {
        let r = self.r as f32;
        let g = self.g as f32;
        let b = self.b as f32;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        if delta == 0.0 {
            return None;
        }

        let sector = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        let hue = sector * 60.0;
        // rem_euclid can land exactly on 360.0 through rounding
        Some(if hue >= 360.0 { hue - 360.0 } else { hue })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive,
    /// surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Rgb::new(255, 0, 0).hex(), "#ff0000");
        assert_eq!(Rgb::new(1, 2, 3).hex(), "#010203");
        assert_eq!(Rgb::new(0xDA, 0xD5, 0xD2).to_string(), "#dad5d2");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#8B7E73".parse::<Rgb>().unwrap(), Rgb::new(139, 126, 115));
        assert_eq!("c05658".parse::<Rgb>().unwrap(), Rgb::new(192, 86, 88));
        assert_eq!("#F00".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("  #abc  ".parse::<Rgb>().unwrap(), Rgb::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!("#FFFF".parse::<Rgb>(), Err(ParseColorError::InvalidLength));
        assert_eq!("".parse::<Rgb>(), Err(ParseColorError::InvalidLength));
        assert!(matches!(
            "#GGGGGG".parse::<Rgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_distance() {
        let a = Rgb::new(255, 0, 0);
        let b = Rgb::new(250, 5, 2);
        assert_eq!(a.distance_squared(b), 54.0);
        assert!((a.distance(b) - 54f32.sqrt()).abs() < 1e-6);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_hue_primary_and_secondary() {
        assert_eq!(Rgb::new(0, 255, 0).hue(), Some(120.0));
        assert_eq!(Rgb::new(255, 255, 0).hue(), Some(60.0));
        assert_eq!(Rgb::new(0, 255, 255).hue(), Some(180.0));
        assert_eq!(Rgb::new(255, 0, 255).hue(), Some(300.0));
    }

    #[test]
    fn test_hue_wraps_below_360() {
        // Red with a touch of blue sits just under 360
        let hue = Rgb::new(255, 0, 1).hue().unwrap();
        assert!(hue > 359.0 && hue < 360.0, "hue = {hue}");
    }

    #[test]
    fn test_from_unit_rejects_malformed() {
        assert!(matches!(
            Rgb::from_unit(-0.1, 0.0, 0.0),
            Err(ColorError::InvalidColor { .. })
        ));
        assert!(Rgb::from_unit(0.0, f32::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_from_f32_channels_rounds_and_clamps() {
        assert_eq!(
            Rgb::from_f32_channels([252.5, 2.4, -3.0]),
            Rgb::new(253, 2, 0)
        );
        assert_eq!(Rgb::from_f32_channels([300.0, 0.0, 0.0]).r, 255);
    }
}
