//! Gamma lookup table generated at compile time by build.rs.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode one 8-bit sRGB channel to linear light.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f32 {
    SRGB8_TO_LINEAR[value as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lut_endpoints() {
        assert_eq!(srgb8_to_linear(0), 0.0);
        assert!((srgb8_to_linear(255) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lut_monotonic() {
        for i in 1..=255u8 {
            assert!(srgb8_to_linear(i) > srgb8_to_linear(i - 1));
        }
    }

    #[test]
    fn test_lut_mid_gray() {
        // sRGB 128 is roughly 21.6% linear light
        let mid = srgb8_to_linear(128);
        assert!((mid - 0.2158).abs() < 1e-3, "got {mid}");
    }
}
