//! Image decoding and downsampling ahead of quantization.

use hue_engine::{ColorSample, Quantizer};
use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::DecodeError;

/// A decoded image as packed RGB8 (`[r, g, b, r, g, b, ...]`).
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode JPEG, PNG, WebP or GIF bytes and shrink so the longer edge is at
/// most `max_edge`. Alpha is dropped, animations yield their first frame.
pub fn decode(bytes: &[u8], max_edge: u32) -> Result<DecodedImage, DecodeError> {
    let img = image::load_from_memory(bytes)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::Empty);
    }

    let rgb = downsample(img, max_edge.max(1)).into_rgb8();
    Ok(DecodedImage {
        width: rgb.width(),
        height: rgb.height(),
        pixels: rgb.into_raw(),
    })
}

/// Resize keeping the aspect ratio; images already small enough are
/// returned untouched.
fn downsample(img: DynamicImage, max_edge: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    if width <= max_edge && height <= max_edge {
        return img;
    }
    img.resize(max_edge, max_edge, FilterType::Triangle)
}

/// Decode, downsample and quantize one image.
pub fn extract_samples(
    bytes: &[u8],
    max_edge: u32,
    quantizer: &Quantizer,
) -> Result<Vec<ColorSample>, DecodeError> {
    let decoded = decode(bytes, max_edge)?;
    let samples = quantizer.quantize_rgb8(&decoded.pixels, decoded.width, decoded.height)?;
    Ok(samples)
}
