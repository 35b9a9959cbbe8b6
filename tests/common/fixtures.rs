//! Test fixtures: encoded images, board markup and fast configs.

use image::{DynamicImage, ImageFormat, RgbImage};
use pinhue::models::{AppConfig, CollectorConfig};
use std::io::Cursor;

/// Colors of the three-image board used across the integration tests.
pub mod colors {
    pub const RED: [u8; 3] = [255, 0, 0];
    pub const NEAR_RED: [u8; 3] = [250, 5, 2];
    pub const BLUE: [u8; 3] = [0, 0, 255];
}

/// PNG bytes of a single-color image
pub fn png_solid(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode_png(RgbImage::from_pixel(width, height, image::Rgb(rgb)))
}

/// PNG bytes of an image split into a left and a right half
pub fn png_halves(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> Vec<u8> {
    encode_png(RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            image::Rgb(left)
        } else {
            image::Rgb(right)
        }
    }))
}

fn encode_png(image: RgbImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("Failed to encode PNG");
    bytes.into_inner()
}

/// Board page markup in the shape the scraper expects: one
/// `data-test-id="pin"` wrapper per image and an embedded pin count.
pub fn board_html(image_srcs: &[&str], pin_count: Option<usize>) -> String {
    let pins: String = image_srcs
        .iter()
        .map(|src| format!(r#"<div data-test-id="pin"><a href="/pin/1/"><img src="{src}" alt=""></a></div>"#))
        .collect();
    let data = pin_count
        .map(|n| format!(r#"<script id="__PWS_DATA__" type="application/json">{{"board":{{"pin_count":{n}}}}}</script>"#))
        .unwrap_or_default();

    format!("<!DOCTYPE html><html><head><title>Board</title></head><body>{data}<div class=\"grid\">{pins}</div></body></html>")
}

/// Config with retries that do not slow the test down.
pub fn test_config() -> AppConfig {
    AppConfig {
        collector: CollectorConfig {
            retry_backoff_ms: 1,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Assert two colors are equal within one unit per channel.
pub fn assert_rgb_near(actual: [u8; 3], expected: [u8; 3]) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(
            a.abs_diff(*e) <= 1,
            "expected ~{expected:?}, got {actual:?}"
        );
    }
}
