//! Built-in board used when a board page cannot be read.
//!
//! The fallback board has five pins. Each pin is a small synthetic image of
//! vertical color bands drawn from a fixed earthy palette, rendered to PNG
//! on request so that the fallback goes through the same fetch, decode and
//! quantize path as a live board.

use async_trait::async_trait;
use hue_engine::Rgb;
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

use crate::error::FetchError;
use crate::models::{BoardId, BoardSnapshot, ImageReference, SnapshotSource};
use crate::services::image_fetcher::ImageSource;

pub const SYNTHETIC_SCHEME: &str = "synthetic://";

const FALLBACK_PREFIX: &str = "synthetic://fallback/";

/// Reference colors of the fallback board.
pub const FALLBACK_COLORS: [Rgb; 10] = [
    Rgb::new(0x8B, 0x7E, 0x73),
    Rgb::new(0xDA, 0xD5, 0xD2),
    Rgb::new(0x63, 0x41, 0x35),
    Rgb::new(0xB3, 0xB1, 0xAE),
    Rgb::new(0x34, 0x2B, 0x1D),
    Rgb::new(0x74, 0x60, 0x41),
    Rgb::new(0xC4, 0x9D, 0x88),
    Rgb::new(0x52, 0x78, 0x7B),
    Rgb::new(0xB7, 0x89, 0x5A),
    Rgb::new(0xC0, 0x56, 0x58),
];

/// Band layout per image: (index into [`FALLBACK_COLORS`], width in px).
/// Every image is [`IMAGE_WIDTH`] wide.
const LAYOUTS: [&[(usize, u32)]; 5] = [
    &[(0, 40), (1, 35), (2, 25)],
    &[(3, 40), (4, 35), (5, 25)],
    &[(6, 45), (7, 30), (8, 25)],
    &[(9, 40), (1, 30), (0, 30)],
    &[(2, 35), (8, 35), (7, 30)],
];

const IMAGE_WIDTH: u32 = 100;
const IMAGE_HEIGHT: u32 = 60;

/// Number of pins on the fallback board.
pub const FALLBACK_PINS: usize = LAYOUTS.len();

/// The fallback snapshot for `board`.
pub fn fallback_snapshot(board: BoardId) -> BoardSnapshot {
    let images = (0..FALLBACK_PINS)
        .map(|i| ImageReference::new(i, format!("{FALLBACK_PREFIX}{i}")))
        .collect();

    BoardSnapshot {
        board,
        pin_count: FALLBACK_PINS,
        images,
        partial: false,
        source: SnapshotSource::Fallback,
    }
}

/// Pixels of fallback image `index`, or `None` past the last image.
pub fn fallback_image(index: usize) -> Option<RgbImage> {
    let layout = LAYOUTS.get(index)?;
    let mut image = RgbImage::new(IMAGE_WIDTH, IMAGE_HEIGHT);

    let mut x0 = 0;
    for &(color, width) in layout.iter() {
        let rgb = image::Rgb(FALLBACK_COLORS[color].to_bytes());
        for x in x0..(x0 + width).min(IMAGE_WIDTH) {
            for y in 0..IMAGE_HEIGHT {
                image.put_pixel(x, y, rgb);
            }
        }
        x0 += width;
    }
    Some(image)
}

/// Serves `synthetic://fallback/N` references as PNG bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticImageSource;

#[async_trait]
impl ImageSource for SyntheticImageSource {
    async fn fetch(&self, reference: &ImageReference) -> Result<Vec<u8>, FetchError> {
        let unsupported = || FetchError::Unsupported(reference.url.clone());

        let index: usize = reference
            .url
            .strip_prefix(FALLBACK_PREFIX)
            .and_then(|n| n.parse().ok())
            .ok_or_else(unsupported)?;
        let image = fallback_image(index).ok_or_else(unsupported)?;

        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(|e| FetchError::Network(format!("PNG encode error: {e}")))?;
        Ok(bytes.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardId {
        BoardId::parse("https://www.pinterest.com/demo/earthy-tones/").unwrap()
    }

    #[test]
    fn test_layouts_fill_width() {
        for layout in LAYOUTS {
            let width: u32 = layout.iter().map(|(_, w)| w).sum();
            assert_eq!(width, IMAGE_WIDTH);
            assert!(layout.iter().all(|(c, _)| *c < FALLBACK_COLORS.len()));
        }
    }

    #[test]
    fn test_every_reference_color_is_used() {
        for i in 0..FALLBACK_COLORS.len() {
            assert!(
                LAYOUTS.iter().any(|l| l.iter().any(|(c, _)| *c == i)),
                "color {i} unused"
            );
        }
    }

    #[test]
    fn test_fallback_snapshot() {
        let snapshot = fallback_snapshot(board());
        assert_eq!(snapshot.pin_count, 5);
        assert_eq!(snapshot.images.len(), 5);
        assert_eq!(snapshot.images[3].url, "synthetic://fallback/3");
        assert_eq!(snapshot.images[3].index, 3);
        assert!(!snapshot.partial);
        assert_eq!(snapshot.source, SnapshotSource::Fallback);
    }

    #[test]
    fn test_fallback_image_bands() {
        let image = fallback_image(0).unwrap();
        assert_eq!(image.dimensions(), (IMAGE_WIDTH, IMAGE_HEIGHT));
        assert_eq!(image.get_pixel(0, 0).0, FALLBACK_COLORS[0].to_bytes());
        assert_eq!(image.get_pixel(39, 59).0, FALLBACK_COLORS[0].to_bytes());
        assert_eq!(image.get_pixel(40, 0).0, FALLBACK_COLORS[1].to_bytes());
        assert_eq!(image.get_pixel(99, 10).0, FALLBACK_COLORS[2].to_bytes());
        assert!(fallback_image(FALLBACK_PINS).is_none());
    }

    #[tokio::test]
    async fn test_synthetic_source_renders_png() {
        let bytes = SyntheticImageSource
            .fetch(&ImageReference::new(0, "synthetic://fallback/2"))
            .await
            .unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn test_synthetic_source_rejects_unknown() {
        for url in [
            "synthetic://fallback/99",
            "synthetic://other/1",
            "https://example.com/a.png",
        ] {
            let err = SyntheticImageSource
                .fetch(&ImageReference::new(0, url))
                .await
                .unwrap_err();
            assert!(matches!(err, FetchError::Unsupported(_)), "{url}");
        }
    }
}
