//! Dominant color extraction for a single image.
//!
//! The [`Quantizer`] reduces a rectangular grid of pixels to at most K
//! weighted colors. Weights are pixel-count fractions and always sum to 1.0.
//!
//! The algorithm is a weighted k-means over the image's color histogram:
//!
//! 1. Count distinct colors (ordered by RGB bytes).
//! 2. If there are at most K of them, return them as-is.
//! 3. Otherwise seed K centroids with k-means++ using a [`StdRng`] built
//!    from [`QuantizeOptions::seed`], then refine with Lloyd iterations.
//! 4. Drop empty clusters, fold clusters whose rounded centroids collide,
//!    and sort by weight (ties by RGB bytes).
//!
//! [`StdRng`]: rand::rngs::StdRng

mod kmeans;
mod options;

use std::collections::BTreeMap;

pub use options::QuantizeOptions;

use crate::color::Rgb;
use crate::error::QuantizeError;
use kmeans::HistogramEntry;

/// Seed used for k-means++ initialization unless configured otherwise.
pub const DEFAULT_SEED: u64 = 0x7069_6e68_7565; // "pinhue"

/// One dominant color of an image and the fraction of its area it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSample {
    pub color: Rgb,
    /// Fraction of the image's pixels, in `0.0..=1.0`.
    pub weight: f32,
}

impl ColorSample {
    #[inline]
    pub fn new(color: Rgb, weight: f32) -> Self {
        Self { color, weight }
    }
}

/// Deterministic dominant-color extractor.
///
/// # Example
///
/// ```
/// use hue_engine::{Quantizer, QuantizeOptions, Rgb};
///
/// let mut pixels = vec![Rgb::new(255, 0, 0); 6];
/// pixels.extend(vec![Rgb::new(0, 0, 255); 2]);
///
/// let samples = Quantizer::new(QuantizeOptions::default())
///     .quantize(&pixels, 4, 2)
///     .unwrap();
///
/// assert_eq!(samples[0].color, Rgb::new(255, 0, 0));
/// assert_eq!(samples[0].weight, 0.75);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Quantizer {
    options: QuantizeOptions,
}

impl Quantizer {
    pub fn new(options: QuantizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &QuantizeOptions {
        &self.options
    }

    /// Quantize a `width × height` grid given as [`Rgb`] pixels in row order.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::EmptyImage`] for a zero-area grid
    /// - [`QuantizeError::DimensionMismatch`] if `pixels.len() != width * height`
    /// - [`QuantizeError::ZeroColors`] if `max_colors` is 0
    pub fn quantize(
        &self,
        pixels: &[Rgb],
        width: u32,
        height: u32,
    ) -> Result<Vec<ColorSample>, QuantizeError> {
        self.validate(pixels.len(), width, height)?;

        let mut histogram: BTreeMap<Rgb, u32> = BTreeMap::new();
        for &p in pixels {
            *histogram.entry(p).or_insert(0) += 1;
        }
        Ok(self.quantize_histogram(histogram, pixels.len()))
    }

    /// Quantize a packed RGB8 buffer (`[r, g, b, r, g, b, ...]`), the layout
    /// produced by most image decoders.
    pub fn quantize_rgb8(
        &self,
        bytes: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<ColorSample>, QuantizeError> {
        if bytes.len() % 3 != 0 {
            return Err(QuantizeError::DimensionMismatch {
                width,
                height,
                pixels: bytes.len() / 3,
            });
        }
        self.validate(bytes.len() / 3, width, height)?;

        let mut histogram: BTreeMap<Rgb, u32> = BTreeMap::new();
        for px in bytes.chunks_exact(3) {
            *histogram
                .entry(Rgb::new(px[0], px[1], px[2]))
                .or_insert(0) += 1;
        }
        Ok(self.quantize_histogram(histogram, bytes.len() / 3))
    }

    fn validate(&self, pixels: usize, width: u32, height: u32) -> Result<(), QuantizeError> {
        if self.options.max_colors == 0 {
            return Err(QuantizeError::ZeroColors);
        }
        let area = width as u64 * height as u64;
        if area == 0 {
            return Err(QuantizeError::EmptyImage);
        }
        if area != pixels as u64 {
            return Err(QuantizeError::DimensionMismatch {
                width,
                height,
                pixels,
            });
        }
        Ok(())
    }

    fn quantize_histogram(&self, histogram: BTreeMap<Rgb, u32>, total: usize) -> Vec<ColorSample> {
        let total = total as f64;

        let counted: Vec<(Rgb, u64)> = if histogram.len() <= self.options.max_colors {
            histogram.into_iter().map(|(c, n)| (c, n as u64)).collect()
        } else {
            let entries: Vec<HistogramEntry> = histogram
                .into_iter()
                .map(|(color, count)| HistogramEntry { color, count })
                .collect();
            kmeans::cluster(&entries, &self.options)
                .into_iter()
                .map(|c| (c.centroid, c.count))
                .collect()
        };

        // Two centroids can round to the same byte triple
        let mut folded: BTreeMap<Rgb, u64> = BTreeMap::new();
        for (color, count) in counted {
            *folded.entry(color).or_insert(0) += count;
        }

        let mut samples: Vec<ColorSample> = folded
            .into_iter()
            .map(|(color, count)| ColorSample::new(color, (count as f64 / total) as f32))
            .collect();
        samples.sort_by(|a, b| b.weight.total_cmp(&a.weight).then(a.color.cmp(&b.color)));
        samples
    }
}
