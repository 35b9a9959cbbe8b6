//! Board-level palette from per-image color samples.
//!
//! [`aggregate`] flattens every image's samples into weighted entries,
//! merges entries whose colors are closer than the merge distance, and ranks
//! the survivors. The result does not depend on the order in which images
//! are passed in: entries are first sorted by `(image index, sample
//! position)` and every tie is broken against that canonical order.
//!
//! # Merging
//!
//! Merging is agglomerative. Each round finds the globally closest pair of
//! entries; if their distance is below [`AggregateOptions::merge_distance`]
//! they are replaced by one entry whose color is the weight-averaged color,
//! whose weight is the sum and whose contributing images are the union.
//! Rounds continue until no pair is close enough, so no two entries of the
//! output are within the merge distance of each other.
//!
//! Distances are measured between the *rounded* representative colors, the
//! same 8-bit values the caller sees, so the separation guarantee holds for
//! the exposed colors and not only for internal float averages.

use std::collections::BTreeSet;

use crate::color::Rgb;
use crate::naming::{ColorNamer, Temperature};
use crate::quantize::ColorSample;

/// Dominant colors of one successfully analyzed image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageColors {
    /// Position of the image on its board. Used for canonical ordering and
    /// for first-seen tie breaks; expected to be unique per call.
    pub image_index: usize,
    pub samples: Vec<ColorSample>,
    /// Relative importance of this image. `None` means an equal share of
    /// `1 / N` over all images passed to [`aggregate`].
    pub weight: Option<f32>,
}

impl ImageColors {
    pub fn new(image_index: usize, samples: Vec<ColorSample>) -> Self {
        Self {
            image_index,
            samples,
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Aggregation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateOptions {
    /// Entries closer than this (Euclidean, 8-bit RGB) are merged.
    pub merge_distance: f32,
    /// Size of the exposed palette returned by [`Aggregate::palette`].
    pub palette_limit: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            merge_distance: 24.0,
            palette_limit: 10,
        }
    }
}

impl AggregateOptions {
    pub fn merge_distance(mut self, distance: f32) -> Self {
        self.merge_distance = distance;
        self
    }

    pub fn palette_limit(mut self, limit: usize) -> Self {
        self.palette_limit = limit;
        self
    }
}

/// One color of the board palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedColor {
    /// Weighted average of all merged samples, rounded to 8 bits.
    pub color: Rgb,
    /// Share of the board, renormalized over the list it belongs to.
    pub weight: f32,
    /// Number of distinct images that contributed to this color.
    pub image_count: usize,
    /// Smallest image index among the contributors.
    pub first_image: usize,
    pub name: &'static str,
    pub temperature: Temperature,
}

/// Ranked result of [`aggregate`].
///
/// Holds the full merged list; [`palette`](Self::palette) and
/// [`top`](Self::top) expose truncated views.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregate {
    colors: Vec<AggregatedColor>,
    limit: usize,
}

impl Aggregate {
    /// Every merged color, ranked, weights summing to 1.0.
    pub fn all(&self) -> &[AggregatedColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The first `n` colors with weights renormalized to sum to 1.0.
    pub fn top(&self, n: usize) -> Vec<AggregatedColor> {
        let mut head: Vec<AggregatedColor> = self.colors.iter().take(n).copied().collect();
        let total: f32 = head.iter().map(|c| c.weight).sum();
        if total > 0.0 {
            for c in &mut head {
                c.weight /= total;
            }
        }
        head
    }

    /// The exposed palette: [`top`](Self::top) with the configured limit.
    pub fn palette(&self) -> Vec<AggregatedColor> {
        self.top(self.limit)
    }

    /// Fraction of the full aggregate covered by the first `n` colors,
    /// before renormalization. `0.0` when empty.
    pub fn coverage(&self, n: usize) -> f32 {
        self.colors.iter().take(n).map(|c| c.weight).sum::<f32>().min(1.0)
    }

    /// [`coverage`](Self::coverage) of the exposed palette.
    pub fn palette_coverage(&self) -> f32 {
        self.coverage(self.limit)
    }
}

/// Working entry during merging.
#[derive(Debug, Clone)]
struct Entry {
    /// Canonical key of the earliest sample merged in.
    key: (usize, usize),
    /// Weighted average color on the 0..=255 scale.
    mean: [f64; 3],
    /// Always positive; zero-weight samples never become entries.
    weight: f64,
    images: BTreeSet<usize>,
    rounded: Rgb,
}

impl Entry {
    fn new(image: usize, position: usize, sample: ColorSample, weight: f64) -> Self {
        let c = sample.color;
        Self {
            key: (image, position),
            mean: [c.r as f64, c.g as f64, c.b as f64],
            weight,
            images: BTreeSet::from([image]),
            rounded: c,
        }
    }

    fn absorb(&mut self, other: Entry) {
        let total = self.weight + other.weight;
        for ch in 0..3 {
            self.mean[ch] = (self.mean[ch] * self.weight + other.mean[ch] * other.weight) / total;
        }
        self.weight = total;
        self.images.extend(other.images);
        self.key = self.key.min(other.key);
        self.rounded = Rgb::from_f32_channels([
            self.mean[0] as f32,
            self.mean[1] as f32,
            self.mean[2] as f32,
        ]);
    }
}

/// Flatten, merge, renormalize, name and rank.
///
/// Samples with a non-finite or non-positive weight are ignored, as are
/// images with such an explicit weight. Empty input yields an empty
/// [`Aggregate`].
pub fn aggregate(
    images: &[ImageColors],
    namer: &ColorNamer,
    options: &AggregateOptions,
) -> Aggregate {
    let default_share = if images.is_empty() {
        0.0
    } else {
        1.0 / images.len() as f64
    };

    let mut entries: Vec<Entry> = Vec::new();
    for image in images {
        let image_weight = image.weight.map(|w| w as f64).unwrap_or(default_share);
        if !image_weight.is_finite() || image_weight <= 0.0 {
            continue;
        }
        for (position, sample) in image.samples.iter().enumerate() {
            if !sample.weight.is_finite() || sample.weight <= 0.0 {
                continue;
            }
            let weight = image_weight * sample.weight as f64;
            entries.push(Entry::new(image.image_index, position, *sample, weight));
        }
    }

    // Canonical order; the color and weight parts only matter if a caller
    // reuses an image index.
    entries.sort_by(|a, b| {
        a.key
            .cmp(&b.key)
            .then(a.rounded.cmp(&b.rounded))
            .then(a.weight.total_cmp(&b.weight))
    });

    merge_close_entries(&mut entries, options.merge_distance);

    let total: f64 = entries.iter().map(|e| e.weight).sum();
    if total <= 0.0 {
        return Aggregate {
            colors: Vec::new(),
            limit: options.palette_limit,
        };
    }

    let mut colors: Vec<AggregatedColor> = entries
        .into_iter()
        .map(|e| {
            let (name, temperature) = namer.describe(e.rounded);
            AggregatedColor {
                color: e.rounded,
                weight: (e.weight / total) as f32,
                image_count: e.images.len(),
                first_image: e.images.first().copied().unwrap_or(e.key.0),
                name,
                temperature,
            }
        })
        .collect();

    colors.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then(a.first_image.cmp(&b.first_image))
            .then(a.color.cmp(&b.color))
    });

    Aggregate {
        colors,
        limit: options.palette_limit,
    }
}

/// Repeatedly merge the closest pair below `distance`.
///
/// `entries` must be in canonical key order. The merged entry takes the slot
/// of the lower-keyed partner, which keeps the vector in key order, so the
/// strict `<` scan below always resolves distance ties to the pair that
/// comes first canonically.
fn merge_close_entries(entries: &mut Vec<Entry>, distance: f32) {
    if distance.is_nan() || distance <= 0.0 {
        return;
    }
    let limit = distance * distance;

    loop {
        let mut best: Option<(usize, usize, f32)> = None;
        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                let d = entries[i].rounded.distance_squared(entries[j].rounded);
                if d >= limit {
                    continue;
                }
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((i, j, d));
                }
            }
        }

        let Some((i, j, _)) = best else {
            break;
        };
        let absorbed = entries.remove(j);
        entries[i].absorb(absorbed);
    }
}
