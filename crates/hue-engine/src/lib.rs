#![allow(clippy::excessive_precision, clippy::needless_range_loop)]

//! hue-engine: dominant color extraction and palette statistics
//!
//! This library holds the pure, deterministic half of board color analysis.
//! It never touches the network or the filesystem: callers hand it decoded
//! pixels and get back weighted colors, names, a merged palette and a set of
//! heuristic insight scores.
//!
//! # Quick Start
//!
//! ```
//! use hue_engine::{aggregate, ColorNamer, ImageColors, Quantizer, QuantizeOptions, Rgb};
//!
//! let red = vec![Rgb::new(255, 0, 0); 16];
//! let blue = vec![Rgb::new(0, 0, 255); 16];
//!
//! let quantizer = Quantizer::new(QuantizeOptions::default());
//! let images = vec![
//!     ImageColors::new(0, quantizer.quantize(&red, 4, 4).unwrap()),
//!     ImageColors::new(1, quantizer.quantize(&blue, 4, 4).unwrap()),
//! ];
//!
//! let namer = ColorNamer::default();
//! let result = aggregate(&images, &namer, &Default::default());
//! assert_eq!(result.len(), 2);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! pixels (Rgb grid)
//!     |
//!     v
//! Quantizer            weighted k-means, seeded, at most K samples
//!     |
//!     v
//! aggregate()          flatten -> merge pairs closer than D -> renormalize
//!     |                -> rank by weight, tie by first-seen image
//!     v
//! ColorNamer           nearest CSS keyword + hue temperature
//!     |
//!     v
//! InsightEngine        temperature shares, diversity, dominance -> scores
//! ```
//!
//! # Color Spaces
//!
//! Quantization, merging and naming all work in 8-bit sRGB with plain
//! Euclidean distance, so a merge distance of `24.0` means "24 steps of one
//! channel". Insight scoring additionally converts the palette to
//! [`Oklab`] (through [`LinearRgb`]) to read perceptual lightness and
//! chroma.
//!
//! # Determinism
//!
//! Every function in this crate returns the same output for the same input
//! and configuration. The k-means seeding uses a fixed seed
//! ([`quantize::DEFAULT_SEED`]), merging follows a canonical order that does
//! not depend on how the caller ordered its images, and ties are always
//! broken by image index and then by RGB bytes.

pub mod aggregate;
pub mod color;
pub mod error;
pub mod insight;
pub mod naming;
pub mod quantize;


pub use aggregate::{aggregate, Aggregate, AggregateOptions, AggregatedColor, ImageColors};
pub use color::{LinearRgb, Oklab, Rgb};
pub use error::{ColorError, ParseColorError, QuantizeError};
pub use insight::{
    DataStatus, Insight, InsightConfig, InsightEngine, TemperatureProfile, TrendingProfile,
};
pub use naming::{ColorNamer, NamedColor, Temperature};
pub use quantize::{ColorSample, QuantizeOptions, Quantizer};
