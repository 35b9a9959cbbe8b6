//! Color types and conversion utilities
//!
//! - [`Rgb`]: 8-bit sRGB, the space quantization, merging and naming use.
//! - [`LinearRgb`]: linear light, an intermediate step towards Oklab.
//! - [`Oklab`]: perceptual space used to read lightness and chroma.
//!
//! # Example
//!
//! ```
//! use hue_engine::{LinearRgb, Oklab, Rgb};
//!
//! let coral: Rgb = "#ff7f50".parse().unwrap();
//! let lab = Oklab::from(LinearRgb::from(coral));
//! assert!(lab.chroma() > 0.1);
//! ```

mod linear_rgb;
mod lut;
mod oklab;
mod rgb;

pub use linear_rgb::LinearRgb;
pub use oklab::Oklab;
pub use rgb::Rgb;
