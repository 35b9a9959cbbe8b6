//! Hue-based color temperature.

use std::fmt;

use crate::color::Rgb;

/// Warm / cool / neutral classification of a color.
///
/// Boundaries on the HSV hue circle:
///
/// | Hue               | Temperature |
/// |-------------------|-------------|
/// | `[0°, 60°)`       | warm        |
/// | `[60°, 120°)`     | neutral     |
/// | `[120°, 240°]`    | cool        |
/// | `(240°, 300°)`    | neutral     |
/// | `[300°, 360°)`    | warm        |
/// | achromatic        | neutral     |
///
/// The cool band is closed at 240° so pure blue classifies as cool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Temperature {
    Warm,
    Cool,
    Neutral,
}

impl Temperature {
    /// Classify a color by its hue.
    ///
    /// ```
    /// use hue_engine::{Rgb, Temperature};
    ///
    /// assert_eq!(Temperature::of(Rgb::new(255, 0, 0)), Temperature::Warm);
    /// assert_eq!(Temperature::of(Rgb::new(0, 0, 255)), Temperature::Cool);
    /// assert_eq!(Temperature::of(Rgb::new(128, 128, 128)), Temperature::Neutral);
    /// ```
    pub fn of(color: Rgb) -> Self {
        Self::from_hue(color.hue())
    }

    /// Classify a hue in degrees; `None` (achromatic) is neutral.
    pub fn from_hue(hue: Option<f32>) -> Self {
        match hue {
            Some(h) if h < 60.0 || h >= 300.0 => Temperature::Warm,
            Some(h) if (120.0..=240.0).contains(&h) => Temperature::Cool,
            _ => Temperature::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Temperature::Warm => "warm",
            Temperature::Cool => "cool",
            Temperature::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
