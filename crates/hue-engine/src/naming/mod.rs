//! Nearest-name lookup and temperature classification.

mod table;
mod temperature;

pub use table::{CSS_COLORS, CSS_TABLE_VERSION};
pub use temperature::Temperature;

use crate::color::Rgb;
use crate::error::ColorError;
use crate::quantize::ColorSample;

/// A [`ColorSample`] with a human-readable name and a temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedColor {
    pub color: Rgb,
    pub weight: f32,
    pub name: &'static str,
    pub temperature: Temperature,
}

/// Maps colors to the nearest entry of a fixed, versioned name table.
///
/// Distance is Euclidean in 8-bit RGB. Ties resolve to the earlier table
/// entry, so results depend only on the table and the input.
#[derive(Debug, Clone, Copy)]
pub struct ColorNamer {
    version: &'static str,
    table: &'static [(&'static str, Rgb)],
}

impl Default for ColorNamer {
    fn default() -> Self {
        Self {
            version: CSS_TABLE_VERSION,
            table: CSS_COLORS,
        }
    }
}

impl ColorNamer {
    /// Use a custom table. Panics on an empty table, which can only be a
    /// programming error since tables are compile-time constants.
    pub fn with_table(version: &'static str, table: &'static [(&'static str, Rgb)]) -> Self {
        assert!(!table.is_empty(), "color name table cannot be empty");
        Self { version, table }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Name of the nearest table entry.
    ///
    /// ```
    /// use hue_engine::{ColorNamer, Rgb};
    ///
    /// let namer = ColorNamer::default();
    /// assert_eq!(namer.name(Rgb::new(253, 2, 1)), "red");
    /// assert_eq!(namer.name(Rgb::new(0x63, 0x41, 0x35)), "darkolivegreen");
    /// ```
    pub fn name(&self, color: Rgb) -> &'static str {
        let mut best = self.table[0].0;
        let mut best_dist = f32::INFINITY;
        for (name, reference) in self.table {
            let d = color.distance_squared(*reference);
            if d < best_dist {
                best_dist = d;
                best = name;
            }
        }
        best
    }

    /// Name and temperature for one color.
    pub fn describe(&self, color: Rgb) -> (&'static str, Temperature) {
        (self.name(color), Temperature::of(color))
    }

    /// Name and temperature for unit-range float channels.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidColor`] for non-finite or out-of-range channels.
    pub fn describe_unit(
        &self,
        r: f32,
        g: f32,
        b: f32,
    ) -> Result<(&'static str, Temperature), ColorError> {
        Ok(self.describe(Rgb::from_unit(r, g, b)?))
    }

    pub fn name_sample(&self, sample: ColorSample) -> NamedColor {
        let (name, temperature) = self.describe(sample.color);
        NamedColor {
            color: sample.color,
            weight: sample.weight,
            name,
            temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &[(&str, Rgb)] = &[
        ("ink", Rgb::new(0, 0, 0)),
        ("soot", Rgb::new(2, 0, 0)),
        ("paper", Rgb::new(255, 255, 255)),
    ];

    #[test]
    fn test_exact_matches() {
        let namer = ColorNamer::default();
        for (name, color) in CSS_COLORS {
            assert_eq!(namer.name(*color), *name);
        }
    }

    #[test]
    fn test_nearest_match() {
        let namer = ColorNamer::default();
        assert_eq!(namer.name(Rgb::new(250, 5, 2)), "red");
        assert_eq!(namer.name(Rgb::new(2, 3, 250)), "blue");
        assert_eq!(namer.name(Rgb::new(0xDA, 0xD5, 0xD2)), "lightgray");
    }

    #[test]
    fn test_custom_table_and_tie_break() {
        let namer = ColorNamer::with_table("tiny-1", TINY);
        assert_eq!(namer.version(), "tiny-1");
        assert_eq!(namer.name(Rgb::new(10, 10, 10)), "ink");
        assert_eq!(namer.name(Rgb::new(200, 200, 200)), "paper");
        // Equidistant from ink and soot: first entry wins
        assert_eq!(namer.name(Rgb::new(1, 0, 0)), "ink");
    }

    #[test]
    #[should_panic(expected = "cannot be empty")]
    fn test_empty_table_panics() {
        let _ = ColorNamer::with_table("empty", &[]);
    }

    #[test]
    fn test_describe_unit_rejects_malformed() {
        let namer = ColorNamer::default();
        assert_eq!(
            namer.describe_unit(1.0, 0.0, 0.0).unwrap(),
            ("red", Temperature::Warm)
        );
        assert!(matches!(
            namer.describe_unit(0.0, 2.0, 0.0),
            Err(ColorError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_name_sample_keeps_weight() {
        let namer = ColorNamer::default();
        let named = namer.name_sample(ColorSample::new(Rgb::new(0, 0, 255), 0.25));
        assert_eq!(named.name, "blue");
        assert_eq!(named.temperature, Temperature::Cool);
        assert_eq!(named.weight, 0.25);
    }
}
