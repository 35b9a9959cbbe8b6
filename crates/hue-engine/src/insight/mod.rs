//! Heuristic trend scores derived from a board palette.
//!
//! These are interpretive numbers, not measurements: each score is a fixed
//! blend of a few palette statistics (see [`TemperatureProfile`]). What the
//! engine does guarantee is that scoring is a total, deterministic function
//! of its input, that every score is clamped to its documented range, and
//! that the temperature-driven trends depend on the temperature split alone:
//! a warm-dominant palette never scores lower `warm_nostalgia` than a
//! cool-dominant one, and the same holds for cool palettes and
//! `cool_minimalism`.

mod config;
mod profile;

use std::collections::BTreeMap;
use std::fmt;

pub use config::{InsightConfig, TrendingProfile};
pub use profile::TemperatureProfile;

use crate::aggregate::AggregatedColor;
use crate::naming::Temperature;

/// Keys of [`Insight::trend_confidence`].
pub const TRENDS: [&str; 5] = [
    "warm_nostalgia",
    "cool_minimalism",
    "earthy_neutrals",
    "maximalist_color",
    "monochrome_focus",
];

/// Keys of [`Insight::generational_appeal`].
pub const GENERATIONS: [&str; 4] = ["gen_z", "millennial", "gen_x", "boomer"];

/// Keys of [`Insight::regional_preference`].
pub const REGIONS: [&str; 5] = [
    "north_america",
    "europe",
    "east_asia",
    "latin_america",
    "nordic",
];

/// Whether the palette was large enough to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStatus {
    Ok,
    InsufficientData,
}

impl DataStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DataStatus::Ok => "ok",
            DataStatus::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for DataStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores for one palette.
///
/// Every map always holds all of its keys ([`TRENDS`], [`GENERATIONS`],
/// [`REGIONS`]), with values in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    /// Alignment with the configured trending profile, `0.0..=100.0`.
    pub zeitgeist_score: f32,
    pub trend_confidence: BTreeMap<&'static str, f32>,
    pub generational_appeal: BTreeMap<&'static str, f32>,
    pub regional_preference: BTreeMap<&'static str, f32>,
    /// `None` when there was nothing to score.
    pub dominant_temperature: Option<Temperature>,
    pub data_status: DataStatus,
}

impl Insight {
    /// The all-zero result for an empty palette.
    pub fn insufficient() -> Self {
        let zeros = |keys: &[&'static str]| keys.iter().map(|k| (*k, 0.0)).collect();
        Self {
            zeitgeist_score: 0.0,
            trend_confidence: zeros(&TRENDS),
            generational_appeal: zeros(&GENERATIONS),
            regional_preference: zeros(&REGIONS),
            dominant_temperature: None,
            data_status: DataStatus::InsufficientData,
        }
    }

    pub fn trend(&self, key: &str) -> f32 {
        self.trend_confidence.get(key).copied().unwrap_or(0.0)
    }
}

/// Derives an [`Insight`] from aggregated colors.
///
/// ```
/// use hue_engine::{InsightEngine, DataStatus};
///
/// let insight = InsightEngine::default().derive(&[]);
/// assert_eq!(insight.data_status, DataStatus::InsufficientData);
/// assert_eq!(insight.zeitgeist_score, 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: InsightConfig,
}

impl InsightEngine {
    pub fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Summarize the palette, then score it.
    pub fn derive(&self, colors: &[AggregatedColor]) -> Insight {
        match self.profile(colors) {
            Some(profile) => self.score(&profile),
            None => Insight::insufficient(),
        }
    }

    pub fn profile(&self, colors: &[AggregatedColor]) -> Option<TemperatureProfile> {
        TemperatureProfile::from_colors(
            colors,
            self.config.diversity_saturation,
            self.config.chroma_scale,
        )
    }

    /// Score a palette summary.
    pub fn score(&self, p: &TemperatureProfile) -> Insight {
        let muted = 1.0 - p.colorfulness;
        let focus = 1.0 - p.diversity;

        let warm_nostalgia = lead(p.warm, p.cool.max(p.neutral));
        let cool_minimalism = lead(p.cool, p.warm.max(p.neutral));
        let earthy_neutrals = 0.6 * p.neutral + 0.4 * muted * (p.warm + p.neutral);
        let maximalist_color = 0.6 * p.diversity + 0.4 * p.colorfulness;
        let monochrome_focus = 0.6 * p.dominance + 0.4 * focus;

        let trends = [
            warm_nostalgia,
            cool_minimalism,
            earthy_neutrals,
            maximalist_color,
            monochrome_focus,
        ];

        let generations = [
            // gen_z
            0.5 * p.colorfulness + 0.3 * p.diversity + 0.2 * p.cool,
            // millennial
            0.5 * earthy_neutrals + 0.3 * cool_minimalism + 0.2 * p.lightness,
            // gen_x
            0.5 * earthy_neutrals + 0.5 * (1.0 - p.lightness),
            // boomer
            0.6 * warm_nostalgia + 0.4 * focus,
        ];

        let regions = [
            // north_america
            0.5 * p.warm + 0.5 * p.colorfulness,
            // europe
            0.5 * earthy_neutrals + 0.5 * muted,
            // east_asia
            0.5 * p.lightness + 0.5 * cool_minimalism,
            // latin_america
            0.5 * maximalist_color + 0.5 * p.warm,
            // nordic
            0.4 * p.lightness + 0.3 * p.neutral + 0.3 * p.cool,
        ];

        Insight {
            zeitgeist_score: self.zeitgeist(p),
            trend_confidence: scores(&TRENDS, &trends),
            generational_appeal: scores(&GENERATIONS, &generations),
            regional_preference: scores(&REGIONS, &regions),
            dominant_temperature: Some(p.dominant()),
            data_status: DataStatus::Ok,
        }
    }

    fn zeitgeist(&self, p: &TemperatureProfile) -> f32 {
        let t = &self.config.trending;
        let split = 1.0
            - ((p.warm - t.warm).abs() + (p.cool - t.cool).abs() + (p.neutral - t.neutral).abs())
                / 2.0;
        let features = 1.0
            - ((p.lightness - t.lightness).abs()
                + (p.colorfulness - t.colorfulness).abs()
                + (p.diversity - t.diversity).abs())
                / 3.0;
        let w = self.config.temperature_weight.clamp(0.0, 1.0);
        let score = 100.0 * (w * split.clamp(0.0, 1.0) + (1.0 - w) * features.clamp(0.0, 1.0));
        score.clamp(0.0, 100.0)
    }
}

/// Share of `own` against its strongest rival: at least 0.5 exactly when
/// `own` is the largest share.
fn lead(own: f32, rival: f32) -> f32 {
    let total = own + rival;
    if total > 0.0 {
        own / total
    } else {
        0.0
    }
}

fn scores(keys: &[&'static str], values: &[f32]) -> BTreeMap<&'static str, f32> {
    keys.iter()
        .zip(values)
        .map(|(k, v)| (*k, if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }))
        .collect()
}
