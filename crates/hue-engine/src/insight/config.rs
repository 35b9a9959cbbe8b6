//! Insight engine configuration.

/// The palette shape the zeitgeist score measures alignment against.
///
/// Shares are fractions of the palette; `lightness` is mean Oklab L,
/// `colorfulness` and `diversity` are the normalized values of
/// [`super::TemperatureProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendingProfile {
    pub warm: f32,
    pub cool: f32,
    pub neutral: f32,
    pub lightness: f32,
    pub colorfulness: f32,
    pub diversity: f32,
}

impl Default for TrendingProfile {
    /// Soft, warm-leaning, medium-light palettes with a handful of colors.
    fn default() -> Self {
        Self {
            warm: 0.45,
            cool: 0.20,
            neutral: 0.35,
            lightness: 0.68,
            colorfulness: 0.35,
            diversity: 0.75,
        }
    }
}

/// Static parameters of [`super::InsightEngine`].
///
/// # Defaults
///
/// - `diversity_saturation`: 8 distinct colors count as full diversity
/// - `chroma_scale`: Oklab chroma of 0.25 counts as fully colorful
/// - `temperature_weight`: 0.6 of the zeitgeist score comes from the
///   temperature split, the rest from lightness/colorfulness/diversity
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    pub diversity_saturation: usize,
    pub chroma_scale: f32,
    pub temperature_weight: f32,
    pub trending: TrendingProfile,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            diversity_saturation: 8,
            chroma_scale: 0.25,
            temperature_weight: 0.6,
            trending: TrendingProfile::default(),
        }
    }
}

impl InsightConfig {
    pub fn diversity_saturation(mut self, colors: usize) -> Self {
        self.diversity_saturation = colors;
        self
    }

    pub fn trending(mut self, profile: TrendingProfile) -> Self {
        self.trending = profile;
        self
    }
}
