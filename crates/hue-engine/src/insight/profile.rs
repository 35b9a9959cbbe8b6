//! Summary statistics of a palette, the only input insight scoring reads.

use crate::aggregate::AggregatedColor;
use crate::color::Oklab;
use crate::naming::Temperature;

/// Weighted palette summary.
///
/// Every field is in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureProfile {
    /// Weight share of warm colors.
    pub warm: f32,
    pub cool: f32,
    pub neutral: f32,
    /// Weighted mean Oklab lightness.
    pub lightness: f32,
    /// Weighted mean Oklab chroma divided by the configured chroma scale.
    pub colorfulness: f32,
    /// Distinct colors relative to the diversity saturation point.
    pub diversity: f32,
    /// Weight of the heaviest color.
    pub dominance: f32,
}

impl TemperatureProfile {
    /// Summarize `colors`. Weights are renormalized here, so any positive
    /// weighting works. Returns `None` when nothing carries weight.
    pub fn from_colors(
        colors: &[AggregatedColor],
        diversity_saturation: usize,
        chroma_scale: f32,
    ) -> Option<Self> {
        let total: f32 = colors
            .iter()
            .filter(|c| c.weight.is_finite() && c.weight > 0.0)
            .map(|c| c.weight)
            .sum();
        if total <= 0.0 {
            return None;
        }

        let mut profile = TemperatureProfile::default();
        let mut chroma = 0.0;
        let mut distinct = 0usize;

        for c in colors {
            if !c.weight.is_finite() || c.weight <= 0.0 {
                continue;
            }
            let w = c.weight / total;
            distinct += 1;
            match c.temperature {
                Temperature::Warm => profile.warm += w,
                Temperature::Cool => profile.cool += w,
                Temperature::Neutral => profile.neutral += w,
            }
            let lab = Oklab::from(c.color);
            profile.lightness += w * lab.l;
            chroma += w * lab.chroma();
            profile.dominance = profile.dominance.max(w);
        }

        profile.colorfulness = if chroma_scale > 0.0 {
            chroma / chroma_scale
        } else {
            0.0
        };
        profile.diversity = if diversity_saturation == 0 {
            1.0
        } else {
            distinct as f32 / diversity_saturation as f32
        };

        Some(profile.clamped())
    }

    /// Share of the given temperature.
    pub fn share(&self, temperature: Temperature) -> f32 {
        match temperature {
            Temperature::Warm => self.warm,
            Temperature::Cool => self.cool,
            Temperature::Neutral => self.neutral,
        }
    }

    /// Temperature with the largest share; ties resolve warm, cool, neutral.
    pub fn dominant(&self) -> Temperature {
        let mut best = Temperature::Warm;
        for t in [Temperature::Cool, Temperature::Neutral] {
            if self.share(t) > self.share(best) {
                best = t;
            }
        }
        best
    }

    fn clamped(self) -> Self {
        let c = |v: f32| v.clamp(0.0, 1.0);
        Self {
            warm: c(self.warm),
            cool: c(self.cool),
            neutral: c(self.neutral),
            lightness: c(self.lightness),
            colorfulness: c(self.colorfulness),
            diversity: c(self.diversity),
            dominance: c(self.dominance),
        }
    }
}
