use hue_engine::{AggregatedColor, Insight};

use super::board::{BoardId, SnapshotSource};

/// What happened to one image during analysis
#[derive(Debug, Clone, PartialEq)]
pub enum ImageStatus {
    /// Decoded and quantized into this many samples
    Analyzed { colors: usize },
    /// Bytes could not be obtained
    FetchFailed(String),
    /// Bytes were not a usable image
    DecodeFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageOutcome {
    pub index: usize,
    pub url: String,
    pub status: ImageStatus,
}

impl ImageOutcome {
    pub fn is_analyzed(&self) -> bool {
        matches!(self.status, ImageStatus::Analyzed { .. })
    }
}

/// The analysis result proper: pin count, ranked palette and insights.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardResult {
    pub pin_count: usize,
    /// Exposed palette, ranked, weights summing to 1.0 (or empty)
    pub colors: Vec<AggregatedColor>,
    pub insight: Insight,
}

/// [`BoardResult`] plus everything known about how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardReport {
    pub board: BoardId,
    pub source: SnapshotSource,
    pub partial: bool,
    pub result: BoardResult,
    /// One entry per collected image, in board order
    pub outcomes: Vec<ImageOutcome>,
    /// Share of the full aggregate covered by `result.colors`
    pub coverage: f32,
    /// Colors in the full aggregate before truncation
    pub unique_colors: usize,
}

impl BoardReport {
    pub fn analyzed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_analyzed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.analyzed()
    }
}
