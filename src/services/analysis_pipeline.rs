//! Board analysis: collect → fetch/decode/quantize per image → aggregate →
//! insights.

use futures_util::stream::{self, StreamExt};
use hue_engine::{
    aggregate, AggregateOptions, ColorNamer, ImageColors, InsightEngine, Quantizer,
};
use std::sync::Arc;

use crate::error::AnalysisError;
use crate::models::{
    AppConfig, BoardReport, BoardResult, BoardSnapshot, ImageOutcome, ImageReference, ImageStatus,
};
use crate::services::board_collector::BoardCollector;
use crate::services::image_decoder::extract_samples;
use crate::services::image_fetcher::ImageSource;

/// Runs the whole analysis for one board.
///
/// Images are processed on a bounded pool of `fetch.workers` concurrent
/// tasks; decoding and quantization run on the blocking thread pool.
/// Results are re-sorted by board position before aggregation, so the
/// outcome never depends on completion order.
pub struct BoardAnalyzer {
    collector: BoardCollector,
    images: Arc<dyn ImageSource>,
    quantizer: Quantizer,
    namer: ColorNamer,
    aggregate_options: AggregateOptions,
    insights: InsightEngine,
    workers: usize,
    max_edge: u32,
}

impl BoardAnalyzer {
    pub fn new(config: &AppConfig, collector: BoardCollector, images: Arc<dyn ImageSource>) -> Self {
        Self {
            collector,
            images,
            quantizer: Quantizer::new(config.quantize_options()),
            namer: ColorNamer::default(),
            aggregate_options: config.aggregate_options(),
            insights: InsightEngine::default(),
            workers: config.fetch.workers.max(1),
            max_edge: config.analysis.max_edge,
        }
    }

    /// Collect and analyze the board at `board_url`.
    pub async fn analyze(&self, board_url: &str) -> Result<BoardReport, AnalysisError> {
        let snapshot = self.collector.collect(board_url).await?;
        Ok(self.analyze_snapshot(snapshot).await)
    }

    /// Analyze an already collected board. Never fails: images that cannot
    /// be fetched or decoded are recorded as skipped.
    pub async fn analyze_snapshot(&self, snapshot: BoardSnapshot) -> BoardReport {
        let mut processed: Vec<(ImageOutcome, Option<ImageColors>)> =
            stream::iter(snapshot.images.iter().cloned())
                .map(|image| self.process_image(image))
                .buffer_unordered(self.workers)
                .collect()
                .await;
        processed.sort_by_key(|(outcome, _)| outcome.index);

        let (outcomes, colors): (Vec<ImageOutcome>, Vec<Option<ImageColors>>) =
            processed.into_iter().unzip();
        let colors: Vec<ImageColors> = colors.into_iter().flatten().collect();

        let merged = aggregate(&colors, &self.namer, &self.aggregate_options);
        let palette = merged.palette();
        let insight = self.insights.derive(&palette);

        let report = BoardReport {
            board: snapshot.board,
            source: snapshot.source,
            partial: snapshot.partial,
            result: BoardResult {
                pin_count: snapshot.pin_count,
                colors: palette,
                insight,
            },
            outcomes,
            coverage: merged.palette_coverage(),
            unique_colors: merged.len(),
        };

        tracing::info!(
            board = %report.board,
            source = %report.source,
            analyzed = report.analyzed(),
            skipped = report.skipped(),
            colors = report.result.colors.len(),
            "Board analyzed"
        );
        report
    }

    async fn process_image(&self, image: ImageReference) -> (ImageOutcome, Option<ImageColors>) {
        let outcome = |status: ImageStatus| ImageOutcome {
            index: image.index,
            url: image.url.clone(),
            status,
        };

        let bytes = match self.images.fetch(&image).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(index = image.index, url = %image.url, error = %e, "Skipping image: fetch failed");
                return (outcome(ImageStatus::FetchFailed(e.to_string())), None);
            }
        };

        let quantizer = self.quantizer.clone();
        let max_edge = self.max_edge;
        let extracted =
            tokio::task::spawn_blocking(move || extract_samples(&bytes, max_edge, &quantizer))
                .await;

        let samples = match extracted {
            Ok(Ok(samples)) => samples,
            Ok(Err(e)) => {
                tracing::warn!(index = image.index, url = %image.url, error = %e, "Skipping image: decode failed");
                return (outcome(ImageStatus::DecodeFailed(e.to_string())), None);
            }
            Err(e) => {
                tracing::error!(index = image.index, error = %e, "Decode task failed");
                return (
                    outcome(ImageStatus::DecodeFailed(format!("Decode task failed: {e}"))),
                    None,
                );
            }
        };

        tracing::debug!(index = image.index, colors = samples.len(), "Image quantized");
        (
            outcome(ImageStatus::Analyzed {
                colors: samples.len(),
            }),
            Some(ImageColors::new(image.index, samples)),
        )
    }
}
