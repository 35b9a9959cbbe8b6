//! Turning a board URL into an ordered list of image references.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{CollectError, PageAccessError};
use crate::models::{BoardId, BoardSnapshot, CollectorConfig, ImageReference, SnapshotSource};
use crate::services::fallback::fallback_snapshot;
use crate::services::page_access::{PageAccess, PageListing};

/// Resolves boards through a [`PageAccess`] backend, retrying transient
/// failures and substituting the fallback board when the page cannot be
/// read at all.
pub struct BoardCollector {
    access: Arc<dyn PageAccess>,
    config: CollectorConfig,
}

impl BoardCollector {
    pub fn new(access: Arc<dyn PageAccess>, config: CollectorConfig) -> Self {
        Self { access, config }
    }

    /// Collect the board at `board_url`.
    ///
    /// Only a malformed URL is an error; every page-access problem ends in
    /// the fallback snapshot.
    pub async fn collect(&self, board_url: &str) -> Result<BoardSnapshot, CollectError> {
        let board = BoardId::parse(board_url)?;
        Ok(self.collect_board(board).await)
    }

    pub async fn collect_board(&self, board: BoardId) -> BoardSnapshot {
        let listing = match self.resolve_with_retry(&board).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(board = %board, error = %e, "Board page unavailable, using fallback board");
                return fallback_snapshot(board);
            }
        };

        // A page without images that does not say the board is empty was
        // most likely rendered client-side
        if listing.image_urls.is_empty() && listing.pin_count != Some(0) {
            tracing::warn!(board = %board, "No images found on board page, using fallback board");
            return fallback_snapshot(board);
        }

        let snapshot = self.snapshot_from_listing(board, listing);
        tracing::info!(
            board = %snapshot.board,
            pins = snapshot.pin_count,
            images = snapshot.images.len(),
            partial = snapshot.partial,
            "Board collected"
        );
        snapshot
    }

    async fn resolve_with_retry(&self, board: &BoardId) -> Result<PageListing, PageAccessError> {
        let mut attempt = 0u32;
        loop {
            match self.access.resolve(board).await {
                Ok(listing) => return Ok(listing),
                Err(e) if e.is_transient() && attempt < self.config.retries => {
                    attempt += 1;
                    let delay = Duration::from_millis(
                        self.config.retry_backoff_ms.saturating_mul(attempt as u64),
                    );
                    tracing::debug!(
                        board = %board,
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying board page"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn snapshot_from_listing(&self, board: BoardId, listing: PageListing) -> BoardSnapshot {
        let mut seen = HashSet::new();
        let unique: Vec<String> = listing
            .image_urls
            .into_iter()
            .filter(|url| seen.insert(url.clone()))
            .collect();

        let pin_count = listing.pin_count.unwrap_or(0).max(unique.len());
        let images: Vec<ImageReference> = unique
            .into_iter()
            .take(self.config.max_pins)
            .enumerate()
            .map(|(index, url)| ImageReference::new(index, url))
            .collect();

        BoardSnapshot {
            board,
            pin_count,
            partial: images.len() < pin_count,
            images,
            source: SnapshotSource::Live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Replays a scripted sequence of results, repeating the last one.
    struct Scripted {
        results: Mutex<Vec<Result<PageListing, PageAccessError>>>,
        calls: AtomicU32,
    }

    impl Scripted {
        fn new(results: Vec<Result<PageListing, PageAccessError>>) -> Arc<Self> {
            Arc::new(Self {
                results: Mutex::new(results),
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageAccess for Scripted {
        async fn resolve(&self, _board: &BoardId) -> Result<PageListing, PageAccessError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            let results = self.results.lock().unwrap();
            results[n.min(results.len() - 1)].clone()
        }
    }

    fn listing(pin_count: Option<usize>, urls: &[&str]) -> PageListing {
        PageListing {
            pin_count,
            image_urls: urls.iter().map(|u| u.to_string()).collect(),
        }
    }

    fn fast_config() -> CollectorConfig {
        CollectorConfig {
            retry_backoff_ms: 1,
            ..Default::default()
        }
    }

    const BOARD: &str = "https://www.pinterest.com/jane/cozy/";

    #[tokio::test]
    async fn test_live_listing() {
        let access = Scripted::new(vec![Ok(listing(Some(3), &["a", "b", "c"]))]);
        let collector = BoardCollector::new(access, fast_config());

        let snapshot = collector.collect(BOARD).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Live);
        assert_eq!(snapshot.pin_count, 3);
        assert_eq!(
            snapshot.images,
            vec![
                ImageReference::new(0, "a"),
                ImageReference::new(1, "b"),
                ImageReference::new(2, "c"),
            ]
        );
        assert!(!snapshot.partial);
    }

    #[tokio::test]
    async fn test_dedupes_and_reindexes() {
        let access = Scripted::new(vec![Ok(listing(None, &["a", "b", "a", "c", "b"]))]);
        let collector = BoardCollector::new(access, fast_config());

        let snapshot = collector.collect(BOARD).await.unwrap();
        let urls: Vec<&str> = snapshot.images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
        assert_eq!(snapshot.images[2].index, 2);
        // No advertised count: images found
        assert_eq!(snapshot.pin_count, 3);
    }

    #[tokio::test]
    async fn test_partial_when_fewer_images_than_pins() {
        let access = Scripted::new(vec![Ok(listing(Some(120), &["a", "b"]))]);
        let collector = BoardCollector::new(access, fast_config());

        let snapshot = collector.collect(BOARD).await.unwrap();
        assert_eq!(snapshot.pin_count, 120);
        assert_eq!(snapshot.images.len(), 2);
        assert!(snapshot.partial);
    }

    #[tokio::test]
    async fn test_caps_at_max_pins() {
        let urls: Vec<String> = (0..50).map(|i| format!("img{i}")).collect();
        let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let access = Scripted::new(vec![Ok(listing(Some(50), &refs))]);
        let collector = BoardCollector::new(access, fast_config());

        let snapshot = collector.collect(BOARD).await.unwrap();
        assert_eq!(snapshot.images.len(), 30);
        assert_eq!(snapshot.pin_count, 50);
        assert!(snapshot.partial);
    }

    #[tokio::test]
    async fn test_unavailable_uses_fallback_without_retry() {
        let access = Scripted::new(vec![Err(PageAccessError::Unavailable)]);
        let collector = BoardCollector::new(access.clone(), fast_config());

        let snapshot = collector.collect(BOARD).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Fallback);
        assert_eq!(snapshot.pin_count, 5);
        assert_eq!(access.calls(), 1);
    }

    #[tokio::test]
    async fn test_retries_transient_failures() {
        let access = Scripted::new(vec![
            Err(PageAccessError::Status(503)),
            Err(PageAccessError::Network("reset".to_string())),
            Ok(listing(Some(1), &["a"])),
        ]);
        let collector = BoardCollector::new(access.clone(), fast_config());

        let snapshot = collector.collect(BOARD).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Live);
        assert_eq!(access.calls(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_use_fallback() {
        let access = Scripted::new(vec![Err(PageAccessError::Status(502))]);
        let config = CollectorConfig {
            retries: 1,
            retry_backoff_ms: 1,
            ..Default::default()
        };
        let collector = BoardCollector::new(access.clone(), config);

        let snapshot = collector.collect(BOARD).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Fallback);
        assert_eq!(access.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_page_uses_fallback_unless_board_is_empty() {
        let access = Scripted::new(vec![Ok(listing(None, &[]))]);
        let snapshot = BoardCollector::new(access, fast_config())
            .collect(BOARD)
            .await
            .unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Fallback);

        let access = Scripted::new(vec![Ok(listing(Some(0), &[]))]);
        let snapshot = BoardCollector::new(access, fast_config())
            .collect(BOARD)
            .await
            .unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Live);
        assert_eq!(snapshot.pin_count, 0);
        assert!(snapshot.images.is_empty());
        assert!(!snapshot.partial);
    }

    #[tokio::test]
    async fn test_malformed_url_is_an_error() {
        let access = Scripted::new(vec![Ok(listing(Some(1), &["a"]))]);
        let collector = BoardCollector::new(access.clone(), fast_config());

        let err = collector.collect("not a board").await.unwrap_err();
        assert!(matches!(err, CollectError::InvalidBoard { .. }));
        assert_eq!(access.calls(), 0);
    }
}
