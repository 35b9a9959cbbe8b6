pub mod analysis_pipeline;
pub mod board_collector;
pub mod fallback;
pub mod image_decoder;
pub mod image_fetcher;
pub mod page_access;

pub use analysis_pipeline::BoardAnalyzer;
pub use board_collector::BoardCollector;
pub use fallback::{fallback_snapshot, SyntheticImageSource, FALLBACK_COLORS};
pub use image_fetcher::{HttpImageFetcher, ImageSource, SchemeRouter};
pub use page_access::{HtmlPageAccess, PageAccess, PageListing, UnavailablePageAccess};
