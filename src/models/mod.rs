pub mod board;
pub mod config;
pub mod report;

pub use board::{BoardId, BoardSnapshot, ImageReference, SnapshotSource};
pub use config::{AnalysisConfig, AppConfig, CollectorConfig, FetchConfig, CONFIG_ENV};
pub use report::{BoardReport, BoardResult, ImageOutcome, ImageStatus};
