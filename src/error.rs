use thiserror::Error;

/// Board collection failure surfaced to the caller.
///
/// Page-access problems never show up here: the collector answers them with
/// the fallback board. Only a board identifier that cannot be a board is a
/// hard failure.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Invalid board URL '{url}': {reason}")]
    InvalidBoard { url: String, reason: String },
}

/// Failure of a page-access backend.
#[derive(Debug, Clone, Error)]
pub enum PageAccessError {
    #[error("Page access unavailable")]
    Unavailable,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Board page returned HTTP {0}")]
    Status(u16),

    #[error("Board page could not be parsed: {0}")]
    Parse(String),
}

impl PageAccessError {
    /// Whether another attempt might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            PageAccessError::Network(_) => true,
            PageAccessError::Status(code) => *code == 429 || *code >= 500,
            PageAccessError::Unavailable | PageAccessError::Parse(_) => false,
        }
    }
}

/// Failure to obtain the bytes of one image.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Not an image: content type '{0}'")]
    NotAnImage(String),

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("Unsupported image reference: {0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Failure to turn fetched bytes into color samples.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Image decode error: {0}")]
    Image(String),

    #[error("Image has no pixels")]
    Empty,

    #[error("Quantize error: {0}")]
    Quantize(#[from] hue_engine::QuantizeError),
}

impl From<image::ImageError> for DecodeError {
    fn from(e: image::ImageError) -> Self {
        DecodeError::Image(e.to_string())
    }
}

/// Failure of a whole board analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Collect error: {0}")]
    Collect(#[from] CollectError),
}

/// Configuration file problem, reported by strict loading only.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
