use serde::Serialize;
use std::fmt;
use url::Url;

use crate::error::CollectError;

/// A validated board URL: `http(s)://host/<user>/<board>[/...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardId {
    url: Url,
    user: String,
    board: String,
}

impl BoardId {
    pub fn parse(input: &str) -> Result<Self, CollectError> {
        let invalid = |reason: &str| CollectError::InvalidBoard {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(input.trim()).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("scheme must be http or https"));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host"));
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        let [user, board, ..] = segments.as_slice() else {
            return Err(invalid("expected /<user>/<board> path"));
        };
        let (user, board) = (user.to_string(), board.to_string());

        Ok(Self { url, user, board })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Board slug as it appears in the URL, e.g. `earthy-living-room`.
    pub fn slug(&self) -> &str {
        &self.board
    }

    /// Human readable name: `"<user>'s <Board Title>"`.
    pub fn display_name(&self) -> String {
        let title = self
            .board
            .split(['-', '_'])
            .filter(|w| !w.is_empty())
            .map(title_case)
            .collect::<Vec<String>>()
            .join(" ");
        format!("{}'s {}", self.user, title)
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// One image on a board, in board order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub index: usize,
    pub url: String,
}

impl ImageReference {
    pub fn new(index: usize, url: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
        }
    }
}

/// Where a snapshot's images came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    /// Read from the board page
    Live,
    /// Substituted built-in dataset
    Fallback,
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::Live => write!(f, "live"),
            SnapshotSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Collector output: what is on the board and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub board: BoardId,
    /// Pins the board reports; at least `images.len()`.
    pub pin_count: usize,
    pub images: Vec<ImageReference>,
    /// Fewer images than pins were collected
    pub partial: bool,
    pub source: SnapshotSource,
}
