//! Pinhue - board color analysis
//!
//! Collects the images of a pin board, extracts dominant colors per image
//! with `hue-engine`, merges them into one board palette and derives trend
//! insights from it. This library exposes modules for integration testing.

pub mod error;
pub mod export;
pub mod models;
pub mod services;
