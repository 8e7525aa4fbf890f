//! Error types.
//!
//! Rewrite outcomes are not errors (see `rewrite::Status`); this enum covers
//! conditions a caller cannot continue past.

use thiserror::Error;

use crate::rewrite::Shape;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Grid with zero width or height.
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    /// Optimizer asked for a window the grid cannot hold.
    #[error("{shape} window does not fit a {width}x{height} grid")]
    WindowTooLarge {
        shape: Shape,
        width: usize,
        height: usize,
    },

    /// Zone assignment sized for a different grid.
    #[error("zone grid is {zones_w}x{zones_h}, edge grid is {width}x{height}")]
    ZoneMismatch {
        zones_w: usize,
        zones_h: usize,
        width: usize,
        height: usize,
    },

    /// Backtracking path search hit its visit bound.
    #[error("path search gave up after {visits} visits")]
    SearchBudget { visits: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
