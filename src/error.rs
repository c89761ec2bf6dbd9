use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortGenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input format error: {0}")]
    Format(String),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Periodicity violated in segment {segment}: swath group {group} differs from group {}", .group + 1)]
    Periodicity { segment: usize, group: usize },

    #[error("Value out of range in segment {segment}: {value} does not fit a short")]
    ValueOutOfRange { segment: usize, value: i64 },

    #[error("Segment widths sum to {actual}, expected {expected} columns")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SortGenError>;
