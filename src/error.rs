use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the coordinate transforms and the batch processor.
#[derive(Debug, Error)]
pub enum Error {
    /// Paired input sequences must have matching lengths.
    #[error("shape mismatch: sequence of length {left} paired with length {right}")]
    ShapeMismatch { left: usize, right: usize },

    /// A radial pixel distance beyond the calibrated image radius has no
    /// corresponding zenith-distance angle.
    #[error("radial distance {r} px lies outside the calibrated image radius {radius} px")]
    OutOfRange { r: f64, radius: f64 },

    /// An image processor refused to analyze an image.
    ///
    /// Surfaced per file during batch processing; the batch skips the file
    /// and carries on.
    #[error("image rejected: {}", path.display())]
    ImageRejected { path: PathBuf },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("unreadable path while matching pattern: {0}")]
    Glob(#[from] glob::GlobError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
