//! Error types for reionview-core
//!
//! Covers:
//! - Grid construction and slice extraction
//! - Galaxy column ingestion
//! - Figure rendering and export

use reionview_slice::RangeOutOfBounds;
use thiserror::Error;

/// Errors from building or slicing the scalar field
#[derive(Debug, Error)]
pub enum SliceError {
    /// A slice range exceeds the grid dimension
    #[error(transparent)]
    Bounds(#[from] RangeOutOfBounds),

    /// The grid is not a cube
    #[error("grid is not cubic: {nx}x{ny}x{nz}")]
    NotCubic { nx: usize, ny: usize, nz: usize },

    /// The box length is not usable
    #[error("box length must be positive, got {0}")]
    InvalidBoxLen(f64),

    /// Galaxy columns of mismatched lengths
    #[error("galaxy column '{column}' has {found} entries, expected {expected}")]
    ColumnMismatch {
        column: &'static str,
        found: usize,
        expected: usize,
    },
}

/// Result type for field and selection operations
pub type SliceResult<T> = Result<T, SliceError>;

/// Errors from figure rendering and export
#[derive(Debug, Error)]
pub enum RenderError {
    /// The reduced field has too few non-trivial axes to raster
    #[error("slice is degenerate (rank {rank}), nothing to render")]
    DegenerateSlice { rank: usize },

    /// Colormap name not in the registry
    #[error("unknown colormap: {0}")]
    UnknownColormap(String),

    /// Galaxy overlay flags of the wrong length
    #[error("classification has {found} flags for {expected} galaxies")]
    FlagMismatch { found: usize, expected: usize },

    /// PNG encoding error
    #[error("PNG encoding failed: {0}")]
    PngEncoding(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
