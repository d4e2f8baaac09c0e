//! The errors the render pipeline can surface.  Configuration errors
//! are raised before any worker is dispatched; a worker failure
//! aborts the whole run rather than letting a partial result
//! collection masquerade as "no matches."

use image::ImageError;
use std::io;

/// Everything that can go wrong between reading a configuration and
/// writing the last artifact.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// A grid with no samples on a side.
    #[fail(display = "side size must be at least 1")]
    EmptySide,

    /// A range endpoint that is NaN or infinite.
    #[fail(display = "range endpoints must be finite, got ({}, {})", _0, _1)]
    BadRange(f64, f64),

    /// A worker count of zero after resolution.
    #[fail(display = "worker count must be at least 1")]
    NoWorkers,

    /// More workers than grid columns: band division would drop every
    /// column and render an empty image.
    #[fail(
        display = "side size {} is smaller than the worker count {}; every column would be dropped",
        side, workers
    )]
    TooFewColumns {
        /// The requested grid side.
        side: usize,
        /// The worker count that cannot be satisfied.
        workers: usize,
    },

    /// A repetition count of zero.
    #[fail(display = "repetition count must be at least 1")]
    NoReps,

    /// A worker thread terminated abnormally before delivering its
    /// band result.
    #[fail(display = "worker for band {} terminated abnormally", band)]
    WorkerFailed {
        /// Index of the band whose worker died.
        band: usize,
    },

    /// The thread scope itself failed to unwind cleanly.
    #[fail(display = "worker pool terminated abnormally")]
    PoolFailed,

    /// Filesystem trouble while writing an artifact.
    #[fail(display = "i/o error: {}", _0)]
    Io(#[fail(cause)] io::Error),

    /// The image encoder rejected the raster.
    #[fail(display = "image encoding error: {}", _0)]
    Encode(#[fail(cause)] ImageError),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> RenderError {
        RenderError::Io(err)
    }
}

impl From<ImageError> for RenderError {
    fn from(err: ImageError) -> RenderError {
        RenderError::Encode(err)
    }
}
