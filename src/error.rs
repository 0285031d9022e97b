//! Operation-local, recoverable failures.
//!
//! Every error leaves the caller free to adjust the anchors or the requested
//! size and retry; nothing here is process-fatal, and no partially written
//! raster ever escapes a failed operation.

use std::collections::TryReserveError;
use thiserror::Error;

/// Why the classifier could not produce a unique corner assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Ambiguity {
    /// Two anchors sit exactly on the x or y dividing axis.
    #[error("two anchors lie exactly on a split axis")]
    SplitAxis,
    /// An anchor coincides with the barycentre, or two anchors are collinear
    /// with it.
    #[error("anchors are collinear with or coincide with their barycentre")]
    BarycentreDegenerate,
    /// Neither the x-first nor the y-first split reproduces the angular
    /// order around the barycentre.
    #[error("no corner assignment matches the angular order")]
    NoConsistentSplit,
    /// Both splits reproduce the angular order; the assignment cannot be
    /// chosen without guessing.
    #[error("two competing corner assignments match the angular order")]
    TwoConsistentSplits,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected exactly 4 anchors, got {0}")]
    WrongAnchorCount(usize),

    #[error("anchors do not form an unambiguous quadrilateral: {0}")]
    AmbiguousAnchors(#[from] Ambiguity),

    /// The requested destination extent does not fit the coordinate budget.
    #[error("destination size {width}x{height} overflows coordinate arithmetic")]
    SizeOverflow { width: usize, height: usize },

    /// A working buffer could not be obtained.
    #[error("working buffer allocation failed")]
    AllocationFailure(#[source] TryReserveError),

    /// The decomposition of the correspondence system produced no usable
    /// null-space vector. Does not occur for a correctly classified,
    /// non-degenerate quadrilateral.
    #[error("singular value decomposition of the correspondence system failed")]
    DegenerateSystem,

    /// The forward pass mapped no source pixel into the destination, so
    /// there is nothing to interpolate from.
    #[error("no source pixel mapped into the destination")]
    EmptyWarp,

    /// Target aspect ratio components must be finite and positive.
    #[error("invalid target ratio {width}:{height}")]
    InvalidRatio { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
