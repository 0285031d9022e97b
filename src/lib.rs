#![doc = include_str!("../README.md")]

// Public modules (stable surface)
pub mod classify;
pub mod config;
pub mod error;
pub mod homography;
pub mod image;
pub mod sizing;
pub mod types;
pub mod warp;

// --- High-level re-exports -------------------------------------------------

// Main entry point and the data it consumes/produces.
pub use crate::classify::classify;
pub use crate::error::{Ambiguity, Error, Result};
pub use crate::sizing::sink_dimensions;
pub use crate::types::{AnchorSet, Coord, Corners, Pixel};
pub use crate::warp::{process, warp};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use perspector::prelude::*;
///
/// let mut source = RgbaImage::new(4, 4);
/// source.set(1, 1, Rgba8::new(200, 40, 10, 255));
///
/// let mut anchors = AnchorSet::new();
/// for (x, y) in [(0, 0), (3, 0), (3, 3), (0, 3)] {
///     anchors.push(Pixel::new(x, y));
/// }
///
/// // Axis-aligned anchors: the transform degenerates to the identity and
/// // the source content is copied through.
/// let rectified = process(source.as_view(), &anchors, 3, 3).unwrap();
/// assert_eq!(rectified.get(1, 1), Rgba8::new(200, 40, 10, 255));
/// ```
pub mod prelude {
    pub use crate::image::{ImageRgba8, Rgba8, RgbaImage};
    pub use crate::types::{AnchorSet, Corners, Pixel};
    pub use crate::warp::process;
}
