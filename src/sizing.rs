//! Destination sizing: the smallest rectangle containing the anchors,
//! stretched to a requested aspect ratio.

use crate::error::{Error, Result};
use crate::types::AnchorSet;

/// Computes destination dimensions from the anchors' bounding box, expanding
/// the dimension that falls short of the `ratio_w : ratio_h` target so the
/// result matches the ratio exactly (up to rounding).
///
/// Requires a complete anchor set and finite, positive ratio components.
pub fn sink_dimensions(anchors: &AnchorSet, ratio_w: f64, ratio_h: f64) -> Result<(usize, usize)> {
    let quad = anchors
        .quad()
        .ok_or(Error::WrongAnchorCount(anchors.len()))?;
    if !(ratio_w.is_finite() && ratio_h.is_finite() && ratio_w > 0.0 && ratio_h > 0.0) {
        return Err(Error::InvalidRatio {
            width: ratio_w,
            height: ratio_h,
        });
    }

    let min_x = quad.iter().map(|p| p.x).min().unwrap_or(0);
    let max_x = quad.iter().map(|p| p.x).max().unwrap_or(0);
    let min_y = quad.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = quad.iter().map(|p| p.y).max().unwrap_or(0);

    let mut w = f64::from(max_x - min_x);
    let mut h = f64::from(max_y - min_y);
    let ratio = ratio_w / ratio_h;

    if w < h * ratio {
        w = h * ratio;
    } else if w > h * ratio {
        h = w / ratio;
    }
    Ok((w.round() as usize, h.round() as usize))
}
