//! Two-pass perspective resampling.
//!
//! Pass one forward-maps every source pixel through the transform into the
//! destination, recording which destination cells received a value. Pass two
//! fills every remaining cell from the nearest recorded neighbours, sampling
//! the border of an expanding square window. The passes are strictly
//! sequential: gap filling reads the mask and the colors the forward pass
//! produced, and never marks the cells it fills, so holes are always
//! interpolated from forward-mapped data only.

use log::debug;
use nalgebra::Matrix3;

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::homography::{estimate, project};
use crate::image::{ImageRgba8, Rgba8, RgbaImage};
use crate::types::{AnchorSet, Coord};

/// Marks which destination cells received a forward-mapped value. Scoped to
/// a single resample operation.
struct FilledMask {
    w: usize,
    data: Vec<bool>,
}

impl FilledMask {
    fn new(w: usize, h: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(w * h)
            .map_err(Error::AllocationFailure)?;
        data.resize(w * h, false);
        Ok(Self { w, data })
    }

    #[inline]
    fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x]
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize) {
        self.data[y * self.w + x] = true;
    }
}

/// Checks that the destination extent fits the coordinate budget before
/// anything is allocated for it.
fn checked_extent(sink_width: usize, sink_height: usize) -> Result<(Coord, Coord)> {
    let overflow = || Error::SizeOverflow {
        width: sink_width,
        height: sink_height,
    };
    let w = Coord::try_from(sink_width).map_err(|_| overflow())?;
    let h = Coord::try_from(sink_height).map_err(|_| overflow())?;
    if i64::from(w) * i64::from(h) > i64::from(Coord::MAX) {
        return Err(overflow());
    }
    Ok((w, h))
}

/// Corrects the perspective of `source`: classifies `anchors`, estimates the
/// projective transform sending them onto the destination rectangle, and
/// resamples. On success the caller owns the returned raster; on failure no
/// raster is produced.
pub fn process(
    source: ImageRgba8<'_>,
    anchors: &AnchorSet,
    sink_width: usize,
    sink_height: usize,
) -> Result<RgbaImage> {
    let corners = classify(anchors)?;
    debug!(
        "process: bl={:?} br={:?} tr={:?} tl={:?} -> {}x{}",
        corners.bl, corners.br, corners.tr, corners.tl, sink_width, sink_height
    );
    let (w, h) = checked_extent(sink_width, sink_height)?;
    let m = estimate(&corners, w, h)?;
    warp(source, &m, sink_width, sink_height)
}

/// Resamples `source` into a `sink_width` × `sink_height` raster under the
/// projective transform `m`.
pub fn warp(
    source: ImageRgba8<'_>,
    m: &Matrix3<f64>,
    sink_width: usize,
    sink_height: usize,
) -> Result<RgbaImage> {
    let (w, h) = checked_extent(sink_width, sink_height)?;
    let mut mask = FilledMask::new(sink_width, sink_height)?;
    let mut sink = RgbaImage::try_new(sink_width, sink_height)?;

    // Forward pass. Scan order is x outer, y inner, ascending; when several
    // source pixels land on one destination cell, the last one in scan
    // order wins. The ordering is an observable property, not an accident.
    for x in 0..source.w {
        for y in 0..source.h {
            let (dx, dy) = project(m, x as Coord, y as Coord);
            if dx >= 0 && dy >= 0 && dx < w && dy < h {
                sink.set(dx as usize, dy as usize, source.get(x, y));
                mask.set(dx as usize, dy as usize);
            }
        }
    }

    let mapped = mask.data.iter().filter(|&&b| b).count();
    if mapped == 0 {
        return Err(Error::EmptyWarp);
    }

    // Gap-filling pass. At least one cell is marked, so the expanding
    // window always terminates.
    let mut holes = 0usize;
    for x in 0..sink_width {
        for y in 0..sink_height {
            if !mask.get(x, y) {
                let px = nearest_mean(&sink, &mask, x, y);
                sink.set(x, y, px);
                holes += 1;
            }
        }
    }

    debug!("warp: {mapped} cells forward-mapped, {holes} filled by interpolation");
    Ok(sink)
}

/// Mean color of the marked cells on the border of the smallest expanding
/// window around (x, y) that contains at least one.
///
/// Only the border is sampled: left and right columns in full, then top and
/// bottom rows in full (a square window is cheaper than a disk). A corner
/// cell sits on both a sampled column and a sampled row and contributes
/// twice to the mean; a window clipped down to a single column or row is
/// walked once. Channel sums accumulate in u64 and the means are truncated,
/// not rounded.
fn nearest_mean(sink: &RgbaImage, mask: &FilledMask, x: usize, y: usize) -> Rgba8 {
    let mut radius = 1usize;
    loop {
        let x_min = x.saturating_sub(radius);
        let y_min = y.saturating_sub(radius);
        let x_max = (x + radius).min(sink.w - 1);
        let y_max = (y + radius).min(sink.h - 1);

        let mut sum = [0u64; 4];
        let mut count = 0u64;
        let mut tally = |i: usize, j: usize| {
            if mask.get(i, j) {
                let px = sink.get(i, j);
                sum[0] += u64::from(px.r);
                sum[1] += u64::from(px.g);
                sum[2] += u64::from(px.b);
                sum[3] += u64::from(px.a);
                count += 1;
            }
        };

        let col_pair = [x_min, x_max];
        let cols = if x_min == x_max {
            &col_pair[..1]
        } else {
            &col_pair[..]
        };
        for &i in cols {
            for j in y_min..=y_max {
                tally(i, j);
            }
        }
        let row_pair = [y_min, y_max];
        let rows = if y_min == y_max {
            &row_pair[..1]
        } else {
            &row_pair[..]
        };
        for &j in rows {
            for i in x_min..=x_max {
                tally(i, j);
            }
        }

        if count > 0 {
            return Rgba8::new(
                (sum[0] / count) as u8,
                (sum[1] / count) as u8,
                (sum[2] / count) as u8,
                (sum[3] / count) as u8,
            );
        }
        radius += 1;
    }
}
