//! Projective transform estimation from four corner correspondences.
//!
//! A 2D perspective transformation is not linear, so the map is expressed in
//! homogeneous coordinates as a 3×3 matrix determined up to scale: 8 unknown
//! coefficients, two direct-linear-transform equations per correspondence.
//! The matrix is recovered as the null-space of the resulting homogeneous
//! system via singular value decomposition.

use nalgebra::{DMatrix, Matrix3, Vector3};

use crate::error::{Error, Result};
use crate::types::{Coord, Corners};

/// System of equations dimensions: 9 unknowns (the matrix entries in
/// row-major order), 8 populated equations plus one zero row.
const DIM: usize = 9;

/// Builds the homogeneous system sending bl→(0,0), br→(w,0), tr→(w,h),
/// tl→(0,h). Each correspondence (x,y)→(x′,y′) contributes the rows
/// `[x, y, 1, 0, 0, 0, −x′x, −x′y, −x′]` and
/// `[0, 0, 0, x, y, 1, −y′x, −y′y, −y′]`.
fn correspondence_system(corners: &Corners, width: Coord, height: Coord) -> DMatrix<f64> {
    let w = f64::from(width);
    let h = f64::from(height);
    let targets = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];

    let mut system = DMatrix::<f64>::zeros(DIM, DIM);
    for (k, (src, (tx, ty))) in corners.cycle().into_iter().zip(targets).enumerate() {
        let x = f64::from(src.x);
        let y = f64::from(src.y);
        let r = 2 * k;
        system[(r, 0)] = x;
        system[(r, 1)] = y;
        system[(r, 2)] = 1.0;
        system[(r, 6)] = -tx * x;
        system[(r, 7)] = -tx * y;
        system[(r, 8)] = -tx;
        system[(r + 1, 3)] = x;
        system[(r + 1, 4)] = y;
        system[(r + 1, 5)] = 1.0;
        system[(r + 1, 6)] = -ty * x;
        system[(r + 1, 7)] = -ty * y;
        system[(r + 1, 8)] = -ty;
    }
    system
}

/// Estimates the projective matrix mapping `corners` onto the axis-aligned
/// `width` × `height` rectangle. The result is defined up to a nonzero scale
/// factor.
///
/// The system is rank 8 by construction for a classified, non-degenerate
/// quadrilateral; a decomposition that still fails to produce a finite
/// null-space vector is reported as [`Error::DegenerateSystem`] rather than
/// propagated.
pub fn estimate(corners: &Corners, width: Coord, height: Coord) -> Result<Matrix3<f64>> {
    let svd = correspondence_system(corners, width, height).svd(false, true);
    let v_t = svd.v_t.as_ref().ok_or(Error::DegenerateSystem)?;

    // Null-space solution: the right singular vector of the smallest
    // singular value. Located explicitly instead of assuming the
    // decomposition orders the spectrum.
    let mut min_idx = 0;
    for (i, s) in svd.singular_values.iter().enumerate() {
        if *s < svd.singular_values[min_idx] {
            min_idx = i;
        }
    }

    let mut entries = [0.0f64; DIM];
    for (j, e) in entries.iter_mut().enumerate() {
        *e = v_t[(min_idx, j)];
    }
    if entries.iter().any(|v| !v.is_finite()) || entries.iter().all(|v| *v == 0.0) {
        return Err(Error::DegenerateSystem);
    }
    Ok(Matrix3::from_row_slice(&entries))
}

/// Projects the pixel (x, y) through `m` and rounds half away from zero.
#[inline]
pub fn project(m: &Matrix3<f64>, x: Coord, y: Coord) -> (Coord, Coord) {
    let v = m * Vector3::new(f64::from(x), f64::from(y), 1.0);
    ((v.x / v.z).round() as Coord, (v.y / v.z).round() as Coord)
}
