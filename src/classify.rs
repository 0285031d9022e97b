//! Anchor classification: dispatching four unordered pixels onto the four
//! corners of the destination rectangle.
//!
//! The plane is split horizontally and vertically to dispatch anchors on the
//! x and y axes. Possible configurations:
//!
//! - one anchor in each of the four partitions: assignment is immediate;
//! - two anchors exactly on a split segment (e.g. a lozenge): impossible;
//! - two anchors per partition along a diagonal: an x-first and a y-first
//!   split both produce a candidate assignment, and they generally disagree.
//!   The cyclic (trigonometric) order of the anchors around their barycentre
//!   is the ground truth for corner adjacency; the single candidate whose
//!   corner cycle matches it wins, and zero or two matching candidates mean
//!   the configuration is genuinely ambiguous.

use std::cmp::Ordering;

use nalgebra::Vector2;

use crate::error::{Ambiguity, Error, Result};
use crate::types::{AnchorSet, Corners, Pixel};

/// Position of a direction vector relative to a reference direction, both
/// taken from the same origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relation {
    Left,
    Right,
    /// Collinear, same direction.
    Equal,
    /// Collinear, opposite direction.
    Opposed,
    /// At least one of the vectors is zero.
    Undefined,
}

/// Classifies `p` against the ray through `refn` by the sign of the cross
/// product `p × refn`.
fn relation(p: Vector2<f64>, refn: Vector2<f64>) -> Relation {
    if (p.x == 0.0 && p.y == 0.0) || (refn.x == 0.0 && refn.y == 0.0) {
        return Relation::Undefined;
    }
    let cross = p.y * refn.x - refn.y * p.x;
    if cross == 0.0 {
        if p.x * refn.x > 0.0 {
            Relation::Equal
        } else {
            Relation::Opposed
        }
    } else if cross > 0.0 {
        Relation::Left
    } else {
        Relation::Right
    }
}

/// Orders `a` and `b` by their angle around `bar`, measured trigonometrically
/// from the ray through `refp`. `a` sorts before `b` when its angle to the
/// reference is smaller.
///
/// Pure in all four inputs so it can back any ordering facility. Returns
/// `Ordering::Equal` only for inputs the degeneracy checks already reject.
fn angular_order(a: Pixel, b: Pixel, refp: Pixel, bar: Vector2<f64>) -> Ordering {
    let rel = |p: Pixel| Vector2::new(f64::from(p.x) - bar.x, f64::from(p.y) - bar.y);
    let refn = rel(refp);
    let an = rel(a);
    let bn = rel(b);

    let a_ref = relation(an, refn);
    let a_b = relation(an, bn);
    let b_ref = relation(bn, refn);

    if a_b == Relation::Equal || a_b == Relation::Undefined {
        return Ordering::Equal;
    }
    if a_ref == Relation::Equal
        || (b_ref == Relation::Left && a_ref == Relation::Left && a_b == Relation::Right)
        || (b_ref == Relation::Right && (a_b == Relation::Right || a_ref == Relation::Left))
        || (b_ref == Relation::Opposed && a_ref == Relation::Left)
    {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// True when the corner cycle bl, br, tr, tl is a rotation of `order`.
fn matches_cycle(order: &[Pixel; 4], c: &Corners) -> bool {
    let Some(start) = order.iter().position(|p| *p == c.bl) else {
        return false;
    };
    order[(start + 1) % 4] == c.br
        && order[(start + 2) % 4] == c.tr
        && order[(start + 3) % 4] == c.tl
}

/// Candidate assignment from splitting on x first: the x-low pair forms the
/// left edge, the x-high pair the right edge, each ordered by y. Valid only
/// when the x median and both in-pair y comparisons are strict.
fn split_x_first(xsorted: &[Pixel; 4]) -> Option<Corners> {
    if xsorted[1].x == xsorted[2].x
        || xsorted[0].y == xsorted[1].y
        || xsorted[2].y == xsorted[3].y
    {
        return None;
    }
    let (bl, tl) = if xsorted[0].y < xsorted[1].y {
        (xsorted[0], xsorted[1])
    } else {
        (xsorted[1], xsorted[0])
    };
    let (br, tr) = if xsorted[2].y < xsorted[3].y {
        (xsorted[2], xsorted[3])
    } else {
        (xsorted[3], xsorted[2])
    };
    Some(Corners { bl, br, tr, tl })
}

/// Candidate assignment from splitting on y first: the y-low pair forms the
/// bottom edge, the y-high pair the top edge, each ordered by x.
fn split_y_first(ysorted: &[Pixel; 4]) -> Option<Corners> {
    if ysorted[1].y == ysorted[2].y
        || ysorted[0].x == ysorted[1].x
        || ysorted[2].x == ysorted[3].x
    {
        return None;
    }
    let (bl, br) = if ysorted[0].x < ysorted[1].x {
        (ysorted[0], ysorted[1])
    } else {
        (ysorted[1], ysorted[0])
    };
    let (tl, tr) = if ysorted[2].x < ysorted[3].x {
        (ysorted[2], ysorted[3])
    } else {
        (ysorted[3], ysorted[2])
    };
    Some(Corners { bl, br, tr, tl })
}

/// Assigns the four anchors to rectangle corners, or reports why the
/// configuration admits no unique assignment.
pub fn classify(anchors: &AnchorSet) -> Result<Corners> {
    let quad = anchors
        .quad()
        .ok_or(Error::WrongAnchorCount(anchors.len()))?;

    let mut xsorted = quad;
    xsorted.sort_by_key(|p| p.x);
    let mut ysorted = quad;
    ysorted.sort_by_key(|p| p.y);

    // One anchor per partition: the x median is strict and each x-pair's
    // y-range interleaves with the other's, so splitting on x then y places
    // every anchor unambiguously.
    if xsorted[1].x != xsorted[2].x
        && (xsorted[0].y < xsorted[2].y
            || xsorted[0].y < xsorted[3].y
            || xsorted[1].y < xsorted[2].y
            || xsorted[1].y < xsorted[3].y)
        && (xsorted[0].y > xsorted[2].y
            || xsorted[0].y > xsorted[3].y
            || xsorted[1].y > xsorted[2].y
            || xsorted[1].y > xsorted[3].y)
        && xsorted[2].y != xsorted[3].y
    {
        let (bl, tl) = if xsorted[0].y < xsorted[1].y {
            (xsorted[0], xsorted[1])
        } else {
            (xsorted[1], xsorted[0])
        };
        let (br, tr) = if xsorted[2].y < xsorted[3].y {
            (xsorted[2], xsorted[3])
        } else {
            (xsorted[3], xsorted[2])
        };
        return Ok(Corners { bl, br, tr, tl });
    }

    // Two anchors on a split axis: no split can separate them.
    if xsorted[1].x == xsorted[2].x || ysorted[1].y == ysorted[2].y {
        return Err(Ambiguity::SplitAxis.into());
    }

    // Two diagonal pairs. The barycentre anchors the angular order; an
    // anchor equal to it is not comparable, and two anchors collinear with
    // it make the order non-strict, so both are rejected outright.
    let bar = Vector2::new(
        quad.iter().map(|p| f64::from(p.x)).sum::<f64>() / 4.0,
        quad.iter().map(|p| f64::from(p.y)).sum::<f64>() / 4.0,
    );
    let rel = |p: Pixel| Vector2::new(f64::from(p.x) - bar.x, f64::from(p.y) - bar.y);
    for i in 0..4 {
        for j in (i + 1)..4 {
            match relation(rel(quad[i]), rel(quad[j])) {
                Relation::Equal | Relation::Opposed | Relation::Undefined => {
                    return Err(Ambiguity::BarycentreDegenerate.into());
                }
                Relation::Left | Relation::Right => {}
            }
        }
    }

    let refp = quad[0];
    let mut order = quad;
    order.sort_by(|a, b| angular_order(*a, *b, refp, bar));

    let x_candidate = split_x_first(&xsorted).filter(|c| matches_cycle(&order, c));
    let y_candidate = split_y_first(&ysorted).filter(|c| matches_cycle(&order, c));

    match (x_candidate, y_candidate) {
        (Some(c), None) | (None, Some(c)) => Ok(c),
        (Some(_), Some(_)) => Err(Ambiguity::TwoConsistentSplits.into()),
        (None, None) => Err(Ambiguity::NoConsistentSplit.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(points: [(i32, i32); 4]) -> AnchorSet {
        let mut anchors = AnchorSet::new();
        for (x, y) in points {
            assert!(anchors.push(Pixel::new(x, y)), "duplicate test point");
        }
        anchors
    }

    fn ambiguity(err: Error) -> Ambiguity {
        match err {
            Error::AmbiguousAnchors(a) => a,
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn unit_square_classifies_directly() {
        let c = classify(&set([(0, 0), (1, 0), (1, 1), (0, 1)])).unwrap();
        assert_eq!(
            c,
            Corners {
                bl: Pixel::new(0, 0),
                br: Pixel::new(1, 0),
                tr: Pixel::new(1, 1),
                tl: Pixel::new(0, 1),
            }
        );
    }

    #[test]
    fn direct_case_orders_each_pair_by_y() {
        // Fixture from the reference data set; one anchor per partition.
        let c = classify(&set([(32, 64), (80, 48), (48, 96), (16, 384)])).unwrap();
        assert_eq!(
            c,
            Corners {
                bl: Pixel::new(32, 64),
                br: Pixel::new(80, 48),
                tr: Pixel::new(48, 96),
                tl: Pixel::new(16, 384),
            }
        );
    }

    #[test]
    fn middle_pair_on_x_axis_is_rejected() {
        let err = classify(&set([(0, 1), (0, -1), (1, 0), (2, 0)])).unwrap_err();
        assert_eq!(ambiguity(err), Ambiguity::SplitAxis);
    }

    #[test]
    fn middle_pair_on_y_axis_is_rejected() {
        let err = classify(&set([(-1, 0), (1, 0), (0, 1), (0, 2)])).unwrap_err();
        assert_eq!(ambiguity(err), Ambiguity::SplitAxis);
    }

    #[test]
    fn lozenge_is_rejected() {
        let err = classify(&set([(-1, 0), (0, 1), (1, 0), (0, -1)])).unwrap_err();
        assert_eq!(ambiguity(err), Ambiguity::SplitAxis);
    }

    #[test]
    fn collinear_points_are_rejected() {
        let err = classify(&set([(0, 0), (1, 1), (2, 2), (3, 3)])).unwrap_err();
        assert_eq!(ambiguity(err), Ambiguity::BarycentreDegenerate);
    }

    #[test]
    fn pair_opposed_through_barycentre_is_rejected() {
        // (0,0) and (1,3) face each other exactly across the barycentre
        // (0.5, 1.5).
        let err = classify(&set([(0, 0), (1, 2), (1, 3), (0, 1)])).unwrap_err();
        assert_eq!(ambiguity(err), Ambiguity::BarycentreDegenerate);
    }

    #[test]
    fn diagonal_pairs_resolved_by_x_first_split() {
        // Two anchors low-left, two high-right; only the x-first assignment
        // agrees with the cyclic order around the barycentre.
        let c = classify(&set([(0, 0), (1, 2), (5, 6), (6, 3)])).unwrap();
        assert_eq!(
            c,
            Corners {
                bl: Pixel::new(0, 0),
                br: Pixel::new(6, 3),
                tr: Pixel::new(5, 6),
                tl: Pixel::new(1, 2),
            }
        );
    }

    #[test]
    fn diagonal_pairs_resolved_by_y_first_split() {
        // Mirror of the x-first fixture across y = x.
        let c = classify(&set([(0, 0), (2, 1), (6, 5), (3, 6)])).unwrap();
        assert_eq!(
            c,
            Corners {
                bl: Pixel::new(0, 0),
                br: Pixel::new(2, 1),
                tr: Pixel::new(6, 5),
                tl: Pixel::new(3, 6),
            }
        );
    }

    #[test]
    fn competing_splits_are_rejected() {
        // Both the x-first and the y-first assignment reproduce the cyclic
        // order; picking one would be a guess.
        let err = classify(&set([(0, 2), (1, 0), (5, 7), (6, 6)])).unwrap_err();
        assert_eq!(ambiguity(err), Ambiguity::TwoConsistentSplits);
    }

    #[test]
    fn no_valid_split_is_rejected() {
        // The low pair is horizontal and the high pair vertical: neither
        // split can order its corners strictly.
        let err = classify(&set([(0, 1), (1, 1), (5, 5), (5, 8)])).unwrap_err();
        assert_eq!(ambiguity(err), Ambiguity::NoConsistentSplit);
    }

    #[test]
    fn wrong_count_is_rejected() {
        let mut anchors = AnchorSet::new();
        anchors.push(Pixel::new(0, 0));
        anchors.push(Pixel::new(1, 0));
        anchors.push(Pixel::new(1, 1));
        match classify(&anchors).unwrap_err() {
            Error::WrongAnchorCount(3) => {}
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn classification_uses_every_anchor_once() {
        let anchors = set([(0, 0), (1, 2), (5, 6), (6, 3)]);
        let c = classify(&anchors).unwrap();
        let mut used = c.cycle().to_vec();
        used.sort_by_key(|p| (p.x, p.y));
        let mut input = anchors.as_slice().to_vec();
        input.sort_by_key(|p| (p.x, p.y));
        assert_eq!(used, input);
    }

    #[test]
    fn classification_is_insertion_order_invariant() {
        let expected = classify(&set([(0, 0), (1, 2), (5, 6), (6, 3)])).unwrap();
        for permuted in [
            [(1, 2), (5, 6), (6, 3), (0, 0)],
            [(6, 3), (0, 0), (5, 6), (1, 2)],
            [(5, 6), (6, 3), (1, 2), (0, 0)],
        ] {
            assert_eq!(classify(&set(permuted)).unwrap(), expected);
        }
    }
}
