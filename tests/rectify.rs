mod common;

use common::synthetic_image::gradient_rgba;
use perspector::error::{Ambiguity, Error};
use perspector::{process, sink_dimensions, AnchorSet, Pixel};

fn anchor_set(points: &[(i32, i32)]) -> AnchorSet {
    let mut anchors = AnchorSet::new();
    for &(x, y) in points {
        assert!(anchors.push(Pixel::new(x, y)), "bad fixture anchor ({x}, {y})");
    }
    anchors
}

#[test]
fn skewed_quad_rectifies_and_is_deterministic() {
    let source = gradient_rgba(64, 48);
    // A convex quad with one anchor per quadrant.
    let anchors = anchor_set(&[(5, 4), (60, 8), (55, 40), (8, 44)]);
    let (sink_w, sink_h) = sink_dimensions(&anchors, 4.0, 3.0).unwrap();

    let first = process(source.as_view(), &anchors, sink_w, sink_h).unwrap();
    assert_eq!((first.w, first.h), (sink_w, sink_h));

    // Forward mapping plus gap filling touched something: the output cannot
    // be the zero-initialized buffer.
    assert!(first.data.iter().any(|px| *px != Default::default()));

    // Same inputs, byte-identical output: scan-order tie-breaks and the
    // border-sampled interpolation are fully deterministic.
    let second = process(source.as_view(), &anchors, sink_w, sink_h).unwrap();
    assert_eq!(first, second);
}

#[test]
fn axis_aligned_anchors_reproduce_the_source_window() {
    let source = gradient_rgba(16, 12);
    let anchors = anchor_set(&[(0, 0), (15, 0), (15, 11), (0, 11)]);

    let sink = process(source.as_view(), &anchors, 15, 11).unwrap();
    for y in 0..11 {
        for x in 0..15 {
            assert_eq!(sink.get(x, y), source.get(x, y), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn ambiguous_anchors_produce_no_raster() {
    let source = gradient_rgba(8, 8);
    let anchors = anchor_set(&[(0, 0), (2, 2), (4, 4), (6, 6)]);
    match process(source.as_view(), &anchors, 8, 8) {
        Err(Error::AmbiguousAnchors(Ambiguity::BarycentreDegenerate)) => {}
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn incomplete_anchor_set_is_rejected() {
    let source = gradient_rgba(8, 8);
    let anchors = anchor_set(&[(0, 0), (7, 0), (7, 7)]);
    match process(source.as_view(), &anchors, 8, 8) {
        Err(Error::WrongAnchorCount(3)) => {}
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn oversized_sink_is_rejected_up_front() {
    let source = gradient_rgba(4, 4);
    let anchors = anchor_set(&[(0, 0), (3, 0), (3, 3), (0, 3)]);
    match process(source.as_view(), &anchors, 1 << 20, 1 << 20) {
        Err(Error::SizeOverflow { .. }) => {}
        other => panic!("unexpected result {other:?}"),
    }
}
