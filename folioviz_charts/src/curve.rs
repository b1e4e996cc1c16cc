// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve interpolation for line and area series.
//!
//! [`monotone_x`] is a cubic interpolation that preserves monotonicity in y between samples
//! (Steffen's method), assuming the samples are ordered by x. It never overshoots a local
//! extremum, which keeps value curves from dipping below a baseline they never reach.

use core::ops::Range;

use kurbo::{BezPath, Point};
use smallvec::SmallVec;

/// Splits `points` into maximal runs of finite samples.
///
/// A sample with a non-finite coordinate ends the current run; it is a gap, not an error.
pub fn defined_runs(points: &[Point]) -> SmallVec<[Range<usize>; 2]> {
    let mut runs = SmallVec::new();
    let mut start = None;
    for (i, p) in points.iter().enumerate() {
        let defined = p.x.is_finite() && p.y.is_finite();
        match (defined, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..points.len());
    }
    runs
}

/// Returns an open path through `points` using monotone cubic interpolation in x.
///
/// Consecutive coincident points are collapsed. Two points yield a straight segment; a single
/// point yields a bare `move_to`.
pub fn monotone_x(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some(first) = points.first() {
        path.move_to(*first);
        extend_monotone_x(&mut path, points);
    }
    path
}

/// Appends the curve through `points` to `path`, whose current point must be `points[0]`.
pub(crate) fn extend_monotone_x(path: &mut BezPath, points: &[Point]) {
    let mut pts: SmallVec<[Point; 16]> = SmallVec::new();
    for p in points {
        if pts.last() != Some(p) {
            pts.push(*p);
        }
    }
    let n = pts.len();
    if n < 2 {
        return;
    }
    if n == 2 {
        path.line_to(pts[1]);
        return;
    }

    let mut tangents: SmallVec<[f64; 16]> = SmallVec::from_elem(0.0, n);
    for i in 1..n - 1 {
        tangents[i] = interior_slope(pts[i - 1], pts[i], pts[i + 1]);
    }
    tangents[0] = end_slope(pts[0], pts[1], tangents[1]);
    tangents[n - 1] = end_slope(pts[n - 2], pts[n - 1], tangents[n - 2]);

    for i in 0..n - 1 {
        let (p0, p1) = (pts[i], pts[i + 1]);
        let dx = (p1.x - p0.x) / 3.0;
        path.curve_to(
            Point::new(p0.x + dx, p0.y + dx * tangents[i]),
            Point::new(p1.x - dx, p1.y - dx * tangents[i + 1]),
            p1,
        );
    }
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Tangent at `p1` from the secants on either side.
fn interior_slope(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = (p1.y - p0.y) / h0;
    let s1 = (p2.y - p1.y) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_nan() { 0.0 } else { t }
}

/// Tangent at an endpoint of the segment `p0..p1`, given the tangent `t` at the other end.
fn end_slope(p0: Point, p1: Point, t: f64) -> f64 {
    let h = p1.x - p0.x;
    if h == 0.0 {
        t
    } else {
        (3.0 * (p1.y - p0.y) / h - t) / 2.0
    }
}
