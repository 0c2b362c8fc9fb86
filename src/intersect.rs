//! Exact segment/segment intersection classification.
//!
//! All branch decisions are signs of `robust::orient2d` over original
//! input coordinates, so the *classification* (none / single point /
//! collinear overlap) is exact even though a proper-crossing point is
//! itself computed in floating point. Touch points and overlap endpoints
//! are always original vertices and therefore exact.

use geo_types::Coord;

/// Sign of the orientation of `c` relative to the directed line `a → b`:
/// `1` = left (counter-clockwise), `-1` = right, `0` = collinear.
pub(crate) fn orient(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> i8 {
    let v = robust::orient2d(
        robust::Coord { x: a.x, y: a.y },
        robust::Coord { x: b.x, y: b.y },
        robust::Coord { x: c.x, y: c.y },
    );
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Exact point-on-segment test (`p` collinear with and within `[a, b]`).
pub(crate) fn on_segment(a: Coord<f64>, b: Coord<f64>, p: Coord<f64>) -> bool {
    if orient(a, b, p) != 0 {
        return false;
    }
    within_span(a, b, p)
}

/// `p` within the axis span of `[a, b]`; only meaningful when `p` is
/// already known to be collinear with the segment.
fn within_span(a: Coord<f64>, b: Coord<f64>, p: Coord<f64>) -> bool {
    if (b.x - a.x).abs() >= (b.y - a.y).abs() {
        p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x)
    } else {
        p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
    }
}

/// Monotone parameter of a collinear point along `a → b`: the dominant
/// axis coordinate, sign-normalized so it increases from `a` to `b`.
/// Original vertices map to exact parameters.
pub(crate) fn axis_param(a: Coord<f64>, b: Coord<f64>, p: Coord<f64>) -> f64 {
    if (b.x - a.x).abs() >= (b.y - a.y).abs() {
        if b.x >= a.x {
            p.x
        } else {
            -p.x
        }
    } else if b.y >= a.y {
        p.y
    } else {
        -p.y
    }
}

/// Result of intersecting two non-degenerate segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SegSeg {
    /// No common point.
    None,
    /// Exactly one common point: an endpoint touch, a vertex lying on
    /// the other segment's interior, or a proper interior crossing
    /// (the only case with a computed, inexact coordinate).
    Point(Coord<f64>),
    /// Collinear overlap of positive length; endpoints are original
    /// vertices, ordered along the first segment's direction.
    Overlap(Coord<f64>, Coord<f64>),
}

/// Classify the intersection of segments `[p1, p2]` and `[q1, q2]`.
pub(crate) fn seg_seg(
    p1: Coord<f64>,
    p2: Coord<f64>,
    q1: Coord<f64>,
    q2: Coord<f64>,
) -> SegSeg {
    // Envelope reject.
    if p1.x.max(p2.x) < q1.x.min(q2.x)
        || q1.x.max(q2.x) < p1.x.min(p2.x)
        || p1.y.max(p2.y) < q1.y.min(q2.y)
        || q1.y.max(q2.y) < p1.y.min(p2.y)
    {
        return SegSeg::None;
    }

    let o1 = orient(q1, q2, p1);
    let o2 = orient(q1, q2, p2);
    if o1 != 0 && o1 == o2 {
        return SegSeg::None;
    }
    let o3 = orient(p1, p2, q1);
    let o4 = orient(p1, p2, q2);
    if o3 != 0 && o3 == o4 {
        return SegSeg::None;
    }

    if o1 == 0 && o2 == 0 {
        return collinear_overlap(p1, p2, q1, q2);
    }

    // At most one common point; a zero orientation pins it to an
    // original vertex.
    if o1 == 0 {
        return if within_span(q1, q2, p1) {
            SegSeg::Point(p1)
        } else {
            SegSeg::None
        };
    }
    if o2 == 0 {
        return if within_span(q1, q2, p2) {
            SegSeg::Point(p2)
        } else {
            SegSeg::None
        };
    }
    if o3 == 0 {
        return if within_span(p1, p2, q1) {
            SegSeg::Point(q1)
        } else {
            SegSeg::None
        };
    }
    if o4 == 0 {
        return if within_span(p1, p2, q2) {
            SegSeg::Point(q2)
        } else {
            SegSeg::None
        };
    }

    // Proper crossing: opposite strict orientations on both sides.
    SegSeg::Point(line_crossing(p1, p2, q1, q2))
}

/// Crossing point of two segments known to cross properly.
fn line_crossing(p1: Coord<f64>, p2: Coord<f64>, q1: Coord<f64>, q2: Coord<f64>) -> Coord<f64> {
    let dp = Coord {
        x: p2.x - p1.x,
        y: p2.y - p1.y,
    };
    let dq = Coord {
        x: q2.x - q1.x,
        y: q2.y - q1.y,
    };
    let denom = dp.x * dq.y - dp.y * dq.x;
    let t = ((q1.x - p1.x) * dq.y - (q1.y - p1.y) * dq.x) / denom;
    Coord {
        x: p1.x + t * dp.x,
        y: p1.y + t * dp.y,
    }
}

/// Overlap of two collinear segments.
fn collinear_overlap(
    p1: Coord<f64>,
    p2: Coord<f64>,
    q1: Coord<f64>,
    q2: Coord<f64>,
) -> SegSeg {
    // Parameterize all four vertices along the first segment.
    let tp1 = axis_param(p1, p2, p1);
    let tp2 = axis_param(p1, p2, p2);
    let tq1 = axis_param(p1, p2, q1);
    let tq2 = axis_param(p1, p2, q2);

    let (plo, phi) = (tp1.min(tp2), tp1.max(tp2));
    let (qlo, qhi) = (tq1.min(tq2), tq1.max(tq2));

    let lo = plo.max(qlo);
    let hi = phi.min(qhi);
    if lo > hi {
        return SegSeg::None;
    }

    let vertex_at = |t: f64| -> Coord<f64> {
        if t == tp1 {
            p1
        } else if t == tp2 {
            p2
        } else if t == tq1 {
            q1
        } else {
            q2
        }
    };

    if lo == hi {
        return SegSeg::Point(vertex_at(lo));
    }
    SegSeg::Overlap(vertex_at(lo), vertex_at(hi))
}
