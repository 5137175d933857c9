use crate::geom::LineSegment;
use crate::math::{point, Point, Size};
use crate::slice::{segment_at, CornerEvents, Slice};

/// The shape of the pair of walls bounding a corner test, decided once
/// per test and dispatched by `match`.
///
/// The diagrams read top-down, left wall first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum WallConfiguration {
    /// Both walls start at the same point (a local extremum).
    CoincidentTop,
    /// Walls starting at the same y, the left one vertical or leaning
    /// away from the corridor.
    FlatTop,
    /// `\ \` — both walls slant right.
    Converging,
    /// `/ /` — both walls slant left.
    Diverging,
    /// `/ \` — the corridor widens below its top.
    WideningTop,
    /// `\ /` — the corridor narrows below its top.
    Narrowing,
    /// Degenerate walls (no vertical extent).
    NoSolution,
}

impl WallConfiguration {
    pub fn classify(
        left: &LineSegment<f32>,
        right: &LineSegment<f32>,
        tolerance: f32,
    ) -> WallConfiguration {
        let lv = left.to_vector();
        let rv = right.to_vector();

        if lv.y <= tolerance || rv.y <= tolerance {
            return WallConfiguration::NoSolution;
        }
        if (left.from - right.from).square_length() <= tolerance * tolerance {
            return WallConfiguration::CoincidentTop;
        }
        if (left.from.y - right.from.y).abs() <= tolerance && lv.x <= tolerance {
            return WallConfiguration::FlatTop;
        }
        if lv.x > tolerance && rv.x > tolerance {
            return WallConfiguration::Converging;
        }
        if lv.x < -tolerance && rv.x < -tolerance {
            return WallConfiguration::Diverging;
        }
        if lv.x <= tolerance && rv.x >= -tolerance {
            return WallConfiguration::WideningTop;
        }

        WallConfiguration::Narrowing
    }
}

/// Finds the highest top-left position at or below `y` at which a box of
/// `size` spans the gap between two wall edges.
///
/// Each wall constrains the box at one end of its height: a wall slanting
/// right is tightest against the box's bottom edge if it is the left
/// wall, against its top edge if it is the right wall, and symmetrically
/// for walls slanting left. With those two sample offsets fixed, the
/// available span is linear in y, so every slanted configuration reduces
/// to one closed-form solve along the walls. Candidates leaving either
/// wall edge's y-range are rejected; the caller decides whether to probe
/// further down the chain or give up on the band.
pub(crate) fn point_for_box_in_corner(
    left: &LineSegment<f32>,
    right: &LineSegment<f32>,
    y: f32,
    size: Size,
    tolerance: f32,
) -> Option<Point> {
    let config = WallConfiguration::classify(left, right, tolerance);

    let lv = left.to_vector();
    let rv = right.to_vector();
    let l_off = if lv.x > tolerance { size.height } else { 0.0 };
    let r_off = if rv.x > tolerance { 0.0 } else { size.height };

    let gap_at = |yy: f32| right.solve_x_for_y(yy + r_off) - left.solve_x_for_y(yy + l_off);
    let place_at = |yy: f32| point(left.solve_x_for_y(yy + l_off), yy);

    let fit_at = |yy: f32| {
        if gap_at(yy) + tolerance >= size.width {
            Some(place_at(yy))
        } else {
            None
        }
    };
    let descend = || {
        let widening = rv.x / rv.y - lv.x / lv.y;
        if widening <= tolerance {
            return None;
        }
        let yy = y + (size.width - gap_at(y)) / widening;
        if yy > left.to.y + tolerance || yy > right.to.y + tolerance {
            return None;
        }
        Some(place_at(yy))
    };

    match config {
        WallConfiguration::NoSolution => None,
        // The corridor only gets tighter below this band.
        WallConfiguration::Narrowing => fit_at(y),
        // The remaining configurations share the linear solve: take the
        // band's top if the span is already wide enough, otherwise slide
        // down the walls to the exact y where the box starts to fit.
        WallConfiguration::CoincidentTop
        | WallConfiguration::FlatTop
        | WallConfiguration::Converging
        | WallConfiguration::Diverging
        | WallConfiguration::WideningTop => fit_at(y).or_else(descend),
    }
}

/// Fallback for bands where no corner of the slice admits the box: drop
/// a vertical probe from the left wall's lower endpoint and solve again
/// with the probe as a synthetic left wall.
///
/// This catches corridors whose left wall bends away below the corner
/// edge, where the corner solve rejects the band because its candidate
/// leaves the wall edge's y-range.
pub(crate) fn point_for_box_at_edge(
    slice: &Slice,
    corners: &CornerEvents,
    y: f32,
    size: Size,
    tolerance: f32,
) -> Option<Point> {
    let li = corners.top_left?;
    let anchor = slice.left[li].to;
    let probe_top = anchor.y.max(y);

    let ri = segment_at(&slice.right, probe_top, tolerance)?;
    let right = slice.right[ri];

    let probe_bottom = slice
        .right
        .last()
        .map(|edge| edge.to.y)?
        .max(probe_top + size.height);
    let probe = LineSegment {
        from: point(anchor.x, probe_top),
        to: point(anchor.x, probe_bottom),
    };

    point_for_box_in_corner(&probe, &right, probe_top, size, tolerance)
}
