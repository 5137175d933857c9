use crate::geom::LineSegment;
use crate::math::Box2D;
use crate::InternalError;

/// One of the two walls of a slice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// A vertical corridor of the boundary's interior.
///
/// The corridor is bounded by two chains of edges ordered top-to-bottom,
/// each normalized so that `from.y <= to.y`. The chains own their edges:
/// splitting a slice in two never leaves edges shared between slices.
#[derive(Clone, Debug)]
pub struct Slice {
    pub(crate) left: Vec<LineSegment<f32>>,
    pub(crate) right: Vec<LineSegment<f32>>,
}

/// The chain indices bounding a vertical band within one slice.
///
/// `None` means the band exceeds the slice's extent on that side, for
/// example because the sweep has not been extended far enough yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CornerEvents {
    pub top_left: Option<usize>,
    pub bottom_left: Option<usize>,
    pub top_right: Option<usize>,
    pub bottom_right: Option<usize>,
}

impl Slice {
    pub(crate) fn new(left: LineSegment<f32>, right: LineSegment<f32>) -> Self {
        Slice {
            left: vec![left],
            right: vec![right],
        }
    }

    /// The left wall, top-to-bottom.
    pub fn left_wall(&self) -> &[LineSegment<f32>] {
        &self.left
    }

    /// The right wall, top-to-bottom.
    pub fn right_wall(&self) -> &[LineSegment<f32>] {
        &self.right
    }

    pub(crate) fn chain(&self, side: Side) -> &[LineSegment<f32>] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub(crate) fn chain_mut(&mut self, side: Side) -> &mut Vec<LineSegment<f32>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// The y coordinate below which both walls are defined.
    pub(crate) fn top_y(&self) -> f32 {
        self.left[0].from.y.max(self.right[0].from.y)
    }

    /// Whether a wall has no extent left at or below `y`.
    pub(crate) fn exhausted(&self, side: Side, y: f32, tolerance: f32) -> bool {
        match self.chain(side).last() {
            Some(edge) => edge.to.y <= y + tolerance,
            None => true,
        }
    }

    /// Splits wall edges so that both chains break at the same set of y
    /// coordinates over the range they share.
    ///
    /// Band-wise reasoning (corner lookup, bounds) relies on the chains
    /// agreeing on their breakpoints.
    pub(crate) fn level(&mut self, tolerance: f32) -> Result<(), InternalError> {
        let mut li = 0;
        let mut ri = 0;
        while li < self.left.len() && ri < self.right.len() {
            let left_bottom = self.left[li].to.y;
            let right_bottom = self.right[ri].to.y;

            if (left_bottom - right_bottom).abs() <= tolerance {
                li += 1;
                ri += 1;
            } else if left_bottom < right_bottom {
                if left_bottom > self.right[ri].from.y + tolerance {
                    let (a, b) = split_at_y(&self.right[ri], left_bottom)?;
                    self.right[ri] = a;
                    self.right.insert(ri + 1, b);
                    ri += 1;
                }
                li += 1;
            } else {
                if right_bottom > self.left[li].from.y + tolerance {
                    let (a, b) = split_at_y(&self.left[li], right_bottom)?;
                    self.left[li] = a;
                    self.left.insert(li + 1, b);
                    li += 1;
                }
                ri += 1;
            }
        }

        Ok(())
    }

    /// Drops wall edges fully consumed above `y`.
    ///
    /// Each chain keeps at least its last edge so that exhaustion checks
    /// remain well-defined for corridors that have closed.
    pub(crate) fn trim_consumed(&mut self, y: f32, tolerance: f32) {
        while self.left.len() > 1 && self.left[0].to.y <= y + tolerance {
            self.left.remove(0);
        }
        while self.right.len() > 1 && self.right[0].to.y <= y + tolerance {
            self.right.remove(0);
        }
    }

    /// The wall edges bounding the band `[y, y + height]` on each side.
    pub fn corner_events(&self, y: f32, height: f32, tolerance: f32) -> CornerEvents {
        CornerEvents {
            top_left: segment_at(&self.left, y, tolerance),
            bottom_left: segment_at(&self.left, y + height, tolerance),
            top_right: segment_at(&self.right, y, tolerance),
            bottom_right: segment_at(&self.right, y + height, tolerance),
        }
    }

    /// The extremal wall coordinates over a vertical band: the rightmost
    /// point of the left wall and the leftmost point of the right wall.
    ///
    /// Returns `None` when either chain does not cover the whole band.
    pub(crate) fn band_bounds(&self, top: f32, bottom: f32, tolerance: f32) -> Option<(f32, f32)> {
        if !covers_band(&self.left, top, bottom, tolerance)
            || !covers_band(&self.right, top, bottom, tolerance)
        {
            return None;
        }

        let left = band_extremum_x(&self.left, top, bottom, f32::max);
        let right = band_extremum_x(&self.right, top, bottom, f32::min);

        Some((left, right))
    }

    /// Whether the rectangle lies entirely between this slice's walls.
    pub(crate) fn contains_rect(&self, rect: &Box2D, tolerance: f32) -> bool {
        match self.band_bounds(rect.min.y, rect.max.y, tolerance) {
            Some((left, right)) => {
                left <= rect.min.x + tolerance && right >= rect.max.x - tolerance
            }
            None => false,
        }
    }
}

/// The index of the topmost chain edge whose y-range contains `y`.
pub(crate) fn segment_at(chain: &[LineSegment<f32>], y: f32, tolerance: f32) -> Option<usize> {
    for (i, edge) in chain.iter().enumerate() {
        if y < edge.from.y - tolerance {
            return None;
        }
        if edge.to.y >= y - tolerance {
            return Some(i);
        }
    }
    None
}

/// The wall's x coordinate at `y`, clamped to the chain's extent.
pub(crate) fn chain_x_at(chain: &[LineSegment<f32>], y: f32, tolerance: f32) -> f32 {
    if let Some(first) = chain.first() {
        if y <= first.from.y {
            return first.from.x;
        }
    }
    if let Some(i) = segment_at(chain, y, tolerance) {
        return chain[i].solve_x_for_y(y);
    }
    match chain.last() {
        Some(edge) => edge.to.x,
        None => 0.0,
    }
}

fn covers_band(chain: &[LineSegment<f32>], top: f32, bottom: f32, tolerance: f32) -> bool {
    match (chain.first(), chain.last()) {
        (Some(first), Some(last)) => {
            first.from.y <= top + tolerance && last.to.y >= bottom - tolerance
        }
        _ => false,
    }
}

fn band_extremum_x(
    chain: &[LineSegment<f32>],
    top: f32,
    bottom: f32,
    select: fn(f32, f32) -> f32,
) -> f32 {
    let mut result = None;
    for edge in chain {
        let y0 = edge.from.y.max(top);
        let y1 = edge.to.y.min(bottom);
        if y1 < y0 {
            continue;
        }
        let x = select(edge.solve_x_for_y(y0), edge.solve_x_for_y(y1));
        result = Some(match result {
            Some(r) => select(r, x),
            None => x,
        });
    }
    // The chains cover the band when this is called.
    result.unwrap_or(0.0)
}

/// Splits a wall edge at the horizontal line `y`.
///
/// The intersection is expected to exist; a parallel or degenerate edge
/// here means the slice structure has desynchronized from the boundary.
pub(crate) fn split_at_y(
    edge: &LineSegment<f32>,
    y: f32,
) -> Result<(LineSegment<f32>, LineSegment<f32>), InternalError> {
    let mid = edge
        .horizontal_line_intersection(y)
        .ok_or(InternalError::MissingIntersection)?;

    Ok((
        LineSegment {
            from: edge.from,
            to: mid,
        },
        LineSegment {
            from: mid,
            to: edge.to,
        },
    ))
}
