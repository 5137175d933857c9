use crate::geom::LineSegment;
use crate::{InvalidInput, WrapError};

use lyon_path::PathEvent;

use core::cmp::Ordering;

/// A sorted queue of directed boundary edges for the sweep.
///
/// Every non-horizontal edge of the boundary contributes one event,
/// normalized so that `from.y <= to.y`. Events are ordered top-to-bottom,
/// then left-to-right, and edges sharing their start point are ordered by
/// orientation so that the left and right walls of a corridor are
/// discovered in matching pairs. The queue is drained strictly in order
/// and never re-sorted.
pub struct EventQueue {
    edges: Vec<LineSegment<f32>>,
    first: usize,
    min_y: f32,
    max_y: f32,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue {
            edges: Vec::new(),
            first: 0,
            min_y: f32::MAX,
            max_y: f32::MIN,
        }
    }

    /// Builds the queue from a path, dropping horizontal edges.
    ///
    /// Curve events are skipped: the sweep only consumes straight edges,
    /// callers are expected to flatten beforehand. An open contour or a
    /// non-finite coordinate fails fast with `InvalidInput`.
    pub fn from_path<Iter>(tolerance: f32, path: Iter) -> Result<Self, WrapError>
    where
        Iter: IntoIterator<Item = PathEvent>,
    {
        let mut queue = EventQueue::new();

        for evt in path {
            match evt {
                PathEvent::Begin { .. } => {}
                PathEvent::Line { from, to } => {
                    queue.push(from, to, tolerance)?;
                }
                PathEvent::End { last, first, close } => {
                    if !close {
                        return Err(InvalidInput::UnclosedContour.into());
                    }
                    queue.push(last, first, tolerance)?;
                }
                // Curved boundary segments are not supported, see the
                // crate documentation.
                PathEvent::Quadratic { .. } | PathEvent::Cubic { .. } => {}
            }
        }

        queue.edges.sort_by(compare_events);

        Ok(queue)
    }

    fn push(
        &mut self,
        from: crate::math::Point,
        to: crate::math::Point,
        tolerance: f32,
    ) -> Result<(), WrapError> {
        if !from.x.is_finite() || !from.y.is_finite() || !to.x.is_finite() || !to.y.is_finite() {
            return Err(InvalidInput::PositionIsNaN.into());
        }

        // Horizontal edges never generate sweep state.
        if (from.y - to.y).abs() <= tolerance {
            return Ok(());
        }

        let edge = if from.y < to.y {
            LineSegment { from, to }
        } else {
            LineSegment { from: to, to: from }
        };

        self.min_y = self.min_y.min(edge.from.y);
        self.max_y = self.max_y.max(edge.to.y);
        self.edges.push(edge);

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The next event to be drained, if any.
    pub(crate) fn peek(&self) -> Option<&LineSegment<f32>> {
        self.edges.get(self.first)
    }

    pub(crate) fn pop(&mut self) -> Option<LineSegment<f32>> {
        let edge = self.edges.get(self.first).cloned();
        if edge.is_some() {
            self.first += 1;
        }
        edge
    }

    /// The topmost y coordinate of the boundary.
    pub fn top_y(&self) -> f32 {
        self.min_y
    }

    /// The bottommost y coordinate of the boundary.
    ///
    /// The orchestrator's termination bound: no band below this can hold
    /// a placement.
    pub fn bottom_y(&self) -> f32 {
        self.max_y
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_events(a: &LineSegment<f32>, b: &LineSegment<f32>) -> Ordering {
    match a.from.y.partial_cmp(&b.from.y) {
        Some(Ordering::Equal) | None => {}
        Some(order) => return order,
    }
    match a.from.x.partial_cmp(&b.from.x) {
        Some(Ordering::Equal) | None => {}
        Some(order) => return order,
    }

    // Coincident start points: the edge turning more clockwise (leaning
    // further left, for downward edges) sorts first.
    let cross = a.to_vector().cross(b.to_vector());
    if cross < 0.0 {
        Ordering::Less
    } else if cross > 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use lyon_path::polygon::Polygon;

    #[test]
    fn normalized_and_sorted() {
        let triangle = [point(160.0, 20.0), point(210.0, 100.0), point(110.0, 100.0)];
        let mut queue = EventQueue::from_path(
            0.0001,
            Polygon {
                points: &triangle,
                closed: true,
            }
            .path_events(),
        )
        .unwrap();

        // The bottom edge is horizontal and dropped.
        assert_eq!(queue.top_y(), 20.0);
        assert_eq!(queue.bottom_y(), 100.0);

        // Both remaining edges are normalized to start at the apex; the
        // left-leaning one comes out first.
        let first = queue.pop().unwrap();
        let second = queue.pop().unwrap();
        assert_eq!(first.from, point(160.0, 20.0));
        assert_eq!(first.to, point(110.0, 100.0));
        assert_eq!(second.from, point(160.0, 20.0));
        assert_eq!(second.to, point(210.0, 100.0));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn open_contour_is_rejected() {
        let mut builder = lyon_path::Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(10.0, 0.0));
        builder.line_to(point(10.0, 10.0));
        builder.end(false);
        let path = builder.build();

        assert_eq!(
            EventQueue::from_path(0.0001, path.iter()).err(),
            Some(WrapError::InvalidInput(InvalidInput::UnclosedContour)),
        );
    }
}
