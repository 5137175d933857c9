use crate::event_queue::EventQueue;
use crate::geom::LineSegment;
use crate::slice::{chain_x_at, Side, Slice};
use crate::{InternalError, WrapError};

/// The mutable set of corridors produced by the sweep so far, ordered
/// left-to-right and non-overlapping in x over any shared y-band.
pub(crate) struct SliceSet {
    pub(crate) slices: Vec<Slice>,
    pub(crate) trace: bool,
}

impl SliceSet {
    pub fn new(trace: bool) -> Self {
        SliceSet {
            slices: Vec::new(),
            trace,
        }
    }

    pub fn clear(&mut self) {
        self.slices.clear();
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Advances the sweep so that the slices describe the boundary over
    /// the whole band `[band_top, band_bottom]`.
    ///
    /// Drains every pending event starting at or above `band_bottom`, in
    /// sweep order. An event either continues an existing wall, or opens
    /// a new corridor together with the event that follows it: downward
    /// edges at a local minimum alternate left/right wall in queue
    /// order, so openers always come in pairs.
    pub fn extend_to_band(
        &mut self,
        queue: &mut EventQueue,
        band_top: f32,
        band_bottom: f32,
        tolerance: f32,
    ) -> Result<(), WrapError> {
        loop {
            match queue.peek() {
                Some(next) if next.from.y <= band_bottom + tolerance => {}
                _ => break,
            }
            let edge = match queue.pop() {
                Some(edge) => edge,
                None => break,
            };

            self.level_all(tolerance)?;
            self.merge_and_drop(band_top, tolerance);

            if self.try_extend_chain(&edge, tolerance) {
                continue;
            }

            let partner = queue.pop().ok_or(InternalError::UnpairedSweepEvent)?;
            if (partner.from.y - edge.from.y).abs() > tolerance {
                return Err(InternalError::UnpairedSweepEvent.into());
            }
            self.insert_pair(edge, partner, tolerance);
        }

        self.level_all(tolerance)?;
        self.merge_and_drop(band_top, tolerance);
        self.trim_consumed(band_top, tolerance);

        wrap_log!(
            self,
            "slices at band {}..{}: {:?}",
            band_top,
            band_bottom,
            self.slices
        );

        Ok(())
    }

    /// Pushes the edge onto the wall it continues, if any.
    fn try_extend_chain(&mut self, edge: &LineSegment<f32>, tolerance: f32) -> bool {
        for slice in &mut self.slices {
            for side in [Side::Left, Side::Right].iter().copied() {
                let chain = slice.chain_mut(side);
                if let Some(last) = chain.last() {
                    if (last.to - edge.from).square_length() <= tolerance * tolerance {
                        chain.push(*edge);
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Opens a new corridor from a pair of events at a local extremum.
    ///
    /// The pair lands either left of all corridors, inside one (which it
    /// splits in two), or right of all corridors. Queue order guarantees
    /// `first` is the left member of the pair.
    fn insert_pair(&mut self, first: LineSegment<f32>, second: LineSegment<f32>, tolerance: f32) {
        let x = first.from.x.min(second.from.x);
        let y = first.from.y;

        for i in 0..self.slices.len() {
            let lx = chain_x_at(&self.slices[i].left, y, tolerance);
            let rx = chain_x_at(&self.slices[i].right, y, tolerance);

            if x < lx - tolerance {
                wrap_log!(self, "open corridor left of slice {}", i);
                self.slices.insert(i, Slice::new(first, second));
                return;
            }
            if x <= rx + tolerance {
                // A local extremum inside the corridor: the corridor
                // splits around it. `first` leans left and walls the
                // left part, `second` walls the right part.
                wrap_log!(self, "split slice {} at x={} y={}", i, x, y);
                let old_right = std::mem::replace(&mut self.slices[i].right, vec![first]);
                self.slices.insert(
                    i + 1,
                    Slice {
                        left: vec![second],
                        right: old_right,
                    },
                );
                return;
            }
        }

        wrap_log!(self, "open corridor right of all slices");
        self.slices.push(Slice::new(first, second));
    }

    fn level_all(&mut self, tolerance: f32) -> Result<(), InternalError> {
        for slice in &mut self.slices {
            slice.level(tolerance)?;
        }
        Ok(())
    }

    /// Removes corridors that have fully closed above `y` and merges
    /// adjacent corridors whose separating walls have ended.
    fn merge_and_drop(&mut self, y: f32, tolerance: f32) {
        self.slices.retain(|slice| {
            !(slice.exhausted(Side::Left, y, tolerance)
                && slice.exhausted(Side::Right, y, tolerance))
        });

        let mut i = 0;
        while i + 1 < self.slices.len() {
            if self.slices[i].exhausted(Side::Right, y, tolerance)
                && self.slices[i + 1].exhausted(Side::Left, y, tolerance)
            {
                wrap_log!(self, "merge slices {} and {}", i, i + 1);
                let right_part = self.slices.remove(i + 1);
                self.slices[i].right = right_part.right;
            } else {
                i += 1;
            }
        }
    }

    fn trim_consumed(&mut self, y: f32, tolerance: f32) {
        for slice in &mut self.slices {
            slice.trim_consumed(y, tolerance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use lyon_path::polygon::Polygon;

    const TOLERANCE: f32 = 0.0001;

    fn slice_set_for(points: &[crate::math::Point], band_bottom: f32) -> SliceSet {
        let mut queue = EventQueue::from_path(
            TOLERANCE,
            Polygon {
                points,
                closed: true,
            }
            .path_events(),
        )
        .unwrap();
        let top = queue.top_y();
        let mut slices = SliceSet::new(false);
        slices
            .extend_to_band(&mut queue, top, band_bottom, TOLERANCE)
            .unwrap();
        slices
    }

    #[test]
    fn rectangle_is_one_corridor() {
        let slices = slice_set_for(
            &[
                point(0.0, 0.0),
                point(100.0, 0.0),
                point(100.0, 50.0),
                point(0.0, 50.0),
            ],
            50.0,
        );

        assert_eq!(slices.len(), 1);
        let (left, right) = slices.slices[0].band_bounds(0.0, 50.0, TOLERANCE).unwrap();
        assert_eq!(left, 0.0);
        assert_eq!(right, 100.0);
    }

    #[test]
    fn bottom_notch_splits_the_corridor() {
        // A rectangle with a triangular notch rising from the bottom
        // edge to (100, 40).
        let slices = slice_set_for(
            &[
                point(0.0, 0.0),
                point(200.0, 0.0),
                point(200.0, 100.0),
                point(120.0, 100.0),
                point(100.0, 40.0),
                point(80.0, 100.0),
                point(0.0, 100.0),
            ],
            60.0,
        );

        assert_eq!(slices.len(), 2);
        let (left, right) = slices.slices[0].band_bounds(40.0, 70.0, TOLERANCE).unwrap();
        assert_eq!(left, 0.0);
        assert!(right < 100.0);
        let (left, right) = slices.slices[1].band_bounds(40.0, 70.0, TOLERANCE).unwrap();
        assert!(left > 100.0);
        assert_eq!(right, 200.0);
    }

    #[test]
    fn arms_of_a_u_merge_below_the_gap() {
        let u_shape = [
            point(0.0, 0.0),
            point(30.0, 0.0),
            point(30.0, 60.0),
            point(70.0, 60.0),
            point(70.0, 0.0),
            point(100.0, 0.0),
            point(100.0, 100.0),
            point(0.0, 100.0),
        ];

        let slices = slice_set_for(&u_shape, 30.0);
        assert_eq!(slices.len(), 2);

        let mut queue = EventQueue::from_path(
            TOLERANCE,
            Polygon {
                points: &u_shape,
                closed: true,
            }
            .path_events(),
        )
        .unwrap();
        let mut slices = SliceSet::new(false);
        slices
            .extend_to_band(&mut queue, 0.0, 30.0, TOLERANCE)
            .unwrap();
        assert_eq!(slices.len(), 2);

        // Once the band passes the inner walls' bottom the corridor
        // between the arms has closed and the arms merge.
        slices
            .extend_to_band(&mut queue, 60.0, 75.0, TOLERANCE)
            .unwrap();
        assert_eq!(slices.len(), 1);
        let (left, right) = slices.slices[0].band_bounds(60.0, 75.0, TOLERANCE).unwrap();
        assert_eq!(left, 0.0);
        assert_eq!(right, 100.0);
    }
}
