use crate::corner::{point_for_box_at_edge, point_for_box_in_corner};
use crate::event_queue::EventQueue;
use crate::math::{point, Box2D, Point, Size};
use crate::sweep::SliceSet;
use crate::{InvalidInput, WrapError, WrapOptions, WrapResult};

use lyon_path::PathEvent;

/// Supplies the word boxes to lay out and receives the layout structure.
///
/// The engine pulls one box at a time, so a source can lazily measure
/// its content. For every pulled box, either `place_box` is called with
/// the chosen top-left origin, or the wrap ends with the box unplaced.
/// `end_of_slice` and `end_of_line` are only signalled between
/// placements; `end_of_wrap` is signalled exactly once, whatever way the
/// wrap terminates.
pub trait WordSource {
    /// Returns the size of the next box to place, or `None` when the
    /// source is exhausted.
    fn pull_box(&mut self) -> Option<Size>;

    /// Receives the top-left origin chosen for the most recently pulled
    /// box.
    fn place_box(&mut self, origin: Point);

    /// The most recently placed box was the last one fitting in its
    /// corridor.
    fn end_of_slice(&mut self) {}

    /// No corridor of the current band has room left: a hard line break.
    fn end_of_line(&mut self) {}

    /// No more boxes will be placed.
    fn end_of_wrap(&mut self) {}
}

/// A word wrap engine, placing boxes inside a closed boundary
/// top-to-bottom and left-to-right.
///
/// The wrap is a greedy, single-pass, line-oriented packer: once placed,
/// a box is never moved. Each invocation rebuilds its sweep state from
/// the boundary, so wrapping the same boundary and box sequence twice
/// yields identical placements.
pub struct WordWrap {
    options: WrapOptions,
    trace: bool,
    queue: EventQueue,
    slices: SliceSet,
    bottom: f32,
}

impl WordWrap {
    pub fn new() -> Self {
        Self::with_options(&WrapOptions::DEFAULT)
    }

    pub fn with_options(options: &WrapOptions) -> Self {
        WordWrap {
            options: *options,
            trace: options.trace,
            queue: EventQueue::new(),
            slices: SliceSet::new(options.trace),
            bottom: f32::MIN,
        }
    }

    pub fn options(&self) -> &WrapOptions {
        &self.options
    }

    /// Pulls boxes from the source and places them inside the boundary
    /// until the source or the boundary's vertical extent is exhausted.
    ///
    /// The boundary must consist of closed contours made of straight
    /// edges; curve events are skipped (callers flatten beforehand).
    /// Boxes that no band of the boundary can accommodate are left
    /// unplaced; this is not an error.
    pub fn place_word_boxes<Iter>(
        &mut self,
        boundary: Iter,
        source: &mut dyn WordSource,
    ) -> WrapResult
    where
        Iter: IntoIterator<Item = PathEvent>,
    {
        let result = self
            .initialize(boundary)
            .and_then(|_| self.wrap_loop(source));

        source.end_of_wrap();

        result
    }

    fn initialize<Iter>(&mut self, boundary: Iter) -> WrapResult
    where
        Iter: IntoIterator<Item = PathEvent>,
    {
        self.queue = EventQueue::from_path(self.options.tolerance, boundary)?;
        self.slices.clear();
        self.bottom = self.queue.bottom_y();
        Ok(())
    }

    fn wrap_loop(&mut self, source: &mut dyn WordSource) -> WrapResult {
        let mut box_size = match source.pull_box() {
            Some(size) => size,
            None => return Ok(()),
        };
        check_box(box_size)?;

        if self.queue.is_empty() {
            // A boundary without sweepable edges has no interior.
            return Ok(());
        }

        let top = self.queue.top_y();
        let (mut slice_idx, mut cursor) = match self.next_placement(top, box_size)? {
            Some(found) => found,
            None => return Ok(()),
        };
        let mut space = self.horizontal_space(slice_idx, cursor, box_size);

        loop {
            if box_size.width <= space + self.options.tolerance {
                wrap_log!(self, "place {:?} at {:?}", box_size, cursor);
                source.place_box(cursor);
                cursor.x += box_size.width;
                space -= box_size.width;

                box_size = match source.pull_box() {
                    Some(size) => size,
                    None => return Ok(()),
                };
                check_box(box_size)?;
                continue;
            }

            // No horizontal room left in this corridor.
            source.end_of_slice();

            if let Some((idx, origin, room)) = self.next_slice_in_band(slice_idx, cursor.y, box_size)
            {
                slice_idx = idx;
                cursor = origin;
                space = room;
                continue;
            }

            // No corridor of the band can take the box: hard line break.
            source.end_of_line();
            match self.next_placement(cursor.y + box_size.height, box_size)? {
                Some((idx, origin)) => {
                    slice_idx = idx;
                    cursor = origin;
                    space = self.horizontal_space(idx, origin, box_size);
                }
                // Vertical overflow: the remaining boxes stay unplaced.
                None => return Ok(()),
            }
        }
    }

    /// Searches band by band, from `from_y` down to the boundary's
    /// bottom, for the first corridor position admitting the box.
    fn next_placement(
        &mut self,
        from_y: f32,
        box_size: Size,
    ) -> Result<Option<(usize, Point)>, WrapError> {
        let tolerance = self.options.tolerance;
        let mut y = from_y;

        while y <= self.bottom + tolerance {
            self.slices
                .extend_to_band(&mut self.queue, y, y + box_size.height, tolerance)?;

            for i in 0..self.slices.len() {
                let slice = &self.slices.slices[i];
                // Corridors opening below the band are probed at their
                // own top.
                let band_top = y.max(slice.top_y());
                let corners = slice.corner_events(band_top, box_size.height, tolerance);

                let candidate = match (corners.top_left, corners.top_right) {
                    (Some(li), Some(ri)) => point_for_box_in_corner(
                        &slice.left[li],
                        &slice.right[ri],
                        band_top,
                        box_size,
                        tolerance,
                    )
                    .or_else(|| {
                        point_for_box_at_edge(slice, &corners, band_top, box_size, tolerance)
                    }),
                    _ => None,
                };

                if let Some(origin) = candidate {
                    let rect = Box2D::from_origin_and_size(origin, box_size);
                    if let Some(idx) = self.within_slices(&rect) {
                        wrap_log!(self, "placement in slice {} at {:?}", idx, origin);
                        return Ok(Some((idx, origin)));
                    }
                }
            }

            y += box_size.height;
        }

        Ok(None)
    }

    /// The first corridor right of `from_idx` whose walls leave room for
    /// the box over the current band.
    fn next_slice_in_band(
        &self,
        from_idx: usize,
        y: f32,
        box_size: Size,
    ) -> Option<(usize, Point, f32)> {
        let tolerance = self.options.tolerance;
        let bottom = y + box_size.height;

        for idx in (from_idx + 1)..self.slices.len() {
            if let Some((left, right)) = self.slices.slices[idx].band_bounds(y, bottom, tolerance) {
                if right - left + tolerance >= box_size.width {
                    return Some((idx, point(left, y), right - left));
                }
            }
        }

        None
    }

    /// Confirms a rectangle lies entirely within the corridor
    /// decomposition and returns the index of the corridor containing
    /// it.
    ///
    /// Rectangles whose vertical extent is not fully covered by a
    /// corridor's walls are rejected: the sweep may simply not have been
    /// extended far enough, and the band search will come back lower.
    fn within_slices(&self, rect: &Box2D) -> Option<usize> {
        self.slices
            .slices
            .iter()
            .position(|slice| slice.contains_rect(rect, self.options.tolerance))
    }

    /// The horizontal room left in a corridor, to the right of `origin`,
    /// over the band of one box.
    fn horizontal_space(&self, slice_idx: usize, origin: Point, box_size: Size) -> f32 {
        let band_bottom = origin.y + box_size.height;
        match self.slices.slices[slice_idx].band_bounds(origin.y, band_bottom, self.options.tolerance)
        {
            Some((_, right)) => right - origin.x,
            None => 0.0,
        }
    }
}

impl Default for WordWrap {
    fn default() -> Self {
        Self::new()
    }
}

fn check_box(size: Size) -> Result<(), WrapError> {
    if !size.width.is_finite() || !size.height.is_finite() {
        return Err(InvalidInput::PositionIsNaN.into());
    }
    if size.width <= 0.0 || size.height <= 0.0 {
        return Err(InvalidInput::ZeroSizeBox.into());
    }

    Ok(())
}
