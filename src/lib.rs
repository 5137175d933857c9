#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]

//! Layout of rectangular "word boxes" inside arbitrary closed shapes.
//!
//! This crate flows a sequence of boxes (typically measured words) through
//! the interior of a polygonal boundary, top-to-bottom and left-to-right,
//! so that text can fill non-rectangular shapes. The boundary is consumed
//! as an iterator of [`PathEvent`](lyon_path::PathEvent)s, which makes
//! `lyon_path::Path` and friends work directly as input.
//!
//! The engine decomposes the boundary incrementally with a vertical
//! sweep: at any moment the part of the shape the layout cursor has
//! reached is represented as a left-to-right list of *slices* (vertical
//! corridors bounded by a left and a right chain of edges). Each box is
//! placed by solving, per corridor, for the highest point at which it
//! spans the walls, and verified against the corridor decomposition
//! before it is committed.
//!
//! Boxes are pulled on demand from a [`WordSource`], which is also
//! notified of the layout structure (end of corridor, end of line, end of
//! the whole wrap), so the caller can map placements back to its own
//! text model.
//!
//! # Example
//!
//! ```
//! use shapewrap::{WordWrap, WordSource};
//! use shapewrap::math::{point, size, Point, Size};
//! use lyon_path::polygon::Polygon;
//!
//! // A source feeding a fixed list of word boxes and recording where
//! // they land.
//! struct Words {
//!     sizes: Vec<Size>,
//!     next: usize,
//!     placed: Vec<Point>,
//! }
//!
//! impl WordSource for Words {
//!     fn pull_box(&mut self) -> Option<Size> {
//!         let s = self.sizes.get(self.next).cloned();
//!         self.next += 1;
//!         s
//!     }
//!     fn place_box(&mut self, origin: Point) {
//!         self.placed.push(origin);
//!     }
//! }
//!
//! let boundary = [
//!     point(0.0, 0.0),
//!     point(100.0, 0.0),
//!     point(100.0, 50.0),
//!     point(0.0, 50.0),
//! ];
//!
//! let mut words = Words {
//!     sizes: vec![size(40.0, 10.0); 3],
//!     next: 0,
//!     placed: Vec::new(),
//! };
//!
//! let mut wrap = WordWrap::new();
//! wrap.place_word_boxes(
//!     Polygon { points: &boundary, closed: true }.path_events(),
//!     &mut words,
//! ).unwrap();
//!
//! assert_eq!(words.placed[0], point(0.0, 0.0));
//! assert_eq!(words.placed[1], point(40.0, 0.0));
//! // The third box does not fit on the first line.
//! assert_eq!(words.placed[2], point(0.0, 10.0));
//! ```

pub use lyon_path as path;
pub use lyon_path::geom;
pub use lyon_path::math;

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

macro_rules! wrap_log {
    ($obj:ident, $fmt:expr) => {
        if $obj.trace {
            println!($fmt);
        }
    };
    ($obj:ident, $fmt:expr, $($arg:tt)*) => {
        if $obj.trace {
            println!($fmt, $($arg)*);
        }
    };
}

mod corner;
mod error;
mod event_queue;
mod slice;
mod sweep;
mod wrap;


pub use crate::error::*;
pub use crate::event_queue::EventQueue;
pub use crate::slice::{CornerEvents, Slice};
pub use crate::wrap::{WordSource, WordWrap};

/// Parameters for the word wrap engine.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct WrapOptions {
    /// Distance below which two coordinates are considered equal.
    ///
    /// All coordinates are single precision floating point numbers, so
    /// point equality, horizontal-edge rejection and band comparisons are
    /// epsilon-tolerant.
    ///
    /// Default value: `WrapOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,

    /// Print the slice structure at each step of the sweep.
    ///
    /// This has no effect on the resulting placements.
    ///
    /// Default value: `false`.
    pub trace: bool,
}

impl WrapOptions {
    /// Default tolerance threshold.
    pub const DEFAULT_TOLERANCE: f32 = 1e-4;

    pub const DEFAULT: Self = WrapOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
        trace: false,
    };

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
