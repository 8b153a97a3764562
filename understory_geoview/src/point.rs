// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Point;

use crate::coords::{EastNorth, LatLon};
use crate::rectangle::ViewRectangle;
use crate::state::ViewState;

bitflags::bitflags! {
    /// Position of a point relative to a [`ViewRectangle`], one bit per half-plane.
    ///
    /// This is the Cohen–Sutherland outcode: a point inside the rectangle
    /// (boundaries included) has no bits set, a point beyond a corner has the
    /// two bits of the adjacent edges set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OutsideFlags: u8 {
        /// Above the top edge (smaller view `y`).
        const TOP    = 0b0000_0001;
        /// Below the bottom edge (larger view `y`).
        const BOTTOM = 0b0000_0010;
        /// Left of the left edge.
        const LEFT   = 0b0000_0100;
        /// Right of the right edge.
        const RIGHT  = 0b0000_1000;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Source {
    View(Point),
    EastNorth(EastNorth),
}

/// A position in the viewport of a [`ViewState`].
///
/// The point borrows its snapshot and derives planar and geographic
/// coordinates from it on demand. It remembers the space it was created
/// from: points made from pixels keep their pixel coordinates verbatim, points
/// made from planar coordinates keep those verbatim.
#[derive(Clone, Copy)]
pub struct ViewPoint<'a> {
    state: &'a ViewState,
    source: Source,
}

impl<'a> ViewPoint<'a> {
    pub(crate) fn from_view(state: &'a ViewState, pt: Point) -> Self {
        Self {
            state,
            source: Source::View(pt),
        }
    }

    pub(crate) fn from_east_north(state: &'a ViewState, east_north: EastNorth) -> Self {
        Self {
            state,
            source: Source::EastNorth(east_north),
        }
    }

    /// The snapshot this point belongs to.
    #[must_use]
    pub fn state(&self) -> &'a ViewState {
        self.state
    }

    /// Horizontal view coordinate in pixels.
    #[must_use]
    pub fn in_view_x(&self) -> f64 {
        self.in_view().x
    }

    /// Vertical view coordinate in pixels.
    #[must_use]
    pub fn in_view_y(&self) -> f64 {
        self.in_view().y
    }

    /// View coordinates in pixels.
    #[must_use]
    pub fn in_view(&self) -> Point {
        match self.source {
            Source::View(pt) => pt,
            Source::EastNorth(en) => self.state.to_view(en),
        }
    }

    /// Planar coordinates shown at this point.
    #[must_use]
    pub fn east_north(&self) -> EastNorth {
        match self.source {
            Source::View(pt) => self.state.to_planar(pt),
            Source::EastNorth(en) => en,
        }
    }

    /// Geographic coordinates shown at this point.
    #[must_use]
    pub fn lat_lon(&self) -> LatLon {
        self.state
            .projection()
            .east_north_to_lat_lon(self.east_north())
    }

    /// A point shifted by `dx` / `dy` pixels.
    #[must_use]
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        let pt = self.in_view();
        Self::from_view(self.state, Point::new(pt.x + dx, pt.y + dy))
    }

    /// Builds the rectangle spanned by this point and `other`.
    ///
    /// The rectangle belongs to this point's snapshot. A corner taken from a
    /// different snapshot is interpreted by its pixel coordinates.
    #[must_use]
    pub fn rect_to(&self, other: &ViewPoint<'_>) -> ViewRectangle<'a> {
        let source = if core::ptr::eq(self.state, other.state) {
            other.source
        } else {
            Source::View(other.in_view())
        };
        ViewRectangle::new(
            self.state,
            *self,
            Self {
                state: self.state,
                source,
            },
        )
    }

    /// Manhattan distance to `other` in pixels.
    #[must_use]
    pub fn one_norm_in_view(&self, other: &ViewPoint<'_>) -> f64 {
        let a = self.in_view();
        let b = other.in_view();
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }

    /// Euclidean distance to `other` in pixels.
    #[must_use]
    pub fn distance_in_view(&self, other: &ViewPoint<'_>) -> f64 {
        self.in_view().distance(other.in_view())
    }

    /// Outcode of this point relative to `rect`.
    ///
    /// Edges are inclusive: a point on the boundary reports no flags.
    #[must_use]
    pub fn outside_rectangle_flags(&self, rect: &ViewRectangle<'_>) -> OutsideFlags {
        let bounds = rect.in_view();
        let pt = self.in_view();
        let mut flags = OutsideFlags::empty();
        if pt.y < bounds.y0 {
            flags |= OutsideFlags::TOP;
        } else if pt.y > bounds.y1 {
            flags |= OutsideFlags::BOTTOM;
        }
        if pt.x < bounds.x0 {
            flags |= OutsideFlags::LEFT;
        } else if pt.x > bounds.x1 {
            flags |= OutsideFlags::RIGHT;
        }
        flags
    }

    /// Returns `true` if the point lies within the viewport, edges included.
    #[must_use]
    pub fn is_in_view(&self) -> bool {
        self.outside_rectangle_flags(&self.state.view_area())
            .is_empty()
    }
}

impl PartialEq for ViewPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.state.same_mapping(other.state) && self.in_view() == other.in_view()
    }
}

impl fmt::Debug for ViewPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewPoint")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ViewPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Source::View(pt) => write!(f, "ViewPoint [x={:?}, y={:?}]", pt.x, pt.y),
            Source::EastNorth(en) => write!(f, "EastNorthPoint [east_north={en}]"),
        }
    }
}
