// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect};

use crate::coords::{EastNorth, LatLonBounds, planar_bbox};
use crate::point::ViewPoint;
use crate::state::ViewState;

/// An axis-aligned rectangle in view space, spanned by two [`ViewPoint`]s.
///
/// The corners may be given in any order; every query behaves as if they were
/// normalized to a minimum and a maximum corner. The rectangle is always
/// axis-aligned on screen, even when the view is rotated.
#[derive(Clone, Copy)]
pub struct ViewRectangle<'a> {
    state: &'a ViewState,
    p1: ViewPoint<'a>,
    p2: ViewPoint<'a>,
}

impl<'a> ViewRectangle<'a> {
    pub(crate) fn new(state: &'a ViewState, p1: ViewPoint<'a>, p2: ViewPoint<'a>) -> Self {
        Self { state, p1, p2 }
    }

    /// The snapshot this rectangle belongs to.
    #[must_use]
    pub fn state(&self) -> &'a ViewState {
        self.state
    }

    /// The two corners as given.
    #[must_use]
    pub fn corners(&self) -> (ViewPoint<'a>, ViewPoint<'a>) {
        (self.p1, self.p2)
    }

    /// The normalized rectangle in pixels.
    #[must_use]
    pub fn in_view(&self) -> Rect {
        Rect::from_points(self.p1.in_view(), self.p2.in_view())
    }

    /// Boundary-inclusive containment.
    #[must_use]
    pub fn contains(&self, pt: &ViewPoint<'_>) -> bool {
        pt.outside_rectangle_flags(self).is_empty()
    }

    /// Planar bounding box of this rectangle, `x = east` and `y = north`.
    ///
    /// For a rotated view this is larger than the rectangle itself.
    #[must_use]
    pub fn projection_bounds(&self) -> Rect {
        let r = self.in_view();
        planar_bbox(
            [
                Point::new(r.x0, r.y0),
                Point::new(r.x1, r.y0),
                Point::new(r.x0, r.y1),
                Point::new(r.x1, r.y1),
            ]
            .map(|pt| self.state.to_planar(pt)),
        )
    }

    /// Geographic bounding box of this rectangle's planar bounds.
    #[must_use]
    pub fn lat_lon_bounds_box(&self) -> LatLonBounds {
        let projection = self.state.projection();
        let b = self.projection_bounds();
        let [first, rest @ ..] = [(b.x0, b.y0), (b.x1, b.y0), (b.x0, b.y1), (b.x1, b.y1)]
            .map(|(east, north)| projection.east_north_to_lat_lon(EastNorth::new(east, north)));
        rest.into_iter()
            .fold(LatLonBounds::new(first, first), |acc, ll| acc.extended(ll))
    }
}

impl fmt::Debug for ViewRectangle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRectangle")
            .field("p1", &self.p1)
            .field("p2", &self.p2)
            .finish_non_exhaustive()
    }
}
