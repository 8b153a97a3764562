// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use kurbo::{Affine, Point, Rect};

use crate::coords::{EastNorth, LatLon, LatLonBounds, planar_bbox};
use crate::error::ViewStateError;
use crate::modes::FitMode;
use crate::point::ViewPoint;
use crate::projection::Projection;
use crate::rectangle::ViewRectangle;

/// Immutable snapshot of the mapping between planar space and view pixels.
///
/// A `ViewState` holds an affine planar → view transform (scale, rotation and
/// translation combined), its inverse, the viewport size and the projection
/// used for geographic conversions. It is never mutated: pan, zoom, resize and
/// rotation all return a new snapshot, so a renderer may keep using an older
/// one for the rest of its frame while the UI publishes a newer one.
///
/// View space has its origin at the top-left corner of the viewport with `y`
/// growing downwards; planar space has north growing upwards.
#[derive(Clone, Debug)]
pub struct ViewState {
    projection: Arc<dyn Projection>,
    view_width: f64,
    view_height: f64,
    planar_to_view: Affine,
    view_to_planar: Affine,
}

impl ViewState {
    /// Creates an axis-aligned snapshot.
    ///
    /// - `scale` is the number of planar units covered by one pixel.
    /// - `top_left` is the planar point shown at view pixel `(0, 0)`.
    ///
    /// # Errors
    ///
    /// [`ViewStateError::InvalidScale`] if `scale` is not finite and positive.
    pub fn new(
        projection: Arc<dyn Projection>,
        view_width: f64,
        view_height: f64,
        scale: f64,
        top_left: EastNorth,
    ) -> Result<Self, ViewStateError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ViewStateError::InvalidScale { scale });
        }
        let affine = Affine::new([
            1.0 / scale,
            0.0,
            0.0,
            -1.0 / scale,
            -top_left.east / scale,
            top_left.north / scale,
        ]);
        Self::from_affine(projection, view_width, view_height, affine)
    }

    /// Creates a snapshot from an arbitrary planar → view matrix.
    ///
    /// # Errors
    ///
    /// [`ViewStateError::NonInvertibleTransform`] if the matrix or its inverse
    /// has non-finite coefficients, or its determinant is zero.
    pub fn from_affine(
        projection: Arc<dyn Projection>,
        view_width: f64,
        view_height: f64,
        planar_to_view: Affine,
    ) -> Result<Self, ViewStateError> {
        check_invertible(planar_to_view)?;
        Ok(Self {
            projection,
            view_width,
            view_height,
            planar_to_view,
            view_to_planar: planar_to_view.inverse(),
        })
    }

    /// Creates the initial snapshot for a viewport of the given size.
    ///
    /// The view is centered on the center of the projection's world bounds at
    /// the projection's [default scale](Projection::default_scale), without
    /// rotation.
    ///
    /// # Errors
    ///
    /// - [`ViewStateError::MissingWorldBounds`] if the projection has no world bounds.
    /// - [`ViewStateError::InvalidScale`] if its default scale is unusable.
    pub fn create_default(
        projection: Arc<dyn Projection>,
        view_width: f64,
        view_height: f64,
    ) -> Result<Self, ViewStateError> {
        let Some(world) = projection.world_bounds() else {
            log::warn!("cannot create default view state: {projection:?} has no world bounds");
            return Err(ViewStateError::MissingWorldBounds);
        };
        let center = projection.lat_lon_to_east_north(world.center());
        let scale = projection.default_scale();
        let state = Self::new(projection, view_width, view_height, scale, EastNorth::ZERO)?
            .using_center(center);
        log::debug!(
            "default view state {view_width}x{view_height} at scale {scale} centered on {center}"
        );
        Ok(state)
    }

    /// Returns the projection used for geographic conversions.
    #[must_use]
    pub fn projection(&self) -> &Arc<dyn Projection> {
        &self.projection
    }

    /// Viewport width in pixels.
    #[must_use]
    pub fn view_width(&self) -> f64 {
        self.view_width
    }

    /// Viewport height in pixels.
    #[must_use]
    pub fn view_height(&self) -> f64 {
        self.view_height
    }

    /// The planar → view matrix.
    ///
    /// Applying it to `Point::new(east, north)` yields the same view
    /// coordinates as [`ViewState::point_for`], which makes it suitable for
    /// transforming whole polylines without per-point overhead.
    #[must_use]
    pub fn affine_transform(&self) -> Affine {
        self.planar_to_view
    }

    /// The view → planar matrix.
    #[must_use]
    pub fn view_to_planar_transform(&self) -> Affine {
        self.view_to_planar
    }

    /// Planar units per pixel.
    #[must_use]
    pub fn scale(&self) -> f64 {
        1.0 / self.planar_to_view.determinant().abs().sqrt()
    }

    /// Rotation of the view in radians; positive values turn the map clockwise on screen.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        let [a, b, ..] = self.planar_to_view.as_coeffs();
        b.atan2(a)
    }

    /// Returns `true` if both snapshots share the projection instance, matrix and size.
    #[must_use]
    pub fn same_mapping(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.projection, &other.projection)
            && self.planar_to_view == other.planar_to_view
            && self.view_width == other.view_width
            && self.view_height == other.view_height
    }

    /// Wraps a view pixel coordinate.
    ///
    /// Any value is accepted, including negative and far out-of-viewport
    /// coordinates; they are stored verbatim.
    #[must_use]
    pub fn for_view(&self, x: f64, y: f64) -> ViewPoint<'_> {
        ViewPoint::from_view(self, Point::new(x, y))
    }

    /// The view point showing the given planar coordinate.
    #[must_use]
    pub fn point_for(&self, east_north: EastNorth) -> ViewPoint<'_> {
        ViewPoint::from_east_north(self, east_north)
    }

    /// The view point showing the given geographic coordinate.
    #[must_use]
    pub fn point_for_lat_lon(&self, lat_lon: LatLon) -> ViewPoint<'_> {
        self.point_for(self.projection.lat_lon_to_east_north(lat_lon))
    }

    /// The center pixel of the viewport.
    #[must_use]
    pub fn center(&self) -> ViewPoint<'_> {
        self.for_view(self.view_width / 2.0, self.view_height / 2.0)
    }

    /// The whole viewport as a rectangle.
    #[must_use]
    pub fn view_area(&self) -> ViewRectangle<'_> {
        self.for_view(0.0, 0.0)
            .rect_to(&self.for_view(self.view_width, self.view_height))
    }

    /// Moves the view so that `anchor`'s pixel shows `target`.
    ///
    /// Only the translation changes; scale, rotation and viewport size are kept.
    #[must_use]
    pub fn moved_to(&self, anchor: &ViewPoint<'_>, target: EastNorth) -> Self {
        let delta = anchor.in_view() - self.planar_to_view * Point::from(target);
        self.derive(Affine::translate(delta) * self.planar_to_view)
    }

    /// Moves the view so that its center pixel shows `center`.
    #[must_use]
    pub fn using_center(&self, center: EastNorth) -> Self {
        self.moved_to(&self.center(), center)
    }

    /// Returns a snapshot with a new viewport size and the same matrix.
    ///
    /// The planar point at the top-left pixel stays where it is.
    #[must_use]
    pub fn using_size(&self, view_width: f64, view_height: f64) -> Self {
        log::trace!("resizing view state to {view_width}x{view_height}");
        Self {
            view_width,
            view_height,
            ..self.clone()
        }
    }

    /// Returns a snapshot at a new scale around the viewport center.
    ///
    /// # Errors
    ///
    /// - [`ViewStateError::InvalidScale`] if `scale` is not finite and positive.
    /// - [`ViewStateError::NonInvertibleTransform`] if the rescaled matrix
    ///   over- or underflows.
    pub fn using_scale(&self, scale: f64) -> Result<Self, ViewStateError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ViewStateError::InvalidScale { scale });
        }
        let factor = self.scale() / scale;
        self.try_derive(about(self.center().in_view(), Affine::scale(factor)) * self.planar_to_view)
    }

    /// Magnifies the view by `factor` keeping `anchor`'s planar point on its pixel.
    ///
    /// A factor above one zooms in. Factors that are not finite and positive,
    /// or that would make the matrix singular, leave the view unchanged.
    #[must_use]
    pub fn zoomed_about(&self, anchor: &ViewPoint<'_>, factor: f64) -> Self {
        if !(factor.is_finite() && factor > 0.0) {
            return self.clone();
        }
        self.derive(about(anchor.in_view(), Affine::scale(factor)) * self.planar_to_view)
    }

    /// Rotates the view on screen around `anchor` by `radians`.
    #[must_use]
    pub fn rotated_about(&self, anchor: &ViewPoint<'_>, radians: f64) -> Self {
        if !radians.is_finite() {
            return self.clone();
        }
        self.derive(about(anchor.in_view(), Affine::rotate(radians)) * self.planar_to_view)
    }

    /// Fits planar `bounds` into the viewport, centered.
    ///
    /// See [`ViewState::zoom_to_with`].
    #[must_use]
    pub fn zoom_to(&self, bounds: Rect) -> Self {
        self.zoom_to_with(bounds, FitMode::Center)
    }

    /// Fits planar `bounds` (x = east, y = north) into the viewport.
    ///
    /// The current rotation is kept and the scale is chosen by the limiting
    /// axis, so the whole of `bounds` is always visible. A zero extent on one
    /// axis defers to the other; a single point keeps the current scale and is
    /// only recentered. Non-finite bounds or an empty viewport leave the view
    /// unchanged.
    #[must_use]
    pub fn zoom_to_with(&self, bounds: Rect, mode: FitMode) -> Self {
        let bounds = bounds.abs();
        if !bounds.is_finite() || !(self.view_width > 0.0 && self.view_height > 0.0) {
            return self.clone();
        }

        // Rotation and axis flip only, at one pixel per planar unit.
        let [a, b, c, d, ..] = self.planar_to_view.as_coeffs();
        let unit = self.scale();
        let orient = Affine::new([a * unit, b * unit, c * unit, d * unit, 0.0, 0.0]);

        let extent = orient.transform_rect_bbox(bounds);
        let fit_x = if extent.width() > 0.0 {
            self.view_width / extent.width()
        } else {
            f64::INFINITY
        };
        let fit_y = if extent.height() > 0.0 {
            self.view_height / extent.height()
        } else {
            f64::INFINITY
        };
        let magnification = fit_x.min(fit_y);
        let linear = if magnification.is_finite() {
            Affine::scale(magnification) * orient
        } else {
            Affine::new([a, b, c, d, 0.0, 0.0])
        };

        let placed = linear.transform_rect_bbox(bounds);
        let offset = match mode {
            FitMode::Center => {
                Point::new(self.view_width / 2.0, self.view_height / 2.0) - placed.center()
            }
            FitMode::AlignMin => Point::ZERO - placed.origin(),
        };
        self.derive(Affine::translate(offset) * linear)
    }

    /// Fits geographic `bounds` into the viewport, centered.
    ///
    /// Latitudes are clamped to the projection's world bounds, so polar
    /// bounds fit the projected world instead of running off to infinity.
    /// The corners are then projected and their planar bounding box is fitted.
    #[must_use]
    pub fn zoom_to_lat_lon(&self, bounds: &LatLonBounds) -> Self {
        let (south, north) = self
            .projection
            .world_bounds()
            .map_or((f64::NEG_INFINITY, f64::INFINITY), |w| (w.min().lat, w.max().lat));
        let corners = bounds.corners().map(|ll| {
            let lat = ll.lat.max(south).min(north);
            self.projection.lat_lon_to_east_north(LatLon::new(lat, ll.lon))
        });
        self.zoom_to(planar_bbox(corners))
    }

    pub(crate) fn to_view(&self, east_north: EastNorth) -> Point {
        self.planar_to_view * Point::from(east_north)
    }

    pub(crate) fn to_planar(&self, pt: Point) -> EastNorth {
        EastNorth::from(self.view_to_planar * pt)
    }

    /// Like [`ViewState::try_derive`], keeping `self` when the matrix is unusable.
    fn derive(&self, planar_to_view: Affine) -> Self {
        self.try_derive(planar_to_view).unwrap_or_else(|err| {
            log::debug!("keeping view state: {err}");
            self.clone()
        })
    }

    fn try_derive(&self, planar_to_view: Affine) -> Result<Self, ViewStateError> {
        log::trace!("deriving view state with transform {planar_to_view:?}");
        Self::from_affine(
            Arc::clone(&self.projection),
            self.view_width,
            self.view_height,
            planar_to_view,
        )
    }
}

fn check_invertible(planar_to_view: Affine) -> Result<(), ViewStateError> {
    let determinant = planar_to_view.determinant();
    if !planar_to_view.is_finite()
        || !determinant.is_finite()
        || determinant == 0.0
        || !planar_to_view.inverse().is_finite()
    {
        return Err(ViewStateError::NonInvertibleTransform { determinant });
    }
    Ok(())
}

/// Conjugates `affine` so that it acts around `center` instead of the origin.
fn about(center: Point, affine: Affine) -> Affine {
    let offset = center.to_vec2();
    Affine::translate(offset) * affine * Affine::translate(-offset)
}
