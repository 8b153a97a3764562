// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate value types: projected (east/north) and geographic (lat/lon).

use core::fmt;

use kurbo::{Point, Rect};

/// A point in projected planar space.
///
/// The axes are whatever the active [`Projection`](crate::Projection) produces,
/// typically metres (Web Mercator) or degrees (plate carrée). East grows to the
/// right and north grows upwards, which is the opposite of view space on the
/// vertical axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EastNorth {
    /// Easting.
    pub east: f64,
    /// Northing.
    pub north: f64,
}

impl EastNorth {
    /// The planar origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new planar point.
    #[must_use]
    pub const fn new(east: f64, north: f64) -> Self {
        Self { east, north }
    }

    /// Returns the easting.
    #[must_use]
    pub const fn east(self) -> f64 {
        self.east
    }

    /// Returns the northing.
    #[must_use]
    pub const fn north(self) -> f64 {
        self.north
    }

    /// Returns this point shifted by `de` / `dn` planar units.
    #[must_use]
    pub fn add(self, de: f64, dn: f64) -> Self {
        Self::new(self.east + de, self.north + dn)
    }

    /// Euclidean distance to `other` in planar units.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.east - other.east).hypot(self.north - other.north)
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn interpolate(self, other: Self, t: f64) -> Self {
        Self::new(
            self.east + (other.east - self.east) * t,
            self.north + (other.north - self.north) * t,
        )
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.east.is_finite() && self.north.is_finite()
    }
}

impl From<EastNorth> for Point {
    fn from(en: EastNorth) -> Self {
        Self::new(en.east, en.north)
    }
}

impl From<Point> for EastNorth {
    fn from(pt: Point) -> Self {
        Self::new(pt.x, pt.y)
    }
}

impl fmt::Display for EastNorth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EastNorth [e={:?}, n={:?}]", self.east, self.north)
    }
}

/// A geographic coordinate in degrees.
///
/// Values are not clamped: callers may pass latitudes or longitudes outside
/// the usual ranges to describe points far outside the visible world.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl LatLon {
    /// Latitude 0, longitude 0.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new geographic coordinate.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns the latitude.
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    /// Returns the longitude.
    #[must_use]
    pub const fn lon(self) -> f64 {
        self.lon
    }

    /// Returns `true` if the coordinate lies within `[-90, 90]` × `[-180, 180]`.
    #[must_use]
    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LatLon [lat={:?}, lon={:?}]", self.lat, self.lon)
    }
}

/// An axis-aligned box in geographic space.
///
/// The corners are normalized on construction so that `min` holds the
/// south-west corner and `max` the north-east corner. Boxes crossing the
/// antimeridian are not modeled.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLonBounds {
    min: LatLon,
    max: LatLon,
}

impl LatLonBounds {
    /// Creates bounds spanning the two corners, in any order.
    #[must_use]
    pub fn new(a: LatLon, b: LatLon) -> Self {
        Self {
            min: LatLon::new(a.lat.min(b.lat), a.lon.min(b.lon)),
            max: LatLon::new(a.lat.max(b.lat), a.lon.max(b.lon)),
        }
    }

    /// Creates bounds from raw degrees.
    #[must_use]
    pub fn from_degrees(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self::new(LatLon::new(min_lat, min_lon), LatLon::new(max_lat, max_lon))
    }

    /// South-west corner.
    #[must_use]
    pub fn min(&self) -> LatLon {
        self.min
    }

    /// North-east corner.
    #[must_use]
    pub fn max(&self) -> LatLon {
        self.max
    }

    /// Midpoint of both axes.
    #[must_use]
    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.min.lat + self.max.lat) / 2.0,
            (self.min.lon + self.max.lon) / 2.0,
        )
    }

    /// The four corners, starting south-west and going counter-clockwise.
    #[must_use]
    pub fn corners(&self) -> [LatLon; 4] {
        [
            self.min,
            LatLon::new(self.min.lat, self.max.lon),
            self.max,
            LatLon::new(self.max.lat, self.min.lon),
        ]
    }

    /// Boundary-inclusive containment.
    #[must_use]
    pub fn contains(&self, ll: LatLon) -> bool {
        (self.min.lat..=self.max.lat).contains(&ll.lat)
            && (self.min.lon..=self.max.lon).contains(&ll.lon)
    }

    /// Smallest bounds containing both `self` and `ll`.
    #[must_use]
    pub fn extended(&self, ll: LatLon) -> Self {
        Self {
            min: LatLon::new(self.min.lat.min(ll.lat), self.min.lon.min(ll.lon)),
            max: LatLon::new(self.max.lat.max(ll.lat), self.max.lon.max(ll.lon)),
        }
    }
}

/// Planar bounding box of a set of points, as a [`Rect`] with `x = east`, `y = north`.
pub(crate) fn planar_bbox(points: impl IntoIterator<Item = EastNorth>) -> Rect {
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return Rect::ZERO;
    };
    let start = Rect::from_points(Point::from(first), Point::from(first));
    iter.fold(start, |r, en| r.union_pt(Point::from(en)))
}
