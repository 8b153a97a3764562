// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The projection seam between geographic and planar space.
//!
//! [`ViewState`](crate::ViewState) treats the projection as an opaque, stateless
//! service. Two reference projections are provided so that the engine can be
//! used on its own; applications with a projection library of their own only
//! need to implement [`Projection`].

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use core::fmt::Debug;

use crate::coords::{EastNorth, LatLon, LatLonBounds};

/// A cartographic projection between geographic and planar coordinates.
///
/// Implementations must be deterministic and free of side effects: snapshots
/// call them from any thread without synchronization.
pub trait Projection: Debug + Send + Sync {
    /// Projects a geographic coordinate into planar space.
    fn lat_lon_to_east_north(&self, ll: LatLon) -> EastNorth;

    /// Inverse of [`Projection::lat_lon_to_east_north`].
    fn east_north_to_lat_lon(&self, en: EastNorth) -> LatLon;

    /// The geographic area this projection is defined for.
    ///
    /// Returning `None` makes [`ViewState::create_default`](crate::ViewState::create_default)
    /// fail with [`ViewStateError::MissingWorldBounds`](crate::ViewStateError::MissingWorldBounds).
    fn world_bounds(&self) -> Option<LatLonBounds>;

    /// Planar units per pixel used for freshly created default views.
    fn default_scale(&self) -> f64;
}

/// Spherical Mercator (EPSG:3857) in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WebMercator;

impl WebMercator {
    /// Sphere radius in metres.
    pub const RADIUS: f64 = 6_378_137.0;
    /// Latitude at which the projected world becomes square.
    pub const MAX_LAT: f64 = 85.051_128_779_806_59;
}

impl Projection for WebMercator {
    fn lat_lon_to_east_north(&self, ll: LatLon) -> EastNorth {
        let east = Self::RADIUS * ll.lon.to_radians();
        let north = Self::RADIUS * (FRAC_PI_4 + ll.lat.to_radians() / 2.0).tan().ln();
        EastNorth::new(east, north)
    }

    fn east_north_to_lat_lon(&self, en: EastNorth) -> LatLon {
        let lat = 2.0 * (en.north / Self::RADIUS).exp().atan() - FRAC_PI_2;
        let lon = en.east / Self::RADIUS;
        LatLon::new(lat.to_degrees(), lon.to_degrees())
    }

    fn world_bounds(&self) -> Option<LatLonBounds> {
        Some(LatLonBounds::from_degrees(
            -Self::MAX_LAT,
            -180.0,
            Self::MAX_LAT,
            180.0,
        ))
    }

    fn default_scale(&self) -> f64 {
        10.0
    }
}

/// Plate carrée: easting is longitude and northing is latitude, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Equirectangular;

impl Projection for Equirectangular {
    fn lat_lon_to_east_north(&self, ll: LatLon) -> EastNorth {
        EastNorth::new(ll.lon, ll.lat)
    }

    fn east_north_to_lat_lon(&self, en: EastNorth) -> LatLon {
        LatLon::new(en.north, en.east)
    }

    fn world_bounds(&self) -> Option<LatLonBounds> {
        Some(LatLonBounds::from_degrees(-90.0, -180.0, 90.0, 180.0))
    }

    fn default_scale(&self) -> f64 {
        1e-4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() <= tol, "{a} != {b} (tolerance {tol})");
    }

    #[test]
    fn mercator_known_points() {
        let p = WebMercator;
        let origin = p.lat_lon_to_east_north(LatLon::ZERO);
        assert_close(origin.east, 0.0, 1e-6);
        assert_close(origin.north, 0.0, 1e-6);

        // The antimeridian sits half an equator away from the origin.
        let edge = p.lat_lon_to_east_north(LatLon::new(0.0, 180.0));
        assert_close(edge.east, 20_037_508.342_789_244, 1e-6);

        // At the cut-off latitude the world is square.
        let corner = p.lat_lon_to_east_north(LatLon::new(WebMercator::MAX_LAT, 180.0));
        assert_close(corner.north, corner.east, 1e-3);
    }

    #[test]
    fn mercator_inverts() {
        let p = WebMercator;
        for ll in [
            LatLon::new(51.12, 14.147),
            LatLon::new(-33.9, 151.2),
            LatLon::new(84.0, -179.0),
            LatLon::ZERO,
        ] {
            let back = p.east_north_to_lat_lon(p.lat_lon_to_east_north(ll));
            assert_close(back.lat, ll.lat, 1e-9);
            assert_close(back.lon, ll.lon, 1e-9);
        }
    }

    #[test]
    fn mercator_out_of_range_does_not_panic() {
        let p = WebMercator;
        let pole = p.lat_lon_to_east_north(LatLon::new(90.0, 0.0));
        assert!(pole.north > 1e8 || pole.north.is_infinite());
        let beyond = p.lat_lon_to_east_north(LatLon::new(1e20, 1e20));
        assert!(beyond.east.is_finite());
    }

    #[test]
    fn equirectangular_swaps_axes() {
        let p = Equirectangular;
        let en = p.lat_lon_to_east_north(LatLon::new(10.0, 20.0));
        assert_eq!(en, EastNorth::new(20.0, 10.0));
        assert_eq!(p.east_north_to_lat_lon(en), LatLon::new(10.0, 20.0));
        assert_eq!(p.world_bounds().map(|b| b.center()), Some(LatLon::ZERO));
    }
}
