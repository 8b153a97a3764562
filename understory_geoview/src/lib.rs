// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Geoview: immutable map view snapshots.
//!
//! This crate converts between three coordinate spaces used by a map renderer:
//! - Geographic coordinates ([`LatLon`]).
//! - Projected planar coordinates ([`EastNorth`]), produced by a [`Projection`].
//! - View coordinates: fractional pixels in the current viewport.
//!
//! The central type is [`ViewState`], an immutable snapshot of the planar →
//! view affine transform plus the viewport size. Every pan, zoom, resize or
//! rotation returns a new snapshot, so a renderer can hold one for a whole
//! frame while the UI moves on without any locking.
//!
//! Points in the viewport are [`ViewPoint`]s: a borrowed snapshot plus a
//! position, with planar and geographic coordinates derived on demand.
//! Two points span a [`ViewRectangle`], against which points report
//! Cohen–Sutherland [`OutsideFlags`] for clipping and culling.
//!
//! It does **not** draw anything, hold map data, or interpret input. Callers are
//! expected to:
//! - Own the "current" snapshot (for example as an `Arc<ViewState>` they swap).
//! - Map gestures to [`ViewState::moved_to`], [`ViewState::zoomed_about`] and
//!   friends.
//! - Use [`ViewState::affine_transform`] to convert whole geometries at once.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_geoview::{EastNorth, ViewState, WebMercator};
//!
//! let state = ViewState::create_default(Arc::new(WebMercator), 800.0, 600.0)?;
//!
//! // A pixel under the cursor, converted to the map.
//! let cursor = state.for_view(420.0, 310.0);
//! let planar = cursor.east_north();
//! let geographic = cursor.lat_lon();
//!
//! // Recenter on that spot; the old snapshot is untouched.
//! let recentered = state.using_center(planar);
//! assert_eq!(state.center().in_view_x(), 400.0);
//! # let _ = (geographic, recentered);
//! # Ok::<(), understory_geoview::ViewStateError>(())
//! ```
//!
//! ## Clipping example
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_geoview::{OutsideFlags, ViewState, WebMercator};
//!
//! let state = ViewState::create_default(Arc::new(WebMercator), 800.0, 600.0)?;
//! let area = state.view_area();
//!
//! let a = state.for_view(-10.0, 50.0).outside_rectangle_flags(&area);
//! let b = state.for_view(-30.0, 700.0).outside_rectangle_flags(&area);
//!
//! // Both ends are left of the viewport, so the segment can be culled.
//! assert!(!(a & b).is_empty());
//! assert_eq!(b, OutsideFlags::LEFT | OutsideFlags::BOTTOM);
//! # Ok::<(), understory_geoview::ViewStateError>(())
//! ```
//!
//! ## Design notes
//!
//! - View space has its origin at the top-left pixel with `y` growing
//!   downwards; planar north grows upwards.
//! - [`ViewPoint`] borrows its snapshot and never keeps it alive on its own.
//! - Conversions are total: extreme or non-finite inputs propagate through
//!   IEEE-754 arithmetic instead of failing. Only snapshot construction can
//!   return a [`ViewStateError`].

mod coords;
mod error;
mod modes;
mod point;
mod projection;
mod rectangle;
mod state;

pub use coords::{EastNorth, LatLon, LatLonBounds};
pub use error::ViewStateError;
pub use modes::FitMode;
pub use point::{OutsideFlags, ViewPoint};
pub use projection::{Equirectangular, Projection, WebMercator};
pub use rectangle::ViewRectangle;
pub use state::ViewState;
