// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors raised while constructing a [`ViewState`](crate::ViewState).
///
/// These are configuration failures: once a snapshot exists, every
/// conversion and transition on it is total.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ViewStateError {
    /// The projection could not supply world bounds to center a default view on.
    #[error("projection does not provide world bounds")]
    MissingWorldBounds,
    /// The planar-units-per-pixel scale was zero, negative, or not finite.
    #[error("invalid view scale {scale}; expected a finite value greater than zero")]
    InvalidScale {
        /// The rejected scale.
        scale: f64,
    },
    /// The planar-to-view matrix cannot be inverted.
    #[error("planar-to-view transform is not invertible (determinant {determinant})")]
    NonInvertibleTransform {
        /// Determinant of the rejected matrix.
        determinant: f64,
    },
}
