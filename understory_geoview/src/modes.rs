// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How fitted bounds are positioned inside the viewport.
///
/// This mode is consulted by [`crate::ViewState::zoom_to_with`]. The fitted
/// bounds always stay fully visible; the mode only decides where the unused
/// margin along the non-limiting axis goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitMode {
    /// Center the fitted bounds in the viewport, splitting the margin evenly.
    #[default]
    Center,
    /// Place the view-space bounding box of the fitted bounds against the
    /// viewport's top-left corner, leaving the margin right and below.
    AlignMin,
}
