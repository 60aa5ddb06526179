// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sheet appearance and dismissal tuning.

use core::time::Duration;

use kurbo::Size;
use peniko::Color;

use crate::geometry::PixelGrid;

/// Visual constants for the sheet chrome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetStyle {
    /// Corner radius applied to the top corners of the presented surface.
    pub corner_radius: f64,
    /// Height of the pull bar strip glued above the sheet.
    pub pull_bar_height: f64,
    /// Size of the handle drawn in the middle of the pull bar.
    pub handle_size: Size,
    /// Fill of the handle.
    pub handle_color: Color,
    /// Fill of the full-screen backdrop at full opacity.
    pub shading_color: Color,
    /// Duration of the non-interactive present and dismiss animations.
    pub transition_duration: Duration,
}

impl Default for SheetStyle {
    fn default() -> Self {
        let corner_radius = 10.0;
        Self {
            corner_radius,
            pull_bar_height: corner_radius * 2.0,
            handle_size: Size::new(40.0, 4.0),
            handle_color: Color::from_rgba8(255, 255, 255, 153),
            shading_color: Color::from_rgba8(0, 0, 0, 153),
            transition_duration: Duration::from_millis(300),
        }
    }
}

impl SheetStyle {
    /// Corner radius of the handle, which is drawn as a capsule.
    #[must_use]
    pub fn handle_corner_radius(&self) -> f64 {
        self.handle_size.height * 0.5
    }

    /// Whether the sheet covers the presenting content entirely.
    ///
    /// Always `false`: the presenting content stays visible behind the backdrop.
    #[must_use]
    pub fn presents_in_fullscreen(&self) -> bool {
        false
    }
}

/// Parameters of the commit/cancel decision at the end of a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DismissalPolicy {
    /// Magnitude of the constant deceleration, in points per second squared.
    pub deceleration: f64,
    /// Projected progress at or above which the dismissal commits.
    pub threshold: f64,
}

impl Default for DismissalPolicy {
    fn default() -> Self {
        Self {
            deceleration: 800.0,
            threshold: 0.5,
        }
    }
}

/// Everything a [`SheetController`](crate::SheetController) needs to know
/// besides its collaborators.
///
/// ```
/// use understory_sheet::{PixelGrid, SheetConfig};
///
/// let config = SheetConfig::default()
///     .with_grid(PixelGrid::new(3.0))
///     .with_corner_radius(12.0);
/// assert_eq!(config.style.pull_bar_height, 24.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SheetConfig {
    /// Chrome constants.
    pub style: SheetStyle,
    /// End-of-gesture decision parameters.
    pub policy: DismissalPolicy,
    /// Pixel grid of the display.
    pub grid: PixelGrid,
}

impl SheetConfig {
    /// Replaces the pixel grid.
    #[must_use]
    pub fn with_grid(mut self, grid: PixelGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Replaces the dismissal policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DismissalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the whole style.
    #[must_use]
    pub fn with_style(mut self, style: SheetStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the corner radius and derives the pull bar height from it.
    #[must_use]
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.style.corner_radius = radius;
        self.style.pull_bar_height = radius * 2.0;
        self
    }

    /// Sets the duration of the non-interactive animations.
    #[must_use]
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.style.transition_duration = duration;
        self
    }
}
