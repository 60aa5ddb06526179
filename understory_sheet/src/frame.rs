// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sheet geometry: where the presented surface, the pull bar and the handle go.
//!
//! All frames are in container coordinates with the origin at the top-left
//! corner and `y` growing downward. The sheet is anchored to the bottom edge.
//!
//! ```
//! use kurbo::{Insets, Rect, Size};
//! use understory_sheet::frame::{Container, presented_frame};
//! use understory_sheet::geometry::PixelGrid;
//!
//! let container = Container::new(
//!     Size::new(390.0, 844.0),
//!     Insets::new(0.0, 47.0, 0.0, 34.0),
//! );
//! let frame = presented_frame(Some(&container), 300.0, PixelGrid::new(3.0));
//! assert_eq!(frame, Rect::new(0.0, 510.0, 390.0, 844.0));
//!
//! // Content taller than the container is capped below the top inset.
//! let frame = presented_frame(Some(&container), 5000.0, PixelGrid::new(3.0));
//! assert_eq!(frame.y0, 47.0);
//! ```

use kurbo::{Insets, Point, Rect, Size};

use crate::config::SheetStyle;
use crate::geometry::PixelGrid;
use crate::host::SheetHost;

/// The area a sheet is presented in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    /// Size of the container bounds.
    pub size: Size,
    /// Safe area insets of the window (`y0` is the top, `y1` the bottom).
    pub safe_area: Insets,
}

impl Container {
    /// Creates a container description.
    #[must_use]
    pub fn new(size: Size, safe_area: Insets) -> Self {
        Self { size, safe_area }
    }

    /// Container bounds at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.size.to_rect()
    }

    /// Tallest sheet that fits below the top safe area, snapped down to the
    /// pixel grid.
    #[must_use]
    pub fn max_sheet_height(&self, grid: PixelGrid) -> f64 {
        grid.floor(self.size.height - self.safe_area.y0).max(0.0)
    }
}

/// Target on-screen frame of the presented surface.
///
/// The height is the preferred content height plus the bottom safe area,
/// capped so the sheet never reaches into the top safe area. Both the height
/// and the top edge are snapped up to whole device pixels. Without a
/// container the result is [`Rect::ZERO`].
#[must_use]
pub fn presented_frame(
    container: Option<&Container>,
    preferred_height: f64,
    grid: PixelGrid,
) -> Rect {
    let Some(container) = container else {
        return Rect::ZERO;
    };
    let preferred = grid.ceil(preferred_height.max(0.0) + container.safe_area.y1);
    let height = preferred.min(container.max_sheet_height(grid));
    let y = grid.ceil(container.size.height - height);
    Rect::from_origin_size(Point::new(0.0, y), Size::new(container.size.width, height))
}

/// Frame of a sheet of `size` parked just below the bottom edge.
#[must_use]
pub fn offscreen_frame(container: &Container, size: Size) -> Rect {
    Rect::from_origin_size(Point::new(0.0, container.size.height), size)
}

/// Vertical origin of the pull bar for a sheet whose top edge is `sheet_top`.
///
/// The bar sits one bar height above the sheet and overlaps it by one device
/// pixel so no seam shows between the two.
#[must_use]
pub fn pull_bar_origin_y(sheet_top: f64, style: &SheetStyle, grid: PixelGrid) -> f64 {
    sheet_top - style.pull_bar_height + grid.pixel_size()
}

/// Frame of the pull bar glued above `sheet`.
#[must_use]
pub fn pull_bar_frame(sheet: Rect, style: &SheetStyle, grid: PixelGrid) -> Rect {
    Rect::from_origin_size(
        Point::new(sheet.x0, pull_bar_origin_y(sheet.y0, style, grid)),
        Size::new(sheet.width(), style.pull_bar_height),
    )
}

/// The handle drawn centered inside `pull_bar`.
#[must_use]
pub fn handle_rect(pull_bar: Rect, style: &SheetStyle) -> Rect {
    Rect::from_center_size(pull_bar.center(), style.handle_size)
}

/// Everything the host has to update to show the sheet at some progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetLayout {
    /// Frame of the presented surface.
    pub frame: Rect,
    /// Vertical origin of the pull bar.
    pub pull_bar_origin_y: f64,
    /// Opacity of the backdrop, `1` when fully presented.
    pub shading_alpha: f64,
}

impl SheetLayout {
    /// Layout of a fully presented sheet at `frame`.
    #[must_use]
    pub fn presented(frame: Rect, style: &SheetStyle, grid: PixelGrid) -> Self {
        Self {
            frame,
            pull_bar_origin_y: pull_bar_origin_y(frame.y0, style, grid),
            shading_alpha: 1.0,
        }
    }

    /// Layout of a sheet parked below the container with the backdrop cleared.
    #[must_use]
    pub fn dismissed(frame: Rect, style: &SheetStyle, grid: PixelGrid) -> Self {
        Self {
            frame,
            pull_bar_origin_y: pull_bar_origin_y(frame.y0, style, grid),
            shading_alpha: 0.0,
        }
    }

    /// Linear blend between the presented frame (`progress == 0`) and the
    /// off-screen frame (`progress == 1`). Progress is clamped to `[0, 1]`.
    #[must_use]
    pub fn at_progress(
        presented: Rect,
        offscreen: Rect,
        progress: f64,
        style: &SheetStyle,
        grid: PixelGrid,
    ) -> Self {
        let t = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let origin = presented.origin().lerp(offscreen.origin(), t);
        let frame = Rect::from_origin_size(origin, presented.size());
        Self {
            frame,
            pull_bar_origin_y: pull_bar_origin_y(frame.y0, style, grid),
            shading_alpha: 1.0 - t,
        }
    }

    /// Pushes every field of this layout to `host`.
    pub fn apply<H: SheetHost + ?Sized>(&self, host: &mut H) {
        host.set_presented_frame(self.frame);
        host.set_pull_bar_origin_y(self.pull_bar_origin_y);
        host.set_shading_alpha(self.shading_alpha);
    }
}
