// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits: what the controller asks of its environment.
//!
//! The controller never owns views. It reads geometry from a [`SheetHost`],
//! writes frames and opacities back to it, hands animations to it, and asks
//! a [`DismissalHandler`] to tear the sheet down.

use core::fmt::Debug;

use kurbo::Rect;

use crate::frame::Container;
use crate::transition::SheetAnimation;

/// Tears down the presented content.
///
/// Called when a tap, a committed drag or an external dismissal requires the
/// owner of the sheet to dismiss it.
pub trait DismissalHandler {
    /// Dismisses the sheet's content.
    fn perform_dismissal(&mut self, animated: bool);
}

impl<F: FnMut(bool)> DismissalHandler for F {
    fn perform_dismissal(&mut self, animated: bool) {
        self(animated);
    }
}

/// The view layer that shows the sheet.
pub trait SheetHost {
    /// Handle of a scroll view embedded in the sheet content.
    ///
    /// The controller only stores the handle; the view itself stays owned by
    /// the content. Hosts without scrollable content can use `()`.
    type ScrollView: Copy + Eq + Debug;

    /// Current container geometry, or `None` when the sheet is not in a
    /// container (yet or anymore).
    fn container(&self) -> Option<Container>;

    /// Height the presented content would like, excluding safe areas.
    fn preferred_content_height(&self) -> f64;

    /// Current frame of the presented surface, or `None` when it is missing.
    fn presented_frame(&self) -> Option<Rect>;

    /// Moves the presented surface.
    fn set_presented_frame(&mut self, frame: Rect);

    /// Moves the pull bar vertically.
    fn set_pull_bar_origin_y(&mut self, y: f64);

    /// Sets the backdrop opacity.
    fn set_shading_alpha(&mut self, alpha: f64);

    /// Runs an animation. Completion comes back through the controller's
    /// lifecycle notifications.
    fn animate(&mut self, animation: SheetAnimation);

    /// Asks the presenting side to start an animated, interruptible
    /// dismissal. When it settles the host reports back through
    /// [`SheetController::interactive_dismissal_settled`](crate::SheetController::interactive_dismissal_settled).
    fn begin_interactive_dismissal(&mut self);

    /// The scroll view the presented content wants tracked, if any.
    fn scroll_view(&self) -> Option<Self::ScrollView>;

    /// Registers the sheet as an observer of `view`'s scroll callbacks.
    ///
    /// Returns `false` when the view no longer exists.
    fn subscribe_scroll(&mut self, view: Self::ScrollView) -> bool;

    /// Removes the sheet from `view`'s observers.
    fn unsubscribe_scroll(&mut self, view: Self::ScrollView);
}
