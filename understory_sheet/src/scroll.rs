// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overscroll hand-off between an embedded scroll view and the sheet.
//!
//! When the sheet's content scrolls, a downward drag that starts with the
//! content at its top should move the sheet instead of the content. The
//! [`OverscrollArbiter`] looks at one [`ScrollSample`] per scroll callback and
//! decides, frame by frame, who owns the drag:
//!
//! - Nothing is handed off unless the user is dragging the scroll view.
//! - With the content at its top and the finger moving down, the sheet takes
//!   over. The arbiter accumulates translation for the sheet and asks the host
//!   to pin the content at its resting offset.
//! - Once the sheet has moved (session progress above zero) it keeps the drag
//!   until the finger lifts, even if the finger briefly reverses.
//! - Otherwise the scroll view keeps scrolling, and the arbiter re-anchors so a
//!   later hand-off measures translation from that moment.
//!
//! The arbiter only decides. [`SheetController`](crate::SheetController) opens
//! the session and applies progress.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_sheet::scroll::{OverscrollArbiter, ScrollRelease, ScrollSample, ScrollStep};
//!
//! let mut arbiter = OverscrollArbiter::default();
//! arbiter.will_begin_dragging();
//!
//! // Content at its top (offset == -inset), finger moving down.
//! let sample = ScrollSample::tracking(Point::new(0.0, 12.0), Vec2::new(0.0, 300.0))
//!     .with_content_offset(Point::new(0.0, -20.0), 20.0);
//! assert_eq!(
//!     arbiter.did_scroll(&sample, None),
//!     ScrollStep::Drive { overlay_translation: 12.0, pinned_offset_y: -20.0 },
//! );
//!
//! let release = arbiter.will_end_dragging(&sample);
//! assert_eq!(release, ScrollRelease::Settle { velocity: 300.0, translation: 12.0 });
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::geometry::AlmostEq;

/// Scroll view state captured in one scroll callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    /// Whether the user's finger is on the scroll view.
    pub is_tracking: bool,
    /// Translation of the scroll view's pan gesture since touch-down.
    pub translation: Point,
    /// Velocity of the scroll view's pan gesture, positive downward.
    pub velocity: Vec2,
    /// Content offset of the scroll view.
    pub content_offset: Point,
    /// Top content inset after safe-area adjustment.
    pub adjusted_inset_top: f64,
}

impl ScrollSample {
    /// A sample taken while the user is dragging, with the content resting at
    /// its top and no inset.
    #[must_use]
    pub fn tracking(translation: Point, velocity: Vec2) -> Self {
        Self {
            is_tracking: true,
            translation,
            velocity,
            content_offset: Point::ZERO,
            adjusted_inset_top: 0.0,
        }
    }

    /// Replaces the content offset and top inset.
    #[must_use]
    pub fn with_content_offset(mut self, content_offset: Point, adjusted_inset_top: f64) -> Self {
        self.content_offset = content_offset;
        self.adjusted_inset_top = adjusted_inset_top;
        self
    }

    /// Marks the sample as not tracking (momentum scrolling, programmatic
    /// scrolling).
    #[must_use]
    pub fn not_tracking(mut self) -> Self {
        self.is_tracking = false;
        self
    }

    /// Content offset at which the content rests at its top.
    #[must_use]
    pub fn resting_offset_y(&self) -> f64 {
        -self.adjusted_inset_top
    }

    /// Whether the content is scrolled to (or pulled past) its top.
    #[must_use]
    pub fn is_content_origin_in_bounds(&self) -> bool {
        self.content_offset.y <= self.resting_offset_y()
    }

    /// Whether the finger moves up the screen.
    #[must_use]
    pub fn scrolls_up(&self) -> bool {
        self.velocity.y < 0.0
    }

    /// Whether the finger moves down the screen or rests.
    #[must_use]
    pub fn scrolls_down(&self) -> bool {
        !self.scrolls_up()
    }
}

/// Outcome of one scroll callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollStep {
    /// The sheet owns the drag.
    Drive {
        /// Translation accumulated for the sheet during this hand-off.
        overlay_translation: f64,
        /// Content offset the host must pin the scroll view to.
        pinned_offset_y: f64,
    },
    /// The scroll view owns the drag.
    Follow,
}

/// Outcome of the scroll view's drag ending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollRelease {
    /// The sheet was driven during this drag; decide commit or cancel from
    /// these release values.
    Settle {
        /// Vertical release velocity.
        velocity: f64,
        /// Vertical translation since the last hand-off anchor.
        translation: f64,
    },
    /// The drag only scrolled content; roll back any open session.
    Cancel,
}

/// Per-gesture bookkeeping for overscroll hand-off.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverscrollArbiter {
    /// Pan translation when the scroll view last owned the drag.
    pub translation_at_drag_start: Point,
    /// Vertical pan translation of the previous callback.
    pub last_translation: f64,
    /// Translation handed to the sheet so far.
    pub overlay_translation: f64,
    /// Whether the sheet owned the most recent callback.
    pub is_driving_overlay: bool,
    /// Whether the sheet owned any callback of this drag.
    pub drove_overlay: bool,
    /// Whether a scroll view drag is in progress.
    pub is_dragging: bool,
}

impl OverscrollArbiter {
    /// The user started dragging the scroll view.
    pub fn will_begin_dragging(&mut self) {
        self.is_dragging = true;
    }

    /// Whether the sheet should own the drag for `sample`.
    ///
    /// `session_progress` is the progress of the open interactive session,
    /// if any.
    #[must_use]
    pub fn should_drive(&self, sample: &ScrollSample, session_progress: Option<f64>) -> bool {
        if !sample.is_tracking || !self.is_dragging {
            return false;
        }
        match session_progress {
            Some(progress) if !progress.is_almost_equal(&0.0) => true,
            _ => sample.is_content_origin_in_bounds() && sample.scrolls_down(),
        }
    }

    /// Handles one scroll callback.
    pub fn did_scroll(
        &mut self,
        sample: &ScrollSample,
        session_progress: Option<f64>,
    ) -> ScrollStep {
        let previous = self.last_translation;
        self.last_translation = sample.translation.y;

        self.is_driving_overlay = self.should_drive(sample, session_progress);
        if self.is_driving_overlay {
            debug_assert!(self.is_dragging, "overlay driven outside a scroll drag");
            self.drove_overlay = true;
            self.overlay_translation += sample.translation.y - previous;
            ScrollStep::Drive {
                overlay_translation: self.overlay_translation,
                pinned_offset_y: sample.resting_offset_y(),
            }
        } else {
            self.translation_at_drag_start = sample.translation;
            ScrollStep::Follow
        }
    }

    /// Records `sample` as owned by the scroll view without consulting the
    /// hand-off rules, for callbacks the sheet cannot take over.
    pub fn follow(&mut self, sample: &ScrollSample) -> ScrollStep {
        self.last_translation = sample.translation.y;
        self.is_driving_overlay = false;
        self.translation_at_drag_start = sample.translation;
        ScrollStep::Follow
    }

    /// The user lifted the finger. Resets all per-gesture state.
    pub fn will_end_dragging(&mut self, sample: &ScrollSample) -> ScrollRelease {
        let release = if self.drove_overlay {
            ScrollRelease::Settle {
                velocity: sample.velocity.y,
                translation: sample.translation.y - self.translation_at_drag_start.y,
            }
        } else {
            ScrollRelease::Cancel
        };
        self.reset();
        release
    }

    /// Clears all per-gesture state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Observers registered on one scroll view.
///
/// Scroll views embed this to notify more than one party of scroll
/// callbacks. Each observer is present at most once.
///
/// ```
/// use understory_sheet::scroll::ScrollObservers;
///
/// let mut observers = ScrollObservers::new();
/// assert!(observers.add("sheet"));
/// assert!(!observers.add("sheet"));
/// assert!(observers.add("analytics"));
/// assert_eq!(observers.iter().copied().collect::<Vec<_>>(), ["sheet", "analytics"]);
///
/// assert!(observers.remove(&"sheet"));
/// assert!(!observers.contains(&"sheet"));
/// ```
#[derive(Clone, Debug)]
pub struct ScrollObservers<O> {
    observers: SmallVec<[O; 2]>,
}

impl<O> Default for ScrollObservers<O> {
    fn default() -> Self {
        Self {
            observers: SmallVec::new(),
        }
    }
}

impl<O: PartialEq> ScrollObservers<O> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `observer`; returns `false` if it was already present.
    pub fn add(&mut self, observer: O) -> bool {
        if self.contains(&observer) {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Removes `observer`; returns `false` if it was not present.
    pub fn remove(&mut self, observer: &O) -> bool {
        match self.observers.iter().position(|o| o == observer) {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `observer` is registered.
    #[must_use]
    pub fn contains(&self, observer: &O) -> bool {
        self.observers.iter().any(|o| o == observer)
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns `true` if nobody is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Registered observers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &O> {
        self.observers.iter()
    }
}
