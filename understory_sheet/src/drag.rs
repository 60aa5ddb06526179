// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag translator: turn pan gesture samples on the sheet or its pull bar
//! into dismissal progress.
//!
//! ## Usage
//!
//! 1) Feed every pan sample to [`DragTranslator::step`] together with the
//!    current sheet height.
//! 2) Act on the returned [`DragStep`]: open a session, push progress, or
//!    release/cancel it.
//! 3) The translator resets itself when the gesture ends or is cancelled.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Vec2;
//! use understory_sheet::drag::{DragStep, DragTranslator, GestureSample};
//!
//! let mut drag = DragTranslator::default();
//!
//! assert_eq!(drag.step(&GestureSample::began(), Some(400.0)), DragStep::Open);
//! assert!(drag.is_dragging());
//!
//! // Dragging down by 100 points on a 400 point sheet is 25% progress.
//! let step = drag.step(&GestureSample::changed(Vec2::new(3.0, 100.0), Vec2::ZERO), Some(400.0));
//! assert_eq!(step, DragStep::Progress(0.25));
//!
//! let step = drag.step(
//!     &GestureSample::ended(Vec2::new(3.0, 120.0), Vec2::new(0.0, 900.0)),
//!     Some(400.0),
//! );
//! assert_eq!(step, DragStep::Release { velocity: 900.0, translation: 120.0 });
//! assert!(!drag.is_dragging());
//! ```

use kurbo::Vec2;

/// Phase of a continuous pan gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// The finger went down and moved far enough to be recognized as a pan.
    Began,
    /// The finger moved.
    Changed,
    /// The finger lifted.
    Ended,
    /// The platform took the gesture away.
    Cancelled,
}

/// One pan gesture callback.
///
/// `translation` is the offset from the touch-down point and `velocity` is in
/// points per second; both are positive downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    /// Gesture phase.
    pub phase: GesturePhase,
    /// Offset since the gesture began.
    pub translation: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
}

impl GestureSample {
    /// A `Began` sample at zero translation.
    #[must_use]
    pub fn began() -> Self {
        Self {
            phase: GesturePhase::Began,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    /// A `Changed` sample.
    #[must_use]
    pub fn changed(translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase: GesturePhase::Changed,
            translation,
            velocity,
        }
    }

    /// An `Ended` sample.
    #[must_use]
    pub fn ended(translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase: GesturePhase::Ended,
            translation,
            velocity,
        }
    }

    /// A `Cancelled` sample.
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            phase: GesturePhase::Cancelled,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }
}

/// What the controller should do with a gesture sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragStep {
    /// Open a session if none is open.
    Open,
    /// Open a session if none is open, then set its progress.
    Progress(f64),
    /// Decide between commit and cancel from the release values.
    Release {
        /// Vertical release velocity.
        velocity: f64,
        /// Vertical translation at release.
        translation: f64,
    },
    /// Roll the session back.
    Cancel,
    /// Nothing to do (for example, no sheet geometry).
    Ignore,
}

/// Progress for a vertical translation on a sheet of `height`.
///
/// The value is not clamped; negative or over-one values are left for the
/// session to clamp. Returns `None` when `height` is not a usable size.
#[must_use]
pub fn progress_for(translation: f64, height: f64) -> Option<f64> {
    if height.is_nan() || height <= 0.0 {
        None
    } else {
        Some(translation / height)
    }
}

/// Tracks one sheet or pull bar pan gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragTranslator {
    /// Whether a gesture is active.
    pub dragging: bool,
}

impl DragTranslator {
    /// Interprets `sample`; `sheet_height` is the presented surface's height,
    /// or `None` when it is missing.
    pub fn step(&mut self, sample: &GestureSample, sheet_height: Option<f64>) -> DragStep {
        match sample.phase {
            GesturePhase::Began => {
                self.dragging = true;
                DragStep::Open
            }
            GesturePhase::Changed => {
                self.dragging = true;
                match sheet_height.and_then(|h| progress_for(sample.translation.y, h)) {
                    Some(progress) => DragStep::Progress(progress),
                    None => DragStep::Ignore,
                }
            }
            GesturePhase::Ended => {
                self.end();
                DragStep::Release {
                    velocity: sample.velocity.y,
                    translation: sample.translation.y,
                }
            }
            GesturePhase::Cancelled => {
                self.end();
                DragStep::Cancel
            }
        }
    }

    /// Forgets the active gesture.
    pub fn end(&mut self) {
        self.dragging = false;
    }

    /// Returns `true` while a gesture is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}
