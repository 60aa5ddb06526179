// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single percent-driven session behind an interactive dismissal.
//!
//! A session is opened when a drag starts (or overscroll first grabs the
//! sheet) and is consumed by [`InteractiveSession::finish`] or
//! [`InteractiveSession::cancel`]. Since closing takes the session by value,
//! a closed session cannot be updated or closed again.
//!
//! ```
//! use understory_sheet::session::{Completion, InputSource, InteractiveSession};
//!
//! let mut session = InteractiveSession::new(InputSource::SheetDrag);
//! session.update(0.4);
//! assert_eq!(session.progress(), 0.4);
//!
//! // Progress is clamped to the unit interval.
//! session.update(-3.0);
//! assert_eq!(session.progress(), 0.0);
//!
//! let closed = session.cancel();
//! assert_eq!(closed.completion, Completion::Cancel);
//! ```

/// Which input opened a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// A pan on the sheet surface.
    SheetDrag,
    /// A pan on the pull bar above the sheet.
    PullBarDrag,
    /// Overscroll of a scroll view embedded in the sheet.
    ScrollOverscroll,
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Completion {
    /// Commit the dismissal.
    Finish,
    /// Roll back to the presented state.
    Cancel,
}

impl Completion {
    /// `Cancel` when `cancelled`, otherwise `Finish`.
    #[must_use]
    pub fn from_cancelled(cancelled: bool) -> Self {
        if cancelled { Self::Cancel } else { Self::Finish }
    }

    /// Returns `true` for [`Completion::Finish`].
    #[must_use]
    pub fn is_finish(self) -> bool {
        self == Self::Finish
    }
}

/// An open interactive transition.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractiveSession {
    source: InputSource,
    progress: f64,
}

impl InteractiveSession {
    /// Opens a session at progress zero.
    #[must_use]
    pub fn new(source: InputSource) -> Self {
        Self {
            source,
            progress: 0.0,
        }
    }

    /// The input that opened this session.
    #[must_use]
    pub fn source(&self) -> InputSource {
        self.source
    }

    /// Current progress in `[0, 1]`; `0` is fully presented.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Sets the progress, clamped into `[0, 1]`. NaN is ignored.
    pub fn update(&mut self, progress: f64) {
        if progress.is_nan() {
            log::debug!("ignoring NaN progress for {:?}", self.source);
            return;
        }
        self.progress = progress.clamp(0.0, 1.0);
    }

    /// Commits the transition.
    #[must_use]
    pub fn finish(self) -> ClosedSession {
        self.close(Completion::Finish)
    }

    /// Rolls the transition back.
    #[must_use]
    pub fn cancel(self) -> ClosedSession {
        self.close(Completion::Cancel)
    }

    /// Closes the session with the given completion.
    #[must_use]
    pub fn close(self, completion: Completion) -> ClosedSession {
        ClosedSession {
            source: self.source,
            progress: self.progress,
            completion,
        }
    }
}

/// Summary of a session after it was finished or cancelled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosedSession {
    /// The input that had opened the session.
    pub source: InputSource,
    /// Progress at the moment it was closed.
    pub progress: f64,
    /// Whether it committed or rolled back.
    pub completion: Completion,
}

impl ClosedSession {
    /// Fraction of the full transition still left to animate.
    ///
    /// A finished session still has to travel to `1`, a cancelled one back
    /// to `0`.
    #[must_use]
    pub fn remaining_fraction(&self) -> f64 {
        match self.completion {
            Completion::Finish => 1.0 - self.progress,
            Completion::Cancel => self.progress,
        }
    }

    /// Progress the sheet settles at.
    #[must_use]
    pub fn target_progress(&self) -> f64 {
        match self.completion {
            Completion::Finish => 1.0,
            Completion::Cancel => 0.0,
        }
    }
}
