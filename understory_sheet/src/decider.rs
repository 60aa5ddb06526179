// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commit-or-cancel decision when a dismissal drag is released.
//!
//! The release is projected forward under constant deceleration: the sheet
//! is treated as a body moving at the release velocity that brakes at
//! `deceleration` points per second squared until it stops. The decision is
//! made on where it would stop, not where the finger lifted, so a quick flick
//! dismisses from anywhere and a slow drag past the midpoint that is being
//! pulled back still cancels.
//!
//! ```
//! use understory_sheet::config::DismissalPolicy;
//! use understory_sheet::decider::decide;
//! use understory_sheet::session::Completion;
//!
//! let policy = DismissalPolicy::default();
//!
//! // Resting at 60% of the sheet height commits.
//! assert_eq!(decide(0.0, 360.0, 600.0, &policy), Some(Completion::Finish));
//!
//! // A downward flick from 30% commits too.
//! assert_eq!(decide(2000.0, 180.0, 600.0, &policy), Some(Completion::Finish));
//!
//! // No geometry, no decision.
//! assert_eq!(decide(2000.0, 180.0, 0.0, &policy), None);
//! ```

use crate::config::DismissalPolicy;
use crate::session::Completion;

/// Progress at which a release would come to rest.
///
/// `velocity` and `translation` are vertical, positive downward.
/// `deceleration` is a magnitude; it always opposes `velocity`. Returns NaN
/// or an infinity when `height` is zero, so callers should go through
/// [`decide`].
#[must_use]
pub fn projected_progress(velocity: f64, translation: f64, height: f64, deceleration: f64) -> f64 {
    let deceleration = if velocity > 0.0 {
        -deceleration
    } else {
        deceleration
    };
    (translation - 0.5 * velocity * velocity / deceleration) / height
}

/// Decides whether a released drag commits the dismissal.
///
/// Returns `None` when the sheet has no usable height or the projection is not
/// finite; callers treat that as a cancellation.
#[must_use]
pub fn decide(
    velocity: f64,
    translation: f64,
    height: f64,
    policy: &DismissalPolicy,
) -> Option<Completion> {
    if height.is_nan() || height <= 0.0 {
        return None;
    }
    let progress = projected_progress(velocity, translation, height, policy.deceleration);
    if !progress.is_finite() {
        log::warn!(
            "non-finite projected progress (velocity {velocity}, translation {translation}, height {height})"
        );
        return None;
    }
    Some(Completion::from_cancelled(progress < policy.threshold))
}
