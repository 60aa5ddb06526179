// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation lifecycle of a sheet.

/// Where the sheet is in its present/dismiss lifecycle.
///
/// Transitions follow the host's lifecycle notifications, never gestures:
///
/// ```text
/// Dismissed ──will_begin──▶ Presenting ──did_end(true)──▶ Presented
///     ▲                         │                            │
///     └──────did_end(false)─────┘                     will_begin
///     ▲                                                      ▼
///     └──────────did_end(true)───────────────────────── Dismissing
///                                 Presented ◀─did_end(false)─┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PresentationState {
    /// Not on screen.
    #[default]
    Dismissed,
    /// The present animation is running.
    Presenting,
    /// Fully on screen and accepting dismissal input.
    Presented,
    /// A dismissal, interactive or not, is in flight.
    Dismissing,
}

impl PresentationState {
    /// State after the presentation transition begins.
    #[must_use]
    pub fn presentation_will_begin(self) -> Self {
        if self != Self::Dismissed {
            log::debug!("presentation began from {self:?}");
        }
        Self::Presenting
    }

    /// State after the presentation transition ends.
    #[must_use]
    pub fn presentation_did_end(self, completed: bool) -> Self {
        if completed {
            Self::Presented
        } else {
            Self::Dismissed
        }
    }

    /// State after the dismissal transition begins.
    #[must_use]
    pub fn dismissal_will_begin(self) -> Self {
        if self != Self::Presented {
            log::debug!("dismissal began from {self:?}");
        }
        Self::Dismissing
    }

    /// State after the dismissal transition ends.
    #[must_use]
    pub fn dismissal_did_end(self, completed: bool) -> Self {
        if completed {
            Self::Dismissed
        } else {
            Self::Presented
        }
    }

    /// Whether dismissal input (taps, new drags) is honored.
    #[must_use]
    pub fn accepts_dismissal(self) -> bool {
        self == Self::Presented
    }
}
