// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation requests for presenting, dismissing and settling the sheet.
//!
//! The engine does not run animations. It describes them as a
//! [`SheetAnimation`]: start and end [`SheetLayout`], duration and curve. The
//! host's animator interpolates (see [`SheetAnimation::sample`]) and reports
//! completion through the controller's lifecycle notifications.
//!
//! ```
//! use kurbo::{Insets, Size};
//! use understory_sheet::config::SheetConfig;
//! use understory_sheet::frame::Container;
//! use understory_sheet::transition::{AnimationCurve, TransitionKind, TransitionPlan};
//!
//! let container = Container::new(Size::new(400.0, 800.0), Insets::ZERO);
//! let config = SheetConfig::default();
//! let plan = TransitionPlan::new(
//!     TransitionKind::Presentation,
//!     Some(&container),
//!     300.0,
//!     false,
//!     &config,
//! );
//!
//! let animation = plan.animation();
//! assert_eq!(animation.curve, AnimationCurve::EaseInOut);
//! assert_eq!(animation.from.frame.y0, 800.0);
//! assert_eq!(animation.to.frame.y0, 500.0);
//! assert_eq!(animation.from.shading_alpha, 0.0);
//! assert_eq!(animation.to.shading_alpha, 1.0);
//! ```

use core::time::Duration;

use kurbo::Rect;

use crate::config::SheetConfig;
use crate::frame::{Container, SheetLayout, offscreen_frame, presented_frame};
use crate::session::ClosedSession;

/// Which lifecycle transition an animation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Sliding the sheet in.
    Presentation,
    /// Sliding the sheet out.
    Dismissal,
}

/// Timing curve of an animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationCurve {
    /// Constant speed; used while and right after a gesture drives the sheet.
    Linear,
    /// Slow start and end; used for non-interactive transitions.
    #[default]
    EaseInOut,
}

impl AnimationCurve {
    /// Maps linear time `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 - 2.0 * t;
                    1.0 - u * u * u * 0.5
                }
            }
        }
    }

    /// Linear for interactive transitions, eased otherwise.
    #[must_use]
    pub fn for_interactive(interactive: bool) -> Self {
        if interactive {
            Self::Linear
        } else {
            Self::EaseInOut
        }
    }
}

/// A request to animate the sheet chrome from one layout to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetAnimation {
    /// The lifecycle transition this animation completes.
    pub kind: TransitionKind,
    /// `true` when the animation rolls the transition back (a cancelled
    /// interactive dismissal returning to the presented layout).
    pub reverses: bool,
    /// How long the animation runs.
    pub duration: Duration,
    /// Timing curve.
    pub curve: AnimationCurve,
    /// Layout at the start.
    pub from: SheetLayout,
    /// Layout at the end.
    pub to: SheetLayout,
}

impl SheetAnimation {
    /// Layout at linear time `t` in `[0, 1]`, after applying the curve.
    #[must_use]
    pub fn sample(&self, t: f64) -> SheetLayout {
        let e = self.curve.apply(t);
        SheetLayout {
            frame: lerp_rect(self.from.frame, self.to.frame, e),
            pull_bar_origin_y: lerp(self.from.pull_bar_origin_y, self.to.pull_bar_origin_y, e),
            shading_alpha: lerp(self.from.shading_alpha, self.to.shading_alpha, e),
        }
    }

    /// The animation that finishes or rolls back an interactive dismissal.
    ///
    /// It starts from wherever the gesture left the sheet, runs for the
    /// remaining share of the configured duration and keeps the linear curve
    /// the gesture was using.
    #[must_use]
    pub fn settle(
        closed: &ClosedSession,
        presented: Rect,
        offscreen: Rect,
        config: &SheetConfig,
    ) -> Self {
        let from = SheetLayout::at_progress(
            presented,
            offscreen,
            closed.progress,
            &config.style,
            config.grid,
        );
        let to = SheetLayout::at_progress(
            presented,
            offscreen,
            closed.target_progress(),
            &config.style,
            config.grid,
        );
        Self {
            kind: TransitionKind::Dismissal,
            reverses: !closed.completion.is_finish(),
            duration: scaled_duration(
                config.style.transition_duration,
                closed.remaining_fraction().clamp(0.0, 1.0),
            ),
            curve: AnimationCurve::Linear,
            from,
            to,
        }
    }
}

/// Start and end layouts of a full present or dismiss transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionPlan {
    kind: TransitionKind,
    presented: SheetLayout,
    offscreen: SheetLayout,
    duration: Duration,
    curve: AnimationCurve,
}

impl TransitionPlan {
    /// Plans a transition for the given container and content height.
    ///
    /// Without a container both layouts collapse to [`Rect::ZERO`].
    #[must_use]
    pub fn new(
        kind: TransitionKind,
        container: Option<&Container>,
        preferred_height: f64,
        interactive: bool,
        config: &SheetConfig,
    ) -> Self {
        let frame = presented_frame(container, preferred_height, config.grid);
        let parked = container.map_or(Rect::ZERO, |c| offscreen_frame(c, frame.size()));
        Self {
            kind,
            presented: SheetLayout::presented(frame, &config.style, config.grid),
            offscreen: SheetLayout::dismissed(parked, &config.style, config.grid),
            duration: config.style.transition_duration,
            curve: AnimationCurve::for_interactive(interactive),
        }
    }

    /// Which way the plan goes.
    #[must_use]
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Layout before the first frame.
    #[must_use]
    pub fn initial(&self) -> SheetLayout {
        match self.kind {
            TransitionKind::Presentation => self.offscreen,
            TransitionKind::Dismissal => self.presented,
        }
    }

    /// Layout after the last frame.
    #[must_use]
    pub fn target(&self) -> SheetLayout {
        match self.kind {
            TransitionKind::Presentation => self.presented,
            TransitionKind::Dismissal => self.offscreen,
        }
    }

    /// The animation request for the animator.
    #[must_use]
    pub fn animation(&self) -> SheetAnimation {
        SheetAnimation {
            kind: self.kind,
            reverses: false,
            duration: self.duration,
            curve: self.curve,
            from: self.initial(),
            to: self.target(),
        }
    }
}

/// `duration * fraction`, saturating at `duration` when the product does not
/// fit in a [`Duration`].
fn scaled_duration(duration: Duration, fraction: f64) -> Duration {
    Duration::try_from_secs_f64(duration.as_secs_f64() * fraction).unwrap_or(duration)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_rect(a: Rect, b: Rect, t: f64) -> Rect {
    Rect::new(
        lerp(a.x0, b.x0, t),
        lerp(a.y0, b.y0, t),
        lerp(a.x1, b.x1, t),
        lerp(a.y1, b.y1, t),
    )
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Size};

    use super::*;
    use crate::session::{InputSource, InteractiveSession};

    fn container() -> Container {
        Container::new(Size::new(400.0, 800.0), Insets::ZERO)
    }

    #[test]
    fn curves_hit_their_endpoints() {
        for curve in [AnimationCurve::Linear, AnimationCurve::EaseInOut] {
            assert_eq!(curve.apply(0.0), 0.0);
            assert_eq!(curve.apply(1.0), 1.0);
            assert_eq!(curve.apply(-1.0), 0.0);
            assert_eq!(curve.apply(2.0), 1.0);
        }
        assert_eq!(AnimationCurve::EaseInOut.apply(0.5), 0.5);
        assert!(AnimationCurve::EaseInOut.apply(0.25) < 0.25);
        assert!(AnimationCurve::EaseInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn interactive_transitions_are_linear() {
        assert_eq!(AnimationCurve::for_interactive(true), AnimationCurve::Linear);
        assert_eq!(
            AnimationCurve::for_interactive(false),
            AnimationCurve::EaseInOut
        );
    }

    #[test]
    fn dismissal_plan_runs_presented_to_offscreen() {
        let config = SheetConfig::default();
        let plan = TransitionPlan::new(
            TransitionKind::Dismissal,
            Some(&container()),
            300.0,
            true,
            &config,
        );
        let animation = plan.animation();
        assert_eq!(animation.curve, AnimationCurve::Linear);
        assert_eq!(animation.duration, Duration::from_millis(300));
        assert_eq!(animation.from.frame, Rect::new(0.0, 500.0, 400.0, 800.0));
        assert_eq!(animation.to.frame, Rect::new(0.0, 800.0, 400.0, 1100.0));
        assert_eq!(animation.from.pull_bar_origin_y, 481.0);
        assert_eq!(animation.to.shading_alpha, 0.0);
        assert!(!animation.reverses);
    }

    #[test]
    fn plan_without_container_is_degenerate() {
        let config = SheetConfig::default();
        let plan = TransitionPlan::new(TransitionKind::Presentation, None, 300.0, false, &config);
        assert_eq!(plan.initial().frame, Rect::ZERO);
        assert_eq!(plan.target().frame, Rect::ZERO);
    }

    #[test]
    fn sample_follows_the_curve() {
        let config = SheetConfig::default();
        let plan = TransitionPlan::new(
            TransitionKind::Presentation,
            Some(&container()),
            300.0,
            false,
            &config,
        );
        let animation = plan.animation();
        assert_eq!(animation.sample(0.0), animation.from);
        assert_eq!(animation.sample(1.0), animation.to);
        let quarter = animation.sample(0.25);
        // Eased: still close to the start after a quarter of the time.
        assert!(quarter.frame.y0 > 800.0 - 0.25 * 300.0);
        assert_eq!(quarter.frame.height(), 300.0);
    }

    #[test]
    fn settle_animates_the_remaining_share() {
        let config = SheetConfig::default();
        let presented = Rect::new(0.0, 500.0, 400.0, 800.0);
        let offscreen = offscreen_frame(&container(), presented.size());
        let mut session = InteractiveSession::new(InputSource::SheetDrag);
        session.update(0.25);

        let finish =
            SheetAnimation::settle(&session.clone().finish(), presented, offscreen, &config);
        assert!((finish.duration.as_secs_f64() - 0.225).abs() < 1e-6);
        assert_eq!(finish.from.frame.y0, 575.0);
        assert_eq!(finish.to.frame.y0, 800.0);
        assert_eq!(finish.curve, AnimationCurve::Linear);
        assert!(!finish.reverses);

        let cancel = SheetAnimation::settle(&session.cancel(), presented, offscreen, &config);
        assert!((cancel.duration.as_secs_f64() - 0.075).abs() < 1e-6);
        assert_eq!(cancel.to.frame, presented);
        assert_eq!(cancel.to.shading_alpha, 1.0);
        assert!(cancel.reverses);
    }

    #[test]
    fn settle_with_huge_duration_saturates() {
        let config = SheetConfig::default().with_transition_duration(Duration::MAX);
        let presented = Rect::new(0.0, 500.0, 400.0, 800.0);
        let offscreen = offscreen_frame(&container(), presented.size());
        let session = InteractiveSession::new(InputSource::SheetDrag);

        let finish =
            SheetAnimation::settle(&session.clone().finish(), presented, offscreen, &config);
        assert_eq!(finish.duration, Duration::MAX);

        let mut dragged = session;
        dragged.update(0.25);
        let finish = SheetAnimation::settle(&dragged.finish(), presented, offscreen, &config);
        assert!(finish.duration < Duration::MAX);
        assert!(finish.duration > Duration::MAX / 2);
    }
}
