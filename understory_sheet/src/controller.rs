// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sheet controller: one presented sheet, its lifecycle and the gestures
//! that can dismiss it.
//!
//! [`SheetController`] routes three input sources into a single interactive
//! dismissal session:
//!
//! - pans on the sheet body and on the pull bar ([`SheetController::handle_drag`]),
//! - overscroll of an embedded scroll view ([`SheetController::scroll_did_scroll`]),
//! - taps on the backdrop ([`SheetController::handle_backdrop_tap`]).
//!
//! Whichever source moves first opens the session; the others feed the same
//! session until one of them ends it. The controller owns no views. Every call
//! that has visible effects takes the [`SheetHost`] as `&mut`.
//!
//! ## Lifecycle
//!
//! The host reports transitions with [`presentation_will_begin`],
//! [`presentation_did_end`], [`dismissal_will_begin`] and
//! [`dismissal_did_end`]. Only a [`PresentationState::Presented`] sheet
//! accepts new dismissal input.
//!
//! [`presentation_will_begin`]: SheetController::presentation_will_begin
//! [`presentation_did_end`]: SheetController::presentation_did_end
//! [`dismissal_will_begin`]: SheetController::dismissal_will_begin
//! [`dismissal_did_end`]: SheetController::dismissal_did_end

use core::fmt::{self, Debug};

use kurbo::Rect;

use crate::config::SheetConfig;
use crate::decider::decide;
use crate::drag::{DragStep, DragTranslator, GestureSample, progress_for};
use crate::frame::{SheetLayout, offscreen_frame, presented_frame, pull_bar_origin_y};
use crate::geometry::AlmostEq;
use crate::host::{DismissalHandler, SheetHost};
use crate::scroll::{OverscrollArbiter, ScrollRelease, ScrollSample, ScrollStep};
use crate::session::{ClosedSession, Completion, InputSource, InteractiveSession};
use crate::state::PresentationState;
use crate::transition::{SheetAnimation, TransitionKind, TransitionPlan};

/// Result of [`SheetController::begin_interactive_transition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BeginOutcome {
    /// A new session was opened and the host was asked to start dismissing.
    Opened,
    /// A session was already open; it keeps the source that opened it.
    AlreadyOpen(InputSource),
    /// The sheet is not presented, so no session was opened.
    Rejected(PresentationState),
}

impl BeginOutcome {
    /// Returns `true` if a session is open after the call.
    #[must_use]
    pub fn has_session(self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Controller for one presented bottom sheet.
///
/// `D` tears the content down when a dismissal commits. `S` is the host's
/// scroll view handle type.
pub struct SheetController<D, S = u32> {
    config: SheetConfig,
    state: PresentationState,
    session: Option<InteractiveSession>,
    drag: DragTranslator,
    overscroll: OverscrollArbiter,
    tracked_scroll_view: Option<S>,
    dismissal_handler: D,
}

impl<D, S: Debug> Debug for SheetController<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("session", &self.session)
            .field("drag", &self.drag)
            .field("overscroll", &self.overscroll)
            .field("tracked_scroll_view", &self.tracked_scroll_view)
            .finish_non_exhaustive()
    }
}

impl<D: DismissalHandler, S: Copy + Eq + Debug> SheetController<D, S> {
    /// Creates a controller for content that is about to be presented.
    pub fn new(dismissal_handler: D, config: SheetConfig) -> Self {
        Self {
            config,
            state: PresentationState::Dismissed,
            session: None,
            drag: DragTranslator::default(),
            overscroll: OverscrollArbiter::default(),
            tracked_scroll_view: None,
            dismissal_handler,
        }
    }

    /// Geometry and style settings.
    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// The open interactive session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&InteractiveSession> {
        self.session.as_ref()
    }

    /// Returns `true` while an interactive session is open.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.session.is_some()
    }

    /// Per-gesture overscroll state.
    #[must_use]
    pub fn overscroll(&self) -> &OverscrollArbiter {
        &self.overscroll
    }

    /// The scroll view whose callbacks are routed to this controller.
    #[must_use]
    pub fn tracked_scroll_view(&self) -> Option<S> {
        self.tracked_scroll_view
    }

    /// The dismissal handler.
    #[must_use]
    pub fn dismissal_handler(&self) -> &D {
        &self.dismissal_handler
    }

    /// Mutable access to the dismissal handler.
    pub fn dismissal_handler_mut(&mut self) -> &mut D {
        &mut self.dismissal_handler
    }

    // --- Geometry ---

    /// Where the presented surface should sit, from the host's current
    /// container and content size.
    #[must_use]
    pub fn frame_of_presented_view<H: SheetHost + ?Sized>(&self, host: &H) -> Rect {
        presented_frame(
            host.container().as_ref(),
            host.preferred_content_height(),
            self.config.grid,
        )
    }

    /// The content asked for a different height.
    ///
    /// Moves the surface and the pull bar when the recomputed frame differs
    /// from the current one. Returns whether anything was written.
    pub fn preferred_content_size_did_change<H: SheetHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> bool {
        let Some(current) = host.presented_frame() else {
            log::debug!("content size changed without a presented surface");
            return false;
        };
        let target = self.frame_of_presented_view(host);
        if current.is_almost_equal(&target) {
            return false;
        }
        host.set_presented_frame(target);
        host.set_pull_bar_origin_y(pull_bar_origin_y(
            target.y0,
            &self.config.style,
            self.config.grid,
        ));
        true
    }

    /// Presented and off-screen frames for the host's current geometry.
    fn resting_frames<H: SheetHost + ?Sized>(&self, host: &H) -> Option<(Rect, Rect)> {
        let container = host.container()?;
        let presented = presented_frame(
            Some(&container),
            host.preferred_content_height(),
            self.config.grid,
        );
        Some((presented, offscreen_frame(&container, presented.size())))
    }

    // --- Animated transitions ---

    /// Start and end layouts for `kind` from the host's current geometry.
    ///
    /// The plan uses the linear curve while an interactive session is open.
    #[must_use]
    pub fn transition_plan<H: SheetHost + ?Sized>(
        &self,
        kind: TransitionKind,
        host: &H,
    ) -> TransitionPlan {
        TransitionPlan::new(
            kind,
            host.container().as_ref(),
            host.preferred_content_height(),
            self.session.is_some(),
            &self.config,
        )
    }

    /// Runs the non-interactive part of a transition.
    ///
    /// Applies the plan's initial layout. Unless a session is open, the
    /// animation to the target layout is handed to the host as well; an
    /// interactive dismissal is driven by progress updates and settled when
    /// the session ends.
    pub fn animate_transition<H: SheetHost + ?Sized>(
        &self,
        kind: TransitionKind,
        host: &mut H,
    ) -> TransitionPlan {
        let plan = self.transition_plan(kind, host);
        plan.initial().apply(host);
        if self.session.is_none() {
            host.animate(plan.animation());
        }
        plan
    }

    // --- Lifecycle ---

    /// The presentation transition is about to start.
    pub fn presentation_will_begin(&mut self) {
        self.state = self.state.presentation_will_begin();
    }

    /// The presentation transition ended. A completed presentation starts
    /// tracking the content's scroll view, if it has one.
    pub fn presentation_did_end<H>(&mut self, completed: bool, host: &mut H)
    where
        H: SheetHost<ScrollView = S> + ?Sized,
    {
        self.state = self.state.presentation_did_end(completed);
        if completed {
            if let Some(view) = host.scroll_view() {
                self.track_scroll_view(view, host);
            }
        }
    }

    /// The dismissal transition is about to start.
    pub fn dismissal_will_begin(&mut self) {
        self.state = self.state.dismissal_will_begin();
    }

    /// The dismissal transition ended. A completed dismissal stops scroll
    /// tracking and forgets any gesture state.
    pub fn dismissal_did_end<H>(&mut self, completed: bool, host: &mut H)
    where
        H: SheetHost<ScrollView = S> + ?Sized,
    {
        self.state = self.state.dismissal_did_end(completed);
        if completed {
            if let Some(session) = self.session.take() {
                log::warn!("dismissal ended with an open {:?} session", session.source());
            }
            self.stop_tracking_scroll_view(host);
            self.drag.end();
        }
    }

    // --- Scroll tracking ---

    /// Routes `view`'s scroll callbacks to this controller, replacing any
    /// previously tracked view. Returns `false` if the host could not
    /// subscribe.
    pub fn track_scroll_view<H>(&mut self, view: S, host: &mut H) -> bool
    where
        H: SheetHost<ScrollView = S> + ?Sized,
    {
        if self.tracked_scroll_view == Some(view) {
            return true;
        }
        self.stop_tracking_scroll_view(host);
        if host.subscribe_scroll(view) {
            self.tracked_scroll_view = Some(view);
            true
        } else {
            log::warn!("could not subscribe to scroll view {view:?}");
            false
        }
    }

    /// Stops observing the tracked scroll view, if any.
    pub fn stop_tracking_scroll_view<H>(&mut self, host: &mut H)
    where
        H: SheetHost<ScrollView = S> + ?Sized,
    {
        if let Some(view) = self.tracked_scroll_view.take() {
            host.unsubscribe_scroll(view);
        }
        self.overscroll.reset();
    }

    // --- Interactive session ---

    /// Opens an interactive dismissal session for `source`.
    ///
    /// Opening asks the host to begin an interruptible dismissal; the host
    /// reports back through [`Self::interactive_dismissal_settled`].
    pub fn begin_interactive_transition<H: SheetHost + ?Sized>(
        &mut self,
        source: InputSource,
        host: &mut H,
    ) -> BeginOutcome {
        if let Some(session) = &self.session {
            return BeginOutcome::AlreadyOpen(session.source());
        }
        if !self.state.accepts_dismissal() {
            log::debug!("{source:?} cannot start a dismissal while {:?}", self.state);
            return BeginOutcome::Rejected(self.state);
        }
        self.session = Some(InteractiveSession::new(source));
        host.begin_interactive_dismissal();
        BeginOutcome::Opened
    }

    /// The host's interruptible dismissal settled.
    ///
    /// When the content is gone the owner is told to finish tearing it down.
    /// Returns whether the dismissal handler ran.
    pub fn interactive_dismissal_settled(&mut self, content_still_presented: bool) -> bool {
        if content_still_presented {
            false
        } else {
            self.dismissal_handler.perform_dismissal(true);
            true
        }
    }

    /// Moves the open session to `progress` and lays the sheet out there.
    ///
    /// Returns `false` when no session is open.
    pub fn update_progress<H: SheetHost + ?Sized>(&mut self, progress: f64, host: &mut H) -> bool {
        let Some(session) = self.session.as_mut() else {
            log::debug!("progress update {progress} without an interactive session");
            return false;
        };
        session.update(progress);
        let progress = session.progress();
        match self.resting_frames(host) {
            Some((presented, offscreen)) => SheetLayout::at_progress(
                presented,
                offscreen,
                progress,
                &self.config.style,
                self.config.grid,
            )
            .apply(host),
            None => log::warn!("no container to lay the sheet out at {progress}"),
        }
        true
    }

    /// Finishes (or, with `cancelled`, rolls back) the open session and asks
    /// the host to animate the rest of the way.
    ///
    /// Returns `None` if no session was open.
    pub fn end_interactive_transition<H: SheetHost + ?Sized>(
        &mut self,
        cancelled: bool,
        host: &mut H,
    ) -> Option<ClosedSession> {
        self.close_session(Completion::from_cancelled(cancelled), host)
    }

    /// Ends the open session from release values, letting the ballistic
    /// decider choose between finishing and cancelling. Without usable
    /// geometry the session is cancelled.
    pub fn end_interactive_transition_with_velocity<H: SheetHost + ?Sized>(
        &mut self,
        velocity: f64,
        translation: f64,
        host: &mut H,
    ) -> Option<ClosedSession> {
        if self.session.is_none() {
            log::debug!("release without an interactive session");
            return None;
        }
        let height = host.presented_frame().map(|frame| frame.height());
        let completion = height
            .and_then(|height| decide(velocity, translation, height, &self.config.policy))
            .unwrap_or_else(|| {
                log::warn!("no sheet height at release; cancelling");
                Completion::Cancel
            });
        self.close_session(completion, host)
    }

    fn close_session<H: SheetHost + ?Sized>(
        &mut self,
        completion: Completion,
        host: &mut H,
    ) -> Option<ClosedSession> {
        let Some(session) = self.session.take() else {
            log::debug!("no interactive session to end");
            return None;
        };
        let closed = session.close(completion);
        let (presented, offscreen) = self.resting_frames(host).unwrap_or_else(|| {
            log::warn!("no container while settling {:?}", closed.source);
            (Rect::ZERO, Rect::ZERO)
        });
        host.animate(SheetAnimation::settle(&closed, presented, offscreen, &self.config));
        Some(closed)
    }

    // --- Gestures ---

    /// Feeds a pan sample from the sheet body or the pull bar.
    ///
    /// Returns the closed session when the sample ended one.
    pub fn handle_drag<H: SheetHost + ?Sized>(
        &mut self,
        source: InputSource,
        sample: &GestureSample,
        host: &mut H,
    ) -> Option<ClosedSession> {
        let height = host.presented_frame().map(|frame| frame.height());
        match self.drag.step(sample, height) {
            DragStep::Open => {
                self.begin_interactive_transition(source, host);
                None
            }
            DragStep::Progress(progress) => {
                if self.begin_interactive_transition(source, host).has_session() {
                    self.update_progress(progress, host);
                }
                None
            }
            DragStep::Release {
                velocity,
                translation,
            } => self.end_interactive_transition_with_velocity(velocity, translation, host),
            DragStep::Cancel => self.end_interactive_transition(true, host),
            DragStep::Ignore => None,
        }
    }

    /// The user started dragging the tracked scroll view.
    pub fn scroll_will_begin_dragging(&mut self) {
        self.overscroll.will_begin_dragging();
    }

    /// A scroll callback from the tracked scroll view.
    ///
    /// On [`ScrollStep::Drive`] the sheet has taken the drag and the host
    /// must pin the content offset to `pinned_offset_y`.
    pub fn scroll_did_scroll<H: SheetHost + ?Sized>(
        &mut self,
        sample: &ScrollSample,
        host: &mut H,
    ) -> ScrollStep {
        if self.session.is_none() && !self.state.accepts_dismissal() {
            return self.overscroll.follow(sample);
        }
        let progress = self.session.as_ref().map(InteractiveSession::progress);
        let step = self.overscroll.did_scroll(sample, progress);
        if let ScrollStep::Drive {
            overlay_translation,
            ..
        } = step
        {
            self.begin_interactive_transition(InputSource::ScrollOverscroll, host);
            let height = host.presented_frame().map(|frame| frame.height());
            if let Some(progress) = height.and_then(|h| progress_for(overlay_translation, h)) {
                self.update_progress(progress, host);
            }
        }
        step
    }

    /// The user lifted the finger from the tracked scroll view.
    ///
    /// A drag that handed off to the sheet settles the session from the
    /// release values; a plain scroll cancels whatever session is open.
    pub fn scroll_will_end_dragging<H: SheetHost + ?Sized>(
        &mut self,
        sample: &ScrollSample,
        host: &mut H,
    ) -> Option<ClosedSession> {
        match self.overscroll.will_end_dragging(sample) {
            ScrollRelease::Settle {
                velocity,
                translation,
            } => self.end_interactive_transition_with_velocity(velocity, translation, host),
            ScrollRelease::Cancel => {
                if self.session.is_some() {
                    self.end_interactive_transition(true, host)
                } else {
                    None
                }
            }
        }
    }

    /// A tap landed on the backdrop. Dismisses a presented sheet and returns
    /// whether it did.
    pub fn handle_backdrop_tap(&mut self) -> bool {
        if self.state.accepts_dismissal() {
            self.dismissal_handler.perform_dismissal(true);
            true
        } else {
            log::debug!("backdrop tap ignored while {:?}", self.state);
            false
        }
    }
}
