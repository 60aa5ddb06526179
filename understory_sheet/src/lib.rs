// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sheet --heading-base-level=0

//! Understory Sheet: a headless bottom sheet presentation engine.
//!
//! A bottom sheet slides up from the bottom edge of its container, sizes
//! itself to its content and can be dismissed by tapping the dimmed backdrop,
//! by dragging the sheet or its pull bar down, or by over-scrolling an
//! embedded scroll view past its top. This crate holds the state and the math
//! behind that behavior and leaves drawing and animation to the host:
//!
//! - [`frame`]: bottom-anchored, pixel-snapped sheet geometry and chrome layout
//! - [`drag`]: pan gesture samples to dismissal progress
//! - [`scroll`]: overscroll hand-off between a scroll view and the sheet
//! - [`decider`]: ballistic commit/cancel decision on release
//! - [`session`]: the single interactive dismissal session
//! - [`controller`]: the [`SheetController`] tying it all together
//! - [`transition`]: animation requests for the host's animator
//! - [`delegate`]: vending controllers and exposing the interactive session
//! - [`action`]: buttons that own their handlers
//!
//! ## Design
//!
//! - **Headless**: the controller never owns views. It reads geometry from a
//!   [`SheetHost`], writes frames and opacities back, and asks the host to run
//!   [`SheetAnimation`]s.
//! - **One session**: every input source feeds the same
//!   [`InteractiveSession`]. The first source opens it, whichever source ends
//!   first closes it, and closing consumes it.
//! - **Event serialized**: all entry points take `&mut self`; asynchronous
//!   completions come back as lifecycle calls.
//! - **Absorbing**: out-of-order platform callbacks are no-ops reported through
//!   outcome values and `log` diagnostics, never panics.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Insets, Rect, Size, Vec2};
//! use understory_sheet::drag::GestureSample;
//! use understory_sheet::frame::Container;
//! use understory_sheet::{
//!     Completion, InputSource, SheetAnimation, SheetConfig, SheetController, SheetHost,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     frame: Option<Rect>,
//!     shading: f64,
//!     animations: Vec<SheetAnimation>,
//! }
//!
//! impl SheetHost for Host {
//!     type ScrollView = ();
//!     fn container(&self) -> Option<Container> {
//!         Some(Container::new(Size::new(400.0, 800.0), Insets::ZERO))
//!     }
//!     fn preferred_content_height(&self) -> f64 { 400.0 }
//!     fn presented_frame(&self) -> Option<Rect> { self.frame }
//!     fn set_presented_frame(&mut self, frame: Rect) { self.frame = Some(frame); }
//!     fn set_pull_bar_origin_y(&mut self, _: f64) {}
//!     fn set_shading_alpha(&mut self, alpha: f64) { self.shading = alpha; }
//!     fn animate(&mut self, animation: SheetAnimation) { self.animations.push(animation); }
//!     fn begin_interactive_dismissal(&mut self) {}
//!     fn scroll_view(&self) -> Option<()> { None }
//!     fn subscribe_scroll(&mut self, _: ()) -> bool { true }
//!     fn unsubscribe_scroll(&mut self, _: ()) {}
//! }
//!
//! let mut host = Host::default();
//! let mut sheet: SheetController<_, ()> =
//!     SheetController::new(|_animated: bool| {}, SheetConfig::default());
//!
//! // Present.
//! sheet.presentation_will_begin();
//! host.frame = Some(sheet.frame_of_presented_view(&host));
//! sheet.presentation_did_end(true, &mut host);
//! assert_eq!(host.frame, Some(Rect::new(0.0, 400.0, 400.0, 800.0)));
//!
//! // Drag the sheet halfway down.
//! sheet.handle_drag(InputSource::SheetDrag, &GestureSample::began(), &mut host);
//! let half = GestureSample::changed(Vec2::new(0.0, 200.0), Vec2::ZERO);
//! sheet.handle_drag(InputSource::SheetDrag, &half, &mut host);
//! assert_eq!(host.shading, 0.5);
//!
//! // A slow release past the halfway mark commits the dismissal.
//! let release = GestureSample::ended(Vec2::new(0.0, 220.0), Vec2::new(0.0, 50.0));
//! let closed = sheet.handle_drag(InputSource::SheetDrag, &release, &mut host);
//! assert_eq!(closed.map(|c| c.completion), Some(Completion::Finish));
//! assert!(!sheet.is_interactive());
//! assert_eq!(host.animations.len(), 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo and Peniko against the standard library.
//! - `libm`: float math for `no_std` targets.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod action;
pub mod config;
pub mod controller;
pub mod decider;
pub mod delegate;
pub mod drag;
pub mod frame;
pub mod geometry;
pub mod host;
pub mod scroll;
pub mod session;
pub mod state;
pub mod transition;

pub use config::{DismissalPolicy, SheetConfig, SheetStyle};
pub use controller::{BeginOutcome, SheetController};
pub use geometry::PixelGrid;
pub use host::{DismissalHandler, SheetHost};
pub use session::{ClosedSession, Completion, InputSource, InteractiveSession};
pub use state::PresentationState;
pub use transition::{SheetAnimation, TransitionKind, TransitionPlan};
