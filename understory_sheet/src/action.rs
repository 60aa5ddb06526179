// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Buttons that own their event handlers.
//!
//! Sheet content commonly shows a row of action buttons. A [`ButtonAction`]
//! describes one, and a [`Button`] built from it keeps the handlers it
//! dispatches to, so handler lifetime is tied to the button itself.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use peniko::Color;
//! use understory_sheet::action::{Button, ButtonAction, ControlEvent};
//!
//! let height = Rc::new(Cell::new(200.0));
//! let h = height.clone();
//! let mut button = Button::from_action(ButtonAction::new(
//!     "x2",
//!     Color::from_rgba8(0, 122, 255, 255),
//!     move || h.set(h.get() * 2.0),
//! ));
//!
//! assert_eq!(button.send(ControlEvent::TouchUpInside), 1);
//! assert_eq!(height.get(), 400.0);
//! assert_eq!(button.send(ControlEvent::TouchDown), 0);
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use peniko::Color;
use smallvec::SmallVec;

/// Control events a button can dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// A touch went down inside the button.
    TouchDown,
    /// A touch lifted inside the button; the usual "tap".
    TouchUpInside,
    /// A touch lifted outside the button.
    TouchUpOutside,
    /// The platform cancelled the touch.
    TouchCancel,
}

type Handler = Box<dyn FnMut()>;

/// Title, background and tap handler for one button.
pub struct ButtonAction {
    /// Button label.
    pub title: String,
    /// Fill color.
    pub background: Color,
    handler: Handler,
}

impl ButtonAction {
    /// Describes a button that runs `handler` when tapped.
    pub fn new(
        title: impl Into<String>,
        background: Color,
        handler: impl FnMut() + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            background,
            handler: Box::new(handler),
        }
    }
}

impl fmt::Debug for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonAction")
            .field("title", &self.title)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

/// A button with owned per-event handlers.
pub struct Button {
    title: String,
    background: Color,
    handlers: SmallVec<[(ControlEvent, Handler); 1]>,
}

impl Button {
    /// Creates a button without handlers.
    pub fn new(title: impl Into<String>, background: Color) -> Self {
        Self {
            title: title.into(),
            background,
            handlers: SmallVec::new(),
        }
    }

    /// Creates a button from `action`, running its handler on
    /// [`ControlEvent::TouchUpInside`].
    #[must_use]
    pub fn from_action(action: ButtonAction) -> Self {
        let mut button = Self::new(action.title, action.background);
        button.handlers.push((ControlEvent::TouchUpInside, action.handler));
        button
    }

    /// Button label.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fill color.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Adds `handler` for `event`. Handlers for the same event run in the
    /// order they were added.
    pub fn add_event_handler(&mut self, event: ControlEvent, handler: impl FnMut() + 'static) {
        self.handlers.push((event, Box::new(handler)));
    }

    /// Number of handlers registered for `event`.
    #[must_use]
    pub fn handler_count(&self, event: ControlEvent) -> usize {
        self.handlers.iter().filter(|(e, _)| *e == event).count()
    }

    /// Dispatches `event` and returns how many handlers ran.
    pub fn send(&mut self, event: ControlEvent) -> usize {
        let mut ran = 0;
        for (_, handler) in self.handlers.iter_mut().filter(|(e, _)| *e == event) {
            handler();
            ran += 1;
        }
        ran
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("title", &self.title)
            .field("background", &self.background)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
