// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transitioning delegate: hands out sheet controllers and answers which
//! interactive session drives a dismissal.
//!
//! The delegate never owns the controller it creates. It remembers a key and
//! resolves it through a [`ControllerLookup`] when asked, so a controller that
//! has been dropped simply resolves to nothing.
//!
//! ```
//! use understory_sheet::config::SheetConfig;
//! use understory_sheet::controller::SheetController;
//! use understory_sheet::delegate::{ControllerLookup, TransitioningDelegate};
//!
//! struct Screen {
//!     sheet: Option<SheetController<fn(bool)>>,
//! }
//!
//! impl ControllerLookup<&'static str, fn(bool)> for Screen {
//!     fn controller(&self, key: &&'static str) -> Option<&SheetController<fn(bool)>> {
//!         if *key == "settings" { self.sheet.as_ref() } else { None }
//!     }
//! }
//!
//! fn dismiss(_animated: bool) {}
//!
//! let mut delegate = TransitioningDelegate::new(SheetConfig::default());
//! let sheet = delegate.presentation_controller("settings", dismiss as fn(bool));
//! let screen = Screen { sheet: Some(sheet) };
//!
//! // Not interactive until a gesture opens a session.
//! assert!(delegate.interaction_controller_for_dismissal(&screen).is_none());
//! ```

use core::fmt::Debug;

use crate::config::SheetConfig;
use crate::controller::SheetController;
use crate::host::DismissalHandler;
use crate::session::InteractiveSession;

/// Resolves a key remembered by a [`TransitioningDelegate`] to a live
/// controller.
pub trait ControllerLookup<K, D, S = u32> {
    /// The controller registered for `key`, if it still exists.
    fn controller(&self, key: &K) -> Option<&SheetController<D, S>>;
}

/// Vends a [`SheetController`] for each presentation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitioningDelegate<K> {
    config: SheetConfig,
    presented: Option<K>,
}

impl<K: Clone + PartialEq> TransitioningDelegate<K> {
    /// Creates a delegate whose controllers use `config`.
    #[must_use]
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            presented: None,
        }
    }

    /// Creates the controller for content presented under `key`.
    ///
    /// The caller owns the result and keeps it reachable through its
    /// [`ControllerLookup`]. A later call replaces the remembered key.
    pub fn presentation_controller<D, S>(
        &mut self,
        key: K,
        dismissal_handler: D,
    ) -> SheetController<D, S>
    where
        D: DismissalHandler,
        S: Copy + Eq + Debug,
    {
        self.presented = Some(key);
        SheetController::new(dismissal_handler, self.config)
    }

    /// Key of the most recently presented content.
    #[must_use]
    pub fn presented_key(&self) -> Option<&K> {
        self.presented.as_ref()
    }

    /// The session driving the current dismissal, or `None` for a
    /// non-interactive dismissal (or a controller that no longer exists).
    #[must_use]
    pub fn interaction_controller_for_dismissal<'a, L, D, S>(
        &self,
        lookup: &'a L,
    ) -> Option<&'a InteractiveSession>
    where
        L: ControllerLookup<K, D, S> + ?Sized,
        D: DismissalHandler + 'a,
        S: Copy + Eq + Debug + 'a,
    {
        let key = self.presented.as_ref()?;
        lookup.controller(key)?.session()
    }

    /// Forgets `key` if it is the remembered one. Returns whether it was.
    pub fn forget(&mut self, key: &K) -> bool {
        if self.presented.as_ref() == Some(key) {
            self.presented = None;
            true
        } else {
            false
        }
    }
}
