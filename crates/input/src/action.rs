//! Bound action handlers and dispatch.
//!
//! The dispatcher never interprets input. Each handler declares the
//! [`InputKind`] it listens to, reports whether it is currently available, and
//! performs its own side effect when acted on.

use std::fmt;

use log::trace;

use crate::types::{InputKind, Offset};

/// One input event as delivered to handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputData {
    pub kind: InputKind,
    /// World position of a pointer event, if any
    pub position: Option<Offset>,
}

impl InputData {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            position: None,
        }
    }

    pub fn at(kind: InputKind, position: Offset) -> Self {
        Self {
            kind,
            position: Some(position),
        }
    }
}

/// A handler bound to one input kind
pub trait InputAction: fmt::Debug {
    fn kind(&self) -> InputKind;

    fn name(&self) -> &str;

    /// Whether the handler currently accepts input
    fn is_available(&self) -> bool;

    fn act(&mut self, data: &InputData);
}

/// Ordered set of bound handlers
#[derive(Debug, Default)]
pub struct ActionSet {
    actions: Vec<Box<dyn InputAction>>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, action: Box<dyn InputAction>) {
        self.actions.push(action);
    }

    /// Builder form of [`ActionSet::bind`]
    pub fn with(mut self, action: Box<dyn InputAction>) -> Self {
        self.bind(action);
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Whether any handler bound to `kind` is available
    pub fn is_available(&self, kind: InputKind) -> bool {
        self.actions
            .iter()
            .any(|a| a.kind() == kind && a.is_available())
    }

    /// Deliver `data` to every available handler bound to its kind, in bind order
    ///
    /// Returns the number of handlers that acted.
    pub fn dispatch(&mut self, data: &InputData) -> usize {
        let mut acted = 0;
        for action in self.actions.iter_mut() {
            if action.kind() != data.kind {
                continue;
            }
            if !action.is_available() {
                trace!("skip unavailable action {}", action.name());
                continue;
            }
            trace!("dispatch {} to {}", data.kind.as_str(), action.name());
            action.act(data);
            acted += 1;
        }
        acted
    }
}
