//! Input dispatch module (engine-facing).
//!
//! This module is intentionally independent of any grid type. It maps
//! `crossterm` key and mouse events into [`InputData`] and delivers them to an
//! ordered [`ActionSet`] of bound handlers. Handlers decide for themselves
//! whether they are available and what acting means.

pub mod action;
pub mod map;

pub use tui_charmap_types as types;

pub use action::{ActionSet, InputAction, InputData};
pub use map::{map_key_event, map_mouse_event, should_quit};
