//! TUI character maps (workspace facade crate).
//!
//! This package exposes the `tui_charmap::{core,engine,input,types}` public API
//! while the implementation lives in dedicated crates under `crates/`, and adds
//! the demo host pieces used by the binary.

pub mod config;
pub mod demo;
pub mod host;

pub use tui_charmap_core as core;
pub use tui_charmap_engine as engine;
pub use tui_charmap_input as input;
pub use tui_charmap_types as types;
