//! Engine module - animation and composition on top of the grid algebra
//!
//! - [`sequencer`]: tick-driven frame playback ([`FrameSequencer`])
//! - [`compositor`]: priority-ordered layer stacking ([`LayerCompositor`])
//! - [`button`]: a three-frame interactive sequencer ([`ThreeFrameButton`])
//! - [`tick`]: the tick delivery contract ([`TickSink`])
//!
//! Every type here implements [`Renderable`](crate::core::Renderable), so
//! sequencers, buttons and compositors can all be layers of a compositor.

pub mod button;
pub mod compositor;
pub mod sequencer;
pub mod tick;

pub use tui_charmap_core as core;
pub use tui_charmap_input as input;
pub use tui_charmap_types as types;

pub use button::{ButtonRef, SelectAction, ThreeFrameButton, UseAction};
pub use compositor::LayerCompositor;
pub use sequencer::FrameSequencer;
pub use tick::{deliver, Tick, TickSink};
