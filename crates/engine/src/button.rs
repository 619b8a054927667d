//! Three-frame button - base, hover and use frames driven by input actions
//!
//! The button is a [`FrameSequencer`] over exactly three frames plus a
//! selected flag and a use callback. Two input actions drive it:
//!
//! | Action         | Kind     | Available      | Effect                          |
//! |----------------|----------|----------------|---------------------------------|
//! | [`SelectAction`] | `Select` | always         | toggle selection (hover / base) |
//! | [`UseAction`]    | `Use`    | while selected | play use then hover, run callback |

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, warn};

use crate::core::{CharGrid, GridError, Renderable};
use crate::input::{InputAction, InputData};
use crate::sequencer::FrameSequencer;
use crate::types::{InputKind, BUTTON_BASE_FRAME, BUTTON_HOVER_FRAME, BUTTON_USE_FRAME};

/// Shared handle used by the button's input actions
pub type ButtonRef = Rc<RefCell<ThreeFrameButton>>;

pub struct ThreeFrameButton {
    frames: FrameSequencer,
    selected: bool,
    on_use: Option<Box<dyn FnMut()>>,
}

impl ThreeFrameButton {
    /// Create a button showing `base` after the first tick
    pub fn new(base: CharGrid, hover: CharGrid, used: CharGrid) -> Self {
        Self {
            frames: FrameSequencer::from_frames(vec![base, hover, used]),
            selected: false,
            on_use: None,
        }
    }

    /// Set the callback run on each use
    pub fn on_use(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_use = Some(Box::new(callback));
        self
    }

    pub fn into_shared(self) -> ButtonRef {
        Rc::new(RefCell::new(self))
    }

    pub fn sequencer(&self) -> &FrameSequencer {
        &self.frames
    }

    pub fn sequencer_mut(&mut self) -> &mut FrameSequencer {
        &mut self.frames
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Select or deselect, queueing the hover or base frame
    pub fn set_selected(&mut self, selected: bool) -> Result<(), GridError> {
        self.selected = selected;
        let frame = if selected {
            BUTTON_HOVER_FRAME
        } else {
            BUTTON_BASE_FRAME
        };
        self.frames.queue_frame(frame as i32)
    }

    /// Play the use frame then return to hover, and run the callback
    ///
    /// Does nothing unless selected.
    pub fn activate(&mut self) -> Result<(), GridError> {
        if !self.selected {
            return Ok(());
        }
        self.frames
            .queue_sequence(&[BUTTON_USE_FRAME as i32, BUTTON_HOVER_FRAME as i32])?;
        if let Some(callback) = self.on_use.as_mut() {
            callback();
        }
        debug!("button used");
        Ok(())
    }
}

impl fmt::Debug for ThreeFrameButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreeFrameButton")
            .field("frames", &self.frames)
            .field("selected", &self.selected)
            .field("on_use", &self.on_use.is_some())
            .finish()
    }
}

impl Renderable for ThreeFrameButton {
    fn grid(&self) -> &CharGrid {
        self.frames.grid()
    }

    fn advance(&mut self) {
        self.frames.advance();
    }
}

/// Toggles a button's selection
#[derive(Debug)]
pub struct SelectAction {
    button: ButtonRef,
}

impl SelectAction {
    pub fn new(button: &ButtonRef) -> Self {
        Self {
            button: Rc::clone(button),
        }
    }
}

impl InputAction for SelectAction {
    fn kind(&self) -> InputKind {
        InputKind::Select
    }

    fn name(&self) -> &str {
        "Select"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn act(&mut self, _data: &InputData) {
        let Ok(mut button) = self.button.try_borrow_mut() else {
            warn!("button busy, select dropped");
            return;
        };
        let selected = !button.is_selected();
        if let Err(err) = button.set_selected(selected) {
            warn!("button select failed: {}", err);
        }
    }
}

/// Activates a selected button
#[derive(Debug)]
pub struct UseAction {
    button: ButtonRef,
}

impl UseAction {
    pub fn new(button: &ButtonRef) -> Self {
        Self {
            button: Rc::clone(button),
        }
    }
}

impl InputAction for UseAction {
    fn kind(&self) -> InputKind {
        InputKind::Use
    }

    fn name(&self) -> &str {
        "Use"
    }

    fn is_available(&self) -> bool {
        self.button
            .try_borrow()
            .map(|b| b.is_selected())
            .unwrap_or(false)
    }

    fn act(&mut self, _data: &InputData) {
        let Ok(mut button) = self.button.try_borrow_mut() else {
            warn!("button busy, use dropped");
            return;
        };
        if let Err(err) = button.activate() {
            warn!("button use failed: {}", err);
        }
    }
}
