//! Demo scene: a background, a spinner and a button stacked in one compositor.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};

use crate::core::{layer, CharGrid, GridError, LayerRef, MaskGrid};
use crate::engine::{
    deliver, ButtonRef, FrameSequencer, LayerCompositor, SelectAction, ThreeFrameButton, Tick,
    UseAction,
};
use crate::input::{ActionSet, InputData};
use crate::types::{MergeMode, Offset};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const BUTTON_BASE: &str = "[ ok ]";
const BUTTON_HOVER: &str = "[>ok<]";
const BUTTON_USE: &str = "[*ok*]";

/// Everything the demo host drives
#[derive(Debug)]
pub struct Scene {
    compositor: LayerCompositor,
    spinner: Rc<RefCell<FrameSequencer>>,
    button: ButtonRef,
    actions: ActionSet,
    uses: Rc<Cell<u32>>,
}

impl Scene {
    /// Build the scene for a `width` x `height` footprint
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let background = framed_background(width, height)?;

        let frames = SPINNER
            .iter()
            .map(|s| CharGrid::from_text(1, 1, s))
            .collect();
        let spinner = Rc::new(RefCell::new(FrameSequencer::from_frames(frames)));
        spinner.borrow_mut().animate()?;

        let uses = Rc::new(Cell::new(0));
        let counter = Rc::clone(&uses);
        let button = ThreeFrameButton::new(
            CharGrid::from_text(BUTTON_BASE.len(), 1, BUTTON_BASE),
            CharGrid::from_text(BUTTON_HOVER.len(), 1, BUTTON_HOVER),
            CharGrid::from_text(BUTTON_USE.len(), 1, BUTTON_USE),
        )
        .on_use(move || {
            counter.set(counter.get() + 1);
            info!("button used {} times", counter.get());
        })
        .into_shared();

        let mut compositor = LayerCompositor::new(width, height);
        compositor.add_layer_with_offset(Rc::clone(&button) as LayerRef, Offset::new(2, 3));
        compositor.add_layer_with_offset(Rc::clone(&spinner) as LayerRef, Offset::new(2, 1));
        compositor.add_layers([layer(background)]);

        let actions = ActionSet::new()
            .with(Box::new(SelectAction::new(&button)))
            .with(Box::new(UseAction::new(&button)));

        debug!("scene built with {} layers", compositor.len());
        Ok(Self {
            compositor,
            spinner,
            button,
            actions,
            uses,
        })
    }

    pub fn compositor(&self) -> &LayerCompositor {
        &self.compositor
    }

    pub fn uses(&self) -> u32 {
        self.uses.get()
    }

    pub fn is_button_selected(&self) -> bool {
        self.button.borrow().is_selected()
    }

    /// Route input to the bound actions; returns how many acted
    pub fn handle_input(&mut self, data: &InputData) -> usize {
        self.actions.dispatch(data)
    }

    /// Advance every layer by one tick and re-composite
    pub fn tick(&mut self, tick: Tick) -> Result<(), GridError> {
        deliver(&mut self.compositor, tick);
        let mut spinner = self.spinner.borrow_mut();
        if spinner.remaining() == 0 {
            spinner.animate()?;
        }
        drop(spinner);
        self.compositor.update()
    }

    /// Current frame with non-rendered cells blanked
    pub fn render(&self, delimiter: &str) -> String {
        self.compositor.output().dump_rendered(Some(delimiter))
    }
}

/// Dotted field with a one-cell transparent margin
fn framed_background(width: usize, height: usize) -> Result<CharGrid, GridError> {
    let mut alpha = MaskGrid::filled(width, height, false);
    if width > 2 && height > 2 {
        let mut inner = MaskGrid::filled(width - 2, height - 2, true);
        inner.set_offset(Offset::new(1, 1));
        alpha.merge(&inner, Offset::ORIGIN, MergeMode::Or);
    }
    let text = ".".repeat(width * height);
    CharGrid::from_text_with_alpha(width, height, Some(&text), Some(alpha))
}
