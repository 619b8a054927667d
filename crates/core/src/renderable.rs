//! The renderable capability shared by grids, sequencers and compositors.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::char_grid::CharGrid;

/// Anything that exposes a character grid to hosts and compositors
pub trait Renderable: fmt::Debug {
    /// The grid currently visible
    fn grid(&self) -> &CharGrid;

    /// Consume one external tick; static content ignores it
    fn advance(&mut self) {}
}

/// Shared handle to a layer; layer identity is pointer identity of the handle
pub type LayerRef = Rc<RefCell<dyn Renderable>>;

/// Wrap a renderable into a [`LayerRef`]
pub fn layer<R: Renderable + 'static>(renderable: R) -> LayerRef {
    Rc::new(RefCell::new(renderable))
}

impl Renderable for CharGrid {
    fn grid(&self) -> &CharGrid {
        self
    }
}
