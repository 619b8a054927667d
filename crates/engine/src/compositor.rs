//! Layer compositor module - priority-ordered stacking of renderables
//!
//! A [`LayerCompositor`] holds an ordered list of layers (with holes), one
//! world offset per layer, an output [`CharGrid`] and a contour grid recording
//! which layer supplies each visible cell.
//!
//! # Priority
//!
//! Index 0 is the top of the stack. [`LayerCompositor::update`] scans from the
//! top down and the first layer to render a cell keeps it.
//!
//! # Coordinate frames
//!
//! A layer's content is placed at three stacked offsets: its entry in the
//! offset list, its own character offset, and its own alpha offset. The
//! compositor's output alpha defines its footprint; only the overlap between
//! that footprint and each layer's alpha is visited.
//!
//! # Contour
//!
//! The contour grid has the output alpha's extent. `0` means no layer renders
//! the cell; otherwise the value is the supplying layer's index plus one.

use std::rc::Rc;

use log::{debug, trace, warn};

use crate::core::{CharGrid, GridError, LayerRef, MaskGrid, Renderable};
use crate::types::{Offset, Slot, BLANK_CHAR, DEFAULT_LAYER_CAPACITY};

/// Stack of layers flattened into one renderable grid
#[derive(Debug)]
pub struct LayerCompositor {
    output: CharGrid,
    layers: Vec<Slot<LayerRef>>,
    offsets: Vec<Offset>,
    contour: Vec<usize>,
}

impl LayerCompositor {
    /// Create an empty compositor with a `width` x `height` footprint
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_capacity(width, height, DEFAULT_LAYER_CAPACITY)
    }

    /// Create an empty compositor with room for `layers` layers
    pub fn with_capacity(width: usize, height: usize, layers: usize) -> Self {
        Self {
            output: CharGrid::filled(width, height, BLANK_CHAR, false),
            layers: Vec::with_capacity(layers),
            offsets: Vec::with_capacity(layers),
            contour: vec![0; width * height],
        }
    }

    /// Create a compositor stacking `layers` at zero offsets
    pub fn with_layers(width: usize, height: usize, layers: Vec<LayerRef>) -> Self {
        let mut comp = Self::with_capacity(width, height, layers.len());
        comp.add_layers(layers);
        comp
    }

    pub fn width(&self) -> usize {
        self.output.width()
    }

    pub fn height(&self) -> usize {
        self.output.height()
    }

    /// Move the output grid and its footprint together
    pub fn set_offset(&mut self, offset: Offset) {
        self.output.set_offset(offset);
        self.output.set_alpha_offset(offset);
    }

    pub fn output(&self) -> &CharGrid {
        &self.output
    }

    /// Rebuild the output and contour at a new footprint; layers are kept
    ///
    /// This is the only way to change the footprint, so the contour always
    /// matches the output alpha's extent.
    pub fn resize(&mut self, width: usize, height: usize) {
        debug!(
            "compositor resize {}x{} -> {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        let offset = self.output.offset();
        let alpha_offset = self.output.alpha_offset();
        self.output = CharGrid::filled(width, height, BLANK_CHAR, false);
        self.output.set_offset(offset);
        self.output.set_alpha_offset(alpha_offset);
        self.contour = vec![0; width * height];
    }

    // ---- layer list ----

    pub fn layers(&self) -> &[Slot<LayerRef>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Position of `layer` in the list, by handle identity
    pub fn index_of(&self, layer: &LayerRef) -> Option<usize> {
        self.layers
            .iter()
            .position(|slot| slot.filled().is_some_and(|l| Rc::ptr_eq(l, layer)))
    }

    fn position(&self, layer: &LayerRef) -> Result<usize, GridError> {
        self.index_of(layer).ok_or(GridError::LayerNotFound)
    }

    /// Append layers at zero offset
    pub fn add_layers<I>(&mut self, layers: I)
    where
        I: IntoIterator<Item = LayerRef>,
    {
        let slots: Vec<Slot<LayerRef>> = layers.into_iter().map(Slot::Filled).collect();
        self.insert_slots(self.layers.len(), slots);
    }

    /// Append one layer at `offset`
    pub fn add_layer_with_offset(&mut self, layer: LayerRef, offset: Offset) {
        let index = self.layers.len();
        self.insert_slots(index, vec![Slot::Filled(layer)]);
        self.trim_offsets_to(index);
        self.offsets.push(offset);
    }

    /// Append an empty slot
    pub fn add_empty_slot(&mut self) {
        self.insert_slots(self.layers.len(), vec![Slot::Empty]);
    }

    /// Insert layers so the first lands at `index`
    pub fn add_layers_at<I>(&mut self, index: usize, layers: I) -> Result<(), GridError>
    where
        I: IntoIterator<Item = LayerRef>,
    {
        if index > self.layers.len() {
            return Err(GridError::LayerIndexOutOfRange {
                index,
                len: self.layers.len(),
            });
        }
        let slots: Vec<Slot<LayerRef>> = layers.into_iter().map(Slot::Filled).collect();
        self.insert_slots(index, slots);
        Ok(())
    }

    /// Insert layers directly above `anchor`
    pub fn add_layers_before<I>(&mut self, anchor: &LayerRef, layers: I) -> Result<(), GridError>
    where
        I: IntoIterator<Item = LayerRef>,
    {
        let index = self.position(anchor)?;
        self.add_layers_at(index, layers)
    }

    /// Insert layers directly below `anchor`
    pub fn add_layers_after<I>(&mut self, anchor: &LayerRef, layers: I) -> Result<(), GridError>
    where
        I: IntoIterator<Item = LayerRef>,
    {
        let index = self.position(anchor)?;
        self.add_layers_at(index + 1, layers)
    }

    fn insert_slots(&mut self, index: usize, slots: Vec<Slot<LayerRef>>) {
        let count = slots.len();
        // A short offset list stays short; missing entries already read as zero.
        if index <= self.offsets.len() {
            self.offsets
                .splice(index..index, std::iter::repeat(Offset::ORIGIN).take(count));
        }
        self.layers.splice(index..index, slots);
        debug!("inserted {} slots at {}, {} layers", count, index, self.layers.len());
    }

    /// Put `replacement` in `layer`'s slot, keeping its offset
    pub fn replace_layer(&mut self, layer: &LayerRef, replacement: LayerRef) -> Result<(), GridError> {
        let index = self.position(layer)?;
        self.layers[index] = Slot::Filled(replacement);
        Ok(())
    }

    /// Vacate `layer`'s slot; the positions of other layers do not change
    pub fn remove_layer(&mut self, layer: &LayerRef) -> Result<(), GridError> {
        let index = self.position(layer)?;
        self.layers[index] = Slot::Empty;
        debug!("layer {} removed", index);
        Ok(())
    }

    /// Drop empty slots and their offsets; returns the change in length
    pub fn remove_empty_slots(&mut self) -> isize {
        let before = self.layers.len();
        let mut i = 0;
        while i < self.layers.len() {
            if self.layers[i].is_empty() {
                self.layers.remove(i);
                if i < self.offsets.len() {
                    self.offsets.remove(i);
                }
            } else {
                i += 1;
            }
        }
        self.layers.len() as isize - before as isize
    }

    /// Empty the layer and offset lists and zero the contour
    pub fn clear(&mut self) {
        self.layers.clear();
        self.offsets.clear();
        self.contour.fill(0);
        debug!("compositor cleared");
    }

    // ---- offsets ----

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Replace the offset list; it may be shorter or longer than the layer list
    pub fn set_offsets(&mut self, offsets: Vec<Offset>) {
        self.offsets = offsets;
    }

    fn offset_at(&self, index: usize) -> Offset {
        self.offsets.get(index).copied().unwrap_or(Offset::ORIGIN)
    }

    pub fn offset_of(&self, layer: &LayerRef) -> Result<Offset, GridError> {
        let index = self.position(layer)?;
        Ok(self.offset_at(index))
    }

    pub fn set_offset_of(&mut self, layer: &LayerRef, offset: Offset) -> Result<(), GridError> {
        let index = self.position(layer)?;
        if index >= self.offsets.len() {
            self.trim_offsets_to(index);
            self.offsets.push(offset);
        } else {
            self.offsets[index] = offset;
        }
        Ok(())
    }

    /// Match the offset list's length to the layer list; returns the change in length
    pub fn trim_offsets(&mut self) -> isize {
        self.trim_offsets_to(self.layers.len())
    }

    /// Truncate or zero-pad the offset list to `len`; returns the change in length
    pub fn trim_offsets_to(&mut self, len: usize) -> isize {
        let before = self.offsets.len();
        self.offsets.resize(len, Offset::ORIGIN);
        len as isize - before as isize
    }

    // ---- compositing ----

    /// Re-flatten every layer into the output grid and contour
    ///
    /// Layers are read as they are; nested compositors must be updated first.
    /// A layer that is already mutably borrowed is skipped.
    pub fn update(&mut self) -> Result<(), GridError> {
        self.contour.fill(0);
        self.output.fill(BLANK_CHAR);
        self.output.alpha_mut().fill(false);
        trace!("compositor update over {} layers", self.layers.len());

        for (z, slot) in self.layers.iter().enumerate() {
            let Some(handle) = slot.filled() else {
                continue;
            };
            let Ok(layer) = handle.try_borrow() else {
                warn!("layer {} is busy, skipped", z);
                continue;
            };
            let ext = self.offsets.get(z).copied().unwrap_or(Offset::ORIGIN);
            let grid = layer.grid();
            let overlap = MaskGrid::intersection_of(self.output.alpha(), grid.alpha(), ext);
            let (left, top) = (overlap.offset().x(), overlap.offset().y());
            let footprint = self.output.alpha_offset();

            for y in top..top + overlap.height() as i32 {
                for x in left..left + overlap.width() as i32 {
                    if self.output.alpha_at(x, y)? {
                        continue;
                    }
                    let (lx, ly) = (x - ext.x(), y - ext.y());
                    if !grid.alpha_at(lx, ly)? {
                        continue;
                    }
                    let ch = grid.get(lx, ly)?;
                    self.output.set(x, y, ch)?;
                    self.output.set_alpha_at(x, y, true)?;
                    let ax = (x - footprint.x()) as usize;
                    let ay = (y - footprint.y()) as usize;
                    self.contour[ay * self.output.alpha().width() + ax] = z + 1;
                }
            }
        }
        Ok(())
    }

    /// Per-cell supplying layer over the footprint: `0` for none, else index plus one
    pub fn contour_grid(&self) -> Vec<Vec<usize>> {
        let width = self.output.alpha().width();
        if width == 0 {
            return vec![Vec::new(); self.output.alpha().height()];
        }
        self.contour.chunks(width).map(<[usize]>::to_vec).collect()
    }

    /// Index of the layer supplying world cell `(x, y)`, if any
    pub fn top_layer_at(&self, x: i32, y: i32) -> Result<Option<usize>, GridError> {
        let alpha = self.output.alpha();
        if !alpha.is_within_bounds(x, y) {
            return Err(GridError::OutOfBounds { x, y });
        }
        let ax = (x - alpha.offset().x()) as usize;
        let ay = (y - alpha.offset().y()) as usize;
        Ok(self.contour[ay * alpha.width() + ax].checked_sub(1))
    }
}

impl Renderable for LayerCompositor {
    fn grid(&self) -> &CharGrid {
        &self.output
    }

    /// Forward the tick to every layer that is not already borrowed
    fn advance(&mut self) {
        for (z, slot) in self.layers.iter().enumerate() {
            let Some(handle) = slot.filled() else {
                continue;
            };
            match handle.try_borrow_mut() {
                Ok(mut layer) => layer.advance(),
                Err(_) => warn!("layer {} is busy, tick dropped", z),
            }
        }
    }
}
