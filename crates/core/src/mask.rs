//! Mask module - offset boolean grids
//!
//! A mask is a dense `width x height` grid of booleans stored row-major in a flat
//! buffer, anchored in world space by an [`Offset`].
//! Coordinates: local `(x, y)` ranges over `0..width` x `0..height`; world
//! coordinates subtract the offset first.
//!
//! Masks serve as the alpha channel of character grids and as the overlap
//! primitive of the compositor ([`MaskGrid::intersection_of`]).

use std::fmt;

use log::{debug, trace};

use crate::error::GridError;
use crate::storage::Cells;
use crate::types::{MergeMode, Offset};

/// Dense boolean grid with a world offset
///
/// Not `Clone`: use [`MaskGrid::adopt`] to share storage or
/// [`MaskGrid::copy_from`] / [`MaskGrid::duplicate`] to copy it.
#[derive(Debug)]
pub struct MaskGrid {
    width: usize,
    height: usize,
    offset: Offset,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Cells<bool>,
}

impl MaskGrid {
    /// Create an empty 0x0 mask at the origin
    pub fn new() -> Self {
        Self::filled(0, 0, false)
    }

    /// Create a mask with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: bool) -> Self {
        Self {
            width,
            height,
            offset: Offset::ORIGIN,
            cells: Cells::filled(width * height, value),
        }
    }

    /// Create a mask whose first `length` cells (row-major) are set
    ///
    /// Whole rows fill first, then `length % width` cells of the next row.
    /// A negative length gives an all-false mask and a length of at least the
    /// area gives an all-true mask.
    pub fn with_density(width: usize, height: usize, length: i64) -> Self {
        let area = width * height;
        if length <= 0 {
            return Self::filled(width, height, false);
        }
        let length = length as usize;
        if length >= area {
            return Self::filled(width, height, true);
        }

        let mut cells = vec![false; area];
        cells[..length].fill(true);
        Self::from_cells(width, height, cells)
    }

    /// Parse a mask from a row-major string of `'0'` and `'1'`
    ///
    /// Characters past `width * height` are ignored.
    pub fn from_bits(width: usize, height: usize, bits: &str) -> Result<Self, GridError> {
        let area = width * height;
        let mut cells = Vec::with_capacity(area);
        for (position, ch) in bits.chars().take(area).enumerate() {
            match ch {
                '0' => cells.push(false),
                '1' => cells.push(true),
                _ => return Err(GridError::InvalidMaskChar { ch, position }),
            }
        }
        if cells.len() < area {
            return Err(GridError::SourceTooShort {
                expected: area,
                found: cells.len(),
            });
        }
        Ok(Self::from_cells(width, height, cells))
    }

    /// Build a mask from rows; every row must have the length of the first
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, cols) in rows.iter().enumerate() {
            if cols.len() != width {
                return Err(GridError::NonUniformRows {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend_from_slice(cols);
        }
        Ok(Self::from_cells(width, rows.len(), cells))
    }

    fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        Self {
            width,
            height,
            offset: Offset::ORIGIN,
            cells: Cells::from_vec(cells),
        }
    }

    // ---- replacement ----

    /// Share `source`'s storage
    ///
    /// Later cell writes through either grid are visible through both until one
    /// of them is resized.
    pub fn adopt(&mut self, source: &MaskGrid) {
        self.width = source.width;
        self.height = source.height;
        self.offset = source.offset;
        self.cells = source.cells.alias();
    }

    /// Copy `source`'s dimensions, offset and cells into independent storage
    pub fn copy_from(&mut self, source: &MaskGrid) {
        self.width = source.width;
        self.height = source.height;
        self.offset = source.offset;
        self.cells = source.cells.duplicate();
    }

    /// Independent copy of this mask
    pub fn duplicate(&self) -> MaskGrid {
        let mut out = MaskGrid::new();
        out.copy_from(self);
        out
    }

    /// Whether both masks currently alias the same storage
    pub fn shares_storage_with(&self, other: &MaskGrid) -> bool {
        self.cells.ptr_eq(&other.cells)
    }

    // ---- dimensions and offset ----

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Offset) {
        self.offset = offset;
    }

    /// Calculate flat index from local coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    /// Local bounds check, independent of the offset
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// World bounds check (offset applied)
    pub fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        self.is_in_bounds(x - self.offset.x(), y - self.offset.y())
    }

    // ---- cell access ----

    /// Get the cell at world coordinates
    pub fn get(&self, x: i32, y: i32) -> Result<bool, GridError> {
        self.get_local(x - self.offset.x(), y - self.offset.y())
    }

    /// Set the cell at world coordinates
    pub fn set(&mut self, x: i32, y: i32, value: bool) -> Result<(), GridError> {
        self.set_local(x - self.offset.x(), y - self.offset.y(), value)
    }

    /// Invert the cell at world coordinates
    pub fn invert_at(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        self.invert_local(x - self.offset.x(), y - self.offset.y())
    }

    /// Get the cell at local coordinates
    pub fn get_local(&self, x: i32, y: i32) -> Result<bool, GridError> {
        let idx = self.index(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        Ok(self.cells.get(idx))
    }

    /// Set the cell at local coordinates
    pub fn set_local(&mut self, x: i32, y: i32, value: bool) -> Result<(), GridError> {
        let idx = self.index(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        self.cells.set(idx, value);
        Ok(())
    }

    /// Invert the cell at local coordinates
    pub fn invert_local(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let idx = self.index(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        self.cells.set(idx, !self.cells.get(idx));
        Ok(())
    }

    pub fn fill(&mut self, value: bool) {
        self.cells.fill(value);
    }

    /// Invert every cell
    pub fn invert(&mut self) {
        self.cells.update_all(|b| !b);
    }

    /// Number of set cells
    pub fn true_count(&self) -> usize {
        self.cells.with(|cells| cells.iter().filter(|&&b| b).count())
    }

    /// Fraction of set cells, in `[0, 1]`; an empty mask reports `0.0`
    pub fn area_coefficient(&self) -> f64 {
        let area = self.area();
        if area == 0 {
            return 0.0;
        }
        self.true_count() as f64 / area as f64
    }

    /// Copy of the cells as rows
    pub fn rows(&self) -> Vec<Vec<bool>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.cells
            .with(|cells| cells.chunks(self.width).map(<[bool]>::to_vec).collect())
    }

    // ---- capacity ----

    /// Rebuild with a new width; see [`MaskGrid::set_capacity`]
    pub fn set_width(&mut self, width: usize, shift_x: i32, pad: bool) {
        self.set_capacity(width, self.height, Offset::new(shift_x, 0), pad);
    }

    /// Rebuild with a new height; see [`MaskGrid::set_capacity`]
    pub fn set_height(&mut self, height: usize, shift_y: i32, pad: bool) {
        self.set_capacity(self.width, height, Offset::new(0, shift_y), pad);
    }

    /// Rebuild storage at a new size
    ///
    /// Old cell `(x, y)` lands at `(x + shift.x, y + shift.y)`; only the region
    /// that overlaps the new extent is copied. Newly exposed cells are set to
    /// `pad`. The grid gets fresh storage, so any aliasing ends here.
    pub fn set_capacity(&mut self, width: usize, height: usize, shift: Offset, pad: bool) {
        debug!(
            "mask resize {}x{} -> {}x{} shift {} pad {}",
            self.width, self.height, width, height, shift, pad
        );
        let mut next = vec![pad; width * height];
        self.cells.with(|old| {
            for y in 0..height {
                let sy = y as i32 - shift.y();
                if sy < 0 || sy as usize >= self.height {
                    continue;
                }
                for x in 0..width {
                    let sx = x as i32 - shift.x();
                    if sx < 0 || sx as usize >= self.width {
                        continue;
                    }
                    next[y * width + x] = old[(sy as usize) * self.width + sx as usize];
                }
            }
        });
        self.width = width;
        self.height = height;
        self.cells = Cells::from_vec(next);
    }

    // ---- algebra ----

    /// World-space overlap of `a` and `b`, with `b` positioned at `relative` to `a`
    ///
    /// Returns a false-filled mask whose offset is the top-left corner of the
    /// overlap; width and height are zero when the two do not overlap.
    pub fn intersection_of(a: &MaskGrid, b: &MaskGrid, relative: Offset) -> MaskGrid {
        let b_origin = relative + b.offset;
        let left = a.offset.x().max(b_origin.x());
        let top = a.offset.y().max(b_origin.y());
        let right = (a.offset.x() + a.width as i32).min(b_origin.x() + b.width as i32);
        let bottom = (a.offset.y() + a.height as i32).min(b_origin.y() + b.height as i32);

        let width = (right - left).max(0) as usize;
        let height = (bottom - top).max(0) as usize;
        let mut out = MaskGrid::filled(width, height, false);
        out.offset = Offset::new(left, top);
        out
    }

    /// Combine `other` into this mask in place
    ///
    /// `other` is positioned at `relative` to this mask's world frame. Cells that
    /// `other` does not cover resolve per [`MergeMode::apply_uncovered`].
    pub fn merge(&mut self, other: &MaskGrid, relative: Offset, mode: MergeMode) {
        trace!("mask merge {} at {}", mode.as_str(), relative);
        // Snapshot first: `other` may alias this grid's storage.
        let theirs = other.cells.snapshot();
        let base = self.offset - relative - other.offset;
        let width = self.width;
        self.cells.with_mut(|cells| {
            for (idx, cell) in cells.iter_mut().enumerate() {
                let ox = base.x() + (idx % width) as i32;
                let oy = base.y() + (idx / width) as i32;
                let next = match other.index(ox, oy) {
                    Some(i) => Some(mode.apply(*cell, theirs[i])),
                    None => mode.apply_uncovered(*cell),
                };
                if let Some(value) = next {
                    *cell = value;
                }
            }
        });
    }

    /// [`MaskGrid::merge`] with the mode given as its truth-table byte
    pub fn merge_bits(
        &mut self,
        other: &MaskGrid,
        relative: Offset,
        bits: u8,
    ) -> Result<(), GridError> {
        let mode = MergeMode::from_bits(bits).ok_or(GridError::UnknownMergeMode(bits))?;
        self.merge(other, relative, mode);
        Ok(())
    }

    /// Shift the content by `(dx, dy)` inside the current capacity
    ///
    /// Cells shifted in from outside the grid are cleared.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        let old = self.cells.snapshot();
        let (width, height) = (self.width as i32, self.height as i32);
        self.cells.with_mut(|cells| {
            for (idx, cell) in cells.iter_mut().enumerate() {
                let sx = (idx % self.width) as i32 - dx;
                let sy = (idx / self.width) as i32 - dy;
                *cell = sx >= 0
                    && sx < width
                    && sy >= 0
                    && sy < height
                    && old[(sy * width + sx) as usize];
            }
        });
    }

    /// Flatten to `'0'`/`'1'`, optionally separating rows with `row_delimiter`
    pub fn to_bit_string(&self, row_delimiter: Option<&str>) -> String {
        let mut out = String::with_capacity(self.area() + self.height);
        self.cells.with(|cells| {
            for (y, row) in cells.chunks(self.width.max(1)).enumerate() {
                if y > 0 {
                    if let Some(delim) = row_delimiter {
                        out.push_str(delim);
                    }
                }
                out.extend(row.iter().map(|&b| if b { '1' } else { '0' }));
            }
        });
        out
    }
}

impl Default for MaskGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MaskGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string(Some("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_index_calculation() {
        let mask = MaskGrid::filled(4, 3, false);
        assert_eq!(mask.index(0, 0), Some(0));
        assert_eq!(mask.index(3, 0), Some(3));
        assert_eq!(mask.index(0, 1), Some(4));
        assert_eq!(mask.index(3, 2), Some(11));
        assert_eq!(mask.index(-1, 0), None);
        assert_eq!(mask.index(4, 0), None);
        assert_eq!(mask.index(0, 3), None);
    }

    #[test]
    fn test_density_row_major_layout() {
        let mask = MaskGrid::with_density(4, 3, 6);
        assert_eq!(mask.to_bit_string(Some("|")), "1111|1100|0000");
        assert_eq!(mask.true_count(), 6);
    }

    #[test]
    fn test_density_clamps() {
        assert_eq!(MaskGrid::with_density(3, 3, -4).true_count(), 0);
        assert_eq!(MaskGrid::with_density(3, 3, 0).true_count(), 0);
        assert_eq!(MaskGrid::with_density(3, 3, 9).true_count(), 9);
        assert_eq!(MaskGrid::with_density(3, 3, 100).true_count(), 9);
    }

    #[test]
    fn test_from_bits_rejects_other_chars() {
        let err = MaskGrid::from_bits(2, 2, "01x1").unwrap_err();
        assert_eq!(err, GridError::InvalidMaskChar { ch: 'x', position: 2 });

        let err = MaskGrid::from_bits(2, 2, "011").unwrap_err();
        assert_eq!(err, GridError::SourceTooShort { expected: 4, found: 3 });
    }

    #[test]
    fn test_set_capacity_shift_and_pad() {
        let mut mask = MaskGrid::from_bits(2, 2, "1001").unwrap();
        mask.set_capacity(3, 3, Offset::new(1, 1), false);
        assert_eq!(mask.to_bit_string(Some("|")), "000|010|001");

        let mut mask = MaskGrid::from_bits(2, 2, "1001").unwrap();
        mask.set_capacity(3, 2, Offset::new(1, 0), true);
        assert_eq!(mask.to_bit_string(Some("|")), "110|101");
    }

    #[test]
    fn test_resize_detaches_alias() {
        let source = MaskGrid::filled(2, 2, false);
        let mut shared = MaskGrid::new();
        shared.adopt(&source);
        assert!(shared.shares_storage_with(&source));

        shared.set_width(3, 0, true);
        assert!(!shared.shares_storage_with(&source));
        assert_eq!(source.width(), 2);
    }

    #[test]
    fn test_translate_clears_exposed_cells() {
        let mut mask = MaskGrid::from_bits(3, 2, "110011").unwrap();
        mask.translate(1, 0);
        assert_eq!(mask.to_bit_string(Some("|")), "011|001");
        mask.translate(0, -1);
        assert_eq!(mask.to_bit_string(Some("|")), "001|000");
    }

    #[test]
    fn test_merge_with_aliased_storage() {
        let mut a = MaskGrid::from_bits(2, 2, "1010").unwrap();
        let mut b = MaskGrid::new();
        b.adopt(&a);
        a.merge(&b, Offset::ORIGIN, MergeMode::Xor);
        assert_eq!(a.true_count(), 0);
    }
}
