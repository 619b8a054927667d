//! Character grid module - characters plus an alpha mask
//!
//! A [`CharGrid`] pairs a dense row-major character buffer with an owned
//! [`MaskGrid`] used as its alpha channel. Character storage and alpha each carry
//! their own [`Offset`], so reading a world cell resolves two coordinate frames:
//!
//! 1. world → alpha-local (subtract the alpha offset) decides whether the cell is
//!    rendered at all
//! 2. world → char-local (subtract the grid offset) picks the character
//!
//! "Not rendered" (alpha false) and "out of bounds" (outside either extent) are
//! distinct failures.

use std::fmt;

use log::debug;

use crate::error::GridError;
use crate::mask::MaskGrid;
use crate::storage::Cells;
use crate::types::{Offset, BLANK_CHAR};

/// Character grid with an independently offset alpha mask
///
/// Not `Clone`: use [`CharGrid::adopt`] to share storage or
/// [`CharGrid::copy_from`] / [`CharGrid::duplicate`] to copy it.
#[derive(Debug)]
pub struct CharGrid {
    width: usize,
    height: usize,
    offset: Offset,
    cells: Cells<char>,
    alpha: MaskGrid,
}

impl CharGrid {
    /// Create an empty 0x0 grid
    pub fn new() -> Self {
        Self::filled(0, 0, BLANK_CHAR, false)
    }

    /// Create a grid of `ch` whose alpha is uniformly `opaque`
    pub fn filled(width: usize, height: usize, ch: char, opaque: bool) -> Self {
        Self {
            width,
            height,
            offset: Offset::ORIGIN,
            cells: Cells::filled(width * height, ch),
            alpha: MaskGrid::filled(width, height, opaque),
        }
    }

    /// Create a fully opaque grid from row-major text
    ///
    /// Missing characters are padded with [`BLANK_CHAR`]; extra ones are ignored.
    pub fn from_text(width: usize, height: usize, text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self::with_cells(width, height, &chars, MaskGrid::filled(width, height, true))
    }

    /// Create a grid from row-major text and an explicit alpha mask
    ///
    /// Both arguments are required.
    pub fn from_text_with_alpha(
        width: usize,
        height: usize,
        text: Option<&str>,
        alpha: Option<MaskGrid>,
    ) -> Result<Self, GridError> {
        let text = text.ok_or(GridError::MissingArgument("text"))?;
        let chars: Vec<char> = text.chars().collect();
        Self::from_chars(width, height, &chars, alpha)
    }

    /// Create a grid from a row-major character buffer and an explicit alpha mask
    pub fn from_chars(
        width: usize,
        height: usize,
        chars: &[char],
        alpha: Option<MaskGrid>,
    ) -> Result<Self, GridError> {
        let alpha = alpha.ok_or(GridError::MissingArgument("alpha"))?;
        Ok(Self::with_cells(width, height, chars, alpha))
    }

    /// Build a fully opaque grid from rows; every row must have the length of the first
    pub fn from_rows(rows: &[Vec<char>]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut chars = Vec::with_capacity(width * rows.len());
        for (row, cols) in rows.iter().enumerate() {
            if cols.len() != width {
                return Err(GridError::NonUniformRows {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            chars.extend_from_slice(cols);
        }
        let height = rows.len();
        Ok(Self::with_cells(width, height, &chars, MaskGrid::filled(width, height, true)))
    }

    fn with_cells(width: usize, height: usize, chars: &[char], alpha: MaskGrid) -> Self {
        let area = width * height;
        let mut cells: Vec<char> = chars.iter().copied().take(area).collect();
        cells.resize(area, BLANK_CHAR);
        Self {
            width,
            height,
            offset: Offset::ORIGIN,
            cells: Cells::from_vec(cells),
            alpha,
        }
    }

    // ---- replacement ----

    /// Share `source`'s character and alpha storage
    pub fn adopt(&mut self, source: &CharGrid) {
        self.width = source.width;
        self.height = source.height;
        self.offset = source.offset;
        self.cells = source.cells.alias();
        self.alpha.adopt(&source.alpha);
    }

    /// Copy `source`'s characters and alpha into independent storage
    pub fn copy_from(&mut self, source: &CharGrid) {
        self.width = source.width;
        self.height = source.height;
        self.offset = source.offset;
        self.cells = source.cells.duplicate();
        self.alpha.copy_from(&source.alpha);
    }

    /// Independent copy of this grid
    pub fn duplicate(&self) -> CharGrid {
        let mut out = CharGrid::new();
        out.copy_from(self);
        out
    }

    /// Whether both grids alias the same character storage
    pub fn shares_storage_with(&self, other: &CharGrid) -> bool {
        self.cells.ptr_eq(&other.cells)
    }

    // ---- dimensions and offsets ----

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Offset of the character storage
    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Offset) {
        self.offset = offset;
    }

    pub fn alpha(&self) -> &MaskGrid {
        &self.alpha
    }

    pub fn alpha_mut(&mut self) -> &mut MaskGrid {
        &mut self.alpha
    }

    /// Replace the alpha mask, keeping the character storage
    pub fn set_alpha(&mut self, alpha: MaskGrid) {
        self.alpha = alpha;
    }

    /// Offset of the alpha mask, independent of [`CharGrid::offset`]
    pub fn alpha_offset(&self) -> Offset {
        self.alpha.offset()
    }

    pub fn set_alpha_offset(&mut self, offset: Offset) {
        self.alpha.set_offset(offset);
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    /// Local bounds check of the character storage
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// World bounds check of the character storage
    pub fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        self.is_in_bounds(x - self.offset.x(), y - self.offset.y())
    }

    /// World bounds check of the alpha mask
    pub fn is_within_alpha_bounds(&self, x: i32, y: i32) -> bool {
        self.alpha.is_within_bounds(x, y)
    }

    // ---- cell access ----

    /// Read the visible character at world coordinates
    ///
    /// Fails with [`GridError::NotRendered`] where the alpha is false and with
    /// [`GridError::OutOfBounds`] where either the alpha or the character storage
    /// does not reach.
    pub fn get(&self, x: i32, y: i32) -> Result<char, GridError> {
        if !self.alpha.get(x, y)? {
            return Err(GridError::NotRendered { x, y });
        }
        self.get_local(x - self.offset.x(), y - self.offset.y())
    }

    /// Read the stored character at local coordinates, ignoring alpha
    pub fn get_local(&self, x: i32, y: i32) -> Result<char, GridError> {
        let idx = self.index(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        Ok(self.cells.get(idx))
    }

    /// Write a character at world coordinates, leaving alpha untouched
    pub fn set(&mut self, x: i32, y: i32, ch: char) -> Result<(), GridError> {
        self.set_local(x - self.offset.x(), y - self.offset.y(), ch)
    }

    pub fn set_local(&mut self, x: i32, y: i32, ch: char) -> Result<(), GridError> {
        let idx = self.index(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        self.cells.set(idx, ch);
        Ok(())
    }

    pub fn alpha_at(&self, x: i32, y: i32) -> Result<bool, GridError> {
        self.alpha.get(x, y)
    }

    pub fn set_alpha_at(&mut self, x: i32, y: i32, opaque: bool) -> Result<(), GridError> {
        self.alpha.set(x, y, opaque)
    }

    pub fn invert_alpha_at(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        self.alpha.invert_at(x, y)
    }

    pub fn fill(&mut self, ch: char) {
        self.cells.fill(ch);
    }

    /// Copy of the characters as rows
    pub fn rows(&self) -> Vec<Vec<char>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.cells
            .with(|cells| cells.chunks(self.width).map(<[char]>::to_vec).collect())
    }

    // ---- capacity ----

    /// Rebuild with a new width; see [`CharGrid::set_capacity`]
    pub fn set_width(&mut self, width: usize, shift_x: i32, pad: char) {
        self.set_capacity(width, self.height, Offset::new(shift_x, 0), pad);
    }

    /// Rebuild with a new height; see [`CharGrid::set_capacity`]
    pub fn set_height(&mut self, height: usize, shift_y: i32, pad: char) {
        self.set_capacity(self.width, height, Offset::new(0, shift_y), pad);
    }

    /// Rebuild the character storage at a new size
    ///
    /// Old cell `(x, y)` lands at `(x + shift.x, y + shift.y)`; exposed cells are
    /// filled with `pad`. The alpha mask is not touched.
    pub fn set_capacity(&mut self, width: usize, height: usize, shift: Offset, pad: char) {
        debug!(
            "char grid resize {}x{} -> {}x{} shift {}",
            self.width, self.height, width, height, shift
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

    // ---- merging ----

    /// Paint `source` over this grid wherever `source` is opaque
    ///
    /// `source` is positioned at `relative` to this grid's world frame. This
    /// grid's own alpha is neither consulted nor changed. Fails if `source` is
    /// opaque at a cell its character storage does not cover; cells painted
    /// before the failure stay painted.
    pub fn merge(&mut self, source: &CharGrid, relative: Offset) -> Result<(), GridError> {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let sx = self.offset.x() + x - relative.x();
                let sy = self.offset.y() + y - relative.y();
                if source.is_within_alpha_bounds(sx, sy) && source.alpha_at(sx, sy)? {
                    let ch = source.get(sx, sy)?;
                    self.set_local(x, y, ch)?;
                }
            }
        }
        Ok(())
    }

    // ---- flattening ----

    /// Raw dump of the character storage, optionally delimiting rows
    pub fn dump(&self, row_delimiter: Option<&str>) -> String {
        let mut out = String::with_capacity(self.width * self.height + self.height);
        self.cells.with(|cells| {
            for (y, row) in cells.chunks(self.width.max(1)).enumerate() {
                if y > 0 {
                    if let Some(delim) = row_delimiter {
                        out.push_str(delim);
                    }
                }
                out.extend(row.iter());
            }
        });
        out
    }

    /// Dump of the character storage with non-rendered cells replaced by [`BLANK_CHAR`]
    pub fn dump_rendered(&self, row_delimiter: Option<&str>) -> String {
        let mut out = String::with_capacity(self.width * self.height + self.height);
        for y in 0..self.height as i32 {
            if y > 0 {
                if let Some(delim) = row_delimiter {
                    out.push_str(delim);
                }
            }
            for x in 0..self.width as i32 {
                let wx = self.offset.x() + x;
                let wy = self.offset.y() + y;
                let ch = match self.alpha.get(wx, wy) {
                    Ok(true) => self.get_local(x, y).unwrap_or(BLANK_CHAR),
                    _ => BLANK_CHAR,
                };
                out.push(ch);
            }
        }
        out
    }
}

impl Default for CharGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump(Some("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_pads_with_blank() {
        let grid = CharGrid::from_text(3, 2, "abcd");
        assert_eq!(grid.dump(Some("|")), "abc|d  ");
        assert_eq!(grid.alpha().true_count(), 6);
    }

    #[test]
    fn test_missing_arguments() {
        let err = CharGrid::from_text_with_alpha(2, 2, None, Some(MaskGrid::filled(2, 2, true)))
            .unwrap_err();
        assert_eq!(err, GridError::MissingArgument("text"));

        let err = CharGrid::from_chars(2, 2, &['a'; 4], None).unwrap_err();
        assert_eq!(err, GridError::MissingArgument("alpha"));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let err = CharGrid::from_rows(&[vec!['a', 'b'], vec!['c']]).unwrap_err();
        assert_eq!(
            err,
            GridError::NonUniformRows {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_set_capacity_keeps_alpha() {
        let mut grid = CharGrid::from_text(2, 1, "ab");
        grid.set_width(4, 1, '.');
        assert_eq!(grid.dump(None), ".ab.");
        assert_eq!(grid.alpha().width(), 2);
    }

    #[test_log::test]
    fn test_dump_rendered_respects_alpha_offset() {
        let mut grid = CharGrid::from_text(3, 1, "xyz");
        grid.set_alpha_offset(Offset::new(1, 0));
        assert_eq!(grid.dump_rendered(None), " yz");
    }
}
