//! TerminalHost: draws a character grid to a real terminal.
//!
//! Full redraws only. Rows are written at their world position relative to the
//! grid's offset, with non-rendered cells blanked.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{cursor, event, style::Print, terminal, QueueableCommand};

use crate::core::CharGrid;

pub struct TerminalHost {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(event::EnableMouseCapture)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(event::DisableMouseCapture)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disabling raw mode")?;
        Ok(())
    }

    /// Redraw the whole screen from `grid`
    pub fn draw(&mut self, grid: &CharGrid) -> Result<()> {
        self.buf.clear();
        encode_grid_into(grid, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue the commands that paint `grid` onto a cleared screen
pub fn encode_grid_into(grid: &CharGrid, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let origin = grid.offset();
    for (y, row) in grid.dump_rendered(Some("\n")).lines().enumerate() {
        let col = origin.x().max(0) as u16;
        let line = origin.y().max(0) as u16 + y as u16;
        out.queue(cursor::MoveTo(col, line))?;
        out.queue(Print(row))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_contains_rows() {
        let grid = CharGrid::from_text(2, 2, "abcd");
        let mut out = Vec::new();
        encode_grid_into(&grid, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("ab"));
        assert!(text.contains("cd"));
    }
}
