//! Frame sequencer module - tick-driven playback over a sparse frame list
//!
//! A [`FrameSequencer`] owns a list of frames (with holes) and a playback
//! queue of [`FrameSelect`] entries. Each external tick consumes exactly one
//! queued entry and makes it the visible grid; an empty queue leaves the
//! visible grid as it is.
//!
//! Frames are resolved when they are consumed, not when they are queued, so
//! replacing a frame affects queued entries that point at it.
//!
//! The current frame number follows the last single-frame selection: it is set
//! when a frame is queued on its own and again whenever a tick consumes an
//! entry. A fresh sequencer starts at frame 0.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::core::{CharGrid, GridError, Renderable};
use crate::types::{FrameSelect, Slot};

/// Tick-driven animation over a list of character grids
#[derive(Debug)]
pub struct FrameSequencer {
    frames: Vec<Slot<CharGrid>>,
    queue: VecDeque<FrameSelect>,
    current: FrameSelect,
    visible: CharGrid,
    hidden: bool,
    stash: CharGrid,
}

impl Default for FrameSequencer {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            queue: VecDeque::new(),
            current: FrameSelect::Frame(0),
            visible: CharGrid::new(),
            hidden: false,
            stash: CharGrid::new(),
        }
    }
}

impl FrameSequencer {
    /// Create a sequencer without frames
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequencer whose first tick shows frame 0
    pub fn from_frames(frames: Vec<CharGrid>) -> Self {
        let mut seq = Self::new();
        seq.frames = frames.into_iter().map(Slot::Filled).collect();
        if !seq.frames.is_empty() {
            seq.queue.push_back(FrameSelect::Frame(0));
        }
        seq
    }

    /// Create a sequencer whose first tick shows frame `current`
    pub fn with_current(current: usize, frames: Vec<CharGrid>) -> Result<Self, GridError> {
        let count = frames.len();
        if current >= count && !(current == 0 && count == 0) {
            return Err(GridError::InvalidCurrentFrame { current, count });
        }
        let mut seq = Self::from_frames(frames);
        seq.current = FrameSelect::Frame(current);
        seq.queue.clear();
        if count > 0 {
            seq.queue.push_back(FrameSelect::Frame(current));
        }
        Ok(seq)
    }

    // ---- frame list ----

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Borrow frame `i`, if present
    pub fn frame(&self, i: usize) -> Option<&CharGrid> {
        self.frames.get(i).and_then(Slot::filled)
    }

    /// Store `frame` at `i`, growing the list with empty slots as needed
    ///
    /// If `i` is the current frame it is queued again so the change shows on
    /// the next tick.
    pub fn set_frame_at(&mut self, i: usize, frame: CharGrid) {
        if i >= self.frames.len() {
            self.frames.resize_with(i + 1, Slot::default);
        }
        self.frames[i] = Slot::Filled(frame);
        debug!("frame {} set, {} frames", i, self.frames.len());
        if self.current == FrameSelect::Frame(i) {
            self.queue.clear();
            self.queue.push_back(FrameSelect::Frame(i));
        }
    }

    /// Empty the slot at `i`; playback shows a blank when it reaches it
    pub fn clear_frame_at(&mut self, i: usize) -> Result<(), GridError> {
        let count = self.frames.len();
        let slot = self.frames.get_mut(i).ok_or(GridError::FrameOutOfRange {
            index: i as i32,
            count,
        })?;
        *slot = Slot::Empty;
        Ok(())
    }

    // ---- queueing ----

    fn check(&self, select: FrameSelect) -> Result<FrameSelect, GridError> {
        match select {
            FrameSelect::Frame(i) if i >= self.frames.len() => Err(GridError::FrameOutOfRange {
                index: i as i32,
                count: self.frames.len(),
            }),
            _ => Ok(select),
        }
    }

    fn parse(&self, index: i32) -> Result<FrameSelect, GridError> {
        let select = FrameSelect::from_index(index).ok_or(GridError::FrameOutOfRange {
            index,
            count: self.frames.len(),
        })?;
        self.check(select)
    }

    /// Replace the queue with the single entry `index` (`-1` for blank)
    ///
    /// The entry becomes the current frame straight away.
    pub fn queue_frame(&mut self, index: i32) -> Result<(), GridError> {
        let select = self.parse(index)?;
        self.current = select;
        self.queue.clear();
        self.queue.push_back(select);
        Ok(())
    }

    /// Replace the queue with the inclusive run `start..=end`
    ///
    /// The run descends when `end < start`.
    pub fn queue_range(&mut self, start: usize, end: usize) -> Result<(), GridError> {
        self.check(FrameSelect::Frame(start.max(end)))?;
        self.queue.clear();
        if end >= start {
            self.queue.extend((start..=end).map(FrameSelect::Frame));
        } else {
            self.queue.extend((end..=start).rev().map(FrameSelect::Frame));
        }
        Ok(())
    }

    /// Replace the queue with an explicit sequence; `-1` entries are blanks
    ///
    /// The queue is left untouched if any entry is invalid.
    pub fn queue_sequence(&mut self, indices: &[i32]) -> Result<(), GridError> {
        let parsed = indices
            .iter()
            .map(|&i| self.parse(i))
            .collect::<Result<VecDeque<_>, _>>()?;
        self.queue = parsed;
        Ok(())
    }

    /// Queue every frame in ascending order
    pub fn animate(&mut self) -> Result<(), GridError> {
        match self.frames.len() {
            0 => {
                self.queue.clear();
                Ok(())
            }
            n => self.queue_range(0, n - 1),
        }
    }

    /// Queue the frame after the current one
    pub fn inc_frame(&mut self) -> Result<(), GridError> {
        self.queue_frame(self.current_frame() + 1)
    }

    /// Queue the frame before the current one; from frame 0 this queues a blank
    pub fn dec_frame(&mut self) -> Result<(), GridError> {
        self.queue_frame(self.current_frame() - 1)
    }

    // ---- playback ----

    /// Index of the last selected or consumed entry (`-1` for blank)
    pub fn current_frame(&self) -> i32 {
        self.current.index()
    }

    /// Entries still queued
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Consume one queued entry and make it visible
    pub fn advance(&mut self) {
        let Some(select) = self.queue.pop_front() else {
            return;
        };
        self.current = select;
        trace!("sequencer tick -> {}, {} left", select.index(), self.queue.len());

        let mut next = CharGrid::new();
        if let FrameSelect::Frame(i) = select {
            if let Some(frame) = self.frame(i) {
                next.adopt(frame);
            }
        }
        if self.hidden {
            self.stash = next;
        } else {
            self.visible = next;
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Blank the visible grid while `hidden`; ticks keep playing underneath
    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden == self.hidden {
            return;
        }
        self.hidden = hidden;
        if hidden {
            self.stash = std::mem::take(&mut self.visible);
        } else {
            self.visible = std::mem::take(&mut self.stash);
        }
    }
}

impl Renderable for FrameSequencer {
    fn grid(&self) -> &CharGrid {
        &self.visible
    }

    fn advance(&mut self) {
        FrameSequencer::advance(self);
    }
}
