//! Tick delivery contract.
//!
//! This crate does no timing of its own. A host scheduler builds one [`Tick`]
//! per period and hands it to each [`TickSink`]; every renderable is a sink
//! whose tick consumes exactly one queued frame.

use log::trace;

use crate::core::Renderable;

/// One discrete external tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick {
    pub index: u64,
    /// Time since the previous tick, as measured by the host
    pub elapsed_ms: u32,
}

impl Tick {
    /// The tick following this one
    pub fn next(self, elapsed_ms: u32) -> Tick {
        Tick {
            index: self.index + 1,
            elapsed_ms,
        }
    }
}

pub trait TickSink {
    fn pool_tick(&mut self, tick: Tick);

    /// Milliseconds the sink would like between ticks; `0` for no preference
    fn cooldown(&self) -> u32 {
        0
    }

    fn is_ready_for(&self, _tick: &Tick) -> bool {
        true
    }
}

impl<R: Renderable + ?Sized> TickSink for R {
    fn pool_tick(&mut self, tick: Tick) {
        trace!("tick {} ({} ms)", tick.index, tick.elapsed_ms);
        self.advance();
    }
}

/// Deliver `tick` if the sink is ready; returns whether it was delivered
pub fn deliver(sink: &mut dyn TickSink, tick: Tick) -> bool {
    if !sink.is_ready_for(&tick) {
        return false;
    }
    sink.pool_tick(tick);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CharGrid;
    use crate::sequencer::FrameSequencer;

    #[test]
    fn test_tick_consumes_one_entry() {
        let frames = vec![CharGrid::from_text(1, 1, "a"), CharGrid::from_text(1, 1, "b")];
        let mut seq = FrameSequencer::from_frames(frames);
        seq.animate().unwrap();

        let tick = Tick::default();
        assert!(deliver(&mut seq, tick));
        assert_eq!(seq.remaining(), 1);
        assert!(deliver(&mut seq, tick.next(16)));
        assert_eq!(seq.current_frame(), 1);
    }
}
