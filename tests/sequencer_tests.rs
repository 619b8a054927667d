//! Frame sequencer tests - queueing and tick consumption

use tui_charmap::core::{CharGrid, ErrorKind, Renderable};
use tui_charmap::engine::{deliver, FrameSequencer, Tick};

fn numbered(n: usize) -> Vec<CharGrid> {
    (0..n)
        .map(|i| CharGrid::from_text(1, 1, &i.to_string()))
        .collect()
}

fn play_out(seq: &mut FrameSequencer) -> Vec<String> {
    let mut shown = Vec::new();
    while seq.remaining() > 0 {
        seq.advance();
        shown.push(seq.grid().dump_rendered(None));
    }
    shown
}

#[test_log::test]
fn test_descending_range_then_exhausted() {
    let mut seq = FrameSequencer::from_frames(numbered(3));
    seq.queue_range(2, 0).unwrap();
    assert_eq!(play_out(&mut seq), vec!["2", "1", "0"]);

    // Exhausted: further ticks keep the last frame.
    seq.advance();
    assert_eq!(seq.remaining(), 0);
    assert_eq!(seq.current_frame(), 0);
    assert_eq!(seq.grid().dump(None), "0");
}

#[test]
fn test_ascending_range_and_animate() {
    let mut seq = FrameSequencer::from_frames(numbered(4));
    seq.queue_range(1, 3).unwrap();
    assert_eq!(play_out(&mut seq), vec!["1", "2", "3"]);

    seq.animate().unwrap();
    assert_eq!(play_out(&mut seq), vec!["0", "1", "2", "3"]);

    seq.queue_range(2, 2).unwrap();
    assert_eq!(seq.remaining(), 1);
}

#[test]
fn test_blank_entries() {
    let mut seq = FrameSequencer::from_frames(numbered(2));
    seq.queue_sequence(&[1, -1, 0]).unwrap();

    seq.advance();
    assert_eq!(seq.grid().dump(None), "1");
    seq.advance();
    assert_eq!(seq.current_frame(), -1);
    assert_eq!(seq.grid().width(), 0);
    seq.advance();
    assert_eq!(seq.grid().dump(None), "0");
}

#[test]
fn test_single_frame_queue() {
    let mut seq = FrameSequencer::from_frames(numbered(3));
    seq.queue_frame(2).unwrap();
    assert_eq!(play_out(&mut seq), vec!["2"]);

    seq.queue_frame(-1).unwrap();
    seq.advance();
    assert_eq!(seq.grid().dump(None), "");
}

#[test]
fn test_out_of_range_indices() {
    let mut seq = FrameSequencer::from_frames(numbered(2));
    assert_eq!(seq.queue_frame(2).unwrap_err().kind(), ErrorKind::OutOfBounds);
    assert_eq!(seq.queue_range(0, 2).unwrap_err().kind(), ErrorKind::OutOfBounds);
    assert_eq!(seq.queue_frame(-3).unwrap_err().kind(), ErrorKind::OutOfBounds);
    assert!(FrameSequencer::with_current(3, numbered(2)).is_err());
}

#[test]
fn test_set_frame_at_grows_and_requeues_current() {
    let mut seq = FrameSequencer::from_frames(numbered(1));
    seq.advance();
    assert_eq!(seq.current_frame(), 0);

    seq.set_frame_at(0, CharGrid::from_text(1, 1, "x"));
    assert_eq!(seq.remaining(), 1);
    seq.advance();
    assert_eq!(seq.grid().dump(None), "x");

    seq.set_frame_at(3, CharGrid::from_text(1, 1, "z"));
    assert_eq!(seq.frame_count(), 4);
    assert!(seq.frame(2).is_none());
    assert_eq!(seq.remaining(), 0);

    // An empty slot plays as blank.
    seq.queue_frame(2).unwrap();
    seq.advance();
    assert_eq!(seq.grid().width(), 0);
}

#[test]
fn test_inc_and_dec_frame() {
    let mut seq = FrameSequencer::with_current(1, numbered(3)).unwrap();
    seq.advance();
    seq.inc_frame().unwrap();
    seq.advance();
    assert_eq!(seq.current_frame(), 2);
    assert!(seq.inc_frame().is_err());
    seq.dec_frame().unwrap();
    seq.advance();
    assert_eq!(seq.current_frame(), 1);
}

#[test]
fn test_visible_grid_adopts_frame() {
    let mut seq = FrameSequencer::from_frames(numbered(1));
    seq.advance();
    assert!(seq.grid().shares_storage_with(seq.frame(0).unwrap()));
}

#[test]
fn test_tick_delivery_consumes_one_entry() {
    let mut seq = FrameSequencer::from_frames(numbered(3));
    seq.animate().unwrap();
    let mut tick = Tick::default();
    for expected in [0, 1, 2] {
        assert!(deliver(&mut seq, tick));
        assert_eq!(seq.current_frame(), expected);
        tick = tick.next(16);
    }
    assert_eq!(tick.index, 3);
}
