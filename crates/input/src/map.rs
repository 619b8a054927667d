//! Mapping from terminal events to input data.

use crate::action::InputData;
use crate::types::{InputKind, Offset};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to an input kind.
pub fn map_key_event(key: KeyEvent) -> Option<InputKind> {
    match key.code {
        // Focus
        KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Up
        | KeyCode::Down
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(InputKind::Select),

        // Activation
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputKind::Use),

        _ => None,
    }
}

/// Map mouse input to positioned input data.
///
/// A left press activates. Pointer movement is ignored since selection
/// toggles and all-motion tracking reports every move.
pub fn map_mouse_event(mouse: MouseEvent) -> Option<InputData> {
    let position = Offset::new(i32::from(mouse.column), i32::from(mouse.row));
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputData::at(InputKind::Use, position)),
        _ => None,
    }
}

/// Check if key should quit the host loop.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_select_keys() {
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Tab)), Some(InputKind::Select));
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Down)), Some(InputKind::Select));
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('S'))),
            Some(InputKind::Select)
        );
    }

    #[test]
    fn test_use_keys() {
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Enter)), Some(InputKind::Use));
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(InputKind::Use)
        );
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_mouse_press_carries_position() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            map_mouse_event(mouse),
            Some(InputData::at(InputKind::Use, Offset::new(4, 2)))
        );

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            ..mouse
        };
        assert_eq!(map_mouse_event(scroll), None);
    }

    #[test]
    fn test_mouse_motion_is_ignored() {
        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 3,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(map_mouse_event(moved), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
