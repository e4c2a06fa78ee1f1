use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    // Control surface (mapped to core actions)
    Quit,
    Like,
    Dislike,
    Restart,

    // Left mouse button, in terminal cells (column, row)
    PointerDown(u16, u16),
    PointerDrag(u16, u16),
    PointerUp(u16, u16),

    // Summary grid
    ScrollUp,
    ScrollDown,

    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(ev) => translate(ev),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

fn translate(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key_event) => {
            // Ignore key release/repeat reports from the kitty protocol
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
                (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
                (_, KeyCode::Right) | (_, KeyCode::Char('l')) => Some(TuiEvent::Like),
                (_, KeyCode::Left) | (_, KeyCode::Char('h')) => Some(TuiEvent::Dislike),
                (_, KeyCode::Char('r')) => Some(TuiEvent::Restart),
                (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(TuiEvent::ScrollUp),
                (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(TuiEvent::ScrollDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => {
            let (col, row) = (mouse_event.column, mouse_event.row);
            match mouse_event.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(TuiEvent::PointerDown(col, row)),
                MouseEventKind::Drag(MouseButton::Left) => Some(TuiEvent::PointerDrag(col, row)),
                MouseEventKind::Up(MouseButton::Left) => Some(TuiEvent::PointerUp(col, row)),
                MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
                MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
                _ => None,
            }
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_keys_map_to_controls() {
        assert_eq!(translate(key(KeyCode::Right, KeyModifiers::NONE)), Some(TuiEvent::Like));
        assert_eq!(translate(key(KeyCode::Char('h'), KeyModifiers::NONE)), Some(TuiEvent::Dislike));
        assert_eq!(translate(key(KeyCode::Char('r'), KeyModifiers::NONE)), Some(TuiEvent::Restart));
        assert_eq!(translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(TuiEvent::Quit));
        assert_eq!(translate(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_left_button_maps_to_pointer_events() {
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left), 10, 4)),
            Some(TuiEvent::PointerDown(10, 4))
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 5)),
            Some(TuiEvent::PointerDrag(30, 5))
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Up(MouseButton::Left), 31, 5)),
            Some(TuiEvent::PointerUp(31, 5))
        );
        assert_eq!(translate(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)), None);
        assert_eq!(translate(mouse(MouseEventKind::Moved, 1, 1)), None);
        assert_eq!(
            translate(mouse(MouseEventKind::ScrollDown, 1, 1)),
            Some(TuiEvent::ScrollDown)
        );
    }
}
