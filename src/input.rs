//! Input events, decoupled from the terminal backend. Pointer positions
//! arrive already mapped into logical canvas coordinates.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::render::Canvas;

/// The handful of keys the menu screens distinguish. During play every
/// `Press` acts as a flap, whichever key it names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Tab,
    Enter,
    Space,
    Other,
}

/// A device-independent input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    Press(Key),
    Pointer { x: f64, y: f64 },
    Resized { cols: u16, rows: u16 },
}

/// Drain every pending terminal event without blocking, preserving order.
/// Quit stays a separate variant so the loop can honor it at the very next
/// dispatch, no matter what screen is active.
pub fn poll_events(canvas: &Canvas) -> io::Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ev = match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        InputEvent::Quit
                    }
                    KeyCode::Up => InputEvent::Press(Key::Up),
                    KeyCode::Down => InputEvent::Press(Key::Down),
                    KeyCode::Tab => InputEvent::Press(Key::Tab),
                    KeyCode::Enter => InputEvent::Press(Key::Enter),
                    KeyCode::Char(' ') => InputEvent::Press(Key::Space),
                    _ => InputEvent::Press(Key::Other),
                };
                events.push(ev);
            }
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    let (x, y) = canvas.cell_to_logical(mouse.column, mouse.row);
                    events.push(InputEvent::Pointer { x, y });
                }
            }
            Event::Resize(cols, rows) => events.push(InputEvent::Resized { cols, rows }),
            _ => {}
        }
    }
    Ok(events)
}
