//! Key decoding and event-to-effect dispatch
//!
//! The terminal delivers raw key events; this module narrows them to the
//! handful the simulation reacts to and maps each one to its effect. The
//! `InputSource` trait is the seam that keeps the tick loop testable without
//! a terminal.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// Decoded input, one per pending terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Resize,
    /// Ctrl-C. Raw mode swallows the signal and hands it over as a key.
    Interrupt,
    Other,
}

/// What an input event does to the running simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Plot a directional marker glyph at the current cursor cell.
    Marker(char),
    /// Leave the loop and tear down.
    Stop,
    None,
}

/// Maps each event to its effect. Resize and unrecognized keys are reserved
/// and do nothing.
pub fn dispatch(event: InputEvent) -> Effect {
    match event {
        InputEvent::Up => Effect::Marker('^'),
        InputEvent::Down => Effect::Marker('v'),
        InputEvent::Left => Effect::Marker('<'),
        InputEvent::Right => Effect::Marker('>'),
        InputEvent::Interrupt => Effect::Stop,
        InputEvent::Resize | InputEvent::Other => Effect::None,
    }
}

/// Non-blocking source of decoded input events.
///
/// `poll_next` returns `None` once no events are pending; the input system
/// drains it to exhaustion every tick.
pub trait InputSource {
    fn poll_next(&mut self) -> io::Result<Option<InputEvent>>;
}

/// Terminal-backed source. Polls with a zero timeout so a tick with no
/// pending input never blocks.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn poll_next(&mut self) -> io::Result<Option<InputEvent>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        Ok(Some(decode(event::read()?)))
    }
}

fn decode(event: Event) -> InputEvent {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Up => InputEvent::Up,
            KeyCode::Down => InputEvent::Down,
            KeyCode::Left => InputEvent::Left,
            KeyCode::Right => InputEvent::Right,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputEvent::Interrupt
            }
            _ => InputEvent::Other,
        },
        Event::Resize(_, _) => InputEvent::Resize,
        _ => InputEvent::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn directions_map_to_marker_glyphs() {
        assert_eq!(dispatch(InputEvent::Up), Effect::Marker('^'));
        assert_eq!(dispatch(InputEvent::Down), Effect::Marker('v'));
        assert_eq!(dispatch(InputEvent::Left), Effect::Marker('<'));
        assert_eq!(dispatch(InputEvent::Right), Effect::Marker('>'));
    }

    #[test]
    fn resize_and_unknown_are_reserved_noops() {
        assert_eq!(dispatch(InputEvent::Resize), Effect::None);
        assert_eq!(dispatch(InputEvent::Other), Effect::None);
    }

    #[test]
    fn interrupt_stops() {
        assert_eq!(dispatch(InputEvent::Interrupt), Effect::Stop);
    }

    #[test]
    fn decode_arrow_and_interrupt_keys() {
        assert_eq!(decode(Event::Key(KeyEvent::from(KeyCode::Up))), InputEvent::Up);
        assert_eq!(
            decode(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            InputEvent::Interrupt
        );
        assert_eq!(decode(Event::Resize(80, 24)), InputEvent::Resize);
        assert_eq!(
            decode(Event::Key(KeyEvent::from(KeyCode::Char('x')))),
            InputEvent::Other
        );
    }
}
