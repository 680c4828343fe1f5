use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A player input, independent of which key produced it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    /// Steer the snake
    Turn(Direction),

    /// Confirm whatever the on-screen overlay offers
    Primary,

    TogglePause,

    /// Abandon the current game and return to the start screen
    Restart,

    Quit,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Up) => Some(Command::Turn(Direction::North)),
            (KeyModifiers::NONE, KeyCode::Down) => Some(Command::Turn(Direction::South)),
            (KeyModifiers::NONE, KeyCode::Left) => Some(Command::Turn(Direction::West)),
            (KeyModifiers::NONE, KeyCode::Right) => Some(Command::Turn(Direction::East)),
            (KeyModifiers::NONE, KeyCode::Enter) => Some(Command::Primary),
            (KeyModifiers::NONE, KeyCode::Esc) => Some(Command::TogglePause),
            (m, KeyCode::Char(c)) if normal_modifiers.contains(m) => {
                match c.to_ascii_lowercase() {
                    'w' | 'k' => Some(Command::Turn(Direction::North)),
                    's' | 'j' => Some(Command::Turn(Direction::South)),
                    'a' | 'h' => Some(Command::Turn(Direction::West)),
                    'd' | 'l' => Some(Command::Turn(Direction::East)),
                    ' ' => Some(Command::Primary),
                    'p' => Some(Command::TogglePause),
                    'r' => Some(Command::Restart),
                    'q' => Some(Command::Quit),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
