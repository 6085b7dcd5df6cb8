//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key bindings as `(keys, description)` pairs, for help text.
pub const KEY_HELP: [(&str, &str); 7] = [
    ("h / ←", "move left"),
    ("l / →", "move right"),
    ("j / ↓", "hard drop"),
    ("z", "rotate left"),
    ("x / ↑", "rotate right"),
    ("p", "pause"),
    ("q", "quit"),
];

/// Map keyboard input to game actions.
///
/// Release events (sent by terminals with keyboard enhancement enabled) are
/// ignored so a single press never acts twice.
pub fn map_key(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Quit),
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameAction::HardDrop),

        // Rotation
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameAction::RotateLeft),
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::RotateRight),

        // Session
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::TogglePause),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameAction::Quit),

        _ => None,
    }
}
