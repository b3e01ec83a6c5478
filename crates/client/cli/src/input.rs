//! Keyboard input mapping for the viewer.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the viewer to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Move the hover cursor by one cell.
    MoveCursor { d_row: i32, d_col: i32 },
    /// Jump the cursor back to the actor.
    CenterCursor,
    ToggleObstacle,
    ClearObstacles,
    SampleObstacles,
    NextVariable,
    PrevVariable,
    IncrementVariable,
    DecrementVariable,
    ToggleDash,
    /// Re-read the rule file from disk.
    Reload,
    Quit,
    None,
}

/// Maps crossterm key events to viewer actions.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,

            // Cursor
            KeyCode::Left | KeyCode::Char('h') => KeyAction::MoveCursor { d_row: 0, d_col: -1 },
            KeyCode::Right | KeyCode::Char('l') => KeyAction::MoveCursor { d_row: 0, d_col: 1 },
            KeyCode::Up | KeyCode::Char('k') => KeyAction::MoveCursor { d_row: -1, d_col: 0 },
            KeyCode::Down | KeyCode::Char('j') => KeyAction::MoveCursor { d_row: 1, d_col: 0 },
            KeyCode::Home | KeyCode::Char('.') => KeyAction::CenterCursor,

            // Obstacles
            KeyCode::Char(' ') | KeyCode::Char('o') | KeyCode::Enter => KeyAction::ToggleObstacle,
            KeyCode::Char('c') => KeyAction::ClearObstacles,
            KeyCode::Char('s') => KeyAction::SampleObstacles,

            // Variable sliders
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    KeyAction::PrevVariable
                } else {
                    KeyAction::NextVariable
                }
            }
            KeyCode::BackTab => KeyAction::PrevVariable,
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::IncrementVariable,
            KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::DecrementVariable,

            KeyCode::Char('d') => KeyAction::ToggleDash,
            KeyCode::Char('r') => KeyAction::Reload,

            _ => KeyAction::None,
        }
    }
}
