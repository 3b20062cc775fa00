use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Player};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Turn one player's snake
    Steer(Player, Direction),
    /// Begin on the start screen, restart on the game-over screen
    Confirm,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Player 1 - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Player::One, Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Steer(Player::One, Direction::Down)
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Steer(Player::One, Direction::Left)
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Steer(Player::One, Direction::Right)
            }

            // Player 2 - Arrow keys
            KeyCode::Up => KeyAction::Steer(Player::Two, Direction::Up),
            KeyCode::Down => KeyAction::Steer(Player::Two, Direction::Down),
            KeyCode::Left => KeyAction::Steer(Player::Two, Direction::Left),
            KeyCode::Right => KeyAction::Steer(Player::Two, Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_wasd_steers_player_one() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('w'))),
            KeyAction::Steer(Player::One, Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('a'))),
            KeyAction::Steer(Player::One, Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('s'))),
            KeyAction::Steer(Player::One, Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('d'))),
            KeyAction::Steer(Player::One, Direction::Right)
        );
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::Steer(Player::One, Direction::Up)
        );
    }

    #[test]
    fn test_arrows_steer_player_two() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up)),
            KeyAction::Steer(Player::Two, Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down)),
            KeyAction::Steer(Player::Two, Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left)),
            KeyAction::Steer(Player::Two, Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right)),
            KeyAction::Steer(Player::Two, Direction::Right)
        );
    }

    #[test]
    fn test_confirm_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' '))),
            KeyAction::Confirm
        );
        assert_eq!(handler.handle_key_event(press(KeyCode::Enter)), KeyAction::Confirm);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('r'))), KeyAction::None);
    }
}
