//! Keyboard decoding
//!
//! Maps browser key events to game commands. Velocity, not position, is set,
//! so holding a key keeps a paddle moving until the matching key-up.

use super::state::Side;
use crate::consts::PADDLE_SPEED;

/// Command produced by a key event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    /// Toggle between paused and running
    TogglePause,
    /// Set a paddle's vertical velocity
    SetPaddleVelocity { side: Side, dy: f32 },
    /// Toggle sound effects
    ToggleSound,
}

/// Decode a key-down event
///
/// `code` is the physical key (`KeyboardEvent.code`), `key` the produced
/// character (`KeyboardEvent.key`).
pub fn key_down(code: &str, key: &str) -> Option<KeyCommand> {
    if code == "Space" {
        return Some(KeyCommand::TogglePause);
    }
    let (side, dy) = match key {
        "w" => (Side::Left, -PADDLE_SPEED),
        "s" => (Side::Left, PADDLE_SPEED),
        "ArrowUp" => (Side::Right, -PADDLE_SPEED),
        "ArrowDown" => (Side::Right, PADDLE_SPEED),
        "m" => return Some(KeyCommand::ToggleSound),
        _ => return None,
    };
    Some(KeyCommand::SetPaddleVelocity { side, dy })
}

/// Decode a key-up event
pub fn key_up(key: &str) -> Option<KeyCommand> {
    let side = match key {
        "w" | "s" => Side::Left,
        "ArrowUp" | "ArrowDown" => Side::Right,
        _ => return None,
    };
    Some(KeyCommand::SetPaddleVelocity { side, dy: 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_toggles_pause() {
        assert_eq!(key_down("Space", " "), Some(KeyCommand::TogglePause));
        assert_eq!(key_up(" "), None);
    }

    #[test]
    fn test_left_paddle_keys() {
        assert_eq!(
            key_down("KeyW", "w"),
            Some(KeyCommand::SetPaddleVelocity { side: Side::Left, dy: -5.0 })
        );
        assert_eq!(
            key_down("KeyS", "s"),
            Some(KeyCommand::SetPaddleVelocity { side: Side::Left, dy: 5.0 })
        );
        for key in ["w", "s"] {
            assert_eq!(
                key_up(key),
                Some(KeyCommand::SetPaddleVelocity { side: Side::Left, dy: 0.0 })
            );
        }
    }

    #[test]
    fn test_right_paddle_keys() {
        assert_eq!(
            key_down("ArrowUp", "ArrowUp"),
            Some(KeyCommand::SetPaddleVelocity { side: Side::Right, dy: -5.0 })
        );
        assert_eq!(
            key_down("ArrowDown", "ArrowDown"),
            Some(KeyCommand::SetPaddleVelocity { side: Side::Right, dy: 5.0 })
        );
        assert_eq!(
            key_up("ArrowDown"),
            Some(KeyCommand::SetPaddleVelocity { side: Side::Right, dy: 0.0 })
        );
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(key_down("KeyQ", "q"), None);
        assert_eq!(key_up("m"), None);
        assert_eq!(key_down("KeyM", "m"), Some(KeyCommand::ToggleSound));
    }
}
