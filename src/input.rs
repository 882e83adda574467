//! Input mapping
//!
//! Raw keys and pointer positions come in from the platform layer; held
//! arrows become a `Steer` signal and everything else becomes a one-shot
//! `Command` drained once per frame.

use crate::consts::WORLD_WIDTH;
use crate::sim::Steer;

/// One-shot player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start / resume / continue after a message
    Confirm,
    TogglePause,
    /// Abandon the run and start a fresh one at level 1
    Restart,
    /// Ask for a rewarded ad to earn an extra life
    WatchAd,
    ToggleSound,
}

impl Command {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | " " => Some(Command::Confirm),
            "p" | "P" => Some(Command::TogglePause),
            "n" | "N" => Some(Command::Restart),
            "r" | "R" => Some(Command::WatchAd),
            "m" | "M" => Some(Command::ToggleSound),
            _ => None,
        }
    }
}

/// Accumulated input between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    commands: Vec<Command>,
    /// Latest pointer x in world coordinates
    pointer: Option<f32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed. Returns true if the key is handled (caller may
    /// suppress the browser default).
    pub fn key_down(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" => self.left = true,
            "ArrowRight" => self.right = true,
            _ => match Command::from_key(key) {
                Some(command) => self.commands.push(command),
                None => return false,
            },
        }
        true
    }

    pub fn key_up(&mut self, key: &str) {
        match key {
            "ArrowLeft" => self.left = false,
            "ArrowRight" => self.right = false,
            _ => {}
        }
    }

    /// Release all held keys (window lost focus)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Pointer / touch moved to a world x
    pub fn pointer(&mut self, world_x: f32) {
        self.pointer = Some(world_x);
    }

    pub fn steer(&self) -> Steer {
        Steer::from_keys(self.left, self.right)
    }

    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn take_pointer(&mut self) -> Option<f32> {
        self.pointer.take()
    }
}

/// Convert a client x to world x given the canvas bounding rect
pub fn pointer_to_world(client_x: f32, rect_left: f32, rect_width: f32) -> f32 {
    if rect_width <= 0.0 {
        return WORLD_WIDTH / 2.0;
    }
    (client_x - rect_left) * (WORLD_WIDTH / rect_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_arrows() {
        let mut input = InputState::new();
        assert!(input.key_down("ArrowLeft"));
        assert_eq!(input.steer(), Steer::Left);
        input.key_down("ArrowRight");
        assert_eq!(input.steer(), Steer::None);
        input.key_up("ArrowLeft");
        assert_eq!(input.steer(), Steer::Right);
        input.release_all();
        assert_eq!(input.steer(), Steer::None);
    }

    #[test]
    fn test_commands_drain_once() {
        let mut input = InputState::new();
        input.key_down("Enter");
        input.key_down("p");
        assert!(!input.key_down("q"));
        assert_eq!(
            input.drain_commands(),
            vec![Command::Confirm, Command::TogglePause]
        );
        assert!(input.drain_commands().is_empty());
    }

    #[test]
    fn test_key_map() {
        assert_eq!(Command::from_key("n"), Some(Command::Restart));
        assert_eq!(Command::from_key("R"), Some(Command::WatchAd));
        assert_eq!(Command::from_key("m"), Some(Command::ToggleSound));
        assert_eq!(Command::from_key("ArrowUp"), None);
    }

    #[test]
    fn test_pointer_scaling() {
        // Canvas displayed at twice the world size, offset by 10px
        assert_eq!(pointer_to_world(510.0, 10.0, WORLD_WIDTH * 2.0), 250.0);
        assert_eq!(pointer_to_world(42.0, 0.0, 0.0), WORLD_WIDTH / 2.0);

        let mut input = InputState::new();
        input.pointer(120.0);
        assert_eq!(input.take_pointer(), Some(120.0));
        assert_eq!(input.take_pointer(), None);
    }
}
