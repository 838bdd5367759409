//! Held-key tracking
//!
//! Key events arrive asynchronously; the tick samples the held set once per
//! frame. Arrows and WASD both steer.

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Key name (as in `KeyboardEvent.key`) to direction
const BINDINGS: [(&str, Direction); 8] = [
    ("ArrowUp", Direction::Up),
    ("w", Direction::Up),
    ("ArrowDown", Direction::Down),
    ("s", Direction::Down),
    ("ArrowLeft", Direction::Left),
    ("a", Direction::Left),
    ("ArrowRight", Direction::Right),
    ("d", Direction::Right),
];

fn binding_index(key: &str) -> Option<usize> {
    BINDINGS.iter().position(|(name, _)| {
        if name.len() == 1 {
            key.eq_ignore_ascii_case(name)
        } else {
            key == *name
        }
    })
}

/// Which bound keys are currently down
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: [bool; BINDINGS.len()],
}

impl KeyState {
    /// Record a keydown. Returns true if the key steers the player.
    pub fn key_down(&mut self, key: &str) -> bool {
        match binding_index(key) {
            Some(i) => {
                self.held[i] = true;
                true
            }
            None => false,
        }
    }

    /// Record a keyup. Returns true if the key steers the player.
    pub fn key_up(&mut self, key: &str) -> bool {
        match binding_index(key) {
            Some(i) => {
                self.held[i] = false;
                true
            }
            None => false,
        }
    }

    /// Forget everything (window lost focus; keyups will never arrive)
    pub fn release_all(&mut self) {
        self.held = [false; BINDINGS.len()];
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        BINDINGS
            .iter()
            .zip(self.held)
            .any(|((_, d), held)| held && *d == direction)
    }

    /// Snapshot for one tick
    pub fn sample(&self) -> TickInput {
        TickInput {
            up: self.is_held(Direction::Up),
            down: self.is_held(Direction::Down),
            left: self.is_held(Direction::Left),
            right: self.is_held(Direction::Right),
        }
    }
}
