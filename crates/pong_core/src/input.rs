//! Keyboard state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` is true every frame the key is
//!   physically down. Paddle movement reads this, so releasing a key stops the
//!   paddle on the next tick.
//!
//! - **Edge-triggered (just_pressed):** true only until `end_frame()`, which
//!   the game loop calls after a tick has consumed the press. A press that
//!   lands between ticks is therefore never lost.

use std::collections::HashSet;

use crate::world::{PaddleIntent, TickInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    Enter,
    Escape,
    F3,
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    quit_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            quit_requested: false,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    /// Releasing a key only affects the held set; a press that has not been
    /// ticked yet stays pending.
    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Record a window-close request. Sticky until the loop exits.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested || self.is_just_pressed(Key::Escape)
    }

    /// Translate the current key state into the world's per-tick input.
    /// W/S steer paddle 1, the arrow keys steer paddle 2.
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            paddle1: PaddleIntent {
                up: self.is_held(Key::W),
                down: self.is_held(Key::S),
            },
            paddle2: PaddleIntent {
                up: self.is_held(Key::Up),
                down: self.is_held(Key::Down),
            },
            restart: self.is_just_pressed(Key::Enter),
        }
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
