//! Keyboard-driven paddles
//!
//! Key state is an explicit [`InputState`] owned by the game and handed to
//! each paddle on every paddle tick.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Side};

/// Browser `keyCode` of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const W: KeyCode = KeyCode(87);
    pub const S: KeyCode = KeyCode(83);
    pub const ARROW_UP: KeyCode = KeyCode(38);
    pub const ARROW_DOWN: KeyCode = KeyCode(40);
    pub const P: KeyCode = KeyCode(80);
}

/// Up/down key binding for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub up: KeyCode,
    pub down: KeyCode,
}

impl Controls {
    /// Fixed binding for a side: W/S on the left, arrows on the right
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Left => Self {
                up: KeyCode::W,
                down: KeyCode::S,
            },
            Side::Right => Self {
                up: KeyCode::ARROW_UP,
                down: KeyCode::ARROW_DOWN,
            },
        }
    }

    pub fn binds(&self, key: KeyCode) -> bool {
        key == self.up || key == self.down
    }
}

/// Currently held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: BTreeSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Held keys in a stable order
    pub fn held(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.held.iter().copied()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Vertical travel limits of a paddle
///
/// `y_max` is the visually topmost bound, `y_min` the bottommost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementRange {
    pub y_max: f32,
    pub y_min: f32,
}

impl MovementRange {
    pub fn of_board(board: &Rect) -> Self {
        Self {
            y_max: board.top,
            y_min: board.bottom,
        }
    }
}

/// A player's paddle
#[derive(Debug, Clone)]
pub struct Paddle<E> {
    pub side: Side,
    pub element: E,
    pub controls: Controls,
    pub range: MovementRange,
    /// Last bounding box read from the toolkit
    pub bounds: Rect,
}

impl<E> Paddle<E> {
    pub fn new(side: Side, element: E, board: &Rect, bounds: Rect) -> Self {
        Self {
            side,
            element,
            controls: Controls::for_side(side),
            range: MovementRange::of_board(board),
            bounds,
        }
    }

    /// Vertical displacement a held `key` asks for, if any
    ///
    /// Returns `None` for unbound keys and when the paddle already touches
    /// the bound in that direction. The step is shortened so the paddle
    /// lands exactly on the bound instead of crossing it.
    pub fn move_for(&self, key: KeyCode, step: f32) -> Option<f32> {
        if key == self.controls.up {
            let room = self.bounds.top - self.range.y_max;
            (room > 0.0).then(|| -step.min(room))
        } else if key == self.controls.down {
            let room = self.range.y_min - self.bounds.bottom;
            (room > 0.0).then(|| step.min(room))
        } else {
            None
        }
    }
}
