//! The ball entity and its bounce transition

use serde::{Deserialize, Serialize};

use super::geometry::{Offset, Rect, Side, Surface};
use super::trajectory::{Trajectory, compute_trajectory};

/// Kinematic state of a ball, separate from its rendered element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallMotion {
    /// Pixels per second
    pub speed: f32,
    /// Horizontal travel direction
    pub direction: Side,
    /// Signed bounce tilt in degrees
    pub angle: f32,
}

impl BallMotion {
    pub fn new(speed: f32, direction: Side, angle: f32) -> Self {
        Self {
            speed,
            direction,
            angle,
        }
    }

    /// Apply a bounce off `surface`
    ///
    /// Top/bottom walls mirror the angle; side contacts send the ball
    /// back the other way. Speed and angle magnitude never change.
    pub fn update_trajectory(&mut self, surface: Surface) {
        match surface {
            Surface::Top | Surface::Bottom => self.angle = -self.angle,
            Surface::Left => self.direction = Side::Right,
            Surface::Right => self.direction = Side::Left,
        }
    }
}

/// A live ball: one per round
#[derive(Debug, Clone)]
pub struct Ball<E> {
    pub element: E,
    pub motion: BallMotion,
    /// Last bounding box read from the toolkit
    pub bounds: Rect,
}

impl<E> Ball<E> {
    pub fn new(element: E, motion: BallMotion, bounds: Rect) -> Self {
        Self {
            element,
            motion,
            bounds,
        }
    }

    #[inline]
    pub fn direction(&self) -> Side {
        self.motion.direction
    }

    pub fn update_trajectory(&mut self, surface: Surface) {
        self.motion.update_trajectory(surface);
    }

    /// Trajectory from the current bounds
    pub fn trajectory(&self, board: &Rect, overshoot: f32) -> Trajectory {
        compute_trajectory(
            &self.bounds,
            self.motion.direction,
            self.motion.angle,
            board,
            overshoot,
        )
    }
}

/// Spawn offset (relative to the board) for a ball served toward `direction`
///
/// A ball heading right starts near the left edge and vice versa.
pub fn serve_offset(board: &Rect, direction: Side, ball_size: f32, inset: f32) -> Offset {
    let left = match direction {
        Side::Right => inset,
        Side::Left => board.width - ball_size - inset,
    };
    Offset::new(left, (board.height - ball_size) / 2.0)
}
