//! Straight-line ball trajectory toward (and far past) the board edge
//!
//! The destination deliberately overshoots the board so the ball keeps
//! moving until a wall, paddle or scoring check interrupts the animation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Side};

/// Where the ball is headed and how far it has to travel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub distance: f32,
    pub destination: Vec2,
}

impl Trajectory {
    /// Animation duration for covering `distance` at `speed` px/s
    #[inline]
    pub fn duration_ms(&self, speed: f32) -> f32 {
        self.distance * 1000.0 / speed
    }
}

/// Compute the ball's next trajectory
///
/// `angle` is in degrees; a non-negative angle travels downward from the
/// ball's top edge, a negative one upward from its bottom edge.
pub fn compute_trajectory(
    ball: &Rect,
    direction: Side,
    angle: f32,
    board: &Rect,
    overshoot: f32,
) -> Trajectory {
    let adjacent = (board.edge(direction) - ball.edge(direction)).abs() + overshoot;
    let opposite = angle.abs().to_radians().tan() * adjacent;

    let x = match direction {
        Side::Right => ball.right + adjacent,
        Side::Left => ball.left - adjacent,
    };
    let y = if angle >= 0.0 {
        ball.top + opposite
    } else {
        ball.bottom - opposite
    };

    Trajectory {
        distance: adjacent.hypot(opposite),
        destination: Vec2::new(x, y),
    }
}
