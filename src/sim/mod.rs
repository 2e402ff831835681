//! Board simulation module
//!
//! Entities and the pure checks the round controller runs every tick:
//! - No rendering or platform dependencies
//! - Entities hold an opaque element handle, never the element itself
//! - Geometry uses CSS screen coordinates (y grows downward)

pub mod ball;
pub mod collision;
pub mod geometry;
pub mod paddle;
pub mod scoreboard;
pub mod trajectory;

pub use ball::{Ball, BallMotion, serve_offset};
pub use collision::{paddle_contact, scoring_side, wall_contact};
pub use geometry::{Offset, Rect, Side, Surface};
pub use paddle::{Controls, InputState, KeyCode, MovementRange, Paddle};
pub use scoreboard::Scoreboard;
pub use trajectory::{Trajectory, compute_trajectory};
