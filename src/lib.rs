//! Folio Pong - a two-keyboard Pong mini-game for a portfolio page
//!
//! Core modules:
//! - `sim`: Board model, trajectory math, collisions, scoring
//! - `game`: Round controller driving serve, rally, score and pause
//! - `platform`: Toolkit abstraction (browser DOM and headless)
//! - `backdrop`: Animated background gradient
//! - `tuning`: Data-driven game constants

pub mod backdrop;
pub mod game;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use backdrop::Backdrop;
pub use game::{Game, RoundPhase};
pub use platform::{Easing, ElementSpec, Placement, Task, Toolkit};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Thresholds and the overshoot margin are tuned against the ball speed and
/// the 15 ms tick; they are not derived from the board geometry.
pub mod consts {
    /// Period of both the paddle and the round tick (ms)
    pub const TICK_INTERVAL_MS: u32 = 15;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_SPEED: f32 = 500.0;
    /// Bounce tilt in degrees at serve
    pub const BALL_ANGLE: f32 = 40.0;
    /// Horizontal distance from the serving edge at spawn
    pub const SERVE_INSET: f32 = 120.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Pixels moved per paddle tick while a key is held
    pub const PADDLE_STEP: f32 = 10.0;

    /// Ball-to-wall distance that counts as contact
    pub const WALL_THRESHOLD: f32 = 10.0;
    /// Ball-to-paddle horizontal distance that counts as contact
    pub const PADDLE_THRESHOLD: f32 = 5.0;
    /// Extra travel past the board edge so a check interrupts the animation
    pub const OVERSHOOT: f32 = 8000.0;

    /// Default mount point on the host page
    pub const CONTAINER_ID: &str = "pong-container";
}

