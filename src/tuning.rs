//! Data-driven game constants
//!
//! Defaults come from [`crate::consts`]. The host page never sees this;
//! only the native demo reads overrides from a JSON file.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Speeds, sizes and thresholds used by the round controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Period of the paddle and round ticks (ms)
    pub tick_interval_ms: u32,
    pub ball_size: f32,
    /// Pixels per second
    pub ball_speed: f32,
    /// Degrees
    pub ball_angle: f32,
    pub serve_inset: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_step: f32,
    pub wall_threshold: f32,
    pub paddle_threshold: f32,
    pub overshoot: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            ball_angle: BALL_ANGLE,
            serve_inset: SERVE_INSET,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,
            wall_threshold: WALL_THRESHOLD,
            paddle_threshold: PADDLE_THRESHOLD,
            overshoot: OVERSHOOT,
        }
    }
}

impl Tuning {
    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tuning: Self = serde_json::from_str(json).context("invalid tuning JSON")?;
        anyhow::ensure!(tuning.ball_speed > 0.0, "ball_speed must be positive");
        anyhow::ensure!(tuning.tick_interval_ms > 0, "tick_interval_ms must be positive");
        anyhow::ensure!(
            tuning.ball_angle.abs() < 90.0,
            "ball_angle must be within (-90, 90) degrees"
        );
        Ok(tuning)
    }
}
