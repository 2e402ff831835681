//! Animated background gradient
//!
//! Two gradient stops each fade between a pair of colors. When a leg
//! finishes the pairs swap, so the background drifts back and forth
//! forever.

use serde::{Deserialize, Serialize};

/// Repaint period of the backdrop (ms)
pub const STEP_MS: u32 = 10;

pub type Rgb = [f32; 3];

/// Colors and timing of the backdrop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// First gradient stop: from `start[0]` to `start[1]`
    pub start: [Rgb; 2],
    /// Second gradient stop: from `end[0]` to `end[1]`
    pub end: [Rgb; 2],
    /// Duration of one leg (ms)
    pub time_ms: u32,
    /// Swap and repeat after each leg
    pub cycle: bool,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            start: [[80.0, 20.0, 155.0], [35.0, 5.0, 92.0]],
            end: [[60.0, 30.0, 100.0], [50.0, 25.0, 10.0]],
            time_ms: 4000,
            cycle: true,
        }
    }
}

/// Linear interpolation `step / steps` of the way from `start` to `target`
pub fn lerp_rgb(start: Rgb, target: Rgb, step: u32, steps: u32) -> Rgb {
    let k = step as f32 / steps.max(1) as f32;
    std::array::from_fn(|i| start[i] + (target[i] - start[i]) * k)
}

fn css_rgb(rgb: Rgb) -> String {
    format!(
        "rgb({}, {}, {})",
        rgb[0].round() as u8,
        rgb[1].round() as u8,
        rgb[2].round() as u8
    )
}

/// Running backdrop animation
#[derive(Debug, Clone)]
pub struct Backdrop {
    config: BackdropConfig,
    step: u32,
    reversed: bool,
    finished: bool,
}

impl Backdrop {
    pub fn new(config: BackdropConfig) -> Self {
        Self {
            config,
            step: 0,
            reversed: false,
            finished: false,
        }
    }

    /// Steps per leg
    pub fn steps(&self) -> u32 {
        (self.config.time_ms / STEP_MS).max(1)
    }

    /// Both gradient stops at the current step
    pub fn colors(&self) -> (Rgb, Rgb) {
        let steps = self.steps();
        let leg = |pair: [Rgb; 2]| {
            let (from, to) = if self.reversed {
                (pair[1], pair[0])
            } else {
                (pair[0], pair[1])
            };
            lerp_rgb(from, to, self.step, steps)
        };
        (leg(self.config.start), leg(self.config.end))
    }

    /// CSS `background` value for the current step
    pub fn css(&self) -> String {
        let (a, b) = self.colors();
        format!(
            "linear-gradient(65deg, {}, {}) repeat scroll 0% 0%",
            css_rgb(a),
            css_rgb(b)
        )
    }

    /// Move to the next step; a finished leg swaps direction when cycling
    pub fn advance(&mut self) {
        if self.finished {
            return;
        }
        if self.step < self.steps() {
            self.step += 1;
        } else if self.config.cycle {
            self.step = 0;
            self.reversed = !self.reversed;
        } else {
            self.finished = true;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_midpoint() {
        let mid = lerp_rgb([0.0, 100.0, 200.0], [100.0, 0.0, 200.0], 200, 400);
        assert_eq!(mid, [50.0, 50.0, 200.0]);
    }

    #[test]
    fn test_initial_css() {
        let backdrop = Backdrop::new(BackdropConfig::default());
        assert_eq!(
            backdrop.css(),
            "linear-gradient(65deg, rgb(80, 20, 155), rgb(60, 30, 100)) repeat scroll 0% 0%"
        );
    }

    #[test]
    fn test_leg_reaches_target_then_reverses() {
        let mut backdrop = Backdrop::new(BackdropConfig::default());
        for _ in 0..backdrop.steps() {
            backdrop.advance();
        }
        let (a, b) = backdrop.colors();
        assert_eq!(a, [35.0, 5.0, 92.0]);
        assert_eq!(b, [50.0, 25.0, 10.0]);

        // Next step starts the reverse leg from the target
        backdrop.advance();
        assert_eq!(backdrop.colors().0, [35.0, 5.0, 92.0]);
        backdrop.advance();
        assert!(backdrop.colors().0[2] > 92.0);
        assert!(!backdrop.is_finished());
    }

    #[test]
    fn test_non_cycling_finishes() {
        let mut backdrop = Backdrop::new(BackdropConfig {
            time_ms: 30,
            cycle: false,
            ..Default::default()
        });
        for _ in 0..4 {
            backdrop.advance();
        }
        assert!(backdrop.is_finished());
        assert_eq!(backdrop.colors().0, [35.0, 5.0, 92.0]);
    }
}
