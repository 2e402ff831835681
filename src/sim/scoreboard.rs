//! Two-player scoreboard

use serde::{Deserialize, Serialize};

use super::geometry::Side;

/// Points for player 1 (left paddle) and player 2 (right paddle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    scores: [u32; 2],
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award one point to the player defending `side`
    pub fn add_point(&mut self, side: Side) {
        let slot = &mut self.scores[Self::index(side)];
        *slot = slot.saturating_add(1);
    }

    pub fn score(&self, side: Side) -> u32 {
        self.scores[Self::index(side)]
    }

    /// `[player_1, player_2]`
    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    /// Text shown in the scoreboard element
    pub fn render(&self) -> String {
        format!("{} - {}", self.scores[0], self.scores[1])
    }

    fn index(side: Side) -> usize {
        match side {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}
