//! Tracks which score displays are out of date.
//!
//! The rendered score texture is derived from `Player::score`. The board
//! remembers the value each display was last rendered for; whenever a score
//! changes the matching entry becomes stale and is handed back to the caller
//! to re-render before the next draw.

use crate::world::{PlayerSide, World};

#[derive(Debug, Default, Clone)]
pub struct ScoreBoard {
    rendered: [Option<u32>; 2],
}

/// A score display that needs new glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleScore {
    pub side: PlayerSide,
    pub score: u32,
    pub text: String,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stale(&self, world: &World) -> Vec<StaleScore> {
        PlayerSide::BOTH
            .into_iter()
            .enumerate()
            .filter_map(|(i, side)| {
                let score = world.player(side).score;
                if self.rendered[i] == Some(score) {
                    return None;
                }
                Some(StaleScore {
                    side,
                    score,
                    text: score.to_string(),
                })
            })
            .collect()
    }

    pub fn mark_rendered(&mut self, side: PlayerSide, score: u32) {
        let i = match side {
            PlayerSide::One => 0,
            PlayerSide::Two => 1,
        };
        self.rendered[i] = Some(score);
    }

    /// Force both displays to be rendered again, e.g. after a restart where
    /// the score may already read zero.
    pub fn invalidate(&mut self) {
        self.rendered = [None, None];
    }

    pub fn rendered(&self, side: PlayerSide) -> Option<u32> {
        match side {
            PlayerSide::One => self.rendered[0],
            PlayerSide::Two => self.rendered[1],
        }
    }
}
