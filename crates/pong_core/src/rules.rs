//! Ordered collision rules evaluated once per tick after motion.
//!
//! Only the first rule in [`CollisionRule::ORDER`] whose condition holds
//! fires on a given tick, so simultaneous contacts resolve by priority:
//! goals beat paddle hits, paddle hits beat wall bounces.

use crate::geometry::{Field, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionRule {
    /// Ball reached the left wall; player two scores.
    LeftGoal,
    /// Ball reached the right wall; player one scores.
    RightGoal,
    /// Ball overlaps the left paddle.
    Paddle1,
    /// Ball overlaps the right paddle.
    Paddle2,
    /// Ball touches the top or bottom wall.
    Wall,
}

/// Positions the rules are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct Contacts {
    pub ball: Rect,
    pub paddle1: Rect,
    pub paddle2: Rect,
    pub field: Field,
}

impl CollisionRule {
    pub const ORDER: [CollisionRule; 5] = [
        CollisionRule::LeftGoal,
        CollisionRule::RightGoal,
        CollisionRule::Paddle1,
        CollisionRule::Paddle2,
        CollisionRule::Wall,
    ];

    pub fn matches(self, c: &Contacts) -> bool {
        match self {
            Self::LeftGoal => c.ball.x <= 0,
            Self::RightGoal => c.ball.right() >= c.field.width,
            Self::Paddle1 => c.ball.intersects(&c.paddle1),
            Self::Paddle2 => c.ball.intersects(&c.paddle2),
            Self::Wall => c.ball.y <= 0 || c.ball.bottom() >= c.field.height,
        }
    }

    /// The highest-priority rule that holds, if any.
    pub fn first_match(c: &Contacts) -> Option<Self> {
        Self::ORDER.into_iter().find(|rule| rule.matches(c))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LeftGoal => "left goal",
            Self::RightGoal => "right goal",
            Self::Paddle1 => "paddle 1",
            Self::Paddle2 => "paddle 2",
            Self::Wall => "wall",
        }
    }
}

impl std::fmt::Display for CollisionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
