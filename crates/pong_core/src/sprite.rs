use crate::geometry::{Field, Rect};

/// Names the texture a sprite is drawn with. The renderer owns the actual
/// GPU handles and looks them up by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Background,
    Divider,
    Ball,
    Paddle1,
    Paddle2,
    Score1,
    Score2,
}

impl SpriteKey {
    pub const ALL: &'static [SpriteKey] = &[
        SpriteKey::Background,
        SpriteKey::Divider,
        SpriteKey::Ball,
        SpriteKey::Paddle1,
        SpriteKey::Paddle2,
        SpriteKey::Score1,
        SpriteKey::Score2,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Divider => "divider",
            Self::Ball => "ball",
            Self::Paddle1 => "paddle1",
            Self::Paddle2 => "paddle2",
            Self::Score1 => "score1",
            Self::Score2 => "score2",
        }
    }
}

impl std::fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub rect: Rect,
    pub key: SpriteKey,
}

impl Sprite {
    /// Build a sprite at `(x, y)` whose size is clipped to the field.
    pub fn new(key: SpriteKey, x: i32, y: i32, width: i32, height: i32, field: &Field) -> Self {
        let (width, height) = field.clamp_size(width, height);
        Self {
            rect: Rect::new(x, y, width, height),
            key,
        }
    }

    /// Replace the sprite size (e.g. after its texture changed), clipped to the field.
    pub fn resize(&mut self, width: i32, height: i32, field: &Field) {
        let (width, height) = field.clamp_size(width, height);
        self.rect.width = width;
        self.rect.height = height;
    }
}

/// A sprite that moves by an integer velocity every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub sprite: Sprite,
    pub x_vel: i32,
    pub y_vel: i32,
}

impl Character {
    pub fn new(sprite: Sprite) -> Self {
        Self {
            sprite,
            x_vel: 0,
            y_vel: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        self.sprite.rect
    }

    /// Advance by the current velocity, clipping to the field.
    pub fn advance(&mut self, field: &Field) {
        self.sprite.rect = field.step_clamped(self.sprite.rect, self.x_vel, self.y_vel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Field = Field::new(640, 480);

    #[test]
    fn new_clamps_oversized_sprite() {
        let sprite = Sprite::new(SpriteKey::Background, 0, 0, 800, 600, &FIELD);
        assert_eq!(sprite.rect.width, 640);
        assert_eq!(sprite.rect.height, 480);
    }

    #[test]
    fn advance_moves_and_clips() {
        let mut ball = Character::new(Sprite::new(SpriteKey::Ball, 630, 10, 8, 8, &FIELD));
        ball.x_vel = 5;
        ball.y_vel = -20;
        ball.advance(&FIELD);
        assert_eq!(ball.rect().x, 632);
        assert_eq!(ball.rect().y, 0);
        // Velocity is left untouched by clipping.
        assert_eq!(ball.x_vel, 5);
        assert_eq!(ball.y_vel, -20);
    }

    #[test]
    fn labels_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for key in SpriteKey::ALL {
            assert!(seen.insert(key.label()));
        }
    }
}
