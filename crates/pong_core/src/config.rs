use crate::geometry::Field;

#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub field: Field,
    /// Distance from each side wall to the outer edge of its paddle.
    pub paddle_inset: i32,
    /// Paddle speed in pixels per tick while a movement key is held.
    pub paddle_speed: i32,
    /// Horizontal ball velocity applied on every serve.
    pub serve_velocity: i32,
    /// Largest magnitude a paddle bounce may give the vertical velocity.
    pub max_bounce: i32,
    /// Top edge of both score displays.
    pub score_top: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: Field::new(640, 480),
            paddle_inset: 20,
            paddle_speed: 10,
            serve_velocity: 5,
            max_bounce: 5,
            score_top: 16,
        }
    }
}

/// Pixel sizes of every sprite, normally taken from the loaded textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSizes {
    pub ball: (i32, i32),
    pub paddle1: (i32, i32),
    pub paddle2: (i32, i32),
    pub divider: (i32, i32),
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            ball: (8, 8),
            paddle1: (20, 48),
            paddle2: (20, 48),
            divider: (4, 480),
        }
    }
}
