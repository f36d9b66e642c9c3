//! The game world: background art, the ball and both players.
//!
//! `World` is owned by the game loop and advanced one tick at a time with
//! [`World::tick`]. Everything that draws is a [`Sprite`]; the renderer maps
//! each sprite's key to a texture, so the world never touches GPU state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GameConfig, SpriteSizes};
use crate::geometry::Field;
use crate::rules::{CollisionRule, Contacts};
use crate::sprite::{Character, Sprite, SpriteKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSide {
    One,
    Two,
}

impl PlayerSide {
    pub const BOTH: [PlayerSide; 2] = [PlayerSide::One, PlayerSide::Two];

    fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl std::fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => f.write_str("player 1"),
            Self::Two => f.write_str("player 2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub paddle: Character,
    pub score: u32,
    pub score_sprite: Sprite,
}

/// Movement request for one paddle during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleIntent {
    pub up: bool,
    pub down: bool,
}

impl PaddleIntent {
    pub fn velocity(self, speed: i32) -> i32 {
        match (self.up, self.down) {
            (true, false) => -speed,
            (false, true) => speed,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub paddle1: PaddleIntent,
    pub paddle2: PaddleIntent,
    pub restart: bool,
}

/// What happened during one tick, for callers that keep derived state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub rule: Option<CollisionRule>,
    pub scored: Option<PlayerSide>,
    pub restarted: bool,
}

pub struct World {
    pub config: GameConfig,
    pub background: Sprite,
    pub divider: Sprite,
    pub ball: Character,
    players: [Player; 2],
    sizes: SpriteSizes,
    rng: StdRng,
    tick_count: u64,
}

impl World {
    pub fn new(config: GameConfig, sizes: SpriteSizes, seed: u64) -> Self {
        let field = config.field;
        let background = Sprite::new(SpriteKey::Background, 0, 0, field.width, field.height, &field);
        let (divider_w, divider_h) = sizes.divider;
        let divider_w = divider_w.min(field.width);
        let divider = Sprite::new(
            SpriteKey::Divider,
            field.centered_x(divider_w),
            0,
            divider_w,
            divider_h,
            &field,
        );
        let ball = Character::new(Sprite::new(
            SpriteKey::Ball,
            0,
            0,
            sizes.ball.0,
            sizes.ball.1,
            &field,
        ));

        let mut world = Self {
            config,
            background,
            divider,
            ball,
            players: [
                initial_player(PlayerSide::One, &config, &sizes),
                initial_player(PlayerSide::Two, &config, &sizes),
            ],
            sizes,
            rng: StdRng::seed_from_u64(seed),
            tick_count: 0,
        };
        world.reset_ball();
        world
    }

    pub fn field(&self) -> Field {
        self.config.field
    }

    pub fn player(&self, side: PlayerSide) -> &Player {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: PlayerSide) -> &mut Player {
        &mut self.players[side.index()]
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.players[0].score, self.players[1].score)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Every sprite in back-to-front draw order.
    pub fn sprites(&self) -> [Sprite; 7] {
        [
            self.background,
            self.divider,
            self.players[0].score_sprite,
            self.players[1].score_sprite,
            self.players[0].paddle.sprite,
            self.players[1].paddle.sprite,
            self.ball.sprite,
        ]
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, input: &TickInput) -> TickReport {
        let mut report = TickReport::default();
        self.tick_count += 1;

        if input.restart {
            self.restart();
            report.restarted = true;
        }

        let speed = self.config.paddle_speed;
        self.players[0].paddle.y_vel = input.paddle1.velocity(speed);
        self.players[1].paddle.y_vel = input.paddle2.velocity(speed);

        let field = self.config.field;
        self.ball.advance(&field);
        for player in &mut self.players {
            player.paddle.advance(&field);
        }

        let contacts = Contacts {
            ball: self.ball.rect(),
            paddle1: self.players[0].paddle.rect(),
            paddle2: self.players[1].paddle.rect(),
            field,
        };
        if let Some(rule) = CollisionRule::first_match(&contacts) {
            log::trace!("tick {}: {} contact", self.tick_count, rule);
            report.scored = self.apply_rule(rule);
            report.rule = Some(rule);
        }
        report
    }

    fn apply_rule(&mut self, rule: CollisionRule) -> Option<PlayerSide> {
        match rule {
            CollisionRule::LeftGoal => {
                self.award_point(PlayerSide::Two);
                Some(PlayerSide::Two)
            }
            CollisionRule::RightGoal => {
                self.award_point(PlayerSide::One);
                Some(PlayerSide::One)
            }
            CollisionRule::Paddle1 => {
                let paddle = self.players[0].paddle.rect();
                self.ball.sprite.rect.x = paddle.right();
                self.bounce_off_paddle();
                None
            }
            CollisionRule::Paddle2 => {
                let paddle = self.players[1].paddle.rect();
                self.ball.sprite.rect.x = paddle.x - self.ball.rect().width;
                self.bounce_off_paddle();
                None
            }
            CollisionRule::Wall => {
                self.ball.y_vel = -self.ball.y_vel;
                None
            }
        }
    }

    fn award_point(&mut self, side: PlayerSide) {
        let player = &mut self.players[side.index()];
        player.score += 1;
        log::info!("{} scores ({} - {})", side, self.players[0].score, self.players[1].score);
        self.reset_ball();
    }

    fn bounce_off_paddle(&mut self) {
        self.ball.x_vel = -self.ball.x_vel;
        self.ball.y_vel = paddle_bounce(&mut self.rng, self.config.max_bounce);
    }

    /// Re-serve the ball from the centre line at a random height.
    ///
    /// The horizontal direction is always the configured serve velocity;
    /// only the vertical component is randomized.
    pub fn reset_ball(&mut self) {
        let field = self.config.field;
        let rect = self.ball.rect();
        self.ball.sprite.rect.x = field.centered_x(rect.width);
        self.ball.sprite.rect.y = self.rng.gen_range(0..=field.height - rect.height);
        self.ball.x_vel = self.config.serve_velocity;
        self.ball.y_vel = paddle_bounce(&mut self.rng, self.config.max_bounce);
    }

    /// Zero both scores and put every moving sprite back at its start.
    pub fn restart(&mut self) {
        for side in PlayerSide::BOTH {
            let score_sprite = self.players[side.index()].score_sprite;
            let mut fresh = initial_player(side, &self.config, &self.sizes);
            fresh.score_sprite = score_sprite;
            self.players[side.index()] = fresh;
        }
        self.reset_ball();
        log::info!("Game restarted");
    }

    /// Resize a score display to its freshly rendered glyphs and re-centre it
    /// within its half of the field.
    pub fn set_score_size(&mut self, side: PlayerSide, width: i32, height: i32) {
        let field = self.config.field;
        let top = self.config.score_top;
        let sprite = &mut self.players[side.index()].score_sprite;
        sprite.resize(width, height, &field);
        let quarter = field.width / 4;
        let center = match side {
            PlayerSide::One => quarter,
            PlayerSide::Two => field.width - quarter,
        };
        let rect = &mut sprite.rect;
        rect.x = (center - rect.width / 2).clamp(0, field.width - rect.width);
        rect.y = top.clamp(0, field.height - rect.height);
    }
}

fn initial_player(side: PlayerSide, config: &GameConfig, sizes: &SpriteSizes) -> Player {
    let field = config.field;
    let (key, score_key, (w, h)) = match side {
        PlayerSide::One => (SpriteKey::Paddle1, SpriteKey::Score1, sizes.paddle1),
        PlayerSide::Two => (SpriteKey::Paddle2, SpriteKey::Score2, sizes.paddle2),
    };
    let (w, h) = field.clamp_size(w, h);
    let x = match side {
        PlayerSide::One => config.paddle_inset,
        PlayerSide::Two => field.width - config.paddle_inset - w,
    }
    .clamp(0, field.width - w);
    Player {
        paddle: Character::new(Sprite::new(key, x, field.centered_y(h), w, h, &field)),
        score: 0,
        score_sprite: Sprite::new(score_key, 0, config.score_top, 0, 0, &field),
    }
}

/// Pick a new vertical velocity: magnitude uniform in `0..=max`, sign uniform.
pub fn paddle_bounce<R: Rng>(rng: &mut R, max: i32) -> i32 {
    let magnitude = rng.gen_range(0..=max);
    if rng.gen_bool(0.5) {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn world() -> World {
        World::new(GameConfig::default(), SpriteSizes::default(), 7)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Move paddle 2 out of the way so only the tested contact can fire.
    fn park_paddle2(world: &mut World) {
        world.player_mut(PlayerSide::Two).paddle.sprite.rect.y = 0;
    }

    #[test]
    fn initial_layout() {
        let w = world();
        let p1 = w.player(PlayerSide::One).paddle.rect();
        let p2 = w.player(PlayerSide::Two).paddle.rect();
        assert_eq!(p1, Rect::new(20, 216, 20, 48));
        assert_eq!(p2, Rect::new(600, 216, 20, 48));
        assert_eq!(w.divider.rect.x, 318);
        assert_eq!(w.background.rect, Rect::new(0, 0, 640, 480));
        assert_eq!(w.scores(), (0, 0));
        assert_eq!(w.ball.x_vel, 5);
    }

    #[test]
    fn reset_centres_ball_in_bounds() {
        let mut w = world();
        for _ in 0..500 {
            w.ball.x_vel = -17;
            w.reset_ball();
            let rect = w.ball.rect();
            assert_eq!(rect.x, 316);
            assert!(rect.is_within(&w.field()));
            assert!(w.ball.y_vel.abs() <= 5);
            assert_eq!(w.ball.x_vel, 5);
        }
    }

    #[test]
    fn paddle_bounce_covers_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            let v = paddle_bounce(&mut rng, 5);
            assert!(v.abs() <= 5);
            seen.insert(v);
        }
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn ball_reaching_left_wall_scores_for_player_two() {
        let mut w = world();
        w.ball.sprite.rect = Rect::new(3, 100, 8, 8);
        w.ball.x_vel = -5;
        let report = w.tick(&idle());
        assert_eq!(report.rule, Some(CollisionRule::LeftGoal));
        assert_eq!(report.scored, Some(PlayerSide::Two));
        assert_eq!(w.scores(), (0, 1));
        assert_eq!(w.ball.rect().x, 316);
        assert_eq!(w.ball.x_vel, 5);
    }

    #[test]
    fn ball_reaching_right_wall_scores_for_player_one() {
        let mut w = world();
        w.ball.sprite.rect = Rect::new(630, 100, 8, 8);
        w.ball.x_vel = 5;
        let report = w.tick(&idle());
        assert_eq!(report.rule, Some(CollisionRule::RightGoal));
        assert_eq!(report.scored, Some(PlayerSide::One));
        assert_eq!(w.scores(), (1, 0));
    }

    #[test]
    fn goal_scores_exactly_once() {
        let mut w = world();
        w.ball.sprite.rect = Rect::new(2, 100, 8, 8);
        w.ball.x_vel = -5;
        w.ball.y_vel = 0;
        let mut goals = 0;
        for _ in 0..3 {
            if w.tick(&idle()).scored.is_some() {
                goals += 1;
            }
        }
        assert_eq!(goals, 1);
        assert_eq!(w.scores(), (0, 1));
    }

    #[test]
    fn wall_contact_flips_vertical_only() {
        let mut w = world();
        w.ball.sprite.rect = Rect::new(300, 3, 8, 8);
        w.ball.x_vel = 5;
        w.ball.y_vel = -5;
        let report = w.tick(&idle());
        assert_eq!(report.rule, Some(CollisionRule::Wall));
        assert_eq!(w.ball.rect().y, 0);
        assert_eq!(w.ball.y_vel, 5);
        assert_eq!(w.ball.x_vel, 5);

        w.ball.sprite.rect = Rect::new(300, 470, 8, 8);
        w.ball.y_vel = 4;
        w.tick(&idle());
        assert_eq!(w.ball.rect().bottom(), 480);
        assert_eq!(w.ball.y_vel, -4);
        assert_eq!(w.ball.x_vel, 5);
    }

    #[test]
    fn paddle_one_hit_snaps_ball_flush_and_reverses() {
        let mut w = world();
        park_paddle2(&mut w);
        // Paddle 1 sits at x=20, y=216, 20x48.
        w.ball.sprite.rect = Rect::new(310, 220, 8, 8);
        w.ball.x_vel = -5;
        w.ball.y_vel = 0;

        let mut ticks = 0;
        let report = loop {
            let report = w.tick(&idle());
            ticks += 1;
            if report.rule.is_some() {
                break report;
            }
            assert!(ticks < 200, "ball never reached paddle 1");
        };

        assert_eq!(report.rule, Some(CollisionRule::Paddle1));
        assert_eq!(ticks, 55);
        let paddle = w.player(PlayerSide::One).paddle.rect();
        assert_eq!(w.ball.x_vel, 5);
        assert_eq!(w.ball.rect().x, paddle.right());
        assert_eq!(w.ball.rect().x, paddle.x + paddle.width - 1 + 1);
        assert!(w.ball.y_vel.abs() <= 5);
        assert_eq!(w.scores(), (0, 0));
    }

    #[test]
    fn paddle_two_hit_snaps_ball_to_left_edge() {
        let mut w = world();
        w.ball.sprite.rect = Rect::new(590, 230, 8, 8);
        w.ball.x_vel = 5;
        w.ball.y_vel = 0;
        let report = w.tick(&idle());
        assert_eq!(report.rule, Some(CollisionRule::Paddle2));
        assert_eq!(w.ball.rect().x, 600 - 8);
        assert_eq!(w.ball.x_vel, -5);
    }

    #[test]
    fn fast_ball_does_not_tunnel_through_paddle() {
        let mut w = world();
        park_paddle2(&mut w);
        w.ball.sprite.rect = Rect::new(45, 230, 8, 8);
        w.ball.x_vel = -10;
        w.ball.y_vel = 0;
        let report = w.tick(&idle());
        assert_eq!(report.rule, Some(CollisionRule::Paddle1));
        assert_eq!(w.ball.rect().x, 40);
        assert!(w.ball.x_vel > 0);
    }

    #[test]
    fn held_keys_move_paddles_within_field() {
        let mut w = world();
        let input = TickInput {
            paddle1: PaddleIntent {
                up: true,
                down: false,
            },
            paddle2: PaddleIntent {
                up: false,
                down: true,
            },
            restart: false,
        };
        w.tick(&input);
        assert_eq!(w.player(PlayerSide::One).paddle.rect().y, 206);
        assert_eq!(w.player(PlayerSide::Two).paddle.rect().y, 226);
        for _ in 0..100 {
            w.tick(&input);
        }
        assert_eq!(w.player(PlayerSide::One).paddle.rect().y, 0);
        assert_eq!(w.player(PlayerSide::Two).paddle.rect().bottom(), 480);

        w.tick(&idle());
        assert_eq!(w.player(PlayerSide::One).paddle.y_vel, 0);
        assert_eq!(w.player(PlayerSide::Two).paddle.y_vel, 0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let both = PaddleIntent {
            up: true,
            down: true,
        };
        assert_eq!(both.velocity(10), 0);
    }

    #[test]
    fn restart_zeroes_scores_and_positions() {
        let mut w = world();
        w.player_mut(PlayerSide::One).score = 4;
        w.player_mut(PlayerSide::Two).score = 2;
        w.player_mut(PlayerSide::One).paddle.sprite.rect.y = 0;
        w.ball.x_vel = -5;
        w.restart();
        assert_eq!(w.scores(), (0, 0));
        assert_eq!(w.player(PlayerSide::One).paddle.rect().y, 216);
        assert_eq!(w.ball.rect().x, 316);
        assert_eq!(w.ball.x_vel, 5);
    }

    #[test]
    fn restart_input_is_reported() {
        let mut w = world();
        w.player_mut(PlayerSide::Two).score = 3;
        let report = w.tick(&TickInput {
            restart: true,
            ..TickInput::default()
        });
        assert!(report.restarted);
        assert_eq!(w.scores(), (0, 0));
    }

    #[test]
    fn score_sprite_is_centred_in_its_half() {
        let mut w = world();
        w.set_score_size(PlayerSide::One, 30, 40);
        w.set_score_size(PlayerSide::Two, 30, 40);
        assert_eq!(w.player(PlayerSide::One).score_sprite.rect, Rect::new(145, 16, 30, 40));
        assert_eq!(w.player(PlayerSide::Two).score_sprite.rect, Rect::new(465, 16, 30, 40));

        w.set_score_size(PlayerSide::Two, 2000, 40);
        let rect = w.player(PlayerSide::Two).score_sprite.rect;
        assert_eq!(rect.width, 640);
        assert!(rect.is_within(&w.field()));
    }

    #[test]
    fn every_sprite_stays_in_field_over_long_run() {
        let mut w = world();
        let inputs = [
            TickInput::default(),
            TickInput {
                paddle1: PaddleIntent {
                    up: true,
                    down: false,
                },
                ..TickInput::default()
            },
            TickInput {
                paddle2: PaddleIntent {
                    up: false,
                    down: true,
                },
                ..TickInput::default()
            },
        ];
        for i in 0..5000 {
            w.tick(&inputs[i % inputs.len()]);
            for sprite in w.sprites() {
                assert!(sprite.rect.is_within(&w.field()), "{:?}", sprite);
            }
        }
        assert_eq!(w.tick_count(), 5000);
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = world();
        let mut b = world();
        for _ in 0..2000 {
            let ra = a.tick(&idle());
            let rb = b.tick(&idle());
            assert_eq!(ra, rb);
        }
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.scores(), b.scores());
    }
}
