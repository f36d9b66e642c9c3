//! Simulation core for foobarpong: play-field geometry, sprites, the world
//! and its ordered collision rules, keyboard state and frame pacing.
//!
//! Nothing in this crate touches the window or the GPU, so the whole game
//! can be driven headless from tests or replays.

pub mod config;
pub mod geometry;
pub mod input;
pub mod pause;
pub mod replay;
pub mod rules;
pub mod scoreboard;
pub mod sprite;
pub mod time;
pub mod world;

pub use config::{GameConfig, SpriteSizes};
pub use geometry::{Field, Rect};
pub use pause::PauseState;
pub use rules::CollisionRule;
pub use scoreboard::{ScoreBoard, StaleScore};
pub use sprite::{Character, Sprite, SpriteKey};
pub use world::{PaddleIntent, Player, PlayerSide, TickInput, TickReport, World};
