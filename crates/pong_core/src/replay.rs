use crate::config::{GameConfig, SpriteSizes};
use crate::world::{PaddleIntent, TickInput, TickReport, World};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A scripted input sequence that drives a [`World`] tick by tick.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default)]
    pub seed: u64,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub p1_up: bool,
    #[serde(default)]
    pub p1_down: bool,
    #[serde(default)]
    pub p2_up: bool,
    #[serde(default)]
    pub p2_down: bool,
    #[serde(default)]
    pub restart: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<TickInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for i in 0..frame.repeat.max(1) {
                out.push(TickInput {
                    paddle1: PaddleIntent {
                        up: frame.p1_up,
                        down: frame.p1_down,
                    },
                    paddle2: PaddleIntent {
                        up: frame.p2_up,
                        down: frame.p2_down,
                    },
                    // Restart is a key press, so it only fires on the first repeat.
                    restart: frame.restart && i == 0,
                });
            }
        }
        out
    }

    /// Play the whole sequence on a fresh world.
    pub fn run(&self, config: GameConfig, sizes: SpriteSizes) -> (World, Vec<TickReport>) {
        let mut world = World::new(config, sizes, self.seed);
        let reports = self
            .expanded_inputs()
            .iter()
            .map(|input| world.tick(input))
            .collect();
        (world, reports)
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_replay(&raw).map_err(|e| format!("{} ({})", e, path.display()))
}

pub fn parse_replay(raw: &str) -> Result<ReplaySequence, String> {
    let replay: ReplaySequence =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse replay JSON: {e}"))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::PlayerSide;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "pong_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "seed": 3,
              "frames": [
                { "p1_up": true, "repeat": 3 },
                { "restart": true, "repeat": 2 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 5);
        assert!(expanded[0].paddle1.up);
        assert!(expanded[3].restart);
        assert!(!expanded[4].restart);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let err = parse_replay(r#"{ "frames": [] }"#).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = temp_file_path("missing");
        let err = load_replay_from_path(&path).expect_err("missing file should fail");
        assert!(err.contains("pong_replay_test_missing"));
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay = parse_replay(
            r#"{
              "seed": 42,
              "frames": [
                { "p1_down": true, "repeat": 40 },
                { "p2_up": true, "repeat": 90 },
                { "p1_up": true, "p2_down": true, "repeat": 300 },
                { "repeat": 600 }
              ]
            }"#,
        )
        .expect("replay should parse");

        let (world_a, reports_a) = replay.run(GameConfig::default(), SpriteSizes::default());
        let (world_b, reports_b) = replay.run(GameConfig::default(), SpriteSizes::default());

        assert_eq!(reports_a, reports_b);
        assert_eq!(world_a.ball, world_b.ball);
        assert_eq!(world_a.scores(), world_b.scores());
        assert_eq!(world_a.tick_count(), 1030);
    }

    #[test]
    fn scores_track_goals_and_restart_clears() {
        let replay = parse_replay(
            r#"{
              "seed": 9,
              "frames": [
                { "p1_up": true, "p2_up": true, "repeat": 30 },
                { "repeat": 2000 },
                { "restart": true }
              ]
            }"#,
        )
        .expect("replay should parse");

        let mut world = World::new(GameConfig::default(), SpriteSizes::default(), replay.seed);
        let mut goals = 0;
        let mut restarted = false;
        for input in replay.expanded_inputs() {
            let report = world.tick(&input);
            if report.scored.is_some() {
                goals += 1;
                let (one, two) = world.scores();
                assert_eq!(one + two, goals);
            }
            restarted |= report.restarted;
        }
        assert!(restarted);
        assert_eq!(world.scores(), (0, 0));
        assert_eq!(world.player(PlayerSide::One).paddle.rect().y, 216);
    }
}
