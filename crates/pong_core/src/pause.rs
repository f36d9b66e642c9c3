//! Pause and single-step control for the simulation.

use crate::world::{TickInput, TickReport, World};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseState {
    paused: bool,
    step_pending: bool,
}

impl PauseState {
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle(&mut self) {
        self.paused = !self.paused;
        self.step_pending = false;
        log::info!("Simulation {}", if self.paused { "PAUSED" } else { "RESUMED" });
    }

    /// Let exactly one tick through while paused.
    pub fn request_step(&mut self) {
        if self.paused {
            self.step_pending = true;
        }
    }

    /// Consume one pacing tick's worth of input.
    ///
    /// Running (or stepping) ticks the world. While paused the world holds
    /// still, but a restart request is still applied so the press is not
    /// dropped when the caller clears edge-triggered keys.
    pub fn advance(&mut self, world: &mut World, input: &TickInput) -> TickReport {
        if !self.paused || self.step_pending {
            self.step_pending = false;
            return world.tick(input);
        }
        let mut report = TickReport::default();
        if input.restart {
            world.restart();
            report.restarted = true;
        }
        report
    }
}
