use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

/// Default tick period: roughly 30 simulation steps per second.
pub const TICK_PERIOD: Duration = Duration::from_millis(33);

/// Frame pacing for the game loop.
///
/// A tick runs when at least `tick_period` has elapsed since the previous
/// one. Missed ticks are dropped rather than caught up, so the simulation
/// never runs faster than one tick per period regardless of how often the
/// host wakes the loop.
pub struct TimeState {
    pub tick_period: Duration,
    pub stall_warning: Duration,
    last_tick: Instant,
    last_instant: Instant,
    pub tick_count: u64,
    pub frame_count: u64,
    pub ticked_this_frame: bool,
    pub real_dt: f64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        let period = TICK_PERIOD.as_secs_f64();
        Self {
            tick_period: TICK_PERIOD,
            stall_warning: Duration::from_millis(250),
            last_tick: now,
            last_instant: now,
            tick_count: 0,
            frame_count: 0,
            ticked_this_frame: false,
            real_dt: 0.0,
            fps_samples: [period; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / period,
            smoothed_frame_time_ms: period * 1000.0,
        }
    }

    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    pub fn begin_frame_at(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_instant);
        self.last_instant = now;
        self.real_dt = dt.as_secs_f64();
        self.ticked_this_frame = false;
        self.frame_count += 1;

        if dt > self.stall_warning {
            log::warn!(
                "Frame took {:.1}ms; dropping missed ticks",
                self.real_dt * 1000.0
            );
        }
    }

    /// True at most once per frame, and only when a full period has passed
    /// since the previous tick.
    pub fn should_tick(&mut self) -> bool {
        if self.ticked_this_frame {
            return false;
        }
        if self.last_instant.saturating_duration_since(self.last_tick) < self.tick_period {
            return false;
        }

        let tick_dt = self
            .last_instant
            .saturating_duration_since(self.last_tick)
            .as_secs_f64();
        self.last_tick = self.last_instant;
        self.tick_count += 1;
        self.ticked_this_frame = true;

        // FPS smoothing tracks processed ticks, which is what the player sees.
        self.fps_samples[self.fps_sample_index] = tick_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
        true
    }

    /// When the loop should wake up for the next tick.
    pub fn next_tick_at(&self) -> Instant {
        self.last_tick + self.tick_period
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tick_before_period_elapses() {
        let start = Instant::now();
        let mut time = TimeState::starting_at(start);
        time.begin_frame_at(start + Duration::from_millis(10));
        assert!(!time.should_tick());
        time.begin_frame_at(start + Duration::from_millis(32));
        assert!(!time.should_tick());
        assert_eq!(time.tick_count, 0);
        assert_eq!(time.frame_count, 2);
    }

    #[test]
    fn ticks_once_period_elapses() {
        let start = Instant::now();
        let mut time = TimeState::starting_at(start);
        time.begin_frame_at(start + Duration::from_millis(34));
        assert!(time.should_tick());
        assert_eq!(time.tick_count, 1);
        assert!(time.ticked_this_frame);
    }

    #[test]
    fn at_most_one_tick_per_frame_after_stall() {
        let start = Instant::now();
        let mut time = TimeState::starting_at(start);
        time.begin_frame_at(start + Duration::from_secs(2));
        assert!(time.should_tick());
        assert!(!time.should_tick());
        assert_eq!(time.tick_count, 1);

        // Missed ticks are not replayed on the following frame.
        time.begin_frame_at(start + Duration::from_secs(2) + Duration::from_millis(1));
        assert!(!time.should_tick());
    }

    #[test]
    fn simulation_capped_near_thirty_hz() {
        let start = Instant::now();
        let mut time = TimeState::starting_at(start);
        // A 240 Hz host for one second.
        for frame in 1..=240u64 {
            time.begin_frame_at(start + Duration::from_micros(frame * 4_167));
            time.should_tick();
        }
        assert!(time.tick_count <= 31, "ticked {} times", time.tick_count);
        assert!(time.tick_count >= 25, "ticked {} times", time.tick_count);
    }

    #[test]
    fn next_tick_follows_last_tick() {
        let start = Instant::now();
        let mut time = TimeState::starting_at(start);
        assert_eq!(time.next_tick_at(), start + TICK_PERIOD);
        let later = start + Duration::from_millis(40);
        time.begin_frame_at(later);
        assert!(time.should_tick());
        assert_eq!(time.next_tick_at(), later + TICK_PERIOD);
    }

    #[test]
    fn fps_tracks_tick_rate() {
        let start = Instant::now();
        let mut time = TimeState::starting_at(start);
        for i in 1..=120u64 {
            time.begin_frame_at(start + Duration::from_millis(i * 50));
            assert!(time.should_tick());
        }
        assert!((time.smoothed_fps - 20.0).abs() < 0.01);
        assert!((time.smoothed_frame_time_ms - 50.0).abs() < 0.01);
    }
}
