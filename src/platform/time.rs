//! Frame pacing
//!
//! The scheduler runs one `update` per frame at most `max_frame_rate` times
//! per second: it measures the work, sleeps whatever is left of the frame
//! budget, then hands the measured delta to the next `update`.

use std::time::{Duration, Instant};

/// Frames kept for the rolling FPS counter
const FPS_WINDOW: usize = 60;

/// Time left in a frame after `work`, zero if the frame overran
pub fn remaining_budget(budget: Duration, work: Duration) -> Duration {
    budget.saturating_sub(work)
}

#[derive(Debug, Clone)]
pub struct FramePacer {
    budget: Duration,
    last_frame: Option<Instant>,
    /// Ring of recent frame deltas (seconds)
    frame_times: [f32; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
}

impl FramePacer {
    /// Pacer for `max_frame_rate` frames per second (clamped to at least 1)
    pub fn new(max_frame_rate: f32) -> Self {
        let rate = max_frame_rate.max(1.0);
        Self {
            budget: Duration::from_secs_f64(1.0 / f64::from(rate)),
            last_frame: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Seconds since the previous call; the first call returns one budget
    pub fn next_delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = match self.last_frame {
            Some(last) => now.duration_since(last).as_secs_f32(),
            None => self.budget.as_secs_f32(),
        };
        self.last_frame = Some(now);
        self.record(dt);
        dt
    }

    fn record(&mut self, dt: f32) {
        self.frame_times[self.frame_index] = dt;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen = (self.frames_seen + 1).min(FPS_WINDOW);
    }

    /// Sleep out the rest of a frame that started at `frame_start`
    pub fn wait(&self, frame_start: Instant) {
        let rest = remaining_budget(self.budget, frame_start.elapsed());
        if !rest.is_zero() {
            std::thread::sleep(rest);
        }
    }

    /// Rolling average over the last frames
    pub fn fps(&self) -> u32 {
        if self.frames_seen == 0 {
            return 0;
        }
        let total: f32 = self.frame_times[..self.frames_seen].iter().sum();
        if total <= 0.0 {
            return 0;
        }
        (self.frames_seen as f32 / total).round() as u32
    }
}
