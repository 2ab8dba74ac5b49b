//! Variable-timestep frame clock.
//!
//! Every displayed frame advances the simulation by the wall-clock time since
//! the previous frame. There is no accumulator and no clamping; unusually
//! long frames are only reported.

use std::time::Instant;
use tracing::warn;

/// Length of the window the FPS estimate is averaged over, in seconds.
pub const FPS_WINDOW: f64 = 1.0;

/// Measures per-frame `dt` and keeps frame statistics.
pub struct FrameClock {
    previous_time: Instant,
    long_frame_warn_s: f64,
    frame_count: u64,
    total_time: f64,
    window_time: f64,
    window_frames: u32,
    fps: f64,
    fps_updated: bool,
}

impl FrameClock {
    /// A clock starting now. Frames longer than `long_frame_warn_s` are
    /// logged at `warn`.
    pub fn new(long_frame_warn_s: f64) -> Self {
        Self {
            previous_time: Instant::now(),
            long_frame_warn_s,
            frame_count: 0,
            total_time: 0.0,
            window_time: 0.0,
            window_frames: 0,
            fps: 0.0,
            fps_updated: false,
        }
    }

    /// Measure the time since the previous tick and record it.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(dt)
    }

    /// Record a frame of length `dt` seconds and return it unchanged.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if dt > self.long_frame_warn_s {
            warn!(
                "Frame time {:.1}ms exceeds {:.1}ms",
                dt * 1000.0,
                self.long_frame_warn_s * 1000.0
            );
        }

        self.frame_count += 1;
        self.total_time += dt;
        self.window_time += dt;
        self.window_frames += 1;
        if self.window_time >= FPS_WINDOW {
            self.fps = f64::from(self.window_frames) / self.window_time;
            self.window_time = 0.0;
            self.window_frames = 0;
            self.fps_updated = true;
        }
        dt
    }

    /// The new FPS estimate if one was produced since the last call.
    pub fn take_fps_update(&mut self) -> Option<f64> {
        std::mem::take(&mut self.fps_updated).then_some(self.fps)
    }

    /// Frames per second over the last complete window, `0.0` before the
    /// first window closes.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Returns the total number of frames ticked.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the summed frame time in seconds.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25)
    }
}
