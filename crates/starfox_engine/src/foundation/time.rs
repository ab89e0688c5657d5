//! Time management utilities

use std::time::Instant;

/// One invocation of the per-frame update, nominally once per rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Zero-based frame index
    pub frame: u64,

    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameTick {
    /// Create a tick for the given frame index
    pub fn new(frame: u64, delta: f32) -> Self {
        Self { frame, delta }
    }
}

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame) and return the tick
    pub fn update(&mut self) -> FrameTick {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.advance(now)
    }

    /// Advance by a fixed step instead of wall-clock time
    pub fn step(&mut self, delta: f32) -> FrameTick {
        self.delta_time = delta;
        self.advance(Instant::now())
    }

    fn advance(&mut self, now: Instant) -> FrameTick {
        let tick = FrameTick::new(self.frame_count, self.delta_time);
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        tick
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
