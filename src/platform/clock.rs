//! Frame pacing

/// Blocks until the next frame boundary and reports the frame's length
pub trait FrameClock {
    /// Wait for the next frame at `target_fps`; returns elapsed seconds
    fn tick(&mut self, target_fps: u32) -> f32;
}

/// Never waits; every frame is exactly 1 / fps long.
/// For tests and headless runs that should go as fast as possible.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    pub frames: u64,
}

impl FrameClock for FixedClock {
    fn tick(&mut self, target_fps: u32) -> f32 {
        self.frames += 1;
        1.0 / target_fps.max(1) as f32
    }
}

/// Sleeps out the remainder of each frame
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct SleepClock {
    last: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SleepClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SleepClock {
    pub fn new() -> Self {
        Self {
            last: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameClock for SleepClock {
    fn tick(&mut self, target_fps: u32) -> f32 {
        use std::time::{Duration, Instant};

        let frame = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let elapsed = self.last.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt.as_secs_f32()
    }
}
