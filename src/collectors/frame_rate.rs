//! Frame-rate accumulation over a fixed update interval

/// Lower bound on the measured interval, keeps fps finite
pub const MIN_INTERVAL_SECS: f32 = 0.0001;

/// Average fps for `frames` rendered over `elapsed` seconds
pub fn frames_per_second(frames: u32, elapsed: f32) -> f32 {
    frames as f32 / elapsed.max(MIN_INTERVAL_SECS)
}

/// Elapsed time and frame count since the last flush
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRateState {
    update_interval: f32,
    elapsed: f32,
    frames: u32,
}

impl FrameRateState {
    pub fn new(update_interval: f32) -> Self {
        Self {
            update_interval,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Advance by one frame that took `delta` seconds.
    /// Returns the interval's average fps when the interval has elapsed.
    ///
    /// The flushing frame isn't counted and its delta isn't measured, so the
    /// frame count and the elapsed time always cover the same span.
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        let measured = self.elapsed;
        self.elapsed += delta;

        if self.elapsed > self.update_interval {
            let fps = frames_per_second(self.frames, measured);
            self.frames = 0;
            self.elapsed = 0.0;
            Some(fps)
        } else {
            self.frames += 1;
            None
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}
