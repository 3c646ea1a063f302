//! Fixed logical tick rate, decoupled from the render cadence
//!
//! Frame time accumulates and is spent in whole ticks. The per-tick constants
//! in [`PhysicsConfig`](crate::PhysicsConfig) assume [`DEFAULT_TICK_RATE`].

/// Logical ticks per second
pub const DEFAULT_TICK_RATE: f32 = 60.0;

/// Upper bound on ticks run for a single frame
pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 8;

/// Accumulator that converts frame time into a tick count
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    /// Logical ticks per second
    pub tick_rate: f32,
    /// Backlog beyond this many ticks is dropped
    pub max_ticks_per_frame: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}

impl FixedTimestep {
    /// Create a timestep with the given tick rate
    ///
    /// Non-positive or non-finite rates fall back to the default.
    pub fn new(tick_rate: f32) -> Self {
        let tick_rate = if tick_rate > 0.0 && tick_rate.is_finite() {
            tick_rate
        } else {
            log::warn!("invalid tick rate {}; using {}", tick_rate, DEFAULT_TICK_RATE);
            DEFAULT_TICK_RATE
        };
        Self {
            tick_rate,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
            accumulator: 0.0,
        }
    }

    /// Builder: set the per-frame tick cap
    pub fn with_max_ticks_per_frame(mut self, max: u32) -> Self {
        self.max_ticks_per_frame = max.max(1);
        self
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Unspent time carried to the next frame, in seconds
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Add a frame's elapsed time and return how many ticks to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt > 0.0 && frame_dt.is_finite() {
            self.accumulator += frame_dt;
        }

        let step = self.step();
        let mut ticks = 0;
        while self.accumulator >= step && ticks < self.max_ticks_per_frame {
            self.accumulator -= step;
            ticks += 1;
        }

        if self.accumulator >= step {
            let dropped = (self.accumulator / step) as u32;
            log::debug!("dropping {} ticks of backlog", dropped);
            self.accumulator %= step;
        }

        ticks
    }

    /// Fraction of a tick left in the accumulator, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step()
    }

    /// Discard any accumulated time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
