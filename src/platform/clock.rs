//! Frame clocks
//!
//! Time is milliseconds since the clock was created. The simulation never
//! reads a clock itself; the frame loop passes `now()` down.

use std::thread;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Milliseconds since start
    fn now(&self) -> u64;

    /// Milliseconds elapsed since `t`
    fn ticks_since(&self, t: u64) -> u64 {
        self.now().saturating_sub(t)
    }

    /// End the current frame, pacing the loop to `frame_rate`
    fn tick(&mut self, frame_rate: u32);
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now(&self) -> u64 {
        (**self).now()
    }

    fn tick(&mut self, frame_rate: u32) {
        (**self).tick(frame_rate)
    }
}

fn frame_period_ms(frame_rate: u32) -> u64 {
    1000 / u64::from(frame_rate.max(1))
}

/// Wall clock; sleeps away whatever is left of each frame
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
    frame_start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_start: now,
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn tick(&mut self, frame_rate: u32) {
        let period = Duration::from_millis(frame_period_ms(frame_rate));
        let spent = self.frame_start.elapsed();
        if let Some(rest) = period.checked_sub(spent) {
            thread::sleep(rest);
        }
        // No catch-up for slow frames
        self.frame_start = Instant::now();
    }
}

/// Deterministic clock that advances exactly one frame per tick
#[derive(Debug, Clone, Default)]
pub struct FixedStepClock {
    now: u64,
}

impl FixedStepClock {
    pub fn new(start: u64) -> Self {
        Self { now: start }
    }
}

impl Clock for FixedStepClock {
    fn now(&self) -> u64 {
        self.now
    }

    fn tick(&mut self, frame_rate: u32) {
        self.now += frame_period_ms(frame_rate);
    }
}
