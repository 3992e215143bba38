//! Cooldown timers
//!
//! Timestamps are milliseconds from the game clock. The simulation never
//! reads a clock itself; callers pass `now` in.

/// Rate limiter: ready once `cooldown_ms` has elapsed since the last reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// May drop to zero or below, in which case the timer is always ready
    pub cooldown_ms: i64,
    pub last_update: u64,
}

impl Timer {
    pub fn new(cooldown_ms: i64, now: u64) -> Self {
        Self {
            cooldown_ms,
            last_update: now,
        }
    }

    pub fn is_ready(&self, now: u64) -> bool {
        let since = now as i64 - self.last_update as i64;
        since >= self.cooldown_ms
    }

    pub fn reset(&mut self, now: u64) {
        self.last_update = now;
    }

    /// If ready, reset and return true
    pub fn fire(&mut self, now: u64) -> bool {
        if self.is_ready(now) {
            self.reset(now);
            true
        } else {
            false
        }
    }

    /// Lower the cooldown, optionally stopping at `floor`
    pub fn shorten(&mut self, decrement_ms: i64, floor: Option<i64>) {
        let next = self.cooldown_ms - decrement_ms;
        self.cooldown_ms = match floor {
            Some(floor) => next.max(floor.min(self.cooldown_ms)),
            None => next,
        };
    }
}
