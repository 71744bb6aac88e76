//! Repeating timer

use serde::{Deserialize, Serialize};

/// Fires every `period` seconds of simulated time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatTimer {
    pub period: f32,
    elapsed: f32,
}

impl RepeatTimer {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` and return how many times the timer fired.
    /// The fractional remainder carries over to the next call.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        if self.elapsed < self.period {
            return 0;
        }
        let periods = (self.elapsed / self.period).floor();
        self.elapsed = (self.elapsed - periods * self.period).clamp(0.0, self.period);
        if self.elapsed >= self.period {
            self.elapsed = 0.0;
        }
        // Float-to-int casts saturate
        periods as u32
    }
}
