use std::time::Duration;

/// A whole-second countdown driven by an external one-second timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    total_secs: u32,
    remaining_secs: u32,
}

impl Countdown {
    /// Interval the owner should call [`Countdown::tick`] at.
    pub const TICK: Duration = Duration::from_secs(1);

    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
        }
    }

    /// Advance one second. Returns `true` on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        self.remaining_secs == 0
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn reset(&mut self) {
        self.remaining_secs = self.total_secs;
    }

    /// Fraction of the countdown already elapsed, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        f64::from(self.total_secs - self.remaining_secs) / f64::from(self.total_secs)
    }

    /// `mm:ss`
    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}
