//! Rolling one-second window of completed ticks.

use std::time::Duration;

const WINDOW: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FpsWindow {
    elapsed: Duration,
    ticks: u32,
    current: u32,
}

impl FpsWindow {
    /// Adds wall time and completed ticks, publishing once a second has passed.
    pub(crate) fn record(&mut self, elapsed: Duration, ticks: u32) -> Option<u32> {
        self.elapsed = self.elapsed.saturating_add(elapsed);
        self.ticks = self.ticks.saturating_add(ticks);
        if self.elapsed < WINDOW {
            return None;
        }

        self.current = self.ticks;
        self.elapsed = Duration::ZERO;
        self.ticks = 0;
        Some(self.current)
    }

    pub(crate) fn current(&self) -> u32 {
        self.current
    }
}
