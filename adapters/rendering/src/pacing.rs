use std::time::Duration;

/// Converts elapsed frame time into a number of generator steps.
///
/// Time accumulates across frames so slow frames catch up, bounded by
/// `max_steps_per_frame` to keep a stalled window from replaying a burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepPacer {
    interval: Duration,
    max_steps_per_frame: u32,
    accumulated: Duration,
}

impl StepPacer {
    /// Default delay between two generator steps.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

    /// Default cap on steps taken during one frame.
    pub const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 64;

    /// Creates a pacer that releases one step every `interval`.
    ///
    /// A zero interval releases exactly one step per frame.
    #[must_use]
    pub const fn new(interval: Duration, max_steps_per_frame: u32) -> Self {
        Self {
            interval,
            max_steps_per_frame: if max_steps_per_frame == 0 {
                1
            } else {
                max_steps_per_frame
            },
            accumulated: Duration::ZERO,
        }
    }

    /// Delay between two steps.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Adds `frame_dt` to the budget and returns how many steps are now due.
    pub fn advance(&mut self, frame_dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }

        self.accumulated = self.accumulated.saturating_add(frame_dt);
        let mut due = 0;
        while self.accumulated >= self.interval && due < self.max_steps_per_frame {
            self.accumulated -= self.interval;
            due += 1;
        }
        if due == self.max_steps_per_frame {
            self.accumulated = self.accumulated.min(self.interval);
        }
        due
    }
}

impl Default for StepPacer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Self::DEFAULT_MAX_STEPS_PER_FRAME)
    }
}
