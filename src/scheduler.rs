use std::time::{Duration, Instant};

/// Host-side tick timing. The scheduler holds the deadline of the next tick;
/// the caller supplies the current time so it never reads a clock itself.
#[derive(Clone, Debug, Default)]
pub struct TickScheduler {
    next_due: Option<Instant>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tick is due once its deadline has passed, or immediately if none is set.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.next_due {
            Some(due) => now >= due,
            None => true,
        }
    }

    pub fn schedule_after(&mut self, now: Instant, interval: Duration) {
        self.next_due = Some(now + interval);
    }

    /// Makes the next check due straight away.
    pub fn clear(&mut self) {
        self.next_due = None;
    }

    /// How long the host may sleep before the next tick is due, capped at `max`.
    pub fn wait_time(&self, now: Instant, max: Duration) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now).min(max),
            None => Duration::ZERO,
        }
    }
}
