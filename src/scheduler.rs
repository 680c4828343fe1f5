use std::time::{Duration, Instant};

/// A fixed-timestep clock for the snake.
///
/// Elapsed time is accumulated between polls, and a poll reports a due tick
/// once a full interval has built up.  At most one tick is reported per
/// poll, and at most one interval of backlog is kept, so a stalled loop
/// catches up by a single step instead of a burst.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Scheduler {
    interval: Duration,
    last_poll: Option<Instant>,
    accumulated: Duration,
}

impl Scheduler {
    pub(crate) fn new() -> Scheduler {
        Scheduler::default()
    }

    pub(crate) fn is_running(&self) -> bool {
        self.last_poll.is_some()
    }

    /// Start counting from `now`, ticking every `interval`.  Any previous
    /// backlog is discarded.
    pub(crate) fn start(&mut self, now: Instant, interval: Duration) {
        tracing::trace!(?interval, "Starting tick scheduler");
        self.interval = interval;
        self.last_poll = Some(now);
        self.accumulated = Duration::ZERO;
    }

    pub(crate) fn stop(&mut self) {
        self.last_poll = None;
        self.accumulated = Duration::ZERO;
    }

    /// Account for the time elapsed up to `now` and return whether a tick is
    /// due.  Always `false` while stopped.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_poll else {
            return false;
        };
        self.last_poll = Some(now);
        self.accumulated = self
            .accumulated
            .saturating_add(now.saturating_duration_since(last));
        if self.accumulated >= self.interval {
            self.accumulated = self
                .accumulated
                .saturating_sub(self.interval)
                .min(self.interval);
            true
        } else {
            false
        }
    }

    /// Return how long after `now` the next tick will be due, or `None` if
    /// stopped
    pub(crate) fn time_until_next(&self, now: Instant) -> Option<Duration> {
        let last = self.last_poll?;
        let pending = self
            .accumulated
            .saturating_add(now.saturating_duration_since(last));
        Some(self.interval.saturating_sub(pending))
    }
}
