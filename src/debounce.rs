//! Debounce controller.
//!
//! Coalesces bursts of values into a single delayed delivery under a
//! single-threaded cooperative timer model: the owner supplies the current
//! [`Instant`] on every call and polls for expiry from its event loop. There is
//! no background thread and no locking; the pending timer is plain owned state.
//!
//! - [`Debouncer`] is the bare timer: `schedule`, `cancel`, `poll`. This is the
//!   form [`AppState`](crate::state::AppState) drives, since applying a search
//!   needs `&mut` access to the state that owns the timer.
//! - [`Debounced`] binds a handler to a `Debouncer` and invokes it on expiry,
//!   for owners whose handler does not borrow the owner itself.

use std::fmt::Display;
use std::time::{Duration, Instant};
use tracing::{trace, warn};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Owned cancellable timer holding the most recent value.
///
/// # Guarantees
/// - At most one value is pending at any time; `schedule` replaces it.
/// - Every `schedule` pushes the deadline to `now + delay`.
/// - `poll` yields the pending value once, and only when its deadline passed.
/// - After `cancel` nothing is delivered until the next `schedule`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Debouncer with nothing pending.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet period a value must survive before it is delivered.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the quiet period at `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        let deadline = now + self.delay;
        trace!(delay_ms = self.delay.as_millis() as u64, "Debounce rescheduled");
        self.pending = Some(Pending { value, deadline });
    }

    /// Drop the pending value, if any. Returns whether something was dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// True if a value is waiting for its deadline.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The value that will be delivered, without taking it.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// Instant at which the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Time left before the pending value is due. Zero if already due.
    ///
    /// Event loops use this as their wait timeout.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Take the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Take the pending value immediately, regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }
}

/// A handler bound to a debounce timer.
///
/// `emit` schedules `handler(value)`; `fire_due` runs it when the quiet period
/// has elapsed. The pending state is cleared before the handler runs, so a
/// handler error never leaves the timer in a stale state: the error is logged
/// and the next `emit` schedules normally.
///
/// Dropping a `Debounced` discards any pending invocation.
pub struct Debounced<T, F> {
    timer: Debouncer<T>,
    handler: F,
}

impl<T, F> Debounced<T, F> {
    /// Wrap `handler` behind a quiet period of `delay`.
    pub fn new(delay: Duration, handler: F) -> Self {
        Self {
            timer: Debouncer::new(delay),
            handler,
        }
    }

    /// Schedule the handler with `value`, cancelling any earlier schedule.
    pub fn emit(&mut self, value: T, now: Instant) {
        self.timer.schedule(value, now);
    }

    /// Drop any pending invocation.
    pub fn cancel(&mut self) -> bool {
        self.timer.cancel()
    }

    /// True while an emitted value is waiting to be delivered.
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Time left before the pending value is due, if any.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }
}

impl<T, F, E> Debounced<T, F>
where
    F: FnMut(T) -> Result<(), E>,
    E: Display,
{
    /// Invoke the handler if the pending value is due.
    ///
    /// Returns `true` if the handler ran, whether or not it succeeded.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        let Some(value) = self.timer.poll(now) else {
            return false;
        };
        if let Err(e) = (self.handler)(value) {
            warn!(error = %e, "Debounced handler failed");
        }
        true
    }
}

impl<T, F> std::fmt::Debug for Debounced<T, F>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
