//! One-shot and repeating timers on the monotonic clock, polled from the
//! frame loop.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<E> {
    id: TimerId,
    deadline: Instant,
    period: Option<Duration>,
    event: E,
}

/// A timer returned by [`Timers::poll`]. `deadline` is when it was due, not
/// when it was polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub deadline: Instant,
    pub event: E,
}

/// Deadline queue. Events are returned by [`poll`](Self::poll) in deadline
/// order, ties broken by creation order.
#[derive(Debug)]
pub struct Timers<E> {
    entries: Vec<Entry<E>>,
    next_id: u64,
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Self { entries: Vec::new(), next_id: 0 }
    }
}

impl<E: Clone> Timers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires `event` once, `delay` after `now`.
    pub fn after(&mut self, now: Instant, delay: Duration, event: E) -> TimerId {
        self.insert(now + delay, None, event)
    }

    /// Fires `event` every `period`, first at `now + period`.
    ///
    /// Periods below one millisecond are raised to one millisecond.
    pub fn every(&mut self, now: Instant, period: Duration, event: E) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.insert(now + period, Some(period), event)
    }

    /// Removes a timer. Returns `false` when it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Returns every event due at `now`.
    ///
    /// A repeating timer that fell behind fires once per elapsed period and is
    /// rescheduled from its previous deadline, so the cadence does not drift.
    pub fn poll(&mut self, now: Instant) -> Vec<Fired<E>> {
        let mut fired = Vec::new();

        loop {
            let Some(idx) = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.deadline <= now)
                .min_by_key(|(_, e)| (e.deadline, e.id.0))
                .map(|(i, _)| i)
            else {
                break;
            };

            let entry = &mut self.entries[idx];
            fired.push(Fired { id: entry.id, deadline: entry.deadline, event: entry.event.clone() });
            match entry.period {
                Some(period) => entry.deadline += period,
                None => {
                    self.entries.swap_remove(idx);
                }
            }
        }

        fired
    }

    fn insert(&mut self, deadline: Instant, period: Option<Duration>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, deadline, period, event });
        id
    }
}
