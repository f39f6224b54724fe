//! Deterministic timers driven by host-supplied milliseconds
//!
//! The host (browser animation frame or native loop) reports the current
//! monotonic time; due timers fire in deadline order. Nothing here reads a
//! real clock, so sessions replay identically in tests.

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// End of the post-hit window
    HitResolution,
    /// Refresh the displayed local time
    ClockRefresh,
}

/// Cancel handle for a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    due_ms: u64,
    /// Period for repeating timers
    interval_ms: Option<u64>,
}

/// A fired timer, reported in deadline order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub due_ms: u64,
}

/// Owns every pending timer of a session
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    timers: Vec<Timer>,
    next_id: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn next_handle(&mut self) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        handle
    }

    /// Fire `kind` once, `delay_ms` from now
    pub fn schedule_once(&mut self, kind: TimerKind, delay_ms: u64) -> TimerHandle {
        let handle = self.next_handle();
        self.timers.push(Timer {
            handle,
            kind,
            due_ms: self.now_ms.saturating_add(delay_ms),
            interval_ms: None,
        });
        handle
    }

    /// Fire `kind` every `interval_ms`, first fire one interval from now
    pub fn schedule_repeating(&mut self, kind: TimerKind, interval_ms: u64) -> TimerHandle {
        let interval_ms = interval_ms.max(1);
        let handle = self.next_handle();
        self.timers.push(Timer {
            handle,
            kind,
            due_ms: self.now_ms.saturating_add(interval_ms),
            interval_ms: Some(interval_ms),
        });
        handle
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Deadline of the earliest pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Pop the earliest timer due at or before `now_ms`, moving the clock to
    /// its deadline. Repeating timers are re-armed; periods missed during a
    /// long stall collapse into a single fire.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle.0))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[index];
        let fired = Fired {
            handle: timer.handle,
            kind: timer.kind,
            due_ms: timer.due_ms,
        };
        let interval_ms = timer.interval_ms;
        self.now_ms = self.now_ms.max(fired.due_ms);

        match interval_ms {
            Some(interval) => {
                let missed = (now_ms - timer.due_ms) / interval;
                timer.due_ms += (missed + 1) * interval;
            }
            None => {
                self.timers.remove(index);
            }
        }
        Some(fired)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Fire everything due up to `now_ms`, then settle the clock there
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<Fired> {
        let mut fired = Vec::new();
        while let Some(f) = self.pop_due(now_ms) {
            fired.push(f);
        }
        self.set_now(now_ms);
        fired
    }
}
