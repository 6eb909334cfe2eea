//! Cooperative task scheduler on a virtual clock.
//!
//! Owns one-shot and periodic tasks, at most one live task per kind. The
//! caller moves time forward and drains due tasks with [`Scheduler::poll`];
//! nothing runs on its own, so tearing down a session is a single
//! [`Scheduler::cancel_all`].

use fnv::FnvHashMap;
use slotmap::{new_key_type, SlotMap};
use std::hash::Hash;
use std::time::Duration;

new_key_type! {
    /// Cancellation token for a scheduled task.
    pub struct TaskHandle;
}

// Periodic tasks never run with a zero period.
const MIN_PERIOD: Duration = Duration::from_micros(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(Duration),
}

#[derive(Clone, Debug)]
struct Task<K> {
    kind: K,
    due: Duration,
    repeat: Repeat,
    seq: u64,
}

/// A task that came due during [`Scheduler::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired<K> {
    pub handle: TaskHandle,
    pub kind: K,
}

pub struct Scheduler<K> {
    tasks: SlotMap<TaskHandle, Task<K>>,
    by_kind: FnvHashMap<K, TaskHandle>,
    now: Duration,
    next_seq: u64,
}

impl<K: Copy + Eq + Hash> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            by_kind: FnvHashMap::default(),
            now: Duration::ZERO,
            next_seq: 0,
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `kind` once after `delay`. Returns the pending handle if one exists.
    pub fn schedule_once(&mut self, kind: K, delay: Duration) -> TaskHandle {
        self.insert(kind, delay, Repeat::Once)
    }

    /// Run `kind` every `period`, first after one period. Returns the pending
    /// handle if one exists.
    pub fn schedule_every(&mut self, kind: K, period: Duration) -> TaskHandle {
        let period = period.max(MIN_PERIOD);
        self.insert(kind, period, Repeat::Every(period))
    }

    fn insert(&mut self, kind: K, delay: Duration, repeat: Repeat) -> TaskHandle {
        if let Some(handle) = self.handle_of(kind) {
            return handle;
        }
        let seq = self.bump_seq();
        let handle = self.tasks.insert(Task {
            kind,
            due: self.now + delay,
            repeat,
            seq,
        });
        self.by_kind.insert(kind, handle);
        handle
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn handle_of(&self, kind: K) -> Option<TaskHandle> {
        self.by_kind
            .get(&kind)
            .copied()
            .filter(|h| self.tasks.contains_key(*h))
    }

    pub fn is_pending(&self, kind: K) -> bool {
        self.handle_of(kind).is_some()
    }

    /// Cancel one task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.tasks.remove(handle) {
            Some(task) => {
                self.by_kind.remove(&task.kind);
                true
            }
            None => false,
        }
    }

    pub fn cancel_kind(&mut self, kind: K) -> bool {
        match self.handle_of(kind) {
            Some(handle) => self.cancel(handle),
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
        self.by_kind.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its deadline. Ties fire in scheduling order.
    pub fn poll(&mut self, until: Duration) -> Option<Fired<K>> {
        let (handle, due) = self
            .tasks
            .iter()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(h, t)| (h, t.due))?;
        self.now = self.now.max(due);

        let (kind, repeat) = {
            let task = &self.tasks[handle];
            (task.kind, task.repeat)
        };
        match repeat {
            Repeat::Once => {
                self.tasks.remove(handle);
                self.by_kind.remove(&kind);
            }
            Repeat::Every(period) => {
                let seq = self.bump_seq();
                let task = &mut self.tasks[handle];
                task.due += period;
                task.seq = seq;
            }
        }
        Some(Fired { handle, kind })
    }

    /// Move the clock forward without firing anything. Call after draining
    /// [`Scheduler::poll`] for the same `until`.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl<K: Copy + Eq + Hash> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}
