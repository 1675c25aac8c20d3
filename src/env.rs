use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Capabilities the transition function needs from the outside world
///
/// Passing these in keeps `reduce` deterministic: tests use a fixed clock
/// and predictable ids instead of the wall clock.
pub trait Environment {
    /// Current wall-clock instant
    fn now(&self) -> DateTime<Utc>;
    /// A fresh, unique task id
    fn new_id(&self) -> String;
}

/// Wall clock and random UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Settable clock with sequential ids ("task-1", "task-2", ...)
#[cfg(test)]
#[derive(Debug)]
pub struct FixedEnvironment {
    now: std::cell::Cell<DateTime<Utc>>,
    next_id: std::cell::Cell<u32>,
}

#[cfg(test)]
impl FixedEnvironment {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: std::cell::Cell::new(now),
            next_id: std::cell::Cell::new(1),
        }
    }

    pub fn set_now(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Environment for FixedEnvironment {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn new_id(&self) -> String {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        format!("task-{}", id)
    }
}
