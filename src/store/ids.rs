use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Source of opaque sequence ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Ids derived from the wall clock in Unix milliseconds.
///
/// Two ids requested within the same millisecond (or after the clock steps
/// backwards) would collide, so the generator never issues a value lower than
/// or equal to the previous one and bumps by one instead.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: AtomicI64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_millis(&self, now: i64) -> i64 {
        let mut issued = now;
        // fetch_update only fails when the closure returns None, which it never does.
        let _ = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                issued = if now > last { now } else { last + 1 };
                Some(issued)
            });
        issued
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&self) -> String {
        self.next_millis(Utc::now().timestamp_millis()).to_string()
    }
}
