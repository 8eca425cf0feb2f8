//! Small TTL cache for values that are expensive to recompute and tolerate
//! staleness (dashboard counts). Constructed explicitly and carried in
//! `AppState`, so each test builds its own instance.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

pub struct TtlCache<T> {
    ttl: Duration,
    slot: Mutex<Option<(T, Instant)>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value if it was set less than `ttl` ago.
    pub fn get(&self) -> Option<T> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .filter(|(_, stored_at)| stored_at.elapsed() < self.ttl)
            .map(|(value, _)| value.clone())
    }

    pub fn set(&self, value: T) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some((value, Instant::now()));
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}
