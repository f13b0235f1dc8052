use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_FAILURES: usize = 5;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Per-IP failed-login counter with a sliding window.
#[derive(Clone)]
pub struct LoginThrottle {
    max_failures: usize,
    window: Duration,
    failures: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FAILURES, DEFAULT_WINDOW)
    }
}

impl LoginThrottle {
    pub fn new(max_failures: usize, window: Duration) -> Self {
        Self {
            max_failures,
            window,
            failures: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// True once `max_failures` failures fall inside the window.
    /// Expired timestamps for this IP are dropped as a side effect.
    pub fn is_blocked(&self, ip: IpAddr) -> bool {
        let mut map = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let Some(stamps) = map.get_mut(&ip) else {
            return false;
        };
        stamps.retain(|t| now.duration_since(*t) < self.window);
        if stamps.is_empty() {
            map.remove(&ip);
            return false;
        }
        stamps.len() >= self.max_failures
    }

    /// Record a failure for `ip`. Every IP's expired timestamps are swept
    /// first, so addresses that never come back do not stay in the map.
    pub fn record_failure(&self, ip: IpAddr) {
        let mut map = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        map.retain(|_, stamps| {
            stamps.retain(|t| now.duration_since(*t) < self.window);
            !stamps.is_empty()
        });
        map.entry(ip).or_default().push(now);
    }

    /// Forget an IP after a successful login.
    pub fn clear(&self, ip: IpAddr) {
        let mut map = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&ip);
    }
}
