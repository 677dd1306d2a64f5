use moka::future::Cache;
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use utoipa::ToSchema;

/// Snapshot of the login throttle for one identity.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct ThrottleState {
    #[schema(example = 3)]
    pub attempt_count: u32,
    pub is_locked: bool,
    #[schema(example = 300)]
    pub lockout_seconds_remaining: u32,
}

/// An active lockout: the remaining-seconds counter plus the ticker task
/// decrementing it. Dropping the lockout aborts the ticker, so tearing down
/// a throttle (or evicting it from the registry) never leaks a timer.
struct Lockout {
    remaining: Arc<AtomicU32>,
    ticker: JoinHandle<()>,
}

impl Drop for Lockout {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

struct Inner {
    attempts: u32,
    lockout: Option<Lockout>,
}

/// Failed-login counter with automatic lockout.
///
/// After `max_attempts` consecutive failures the throttle locks for
/// `lockout_secs`. A once-per-second countdown runs while locked; when it
/// reaches zero the lock clears and the attempt count resets on its own.
#[derive(Clone)]
pub struct LoginThrottle {
    inner: Arc<Mutex<Inner>>,
    max_attempts: u32,
    lockout_secs: u32,
}

impl LoginThrottle {
    pub fn new(max_attempts: u32, lockout_secs: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                attempts: 0,
                lockout: None,
            })),
            max_attempts,
            lockout_secs,
        }
    }

    /// Record the outcome of a login attempt and return the resulting state.
    /// Success clears everything; a failure that reaches the threshold
    /// starts the lockout countdown.
    pub fn record_attempt(&self, success: bool) -> ThrottleState {
        let mut inner = self.lock();

        if success {
            inner.attempts = 0;
            inner.lockout = None;
        } else {
            inner.attempts += 1;
            if inner.attempts >= self.max_attempts && inner.lockout.is_none() {
                inner.lockout = Some(self.start_lockout());
            }
        }

        Self::snapshot(&inner)
    }

    pub fn state(&self) -> ThrottleState {
        Self::snapshot(&self.lock())
    }

    pub fn is_locked(&self) -> bool {
        self.state().is_locked
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(inner: &Inner) -> ThrottleState {
        match &inner.lockout {
            Some(lockout) => ThrottleState {
                attempt_count: inner.attempts,
                is_locked: true,
                lockout_seconds_remaining: lockout.remaining.load(Ordering::SeqCst),
            },
            None => ThrottleState {
                attempt_count: inner.attempts,
                is_locked: false,
                lockout_seconds_remaining: 0,
            },
        }
    }

    fn start_lockout(&self) -> Lockout {
        let remaining = Arc::new(AtomicU32::new(self.lockout_secs));
        let counter = Arc::clone(&remaining);
        // Weak reference: the ticker must not keep a torn-down throttle alive.
        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);

        let ticker = tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let left = counter.load(Ordering::SeqCst).saturating_sub(1);
                counter.store(left, Ordering::SeqCst);
                if left == 0 {
                    break;
                }
            }

            // Countdown elapsed: clear the lock and the attempt count.
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
                inner.attempts = 0;
                inner.lockout = None;
            }
        });

        Lockout { remaining, ticker }
    }

    #[cfg(test)]
    fn remaining_handle(&self) -> Option<Weak<AtomicU32>> {
        self.lock()
            .lockout
            .as_ref()
            .map(|l| Arc::downgrade(&l.remaining))
    }
}

/// Per-identity throttles, keyed by the attempted email. Idle entries age
/// out well after any lockout they could be holding has expired.
#[derive(Clone)]
pub struct ThrottleRegistry {
    cache: Cache<String, LoginThrottle>,
    max_attempts: u32,
    lockout_secs: u32,
}

impl ThrottleRegistry {
    pub fn new(max_attempts: u32, lockout_secs: u32) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(100_000)
                .time_to_idle(Duration::from_secs(3600))
                .build(),
            max_attempts,
            lockout_secs,
        }
    }

    pub async fn entry(&self, email: &str) -> LoginThrottle {
        let max_attempts = self.max_attempts;
        let lockout_secs = self.lockout_secs;
        self.cache
            .get_with(email.to_lowercase(), async move {
                LoginThrottle::new(max_attempts, lockout_secs)
            })
            .await
    }
}
