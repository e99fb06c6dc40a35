//! [`Context`]: the cooperative cancellation token shared with the worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Besides polling with [`is_done`](Self::is_done), a holder can
/// [`sleep`](Self::sleep); cancelling wakes every sleeper immediately.
#[derive(Clone, Debug)]
pub struct Context {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    done: AtomicBool,
    gate: Mutex<()>,
    wake: Condvar,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                done: AtomicBool::new(false),
                gate: Mutex::new(()),
                wake: Condvar::new(),
            }),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.inner.done.load(Ordering::Acquire)
    }

    /// Request cancellation and wake any sleeper.
    pub fn cancel(&self) {
        self.inner.done.store(true, Ordering::Release);
        let _gate = self.inner.gate.lock().unwrap_or_else(PoisonError::into_inner);
        self.inner.wake.notify_all();
    }

    /// Sleep for `dur`, returning early if cancelled.
    ///
    /// Returns `true` if the context was cancelled.
    pub fn sleep(&self, dur: Duration) -> bool {
        let deadline = Instant::now() + dur;
        let mut gate = self.inner.gate.lock().unwrap_or_else(PoisonError::into_inner);
        while !self.is_done() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (g, _) = self
                .inner
                .wake
                .wait_timeout(gate, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            gate = g;
        }
        true
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
