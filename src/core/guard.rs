//! Single-flight guard for bulk conversion passes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Guard object enforcing that at most one bulk pass runs at a time.
///
/// `try_acquire` hands out an RAII permit; dropping the permit releases the
/// guard, so the flag is cleared on every exit path including unwinds.
#[derive(Debug, Default)]
pub struct SingleFlight {
    active: AtomicBool,
}

impl SingleFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Attempts to acquire the guard. Returns `None` while a permit is live.
    pub fn try_acquire(guard: &Arc<SingleFlight>) -> Option<FlightPermit> {
        guard
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightPermit {
                owner: Arc::clone(guard),
            })
    }

    /// Whether a bulk pass currently holds the guard.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Permit for one bulk pass; releases the guard on drop.
#[derive(Debug)]
pub struct FlightPermit {
    owner: Arc<SingleFlight>,
}

impl Drop for FlightPermit {
    fn drop(&mut self) {
        self.owner.active.store(false, Ordering::Release);
    }
}
