//! Caller-side resilience utilities.
//!
//! The dashboard UI allows at most one outstanding summary request at a
//! time, originally enforced with a boolean flag checked before starting
//! and cleared in a finally block. [`SingleFlight`] is the explicit form
//! of that latch: acquisition either succeeds and returns an RAII guard
//! that clears the latch on drop, or fails fast.

use std::sync::atomic::{AtomicBool, Ordering};

/// A latch preventing more than one overlapping operation of one kind.
///
/// Re-entrancy safe and cheap: a single atomic flag. The streaming chat
/// operation is deliberately not guarded (it is stateless and callers may
/// run it concurrently); wrap one around any operation that should be
/// single-flight.
#[derive(Debug, Default)]
pub struct SingleFlight {
    in_flight: AtomicBool,
}

impl SingleFlight {
    /// Creates a released latch.
    pub const fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    /// Attempts to acquire the latch.
    ///
    /// Returns `None` if another operation already holds it. The returned
    /// guard releases the latch when dropped, on every exit path
    /// including panics and cancellation.
    pub fn try_begin(&self) -> Option<SingleFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SingleFlightGuard {
                latch: &self.in_flight,
            })
    }

    /// Returns true if an operation currently holds the latch.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// RAII guard releasing a [`SingleFlight`] latch on drop.
#[derive(Debug)]
pub struct SingleFlightGuard<'a> {
    latch: &'a AtomicBool,
}

impl Drop for SingleFlightGuard<'_> {
    fn drop(&mut self) {
        self.latch.store(false, Ordering::Release);
    }
}
