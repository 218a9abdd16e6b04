//! The time source used to evaluate voting windows.
//!
//! Time is supplied, never computed: every component that needs "now" asks a
//! [`Clock`]. Production code uses [`SystemClock`]; tests swap in the
//! controllable clock from `ballot-nullables`.

use crate::Timestamp;

/// A source of the current time.
///
/// Implementations must be non-decreasing across calls. Callers read the
/// clock once per operation and reuse that reading for every comparison
/// the operation makes.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
