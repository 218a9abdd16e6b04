//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies of the poll core sit behind traits. This crate
//! provides test-friendly implementations that return deterministic values
//! and can be driven programmatically.
//!
//! Usage: hand a nullable to the registry in place of the real implementation.

pub mod clock;

pub use clock::NullClock;
