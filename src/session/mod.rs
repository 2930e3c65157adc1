//! Shared wake/response state
//!
//! One [`SharedSession`] exists per process. Every connection writes to it
//! and the watchdog reads it, always through the same mutex.

mod state;

pub use state::{SessionState, SharedSession};
