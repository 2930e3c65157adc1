//! Liveness monitor for the satellite's listening session

mod monitor;
mod recovery;

pub use monitor::Watchdog;
pub use recovery::{CommandRecovery, Recovery, RecoveryError};
