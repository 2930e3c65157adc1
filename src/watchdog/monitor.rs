use super::recovery::Recovery;
use crate::config::WatchdogConfig;
use crate::session::SharedSession;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, warn};

/// Restarts the satellite when it wakes up but never answers
///
/// Recovery is attempted on every tick while the session stays stalled;
/// a restart does not clear the session state.
pub struct Watchdog {
    session: SharedSession,
    recovery: Arc<dyn Recovery>,
    interval: Duration,
    response_timeout: Duration,
}

impl Watchdog {
    pub fn new(
        session: SharedSession,
        recovery: Arc<dyn Recovery>,
        interval: Duration,
        response_timeout: Duration,
    ) -> Self {
        Self {
            session,
            recovery,
            interval,
            response_timeout,
        }
    }

    pub fn from_config(
        session: SharedSession,
        recovery: Arc<dyn Recovery>,
        cfg: &WatchdogConfig,
    ) -> Self {
        Self::new(session, recovery, cfg.interval(), cfg.response_timeout())
    }

    /// Run one check at `now`. Returns whether recovery was attempted.
    pub async fn check(&self, now: Instant) -> bool {
        let state = self.session.snapshot().await;
        if !state.is_stalled(now, self.response_timeout) {
            return false;
        }

        warn!("Recognition started, but no response. Restarting satellite");
        if let Err(e) = self.recovery.recover().await {
            error!("Failed to restart satellite: {}", e);
        }
        true
    }

    /// Check every interval, starting one interval from now
    pub async fn run(self) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.check(Instant::now()).await;
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
