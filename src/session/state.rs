use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Wake/response state of the satellite's current interaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// A wake word was detected and no response has been spoken yet
    pub is_awake: bool,

    /// A response was synthesized since the last wake
    pub has_responded: bool,

    /// Last lifecycle event showing the satellite is still listening
    pub wake_time: Option<Instant>,
}

impl SessionState {
    pub fn wake(&mut self, now: Instant) {
        self.is_awake = true;
        self.has_responded = false;
        self.wake_time = Some(now);
    }

    pub fn touch(&mut self, now: Instant) {
        self.wake_time = Some(now);
    }

    pub fn respond(&mut self) {
        self.has_responded = true;
        self.is_awake = false;
    }

    /// Awake without a response for longer than `timeout`
    pub fn is_stalled(&self, now: Instant, timeout: Duration) -> bool {
        if !self.is_awake || self.has_responded {
            return false;
        }
        match self.wake_time {
            Some(wake_time) => now > wake_time + timeout,
            None => false,
        }
    }
}

/// Process-wide session state shared by all connections and the watchdog
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionState>>,
}

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `f` to the state under the lock
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut SessionState),
    {
        let mut state = self.inner.lock().await;
        f(&mut state);
    }

    pub async fn snapshot(&self) -> SessionState {
        *self.inner.lock().await
    }
}
