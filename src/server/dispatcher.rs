use crate::config::ActivitySettings;
use crate::homeassistant::Notifier;
use crate::protocol::Event;
use crate::session::SharedSession;
use crate::speech::{normalize, QuietHours};
use chrono::{Local, NaiveTime};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Source of the local wall-clock time used for quiet hours
pub type WallClock = fn() -> NaiveTime;

fn local_time() -> NaiveTime {
    Local::now().time()
}

/// Applies satellite events to the shared session and fires notifications
///
/// Notifications run as detached tasks so the caller can go straight back
/// to reading the next frame.
pub struct Dispatcher {
    session: SharedSession,
    notifier: Arc<dyn Notifier>,
    sounds: ActivitySettings,
    base_volume: f64,
    quiet_hours: QuietHours,
    clock: WallClock,
}

impl Dispatcher {
    pub fn new(
        session: SharedSession,
        notifier: Arc<dyn Notifier>,
        sounds: ActivitySettings,
        base_volume: f64,
        quiet_hours: QuietHours,
    ) -> Self {
        Self {
            session,
            notifier,
            sounds,
            base_volume,
            quiet_hours,
            clock: local_time,
        }
    }

    /// Replace the wall clock used for quiet hours
    pub fn with_clock(mut self, clock: WallClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Handle one event
    ///
    /// Returns the handle of the notification task it started, if any.
    /// Dropping the handle leaves the task running.
    pub async fn dispatch(&self, event: Event) -> Option<JoinHandle<()>> {
        let now = Instant::now();

        match event {
            Event::Detection { name } => {
                info!("Wake word detected: {}", name.as_deref().unwrap_or("unknown"));
                self.session.update(|s| s.wake(now)).await;
                Some(self.spawn_sound(self.sounds.recognition_start.clone()))
            }
            Event::VoiceStarted => {
                debug!("Voice started");
                self.session.update(|s| s.touch(now)).await;
                None
            }
            Event::VoiceStopped => {
                debug!("Voice stopped");
                self.session.update(|s| s.touch(now)).await;
                Some(self.spawn_sound(self.sounds.recognition_stop.clone()))
            }
            Event::Transcript { text } => {
                debug!("Transcript: {}", text.as_deref().unwrap_or_default());
                self.session.update(|s| s.touch(now)).await;
                None
            }
            Event::Synthesize { text } => {
                self.session.update(|s| s.respond()).await;
                Some(self.spawn_speech(text))
            }
            Event::Other(event_type) => {
                debug!("Ignoring event {}", event_type);
                None
            }
        }
    }

    fn spawn_sound(&self, sound_file: String) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            if let Err(e) = notifier.play_sound(&sound_file).await {
                error!("Failed to play sound {}: {}", sound_file, e);
            }
        })
    }

    fn spawn_speech(&self, text: String) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        let base_volume = self.base_volume;
        let quiet_hours = self.quiet_hours;
        let clock = self.clock;

        tokio::spawn(async move {
            let request = normalize(&text, base_volume, clock(), &quiet_hours);
            if let Err(e) = notifier.speak(&request.text, request.volume).await {
                error!("Failed to speak response: {}", e);
            }
        })
    }
}
