// Shared test doubles for the notification and recovery seams.
#![allow(dead_code)]

use satellite_bridge::config::ActivitySettings;
use satellite_bridge::watchdog::RecoveryError;
use satellite_bridge::{Notifier, NotifyError, Recovery};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Sound(String),
    Speech { text: String, volume: f64 },
}

/// Records every call instead of talking to Home Assistant
#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn calls(&self) -> Vec<Notification> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Notification) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(NotifyError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn play_sound(&self, sound_file: &str) -> Result<(), NotifyError> {
        self.record(Notification::Sound(sound_file.to_string()))
    }

    async fn speak(&self, message: &str, volume: f64) -> Result<(), NotifyError> {
        self.record(Notification::Speech {
            text: message.to_string(),
            volume,
        })
    }
}

/// Counts recovery attempts
#[derive(Default)]
pub struct CountingRecovery {
    count: AtomicUsize,
}

impl CountingRecovery {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Recovery for CountingRecovery {
    async fn recover(&self) -> Result<(), RecoveryError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn sounds() -> ActivitySettings {
    ActivitySettings {
        recognition_start: "start.mp3".to_string(),
        recognition_stop: "stop.mp3".to_string(),
        media_folder: "chimes".to_string(),
    }
}

/// Encode one frame, computing `data_length` from the body
pub fn frame(event_type: &str, data: Option<Value>) -> Vec<u8> {
    let body = data.map(|d| serde_json::to_vec(&d).unwrap()).unwrap_or_default();
    raw_frame(event_type, &body)
}

/// Encode one frame around an arbitrary body
pub fn raw_frame(event_type: &str, body: &[u8]) -> Vec<u8> {
    let header = serde_json::json!({"type": event_type, "data_length": body.len()});
    let mut bytes = serde_json::to_vec(&header).unwrap();
    bytes.push(b'\n');
    bytes.extend_from_slice(body);
    bytes
}
