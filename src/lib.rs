pub mod config;
pub mod homeassistant;
pub mod protocol;
pub mod server;
pub mod session;
pub mod speech;
pub mod watchdog;

pub use config::Config;
pub use homeassistant::{HomeAssistantClient, Notifier, NotifyError};
pub use protocol::{Event, FrameError, FrameReader, Message};
pub use server::{Dispatcher, Server};
pub use session::{SessionState, SharedSession};
pub use speech::{normalize, QuietHours, SpeechRequest};
pub use watchdog::{CommandRecovery, Recovery, Watchdog};
