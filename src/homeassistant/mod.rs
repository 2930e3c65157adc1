//! Home Assistant notification calls: activity chimes and spoken responses

mod client;
mod error;
mod messages;
mod notifier;

pub use client::HomeAssistantClient;
pub use error::NotifyError;
pub use messages::{media_source_id, PlayMediaPayload, SpeakPayload};
pub use notifier::Notifier;
