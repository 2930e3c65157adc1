use super::error::EventError;
use super::frame::Message;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Satellite lifecycle events the bridge reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Wake word detected
    Detection { name: Option<String> },
    VoiceStarted,
    VoiceStopped,
    Transcript { text: Option<String> },
    /// Response text ready for speech
    Synthesize { text: String },
    /// Anything else on the feed; ignored
    Other(String),
}

#[derive(Deserialize)]
struct SynthesizeData {
    text: String,
}

impl Event {
    pub fn event_type(&self) -> &str {
        match self {
            Event::Detection { .. } => "detection",
            Event::VoiceStarted => "voice-started",
            Event::VoiceStopped => "voice-stopped",
            Event::Transcript { .. } => "transcript",
            Event::Synthesize { .. } => "synthesize",
            Event::Other(event_type) => event_type,
        }
    }
}

impl TryFrom<Message> for Event {
    type Error = EventError;

    fn try_from(message: Message) -> Result<Self, Self::Error> {
        let Message {
            event_type,
            payload,
            ..
        } = message;

        let event = match event_type.as_str() {
            "detection" => Event::Detection {
                name: optional_str(&payload, "name"),
            },
            "voice-started" => Event::VoiceStarted,
            "voice-stopped" => Event::VoiceStopped,
            "transcript" => Event::Transcript {
                text: optional_str(&payload, "text"),
            },
            "synthesize" => {
                let data: SynthesizeData = decode(&event_type, payload)?;
                Event::Synthesize { text: data.text }
            }
            _ => Event::Other(event_type),
        };

        Ok(event)
    }
}

fn optional_str(payload: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).map(str::to_string)
}

fn decode<T: DeserializeOwned>(
    event_type: &str,
    payload: serde_json::Map<String, Value>,
) -> Result<T, EventError> {
    serde_json::from_value(Value::Object(payload)).map_err(|source| EventError::InvalidPayload {
        event_type: event_type.to_string(),
        source,
    })
}
