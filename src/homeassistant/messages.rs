use serde::{Deserialize, Serialize};

/// Body of `POST /api/services/media_player/play_media`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayMediaPayload {
    pub entity_id: String,
    pub media_content_id: String,
    pub media_content_type: String,
}

/// Body of `POST /api/services/chime_tts/say`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakPayload {
    pub entity_id: String,
    pub tts_platform: String,
    pub voice: String,
    pub message: String,
    pub announce: bool,
    pub volume_level: f64,
}

/// Media source URI for a sound file in Home Assistant's local media folder
pub fn media_source_id(media_folder: &str, sound_file: &str) -> String {
    format!("media-source://media_source/local/{}/{}", media_folder, sound_file)
}
