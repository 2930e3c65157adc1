use super::error::NotifyError;
use super::messages::{media_source_id, PlayMediaPayload, SpeakPayload};
use super::notifier::Notifier;
use crate::config::{ActivitySettings, HomeAssistantConfig, HttpConfig, TtsConfig};
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const PLAY_MEDIA_PATH: &str = "/api/services/media_player/play_media";
const SPEAK_PATH: &str = "/api/services/chime_tts/say";

/// Home Assistant REST client for chimes and speech
///
/// Sound and speech calls go through separate `reqwest` clients so each
/// keeps its own timeout.
pub struct HomeAssistantClient {
    host: String,
    token: String,
    target_entity: String,
    tts: TtsConfig,
    media_folder: String,
    sound_client: reqwest::Client,
    speech_client: reqwest::Client,
}

impl HomeAssistantClient {
    pub fn new(
        homeassistant: &HomeAssistantConfig,
        tts: &TtsConfig,
        activity: &ActivitySettings,
        http: &HttpConfig,
    ) -> Result<Self> {
        let sound_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.sound_timeout_secs))
            .build()
            .context("Failed to build sound HTTP client")?;
        let speech_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.speech_timeout_secs))
            .build()
            .context("Failed to build speech HTTP client")?;

        Ok(Self {
            host: homeassistant.host.trim_end_matches('/').to_string(),
            token: homeassistant.token.clone(),
            target_entity: homeassistant.target_media_player.clone(),
            tts: tts.clone(),
            media_folder: activity.media_folder.clone(),
            sound_client,
            speech_client,
        })
    }

    pub fn play_media_payload(&self, sound_file: &str) -> PlayMediaPayload {
        PlayMediaPayload {
            entity_id: self.target_entity.clone(),
            media_content_id: media_source_id(&self.media_folder, sound_file),
            media_content_type: "audio/mpeg".to_string(),
        }
    }

    pub fn speak_payload(&self, message: &str, volume: f64) -> SpeakPayload {
        SpeakPayload {
            entity_id: self.target_entity.clone(),
            tts_platform: self.tts.tts_platform.clone(),
            voice: self.tts.voice.clone(),
            message: message.to_string(),
            announce: self.tts.announce,
            volume_level: volume,
        }
    }

    async fn post<T: Serialize>(
        &self,
        client: &reqwest::Client,
        path: &str,
        payload: &T,
    ) -> Result<(), NotifyError> {
        let url = format!("{}{}", self.host, path);
        debug!("POST {}", url);

        let response = client
            .post(&url)
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for HomeAssistantClient {
    async fn play_sound(&self, sound_file: &str) -> Result<(), NotifyError> {
        let payload = self.play_media_payload(sound_file);
        self.post(&self.sound_client, PLAY_MEDIA_PATH, &payload).await
    }

    async fn speak(&self, message: &str, volume: f64) -> Result<(), NotifyError> {
        debug!("Sending payload to TTS engine: {}", message);
        let payload = self.speak_payload(message, volume);
        self.post(&self.speech_client, SPEAK_PATH, &payload).await
    }
}
