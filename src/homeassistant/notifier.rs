use super::error::NotifyError;

/// Outbound notifications triggered by satellite events
///
/// Implementations:
/// - [`super::HomeAssistantClient`]: Home Assistant REST API
/// - test doubles that record calls
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Play a sound file from the configured media folder
    async fn play_sound(&self, sound_file: &str) -> Result<(), NotifyError>;

    /// Speak already-normalized text at the given volume
    async fn speak(&self, message: &str, volume: f64) -> Result<(), NotifyError>;
}
