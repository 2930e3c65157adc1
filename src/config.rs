use anyhow::{ensure, Context, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use std::time::Duration;

/// Environment variable prefix for overrides, e.g. `SATELLITE_BRIDGE_HOMEASSISTANT__TOKEN`
pub const ENV_PREFIX: &str = "SATELLITE_BRIDGE";

/// Service configuration
///
/// Keys are snake_case. The camelCase keys of older `config.yml` files
/// (`targetMediaPlayer`, `activitySettings`, ...) are accepted as aliases;
/// the file source hands them over lowercased.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub homeassistant: HomeAssistantConfig,
    pub tts: TtsConfig,
    #[serde(alias = "activitysettings", alias = "activitySettings")]
    pub activity_settings: ActivitySettings,
    #[serde(default)]
    pub quiet_hours: QuietHoursConfig,
    #[serde(default)]
    pub watchdog: WatchdogConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HomeAssistantConfig {
    /// Base URL, e.g. `http://homeassistant.local:8123`
    pub host: String,
    /// Long-lived access token
    pub token: String,
    /// Media player entity that plays chimes and speech
    #[serde(alias = "targetmediaplayer", alias = "targetMediaPlayer")]
    pub target_media_player: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(alias = "ttsplatform", alias = "ttsPlatform")]
    pub tts_platform: String,
    pub voice: String,
    #[serde(alias = "volumelevel", alias = "volumeLevel")]
    pub volume_level: f64,
    #[serde(default)]
    pub announce: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySettings {
    /// Sound played on wake word detection
    #[serde(alias = "recognitionstart", alias = "recognitionStart")]
    pub recognition_start: String,
    /// Sound played when the satellite stops listening
    #[serde(alias = "recognitionstop", alias = "recognitionStop")]
    pub recognition_stop: String,
    /// Folder under Home Assistant's local media source
    #[serde(alias = "mediafolder", alias = "mediaFolder")]
    pub media_folder: String,
}

/// Nightly window in which speech volume is reduced
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuietHoursConfig {
    pub start: String,
    pub end: String,
    pub volume_factor: f64,
}

impl Default for QuietHoursConfig {
    fn default() -> Self {
        Self {
            start: "20:00".to_string(),
            end: "08:00".to_string(),
            volume_factor: 0.85,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatchdogConfig {
    pub interval_secs: u64,
    pub response_timeout_secs: u64,
    /// Program and arguments run to restart the satellite
    pub restart_command: Vec<String>,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            response_timeout_secs: 15,
            restart_command: vec![
                "systemctl".to_string(),
                "restart".to_string(),
                "satellite".to_string(),
            ],
        }
    }
}

impl WatchdogConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub sound_timeout_secs: u64,
    pub speech_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            sound_timeout_secs: 5,
            speech_timeout_secs: 10,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10500
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read config {}", path))?;

        let cfg: Config = settings
            .try_deserialize()
            .context("Failed to parse config")?;
        cfg.validate()?;

        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.homeassistant.host.trim().is_empty(),
            "homeassistant.host must not be empty"
        );
        ensure!(
            (0.0..=1.0).contains(&self.tts.volume_level),
            "tts.volume_level must be between 0 and 1, got {}",
            self.tts.volume_level
        );
        ensure!(
            !self.watchdog.restart_command.is_empty(),
            "watchdog.restart_command must not be empty"
        );
        ensure!(
            self.watchdog.interval_secs > 0,
            "watchdog.interval_secs must be positive"
        );
        ensure!(
            self.http.sound_timeout_secs > 0,
            "http.sound_timeout_secs must be positive"
        );
        ensure!(
            self.http.speech_timeout_secs > 0,
            "http.speech_timeout_secs must be positive"
        );
        parse_clock(&self.quiet_hours.start).context("Invalid quiet_hours.start")?;
        parse_clock(&self.quiet_hours.end).context("Invalid quiet_hours.end")?;
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

/// Parse an `HH:MM` wall-clock time
pub fn parse_clock(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .with_context(|| format!("Expected HH:MM, got {:?}", value))
}
