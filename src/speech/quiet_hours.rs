use crate::config::{parse_clock, QuietHoursConfig};
use anyhow::Result;
use chrono::NaiveTime;

/// Nightly window during which speech plays quieter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuietHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub volume_factor: f64,
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            volume_factor: 0.85,
        }
    }
}

impl QuietHours {
    pub fn from_config(cfg: &QuietHoursConfig) -> Result<Self> {
        Ok(Self {
            start: parse_clock(&cfg.start)?,
            end: parse_clock(&cfg.end)?,
            volume_factor: cfg.volume_factor,
        })
    }

    /// Whether `now` is inside the window, both boundaries included
    ///
    /// A start later than the end spans midnight.
    pub fn contains(&self, now: NaiveTime) -> bool {
        if self.start < self.end {
            self.start <= now && now <= self.end
        } else if self.start == self.end {
            now == self.start
        } else {
            now >= self.start || now <= self.end
        }
    }

    pub fn adjust_volume(&self, base_volume: f64, now: NaiveTime) -> f64 {
        if self.contains(now) {
            base_volume * self.volume_factor
        } else {
            base_volume
        }
    }
}
