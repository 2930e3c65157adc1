//! Preparing synthesized responses for the speaker

mod normalize;
mod quiet_hours;

pub use normalize::{
    normalize, shorten, strip_markup, SpeechRequest, MAX_SPOKEN_CHARS, MIN_SPOKEN_CHARS,
    TRIM_TRAILER,
};
pub use quiet_hours::QuietHours;
