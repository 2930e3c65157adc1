use super::quiet_hours::QuietHours;
use chrono::NaiveTime;

/// Responses longer than this are shortened before speech
pub const MAX_SPOKEN_CHARS: usize = 500;

/// Earliest position a sentence terminator may end a shortened response
pub const MIN_SPOKEN_CHARS: usize = 400;

/// Appended to every shortened response
pub const TRIM_TRAILER: &str = " This response was trimmed.";

const STRIPPED_CHARS: [char; 10] = ['*', '&', '[', ']', '(', ')', '{', '}', '\n', '\r'];

/// Text and volume ready for the speak call
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub volume: f64,
}

/// Clean `raw_text` for speech and pick the volume for the time `now`
pub fn normalize(raw_text: &str, base_volume: f64, now: NaiveTime, quiet: &QuietHours) -> SpeechRequest {
    let stripped = strip_markup(raw_text);
    SpeechRequest {
        text: shorten(&stripped),
        volume: quiet.adjust_volume(base_volume, now),
    }
}

/// Drop markdown-ish characters the TTS engine would read out or choke on
pub fn strip_markup(text: &str) -> String {
    text.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect()
}

/// Shorten text longer than [`MAX_SPOKEN_CHARS`], preferring a sentence end
///
/// Lengths are counted in chars. The last `.`, `?` or `!` at char index
/// 400..=500 ends the kept text; without one the text is kept through
/// index 500, i.e. 501 chars.
pub fn shorten(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= MAX_SPOKEN_CHARS {
        return text.to_string();
    }

    let cut = (MIN_SPOKEN_CHARS..=MAX_SPOKEN_CHARS)
        .rev()
        .find(|&i| matches!(chars[i], '.' | '?' | '!'))
        .map(|i| i + 1)
        .unwrap_or(MAX_SPOKEN_CHARS + 1);

    let mut shortened: String = chars[..cut].iter().collect();
    shortened.push_str(TRIM_TRAILER);
    shortened
}
