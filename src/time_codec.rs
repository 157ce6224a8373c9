/*!
 * Timestamp codec shared by every subtitle format.
 *
 * Encoding decomposes a millisecond count with integer division only, so
 * values past 24 hours or on exact hour boundaries stay intact. Decoding
 * is total: anything it cannot read becomes 0.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// @const: Minute-second stamp as used by LRC, optional 1-3 digit fraction.
// Up to three minute digits so stamps past 99 minutes still decode.
static LRC_LIKE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,3}):(\d{2})(?:\.(\d{1,3}))?$").unwrap()
});

// @const: Clock stamp with optional hours and a `.` or `,` fraction
static CLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d{1,2}):)?(\d{1,2}):(\d{1,2})[.,](\d{1,3})$").unwrap()
});

// @const: Bare decimal number, read as seconds
static SECONDS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(?:\.\d+)?$").unwrap()
});

/// Largest millisecond count read from a float (2^53 - 1, the last integer
/// an `f64` holds exactly)
pub const MAX_MS: u64 = 9_007_199_254_740_991;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Textual timestamp layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePattern {
    /// `HH:MM:SS,mmm`
    Srt,
    /// `HH:MM:SS.mmm`
    Vtt,
    /// `MM:SS.cc` (centiseconds, minutes not hour-aware)
    Lrc,
    /// `MM:SS.mmm`, used for on-screen display
    Clock,
}

/// Formats a millisecond count in the given layout
pub fn encode(ms: u64, pattern: TimePattern) -> String {
    match pattern {
        TimePattern::Srt => {
            let (hours, minutes, seconds, millis) = decompose(ms);
            format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
        }
        TimePattern::Vtt => {
            let (hours, minutes, seconds, millis) = decompose(ms);
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
        }
        TimePattern::Lrc => {
            // Round the whole value so 995 ms becomes 01.00, never 00.100
            let centis = ms.saturating_add(5) / 10;
            let minutes = centis / 6_000;
            let seconds = (centis % 6_000) / 100;
            format!("{:02}:{:02}.{:02}", minutes, seconds, centis % 100)
        }
        TimePattern::Clock => {
            let minutes = ms / MS_PER_MINUTE;
            let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
            format!("{:02}:{:02}.{:03}", minutes, seconds, ms % MS_PER_SECOND)
        }
    }
}

/// `HH:MM:SS,mmm`
pub fn to_srt(ms: u64) -> String {
    encode(ms, TimePattern::Srt)
}

/// `HH:MM:SS.mmm`
pub fn to_vtt(ms: u64) -> String {
    encode(ms, TimePattern::Vtt)
}

/// `MM:SS.cc`
pub fn to_lrc(ms: u64) -> String {
    encode(ms, TimePattern::Lrc)
}

fn decompose(ms: u64) -> (u64, u64, u64, u64) {
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    (hours, minutes, seconds, ms % MS_PER_SECOND)
}

/// Reads any supported timestamp notation into milliseconds.
///
/// Rules are tried in order on the trimmed text: `500ms`, `10.5s`,
/// `MM:SS(.fff)`, `(HH:)MM:SS[.,]fff`, then a bare number taken as
/// seconds. Unreadable input yields 0.
pub fn decode(text: &str) -> u64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if let Some(number) = trimmed.strip_suffix("ms") {
        return parse_number(number).map(millis_from_f64).unwrap_or(0);
    }

    if let Some(number) = trimmed.strip_suffix('s') {
        return parse_number(number)
            .map(|seconds| millis_from_f64(seconds * 1000.0))
            .unwrap_or(0);
    }

    if let Some(caps) = LRC_LIKE_REGEX.captures(trimmed) {
        let minutes = capture_u64(&caps, 1);
        let seconds = capture_u64(&caps, 2);
        let fraction = caps.get(3).map_or(0, |m| fraction_to_ms(m.as_str()));
        return minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + fraction;
    }

    if let Some(caps) = CLOCK_REGEX.captures(trimmed) {
        let hours = capture_u64(&caps, 1);
        let minutes = capture_u64(&caps, 2);
        let seconds = capture_u64(&caps, 3);
        let fraction = caps.get(4).map_or(0, |m| fraction_to_ms(m.as_str()));
        return hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + fraction;
    }

    // A bare number is ambiguous (JSON often carries ms) but reads as seconds
    if SECONDS_REGEX.is_match(trimmed) {
        return parse_number(trimmed)
            .map(|seconds| millis_from_f64(seconds * 1000.0))
            .unwrap_or(0);
    }

    debug!("Unreadable timestamp '{}', using 0", trimmed);
    0
}

/// Rounds a float millisecond value to a whole, non-negative count.
///
/// Negative and non-finite inputs have no timestamp representation and
/// clamp to 0. Values above `MAX_MS` clamp to `MAX_MS`.
pub fn millis_from_f64(value: f64) -> u64 {
    if !value.is_finite() || value < 0.0 {
        debug!("Clamping out-of-range millisecond value {} to 0", value);
        return 0;
    }
    if value >= MAX_MS as f64 {
        debug!("Clamping millisecond value {} to {}", value, MAX_MS);
        return MAX_MS;
    }
    value.round() as u64
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

fn capture_u64(caps: &regex::Captures, index: usize) -> u64 {
    caps.get(index)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0))
}

// Fraction digits are the leading digits of the millisecond field
fn fraction_to_ms(digits: &str) -> u64 {
    let value: u64 = digits.parse().unwrap_or(0);
    match digits.len() {
        1 => value * 100,
        2 => value * 10,
        _ => value,
    }
}
