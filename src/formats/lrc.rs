use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::formats::{has_time_tags, plain_text, scan_inline_tags, InlineSegment};
use crate::subtitle_model::{Cue, Metadata, ParseResult, SubtitleFormat, Word};
use crate::time_codec;

// @module: LRC and enhanced LRC lyrics

/// Duration given to the last line, which has no successor to end it
pub const LAST_LINE_DURATION_MS: u64 = 3_000;

// @const: `[ti:...]` style header tag
static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[(ti|ar|al|by):(.*)\]$").unwrap()
});

// @const: Timed lyric line `[mm:ss.xx]rest`
static LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d{1,3}:\d{2}(?:\.\d{1,3})?)\](.*)$").unwrap()
});

// @const: Content of an inline word marker
static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,3}:\d{2}(?:\.\d{1,3})?$").unwrap()
});

fn is_marker(tag: &str) -> bool {
    MARKER_REGEX.is_match(tag)
}

/// Parses LRC text, reading header tags and per-word markers
pub fn parse(content: &str) -> ParseResult {
    let format = SubtitleFormat::Lrc;
    let mut metadata = Metadata::default();
    let mut cues: Vec<Cue> = Vec::new();

    for (line_number, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = HEADER_REGEX.captures(trimmed) {
            let value = caps[2].trim();
            let slot = match caps[1].to_lowercase().as_str() {
                "ti" => &mut metadata.title,
                "ar" => &mut metadata.artist,
                "al" => &mut metadata.album,
                _ => &mut metadata.by,
            };
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value.to_string());
            }
            continue;
        }

        let Some(caps) = LINE_REGEX.captures(trimmed) else {
            debug!("Skipping LRC line {}: {}", line_number + 1, trimmed);
            continue;
        };

        let index = cues.len();
        let start = time_codec::decode(&caps[1]);
        let segments = scan_inline_tags(&caps[2], is_marker, true);
        let mut cue = Cue::new(format.cue_id(index), start, start, plain_text(&segments).trim());
        if has_time_tags(&segments) {
            cue.words = Some(words_from_markers(&segments, format, index));
        }
        cues.push(cue);
    }

    infer_end_times(&mut cues);
    ParseResult::new(cues, metadata)
}

// Each marker opens a word; the next marker, if any, closes it
fn words_from_markers(segments: &[InlineSegment], format: SubtitleFormat, cue_index: usize) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut open_marker: Option<u64> = None;

    for segment in segments {
        match segment {
            InlineSegment::Time(time) => {
                if let Some(last) = words.last_mut() {
                    if last.end.is_none() {
                        last.end = Some(*time);
                    }
                }
                open_marker = Some(*time);
            }
            InlineSegment::Text(text) => {
                // Text ahead of the first marker belongs to no word
                let Some(start) = open_marker.take() else {
                    continue;
                };
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                let id = format.word_id(cue_index, words.len());
                words.push(Word::new(id, text, Some(start), None));
            }
        }
    }

    words
}

fn infer_end_times(cues: &mut [Cue]) {
    let next_starts: Vec<Option<u64>> = cues
        .iter()
        .skip(1)
        .map(|cue| Some(cue.start))
        .chain(std::iter::once(None))
        .collect();

    for (cue, next_start) in cues.iter_mut().zip(next_starts) {
        cue.end = next_start.unwrap_or(cue.start.saturating_add(LAST_LINE_DURATION_MS));
    }
}

/// Writes LRC, with word markers when `enhanced` is set
pub fn serialize(cues: &[Cue], metadata: Option<&Metadata>, enhanced: bool) -> String {
    let mut output = String::new();

    if let Some(metadata) = metadata {
        let tags = [
            ("ti", &metadata.title),
            ("ar", &metadata.artist),
            ("al", &metadata.album),
            ("by", &metadata.by),
        ];
        for (tag, value) in tags {
            if let Some(value) = value {
                output.push_str(&format!("[{}:{}]\n", tag, value));
            }
        }
        if !metadata.is_empty() {
            output.push('\n');
        }
    }

    for cue in cues {
        let body = match cue.timed_words() {
            Some(words) if enhanced => marked_words(cue, words),
            _ => cue.text.replace('\n', " "),
        };
        output.push_str(&format!("[{}]{}\n", time_codec::to_lrc(cue.start), body));
    }

    output
}

fn marked_words(cue: &Cue, words: &[Word]) -> String {
    let mut body = words
        .iter()
        .map(|word| format!("<{}>{}", time_codec::to_lrc(word.start.unwrap_or(cue.start)), word.text))
        .collect::<Vec<_>>()
        .join(" ");

    // Closing marker so the last word keeps its end
    if let Some(end) = words.last().and_then(|word| word.end) {
        body.push_str(&format!(" <{}>", time_codec::to_lrc(end)));
    }

    body
}
