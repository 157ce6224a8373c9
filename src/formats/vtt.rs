/*!
 * WebVTT parsing and writing.
 *
 * The parser is a single forward pass over lines driven by `VttState`:
 * a header state that swallows the `WEBVTT` line, an idle state between
 * cues, and an accumulating state that buffers the current cue. Lines
 * that fit no state are ignored.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::formats::{has_time_tags, parse_timing_line, plain_text, scan_inline_tags, InlineSegment};
use crate::subtitle_model::{Cue, Metadata, ParseResult, SubtitleFormat, Word};
use crate::time_codec;

const TITLE_NOTE_PREFIX: &str = "note title:";

// @const: Content of an inline karaoke timestamp tag
static TIMESTAMP_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{1,2}:)?\d{1,2}:\d{2}[.,]\d{1,3}$").unwrap()
});

fn is_timestamp_tag(tag: &str) -> bool {
    TIMESTAMP_TAG_REGEX.is_match(tag)
}

/// Cue being assembled while its text lines are read
#[derive(Debug)]
struct PendingCue {
    start: u64,
    end: u64,
    lines: Vec<String>,
    words: Vec<Word>,
    word_timed: bool,
}

impl PendingCue {
    fn new(start: u64, end: u64) -> Self {
        PendingCue {
            start,
            end,
            lines: Vec::new(),
            words: Vec::new(),
            word_timed: false,
        }
    }

    fn push_line(&mut self, line: &str, cue_index: usize) {
        let segments = scan_inline_tags(line, is_timestamp_tag, false);
        self.lines.push(plain_text(&segments).trim().to_string());

        if has_time_tags(&segments) {
            self.word_timed = true;
            for (text, start, end) in spread_words(&segments, self.start) {
                let id = SubtitleFormat::Vtt.word_id(cue_index, self.words.len());
                self.words.push(Word::new(id, text, Some(start), end));
            }
        }
    }

    fn into_cue(self, index: usize) -> Cue {
        let cue = Cue::new(SubtitleFormat::Vtt.cue_id(index), self.start, self.end, self.lines.join("\n"));
        if self.word_timed {
            cue.with_words(self.words)
        } else {
            cue
        }
    }
}

#[derive(Debug)]
enum VttState {
    Header,
    Idle,
    Accumulating(PendingCue),
}

/// Parses WebVTT text, including inline karaoke timestamps
pub fn parse(content: &str) -> ParseResult {
    let mut metadata = Metadata::default();
    let mut cues: Vec<Cue> = Vec::new();
    let mut state = VttState::Header;

    for raw_line in content.trim_start_matches('\u{feff}').lines() {
        let line = raw_line.trim();

        if let Some(title) = title_note(line) {
            if metadata.title.is_none() && !title.is_empty() {
                metadata.title = Some(title.to_string());
            }
            continue;
        }

        if matches!(state, VttState::Header) {
            if line.is_empty() {
                continue;
            }
            state = VttState::Idle;
            if line.starts_with("WEBVTT") {
                continue;
            }
        }

        if line.contains("-->") {
            flush(&mut state, &mut cues);
            state = match parse_timing_line(line) {
                Some((start, end)) => VttState::Accumulating(PendingCue::new(start, end)),
                None => VttState::Idle,
            };
            continue;
        }

        if line.is_empty() {
            flush(&mut state, &mut cues);
            continue;
        }

        match &mut state {
            VttState::Accumulating(pending) => pending.push_line(line, cues.len()),
            _ => debug!("Ignoring VTT line outside a cue: {}", line),
        }
    }

    flush(&mut state, &mut cues);
    ParseResult::new(cues, metadata)
}

fn flush(state: &mut VttState, cues: &mut Vec<Cue>) {
    match std::mem::replace(state, VttState::Idle) {
        VttState::Accumulating(pending) => {
            let index = cues.len();
            cues.push(pending.into_cue(index));
        }
        VttState::Header => *state = VttState::Header,
        VttState::Idle => {}
    }
}

fn title_note(line: &str) -> Option<&str> {
    let prefix = line.get(..TITLE_NOTE_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(TITLE_NOTE_PREFIX) {
        Some(line[TITLE_NOTE_PREFIX.len()..].trim())
    } else {
        None
    }
}

/// Spreads the words of each text segment evenly up to the next tag.
///
/// A segment opens at the previous tag time (or `cue_start`); word `j` of
/// `n` starts at `opening + (next tag - opening) * j / n`. When no tag
/// follows on the line every word starts at the opening and carries no end.
fn spread_words(segments: &[InlineSegment], cue_start: u64) -> Vec<(String, u64, Option<u64>)> {
    let mut words = Vec::new();
    let mut opening = cue_start;

    for (i, segment) in segments.iter().enumerate() {
        match segment {
            InlineSegment::Time(time) => opening = *time,
            InlineSegment::Text(text) => {
                let tokens: Vec<&str> = text.split_whitespace().collect();
                if tokens.is_empty() {
                    continue;
                }

                let next_tag = segments[i + 1..].iter().find_map(|s| match s {
                    InlineSegment::Time(time) => Some(*time),
                    InlineSegment::Text(_) => None,
                });
                let span = next_tag.map_or(0, |next| next.saturating_sub(opening));
                let count = tokens.len() as u64;
                // Boundaries are placed proportionally so the last word ends on the next tag
                let boundary = |j: u64| opening.saturating_add(span.saturating_mul(j) / count);

                for (j, token) in tokens.iter().enumerate() {
                    let j = j as u64;
                    words.push((token.to_string(), boundary(j), next_tag.map(|_| boundary(j + 1))));
                }
            }
        }
    }

    words
}

/// Writes WebVTT, with `<timestamp>word` tokens when `karaoke` is set
pub fn serialize(cues: &[Cue], metadata: Option<&Metadata>, karaoke: bool) -> String {
    let mut output = String::from("WEBVTT\n");
    if let Some(title) = metadata.and_then(|m| m.title.as_deref()) {
        output.push_str(&format!("Note Title: {}\n", title));
    }
    output.push('\n');

    let blocks: Vec<String> = cues
        .iter()
        .map(|cue| {
            let body = match cue.timed_words() {
                Some(words) if karaoke => words
                    .iter()
                    .map(|word| format!("<{}>{}", time_codec::to_vtt(word.start.unwrap_or(cue.start)), word.text))
                    .collect::<Vec<_>>()
                    .join(" "),
                _ => cue.text.clone(),
            };
            format!("{} --> {}\n{}\n", time_codec::to_vtt(cue.start), time_codec::to_vtt(cue.end), body)
        })
        .collect();

    output.push_str(&blocks.join("\n"));
    output
}
