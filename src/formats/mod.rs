/*!
 * Per-format parsers and serializers.
 *
 * Every module exposes a total `parse` returning a `ParseResult` and a
 * `serialize` writing cues back out. Malformed fragments are skipped with
 * a log line; nothing here returns an error.
 *
 * - `lrc`: LRC and enhanced LRC (`<mm:ss.xx>` word markers)
 * - `srt`: SubRip blocks
 * - `vtt`: WebVTT, including karaoke timestamp tags
 * - `ttml`: TTML paragraphs and karaoke spans
 * - `json`: the crate's own `{ metadata, cues }` schema
 * - `txt`: one line per cue
 */

pub mod json;
pub mod lrc;
pub mod srt;
pub mod ttml;
pub mod txt;
pub mod vtt;

use crate::time_codec;

/// A piece of a line once inline `<...>` tags are scanned
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InlineSegment {
    /// Literal text between tags
    Text(String),
    /// A timestamp tag, already decoded to ms
    Time(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Text,
    Tag,
}

/// Splits a line into text and timestamp segments.
///
/// Tags whose content satisfies `is_time_tag` become `Time` segments.
/// Other tags are dropped, or kept verbatim when `keep_other_tags` is set.
/// A `<` that never closes is literal text.
pub(crate) fn scan_inline_tags(
    line: &str,
    is_time_tag: fn(&str) -> bool,
    keep_other_tags: bool,
) -> Vec<InlineSegment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut tag = String::new();
    let mut state = ScanState::Text;

    for ch in line.chars() {
        match state {
            ScanState::Text => {
                if ch == '<' {
                    tag.clear();
                    state = ScanState::Tag;
                } else {
                    text.push(ch);
                }
            }
            ScanState::Tag => match ch {
                '>' => {
                    let content = tag.trim();
                    if is_time_tag(content) {
                        if !text.is_empty() {
                            segments.push(InlineSegment::Text(std::mem::take(&mut text)));
                        }
                        segments.push(InlineSegment::Time(time_codec::decode(content)));
                    } else if keep_other_tags {
                        text.push('<');
                        text.push_str(&tag);
                        text.push('>');
                    }
                    state = ScanState::Text;
                }
                '<' => {
                    // The previous `<` was literal
                    text.push('<');
                    text.push_str(&tag);
                    tag.clear();
                }
                _ => tag.push(ch),
            },
        }
    }

    if state == ScanState::Tag {
        text.push('<');
        text.push_str(&tag);
    }
    if !text.is_empty() {
        segments.push(InlineSegment::Text(text));
    }

    segments
}

/// Concatenates the text segments, dropping every timestamp
pub(crate) fn plain_text(segments: &[InlineSegment]) -> String {
    segments
        .iter()
        .filter_map(|segment| match segment {
            InlineSegment::Text(text) => Some(text.as_str()),
            InlineSegment::Time(_) => None,
        })
        .collect()
}

/// True when at least one timestamp tag was found
pub(crate) fn has_time_tags(segments: &[InlineSegment]) -> bool {
    segments.iter().any(|segment| matches!(segment, InlineSegment::Time(_)))
}

/// Reads a `start --> end [settings]` line
pub(crate) fn parse_timing_line(line: &str) -> Option<(u64, u64)> {
    let (left, right) = line.split_once("-->")?;
    let end = right.split_whitespace().next()?;
    Some((time_codec::decode(left), time_codec::decode(end)))
}
