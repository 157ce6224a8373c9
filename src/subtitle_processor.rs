use std::fmt;

use log::debug;

use crate::format_detector;
use crate::formats::{json, lrc, srt, ttml, txt, vtt};
use crate::subtitle_model::{Cue, Metadata, ParseResult, SubtitleFormat, Word};

// @module: Format dispatch and timeline operations

/// Parses `content` with the parser for `format`
///
/// Enhanced and karaoke tags use their base format's parser.
pub fn parse_content(content: &str, format: SubtitleFormat) -> ParseResult {
    let result = match format {
        SubtitleFormat::Lrc | SubtitleFormat::LrcEnhanced => lrc::parse(content),
        SubtitleFormat::Srt => srt::parse(content),
        SubtitleFormat::Vtt | SubtitleFormat::VttKaraoke => vtt::parse(content),
        SubtitleFormat::Ttml | SubtitleFormat::TtmlKaraoke => ttml::parse(content),
        SubtitleFormat::Json => json::parse(content),
        SubtitleFormat::Txt => txt::parse(content),
    };

    debug!("Parsed {} cue(s) as {}", result.cues.len(), format);
    result
}

/// Writes `cues` in `format`, including `metadata` where the format has room for it
pub fn stringify_content(cues: &[Cue], format: SubtitleFormat, metadata: Option<&Metadata>) -> String {
    debug!("Writing {} cue(s) as {}", cues.len(), format);

    match format {
        SubtitleFormat::Lrc => lrc::serialize(cues, metadata, false),
        SubtitleFormat::LrcEnhanced => lrc::serialize(cues, metadata, true),
        SubtitleFormat::Srt => srt::serialize(cues),
        SubtitleFormat::Vtt => vtt::serialize(cues, metadata, false),
        SubtitleFormat::VttKaraoke => vtt::serialize(cues, metadata, true),
        SubtitleFormat::Ttml => ttml::serialize(cues, false),
        SubtitleFormat::TtmlKaraoke => ttml::serialize(cues, true),
        SubtitleFormat::Txt => txt::serialize(cues),
        SubtitleFormat::Json => json::serialize(cues, metadata),
    }
}

/// Returns copies of `cues` moved by `offset_ms`, clamped at zero
pub fn shift_cues(cues: &[Cue], offset_ms: i64) -> Vec<Cue> {
    let shift = |ms: u64| ms.saturating_add_signed(offset_ms);

    cues.iter()
        .map(|cue| Cue {
            id: cue.id.clone(),
            start: shift(cue.start),
            end: shift(cue.end),
            text: cue.text.clone(),
            words: cue.words.as_ref().map(|words| {
                words
                    .iter()
                    .map(|word| Word {
                        start: word.start.map(shift),
                        end: word.end.map(shift),
                        ..word.clone()
                    })
                    .collect()
            }),
        })
        .collect()
}

/// Appends generated cues after the existing timeline.
///
/// Generated cues keep their relative timing and are moved past the last
/// existing cue's end. They are re-identified so ids stay unique across
/// the merged list.
pub fn merge_generated_cues(existing: &[Cue], generated: &[Cue]) -> Vec<Cue> {
    let offset = existing.last().map_or(0, |cue| cue.end);
    let offset = i64::try_from(offset).unwrap_or(i64::MAX);

    let mut merged = existing.to_vec();
    for (i, cue) in shift_cues(generated, offset).into_iter().enumerate() {
        let index = existing.len() + i;
        let id = format!("generated-{}", index);
        let words = cue.words.map(|words| {
            words
                .into_iter()
                .enumerate()
                .map(|(j, word)| Word {
                    id: format!("{}-w{}", id, j),
                    ..word
                })
                .collect()
        });
        merged.push(Cue { id, words, ..cue });
    }

    debug!("Merged {} generated cue(s) after {} ms", generated.len(), offset);
    merged
}

/// Parsed document together with the format it was read as
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleDocument {
    /// Format the content was parsed with
    pub format: SubtitleFormat,

    /// Cues in file order
    pub cues: Vec<Cue>,

    /// Document tags
    pub metadata: Metadata,
}

impl SubtitleDocument {
    /// Parses `content` as `format`
    pub fn parse(content: &str, format: SubtitleFormat) -> Self {
        let ParseResult { cues, metadata } = parse_content(content, format);
        SubtitleDocument {
            format,
            cues,
            metadata,
        }
    }

    /// Detects the format from the filename and content, then parses
    pub fn from_file_content(filename: &str, content: &str) -> Self {
        let format = format_detector::detect_format(filename, content);
        Self::parse(content, format)
    }

    /// Serializes the document into `format`
    pub fn to_format(&self, format: SubtitleFormat, include_metadata: bool) -> String {
        let metadata = include_metadata.then_some(&self.metadata);
        stringify_content(&self.cues, format, metadata)
    }

    /// True when at least one cue carries word timing
    pub fn has_word_timing(&self) -> bool {
        self.cues.iter().any(|cue| cue.timed_words().is_some())
    }

    /// End of the last cue, or zero when empty
    pub fn duration_ms(&self) -> u64 {
        self.cues.iter().map(|cue| cue.end).max().unwrap_or(0)
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Document")?;
        writeln!(f, "Format: {}", self.format)?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        if let Some(title) = &self.metadata.title {
            writeln!(f, "Title: {}", title)?;
        }
        if let Some(artist) = &self.metadata.artist {
            writeln!(f, "Artist: {}", artist)?;
        }
        Ok(())
    }
}
