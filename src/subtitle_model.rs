/*!
 * Uniform in-memory model shared by every parser and serializer.
 *
 * Parsers produce a `ParseResult` of `Cue`s plus document `Metadata`;
 * serializers consume the same records. Cues are plain values owned by
 * the caller: nothing in this crate keeps a reference after returning.
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;

// @struct: Single token of a cue, optionally timed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    // @field: Identifier unique within one parse
    pub id: String,

    // @field: Token text
    pub text: String,

    // @field: Start in ms, inherits the cue start when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,

    // @field: End in ms, inherits the cue end when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
}

impl Word {
    /// Creates a word with optional timing
    pub fn new(id: impl Into<String>, text: impl Into<String>, start: Option<u64>, end: Option<u64>) -> Self {
        Word {
            id: id.into(),
            text: text.into(),
            start,
            end,
        }
    }
}

// @struct: One timed caption or lyric line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    // @field: Identifier unique within one parse
    pub id: String,

    // @field: Start time in ms
    pub start: u64,

    // @field: End time in ms
    pub end: u64,

    // @field: Display text, may span several lines
    pub text: String,

    // @field: Word-level timing, when the source carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
}

impl Cue {
    /// Creates a cue without word timing
    pub fn new(id: impl Into<String>, start: u64, end: u64, text: impl Into<String>) -> Self {
        Cue {
            id: id.into(),
            start,
            end,
            text: text.into(),
            words: None,
        }
    }

    /// Attaches word timing to the cue
    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = Some(words);
        self
    }

    /// Returns the cue length, zero when end precedes start
    pub fn duration_ms(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Returns the word list when it is present and non-empty
    pub fn timed_words(&self) -> Option<&[Word]> {
        match &self.words {
            Some(words) if !words.is_empty() => Some(words.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{} {}-{}] {}", self.id, self.start, self.end, self.text)
    }
}

/// Document level tags (title, artist, album, author)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
}

impl Metadata {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none() && self.by.is_none()
    }
}

/// Output of every parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub cues: Vec<Cue>,
    pub metadata: Metadata,
}

impl ParseResult {
    pub fn new(cues: Vec<Cue>, metadata: Metadata) -> Self {
        ParseResult { cues, metadata }
    }

    /// Empty result returned for unreadable documents
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Closed set of supported interchange formats
///
/// The `Enhanced`/`Karaoke` variants share a parser with their base format
/// and only change how cues are written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubtitleFormat {
    Lrc,
    LrcEnhanced,
    Srt,
    Vtt,
    VttKaraoke,
    Ttml,
    TtmlKaraoke,
    Txt,
    Json,
}

impl SubtitleFormat {
    /// Every tag, in declaration order
    pub const ALL: [SubtitleFormat; 9] = [
        SubtitleFormat::Lrc,
        SubtitleFormat::LrcEnhanced,
        SubtitleFormat::Srt,
        SubtitleFormat::Vtt,
        SubtitleFormat::VttKaraoke,
        SubtitleFormat::Ttml,
        SubtitleFormat::TtmlKaraoke,
        SubtitleFormat::Txt,
        SubtitleFormat::Json,
    ];

    // @returns: Format whose parser handles this tag
    pub fn base(&self) -> SubtitleFormat {
        match self {
            Self::Lrc | Self::LrcEnhanced => Self::Lrc,
            Self::Vtt | Self::VttKaraoke => Self::Vtt,
            Self::Ttml | Self::TtmlKaraoke => Self::Ttml,
            Self::Srt => Self::Srt,
            Self::Txt => Self::Txt,
            Self::Json => Self::Json,
        }
    }

    // @returns: Whether the serializer emits per-word timing
    pub fn is_word_timed(&self) -> bool {
        matches!(self, Self::LrcEnhanced | Self::VttKaraoke | Self::TtmlKaraoke)
    }

    // @returns: File extension for exported documents
    pub fn extension(&self) -> &'static str {
        match self.base() {
            Self::Lrc => "lrc",
            Self::Vtt => "vtt",
            Self::Ttml => "ttml",
            Self::Srt => "srt",
            Self::Txt => "txt",
            _ => "json",
        }
    }

    // @returns: Lowercase tag used as the id prefix
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Lrc => "lrc",
            Self::LrcEnhanced => "lrc_enhanced",
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::VttKaraoke => "vtt_karaoke",
            Self::Ttml => "ttml",
            Self::TtmlKaraoke => "ttml_karaoke",
            Self::Txt => "txt",
            Self::Json => "json",
        }
    }

    /// Deterministic cue id for the cue at `index`
    pub fn cue_id(&self, index: usize) -> String {
        format!("{}-{}", self.id_prefix(), index)
    }

    /// Deterministic word id for word `word_index` of cue `cue_index`
    pub fn word_id(&self, cue_index: usize, word_index: usize) -> String {
        format!("{}-{}-w{}", self.id_prefix(), cue_index, word_index)
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id_prefix().to_uppercase())
    }
}

impl FromStr for SubtitleFormat {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.id_prefix() == normalized)
            .or(match normalized.as_str() {
                "webvtt" => Some(Self::Vtt),
                "xml" => Some(Self::Ttml),
                "text" => Some(Self::Txt),
                _ => None,
            })
            .ok_or_else(|| SubtitleError::UnknownFormat(s.to_string()))
    }
}
