/*!
 * Format detection from a filename and the document text.
 *
 * The extension decides when it is recognized; otherwise the content is
 * sniffed, falling back to SRT.
 */

use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitle_model::SubtitleFormat;

/// Namespace URI every TTML document declares
pub const TTML_NAMESPACE: &str = "http://www.w3.org/ns/ttml";

// @const: Leading LRC timestamp or LRC header tag
static LRC_SNIFF_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(?:\d{1,3}:\d{2}(?:\.\d{1,3})?|(?:ti|ar|al|by|offset|length|re|ve):[^\]]*)\]").unwrap()
});

/// Classifies a document as one of the base formats
pub fn detect_format(filename: &str, content: &str) -> SubtitleFormat {
    if let Some(format) = format_from_extension(filename) {
        return format;
    }

    let format = sniff_content(content);
    debug!("No known extension on '{}', sniffed {}", filename, format);
    format
}

// @returns: Format implied by the file extension, if recognized
pub fn format_from_extension(filename: &str) -> Option<SubtitleFormat> {
    let extension = Path::new(filename)
        .extension()?
        .to_string_lossy()
        .to_lowercase();

    match extension.as_str() {
        "lrc" => Some(SubtitleFormat::Lrc),
        "srt" => Some(SubtitleFormat::Srt),
        "vtt" => Some(SubtitleFormat::Vtt),
        "xml" | "ttml" => Some(SubtitleFormat::Ttml),
        "json" => Some(SubtitleFormat::Json),
        "txt" => Some(SubtitleFormat::Txt),
        _ => None,
    }
}

/// Guesses the format from the document text alone
pub fn sniff_content(content: &str) -> SubtitleFormat {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    if trimmed.starts_with('{') {
        return SubtitleFormat::Json;
    }

    // `[` opens both JSON arrays and LRC lines, only real JSON counts
    if trimmed.starts_with('[') && serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        return SubtitleFormat::Json;
    }

    if trimmed.starts_with("WEBVTT") {
        return SubtitleFormat::Vtt;
    }

    if trimmed.contains(TTML_NAMESPACE) {
        return SubtitleFormat::Ttml;
    }

    if LRC_SNIFF_REGEX.is_match(trimmed) {
        return SubtitleFormat::Lrc;
    }

    SubtitleFormat::Srt
}
