/*!
 * Tests for format detection
 */

use cuekit::format_detector::{detect_format, format_from_extension, sniff_content};
use cuekit::SubtitleFormat;

#[test]
fn test_detectFormat_withKnownExtensions_shouldTrustExtension() {
    assert_eq!(detect_format("song.lrc", ""), SubtitleFormat::Lrc);
    assert_eq!(detect_format("movie.SRT", ""), SubtitleFormat::Srt);
    assert_eq!(detect_format("talk.vtt", ""), SubtitleFormat::Vtt);
    assert_eq!(detect_format("doc.xml", ""), SubtitleFormat::Ttml);
    assert_eq!(detect_format("doc.ttml", ""), SubtitleFormat::Ttml);
    assert_eq!(detect_format("cues.json", ""), SubtitleFormat::Json);
    assert_eq!(detect_format("lyrics.txt", ""), SubtitleFormat::Txt);
}

#[test]
fn test_detectFormat_withExtensionAndConflictingContent_shouldPreferExtension() {
    assert_eq!(detect_format("notes.txt", "WEBVTT\n\n"), SubtitleFormat::Txt);
    assert_eq!(detect_format("data.srt", "{\"cues\": []}"), SubtitleFormat::Srt);
}

#[test]
fn test_detectFormat_withoutExtension_shouldSniffContent() {
    assert_eq!(detect_format("clip", "{\"cues\": []}"), SubtitleFormat::Json);
    assert_eq!(detect_format("clip", "[{\"start\": 0}]"), SubtitleFormat::Json);
    assert_eq!(detect_format("clip", "WEBVTT\n\n00:00.000 --> 00:01.000\nHi"), SubtitleFormat::Vtt);
    assert_eq!(
        detect_format("clip", "<tt xmlns=\"http://www.w3.org/ns/ttml\"><body/></tt>"),
        SubtitleFormat::Ttml
    );
    assert_eq!(detect_format("clip", "[00:12.34]Line"), SubtitleFormat::Lrc);
    assert_eq!(detect_format("clip", "1\n00:00:01,000 --> 00:00:02,000\nHi"), SubtitleFormat::Srt);
}

#[test]
fn test_sniffContent_withLeadingWhitespaceAndBom_shouldIgnoreThem() {
    assert_eq!(sniff_content("\u{feff}\n  WEBVTT\n"), SubtitleFormat::Vtt);
    assert_eq!(sniff_content("\n\n{}"), SubtitleFormat::Json);
}

#[test]
fn test_sniffContent_withLrcHeaderTag_shouldDetectLrc() {
    assert_eq!(sniff_content("[ti:Title]\n[00:01.00]Line"), SubtitleFormat::Lrc);
}

#[test]
fn test_sniffContent_withUnknownContent_shouldDefaultToSrt() {
    assert_eq!(sniff_content(""), SubtitleFormat::Srt);
    assert_eq!(sniff_content("just some words"), SubtitleFormat::Srt);
}

#[test]
fn test_detectFormat_withSameInputTwice_shouldBeStable() {
    let content = "[00:01.00]Hello";
    assert_eq!(detect_format("x", content), detect_format("x", content));
}

#[test]
fn test_formatFromExtension_withUnknownOrMissingExtension_shouldReturnNone() {
    assert_eq!(format_from_extension("movie.mkv"), None);
    assert_eq!(format_from_extension("README"), None);
}

#[test]
fn test_sniffContent_withTruncatedJsonArray_shouldNotClaimJson() {
    assert_eq!(sniff_content("[{\"start\": 0, \"text\": \"cut"), SubtitleFormat::Srt);
    assert_eq!(sniff_content("[{\"start\": 0, \"text\": \"whole\"}]"), SubtitleFormat::Json);
}
