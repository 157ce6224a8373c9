/*!
 * Tests for error types and conversions
 */

use std::str::FromStr;

use anyhow::anyhow;

use cuekit::{AppError, GenerationError, SubtitleError, SubtitleFormat};

#[test]
fn test_fromStr_withUnknownTag_shouldReturnUnknownFormat() {
    let error = SubtitleFormat::from_str("docx").unwrap_err();

    assert!(matches!(error, SubtitleError::UnknownFormat(ref tag) if tag == "docx"));
    assert_eq!(error.to_string(), "Unknown subtitle format: docx");
}

#[test]
fn test_fromStr_withAliases_shouldResolve() {
    assert_eq!("vtt-karaoke".parse::<SubtitleFormat>().unwrap(), SubtitleFormat::VttKaraoke);
    assert_eq!("WebVTT".parse::<SubtitleFormat>().unwrap(), SubtitleFormat::Vtt);
    assert_eq!("LRC_ENHANCED".parse::<SubtitleFormat>().unwrap(), SubtitleFormat::LrcEnhanced);
    assert_eq!("xml".parse::<SubtitleFormat>().unwrap(), SubtitleFormat::Ttml);
}

#[test]
fn test_appError_fromSubtitleError_shouldWrap() {
    let error: AppError = SubtitleError::UnknownFormat("abc".to_string()).into();

    assert_eq!(error.to_string(), "Subtitle error: Unknown subtitle format: abc");
}

#[test]
fn test_appError_fromGenerationError_shouldWrap() {
    let error: AppError = GenerationError::InvalidResponse("empty".to_string()).into();

    assert!(matches!(error, AppError::Generation(_)));
    assert_eq!(error.to_string(), "Generation error: Invalid generator response: empty");
}

#[test]
fn test_appError_fromIoAndAnyhow_shouldMapVariants() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.srt");
    let from_io: AppError = io_error.into();
    let from_anyhow: AppError = anyhow!("something odd").into();

    assert!(matches!(from_io, AppError::File(_)));
    assert_eq!(from_anyhow.to_string(), "Unknown error: something odd");
}
