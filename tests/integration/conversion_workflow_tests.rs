/*!
 * End-to-end conversion through the controller
 */

use std::fs;

use cuekit::app_config::Config;
use cuekit::app_controller::{ConversionOutcome, Controller};
use cuekit::{parse_content, SubtitleFormat};
use crate::common;

#[tokio::test]
async fn test_convertFile_withEnhancedLrc_shouldWriteKaraokeVtt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "song.lrc", common::SAMPLE_ENHANCED_LRC).unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    let outcome = controller
        .convert_file(&input, temp_dir.path(), SubtitleFormat::VttKaraoke, false)
        .await
        .unwrap();

    let expected_path = temp_dir.path().join("song.converted.vtt");
    assert_eq!(outcome, ConversionOutcome::Written(expected_path.clone()));
    let written = fs::read_to_string(&expected_path).unwrap();
    assert!(written.starts_with("WEBVTT\nNote Title: Morning Song\n\n"));
    assert!(written.contains("<00:00:01.000>Wake <00:00:01.500>up <00:00:02.000>now"));
}

#[tokio::test]
async fn test_convertFile_withExistingOutput_shouldSkipUnlessForced() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt").unwrap();
    let existing = common::create_test_file(temp_dir.path(), "movie.converted.json", "old").unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    let skipped = controller
        .convert_file(&input, temp_dir.path(), SubtitleFormat::Json, false)
        .await
        .unwrap();
    assert_eq!(skipped, ConversionOutcome::Skipped(existing.clone()));
    assert_eq!(fs::read_to_string(&existing).unwrap(), "old");

    let forced = controller
        .convert_file(&input, temp_dir.path(), SubtitleFormat::Json, true)
        .await
        .unwrap();
    assert_eq!(forced, ConversionOutcome::Written(existing.clone()));
    let reparsed = parse_content(&fs::read_to_string(&existing).unwrap(), SubtitleFormat::Json);
    assert_eq!(reparsed.cues.len(), 3);
}

#[tokio::test]
async fn test_convertFile_withMetadataDisabled_shouldLeaveTagsOut() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "song.lrc", common::SAMPLE_ENHANCED_LRC).unwrap();
    let mut config = Config::default();
    config.output.include_metadata = false;
    config.output.file_suffix = "plain".to_string();
    let controller = Controller::with_config(config).unwrap();
    assert_eq!(controller.config().output.file_suffix, "plain");

    controller
        .convert_file(&input, temp_dir.path(), SubtitleFormat::Lrc, false)
        .await
        .unwrap();

    let written = fs::read_to_string(temp_dir.path().join("song.plain.lrc")).unwrap();
    assert_eq!(written, "[00:01.00]Wake up now\n[00:03.00]Sun is out\n");
}

#[tokio::test]
async fn test_convertFile_withMissingInput_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    let result = controller
        .convert_file(&temp_dir.path().join("missing.srt"), temp_dir.path(), SubtitleFormat::Vtt, false)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_convertFolder_shouldConvertEachFileOnce() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_subtitle(root, "a.srt").unwrap();
    common::create_test_file(root, "b.lrc", common::SAMPLE_ENHANCED_LRC).unwrap();
    common::create_test_file(root, "ignored.md", "# not a subtitle").unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    let first = controller.convert_folder(root, SubtitleFormat::Ttml, false).await.unwrap();
    assert_eq!(first, 2);
    assert!(root.join("a.converted.ttml").exists());
    assert!(root.join("b.converted.ttml").exists());

    // Earlier outputs are not converted again, existing targets are skipped
    let second = controller.convert_folder(root, SubtitleFormat::Ttml, false).await.unwrap();
    assert_eq!(second, 0);
    assert!(!root.join("a.converted.converted.ttml").exists());
}

#[test]
fn test_detectFile_withoutExtension_shouldSniffContent() {
    let temp_dir = common::create_temp_dir().unwrap();
    let vtt = common::create_test_file(temp_dir.path(), "clip", "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHi\n").unwrap();
    let lrc = common::create_test_file(temp_dir.path(), "lyrics", "[ar:Someone]\n[00:01.00]Hi\n").unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    let (vtt_format, lrc_format) = tokio_test::block_on(async {
        (
            controller.detect_file(&vtt).await.unwrap(),
            controller.detect_file(&lrc).await.unwrap(),
        )
    });

    assert_eq!(vtt_format, SubtitleFormat::Vtt);
    assert_eq!(lrc_format, SubtitleFormat::Lrc);
}

#[test]
fn test_withConfig_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.output.file_suffix = String::new();

    assert!(Controller::with_config(config).is_err());
}
