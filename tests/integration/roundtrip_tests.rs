/*!
 * Format to format round trips
 */

use cuekit::{parse_content, stringify_content, Cue, SubtitleFormat};
use crate::common;

fn starts(cues: &[Cue]) -> Vec<u64> {
    cues.iter().map(|cue| cue.start).collect()
}

fn word_times(cue: &Cue) -> Vec<(String, Option<u64>)> {
    cue.words
        .as_ref()
        .map(|words| words.iter().map(|word| (word.text.clone(), word.start)).collect())
        .unwrap_or_default()
}

#[test]
fn test_srt_withCanonicalInput_shouldSurviveUnchanged() {
    let parsed = parse_content(common::SAMPLE_SRT, SubtitleFormat::Srt);

    let written = stringify_content(&parsed.cues, SubtitleFormat::Srt, None);

    assert_eq!(written, common::SAMPLE_SRT);
}

#[test]
fn test_srtThroughEveryTimedFormat_shouldKeepCountTextAndStarts() {
    let original = parse_content(common::SAMPLE_SRT, SubtitleFormat::Srt);

    for format in [SubtitleFormat::Vtt, SubtitleFormat::Ttml, SubtitleFormat::Json, SubtitleFormat::Lrc] {
        let written = stringify_content(&original.cues, format, None);
        let reparsed = parse_content(&written, format);

        assert_eq!(reparsed.cues.len(), original.cues.len(), "count changed through {}", format);
        assert_eq!(common::texts(&reparsed.cues), common::texts(&original.cues), "text changed through {}", format);
        assert_eq!(starts(&reparsed.cues), starts(&original.cues), "starts changed through {}", format);
    }
}

#[test]
fn test_srtThroughVttAndTtml_shouldKeepEnds() {
    let original = parse_content(common::SAMPLE_SRT, SubtitleFormat::Srt);

    for format in [SubtitleFormat::Vtt, SubtitleFormat::Ttml] {
        let reparsed = parse_content(&stringify_content(&original.cues, format, None), format);
        let ends: Vec<u64> = reparsed.cues.iter().map(|cue| cue.end).collect();
        assert_eq!(ends, vec![4_000, 9_000, 14_000]);
    }
}

#[test]
fn test_multilineText_throughVttAndTtml_shouldKeepLineBreaks() {
    let cues = vec![Cue::new("a", 0, 1_000, "Top line\nBottom line")];

    for format in [SubtitleFormat::Srt, SubtitleFormat::Vtt, SubtitleFormat::Ttml] {
        let reparsed = parse_content(&stringify_content(&cues, format, None), format);
        assert_eq!(reparsed.cues[0].text, "Top line\nBottom line", "through {}", format);
    }
}

#[test]
fn test_karaokeCues_throughWordTimedFormats_shouldKeepWordStarts() {
    let original = common::karaoke_cues();

    for format in [SubtitleFormat::LrcEnhanced, SubtitleFormat::VttKaraoke, SubtitleFormat::TtmlKaraoke] {
        let reparsed = parse_content(&stringify_content(&original, format, None), format);

        assert_eq!(reparsed.cues.len(), 2);
        for (before, after) in original.iter().zip(&reparsed.cues) {
            assert_eq!(word_times(after), word_times(before), "word timing changed through {}", format);
            assert_eq!(after.text, before.text);
        }
    }
}

#[test]
fn test_karaokeCues_throughEnhancedLrcAndTtml_shouldKeepWordEnds() {
    let original = common::karaoke_cues();

    for format in [SubtitleFormat::LrcEnhanced, SubtitleFormat::TtmlKaraoke] {
        let reparsed = parse_content(&stringify_content(&original, format, None), format);
        let ends: Vec<Option<u64>> = reparsed.cues[1]
            .words
            .as_ref()
            .unwrap()
            .iter()
            .map(|word| word.end)
            .collect();
        assert_eq!(ends, vec![Some(2_700), Some(3_500)], "through {}", format);
    }
}

#[test]
fn test_json_withWordsAndMetadata_shouldRoundTripExactly() {
    let original = parse_content(common::SAMPLE_ENHANCED_LRC, SubtitleFormat::Lrc);

    let written = stringify_content(&original.cues, SubtitleFormat::Json, Some(&original.metadata));
    let reparsed = parse_content(&written, SubtitleFormat::Json);

    assert_eq!(reparsed, original);
}

#[test]
fn test_enhancedLrc_toPlainFormats_shouldDropWordsButKeepText() {
    let original = parse_content(common::SAMPLE_ENHANCED_LRC, SubtitleFormat::Lrc);

    for format in [SubtitleFormat::Vtt, SubtitleFormat::Ttml, SubtitleFormat::Lrc, SubtitleFormat::Srt] {
        let reparsed = parse_content(&stringify_content(&original.cues, format, None), format);
        assert!(reparsed.cues.iter().all(|cue| cue.words.is_none()), "words leaked into {}", format);
        assert_eq!(common::texts(&reparsed.cues), vec!["Wake up now", "Sun is out"]);
    }
}

#[test]
fn test_txt_shouldKeepTextOnly() {
    let original = common::sample_cues();

    let reparsed = parse_content(&stringify_content(&original, SubtitleFormat::Txt, None), SubtitleFormat::Txt);

    assert_eq!(common::texts(&reparsed.cues), common::texts(&original));
    assert_eq!(starts(&reparsed.cues), vec![0, 2_000, 4_000]);
}
