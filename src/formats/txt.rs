use crate::subtitle_model::{Cue, Metadata, ParseResult, SubtitleFormat};

// @module: Plain text, one line per cue

/// Window given to each line read from plain text
pub const LINE_WINDOW_MS: u64 = 2_000;

/// Silence between cues that starts a new stanza on export
pub const STANZA_GAP_MS: u64 = 2_000;

/// Turns every non-blank line into a cue on a uniform 2 s grid
pub fn parse(content: &str) -> ParseResult {
    let cues = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| {
            let start = i as u64 * LINE_WINDOW_MS;
            Cue::new(SubtitleFormat::Txt.cue_id(i), start, start + LINE_WINDOW_MS, line)
        })
        .collect();

    ParseResult::new(cues, Metadata::default())
}

/// Writes one line per cue, with a blank line at each stanza gap
pub fn serialize(cues: &[Cue]) -> String {
    let mut lines: Vec<&str> = Vec::with_capacity(cues.len());

    for (i, cue) in cues.iter().enumerate() {
        if i > 0 && cue.start.saturating_sub(cues[i - 1].end) >= STANZA_GAP_MS {
            lines.push("");
        }
        lines.push(&cue.text);
    }

    if lines.is_empty() {
        return String::new();
    }
    let mut output = lines.join("\n");
    output.push('\n');
    output
}
