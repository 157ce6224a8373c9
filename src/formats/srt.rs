use std::fmt;

use log::warn;

use crate::formats::parse_timing_line;
use crate::subtitle_model::{Cue, Metadata, ParseResult, SubtitleFormat};
use crate::time_codec;

// @module: SubRip (SRT) blocks

/// Parses SRT text block by block, dropping blocks without a timing line
pub fn parse(content: &str) -> ParseResult {
    let mut cues = Vec::new();

    for (block_number, block) in split_blocks(content).iter().enumerate() {
        match parse_block(block, cues.len()) {
            Some(cue) => cues.push(cue),
            None => warn!("Skipping SRT block {} without a timing line", block_number + 1),
        }
    }

    ParseResult::new(cues, Metadata::default())
}

// Groups lines into blank-line separated blocks
fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.trim_start_matches('\u{feff}').lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(lines: &[&str], index: usize) -> Option<Cue> {
    let mut rest = lines;

    // Optional sequence number
    if let Some(first) = rest.first() {
        if first.trim().parse::<u64>().is_ok() {
            rest = &rest[1..];
        }
    }

    let (timing, text_lines) = rest.split_first()?;
    if !timing.contains("-->") {
        return None;
    }
    let (start, end) = parse_timing_line(timing)?;

    let text = text_lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");

    Some(Cue::new(SubtitleFormat::Srt.cue_id(index), start, end, text))
}

// @struct: One numbered SRT block ready for output
struct SrtBlock<'a> {
    seq_num: usize,
    cue: &'a Cue,
}

impl fmt::Display for SrtBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(
            f,
            "{} --> {}",
            time_codec::to_srt(self.cue.start),
            time_codec::to_srt(self.cue.end)
        )?;
        writeln!(f, "{}", self.cue.text)
    }
}

/// Writes numbered SRT blocks separated by blank lines
pub fn serialize(cues: &[Cue]) -> String {
    cues.iter()
        .enumerate()
        .map(|(i, cue)| SrtBlock { seq_num: i + 1, cue }.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
