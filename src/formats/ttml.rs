/*!
 * TTML paragraphs.
 *
 * Parsing walks the quick-xml event stream and collects every `<p>`.
 * Inside a paragraph text nodes are concatenated, `<br>` starts a new
 * line, and `<metadata>`, `<head>` and `<style>` subtrees are skipped.
 * Timed `<span>` children become words, their `begin`/`end` read as
 * offsets from the paragraph start.
 */

use std::borrow::Cow;

use log::warn;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::format_detector::TTML_NAMESPACE;
use crate::subtitle_model::{Cue, Metadata, ParseResult, SubtitleFormat, Word};
use crate::time_codec;

/// Paragraph length when neither `end` nor `dur` is given
pub const DEFAULT_PARAGRAPH_DURATION_MS: u64 = 2_000;

/// Span length when a word has no end of its own
pub const DEFAULT_WORD_DURATION_MS: u64 = 300;

const SKIPPED_ELEMENTS: [&[u8]; 3] = [b"metadata", b"head", b"style"];

/// Timed span being read inside a paragraph
#[derive(Debug)]
struct OpenSpan {
    depth: usize,
    start: u64,
    end: Option<u64>,
    text: String,
}

/// Paragraph being read
#[derive(Debug)]
struct OpenParagraph {
    start: u64,
    end: u64,
    depth: usize,
    skip_depth: usize,
    lines: Vec<String>,
    span: Option<OpenSpan>,
    words: Vec<(String, u64, Option<u64>)>,
}

impl OpenParagraph {
    fn new(element: &BytesStart) -> Self {
        let start = attribute(element, b"begin")
            .map(|value| time_codec::decode(&value))
            .unwrap_or(0);
        let end = match (attribute(element, b"dur"), attribute(element, b"end")) {
            (Some(dur), _) => start.saturating_add(time_codec::decode(&dur)),
            (None, Some(end)) => time_codec::decode(&end),
            (None, None) => start.saturating_add(DEFAULT_PARAGRAPH_DURATION_MS),
        };

        OpenParagraph {
            start,
            end,
            depth: 0,
            skip_depth: 0,
            lines: vec![String::new()],
            span: None,
            words: Vec::new(),
        }
    }

    fn open_element(&mut self, element: &BytesStart) {
        self.depth += 1;
        let name = element.local_name();

        if self.skip_depth > 0 || SKIPPED_ELEMENTS.iter().any(|skipped| *skipped == name.as_ref()) {
            self.skip_depth += 1;
            return;
        }

        if name.as_ref() == b"br" {
            self.line_break();
            return;
        }

        if name.as_ref() == b"span" && self.span.is_none() {
            if let Some(begin) = attribute(element, b"begin") {
                let start = self.start.saturating_add(time_codec::decode(&begin));
                let end = match (attribute(element, b"end"), attribute(element, b"dur")) {
                    (Some(end), _) => Some(self.start.saturating_add(time_codec::decode(&end))),
                    (None, Some(dur)) => Some(start.saturating_add(time_codec::decode(&dur))),
                    (None, None) => None,
                };
                self.span = Some(OpenSpan {
                    depth: self.depth,
                    start,
                    end,
                    text: String::new(),
                });
            }
        }
    }

    fn close_element(&mut self) {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
        }

        if self.span.as_ref().is_some_and(|span| span.depth == self.depth) {
            if let Some(span) = self.span.take() {
                let text = span.text.split_whitespace().collect::<Vec<_>>().join(" ");
                if !text.is_empty() {
                    self.words.push((text, span.start, span.end));
                }
            }
        }

        self.depth = self.depth.saturating_sub(1);
    }

    fn empty_element(&mut self, element: &BytesStart) {
        if self.skip_depth == 0 && element.local_name().as_ref() == b"br" {
            self.line_break();
        }
    }

    fn line_break(&mut self) {
        self.lines.push(String::new());
    }

    fn push_text(&mut self, text: &str) {
        if self.skip_depth > 0 {
            return;
        }
        if let Some(line) = self.lines.last_mut() {
            line.push_str(text);
        }
        if let Some(span) = self.span.as_mut() {
            span.text.push_str(text);
        }
    }

    fn into_cue(self, index: usize) -> Cue {
        let format = SubtitleFormat::Ttml;
        let text = self
            .lines
            .iter()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        let cue = Cue::new(format.cue_id(index), self.start, self.end, text);
        if self.words.is_empty() {
            return cue;
        }

        let words = self
            .words
            .into_iter()
            .enumerate()
            .map(|(j, (text, start, end))| Word::new(format.word_id(index, j), text, Some(start), end))
            .collect();
        cue.with_words(words)
    }
}

fn attribute(element: &BytesStart, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .map(|attr| match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        })
}

/// Parses TTML, keeping the paragraphs read before any XML error
pub fn parse(content: &str) -> ParseResult {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut cues: Vec<Cue> = Vec::new();
    let mut paragraph: Option<OpenParagraph> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => match paragraph {
                Some(ref mut open) => open.open_element(&element),
                None if element.local_name().as_ref() == b"p" => {
                    paragraph = Some(OpenParagraph::new(&element));
                }
                None => {}
            },
            Ok(Event::Empty(element)) => match paragraph {
                Some(ref mut open) => open.empty_element(&element),
                // `<p/>` is a paragraph with no text
                None if element.local_name().as_ref() == b"p" => {
                    let index = cues.len();
                    cues.push(OpenParagraph::new(&element).into_cue(index));
                }
                None => {}
            },
            Ok(Event::End(_)) => {
                let closes_paragraph = paragraph.as_ref().is_some_and(|open| open.depth == 0);
                if closes_paragraph {
                    if let Some(done) = paragraph.take() {
                        let index = cues.len();
                        cues.push(done.into_cue(index));
                    }
                } else if let Some(open) = paragraph.as_mut() {
                    open.close_element();
                }
            }
            Ok(Event::Text(text)) => {
                if let Some(open) = paragraph.as_mut() {
                    let decoded = match text.unescape() {
                        Ok(value) => value,
                        Err(_) => Cow::Owned(String::from_utf8_lossy(&text).into_owned()),
                    };
                    open.push_text(&decoded);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(open) = paragraph.as_mut() {
                    open.push_text(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!(
                    "Malformed TTML at byte {}: {}; keeping {} paragraph(s) read so far",
                    reader.buffer_position(),
                    e,
                    cues.len()
                );
                break;
            }
            Ok(_) => {}
        }
    }

    ParseResult::new(cues, Metadata::default())
}

/// Writes a TTML document, one `<p>` per cue, spans per word when `karaoke` is set
pub fn serialize(cues: &[Cue], karaoke: bool) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!("<tt xmlns=\"{}\">\n", TTML_NAMESPACE));
    output.push_str("  <body>\n");
    output.push_str("    <div>\n");

    for cue in cues {
        let body = match cue.timed_words() {
            Some(words) if karaoke => word_spans(cue, words),
            _ => escape(cue.text.as_str()).replace('\n', "<br/>"),
        };
        output.push_str(&format!(
            "      <p begin=\"{}\" end=\"{}\">{}</p>\n",
            time_codec::to_vtt(cue.start),
            time_codec::to_vtt(cue.end),
            body
        ));
    }

    output.push_str("    </div>\n");
    output.push_str("  </body>\n");
    output.push_str("</tt>\n");
    output
}

// Span times are offsets from the owning paragraph's begin
fn word_spans(cue: &Cue, words: &[Word]) -> String {
    words
        .iter()
        .map(|word| {
            let start = word.start.unwrap_or(cue.start);
            let end = word.end.unwrap_or(start.saturating_add(DEFAULT_WORD_DURATION_MS));
            format!(
                "<span begin=\"{}\" end=\"{}\">{}</span>",
                time_codec::to_vtt(start.saturating_sub(cue.start)),
                time_codec::to_vtt(end.saturating_sub(cue.start)),
                escape(word.text.as_str())
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}
