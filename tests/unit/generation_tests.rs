/*!
 * Tests for the lyric generation boundary
 */

use async_trait::async_trait;

use cuekit::generation::{append_generated, cues_from_reply, LyricGenerator};
use cuekit::{Cue, GenerationError};
use crate::common;

/// Generator that answers with a canned reply
#[derive(Debug)]
struct MockGenerator {
    reply: Option<String>,
}

impl MockGenerator {
    fn answering(reply: &str) -> Self {
        MockGenerator {
            reply: Some(reply.to_string()),
        }
    }

    fn failing() -> Self {
        MockGenerator { reply: None }
    }
}

#[async_trait]
impl LyricGenerator for MockGenerator {
    async fn generate(&self, _prompt: &str, _model: &str) -> Result<Vec<Cue>, GenerationError> {
        match &self.reply {
            Some(reply) => cues_from_reply(reply),
            None => Err(GenerationError::RequestFailed("connection refused".to_string())),
        }
    }

    async fn refine(&self, existing: &[Cue], instruction: &str, _model: &str) -> Result<Vec<Cue>, GenerationError> {
        Ok(existing
            .iter()
            .map(|cue| Cue {
                text: format!("{} ({})", cue.text, instruction),
                ..cue.clone()
            })
            .collect())
    }
}

#[test]
fn test_cuesFromReply_withFencedJson_shouldReadCues() {
    let reply = "```json\n[{\"start\": 0, \"end\": 1000, \"text\": \"La la\"}]\n```";

    let cues = cues_from_reply(reply).unwrap();

    assert_eq!(common::texts(&cues), vec!["La la"]);
}

#[test]
fn test_cuesFromReply_withProse_shouldFail() {
    let result = cues_from_reply("Sure! Here are some lyrics about the sea.");

    assert!(matches!(result, Err(GenerationError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_appendGenerated_withWorkingGenerator_shouldMergeAfterExisting() {
    let generator = MockGenerator::answering(r#"{"cues": [{"start": 0, "end": 500, "text": "New"}]}"#);
    let existing = common::sample_cues();

    let merged = append_generated(&generator, &existing, "a chorus", "test-model").await.unwrap();

    assert_eq!(merged.len(), 4);
    assert_eq!(merged[3].text, "New");
    assert_eq!((merged[3].start, merged[3].end), (9_000, 9_500));
}

#[tokio::test]
async fn test_appendGenerated_withFailingGenerator_shouldPropagateError() {
    let generator = MockGenerator::failing();

    let result = append_generated(&generator, &[], "anything", "test-model").await;

    match result {
        Err(GenerationError::RequestFailed(message)) => assert_eq!(message, "connection refused"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_refine_throughTraitObject_shouldRewriteText() {
    let generator: Box<dyn LyricGenerator> = Box::new(MockGenerator::answering("[]"));

    let refined = generator.refine(&common::sample_cues()[..1], "louder", "test-model").await.unwrap();

    assert_eq!(refined[0].text, "Hello world (louder)");
    assert_eq!(refined[0].start, 1_000);
}

#[tokio::test]
async fn test_appendGenerated_withBoxedGenerator_shouldWork() {
    let generator: Box<dyn LyricGenerator> = Box::new(MockGenerator::answering(r#"[{"start": 0, "text": "x"}]"#));

    let merged = append_generated(generator.as_ref(), &[], "p", "m").await.unwrap();

    assert_eq!(merged[0].id, "generated-0");
}
