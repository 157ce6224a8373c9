/*!
 * Boundary to lyric generation services.
 *
 * A generator turns a prompt into cues, or rewrites existing cues from an
 * instruction. No client ships with this crate; callers plug in their own
 * implementation and use the helpers here to fold the output into a
 * timeline.
 */

use async_trait::async_trait;
use log::info;
use std::fmt::Debug;

use crate::errors::GenerationError;
use crate::formats::json;
use crate::subtitle_model::Cue;
use crate::subtitle_processor::merge_generated_cues;

/// Common trait for lyric generation backends
#[async_trait]
pub trait LyricGenerator: Send + Sync + Debug {
    /// Generate fresh cues from a prompt
    ///
    /// # Arguments
    /// * `prompt` - What to write
    /// * `model` - Backend model name
    async fn generate(&self, prompt: &str, model: &str) -> Result<Vec<Cue>, GenerationError>;

    /// Rewrite existing cues following an instruction
    async fn refine(&self, existing: &[Cue], instruction: &str, model: &str) -> Result<Vec<Cue>, GenerationError>;
}

/// Generates cues and appends them after the end of `existing`
pub async fn append_generated<G>(
    generator: &G,
    existing: &[Cue],
    prompt: &str,
    model: &str,
) -> Result<Vec<Cue>, GenerationError>
where
    G: LyricGenerator + ?Sized,
{
    let generated = generator.generate(prompt, model).await?;
    info!("Generator returned {} cue(s)", generated.len());
    Ok(merge_generated_cues(existing, &generated))
}

/// Reads a generator's JSON reply into cues
///
/// Accepts the same shapes as the JSON format. A reply without any cue is
/// rejected, since an empty list usually means the backend answered in
/// prose instead of JSON.
pub fn cues_from_reply(reply: &str) -> Result<Vec<Cue>, GenerationError> {
    let body = strip_code_fence(reply);
    let result = json::parse(body);
    if result.cues.is_empty() {
        return Err(GenerationError::InvalidResponse(format!(
            "no cues in generator reply ({} bytes)",
            reply.len()
        )));
    }
    Ok(result.cues)
}

// Models often wrap JSON in a ```json fence
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
