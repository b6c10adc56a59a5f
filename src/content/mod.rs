// Content generation: prompting an LLM and decoding what comes back

mod anthropic;
pub mod parse;
pub mod prompt;

pub use anthropic::AnthropicClient;

use async_trait::async_trait;

use crate::error::AppError;
use crate::model::{DishPairing, DishPairingRequest, EventRequest, GuideContent};

/// A text-completion backend. One request, one reply; no retries.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, AppError>;
}

/// Letter and wine selections for a wedding guide.
pub async fn generate_guide_content(
    generator: &dyn ContentGenerator,
    event: &EventRequest,
    max_tokens: u32,
) -> Result<GuideContent, AppError> {
    let reply = generator
        .complete(&prompt::guide_prompt(event), max_tokens)
        .await?;
    let content: GuideContent = parse::parse_json(&reply)?;
    tracing::debug!(wines = content.wines.len(), "guide content generated");
    Ok(content)
}

/// Two or three wines for a dinner dish.
pub async fn generate_dish_pairing(
    generator: &dyn ContentGenerator,
    request: &DishPairingRequest,
    max_tokens: u32,
) -> Result<DishPairing, AppError> {
    let reply = generator
        .complete(&prompt::dish_prompt(request), max_tokens)
        .await?;
    parse::parse_json(&reply)
}
