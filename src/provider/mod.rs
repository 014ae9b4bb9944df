use async_trait::async_trait;

use crate::config::Config;
use crate::errors::GenerationError;
use crate::wire::ImagePayload;

pub mod gemini;
#[cfg(test)]
pub mod testing;

/// The remote model boundary: structured text and single images.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Raw text of the model's answer. Expected to hold a JSON object,
    /// possibly fenced.
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;

    async fn generate_image(&self, prompt: &str) -> Result<ImagePayload, GenerationError>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(cfg: &Config) -> anyhow::Result<DynProvider> {
    Ok(Box::new(gemini::GeminiProvider::new(cfg)?))
}
