use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::Config;
use crate::errors::GenerationError;
use crate::wire::{GenerateContentRequest, GenerateContentResponse, ImagePayload, PredictRequest, PredictResponse};

/// Gemini text generation plus Imagen image generation over the public
/// REST API. One request per call, no retries.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    api_base: String,
    text_model: String,
    image_model: String,
    image_mime_type: String,
}

impl GeminiProvider {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("building HTTP client")?;
        Ok(Self {
            client,
            api_key: cfg.api_key.clone(),
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            text_model: cfg.text_model.clone(),
            image_model: cfg.image_model.clone(),
            image_mime_type: cfg.image_mime_type.clone(),
        })
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.api_base, model, method)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, url: &str, body: &B) -> Result<R, GenerationError> {
        tracing::debug!(%url, "POST");

        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::trace!(%status, body = %text, "raw response");

        if !status.is_success() {
            return Err(GenerationError::Transport(format!("Gemini API error ({}): {}", status, text)));
        }

        serde_json::from_str::<R>(&text)
            .map_err(|e| GenerationError::Transport(format!("failed to decode Gemini response: {e}\nRaw: {text}")))
    }
}

#[async_trait]
impl super::Provider for GeminiProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = self.model_url(&self.text_model, "generateContent");
        let body = GenerateContentRequest::json_prompt(prompt);
        let parsed: GenerateContentResponse = self.post(&url, &body).await?;

        if let Some(reason) = parsed.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
            tracing::debug!(model = %self.text_model, finish_reason = reason, "text generation finished");
        }
        parsed.text().ok_or(GenerationError::EmptyPayload("text"))
    }

    async fn generate_image(&self, prompt: &str) -> Result<ImagePayload, GenerationError> {
        let url = self.model_url(&self.image_model, "predict");
        let body = PredictRequest::single_image(prompt, &self.image_mime_type);
        let parsed: PredictResponse = self.post(&url, &body).await?;

        parsed
            .first_image(&self.image_mime_type)
            .ok_or(GenerationError::EmptyPayload("image"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config { api_key: "k".into(), api_base: "https://example.test/".into(), ..Config::default() }
    }

    #[test]
    fn model_urls_strip_trailing_slash() {
        let p = GeminiProvider::new(&cfg()).unwrap();
        assert_eq!(
            p.model_url("gemini-2.5-flash", "generateContent"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            p.model_url("imagen-3.0-generate-002", "predict"),
            "https://example.test/v1beta/models/imagen-3.0-generate-002:predict"
        );
    }
}
