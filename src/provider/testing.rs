use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::Provider;
use crate::errors::GenerationError;
use crate::wire::ImagePayload;

/// Test double returning queued outcomes in order. Records every prompt.
/// An exhausted queue answers with a transport error.
#[derive(Default)]
pub struct ScriptedProvider {
    texts: Mutex<VecDeque<Result<String, GenerationError>>>,
    images: Mutex<VecDeque<Result<ImagePayload, GenerationError>>>,
    pub text_prompts: Mutex<Vec<String>>,
    pub image_prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(self, raw: &str) -> Self {
        self.texts.lock().unwrap().push_back(Ok(raw.to_string()));
        self
    }

    pub fn text_err(self, e: GenerationError) -> Self {
        self.texts.lock().unwrap().push_back(Err(e));
        self
    }

    /// Queue a tiny JPEG header as the next image.
    pub fn image(self) -> Self {
        self.images.lock().unwrap().push_back(Ok(ImagePayload {
            bytes_base64: "/9j/4AAQ".into(),
            mime_type: "image/jpeg".into(),
        }));
        self
    }

    pub fn image_err(self, e: GenerationError) -> Self {
        self.images.lock().unwrap().push_back(Err(e));
        self
    }

    pub fn calls(&self) -> usize {
        self.text_prompts.lock().unwrap().len() + self.image_prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        self.text_prompts.lock().unwrap().push(prompt.to_string());
        self.texts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Transport("no scripted text left".into())))
    }

    async fn generate_image(&self, prompt: &str) -> Result<ImagePayload, GenerationError> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());
        self.images
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Transport("no scripted image left".into())))
    }
}
