use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::GenerationError;
use crate::prompt::PanelStyle;

/// ========================================
/// Entities decoded from model JSON
/// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryOutline {
    pub title: String,
    pub logline: String,
    pub acts: Vec<Act>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Act {
    pub act: u32,
    pub title: String,
    pub summary: String,
    pub scenes: Vec<Scene>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub scene: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotInfo {
    pub shot_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingKit {
    pub taglines: Vec<String>,
    pub social_media_post: String,
    pub short_synopsis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceProfile {
    pub voice_description: String,
    pub sample_lines: Vec<String>,
}

/// ========================================
/// Image-backed entities
/// ========================================

/// Decoded image bytes. Serializes as a `data:` URI.
#[derive(Clone, PartialEq)]
pub struct ImageRef {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageRef {
    pub fn from_base64(mime_type: &str, encoded: &str) -> Result<Self, GenerationError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| GenerationError::InvalidImage(e.to_string()))?;
        if bytes.is_empty() {
            return Err(GenerationError::EmptyPayload("image"));
        }
        Ok(Self { mime_type: mime_type.to_string(), bytes })
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

impl std::fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRef")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Serialize for ImageRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.data_uri())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterProfile {
    pub name: String,
    pub description: String,
    pub image: ImageRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationProfile {
    pub name: String,
    pub description: String,
    pub image: ImageRef,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryboardPanel {
    pub scene: u64,
    pub description: String,
    pub shot_type: String,
    pub style: PanelStyle,
    pub image: ImageRef,
}
