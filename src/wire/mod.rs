use serde::{Deserialize, Serialize};

/// ========================================
/// Gemini generateContent protocol
/// ========================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentRequest {
    /// Single user turn asking for a JSON response body.
    pub fn json_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: Some(prompt.to_string()) }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".into(),
            }),
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if any text exists.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

/// ========================================
/// Imagen predict protocol
/// ========================================

#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
    pub output_options: OutputOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub mime_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl PredictRequest {
    pub fn single_image(prompt: &str, mime_type: &str) -> Self {
        Self {
            instances: vec![PredictInstance { prompt: prompt.to_string() }],
            parameters: PredictParameters {
                sample_count: 1,
                output_options: OutputOptions { mime_type: mime_type.to_string() },
            },
        }
    }
}

/// Raw image returned by the remote model, still base64 encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub bytes_base64: String,
    pub mime_type: String,
}

impl PredictResponse {
    pub fn first_image(self, fallback_mime: &str) -> Option<ImagePayload> {
        let p = self.predictions.into_iter().next()?;
        let bytes = p.bytes_base64_encoded.filter(|b| !b.is_empty())?;
        Some(ImagePayload {
            bytes_base64: bytes,
            mime_type: p.mime_type.unwrap_or_else(|| fallback_mime.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_request_shape() {
        let body = serde_json::to_value(GenerateContentRequest::json_prompt("hi")).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }],
                "generationConfig": { "responseMimeType": "application/json" }
            })
        );
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] }, "finishReason": "STOP" },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(resp.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn response_without_text_yields_none() {
        let blocked: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{ "finishReason": "SAFETY" }] })).unwrap();
        assert!(blocked.text().is_none());

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.text().is_none());
    }

    #[test]
    fn predict_request_shape() {
        let body = serde_json::to_value(PredictRequest::single_image("a fox", "image/jpeg")).unwrap();
        assert_eq!(
            body,
            json!({
                "instances": [{ "prompt": "a fox" }],
                "parameters": { "sampleCount": 1, "outputOptions": { "mimeType": "image/jpeg" } }
            })
        );
    }

    #[test]
    fn first_image_uses_fallback_mime() {
        let resp: PredictResponse =
            serde_json::from_value(json!({ "predictions": [{ "bytesBase64Encoded": "AAAA" }] })).unwrap();
        assert_eq!(
            resp.first_image("image/jpeg"),
            Some(ImagePayload { bytes_base64: "AAAA".into(), mime_type: "image/jpeg".into() })
        );

        let none: PredictResponse = serde_json::from_value(json!({ "predictions": [] })).unwrap();
        assert!(none.first_image("image/jpeg").is_none());
    }
}
