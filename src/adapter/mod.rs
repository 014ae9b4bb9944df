//! One operation per studio feature: build the prompt, make the remote
//! call, and turn the answer into a typed entity.

use serde::de::DeserializeOwned;

use crate::errors::GenerationError;
use crate::extract;
use crate::log;
use crate::model::{ImageRef, MarketingKit, ShotInfo, StoryOutline, VoiceProfile};
use crate::prompt::{self, PanelStyle};
use crate::provider::Provider;

fn report<T>(stage: &str, res: Result<T, GenerationError>) -> Result<T, GenerationError> {
    if let Err(e) = &res {
        let kind = if e.is_payload() { "payload" } else { "transport" };
        tracing::warn!(stage, kind, error = %e, "generation failed");
    }
    res
}

async fn generate_structured<T: DeserializeOwned>(
    provider: &dyn Provider,
    stage: &str,
    prompt: String,
) -> Result<T, GenerationError> {
    let res = match provider.generate_text(&prompt).await {
        Ok(raw) => {
            log::dump_exchange(stage, &prompt, &raw);
            extract::parse_json::<T>(&raw)
        }
        Err(e) => Err(e),
    };
    report(stage, res)
}

pub async fn generate_outline(provider: &dyn Provider, idea: &str) -> Result<StoryOutline, GenerationError> {
    generate_structured(provider, "outline", prompt::outline_prompt(idea)).await
}

/// Images skip the extractor entirely: the payload is decoded straight
/// into an [`ImageRef`].
pub async fn generate_image(provider: &dyn Provider, prompt: &str) -> Result<ImageRef, GenerationError> {
    let res = match provider.generate_image(prompt).await {
        Ok(payload) => ImageRef::from_base64(&payload.mime_type, &payload.bytes_base64),
        Err(e) => Err(e),
    };
    report("image", res)
}

pub async fn generate_storyboard_panel_info(provider: &dyn Provider, scene: &str) -> Result<ShotInfo, GenerationError> {
    generate_structured(provider, "storyboard-info", prompt::storyboard_info_prompt(scene)).await
}

pub async fn generate_marketing_copy(
    provider: &dyn Provider,
    title: &str,
    logline: &str,
) -> Result<MarketingKit, GenerationError> {
    generate_structured(provider, "marketing", prompt::marketing_prompt(title, logline)).await
}

pub async fn generate_voice_script_and_description(
    provider: &dyn Provider,
    character: &str,
    scene: &str,
) -> Result<VoiceProfile, GenerationError> {
    generate_structured(provider, "voice", prompt::voice_prompt(character, scene)).await
}

/// Panel image and shot info are requested concurrently; both must
/// succeed. When both fail the image error is reported.
pub async fn generate_storyboard_assets(
    provider: &dyn Provider,
    scene: &str,
    style: PanelStyle,
) -> Result<(ImageRef, ShotInfo), GenerationError> {
    let image_prompt = prompt::storyboard_image_prompt(scene, style);
    let (image, info) = futures::join!(
        generate_image(provider, &image_prompt),
        generate_storyboard_panel_info(provider, scene),
    );
    Ok((image?, info?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::ScriptedProvider;
    use crate::wire::ImagePayload;
    use assert_matches::assert_matches;

    const OUTLINE: &str = r#"```json
{
  "title": "Rust Bucket",
  "logline": "A lonely robot learns to garden.",
  "acts": [
    {"act": 1, "title": "Rust", "summary": "Alone.", "scenes": [{"scene": 1, "description": "Dawn."}]},
    {"act": 2, "title": "Bloom", "summary": "Growth.", "scenes": []}
  ]
}
```"#;

    #[tokio::test]
    async fn outline_parses_fenced_response() {
        let p = ScriptedProvider::new().text(OUTLINE);
        let outline = generate_outline(&p, "a robot gardener").await.unwrap();
        assert_eq!(outline.title, "Rust Bucket");
        assert_eq!(outline.acts.len(), 2);
        assert_eq!(outline.acts[0].scenes[0].description, "Dawn.");
        assert!(p.text_prompts.lock().unwrap()[0].contains("Idea: \"a robot gardener\""));
        assert_eq!(p.calls(), 1);
    }

    #[tokio::test]
    async fn adapter_builds_prompt_for_empty_idea() {
        let p = ScriptedProvider::new().text(OUTLINE);
        generate_outline(&p, "").await.unwrap();
        assert!(p.text_prompts.lock().unwrap()[0].ends_with("Idea: \"\""));
    }

    #[tokio::test]
    async fn transport_and_payload_failures_are_distinguishable() {
        let p = ScriptedProvider::new().text_err(GenerationError::Transport("503".into()));
        assert_matches!(generate_outline(&p, "x").await, Err(e) if e.is_transport());

        let p = ScriptedProvider::new().text("Sure! {\"title\":\"x\"}");
        assert_matches!(generate_outline(&p, "x").await, Err(GenerationError::MalformedJson { .. }));

        let p = ScriptedProvider::new().text(r#"{"title":"x","logline":"y"}"#);
        assert_matches!(generate_outline(&p, "x").await, Err(GenerationError::SchemaMismatch(_)));
    }

    #[tokio::test]
    async fn marketing_accepts_two_taglines() {
        let p = ScriptedProvider::new()
            .text(r#"{"taglines":["One.","Two."],"socialMediaPost":"Soon!","shortSynopsis":"A tale."}"#);
        let kit = generate_marketing_copy(&p, "T", "L").await.unwrap();
        assert_eq!(kit.taglines.len(), 2);

        let prompts = p.text_prompts.lock().unwrap();
        let sent = &prompts[0];
        assert!(sent.contains("\"T\"") && sent.contains("\"L\""));
        assert!(sent.contains("an array of 3 strings"));
    }

    #[tokio::test]
    async fn voice_profile_round_trip() {
        let p = ScriptedProvider::new()
            .text("```\n{\"voiceDescription\":\"Low, gravelly.\",\"sampleLines\":[\"Ahoy.\",\"Steady.\",\"Fire!\"]}\n```");
        let v = generate_voice_script_and_description(&p, "old pirate", "storm at sea").await.unwrap();
        assert_eq!(v.voice_description, "Low, gravelly.");
        assert_eq!(v.sample_lines.len(), 3);
        let prompts = p.text_prompts.lock().unwrap();
        let sent = &prompts[0];
        assert!(sent.contains("\"old pirate\"") && sent.contains("\"storm at sea\""));
    }

    #[tokio::test]
    async fn image_is_decoded_not_parsed() {
        let p = ScriptedProvider::new().image();
        let img = generate_image(&p, "a fox").await.unwrap();
        assert_eq!(img.data_uri(), "data:image/jpeg;base64,/9j/4AAQ");
        assert_eq!(p.image_prompts.lock().unwrap().as_slice(), ["a fox"]);
        assert!(p.text_prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_image_payload_is_a_payload_failure() {
        let p = ScriptedProvider::new().image_err(GenerationError::EmptyPayload("image"));
        assert_matches!(generate_image(&p, "a fox").await, Err(e) if e.is_payload());
    }

    #[tokio::test]
    async fn storyboard_assets_join_both_calls() {
        let p = ScriptedProvider::new().image().text(r#"{"shotType":"Wide Angle"}"#);
        let (img, info) = generate_storyboard_assets(&p, "the bridge falls", PanelStyle::Anime).await.unwrap();
        assert_eq!(info.shot_type, "Wide Angle");
        assert_eq!(img.mime_type, "image/jpeg");
        assert!(p.image_prompts.lock().unwrap()[0].contains("anime style"));
        assert!(p.text_prompts.lock().unwrap()[0].contains("\"the bridge falls\""));
    }

    #[tokio::test]
    async fn storyboard_fails_when_either_side_fails() {
        let p = ScriptedProvider::new()
            .image_err(GenerationError::EmptyPayload("image"))
            .text(r#"{"shotType":"Close-up"}"#);
        assert_matches!(
            generate_storyboard_assets(&p, "s", PanelStyle::Anime).await,
            Err(GenerationError::EmptyPayload("image"))
        );
        assert_eq!(p.calls(), 2);

        let p = ScriptedProvider::new().image().text("not json");
        assert_matches!(
            generate_storyboard_assets(&p, "s", PanelStyle::WesternComic).await,
            Err(GenerationError::MalformedJson { .. })
        );
        assert_eq!(p.calls(), 2);
    }

    /// The image only arrives once the shot info has been requested, so a
    /// sequential image-then-info flow never finishes.
    struct GatedProvider {
        info_requested: tokio::sync::Notify,
    }

    #[async_trait::async_trait]
    impl Provider for GatedProvider {
        async fn generate_text(&self, _prompt: &str) -> Result<String, GenerationError> {
            self.info_requested.notify_one();
            Ok(r#"{"shotType":"Wide Angle"}"#.to_string())
        }

        async fn generate_image(&self, _prompt: &str) -> Result<ImagePayload, GenerationError> {
            self.info_requested.notified().await;
            Ok(ImagePayload { bytes_base64: "/9j/4AAQ".into(), mime_type: "image/jpeg".into() })
        }
    }

    #[tokio::test]
    async fn storyboard_calls_run_concurrently() {
        let p = GatedProvider { info_requested: tokio::sync::Notify::new() };
        let res = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            generate_storyboard_assets(&p, "the bridge falls", PanelStyle::Anime),
        )
        .await;
        assert_matches!(res, Ok(Ok((_, info))) if info.shot_type == "Wide Angle");
    }
}
