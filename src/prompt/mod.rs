use serde::Serialize;
use std::fmt;

/// Art direction for a storyboard panel. Alternates panel to panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelStyle {
    Anime,
    WesternComic,
}

impl PanelStyle {
    /// Style for the panel with 1-based sequence number `seq`.
    pub fn for_panel(seq: u64) -> Self {
        if seq % 2 == 1 { PanelStyle::Anime } else { PanelStyle::WesternComic }
    }

    fn phrase(self) -> &'static str {
        match self {
            PanelStyle::Anime => "anime",
            PanelStyle::WesternComic => "western comic book",
        }
    }
}

impl fmt::Display for PanelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

fn json_only() -> &'static str {
    "Do not include any explanatory text outside of the JSON object."
}

pub fn outline_prompt(idea: &str) -> String {
    format!(
        "Based on the following idea, create a detailed story outline for an animated short film. \
The output must be a single JSON object with the following structure: \
{{title: string, logline: string, acts: [{{act: number, title: string, summary: string, scenes: [{{scene: number, description: string}}]}}]}}. \
{} Idea: \"{}\"",
        json_only(),
        idea
    )
}

pub fn storyboard_info_prompt(scene: &str) -> String {
    format!(
        "For the scene \"{}\", provide a concise shot type description. \
Respond in a single JSON object format: {{\"shotType\": \"e.g., Medium Shot, Wide Angle, etc.\"}}. {}",
        scene,
        json_only()
    )
}

pub fn marketing_prompt(title: &str, logline: &str) -> String {
    format!(
        "Generate marketing materials for an animated project titled \"{}\" with the logline: \"{}\". \
Provide a response in a single JSON object with three keys: \
\"taglines\" (an array of 3 strings), \
\"socialMediaPost\" (a short, engaging post for social media), and \
\"shortSynopsis\" (a one-paragraph synopsis). {}",
        title,
        logline,
        json_only()
    )
}

pub fn voice_prompt(character: &str, scene: &str) -> String {
    format!(
        "Generate voice development details for a character with the description: \"{}\". \
They are in a scene with this context: \"{}\". \
Provide a response as a single JSON object with two keys: \
\"voiceDescription\" (a description of the character's voice tone, pitch, and style) and \
\"sampleLines\" (an array of 3 sample lines of dialogue for this scene). {}",
        character,
        scene,
        json_only()
    )
}

pub fn character_image_prompt(description: &str) -> String {
    format!(
        "Photorealistic, full body portrait of: {}. cinematic lighting, high detail, concept art style.",
        description
    )
}

pub fn location_image_prompt(description: &str) -> String {
    format!(
        "Breathtaking animated background art of: {}. wide angle, epic scale, vibrant colors, matte painting style.",
        description
    )
}

pub fn storyboard_image_prompt(scene: &str, style: PanelStyle) -> String {
    format!(
        "Dynamic animation storyboard panel for the scene: \"{}\". dramatic lighting, clear action, {} style.",
        scene, style
    )
}
