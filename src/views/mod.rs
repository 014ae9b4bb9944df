//! Per-feature view state: inputs, call phase, last error and the result
//! feed. A controller validates its inputs, runs the matching adapter
//! operation and records the outcome.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use uuid::Uuid;

use crate::adapter;
use crate::errors::{GenerationError, ViewError};
use crate::model::{CharacterProfile, LocationProfile, MarketingKit, StoryOutline, StoryboardPanel, VoiceProfile};
use crate::prompt::{self, PanelStyle};
use crate::provider::Provider;

pub const COMMUNICATION_ERROR: &str = "An error occurred while communicating with the AI. Please try again.";

#[derive(Debug, Clone, Serialize)]
pub struct Entry<T> {
    pub seq: u64,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub item: T,
}

/// Newest-first, append-only result list. Sequence numbers start at 1 and
/// are handed out when an entry is recorded.
#[derive(Debug)]
pub struct Feed<T> {
    entries: VecDeque<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self { entries: VecDeque::new(), next_seq: 1 }
    }
}

impl<T> Feed<T> {
    /// Sequence number the next recorded entry will receive.
    pub fn peek_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn record(&mut self, item: T) -> &Entry<T> {
        let entry = Entry { seq: self.next_seq, id: Uuid::new_v4(), created_at: Utc::now(), item };
        self.next_seq += 1;
        self.entries.push_front(entry);
        &self.entries[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Entry<T>> {
        self.entries.front()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallPhase {
    #[default]
    Idle,
    InFlight,
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub phase: CallPhase,
    pub error: Option<String>,
}

impl ViewState {
    pub fn begin(&mut self) -> Result<(), ViewError> {
        if self.phase == CallPhase::InFlight {
            return Err(ViewError::Busy);
        }
        self.phase = CallPhase::InFlight;
        self.error = None;
        Ok(())
    }

    fn require(&mut self, fields: &[&str], message: &str) -> Result<(), ViewError> {
        if fields.iter().any(|f| f.trim().is_empty()) {
            self.error = Some(message.to_string());
            return Err(ViewError::Validation(message.to_string()));
        }
        Ok(())
    }

    /// Back to idle. Failures leave a user-facing message behind.
    fn settle<T>(&mut self, res: Result<T, GenerationError>, payload_message: &str) -> Result<T, ViewError> {
        self.phase = CallPhase::Idle;
        match res {
            Ok(v) => {
                self.error = None;
                Ok(v)
            }
            Err(e) => {
                let msg = if e.is_transport() { COMMUNICATION_ERROR } else { payload_message };
                self.error = Some(msg.to_string());
                Err(ViewError::Generation(e))
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct OutlineView {
    pub idea: String,
    pub state: ViewState,
    pub feed: Feed<StoryOutline>,
}

impl OutlineView {
    pub async fn submit(&mut self, provider: &dyn Provider) -> Result<&Entry<StoryOutline>, ViewError> {
        self.state.require(&[self.idea.as_str()], "Please enter a story idea.")?;
        self.state.begin()?;
        let res = adapter::generate_outline(provider, &self.idea).await;
        let outline = self.state.settle(res, "Failed to generate outline. The AI returned an invalid format.")?;
        self.idea.clear();
        Ok(self.feed.record(outline))
    }
}

#[derive(Debug, Default)]
pub struct CharacterView {
    pub description: String,
    pub state: ViewState,
    pub feed: Feed<CharacterProfile>,
}

impl CharacterView {
    pub async fn submit(&mut self, provider: &dyn Provider) -> Result<&Entry<CharacterProfile>, ViewError> {
        self.state.require(&[self.description.as_str()], "Please enter a character description.")?;
        self.state.begin()?;
        let res = adapter::generate_image(provider, &prompt::character_image_prompt(&self.description)).await;
        let image = self
            .state
            .settle(res, "Failed to generate character image. The AI may be experiencing issues.")?;
        let profile = CharacterProfile {
            name: format!("Character #{}", self.feed.peek_seq()),
            description: std::mem::take(&mut self.description),
            image,
        };
        Ok(self.feed.record(profile))
    }
}

#[derive(Debug, Default)]
pub struct LocationView {
    pub description: String,
    pub state: ViewState,
    pub feed: Feed<LocationProfile>,
}

impl LocationView {
    pub async fn submit(&mut self, provider: &dyn Provider) -> Result<&Entry<LocationProfile>, ViewError> {
        self.state.require(&[self.description.as_str()], "Please enter a location description.")?;
        self.state.begin()?;
        let res = adapter::generate_image(provider, &prompt::location_image_prompt(&self.description)).await;
        let image = self
            .state
            .settle(res, "Failed to generate location image. The AI may be experiencing issues.")?;
        let profile = LocationProfile {
            name: format!("Location #{}", self.feed.peek_seq()),
            description: std::mem::take(&mut self.description),
            image,
        };
        Ok(self.feed.record(profile))
    }
}

#[derive(Debug, Default)]
pub struct StoryboardView {
    pub scene: String,
    pub state: ViewState,
    pub feed: Feed<StoryboardPanel>,
}

impl StoryboardView {
    pub async fn submit(&mut self, provider: &dyn Provider) -> Result<&Entry<StoryboardPanel>, ViewError> {
        self.state.require(&[self.scene.as_str()], "Please enter a scene description.")?;
        self.state.begin()?;
        let seq = self.feed.peek_seq();
        let style = PanelStyle::for_panel(seq);
        let res = adapter::generate_storyboard_assets(provider, &self.scene, style).await;
        let (image, info) = self.state.settle(
            res,
            "Failed to generate complete storyboard panel. The AI may be experiencing issues.",
        )?;
        let panel = StoryboardPanel {
            scene: seq,
            description: std::mem::take(&mut self.scene),
            shot_type: info.shot_type,
            style,
            image,
        };
        Ok(self.feed.record(panel))
    }
}

#[derive(Debug, Default)]
pub struct VoiceView {
    pub character: String,
    pub scene: String,
    pub state: ViewState,
    pub feed: Feed<VoiceProfile>,
}

impl VoiceView {
    pub async fn submit(&mut self, provider: &dyn Provider) -> Result<&Entry<VoiceProfile>, ViewError> {
        self.state.require(
            &[self.character.as_str(), self.scene.as_str()],
            "Please fill out both character and scene descriptions.",
        )?;
        self.state.begin()?;
        let res = adapter::generate_voice_script_and_description(provider, &self.character, &self.scene).await;
        let profile = self
            .state
            .settle(res, "Failed to generate voice details. The AI returned an invalid format.")?;
        self.character.clear();
        self.scene.clear();
        Ok(self.feed.record(profile))
    }
}

#[derive(Debug, Default)]
pub struct MarketingView {
    pub title: String,
    pub logline: String,
    pub state: ViewState,
    pub feed: Feed<MarketingKit>,
}

impl MarketingView {
    pub async fn submit(&mut self, provider: &dyn Provider) -> Result<&Entry<MarketingKit>, ViewError> {
        self.state.require(
            &[self.title.as_str(), self.logline.as_str()],
            "Please provide both a project title and a logline.",
        )?;
        self.state.begin()?;
        let res = adapter::generate_marketing_copy(provider, &self.title, &self.logline).await;
        let kit = self
            .state
            .settle(res, "Failed to generate marketing copy. The AI returned an invalid format.")?;
        self.title.clear();
        self.logline.clear();
        Ok(self.feed.record(kit))
    }
}

/// Every view of one session.
#[derive(Debug, Default)]
pub struct Studio {
    pub outline: OutlineView,
    pub characters: CharacterView,
    pub storyboard: StoryboardView,
    pub locations: LocationView,
    pub voice: VoiceView,
    pub marketing: MarketingView,
}
