use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;
use crate::menu::ViewId;

#[derive(Parser, Debug)]
#[command(name = "animai-studio", version, about = "AI animation studio: outlines, art, storyboards, voices and marketing copy")]
pub struct Args {
    /// TOML file with api_key, api_base, text_model, image_model, image_mime_type, timeout_secs
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub text_model: Option<String>,

    #[arg(long, global = true)]
    pub image_model: Option<String>,

    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Print results as JSON instead of formatted text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Interactive session; results accumulate until you quit
    Studio {
        #[arg(long, value_enum)]
        view: Option<ViewId>,
    },
    /// List the studio modules
    Menu,
    Outline {
        #[arg(long)]
        idea: String,
    },
    Character {
        #[arg(long)]
        description: String,
    },
    Location {
        #[arg(long)]
        description: String,
    },
    Storyboard {
        #[arg(long)]
        scene: String,
    },
    Voice {
        #[arg(long)]
        character: String,
        #[arg(long)]
        scene: String,
    },
    Marketing {
        #[arg(long)]
        title: String,
        #[arg(long)]
        logline: String,
    },
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Studio { view: None })
    }
}
