use anyhow::Context;
use clap::Parser;

mod adapter;
mod cli;
mod config;
mod errors;
mod extract;
mod log;
mod menu;
mod model;
mod prompt;
mod provider;
mod ux;
mod views;
mod wire;

use cli::Command;
use menu::ViewId;

fn one_shot(cmd: &Command) -> Option<(ViewId, Vec<String>)> {
    let picked = match cmd.clone() {
        Command::Outline { idea } => (ViewId::Outline, vec![idea]),
        Command::Character { description } => (ViewId::Characters, vec![description]),
        Command::Location { description } => (ViewId::Locations, vec![description]),
        Command::Storyboard { scene } => (ViewId::Storyboard, vec![scene]),
        Command::Voice { character, scene } => (ViewId::Voice, vec![character, scene]),
        Command::Marketing { title, logline } => (ViewId::Marketing, vec![title, logline]),
        Command::Studio { .. } | Command::Menu => return None,
    };
    Some(picked)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let _ = dotenvy::dotenv();
    log::init(args.debug, |k| std::env::var(k).ok());

    let command = args.command();
    if let Command::Menu = command {
        ux::show_menu();
        return Ok(());
    }

    // A missing credential is fatal; no view is built without one.
    let cfg = config::Config::resolve(args.config.as_deref(), |k| std::env::var(k).ok(), args.overrides())
        .context("loading configuration")?;
    tracing::debug!(text_model = %cfg.text_model, image_model = %cfg.image_model, "configuration resolved");

    let prov = provider::make_provider(&cfg)?;
    let mut studio = views::Studio::default();

    if let Command::Studio { view } = command {
        return ux::run_studio(prov.as_ref(), &mut studio, view).await;
    }

    let Some((id, values)) = one_shot(&command) else {
        return Ok(());
    };
    let label = menu::resolve(Some(id.as_str())).label;
    let screen = studio
        .screen(id)
        .context("no screen for one-shot command")?;
    screen.fill(values);

    match ux::run_screen(screen, prov.as_ref(), label).await {
        Ok(rendered) => {
            if args.json {
                println!("{}", screen.latest_json()?);
            } else {
                println!("{}", rendered);
            }
            Ok(())
        }
        Err(msg) => {
            ux::show_error(&msg);
            std::process::exit(1);
        }
    }
}
