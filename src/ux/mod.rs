use async_trait::async_trait;
use colored::Colorize;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::menu::{self, ViewId};
use crate::model::{CharacterProfile, ImageRef, LocationProfile, MarketingKit, StoryOutline, StoryboardPanel, VoiceProfile};
use crate::provider::Provider;
use crate::views::{
    CharacterView, Entry, Feed, LocationView, MarketingView, OutlineView, StoryboardView, Studio, ViewState, VoiceView,
    COMMUNICATION_ERROR,
};

/// ========================================
/// Rendering
/// ========================================

fn image_line(img: &ImageRef) -> String {
    let uri = img.data_uri();
    let shown: String = uri.chars().take(48).collect();
    format!(
        "{} {} ({})  {}…",
        "image:".dimmed(),
        img.mime_type,
        format_size(img.bytes.len(), BINARY),
        shown.dimmed()
    )
}

fn stamp<T>(e: &Entry<T>) -> String {
    format!("#{} · {}", e.seq, e.created_at.format("%H:%M:%S")).dimmed().to_string()
}

pub fn render_outline(e: &Entry<StoryOutline>) -> String {
    let o = &e.item;
    let mut out = vec![
        format!("{}  {}", o.title.bold(), stamp(e)),
        o.logline.italic().to_string(),
    ];
    for act in &o.acts {
        out.push(format!("\n{} {}: {}", "Act".cyan().bold(), act.act, act.title.bold()));
        out.push(format!("  {}", act.summary));
        for scene in &act.scenes {
            out.push(format!("    {} {}: {}", "Scene".magenta(), scene.scene, scene.description));
        }
    }
    out.join("\n")
}

pub fn render_character(e: &Entry<CharacterProfile>) -> String {
    let c = &e.item;
    format!("{}  {}\n{}\n{}", c.name.bold(), stamp(e), c.description, image_line(&c.image))
}

pub fn render_location(e: &Entry<LocationProfile>) -> String {
    let l = &e.item;
    format!("{}  {}\n{}\n{}", l.name.bold(), stamp(e), l.description, image_line(&l.image))
}

pub fn render_panel(e: &Entry<StoryboardPanel>) -> String {
    let p = &e.item;
    format!(
        "{} {}  {}  {}\n{}\n{}",
        "Scene".bold(),
        p.scene,
        format!("[{}]", p.shot_type).yellow().bold(),
        format!("({} style)", p.style).dimmed(),
        p.description,
        image_line(&p.image)
    )
}

pub fn render_voice(e: &Entry<VoiceProfile>) -> String {
    let v = &e.item;
    let mut out = vec![format!("{}  {}", "Voice Profile".bold(), stamp(e)), v.voice_description.clone()];
    out.push("Sample Lines:".cyan().bold().to_string());
    for line in &v.sample_lines {
        out.push(format!("  \"{}\"", line));
    }
    out.join("\n")
}

pub fn render_marketing(e: &Entry<MarketingKit>) -> String {
    let m = &e.item;
    let mut out = vec![format!("{}  {}", "Taglines".cyan().bold(), stamp(e))];
    for t in &m.taglines {
        out.push(format!("  • {}", t));
    }
    out.push("Social Media Post".cyan().bold().to_string());
    out.push(format!("  {}", m.social_media_post));
    out.push("Short Synopsis".cyan().bold().to_string());
    out.push(format!("  {}", m.short_synopsis));
    out.join("\n")
}

pub fn show_menu() {
    println!("\n{}", "┏━━━━━━━━━━━━━━━━━━━━━━ AnimAI Studio ━━━━━━━━━━━━━━━━━━━━━┓".bold());
    for item in menu::MENU {
        println!("  {:<12} {}", item.id.as_str().green().bold(), item.label);
    }
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());
}

pub fn show_dashboard() {
    println!("\n{}", "Welcome to Your AI Animation Studio".bold());
    for item in menu::features() {
        println!("  {:<12} {:<20} {}", item.id.as_str().green().bold(), item.label.bold(), item.blurb.dimmed());
    }
}

pub fn show_error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// ========================================
/// Screens
/// ========================================

/// Uniform face of every feature view for the terminal front-end.
#[async_trait]
pub trait Screen: Send {
    fn labels(&self) -> &'static [&'static str];
    fn fill(&mut self, values: Vec<String>);
    /// Rendered newest entry on success, user-facing message on failure.
    async fn run(&mut self, provider: &dyn Provider) -> Result<String, String>;
    fn history(&self) -> Vec<String>;
    fn latest_json(&self) -> serde_json::Result<String>;
}

fn failure(state: &ViewState) -> String {
    state.error.clone().unwrap_or_else(|| COMMUNICATION_ERROR.to_string())
}

fn latest_json<T: Serialize>(feed: &Feed<T>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&feed.latest())
}

fn take(values: &mut Vec<String>) -> String {
    if values.is_empty() { String::new() } else { values.remove(0) }
}

#[async_trait]
impl Screen for OutlineView {
    fn labels(&self) -> &'static [&'static str] { &["Story idea"] }
    fn fill(&mut self, mut v: Vec<String>) { self.idea = take(&mut v); }
    async fn run(&mut self, provider: &dyn Provider) -> Result<String, String> {
        match self.submit(provider).await {
            Ok(e) => Ok(render_outline(e)),
            Err(_) => Err(failure(&self.state)),
        }
    }
    fn history(&self) -> Vec<String> { self.feed.iter().map(render_outline).collect() }
    fn latest_json(&self) -> serde_json::Result<String> { latest_json(&self.feed) }
}

#[async_trait]
impl Screen for CharacterView {
    fn labels(&self) -> &'static [&'static str] { &["Character description"] }
    fn fill(&mut self, mut v: Vec<String>) { self.description = take(&mut v); }
    async fn run(&mut self, provider: &dyn Provider) -> Result<String, String> {
        match self.submit(provider).await {
            Ok(e) => Ok(render_character(e)),
            Err(_) => Err(failure(&self.state)),
        }
    }
    fn history(&self) -> Vec<String> { self.feed.iter().map(render_character).collect() }
    fn latest_json(&self) -> serde_json::Result<String> { latest_json(&self.feed) }
}

#[async_trait]
impl Screen for LocationView {
    fn labels(&self) -> &'static [&'static str] { &["Location description"] }
    fn fill(&mut self, mut v: Vec<String>) { self.description = take(&mut v); }
    async fn run(&mut self, provider: &dyn Provider) -> Result<String, String> {
        match self.submit(provider).await {
            Ok(e) => Ok(render_location(e)),
            Err(_) => Err(failure(&self.state)),
        }
    }
    fn history(&self) -> Vec<String> { self.feed.iter().map(render_location).collect() }
    fn latest_json(&self) -> serde_json::Result<String> { latest_json(&self.feed) }
}

#[async_trait]
impl Screen for StoryboardView {
    fn labels(&self) -> &'static [&'static str] { &["Scene description"] }
    fn fill(&mut self, mut v: Vec<String>) { self.scene = take(&mut v); }
    async fn run(&mut self, provider: &dyn Provider) -> Result<String, String> {
        match self.submit(provider).await {
            Ok(e) => Ok(render_panel(e)),
            Err(_) => Err(failure(&self.state)),
        }
    }
    fn history(&self) -> Vec<String> { self.feed.iter().map(render_panel).collect() }
    fn latest_json(&self) -> serde_json::Result<String> { latest_json(&self.feed) }
}

#[async_trait]
impl Screen for VoiceView {
    fn labels(&self) -> &'static [&'static str] { &["Character description", "Scene context"] }
    fn fill(&mut self, mut v: Vec<String>) {
        self.character = take(&mut v);
        self.scene = take(&mut v);
    }
    async fn run(&mut self, provider: &dyn Provider) -> Result<String, String> {
        match self.submit(provider).await {
            Ok(e) => Ok(render_voice(e)),
            Err(_) => Err(failure(&self.state)),
        }
    }
    fn history(&self) -> Vec<String> { self.feed.iter().map(render_voice).collect() }
    fn latest_json(&self) -> serde_json::Result<String> { latest_json(&self.feed) }
}

#[async_trait]
impl Screen for MarketingView {
    fn labels(&self) -> &'static [&'static str] { &["Project title", "Logline"] }
    fn fill(&mut self, mut v: Vec<String>) {
        self.title = take(&mut v);
        self.logline = take(&mut v);
    }
    async fn run(&mut self, provider: &dyn Provider) -> Result<String, String> {
        match self.submit(provider).await {
            Ok(e) => Ok(render_marketing(e)),
            Err(_) => Err(failure(&self.state)),
        }
    }
    fn history(&self) -> Vec<String> { self.feed.iter().map(render_marketing).collect() }
    fn latest_json(&self) -> serde_json::Result<String> { latest_json(&self.feed) }
}

impl Studio {
    pub fn screen(&mut self, id: ViewId) -> Option<&mut dyn Screen> {
        match id {
            ViewId::Dashboard => None,
            ViewId::Outline => Some(&mut self.outline),
            ViewId::Characters => Some(&mut self.characters),
            ViewId::Storyboard => Some(&mut self.storyboard),
            ViewId::Locations => Some(&mut self.locations),
            ViewId::Voice => Some(&mut self.voice),
            ViewId::Marketing => Some(&mut self.marketing),
        }
    }
}

/// Submit one round on `screen` with a spinner while the call is in flight.
pub async fn run_screen(screen: &mut dyn Screen, provider: &dyn Provider, label: &str) -> Result<String, String> {
    let pb = spinner(&format!("Generating {}…", label));
    let res = screen.run(provider).await;
    pb.finish_and_clear();
    res
}

/// ========================================
/// Interactive session
/// ========================================

#[derive(Debug, PartialEq)]
enum Input {
    Text(String),
    Back,
    History,
    Quit,
}

fn classify(line: Option<String>) -> Input {
    let Some(line) = line else { return Input::Quit };
    match line.trim() {
        "quit" | "exit" | ":q" => Input::Quit,
        "back" | "menu" => Input::Back,
        "history" => Input::History,
        _ => Input::Text(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

fn ask(label: &str, lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<Input> {
    print!("{} {} ", label.bold(), ">".dimmed());
    io::stdout().flush()?;
    Ok(classify(lines.next().transpose()?))
}

pub async fn run_studio(provider: &dyn Provider, studio: &mut Studio, start: Option<ViewId>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut active = menu::resolve(start.map(ViewId::as_str)).id;

    println!("{}", "Type 'back' for the dashboard, 'history' for past results, 'quit' to exit.".dimmed());

    loop {
        let item = menu::resolve(Some(active.as_str()));
        let Some(screen) = studio.screen(active) else {
            show_dashboard();
            match ask("Open module", &mut lines)? {
                Input::Quit => return Ok(()),
                Input::Text(id) => {
                    let picked = menu::resolve(Some(&id));
                    if picked.id == ViewId::Dashboard && !id.trim().eq_ignore_ascii_case("dashboard") {
                        show_error(&format!("unknown module '{}'", id.trim()));
                    }
                    active = picked.id;
                }
                Input::Back | Input::History => {}
            }
            continue;
        };

        println!("\n{}", format!("── {} ──", item.label).bold());
        let mut values = Vec::new();
        for label in screen.labels() {
            match ask(label, &mut lines)? {
                Input::Text(v) => values.push(v),
                Input::Quit => return Ok(()),
                Input::Back => {
                    active = ViewId::Dashboard;
                    break;
                }
                Input::History => {
                    let past = screen.history();
                    if past.is_empty() {
                        println!("{}", "(nothing generated yet)".dimmed());
                    }
                    for r in past {
                        println!("{}\n", r);
                    }
                    break;
                }
            }
        }
        if values.len() != screen.labels().len() {
            continue;
        }

        screen.fill(values);
        match run_screen(screen, provider, item.label).await {
            Ok(rendered) => println!("\n{}\n", rendered),
            Err(msg) => show_error(&msg),
        }
    }
}
