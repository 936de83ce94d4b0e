//! Output side of the game.
//!
//! The engine never prints; it talks to a [`Display`]. [`TerminalDisplay`] renders
//! to stdout, [`Transcript`] records everything for tests.

use std::fmt;
use std::io::Write;

use colored::Colorize;
use log::debug;
use textwrap::{fill, termwidth};

use crate::style::{GameStyle, normal_block};

/// Illustrations the front end can switch to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Scene {
    Hall,
    Studio,
    Kitchen,
    Lab,
    Dungeons,
    Victory,
}

impl Scene {
    /// Parse a room name or the `victory` token. Unknown tokens give `None`.
    pub fn from_token(token: &str) -> Option<Scene> {
        match token.trim().to_lowercase().as_str() {
            "hall" => Some(Scene::Hall),
            "studio" => Some(Scene::Studio),
            "kitchen" => Some(Scene::Kitchen),
            "lab" => Some(Scene::Lab),
            "dungeons" => Some(Scene::Dungeons),
            "victory" => Some(Scene::Victory),
            _ => None,
        }
    }

    /// Banner drawn by the terminal front end.
    pub fn caption(self) -> &'static str {
        match self {
            Scene::Hall => "~ The Great Hall ~",
            Scene::Studio => "~ The Studio ~",
            Scene::Kitchen => "~ The Kitchen ~",
            Scene::Lab => "~ The Laboratory ~",
            Scene::Dungeons => "~ The Dungeons ~",
            Scene::Victory => "*** FREEDOM ***",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Scene::Hall => "hall",
            Scene::Studio => "studio",
            Scene::Kitchen => "kitchen",
            Scene::Lab => "lab",
            Scene::Dungeons => "dungeons",
            Scene::Victory => "victory",
        };
        f.write_str(token)
    }
}

/// Where game text goes.
pub trait Display {
    /// Replace whatever is currently shown.
    fn show(&mut self, text: &str);
    /// Append a line below the current text.
    fn update(&mut self, text: &str);
    /// Switch the illustration. Unknown tokens are ignored.
    fn show_image(&mut self, token: &str);
}

/// One recorded [`Display`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Show(String),
    Update(String),
    Image(Scene),
}

/// A [`Display`] that remembers what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub events: Vec<DisplayEvent>,
    current: String,
    scene: Option<Scene>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text currently on screen: the last `show` plus any later `update`s.
    pub fn screen(&self) -> &str {
        &self.current
    }

    pub fn scene(&self) -> Option<Scene> {
        self.scene
    }

    /// Text of the most recent `show` or `update`.
    pub fn last_text(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            DisplayEvent::Show(text) | DisplayEvent::Update(text) => Some(text.as_str()),
            DisplayEvent::Image(_) => None,
        })
    }

    /// Forget every recorded call and blank the screen. The scene is kept.
    pub fn clear(&mut self) {
        self.events.clear();
        self.current.clear();
    }
}

impl Display for Transcript {
    fn show(&mut self, text: &str) {
        self.current = text.to_string();
        self.events.push(DisplayEvent::Show(text.to_string()));
    }

    fn update(&mut self, text: &str) {
        self.current.push('\n');
        self.current.push_str(text);
        self.events.push(DisplayEvent::Update(text.to_string()));
    }

    fn show_image(&mut self, token: &str) {
        if let Some(scene) = Scene::from_token(token) {
            self.scene = Some(scene);
            self.events.push(DisplayEvent::Image(scene));
        }
    }
}

/// Colored, wrapped output on stdout.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    scene: Option<Scene>,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn print_wrapped(text: &str) {
        let styled = if text.starts_with("YOU WON") {
            fill(text, normal_block()).victory_style()
        } else {
            fill(text, normal_block()).narrative_style()
        };
        println!("{styled}");
        let _ = std::io::stdout().flush();
    }
}

impl Display for TerminalDisplay {
    fn show(&mut self, text: &str) {
        println!();
        Self::print_wrapped(text);
    }

    fn update(&mut self, text: &str) {
        Self::print_wrapped(text);
    }

    fn show_image(&mut self, token: &str) {
        let Some(scene) = Scene::from_token(token) else {
            debug!("no illustration for '{token}'");
            return;
        };
        if self.scene == Some(scene) && scene != Scene::Victory {
            return;
        }
        self.scene = Some(scene);
        println!();
        println!("{:^width$}", scene.caption().scene_style(), width = termwidth());
        println!("{}", "-".repeat(termwidth().min(100)).dimmed());
    }
}
