//! Session lifecycle.
//!
//! A [`Session`] takes the player from the name prompt through new/load, play,
//! restarts and saves to the final exit. It owns the display, the persistence
//! backend and the restart timer; the world itself is rebuilt from the content
//! definition on every new game or restart.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

use anyhow::{Context, Result};
use castle_data::WorldDef;
use log::{debug, info, warn};

use crate::command::parse_command;
use crate::loader::build_world_from_def;
use crate::persistence::{LoadOutcome, Persistence};
use crate::repl::{Flow, Interpreter, ReplControl};
use crate::slug::sanitize_slug;
use crate::timer::{RestartTimer, SessionEvent};
use crate::{CastleWorld, Display};

pub const ASK_NAME: &str = "Welcome!\nInsert your name";
pub const TRY_AGAIN: &str = "Try again.";
pub const REMOTE_DISABLED: &str = "<!> Cloud saves are disabled for this session <!>";
pub const REMOTE_UNAVAILABLE: &str =
    "Cloud saves are not available in this session. Make sure to have an internet connection or choose new game";

/// Where the session is in its flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    AskName,
    ChooseStart { name: String },
    Playing,
    Finished,
}

pub struct Session<D: Display, P: Persistence> {
    content: WorldDef,
    view: D,
    persistence: P,
    stage: Stage,
    world: Option<CastleWorld>,
    interpreter: Interpreter,
    timer: RestartTimer,
    restart_delay: Duration,
    defeat_reported: bool,
    events_tx: Sender<SessionEvent>,
    events_rx: Receiver<SessionEvent>,
}

impl<D: Display, P: Persistence> Session<D, P> {
    pub fn new(content: WorldDef, view: D, persistence: P, restart_delay: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            content,
            view,
            persistence,
            stage: Stage::AskName,
            world: None,
            interpreter: Interpreter::new(),
            timer: RestartTimer::new(),
            restart_delay,
            defeat_reported: false,
            events_tx,
            events_rx,
        }
    }

    pub fn view(&self) -> &D {
        &self.view
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn world(&self) -> Option<&CastleWorld> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut CastleWorld> {
        self.world.as_mut()
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    pub fn restart_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// File-safe name of the loaded content, from its slug or else its title.
    pub fn game_slug(&self) -> String {
        let game = &self.content.game;
        if game.slug.trim().is_empty() {
            sanitize_slug(&game.title)
        } else {
            sanitize_slug(&game.slug)
        }
    }

    /// Greet the player and ask for a name.
    pub fn start(&mut self) {
        self.stage = Stage::AskName;
        self.view.show(ASK_NAME);
        if !self.persistence.remote_available() {
            warn!("remote saves unavailable for this session");
            self.view.update(REMOTE_DISABLED);
        }
    }

    /// Handle one line of player input.
    ///
    /// # Errors
    /// - if the content cannot be built into a world, or the world is inconsistent
    pub fn handle_line(&mut self, line: &str) -> Result<ReplControl> {
        match self.stage.clone() {
            Stage::AskName => self.take_name(line),
            Stage::ChooseStart { name } => self.choose_start(&name, line)?,
            Stage::Playing => return self.play(line),
            Stage::Finished => return Ok(ReplControl::Quit),
        }
        Ok(ReplControl::Continue)
    }

    /// Carry out anything the restart timer delivered.
    ///
    /// # Errors
    /// - if the restarted world cannot be built
    pub fn poll_events(&mut self) -> Result<()> {
        loop {
            match self.events_rx.try_recv() {
                Ok(SessionEvent::RestartDue(generation)) if !self.timer.is_current(generation) => {
                    debug!("ignoring cancelled restart #{generation}");
                },
                Ok(SessionEvent::RestartDue(generation)) => {
                    info!("restart timer #{generation} fired");
                    self.timer.clear_fired();
                    if self.stage == Stage::Playing {
                        self.restart()?;
                    }
                },
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return Ok(()),
            }
        }
    }

    /// Leave without asking, cancelling any pending restart.
    pub fn quit(&mut self) {
        self.timer.cancel();
        self.stage = Stage::Finished;
        info!("session finished");
    }

    fn take_name(&mut self, line: &str) {
        let name = line.trim();
        if name.is_empty() {
            self.view.show(ASK_NAME);
            return;
        }
        info!("player introduced as '{name}'");
        self.view.show(&format!(
            "Hi {name}! Start new game or load an old one?\n(new game, load game)"
        ));
        self.stage = Stage::ChooseStart { name: name.to_string() };
    }

    fn choose_start(&mut self, name: &str, line: &str) -> Result<()> {
        match line.trim().to_lowercase().as_str() {
            "new game" | "new" => self.new_game(name),
            "load game" | "load" => {
                self.load_game(name);
                Ok(())
            },
            _ => {
                self.view.show(TRY_AGAIN);
                Ok(())
            },
        }
    }

    fn new_game(&mut self, name: &str) -> Result<()> {
        let world = build_world_from_def(&self.content, name).context("while building a new game")?;
        info!("new game for '{name}'");
        self.begin(world);
        if let Some(world) = &self.world {
            let welcome = world.welcome();
            self.view.show_image("hall");
            self.view.show(&welcome);
        }
        Ok(())
    }

    fn load_game(&mut self, name: &str) {
        let (world, source) = match self.persistence.load(name) {
            LoadOutcome::Remote(world) => (world, "Game loaded from cloud correctly"),
            LoadOutcome::Local(world) => (world, "Game loaded from local saves due to absent internet connection"),
            LoadOutcome::Missing | LoadOutcome::Failed(_) => {
                if self.persistence.remote_available() {
                    self.view.show(&format!(
                        "No game saved with the name {name} was found, please try again.\nInsert your name"
                    ));
                    self.stage = Stage::AskName;
                } else {
                    self.view.show(REMOTE_UNAVAILABLE);
                }
                return;
            },
        };
        let room = world
            .player_room_ref()
            .map(|room| (room.name.clone(), room.description.clone()));
        self.begin(*world);
        match room {
            Ok((room_name, description)) => {
                self.view.show_image(&room_name);
                self.view.show(&format!("{source}\n{description}"));
            },
            Err(err) => {
                warn!("loaded game has no current room: {err}");
                self.view.show(source);
            },
        }
    }

    fn begin(&mut self, world: CastleWorld) {
        self.timer.cancel();
        self.world = Some(world);
        self.interpreter.reset();
        self.defeat_reported = false;
        self.stage = Stage::Playing;
    }

    fn play(&mut self, line: &str) -> Result<ReplControl> {
        let Some(world) = self.world.as_mut() else {
            self.stage = Stage::AskName;
            self.view.show(ASK_NAME);
            return Ok(ReplControl::Continue);
        };
        let command = parse_command(line);
        let flow = self.interpreter.dispatch(world, &command, &mut self.view)?;
        match flow {
            Flow::Continue => self.check_defeat(),
            Flow::Exit => {
                self.quit();
                return Ok(ReplControl::Quit);
            },
            Flow::Restart => self.restart()?,
            Flow::Save { then_exit } => {
                let report = self.persistence.save(&world.player.name, world);
                self.view.show(report.message());
                if then_exit {
                    self.quit();
                    return Ok(ReplControl::Quit);
                }
            },
        }
        Ok(ReplControl::Continue)
    }

    fn check_defeat(&mut self) {
        let defeated = self.world.as_ref().is_some_and(|w| w.player.is_defeated());
        if !defeated || self.defeat_reported {
            return;
        }
        self.defeat_reported = true;
        info!("player defeated, new game in {}s", self.restart_delay.as_secs());
        self.view.update(&format!(
            "You have 0 life points!\nGame over!      (a new game will start in {} seconds)",
            self.restart_delay.as_secs()
        ));
        self.timer.schedule(self.restart_delay, self.events_tx.clone());
    }

    /// Start over with a fresh world for the same player.
    ///
    /// # Errors
    /// - if the content cannot be built into a world
    pub fn restart(&mut self) -> Result<()> {
        let Some(name) = self.world.as_ref().map(|w| w.player.name.clone()) else {
            self.start();
            return Ok(());
        };
        info!("restarting game for '{name}'");
        self.new_game(&name)
    }
}
