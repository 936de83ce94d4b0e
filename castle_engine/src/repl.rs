//! REPL and command handling.
//!
//! The game runs in a read-eval-print loop. [`Interpreter`] turns one parsed
//! [`Command`] into calls on the [`CastleWorld`] and remembers just enough about the
//! previous command to gate `use` and confirm `exit`. Anything that reaches beyond
//! the world (saving, restarting, quitting) is handed back to the
//! [`Session`](crate::Session) as a [`Flow`].

pub mod input;

use anyhow::Result;
use log::{info, warn};

use crate::command::Command;
use crate::game::{DropError, HELP_TEXT, PickError};
use crate::persistence::Persistence;
use crate::session::Session;
use crate::style::GameStyle;
use crate::{CastleWorld, Display, WorldError};

use input::{InputEvent, InputManager};

pub const COMMAND_NOT_FOUND: &str = "Command not found, help will show a list of all the commands";
pub const ITEM_REQUIRED: &str =
    "Command not found, help will show a list of all the commands\nRemember to specify the item when required";
pub const CONFIRM_EXIT: &str = "Save game?\nEnter save or exit";
pub const GAME_ENDED: &str = "The game is come to an end. \nEnter: restart or exit";
pub const USE_NEEDS_INTERACT: &str = "You have to interact with an item before utilize command use";

/// Control flow signal returned to the input loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// What the session should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
    Restart,
    Save { then_exit: bool },
}

/// The part of the previous command that later commands depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastCommand {
    #[default]
    Other,
    /// A successful `interact`; `use` is allowed.
    Interact,
    /// An unconfirmed `exit`.
    Exit,
}

/// Per-session command state.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    last: LastCommand,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> LastCommand {
        self.last
    }

    /// Forget everything, as at the start of a new or loaded game.
    pub fn reset(&mut self) {
        self.last = LastCommand::Other;
    }

    /// Run one command against the world.
    ///
    /// User mistakes are shown on the display and never returned as errors.
    ///
    /// # Errors
    /// - if the world refers to an item or room it does not contain
    pub fn dispatch(
        &mut self,
        world: &mut CastleWorld,
        command: &Command,
        view: &mut dyn Display,
    ) -> Result<Flow, WorldError> {
        let finished = world.victory || world.player.is_defeated();
        match command {
            Command::Exit => {
                if finished || self.last == LastCommand::Exit {
                    return Ok(Flow::Exit);
                }
                view.show(CONFIRM_EXIT);
                self.last = LastCommand::Exit;
            },
            Command::Restart => return Ok(Flow::Restart),
            _ if finished => view.show(GAME_ENDED),
            Command::Save => {
                let then_exit = self.last == LastCommand::Exit;
                self.last = LastCommand::Other;
                return Ok(Flow::Save { then_exit });
            },
            Command::Help => view.show(HELP_TEXT),
            Command::Status => view.show(&world.player.status(&world.items)),
            Command::Look => {
                let room = world.player_room_ref()?;
                view.show(&world.player.look_around(room, &world.items));
                self.last = LastCommand::Other;
            },
            Command::Go(direction) => {
                if world.go(direction.as_deref(), view)?.is_some() {
                    self.last = LastCommand::Other;
                }
            },
            Command::Pick(thing) => match world.pick(thing) {
                Ok(_) => {
                    view.show(&format!("{thing} picked up"));
                    self.last = LastCommand::Other;
                },
                Err(PickError::World(err)) => return Err(err),
                Err(err) => view.show(&err.to_string()),
            },
            Command::Drop(thing) => match world.drop_item(thing) {
                Ok(_) => {
                    view.show(&format!("{thing} dropped"));
                    self.last = LastCommand::Other;
                },
                Err(DropError::World(err)) => return Err(err),
                Err(err) => view.show(&err.to_string()),
            },
            Command::Interact(thing) => {
                if let Some(id) = world.interact(thing, view)? {
                    world.remember_interaction(id);
                    self.last = LastCommand::Interact;
                }
            },
            Command::UseItem(thing) => {
                if self.last == LastCommand::Interact {
                    world.use_item(thing, view)?;
                } else {
                    view.show(USE_NEEDS_INTERACT);
                }
            },
            Command::Incomplete => view.show(ITEM_REQUIRED),
            Command::Unknown => view.show(COMMAND_NOT_FOUND),
        }
        Ok(Flow::Continue)
    }
}

/// Run the main read-eval-print loop on a started session until the player quits.
///
/// A restart that came due while waiting for input is carried out before the
/// line that ended the wait is handled.
///
/// # Errors
/// - if reading input fails for good, or the session hits an inconsistent world
pub fn run_repl<D: Display, P: Persistence>(session: &mut Session<D, P>) -> Result<()> {
    let mut input_manager = InputManager::new(&session.game_slug());
    loop {
        session.poll_events()?;
        let prompt = "\n> ".prompt_style().to_string();
        let line = match input_manager.read_line(&prompt)? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => {
                info!("input closed, leaving the game");
                session.quit();
                break;
            },
            InputEvent::Interrupted => {
                warn!("input interrupted");
                continue;
            },
        };
        session.poll_events()?;
        if session.handle_line(&line)? == ReplControl::Quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_command;
    use crate::loader::build_world_from_def;
    use crate::Transcript;

    fn castle() -> CastleWorld {
        build_world_from_def(&castle_data::castle_world(), "Ada").expect("castle builds")
    }

    fn run(interp: &mut Interpreter, world: &mut CastleWorld, view: &mut Transcript, line: &str) -> Flow {
        interp
            .dispatch(world, &parse_command(line), view)
            .expect("consistent world")
    }

    #[test]
    fn exit_needs_confirmation() {
        let (mut interp, mut world, mut view) = (Interpreter::new(), castle(), Transcript::new());
        assert_eq!(run(&mut interp, &mut world, &mut view, "exit"), Flow::Continue);
        assert_eq!(view.screen(), CONFIRM_EXIT);
        assert_eq!(run(&mut interp, &mut world, &mut view, "exit game"), Flow::Exit);
    }

    #[test]
    fn save_after_exit_saves_then_exits() {
        let (mut interp, mut world, mut view) = (Interpreter::new(), castle(), Transcript::new());
        assert_eq!(run(&mut interp, &mut world, &mut view, "sv"), Flow::Save { then_exit: false });
        run(&mut interp, &mut world, &mut view, "exit");
        assert_eq!(run(&mut interp, &mut world, &mut view, "save"), Flow::Save { then_exit: true });
    }

    #[test]
    fn use_requires_a_preceding_interact() {
        let (mut interp, mut world, mut view) = (Interpreter::new(), castle(), Transcript::new());
        run(&mut interp, &mut world, &mut view, "pick note");
        run(&mut interp, &mut world, &mut view, "use note");
        assert_eq!(view.screen(), USE_NEEDS_INTERACT);

        run(&mut interp, &mut world, &mut view, "interact door");
        assert_eq!(interp.last(), LastCommand::Interact);
        run(&mut interp, &mut world, &mut view, "use note");
        assert_eq!(view.screen(), "You can't use this item here");
        assert_eq!(interp.last(), LastCommand::Interact);

        run(&mut interp, &mut world, &mut view, "look");
        run(&mut interp, &mut world, &mut view, "use note");
        assert_eq!(view.screen(), USE_NEEDS_INTERACT);
    }

    #[test]
    fn pick_and_drop_messages() {
        let (mut interp, mut world, mut view) = (Interpreter::new(), castle(), Transcript::new());
        run(&mut interp, &mut world, &mut view, "pk note");
        assert_eq!(view.screen(), "note picked up");
        run(&mut interp, &mut world, &mut view, "pick armour");
        assert_eq!(view.screen(), "You cannot pick this item");
        run(&mut interp, &mut world, &mut view, "dp note");
        assert_eq!(view.screen(), "note dropped");
        run(&mut interp, &mut world, &mut view, "drop note");
        assert_eq!(view.screen(), "note must be in your inventory to be dropped");
    }

    #[test]
    fn malformed_input_messages() {
        let (mut interp, mut world, mut view) = (Interpreter::new(), castle(), Transcript::new());
        run(&mut interp, &mut world, &mut view, "pick");
        assert_eq!(view.screen(), ITEM_REQUIRED);
        run(&mut interp, &mut world, &mut view, "dance with the armour");
        assert_eq!(view.screen(), COMMAND_NOT_FOUND);
    }

    #[test]
    fn status_and_look() {
        let (mut interp, mut world, mut view) = (Interpreter::new(), castle(), Transcript::new());
        run(&mut interp, &mut world, &mut view, "st");
        assert_eq!(view.screen(), "You have 3 life points\nYour inventory is empty");
        run(&mut interp, &mut world, &mut view, "look around");
        assert!(view.screen().starts_with("You see: \n- "));
        assert!(view.screen().contains("- note\n"));
    }

    #[test]
    fn a_finished_game_only_accepts_exit_and_restart() {
        let (mut interp, mut world, mut view) = (Interpreter::new(), castle(), Transcript::new());
        world.declare_victory();
        run(&mut interp, &mut world, &mut view, "look");
        assert_eq!(view.screen(), GAME_ENDED);
        assert_eq!(run(&mut interp, &mut world, &mut view, "restart"), Flow::Restart);
        assert_eq!(run(&mut interp, &mut world, &mut view, "exit"), Flow::Exit);
    }
}
