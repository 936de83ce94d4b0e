//! Terminal input for the game loop: line editing, history and tab completion
//! of commands and destinations.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

const VERBS: &[&str] = &[
    "drop", "exit", "exit game", "go", "go back", "help", "interact", "load game", "look", "look around", "new game",
    "pick", "restart", "restart game", "save", "save game", "status", "use",
];

const DIRECTIONS: &[&str] = &["north", "south", "east", "west"];

lazy_static! {
    static ref COMMAND_TERMS: Vec<String> = build_command_terms();
}

type ReplEditor = rustyline::Editor<CastleHelper, DefaultHistory>;

#[derive(Default)]
struct CastleHelper;

impl Helper for CastleHelper {}

impl Completer for CastleHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }
        let lower = prefix.to_lowercase();
        let pairs = COMMAND_TERMS
            .iter()
            .filter(|term| term.starts_with(&lower))
            .map(|term| Pair {
                display: term.clone(),
                replacement: term.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CastleHelper {
    type Hint = String;
}

impl Highlighter for CastleHelper {}

impl Validator for CastleHelper {}

fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    (start, trimmed.to_string())
}

/// Verbs, `go` with each compass direction and room name, and nothing else.
fn build_command_terms() -> Vec<String> {
    let rooms = castle_data::castle_world().rooms.into_iter().map(|room| room.name.to_lowercase());
    let mut terms: Vec<String> = VERBS.iter().map(ToString::to_string).collect();
    terms.extend(
        DIRECTIONS
            .iter()
            .map(ToString::to_string)
            .chain(rooms)
            .map(|target| format!("go {target}")),
    );
    terms.sort_unstable();
    terms.dedup();
    terms
}

/// Source of player input lines.
///
/// Uses a `rustyline` editor with completion and persistent history on a terminal,
/// and plain buffered stdin otherwise (pipes, scripted sessions). If the editor
/// fails mid-game the manager drops down to stdin and keeps going.
pub struct InputManager {
    editor: Option<LineEditor>,
}

impl InputManager {
    /// `namespace` names the history directory, so each game keeps its own history.
    pub fn new(namespace: &str) -> Self {
        if !io::stdin().is_terminal() {
            info!("stdin is not a terminal, reading plain lines");
            return Self { editor: None };
        }
        match LineEditor::open(namespace) {
            Ok(editor) => Self { editor: Some(editor) },
            Err(err) => {
                warn!("line editor unavailable ({err}), reading plain lines");
                Self { editor: None }
            },
        }
    }

    /// Read the next line.
    ///
    /// # Errors
    /// - if stdin itself cannot be read
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        if let Some(editor) = self.editor.as_mut() {
            match editor.read_line(prompt) {
                Ok(event) => return Ok(event),
                Err(err) => {
                    warn!("line editor failed ({err}), switching to plain lines");
                    self.editor = None;
                },
            }
        }
        read_stdin_line(prompt)
    }
}

struct LineEditor {
    editor: ReplEditor,
    history: Option<PathBuf>,
}

impl LineEditor {
    fn open(namespace: &str) -> io::Result<Self> {
        let mut editor = ReplEditor::new().map_err(into_io_error)?;
        editor.set_helper(Some(CastleHelper));
        let history = history_file_path(namespace);
        if let Some(path) = &history {
            restore_history(&mut editor, path);
        }
        Ok(Self { editor, history })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let line = match self.editor.readline(prompt) {
            Ok(line) => line,
            Err(err) => return convert_readline_error(err),
        };
        if !line.trim().is_empty() {
            self.remember(&line);
        }
        Ok(InputEvent::Line(line))
    }

    fn remember(&mut self, line: &str) {
        if let Err(err) = self.editor.add_history_entry(line) {
            warn!("could not add to history: {err}");
        }
        if let Some(path) = &self.history
            && let Err(err) = self.editor.save_history(path)
        {
            warn!("could not write history to {}: {err}", path.display());
        }
    }
}

fn restore_history(editor: &mut ReplEditor, path: &Path) {
    if let Some(dir) = path.parent()
        && let Err(err) = fs::create_dir_all(dir)
    {
        warn!("could not create history directory {}: {err}", dir.display());
    }
    match editor.load_history(path) {
        Ok(()) => info!("history restored from {}", path.display()),
        Err(ReadlineError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            info!("no history at {} yet", path.display());
        },
        Err(err) => warn!("could not read history from {}: {err}", path.display()),
    }
}

fn read_stdin_line(prompt: &str) -> io::Result<InputEvent> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(InputEvent::Eof);
    }
    Ok(InputEvent::Line(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        other => Err(into_io_error(other)),
    }
}

fn into_io_error(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(err) => err,
        other => io::Error::other(other),
    }
}

fn history_file_path(namespace: &str) -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| build_history_path(&base, namespace))
}

fn build_history_path(base: &Path, namespace: &str) -> PathBuf {
    base.join(namespace).join("history.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_readline_ctrl_c_to_interrupt() {
        let result = convert_readline_error(ReadlineError::Interrupted).expect("event");
        assert!(matches!(result, InputEvent::Interrupted));
    }

    #[test]
    fn history_lives_under_the_game_directory() {
        let path = build_history_path(Path::new("/tmp/castle-test"), "castle-escape");
        assert!(path.ends_with(Path::new("castle-escape/history.txt")));
    }

    #[test]
    fn terms_cover_verbs_and_destinations() {
        assert!(COMMAND_TERMS.iter().any(|term| term == "interact"));
        assert!(COMMAND_TERMS.iter().any(|term| term == "go north"));
        assert!(COMMAND_TERMS.iter().any(|term| term == "go kitchen"));
    }

    #[test]
    fn prefix_skips_leading_whitespace() {
        assert_eq!(current_prefix("  go ki", 7), (2, "go ki".to_string()));
    }
}
