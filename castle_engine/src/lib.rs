#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const CASTLE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod command;
pub mod config;
pub mod data_paths;
pub mod display;
pub mod game;
pub mod idgen;
pub mod item;
pub mod loader;
pub mod map;
pub mod persistence;
pub mod player;
pub mod repl;
pub mod room;
pub mod rules;
pub mod session;
pub mod slug;
pub mod snapshot;
pub mod storage;
pub mod style;
pub mod timer;
pub mod world;

// Re-exports for convenience
pub use config::EngineConfig;
pub use display::{Display, DisplayEvent, Scene, TerminalDisplay, Transcript};
pub use item::{Blocked, ContainerState, Item, ItemKind, LockState, UnlockOutcome};
pub use loader::{build_world_from_def, load_content};
pub use map::GameMap;
pub use persistence::{FallbackPersistence, LoadOutcome, LocalSaves, MirrorDirStore, Persistence, SaveReport};
pub use player::Player;
pub use repl::run_repl;
pub use room::Room;
pub use rules::RuleBook;
pub use session::Session;
pub use storage::Storage;
pub use world::{CastleWorld, WorldError, WorldObject};
