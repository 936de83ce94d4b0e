//! Saving and loading games.
//!
//! Every save goes to the local save directory first. When a [`RemoteStore`] is
//! configured and reachable the snapshot is also pushed there, and loads prefer it.
//! Nothing in here panics or leaves a half-loaded world behind: failures become a
//! [`SaveReport`] or [`LoadOutcome`] the session can show to the player.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::CastleWorld;
use crate::slug::sanitize_slug;
use crate::snapshot::{self, SnapshotError};

pub const SAVE_DIR: &str = "saved_games";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Where a save ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveReport {
    Remote,
    LocalOnly,
    Failed,
}

impl SaveReport {
    /// Text shown to the player.
    pub fn message(self) -> &'static str {
        match self {
            SaveReport::Remote => "Game state saved successfully.",
            SaveReport::LocalOnly => "Game state saved locally due to no internet connection.",
            SaveReport::Failed => "Error occurred while saving the game",
        }
    }
}

/// Result of looking up a saved game.
#[derive(Debug)]
pub enum LoadOutcome {
    Remote(Box<CastleWorld>),
    Local(Box<CastleWorld>),
    Missing,
    /// A save exists but could not be turned back into a world.
    Failed(String),
}

/// Storage backend used by the session.
pub trait Persistence {
    fn save(&mut self, session: &str, world: &CastleWorld) -> SaveReport;
    fn load(&mut self, session: &str) -> LoadOutcome;
    /// True if saves currently reach the remote store.
    fn remote_available(&self) -> bool;
}

/// File name of the save for a session.
pub fn save_file_name(session: &str) -> String {
    format!("{}.ron", sanitize_slug(session))
}

/// Saves kept on this machine.
#[derive(Debug, Clone)]
pub struct LocalSaves {
    dir: PathBuf,
}

impl LocalSaves {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, session: &str) -> PathBuf {
        self.dir.join(save_file_name(session))
    }

    /// # Errors
    /// - if the save directory or file cannot be written
    pub fn write(&self, session: &str, text: &str) -> Result<PathBuf, PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(session);
        fs::write(&path, text)?;
        Ok(path)
    }

    /// # Errors
    /// - if the save file exists but cannot be read
    pub fn read(&self, session: &str) -> Result<Option<String>, PersistenceError> {
        read_if_present(&self.path_for(session))
    }
}

/// An off-machine place to keep saves.
pub trait RemoteStore {
    fn is_reachable(&self) -> bool;
    /// # Errors
    /// - if the store rejects the write
    fn put(&self, key: &str, text: &str) -> Result<(), PersistenceError>;
    /// # Errors
    /// - if the store cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
}

/// Remote store backed by a directory, such as a synced or network-mounted folder.
///
/// It counts as reachable only while the directory exists; it is never created here.
#[derive(Debug, Clone)]
pub struct MirrorDirStore {
    root: PathBuf,
}

impl MirrorDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RemoteStore for MirrorDirStore {
    fn is_reachable(&self) -> bool {
        self.root.is_dir()
    }

    fn put(&self, key: &str, text: &str) -> Result<(), PersistenceError> {
        fs::write(self.root.join(key), text)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        read_if_present(&self.root.join(key))
    }
}

/// Local saves, mirrored to a remote store whenever it can be reached.
pub struct FallbackPersistence {
    local: LocalSaves,
    remote: Option<Box<dyn RemoteStore>>,
}

impl FallbackPersistence {
    pub fn new(local: LocalSaves, remote: Option<Box<dyn RemoteStore>>) -> Self {
        Self { local, remote }
    }

    /// Local saves only.
    pub fn local_only(local: LocalSaves) -> Self {
        Self::new(local, None)
    }

    fn reachable_remote(&self) -> Option<&dyn RemoteStore> {
        self.remote.as_deref().filter(|remote| remote.is_reachable())
    }

    fn load_local(&self, session: &str) -> LoadOutcome {
        match self.local.read(session) {
            Ok(Some(text)) => decoded(session, &text, LoadOutcome::Local),
            Ok(None) => LoadOutcome::Missing,
            Err(err) => {
                warn!("reading local save for '{session}' failed: {err}");
                LoadOutcome::Failed(err.to_string())
            },
        }
    }
}

impl Persistence for FallbackPersistence {
    fn save(&mut self, session: &str, world: &CastleWorld) -> SaveReport {
        let text = match snapshot::encode(world) {
            Ok(text) => text,
            Err(err) => {
                warn!("could not serialize '{session}': {err}");
                return SaveReport::Failed;
            },
        };

        let saved_locally = match self.local.write(session, &text) {
            Ok(path) => {
                info!("saved '{session}' to {}", path.display());
                true
            },
            Err(err) => {
                warn!("local save for '{session}' failed: {err}");
                false
            },
        };

        match self.reachable_remote() {
            Some(remote) => match remote.put(&save_file_name(session), &text) {
                Ok(()) => {
                    info!("saved '{session}' to the remote store");
                    SaveReport::Remote
                },
                Err(err) => {
                    warn!("remote save for '{session}' failed: {err}");
                    if saved_locally { SaveReport::LocalOnly } else { SaveReport::Failed }
                },
            },
            None if saved_locally => SaveReport::LocalOnly,
            None => SaveReport::Failed,
        }
    }

    fn load(&mut self, session: &str) -> LoadOutcome {
        if let Some(remote) = self.reachable_remote() {
            match remote.get(&save_file_name(session)) {
                Ok(Some(text)) => return decoded(session, &text, LoadOutcome::Remote),
                Ok(None) => return LoadOutcome::Missing,
                Err(err) => warn!("remote load for '{session}' failed, trying local saves: {err}"),
            }
        }
        self.load_local(session)
    }

    fn remote_available(&self) -> bool {
        self.reachable_remote().is_some()
    }
}

fn decoded(session: &str, text: &str, wrap: impl FnOnce(Box<CastleWorld>) -> LoadOutcome) -> LoadOutcome {
    match snapshot::decode(text) {
        Ok(world) => {
            info!("loaded saved game '{session}'");
            wrap(Box::new(world))
        },
        Err(err) => {
            warn!("rejected saved game '{session}': {err}");
            LoadOutcome::Failed(err.to_string())
        },
    }
}

fn read_if_present(path: &Path) -> Result<Option<String>, PersistenceError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
