//! Rooms of the castle.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Storage, WorldObject};

/// A location the player can stand in.
///
/// Exits are labels only (`"east"`, `"kitchen"`); the [`GameMap`](crate::GameMap)
/// translates them into destinations. `unlocked` only ever goes from false to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
    pub contents: Storage,
    pub exits: Vec<String>,
}

impl WorldObject for Room {
    fn id(&self) -> Uuid {
        self.id
    }
    fn symbol(&self) -> &str {
        &self.symbol
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
}

impl Room {
    /// Open the room. Returns true only on the first call.
    pub fn unlock(&mut self) -> bool {
        let changed = !self.unlocked;
        self.unlocked = true;
        changed
    }

    pub fn has_exit(&self, label: &str) -> bool {
        self.exits.iter().any(|exit| exit.eq_ignore_ascii_case(label.trim()))
    }
}
