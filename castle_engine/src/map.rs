//! Room graph and exit translation.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Room;

/// Header of the directions listing.
pub const DIRECTIONS_HEADER: &str = "You can go:\n";

/// The fixed set of rooms and the rule that turns an exit label into a destination.
///
/// The castle is a hub with spokes: every room other than the hub leads back to it,
/// whatever label was used. From the hub, compass labels map through `compass` and any
/// other label is taken as a room name. Only `Room::unlocked` changes after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMap {
    pub rooms: HashMap<Uuid, Room>,
    pub hub: Uuid,
    pub compass: BTreeMap<String, Uuid>,
}

impl GameMap {
    pub fn room(&self, id: Uuid) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn room_mut(&mut self, id: Uuid) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.values().find(|room| room.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Destination for `label` when leaving `from`, ignoring locks and whether the
    /// label is actually an exit of `from`.
    pub fn translate(&self, from: Uuid, label: &str) -> Option<Uuid> {
        if from != self.hub {
            return Some(self.hub);
        }
        let label = label.trim().to_lowercase();
        self.compass
            .get(&label)
            .copied()
            .or_else(|| self.room_by_name(&label).map(|room| room.id))
    }

    /// Resolve a move. The label must be one of `from`'s exits *and* the destination
    /// must be unlocked.
    pub fn get_exit(&self, from: Uuid, label: &str) -> Option<Uuid> {
        let room = self.room(from)?;
        if !room.has_exit(label) {
            return None;
        }
        let dest = self.translate(from, label)?;
        self.room(dest).filter(|dest| dest.unlocked).map(|dest| dest.id)
    }

    /// Exit labels of `from` whose destination is currently unlocked, in exit order.
    pub fn open_exits(&self, from: Uuid) -> Vec<&str> {
        let Some(room) = self.room(from) else {
            return Vec::new();
        };
        room.exits
            .iter()
            .filter(|exit| {
                self.translate(from, exit)
                    .and_then(|dest| self.room(dest))
                    .is_some_and(|dest| dest.unlocked)
            })
            .map(String::as_str)
            .collect()
    }

    /// Player-facing directions listing. Locked destinations are left out entirely.
    pub fn print_directions(&self, from: Uuid) -> String {
        let mut out = DIRECTIONS_HEADER.to_string();
        for exit in self.open_exits(from) {
            out.push_str(exit);
            out.push('\n');
        }
        out
    }
}
