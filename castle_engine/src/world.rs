//! Data structures representing the game world.
//!
//! This module defines [`CastleWorld`], the complete state of one session. Items
//! live in a single id-keyed arena; rooms, the inventory, locks and containers hold
//! ids into it, so a snapshot never duplicates an entity.

use std::collections::{BTreeSet, HashMap};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::CASTLE_VERSION;
use crate::{Blocked, GameMap, Item, Player, Room, RuleBook};

/// Methods common to any object in the world.
pub trait WorldObject {
    fn id(&self) -> Uuid;
    fn symbol(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
}

/// Lookups that should never fail in a consistent world.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("item {0} not found in world")]
    UnknownItem(Uuid),
    #[error("room {0} not found in world")]
    UnknownRoom(Uuid),
}

/// Complete state of one running game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastleWorld {
    pub title: String,
    /// Greeting shown when a game starts; `{name}` is the player's name.
    pub intro: String,
    pub victory_text: String,
    pub items: HashMap<Uuid, Item>,
    pub map: GameMap,
    pub player: Player,
    pub rules: RuleBook,
    /// The item of the last successful interaction; `use` applies to it.
    pub last_item_used: Option<Uuid>,
    pub victory: bool,
    pub version: String,
}

impl CastleWorld {
    /// Assemble a world from its parts, stamped with the current engine version.
    pub fn new(
        title: String,
        intro: String,
        victory_text: String,
        items: HashMap<Uuid, Item>,
        map: GameMap,
        player: Player,
        rules: RuleBook,
    ) -> Self {
        Self {
            title,
            intro,
            victory_text,
            items,
            map,
            player,
            rules,
            last_item_used: None,
            victory: false,
            version: CASTLE_VERSION.to_string(),
        }
    }

    pub fn item(&self, id: Uuid) -> Result<&Item, WorldError> {
        self.items.get(&id).ok_or(WorldError::UnknownItem(id))
    }

    pub fn item_mut(&mut self, id: Uuid) -> Result<&mut Item, WorldError> {
        self.items.get_mut(&id).ok_or(WorldError::UnknownItem(id))
    }

    /// Obtain a reference to the room the player occupies.
    pub fn player_room_ref(&self) -> Result<&Room, WorldError> {
        let id = self.player.location;
        self.map.room(id).ok_or(WorldError::UnknownRoom(id))
    }

    pub fn player_room_mut(&mut self) -> Result<&mut Room, WorldError> {
        let id = self.player.location;
        self.map.room_mut(id).ok_or(WorldError::UnknownRoom(id))
    }

    /// Lowercased names of everything in the inventory.
    pub fn held_names(&self) -> BTreeSet<String> {
        self.player
            .inventory
            .ids()
            .filter_map(|id| self.items.get(&id))
            .map(Item::key)
            .collect()
    }

    /// Lowercased names of the visible items in the player's room.
    pub fn visible_here(&self) -> BTreeSet<String> {
        self.player_room_ref()
            .map(|room| {
                room.contents
                    .ids()
                    .filter_map(|id| self.items.get(&id))
                    .filter(|item| item.visible)
                    .map(Item::key)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Make a lock's target available: items become visible, rooms unlock.
    pub fn reveal(&mut self, target: Blocked) -> Result<(), WorldError> {
        match target {
            Blocked::Item(id) | Blocked::LockedItem(id) => {
                let item = self.item_mut(id)?;
                item.visible = true;
                info!("'{}' revealed", item.name);
            },
            Blocked::Room(id) => {
                let room = self.map.room_mut(id).ok_or(WorldError::UnknownRoom(id))?;
                if room.unlock() {
                    info!("room '{}' unlocked", room.name);
                }
            },
        }
        Ok(())
    }

    /// True if the lock's target is a room that has been unlocked.
    pub fn blocked_room_unlocked(&self, target: Blocked) -> bool {
        target
            .room_id()
            .and_then(|id| self.map.room(id))
            .is_some_and(|room| room.unlocked)
    }

    /// Record the target of a successful interaction so a following `use` can find it.
    pub fn remember_interaction(&mut self, item: Uuid) {
        self.last_item_used = Some(item);
    }

    /// Greeting for a freshly started game.
    pub fn welcome(&self) -> String {
        self.intro.replace("{name}", &self.player.name)
    }

    /// Flip the one-way win flag and return the victory text.
    pub fn declare_victory(&mut self) -> String {
        if !self.victory {
            info!("{} escaped the castle", self.player.name);
        }
        self.victory = true;
        self.victory_text.clone()
    }

    /// Check every id the world holds against the arena and the map.
    pub fn check_references(&self) -> Result<(), WorldError> {
        let room = |id: Uuid| self.map.room(id).map(|_| ()).ok_or(WorldError::UnknownRoom(id));
        let item = |id: Uuid| self.item(id).map(|_| ());

        room(self.map.hub)?;
        for id in self.map.compass.values() {
            room(*id)?;
        }
        room(self.player.location)?;
        for id in &self.player.history {
            room(*id)?;
        }
        for id in self.player.inventory.ids() {
            item(id)?;
        }
        for r in self.map.rooms.values() {
            for id in r.contents.ids() {
                item(id)?;
            }
        }
        if let Some(id) = self.last_item_used {
            item(id)?;
        }
        for it in self.items.values() {
            if let Some(container) = it.container() {
                item(container.contains)?;
            }
            if let Some(lock) = it.lock() {
                for id in &lock.requires {
                    item(*id)?;
                }
                match lock.blocks {
                    Blocked::Item(id) | Blocked::LockedItem(id) => item(id)?,
                    Blocked::Room(id) => room(id)?,
                }
            }
        }
        Ok(())
    }
}
