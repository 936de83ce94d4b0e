//! `game::inventory` module
//!
//! Moving items between the current room and the inventory.

use log::info;
use thiserror::Error;
use uuid::Uuid;

use crate::{CastleWorld, WorldError};

/// Why a `pick` failed. The `Display` text is what the player sees.
///
/// When several preconditions fail at once the first matching variant, in
/// declaration order, is reported.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickError {
    #[error("You already have {0} in your inventory")]
    AlreadyHeld(String),
    #[error("Your inventory is full")]
    InventoryFull,
    #[error("{0} is not here")]
    NotHere(String),
    #[error("You cannot pick this item")]
    NotCollectable(String),
    #[error("{0} not found")]
    NotFound(String),
    /// A pickup rule refused the item and took its toll.
    #[error("{message}")]
    Hazard { name: String, message: String },
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Why a `drop` failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DropError {
    #[error("{0} must be in your inventory to be dropped")]
    NotHeld(String),
    #[error("There is no space left here for {0}")]
    RoomFull(String),
    #[error(transparent)]
    World(#[from] WorldError),
}

impl CastleWorld {
    /// Move a visible, collectable item from the current room into the inventory.
    ///
    /// # Errors
    /// - a [`PickError`] naming the first precondition that failed
    pub fn pick(&mut self, name: &str) -> Result<Uuid, PickError> {
        let name = name.trim();
        let room = self.player_room_ref()?;
        let candidate = room
            .contents
            .find_visible(name, &self.items)
            .or_else(|| room.contents.get(name));
        let item = candidate.map(|id| self.item(id)).transpose()?.cloned();
        let inventory = &self.player.inventory;

        let Some(item) = item.filter(|i| i.visible && i.collectable && !inventory.is_full()) else {
            let item = candidate.and_then(|id| self.items.get(&id));
            return Err(if inventory.has(name) {
                PickError::AlreadyHeld(name.to_string())
            } else if inventory.is_full() {
                PickError::InventoryFull
            } else {
                match item {
                    None => PickError::NotHere(name.to_string()),
                    Some(i) if !i.collectable => PickError::NotCollectable(name.to_string()),
                    Some(_) => PickError::NotFound(name.to_string()),
                }
            });
        };

        if let Some(penalty) = self.rules.on_pick(name, &self.held_names()) {
            self.player.lose_life_points(penalty.damage);
            return Err(PickError::Hazard {
                name: name.to_string(),
                message: penalty.message,
            });
        }

        self.player_room_mut()?.contents.remove_item(&item);
        self.player.inventory.add(&item);
        info!("{} picked up '{}' ({})", self.player.name, item.name, item.id);
        Ok(item.id)
    }

    /// Move an item from the inventory into the current room.
    ///
    /// # Errors
    /// - [`DropError::NotHeld`] if nothing by that name is carried
    /// - [`DropError::RoomFull`] if the room has a capacity and has reached it
    pub fn drop_item(&mut self, name: &str) -> Result<Uuid, DropError> {
        let name = name.trim();
        let Some(id) = self.player.inventory.get(name) else {
            return Err(DropError::NotHeld(name.to_string()));
        };
        let item = self.item(id)?.clone();
        let room = self.player_room_mut()?;
        if !room.contents.add(&item) {
            return Err(DropError::RoomFull(name.to_string()));
        }
        self.player.inventory.remove_item(&item);
        info!("{} dropped '{}' ({})", self.player.name, item.name, item.id);
        Ok(id)
    }
}
