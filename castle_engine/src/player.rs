//! The player character.

use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Item, Room, Storage};

/// Location, visit history, inventory and life points of the person escaping.
///
/// `history` is a stack: every `set_location` pushes, including the moves made by
/// "go back". Life points have no floor; zero or below means defeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub location: Uuid,
    pub history: Vec<Uuid>,
    pub inventory: Storage,
    pub life_points: i32,
}

impl Player {
    /// A fresh player standing in `start`.
    pub fn new(name: &str, start: Uuid, life_points: i32, inventory_capacity: usize) -> Self {
        let mut player = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            location: start,
            history: Vec::new(),
            inventory: Storage::bounded(inventory_capacity),
            life_points,
        };
        player.set_location(start);
        player
    }

    pub fn set_location(&mut self, room: Uuid) {
        self.history.push(room);
        self.location = room;
    }

    /// Take the previous room off the history.
    ///
    /// Discards the current entry and returns the one below it, also removing it;
    /// `set_location` on the result pushes it back. Returns `None` (and leaves the
    /// history alone) when fewer than two rooms have been visited.
    pub fn pop_last_location(&mut self) -> Option<Uuid> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        self.history.pop()
    }

    pub fn lose_life_points(&mut self, amount: i32) {
        self.life_points -= amount;
        info!("{} lost {amount} life point(s), {} left", self.name, self.life_points);
    }

    pub fn is_defeated(&self) -> bool {
        self.life_points <= 0
    }

    /// True if an item called `name` is in the inventory.
    pub fn holds(&self, name: &str) -> bool {
        self.inventory.has(name)
    }

    pub fn status(&self, items: &HashMap<Uuid, Item>) -> String {
        let life = format!("You have {} life points\n", self.life_points);
        if self.inventory.is_empty() {
            format!("{life}Your inventory is empty")
        } else {
            format!("{life}In your inventory you have:\n{}", self.inventory.list(items))
        }
    }

    pub fn look_around(&self, room: &Room, items: &HashMap<Uuid, Item>) -> String {
        format!("You see: \n{}", room.contents.list(items))
    }
}
