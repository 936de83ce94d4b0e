//! `game` module
//!
//! The puzzle-resolution operations of a [`CastleWorld`](crate::CastleWorld):
//! interact and use in [`item`], pick and drop in [`inventory`], go in
//! [`movement`]. Each one writes its narrative to a [`Display`](crate::Display)
//! and leaves the world unchanged on every user error.

pub mod inventory;
pub mod item;
pub mod movement;

pub use inventory::{DropError, PickError};

pub const ITEM_NOT_FOUND: &str = "Item not found";
pub const CANNOT_USE_HERE: &str = "You can't use this item here";
pub const DIRECTION_NOT_VALID: &str = "Direction not valid";
pub const NO_WAY_BACK: &str = "This is the first location you visited, you cannot go back anymore";

pub const HELP_TEXT: &str = "The possible commands are:
- look around: to show the list of items in the room
- go: to show the rooms/directions where you can move to
- go <direction> or go <room>: to move in the indicated room/direction, if possible
- go back: to move back to the previous room
- interact <item>: to show more information about the item
- use <item>: to use the item with the object you previously interacted with, call this command only after interact
- pick <item>: to collect the item and keep it in the inventory
- drop <item>: to drop an item from the inventory
- status: to show your life points and inventory
- save: to save the game
- exit: to exit the game
- restart: to restart the game";
