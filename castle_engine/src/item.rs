//! Item types and the lock state machine.
//!
//! Every object in the castle is an [`Item`]. Containers and locks are the same
//! struct carrying a different [`ItemKind`], so the id-keyed arena in
//! [`CastleWorld`](crate::CastleWorld) stays a single map.

use crate::WorldObject;

use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use variantly::Variantly;

/// Anything in the castle that can be looked at, picked up, opened or used.
///
/// `name` is what the player types; lookups compare it case-insensitively. Two items
/// may share a name (there are two keys) and are told apart only by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The stable id of this item.
    pub id: Uuid,
    /// The symbol used to refer to this item in world data.
    pub symbol: String,
    /// The display name of the item.
    pub name: String,
    /// Text shown when the player interacts with the item.
    pub description: String,
    /// Hidden items are left out of listings and cannot be interacted with.
    pub visible: bool,
    /// Whether `pick` may move the item into the inventory.
    pub collectable: bool,
    pub kind: ItemKind,
}

impl WorldObject for Item {
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

impl Item {
    /// Lowercased name, the key used by every [`Storage`](crate::Storage).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// True if `name` refers to this item, ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Lock state, if this item is a lock.
    pub fn lock(&self) -> Option<&LockState> {
        match &self.kind {
            ItemKind::Locked(lock) => Some(lock),
            _ => None,
        }
    }

    pub fn lock_mut(&mut self) -> Option<&mut LockState> {
        match &mut self.kind {
            ItemKind::Locked(lock) => Some(lock),
            _ => None,
        }
    }

    /// Container state, if this item hides another.
    pub fn container(&self) -> Option<&ContainerState> {
        match &self.kind {
            ItemKind::Container(container) => Some(container),
            _ => None,
        }
    }
}

/// Behavioral variant of an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Variantly)]
pub enum ItemKind {
    Plain,
    Container(ContainerState),
    Locked(LockState),
}

/// A container hides exactly one item until the first interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerState {
    pub contains: Uuid,
    /// Shown instead of the description once the contents are out.
    pub alt_description: String,
}

/// What a lock keeps out of reach until it opens.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Variantly)]
pub enum Blocked {
    /// A hidden item that becomes visible.
    Item(Uuid),
    /// A hidden lock that becomes visible (and can then be opened itself).
    LockedItem(Uuid),
    /// A locked room that becomes reachable.
    Room(Uuid),
}

impl Blocked {
    /// The room this lock keeps shut, if any.
    pub fn room_id(self) -> Option<Uuid> {
        match self {
            Blocked::Room(id) => Some(id),
            _ => None,
        }
    }

    /// The hidden item or lock this lock reveals, if any.
    pub fn item_id(self) -> Option<Uuid> {
        match self {
            Blocked::Item(id) | Blocked::LockedItem(id) => Some(id),
            Blocked::Room(_) => None,
        }
    }
}

/// Result of applying one item to a lock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Variantly)]
pub enum UnlockOutcome {
    /// Nothing left to satisfy; the caller shows the alternate description.
    AlreadyOpen,
    /// The item is not one the lock is waiting for.
    NoEffect,
    /// The item was accepted but more are still required.
    Progress { remaining: usize },
    /// The last requirement was met; the target must be revealed.
    Opened(Blocked),
}

/// The required-items multiset of a lock and what opening it reveals.
///
/// `requires` only ever shrinks. The transition to empty happens once, and
/// [`unlock_with`](LockState::unlock_with) is inert afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockState {
    pub requires: Vec<Uuid>,
    pub blocks: Blocked,
    /// Shown once, on the opening transition.
    pub action: String,
    /// Shown whenever the lock is consulted after it opened.
    pub alt_description: String,
}

impl LockState {
    pub fn is_open(&self) -> bool {
        self.requires.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.requires.len()
    }

    /// Apply the item `used` to this lock.
    pub fn unlock_with(&mut self, used: Uuid) -> UnlockOutcome {
        if self.is_open() {
            return UnlockOutcome::AlreadyOpen;
        }
        let Some(pos) = self.requires.iter().position(|id| *id == used) else {
            return UnlockOutcome::NoEffect;
        };
        self.requires.remove(pos);
        if self.requires.is_empty() {
            info!("lock opened, revealing {:?}", self.blocks);
            UnlockOutcome::Opened(self.blocks)
        } else {
            UnlockOutcome::Progress {
                remaining: self.requires.len(),
            }
        }
    }
}
