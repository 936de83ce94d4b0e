use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier used across WorldDef references.
pub type Id = String;

/// Top-level world data loaded by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    pub game: GameDef,
    #[serde(default)]
    pub rooms: Vec<RoomDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub topology: TopologyDef,
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

/// Game-level metadata and startup configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameDef {
    pub title: String,
    /// File-safe game name; keeps per-game files such as input history apart.
    #[serde(default)]
    pub slug: String,
    /// Greeting shown when a game starts. `{name}` is replaced by the player's name.
    pub intro: String,
    /// Text shown once the win condition is reached.
    pub victory: String,
    pub player: PlayerDef,
}

/// Starting state for the player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    pub start_room: Id,
    pub life_points: i32,
    pub inventory_capacity: usize,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            start_room: String::new(),
            life_points: 3,
            inventory_capacity: 2,
        }
    }
}

/// A room and its exit labels.
///
/// Exit labels are either compass directions or the names of sibling rooms; they are
/// resolved through [`TopologyDef`], never stored as direct references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDef {
    pub id: Id,
    pub name: String,
    pub desc: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub exits: Vec<String>,
    /// Maximum number of items the room can hold. `None` means unbounded.
    #[serde(default)]
    pub capacity: Option<usize>,
}

/// Direction translation for a hub-and-spoke map.
///
/// Every room other than `hub` leads back to the hub whatever label is used. From the hub,
/// compass labels are looked up in `compass`; any other label is taken as a room name.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TopologyDef {
    pub hub: Id,
    #[serde(default)]
    pub compass: BTreeMap<String, Id>,
}

/// Any object placed in a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: Id,
    pub name: String,
    pub desc: String,
    pub room: Id,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub collectable: bool,
    #[serde(default)]
    pub kind: ItemKindDef,
}

fn default_true() -> bool {
    true
}

/// Behavioral variant of an item.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum ItemKindDef {
    #[default]
    Plain,
    /// Hides exactly one item until first interaction.
    Container { contains: Id, alt_desc: String },
    /// Blocks a target until every required item has been used on it.
    Locked {
        requires: Vec<Id>,
        blocks: BlockedDef,
        action: String,
        alt_desc: String,
    },
}

/// What a locked item keeps out of reach.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlockedDef {
    Item(Id),
    Room(Id),
}

/// Content-specific side effects layered onto interact / use / pick.
///
/// All subjects are item *names* (case-insensitive), not ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleDef {
    /// Interacting with the item moves it straight into the inventory.
    CollectOnInteract { item: String },
    /// Interacting with the item hurts unless `unless_holding` is in the inventory.
    Hazard {
        item: String,
        unless_holding: Option<String>,
        damage: i32,
        message: String,
    },
    /// Interacting with the item wins the game if `requires_visible` is visible in the room.
    VictoryGate { item: String, requires_visible: String },
    /// The locked item disappears once its blocked room has been unlocked.
    ConcealOnOpen { item: String },
    /// Opening the locked item releases a hostile prisoner who vanishes after the fight.
    Duel {
        target: String,
        weapon: String,
        damage: i32,
        defeat_message: String,
        victory_message: String,
    },
    /// Using `tool` on any of `targets` hurts. `{target}` in the message is replaced.
    FragileTarget {
        tool: String,
        targets: Vec<String>,
        damage: i32,
        message: String,
    },
    /// The item goes back into the inventory after being used up.
    ReusableTool { item: String },
    /// Picking the item up without `requires` in the inventory fails and hurts.
    HazardousPickup {
        item: String,
        requires: String,
        damage: i32,
        message: String,
    },
}

impl RuleDef {
    /// Item names this rule refers to, for validation.
    pub fn subjects(&self) -> Vec<&str> {
        match self {
            RuleDef::CollectOnInteract { item } | RuleDef::ConcealOnOpen { item } | RuleDef::ReusableTool { item } => {
                vec![item.as_str()]
            },
            RuleDef::Hazard { item, unless_holding, .. } => {
                let mut names = vec![item.as_str()];
                if let Some(guard) = unless_holding {
                    names.push(guard.as_str());
                }
                names
            },
            RuleDef::VictoryGate { item, requires_visible } => vec![item.as_str(), requires_visible.as_str()],
            RuleDef::Duel { target, weapon, .. } => vec![target.as_str(), weapon.as_str()],
            RuleDef::FragileTarget { tool, targets, .. } => {
                let mut names = vec![tool.as_str()];
                names.extend(targets.iter().map(String::as_str));
                names
            },
            RuleDef::HazardousPickup { item, requires, .. } => vec![item.as_str(), requires.as_str()],
        }
    }
}
