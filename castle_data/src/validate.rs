use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a WorldDef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a WorldDef.
///
/// ```
/// use castle_data::{GameDef, PlayerDef, RoomDef, TopologyDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     game: GameDef {
///         title: "Demo".into(),
///         player: PlayerDef {
///             start_room: "hall".into(),
///             ..PlayerDef::default()
///         },
///         ..GameDef::default()
///     },
///     rooms: vec![RoomDef {
///         id: "hall".into(),
///         name: "hall".into(),
///         desc: "A room.".into(),
///         unlocked: true,
///         exits: Vec::new(),
///         capacity: None,
///     }],
///     topology: TopologyDef {
///         hub: "hall".into(),
///         ..TopologyDef::default()
///     },
///     ..WorldDef::default()
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut rooms = HashSet::new();
    let mut items = HashSet::new();

    track_ids(
        "room",
        world.rooms.iter().map(|r| r.id.as_str()),
        &mut rooms,
        &mut errors,
    );
    track_ids(
        "item",
        world.items.iter().map(|i| i.id.as_str()),
        &mut items,
        &mut errors,
    );

    let player = &world.game.player;
    if player.start_room.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "game player start room missing".to_string(),
        });
    } else {
        check_ref(
            "room",
            &player.start_room,
            &rooms,
            "game player start room".to_string(),
            &mut errors,
        );
    }
    if player.life_points <= 0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("player life points must be positive, got {}", player.life_points),
        });
    }
    if player.inventory_capacity == 0 {
        errors.push(ValidationError::InvalidValue {
            context: "player inventory capacity must be at least 1".to_string(),
        });
    }

    check_ref(
        "room",
        &world.topology.hub,
        &rooms,
        "topology hub".to_string(),
        &mut errors,
    );
    for (direction, room) in &world.topology.compass {
        check_ref("room", room, &rooms, format!("topology compass '{direction}'"), &mut errors);
    }

    // Exit labels out of the hub must name a compass direction or a sibling room.
    let room_names: HashSet<String> = world.rooms.iter().map(|r| r.name.to_lowercase()).collect();
    if let Some(hub) = world.rooms.iter().find(|r| r.id == world.topology.hub) {
        for exit in &hub.exits {
            let label = exit.to_lowercase();
            if !world.topology.compass.contains_key(&label) && !room_names.contains(&label) {
                errors.push(ValidationError::MissingReference {
                    kind: "exit",
                    id: exit.clone(),
                    context: format!("room '{}' exits", hub.id),
                });
            }
        }
    }

    for item in &world.items {
        check_ref("room", &item.room, &rooms, format!("item '{}' room", item.id), &mut errors);
        match &item.kind {
            ItemKindDef::Plain => {},
            ItemKindDef::Container { contains, .. } => {
                check_ref(
                    "item",
                    contains,
                    &items,
                    format!("container '{}' contents", item.id),
                    &mut errors,
                );
                if contains == &item.id {
                    errors.push(ValidationError::InvalidValue {
                        context: format!("container '{}' contains itself", item.id),
                    });
                }
            },
            ItemKindDef::Locked { requires, blocks, .. } => {
                if requires.is_empty() {
                    errors.push(ValidationError::InvalidValue {
                        context: format!("locked item '{}' requires nothing", item.id),
                    });
                }
                for required in requires {
                    check_ref(
                        "item",
                        required,
                        &items,
                        format!("locked item '{}' requirement", item.id),
                        &mut errors,
                    );
                }
                match blocks {
                    BlockedDef::Item(target) => check_ref(
                        "item",
                        target,
                        &items,
                        format!("locked item '{}' target", item.id),
                        &mut errors,
                    ),
                    BlockedDef::Room(target) => check_ref(
                        "room",
                        target,
                        &rooms,
                        format!("locked item '{}' target", item.id),
                        &mut errors,
                    ),
                }
            },
        }
    }

    let item_names: HashSet<String> = world.items.iter().map(|i| i.name.to_lowercase()).collect();
    for (idx, rule) in world.rules.iter().enumerate() {
        for subject in rule.subjects() {
            check_ref(
                "item name",
                &subject.to_lowercase(),
                &item_names,
                format!("rule #{idx}"),
                &mut errors,
            );
        }
    }

    errors
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !set.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(kind: &'static str, id: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str) -> RoomDef {
        RoomDef {
            id: id.to_string(),
            name: id.to_string(),
            desc: "Test room".into(),
            unlocked: true,
            exits: Vec::new(),
            capacity: None,
        }
    }

    fn base_world() -> WorldDef {
        WorldDef {
            game: GameDef {
                title: "Demo".into(),
                player: PlayerDef {
                    start_room: "hall".into(),
                    ..PlayerDef::default()
                },
                ..GameDef::default()
            },
            rooms: vec![room("hall")],
            topology: TopologyDef {
                hub: "hall".into(),
                ..TopologyDef::default()
            },
            ..WorldDef::default()
        }
    }

    fn item_in_room(id: &str, room_id: &str) -> ItemDef {
        ItemDef {
            id: id.to_string(),
            name: id.to_string(),
            desc: "Test item".into(),
            room: room_id.to_string(),
            visible: true,
            collectable: true,
            kind: ItemKindDef::Plain,
        }
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let mut world = base_world();
        world.rooms.push(room("hall"));
        world.items.push(item_in_room("key", "hall"));
        world.items.push(item_in_room("key", "hall"));

        let errors = validate_world(&world);
        assert!(errors.contains(&ValidationError::DuplicateId {
            kind: "room",
            id: "hall".into()
        }));
        assert!(errors.contains(&ValidationError::DuplicateId {
            kind: "item",
            id: "key".into()
        }));
    }

    #[test]
    fn missing_references_are_reported() {
        let mut world = base_world();
        world.items.push(item_in_room("key", "attic"));
        let mut door = item_in_room("door", "hall");
        door.kind = ItemKindDef::Locked {
            requires: vec!["key".into(), "crowbar".into()],
            blocks: BlockedDef::Room("cellar".into()),
            action: String::new(),
            alt_desc: String::new(),
        };
        world.items.push(door);

        let errors = validate_world(&world);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingReference { id, .. } if id == "attic")));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingReference { id, .. } if id == "crowbar")));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingReference { id, .. } if id == "cellar")));
    }

    #[test]
    fn hub_exits_must_resolve() {
        let mut world = base_world();
        world.rooms.push(room("kitchen"));
        world.rooms[0].exits = vec!["kitchen".into(), "north".into()];

        let errors = validate_world(&world);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ValidationError::MissingReference { kind: "exit", id, .. } if id == "north"));

        world.topology.compass.insert("north".into(), "kitchen".into());
        assert!(validate_world(&world).is_empty());
    }

    #[test]
    fn rules_must_name_known_items() {
        let mut world = base_world();
        world.items.push(item_in_room("hammer", "hall"));
        world.rules.push(RuleDef::ReusableTool { item: "Hammer".into() });
        assert!(validate_world(&world).is_empty());

        world.rules.push(RuleDef::ReusableTool { item: "wrench".into() });
        let errors = validate_world(&world);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("wrench"));
    }

    #[test]
    fn invalid_player_values_are_reported() {
        let mut world = base_world();
        world.game.player.life_points = 0;
        world.game.player.inventory_capacity = 0;
        let errors = validate_world(&world);
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ValidationError::InvalidValue { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn shipped_castle_is_valid() {
        let errors = validate_world(&crate::castle::castle_world());
        assert!(errors.is_empty(), "{errors:?}");
    }
}
