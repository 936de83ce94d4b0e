//! Loader utilities for building a `CastleWorld` from content data.
//!
//! The shipped castle is compiled in (`castle_data::castle_world`); a RON
//! `WorldDef` file can replace it through the engine configuration.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use castle_data::{BlockedDef, ItemDef, ItemKindDef, RoomDef, WorldDef};
use log::info;
use uuid::Uuid;

use crate::idgen::{NAMESPACE_ITEM, NAMESPACE_ROOM, uuid_from_token};
use crate::{Blocked, CastleWorld, ContainerState, GameMap, Item, ItemKind, LockState, Player, Room, RuleBook, Storage};

/// Load a `WorldDef` from a RON file.
///
/// # Errors
/// - if the file cannot be read or is not a valid `WorldDef`
pub fn load_worlddef(path: &Path) -> Result<WorldDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading worlddef from '{}'", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing worlddef RON from '{}'", path.display()))
}

/// Pick the content for this run: the file named in the config, or the shipped castle.
///
/// # Errors
/// - if a configured world file cannot be loaded or fails validation
pub fn load_content(world_file: Option<&Path>) -> Result<WorldDef> {
    let def = match world_file {
        Some(path) => load_worlddef(path).context("while loading worlddef from file")?,
        None => castle_data::castle_world(),
    };
    validate_worlddef(&def)?;
    Ok(def)
}

/// Validate a `WorldDef` and return a single aggregated error.
///
/// # Errors
/// - listing every validation problem found
pub fn validate_worlddef(def: &WorldDef) -> Result<()> {
    let errors = castle_data::validate_world(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("worlddef validation failed:\n{details}");
}

/// Convert a `WorldDef` into a fresh `CastleWorld` for `player_name`.
///
/// # Errors
/// - if the definition references rooms or items it does not define
pub fn build_world_from_def(def: &WorldDef, player_name: &str) -> Result<CastleWorld> {
    let mut items = HashMap::new();
    for item_def in &def.items {
        let item = item_from_def(item_def, def)?;
        items.insert(item.id, item);
    }

    let mut rooms = HashMap::new();
    for room_def in &def.rooms {
        let room = room_from_def(room_def);
        rooms.insert(room.id, room);
    }

    // Items are placed in content order so duplicate names keep their authored order.
    for item_def in &def.items {
        let id = uuid_from_token(&NAMESPACE_ITEM, &item_def.id);
        let room_id = uuid_from_token(&NAMESPACE_ROOM, &item_def.room);
        let room = rooms
            .get_mut(&room_id)
            .ok_or_else(|| anyhow!("item '{}' placed in unknown room '{}'", item_def.id, item_def.room))?;
        let item = items
            .get(&id)
            .ok_or_else(|| anyhow!("item '{}' missing after build", item_def.id))?;
        if !room.contents.add(item) {
            bail!("room '{}' is too small for item '{}'", item_def.room, item_def.id);
        }
    }

    let hub = room_ref(def, &def.topology.hub)?;
    let compass: BTreeMap<String, Uuid> = def
        .topology
        .compass
        .iter()
        .map(|(dir, room)| room_ref(def, room).map(|id| (dir.to_lowercase(), id)))
        .collect::<Result<_>>()?;
    let map = GameMap { rooms, hub, compass };

    let player_def = &def.game.player;
    let start = room_ref(def, &player_def.start_room)?;
    let player = Player::new(
        player_name,
        start,
        player_def.life_points,
        player_def.inventory_capacity,
    );

    let world = CastleWorld::new(
        def.game.title.clone(),
        def.game.intro.clone(),
        def.game.victory.clone(),
        items,
        map,
        player,
        RuleBook::new(def.rules.clone()),
    );
    info!(
        "'{}' built: {} rooms, {} items, {} rules",
        world.title,
        world.map.rooms.len(),
        world.items.len(),
        world.rules.rules().len()
    );
    Ok(world)
}

fn room_ref(def: &WorldDef, symbol: &str) -> Result<Uuid> {
    if def.rooms.iter().any(|r| r.id == symbol) {
        Ok(uuid_from_token(&NAMESPACE_ROOM, symbol))
    } else {
        Err(anyhow!("unknown room '{symbol}'"))
    }
}

fn item_ref(def: &WorldDef, symbol: &str) -> Result<Uuid> {
    if def.items.iter().any(|i| i.id == symbol) {
        Ok(uuid_from_token(&NAMESPACE_ITEM, symbol))
    } else {
        Err(anyhow!("unknown item '{symbol}'"))
    }
}

fn room_from_def(def: &RoomDef) -> Room {
    Room {
        id: uuid_from_token(&NAMESPACE_ROOM, &def.id),
        symbol: def.id.clone(),
        name: def.name.clone(),
        description: def.desc.clone(),
        unlocked: def.unlocked,
        contents: def.capacity.map_or_else(Storage::unbounded, Storage::bounded),
        exits: def.exits.iter().map(|e| e.to_lowercase()).collect(),
    }
}

fn item_from_def(def: &ItemDef, world: &WorldDef) -> Result<Item> {
    let kind = match &def.kind {
        ItemKindDef::Plain => ItemKind::Plain,
        ItemKindDef::Container { contains, alt_desc } => ItemKind::Container(ContainerState {
            contains: item_ref(world, contains).with_context(|| format!("container '{}'", def.id))?,
            alt_description: alt_desc.clone(),
        }),
        ItemKindDef::Locked {
            requires,
            blocks,
            action,
            alt_desc,
        } => {
            let requires = requires
                .iter()
                .map(|r| item_ref(world, r))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("locked item '{}'", def.id))?;
            let blocks = match blocks {
                BlockedDef::Room(room) => Blocked::Room(room_ref(world, room)?),
                BlockedDef::Item(target) => {
                    let id = item_ref(world, target)?;
                    let is_lock = world
                        .items
                        .iter()
                        .any(|i| i.id == *target && matches!(i.kind, ItemKindDef::Locked { .. }));
                    if is_lock {
                        Blocked::LockedItem(id)
                    } else {
                        Blocked::Item(id)
                    }
                },
            };
            ItemKind::Locked(LockState {
                requires,
                blocks,
                action: action.clone(),
                alt_description: alt_desc.clone(),
            })
        },
    };
    Ok(Item {
        id: uuid_from_token(&NAMESPACE_ITEM, &def.id),
        symbol: def.id.clone(),
        name: def.name.clone(),
        description: def.desc.clone(),
        visible: def.visible,
        collectable: def.collectable,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorldObject;
    use std::io::Write;

    #[test]
    fn shipped_castle_builds() {
        let world = build_world_from_def(&castle_data::castle_world(), "Ada").expect("castle builds");
        assert_eq!(world.map.rooms.len(), 5);
        assert_eq!(world.items.len(), castle_data::castle_world().items.len());
        assert_eq!(world.player_room_ref().map(|r| r.name.clone()), Ok("hall".to_string()));
        assert_eq!(world.player.life_points, 3);
        assert_eq!(world.player.inventory.capacity(), Some(2));
        assert!(world.check_references().is_ok());
    }

    #[test]
    fn ids_are_stable_between_builds() {
        let a = build_world_from_def(&castle_data::castle_world(), "Ada").expect("castle builds");
        let b = build_world_from_def(&castle_data::castle_world(), "Bob").expect("castle builds");
        let mut ids_a: Vec<_> = a.items.keys().collect();
        let mut ids_b: Vec<_> = b.items.keys().collect();
        ids_a.sort();
        ids_b.sort();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn computer_blocks_a_locked_item() {
        let world = build_world_from_def(&castle_data::castle_world(), "Ada").expect("castle builds");
        let computer = world
            .items
            .values()
            .find(|i| i.symbol() == "lab_computer")
            .and_then(Item::lock)
            .expect("computer is a lock");
        assert!(computer.blocks.is_locked_item());
    }

    #[test]
    fn invalid_content_is_rejected_with_every_problem() {
        let mut def = castle_data::castle_world();
        def.items[0].room = "attic".into();
        def.game.player.start_room = "cellar".into();
        let err = validate_worlddef(&def).expect_err("broken content");
        let text = format!("{err}");
        assert!(text.contains("attic"));
        assert!(text.contains("cellar"));
    }

    #[test]
    fn worlddef_round_trips_through_ron_file() {
        let def = castle_data::castle_world();
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let text = ron::ser::to_string(&def).expect("serialize worlddef");
        file.write_all(text.as_bytes()).expect("write worlddef");

        let loaded = load_content(Some(file.path())).expect("load worlddef");
        assert_eq!(loaded.items.len(), def.items.len());
        assert_eq!(loaded.rules, def.rules);
    }
}
