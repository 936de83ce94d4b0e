//! Snapshot encoding for saved games.
//!
//! A snapshot is the whole [`CastleWorld`] in RON. Because every cross-reference in
//! the world is an id into the item arena or the room map, decoding cannot duplicate
//! an entity; it can only leave an id dangling, which [`decode`] rejects.

use log::warn;
use thiserror::Error;

use crate::{CASTLE_VERSION, CastleWorld, WorldError};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("error converting CastleWorld to 'ron' format: {0}")]
    Encode(#[from] ron::Error),
    #[error("save data is not a valid game: {0}")]
    Decode(#[from] ron::error::SpannedError),
    #[error("save data is inconsistent: {0}")]
    Dangling(#[from] WorldError),
}

/// Serialize the world.
///
/// # Errors
/// - if RON serialization fails
pub fn encode(world: &CastleWorld) -> Result<String, SnapshotError> {
    let pretty = ron::ser::PrettyConfig::new().struct_names(false);
    Ok(ron::ser::to_string_pretty(world, pretty)?)
}

/// Rebuild a world from a snapshot, or fail without producing anything.
///
/// # Errors
/// - if the text is not a world, or names an item or room the world does not contain
pub fn decode(text: &str) -> Result<CastleWorld, SnapshotError> {
    let world: CastleWorld = ron::from_str(text)?;
    world.check_references()?;
    if world.version != CASTLE_VERSION {
        warn!(
            "snapshot for '{}' was written by v{}, current version is v{CASTLE_VERSION}",
            world.player.name, world.version
        );
    }
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::build_world_from_def;
    use uuid::Uuid;

    fn castle() -> CastleWorld {
        build_world_from_def(&castle_data::castle_world(), "Ada").expect("castle builds")
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(decode("not a castle"), Err(SnapshotError::Decode(_))));
    }

    #[test]
    fn dangling_ids_fail_closed() {
        let mut world = castle();
        let ghost = Uuid::new_v4();
        world.last_item_used = Some(ghost);
        let text = encode(&world).expect("encode");
        match decode(&text) {
            Err(SnapshotError::Dangling(WorldError::UnknownItem(id))) => assert_eq!(id, ghost),
            other => panic!("expected a dangling item, got {other:?}"),
        }
    }

    #[test]
    fn old_versions_still_load() {
        let mut world = castle();
        world.version = "0.0.1".into();
        let text = encode(&world).expect("encode");
        assert_eq!(decode(&text).expect("decode").version, "0.0.1");
    }
}
