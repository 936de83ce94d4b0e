//! `game::movement` module
//!
//! Moving between rooms, including backtracking through the visit history.

use log::info;
use uuid::Uuid;

use crate::game::{DIRECTION_NOT_VALID, NO_WAY_BACK};
use crate::{CastleWorld, Display, WorldError};

impl CastleWorld {
    /// Handle `go`. With no direction, list the open exits; `"back"` returns to the
    /// previous room. Returns the room entered, if any.
    ///
    /// # Errors
    /// - if the player's room or the destination is missing from the map
    pub fn go(&mut self, direction: Option<&str>, view: &mut dyn Display) -> Result<Option<Uuid>, WorldError> {
        let Some(direction) = direction else {
            view.show(&self.map.print_directions(self.player.location));
            return Ok(None);
        };

        let destination = if direction.trim().eq_ignore_ascii_case("back") {
            let Some(previous) = self.player.pop_last_location() else {
                view.show(NO_WAY_BACK);
                return Ok(None);
            };
            previous
        } else {
            match self.map.get_exit(self.player.location, direction) {
                Some(dest) => dest,
                None => {
                    info!("{} can't go '{direction}' from here", self.player.name);
                    view.show(DIRECTION_NOT_VALID);
                    return Ok(None);
                },
            }
        };

        self.enter(destination, view)?;
        Ok(Some(destination))
    }

    fn enter(&mut self, destination: Uuid, view: &mut dyn Display) -> Result<(), WorldError> {
        let room = self
            .map
            .room(destination)
            .ok_or(WorldError::UnknownRoom(destination))?;
        let (name, description) = (room.name.clone(), room.description.clone());
        self.player.set_location(destination);
        info!("{} moved to '{name}'", self.player.name);
        view.show_image(&name);
        view.show(&description);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::loader::build_world_from_def;
    use crate::{CastleWorld, DisplayEvent, Scene, Transcript};

    fn castle() -> CastleWorld {
        build_world_from_def(&castle_data::castle_world(), "Ada").expect("castle builds")
    }

    fn room_name(world: &CastleWorld) -> String {
        world.player_room_ref().map(|r| r.name.clone()).unwrap_or_default()
    }

    #[test]
    fn directions_hide_locked_rooms() {
        let mut world = castle();
        let mut view = Transcript::new();
        world.go(None, &mut view).expect("go");
        assert_eq!(view.screen(), "You can go:\nkitchen\nstudio\neast\nwest\n");
    }

    #[test]
    fn moving_shows_image_then_description() {
        let mut world = castle();
        let mut view = Transcript::new();
        let entered = world.go(Some("west"), &mut view).expect("go");
        assert!(entered.is_some());
        assert_eq!(room_name(&world), "studio");
        assert_eq!(view.events[0], DisplayEvent::Image(Scene::Studio));
        assert!(view.screen().starts_with("You are now in the studio."));
    }

    #[test]
    fn spokes_lead_back_to_the_hall_whatever_the_label() {
        let mut world = castle();
        let mut view = Transcript::new();
        world.go(Some("kitchen"), &mut view).expect("go");
        world.go(Some("west"), &mut view).expect("go");
        assert_eq!(room_name(&world), "hall");
    }

    #[test]
    fn locked_rooms_and_unknown_labels_are_invalid() {
        let mut world = castle();
        let mut view = Transcript::new();
        for label in ["south", "lab", "north", "up"] {
            assert_eq!(world.go(Some(label), &mut view).expect("go"), None);
            assert_eq!(view.screen(), "Direction not valid");
        }
        assert_eq!(room_name(&world), "hall");
    }

    #[test]
    fn go_back_walks_the_history() {
        let mut world = castle();
        let mut view = Transcript::new();
        world.go(Some("back"), &mut view).expect("go");
        assert_eq!(
            view.screen(),
            "This is the first location you visited, you cannot go back anymore"
        );

        world.go(Some("studio"), &mut view).expect("go");
        world.go(Some("hall"), &mut view).expect("go");
        world.go(Some("kitchen"), &mut view).expect("go");
        world.go(Some("back"), &mut view).expect("go");
        assert_eq!(room_name(&world), "hall");
        world.go(Some("back"), &mut view).expect("go");
        assert_eq!(room_name(&world), "studio");
        world.go(Some("back"), &mut view).expect("go");
        assert_eq!(room_name(&world), "hall");
        world.go(Some("back"), &mut view).expect("go");
        assert_eq!(room_name(&world), "hall");
        assert!(view.screen().starts_with("This is the first location"));
    }
}
