//! `game::item` module
//!
//! Interacting with items and using inventory items on locks.

use log::info;
use uuid::Uuid;

use crate::game::{CANNOT_USE_HERE, ITEM_NOT_FOUND};
use crate::rules::{Effect, InteractContext, RuleOutcome, UseContext};
use crate::{CastleWorld, Display, ItemKind, UnlockOutcome, WorldError};

impl CastleWorld {
    /// Examine an item in the room (visible ones only) or in the inventory.
    ///
    /// Containers give up their contents the first time; open locks show their
    /// alternate text. Returns the item on success so the caller can remember it.
    ///
    /// # Errors
    /// - if a referenced item or the player's room is missing
    pub fn interact(&mut self, name: &str, view: &mut dyn Display) -> Result<Option<Uuid>, WorldError> {
        let in_room = self.player_room_ref()?.contents.find_visible(name, &self.items);
        let Some(id) = in_room.or_else(|| self.player.inventory.get(name)) else {
            view.show(ITEM_NOT_FOUND);
            return Ok(None);
        };
        let item = self.item(id)?.clone();

        let mut message = item.description.clone();
        match &item.kind {
            ItemKind::Container(state) => {
                let contained = self.item_mut(state.contains)?;
                if contained.visible {
                    message.clone_from(&state.alt_description);
                } else {
                    contained.visible = true;
                    info!("'{}' found inside '{}'", contained.name, item.name);
                }
            },
            ItemKind::Locked(lock) if lock.is_open() => {
                message.clone_from(&lock.alt_description);
            },
            _ => {},
        }

        let held = self.held_names();
        let visible_here = self.visible_here();
        let outcome = self.rules.on_interact(&InteractContext {
            subject: &item,
            held: &held,
            visible_here: &visible_here,
        });
        self.apply_outcome(&outcome)?;
        if !outcome.messages.is_empty() {
            message.push('\n');
            message.push_str(&outcome.message());
        }

        if self.victory {
            view.show_image("victory");
            message = self.declare_victory();
        }
        view.show(&message);
        Ok(Some(id))
    }

    /// Apply an inventory item to the lock the player last interacted with.
    ///
    /// The item is consumed whenever the lock or a rule had something to say.
    /// Rules still apply to an open lock; if none of them fires, the lock shows its
    /// alternate text and nothing is consumed.
    ///
    /// # Errors
    /// - if a referenced item or room is missing
    pub fn use_item(&mut self, name: &str, view: &mut dyn Display) -> Result<Option<Uuid>, WorldError> {
        let Some(used_id) = self.player.inventory.get(name) else {
            view.show(&format!("{} is not in your inventory", name.trim()));
            return Ok(None);
        };
        let used = self.item(used_id)?.clone();

        let lock_id = match self.last_item_used {
            Some(id) if self.items.get(&id).is_some_and(|item| item.kind.is_locked()) => id,
            _ => {
                view.show(CANNOT_USE_HERE);
                return Ok(None);
            },
        };

        let lock_item = self.item_mut(lock_id)?;
        let lock_name = lock_item.name.clone();
        let Some(lock) = lock_item.lock_mut() else {
            view.show(CANNOT_USE_HERE);
            return Ok(None);
        };
        let (blocks, action, alt) = (lock.blocks, lock.action.clone(), lock.alt_description.clone());
        let already_open = lock.is_open();
        let (unlock_message, just_opened) = match lock.unlock_with(used_id) {
            UnlockOutcome::AlreadyOpen | UnlockOutcome::NoEffect => (None, false),
            UnlockOutcome::Progress { remaining } => {
                info!("'{}' accepted '{}', {remaining} to go", lock_name, used.name);
                (Some(format!("{} used successfully", used.name)), false)
            },
            UnlockOutcome::Opened(target) => {
                self.reveal(target)?;
                (Some(format!("{} used successfully\n{action}", used.name)), true)
            },
        };

        let held = self.held_names();
        let lock_item = self.item(lock_id)?.clone();
        let outcome = self.rules.on_use(&UseContext {
            lock: &lock_item,
            used: &used,
            just_opened,
            blocked_room_unlocked: self.blocked_room_unlocked(blocks),
            held: &held,
        });

        if unlock_message.is_none() && outcome.messages.is_empty() {
            view.show(if already_open { alt.as_str() } else { CANNOT_USE_HERE });
            return Ok(None);
        }

        self.player.inventory.remove_item(&used);
        info!("{} used up '{}' on '{}'", self.player.name, used.name, lock_name);
        self.apply_outcome(&outcome)?;
        if self.rules.is_reusable(&used) {
            self.apply_outcome(&RuleOutcome {
                effects: vec![Effect::Return(used_id)],
                ..RuleOutcome::default()
            })?;
        }

        let message = unlock_message
            .into_iter()
            .chain(outcome.messages)
            .collect::<Vec<_>>()
            .join("\n");
        view.show(&message);
        Ok(Some(used_id))
    }

    /// Carry out what the rules decided.
    pub(crate) fn apply_outcome(&mut self, outcome: &RuleOutcome) -> Result<(), WorldError> {
        if outcome.damage != 0 {
            self.player.lose_life_points(outcome.damage);
        }
        for effect in &outcome.effects {
            match *effect {
                Effect::Collect(id) => self.collect(id)?,
                Effect::Hide(id) => {
                    let item = self.item_mut(id)?;
                    item.visible = false;
                    info!("'{}' hidden", item.name);
                },
                Effect::Return(id) => {
                    let item = self.item(id)?.clone();
                    if !self.player.inventory.contains_id(id) && self.player.inventory.add(&item) {
                        info!("'{}' returned to the inventory", item.name);
                    }
                },
                Effect::Victory => {
                    self.declare_victory();
                },
            }
        }
        Ok(())
    }

    /// Move an item from the room into the inventory outside of `pick`.
    fn collect(&mut self, id: Uuid) -> Result<(), WorldError> {
        let item = self.item(id)?.clone();
        if self.player.inventory.contains_id(id) || self.player.inventory.is_full() {
            return Ok(());
        }
        self.player_room_mut()?.contents.remove_item(&item);
        self.player.inventory.add(&item);
        info!("{} collected '{}'", self.player.name, item.name);
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

    fn interact(world: &mut CastleWorld, view: &mut Transcript, name: &str) {
        if let Some(id) = world.interact(name, view).expect("interact") {
            world.remember_interaction(id);
        }
    }

    #[test]
    fn unknown_and_hidden_items_are_not_found() {
        let mut world = castle();
        let mut view = Transcript::new();
        assert_eq!(world.interact("unicorn", &mut view).expect("interact"), None);
        assert_eq!(view.screen(), "Item not found");
    }

    #[test]
    fn containers_reveal_once() {
        let mut world = castle();
        let mut view = Transcript::new();
        world.go(Some("studio"), &mut view).expect("go");

        assert_eq!(world.interact("key", &mut view).expect("interact"), None);
        world.interact("carpet", &mut view).expect("interact");
        assert!(view.screen().contains("mysterious key"));
        assert!(world.interact("key", &mut view).expect("interact").is_some());

        world.interact("carpet", &mut view).expect("interact");
        assert_eq!(
            view.screen(),
            "A beautiful persian carpet covers much of the studio floor."
        );
    }

    #[test]
    fn use_needs_a_lock_and_the_item_in_hand() {
        let mut world = castle();
        let mut view = Transcript::new();
        world.use_item("key", &mut view).expect("use");
        assert_eq!(view.screen(), "key is not in your inventory");

        world.pick("note").expect("note is collectable");
        interact(&mut world, &mut view, "painting");
        world.use_item("note", &mut view).expect("use");
        assert_eq!(view.screen(), "You can't use this item here");
        assert!(world.player.holds("note"));
    }

    #[test]
    fn wrong_item_on_a_lock_has_no_effect() {
        let mut world = castle();
        let mut view = Transcript::new();
        world.pick("candlestick").expect("candlestick");
        interact(&mut world, &mut view, "door");
        world.use_item("candlestick", &mut view).expect("use");
        assert_eq!(view.screen(), "You can't use this item here");
        assert!(world.player.holds("candlestick"));
    }

    #[test]
    fn gloves_are_collected_by_interacting() {
        let mut world = castle();
        let mut view = Transcript::new();
        unlock_lab(&mut world);
        world.go(Some("lab"), &mut view).expect("go");
        interact(&mut world, &mut view, "drawer");
        interact(&mut world, &mut view, "gloves");
        assert!(world.player.holds("gloves"));
        assert!(!world.player_room_ref().expect("room").contents.has("gloves"));
    }

    #[test]
    fn hammer_on_the_computer_hurts_and_comes_back() {
        let mut world = castle();
        let mut view = Transcript::new();
        unlock_lab(&mut world);
        world.go(Some("lab"), &mut view).expect("go");
        world.pick("hammer").expect("hammer");
        interact(&mut world, &mut view, "computer");
        world.use_item("hammer", &mut view).expect("use");
        assert_eq!(
            view.screen(),
            "You lost a life point because you damaged the computer. Remember, brute force is not always the solution!"
        );
        assert_eq!(world.player.life_points, 2);
        assert!(world.player.holds("hammer"));
    }

    #[test]
    fn gateway_wins_only_with_chichibio_free() {
        let mut world = castle();
        let mut view = Transcript::new();
        unlock_lab(&mut world);
        world.go(Some("lab"), &mut view).expect("go");
        world.pick("hammer").expect("hammer");
        open_dungeons(&mut world);
        world.go(Some("hall"), &mut view).expect("go");
        world.go(Some("north"), &mut view).expect("go");

        interact(&mut world, &mut view, "gateway");
        assert!(!world.victory);

        interact(&mut world, &mut view, "left-cell");
        world.use_item("hammer", &mut view).expect("use");
        assert!(view.screen().contains("you freed Chichibio"));
        assert!(world.player.holds("hammer"));

        view.clear();
        interact(&mut world, &mut view, "gateway");
        assert!(world.victory);
        assert!(view.events.contains(&DisplayEvent::Image(Scene::Victory)));
        assert!(view.screen().starts_with("YOU WON!"));
    }

    #[test]
    fn right_cell_duel_costs_two_without_sword() {
        let mut world = castle();
        let mut view = Transcript::new();
        unlock_lab(&mut world);
        world.go(Some("lab"), &mut view).expect("go");
        world.pick("hammer").expect("hammer");
        open_dungeons(&mut world);
        world.go(Some("hall"), &mut view).expect("go");
        world.go(Some("north"), &mut view).expect("go");

        interact(&mut world, &mut view, "right-cell");
        world.use_item("hammer", &mut view).expect("use");
        assert!(view.screen().ends_with(
            "You just lost two life points because you didn't have the sword to defend yourself"
        ));
        assert_eq!(world.player.life_points, 1);
        assert!(!world.visible_here().contains("claudio"));

        world.use_item("hammer", &mut view).expect("use");
        assert_eq!(view.screen(), "You have already opened the cell, it is now empty");
        assert_eq!(world.player.life_points, 1);
    }

    #[test]
    fn hammer_on_an_opened_computer_still_hurts() {
        let mut world = castle();
        let mut view = Transcript::new();
        world.go(Some("kitchen"), &mut view).expect("go");
        interact(&mut world, &mut view, "cookbook");
        world.pick("recipe").expect("recipe");
        world.go(Some("hall"), &mut view).expect("go");
        unlock_lab(&mut world);
        world.go(Some("lab"), &mut view).expect("go");
        interact(&mut world, &mut view, "computer");
        world.use_item("recipe", &mut view).expect("use");
        assert!(view.screen().starts_with("recipe used successfully"));

        world.pick("hammer").expect("hammer");
        interact(&mut world, &mut view, "computer");
        world.use_item("hammer", &mut view).expect("use");
        assert_eq!(
            view.screen(),
            "You lost a life point because you damaged the computer. Remember, brute force is not always the solution!"
        );
        assert_eq!(world.player.life_points, 2);
        assert!(world.player.holds("hammer"));
    }

    #[test]
    fn unrelated_item_on_an_opened_lock_shows_its_alternate_text() {
        let mut world = castle();
        let mut view = Transcript::new();
        world.go(Some("kitchen"), &mut view).expect("go");
        interact(&mut world, &mut view, "cookbook");
        world.pick("recipe").expect("recipe");
        world.go(Some("hall"), &mut view).expect("go");
        unlock_lab(&mut world);
        world.go(Some("lab"), &mut view).expect("go");
        interact(&mut world, &mut view, "computer");
        world.use_item("recipe", &mut view).expect("use");

        world.pick("gloves").expect_err("gloves are still in the drawer");
        interact(&mut world, &mut view, "drawer");
        interact(&mut world, &mut view, "gloves");
        interact(&mut world, &mut view, "computer");
        world.use_item("gloves", &mut view).expect("use");
        assert_eq!(view.screen(), "You have already entered the password, you can now use the machine");
        assert!(world.player.holds("gloves"));
        assert_eq!(world.player.life_points, 3);
    }

    fn unlock_lab(world: &mut CastleWorld) {
        let lab = world.map.room_by_name("lab").map(|r| r.id).expect("lab");
        world.reveal(crate::Blocked::Room(lab)).expect("reveal");
    }

    fn open_dungeons(world: &mut CastleWorld) {
        let dungeons = world.map.room_by_name("dungeons").map(|r| r.id).expect("dungeons");
        world.reveal(crate::Blocked::Room(dungeons)).expect("reveal");
    }
}
