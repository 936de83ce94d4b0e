//! Command-level play-throughs of the shipped castle.

use castle_engine::command::parse_command;
use castle_engine::repl::{Flow, Interpreter};
use castle_engine::{CastleWorld, DisplayEvent, Item, Scene, Transcript, build_world_from_def};

struct Game {
    world: CastleWorld,
    interp: Interpreter,
    view: Transcript,
}

impl Game {
    fn new() -> Self {
        Self {
            world: build_world_from_def(&castle_data::castle_world(), "Ada").expect("castle builds"),
            interp: Interpreter::new(),
            view: Transcript::new(),
        }
    }

    fn run(&mut self, line: &str) -> &str {
        let flow = self
            .interp
            .dispatch(&mut self.world, &parse_command(line), &mut self.view)
            .expect("consistent world");
        assert_eq!(flow, Flow::Continue, "'{line}' should not leave the game");
        self.view.screen()
    }

    fn script(&mut self, lines: &[&str]) {
        for line in lines {
            self.run(line);
        }
    }

    fn item(&self, symbol: &str) -> &Item {
        self.world
            .items
            .values()
            .find(|item| item.symbol == symbol)
            .expect("item exists")
    }

    fn room(&self) -> &str {
        &self.world.player_room_ref().expect("room").name
    }
}

#[test]
fn one_key_leaves_the_door_locked() {
    let mut game = Game::new();
    game.script(&["go studio", "interact carpet"]);
    assert!(game.item("studio_key").visible);
    assert_eq!(game.run("pick key"), "key picked up");
    game.script(&["go hall", "interact door"]);
    assert_eq!(game.run("use key"), "key used successfully");

    let door = game.item("hall_door").lock().expect("door is a lock");
    assert_eq!(door.remaining(), 1);
    assert!(!door.is_open());
    assert!(game.world.player.inventory.is_empty());
    assert!(!game.world.map.room_by_name("lab").expect("lab").unlocked);

    game.run("go");
    assert!(!game.view.screen().contains("south"));
}

#[test]
fn acid_without_gloves_burns() {
    let mut game = Game::new();
    for symbol in ["lab", "dungeons"] {
        let id = game.world.map.room_by_name(symbol).expect("room").id;
        game.world.reveal(castle_engine::Blocked::Room(id)).expect("reveal");
    }
    let acid = game.item("lab_acid").id;
    game.world.reveal(castle_engine::Blocked::Item(acid)).expect("reveal");
    game.run("go south");
    assert_eq!(game.room(), "lab");

    let text = game.run("pick acid").to_string();
    assert!(text.starts_with("You lost 1 lifepoint."));
    assert_eq!(game.world.player.life_points, 2);
    assert!(!game.world.player.inventory.contains_id(acid));
}

#[test]
fn tray_burns_without_gloves() {
    let mut game = Game::new();
    game.script(&["go kitchen", "interact oven"]);
    let text = game.run("interact tray").to_string();
    assert!(text.ends_with("the oven tray was glowing"));
    assert_eq!(game.world.player.life_points, 2);
}

#[test]
fn directions_follow_unlocked_rooms() {
    let mut game = Game::new();
    assert_eq!(game.run("go"), "You can go:\nkitchen\nstudio\neast\nwest\n");
    let lab = game.world.map.room_by_name("lab").expect("lab").id;
    game.world.reveal(castle_engine::Blocked::Room(lab)).expect("reveal");
    assert_eq!(game.run("go"), "You can go:\nkitchen\nstudio\nlab\neast\nwest\nsouth\n");
}

#[test]
fn full_escape() {
    let mut game = Game::new();

    // both keys open the south door
    game.script(&["go studio", "interact carpet", "pick key", "go hall", "interact door", "use key"]);
    game.script(&["go kitchen", "interact soup", "pick key", "interact cookbook", "pick recipe"]);
    game.script(&["go hall", "interact door"]);
    let text = game.run("use key").to_string();
    assert!(text.starts_with("key used successfully\nGood job"));
    assert!(game.world.map.room_by_name("lab").expect("lab").unlocked);
    assert!(!game.item("hall_door").visible);

    // the recipe is the computer password, the leaflet the machine formula
    game.script(&["go south", "interact computer", "use recipe"]);
    assert!(game.item("lab_machine").visible);
    game.script(&["go hall", "go west", "interact drawer", "pick leaflet", "go hall", "go lab"]);
    game.script(&["interact machine", "use leaflet"]);
    assert!(game.item("lab_acid").visible);

    // gloves first, then the acid opens the north gate
    game.script(&["interact drawer", "interact gloves"]);
    assert!(game.world.player.holds("gloves"));
    assert_eq!(game.run("pick acid"), "acid picked up");
    game.script(&["go hall", "interact gate", "use acid"]);
    assert!(game.world.map.room_by_name("dungeons").expect("dungeons").unlocked);

    // the hammer frees Chichibio, who opens the gateway
    game.script(&["go south", "pick hammer", "go hall", "go north"]);
    assert_eq!(game.room(), "dungeons");
    game.script(&["interact left-cell", "use hammer"]);
    assert!(game.world.player.holds("hammer"));
    game.view.clear();
    let text = game.run("interact gateway").to_string();

    assert!(game.world.victory);
    assert!(text.starts_with("YOU WON!"));
    assert!(game.view.events.contains(&DisplayEvent::Image(Scene::Victory)));
    assert_eq!(game.world.player.life_points, 3);
    assert_eq!(game.run("look"), "The game is come to an end. \nEnter: restart or exit");
}
