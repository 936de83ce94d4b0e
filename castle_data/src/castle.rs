//! The shipped five-room castle.
//!
//! The hall is the hub; the studio, kitchen, lab and dungeons hang off it. Lab and
//! dungeons start locked behind the hall's door and gate.

use std::collections::BTreeMap;

use crate::*;

const HALL_DESC: &str = "You are now in the hall. The medieval castle hall, illuminated by sparkling chandeliers, glows with precious antiques, creating a magical and regal atmosphere.";
const STUDIO_DESC: &str = "You are now in the studio. The medieval castle studio, with brick walls and shelves full of dusty books, is a perfect refuge for moments of reflection.";
const KITCHEN_DESC: &str = "You are now in the kitchen. The medieval castle kitchen, animated by blazing braziers and steaming pots, smells of freshly baked bread and exotic spices, offering a cosy rustic atmosphere";
const LAB_DESC: &str = "You are now in the lab. The medieval castle workshop, full of glittering stills and sparkling potions, is a fascinating place where science meets magic.";
const DUNGEONS_DESC: &str = "You are now in the dungeons. The medieval castle dungeons, with their eerie shadows and rusty chains, exude a dark fascination, whispering stories of mysteries and adventures lost in time";

const INTRO: &str =
    "Welcome to my castle {name}. There's a note in front of you. Enter \"interact note\" to read it.";
const VICTORY: &str = "YOU WON! \nCongratulations, you escaped the castle, now you're free!\n\nEnter: restart or exit";

const KEY_DESC: &str = "The key has a modern look. It seems to be the key of an armored door...";

/// Build the complete castle content.
pub fn castle_world() -> WorldDef {
    WorldDef {
        game: GameDef {
            title: "Castle Escape".into(),
            slug: "castle-escape".into(),
            intro: INTRO.into(),
            victory: VICTORY.into(),
            player: PlayerDef {
                start_room: "hall".into(),
                life_points: 3,
                inventory_capacity: 2,
            },
        },
        rooms: rooms(),
        items: items(),
        topology: TopologyDef {
            hub: "hall".into(),
            compass: BTreeMap::from([
                ("north".to_string(), "dungeons".to_string()),
                ("south".to_string(), "lab".to_string()),
                ("east".to_string(), "kitchen".to_string()),
                ("west".to_string(), "studio".to_string()),
            ]),
        },
        rules: rules(),
    }
}

fn room(id: &str, desc: &str, unlocked: bool, exits: &[&str]) -> RoomDef {
    RoomDef {
        id: id.into(),
        name: id.into(),
        desc: desc.into(),
        unlocked,
        exits: exits.iter().map(|e| e.to_string()).collect(),
        capacity: None,
    }
}

fn rooms() -> Vec<RoomDef> {
    vec![
        room(
            "hall",
            HALL_DESC,
            true,
            &["kitchen", "studio", "lab", "dungeons", "east", "west", "south", "north"],
        ),
        room("studio", STUDIO_DESC, true, &["hall", "east"]),
        room("kitchen", KITCHEN_DESC, true, &["hall", "west"]),
        room("lab", LAB_DESC, false, &["hall", "north"]),
        room("dungeons", DUNGEONS_DESC, false, &["hall", "south"]),
    ]
}

fn plain(id: &str, name: &str, room: &str, desc: &str, visible: bool, collectable: bool) -> ItemDef {
    ItemDef {
        id: id.into(),
        name: name.into(),
        desc: desc.into(),
        room: room.into(),
        visible,
        collectable,
        kind: ItemKindDef::Plain,
    }
}

fn container(id: &str, name: &str, room: &str, desc: &str, contains: &str, alt_desc: &str) -> ItemDef {
    ItemDef {
        id: id.into(),
        name: name.into(),
        desc: desc.into(),
        room: room.into(),
        visible: true,
        collectable: false,
        kind: ItemKindDef::Container {
            contains: contains.into(),
            alt_desc: alt_desc.into(),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn locked(
    id: &str,
    name: &str,
    room: &str,
    desc: &str,
    visible: bool,
    requires: &[&str],
    blocks: BlockedDef,
    action: &str,
    alt_desc: &str,
) -> ItemDef {
    ItemDef {
        id: id.into(),
        name: name.into(),
        desc: desc.into(),
        room: room.into(),
        visible,
        collectable: false,
        kind: ItemKindDef::Locked {
            requires: requires.iter().map(|r| r.to_string()).collect(),
            blocks,
            action: action.into(),
            alt_desc: alt_desc.into(),
        },
    }
}

fn items() -> Vec<ItemDef> {
    let mut items = Vec::new();

    // hall
    items.push(plain(
        "hall_note",
        "note",
        "hall",
        "You are trapped in my castle, you are now in the hall. This room has four doors, but two of them are locked. To the east there is the kitchen, to the west the study. The north gate and the south door are locked. Use your wits to solve the puzzles and find a way out. I wish you good luck, you'll need it.\nEnter \"help\" to see all the commands",
        true,
        true,
    ));
    items.push(plain(
        "hall_armour",
        "armour",
        "hall",
        "A medieval armour is placed next to the gate. Intrigued, you get closer  and all of a sudden it starts talking: \n\"To go through this door, you need something keen,\na substance that burns, though not often seen.\nIt can wear down the strong, leave its mark in the flash,\nthough it's clear and quite common, it makes metals clash\"\nIt sounds like a riddle, what does that mean?",
        true,
        false,
    ));
    items.push(plain(
        "hall_candlestick",
        "Candlestick",
        "hall",
        "A gold candlestick with 3 candles rests over the table. The light it produces is not much but could come in handy",
        true,
        true,
    ));
    items.push(plain(
        "hall_painting",
        "painting",
        "hall",
        "The painting depicts the owner of the castle",
        true,
        false,
    ));
    items.push(locked(
        "hall_door",
        "door",
        "hall",
        "In the south facing wall there is an armored door. There are 2 locks. Maybe the exit is back here... but you need 2 keys",
        true,
        &["studio_key", "kitchen_key"],
        BlockedDef::Room("lab".into()),
        "Good job, you found both the keys and opened the door. You just opened a way to the lab",
        "The door is opened",
    ));
    items.push(locked(
        "hall_gate",
        "gate",
        "hall",
        "In the north facing wall there is a large and powerful door of solid wood. The gear is locked and there is no way to open it... You have to find an alternative way to go through",
        true,
        &["lab_acid"],
        BlockedDef::Room("dungeons".into()),
        "Good job, you figured out the solution to the riddle and managed to synthesise the acid and now you have created a passage to the castle dungeons",
        "The gate is opened",
    ));

    // studio
    items.push(plain(
        "studio_leaflet",
        "leaflet",
        "studio",
        "The sheet has only one writing in the center, H2SO4. It looks like some kind of code... but who knows? To be kept with such care it must surely have a very important meaning",
        false,
        true,
    ));
    items.push(container(
        "studio_drawer",
        "drawer",
        "studio",
        "The last drawer at the bottom of the desk is open. Inside there is a leaflet",
        "studio_leaflet",
        "You already opened this drawer, nothing new magically appeared.",
    ));
    items.push(plain("studio_key", "key", "studio", KEY_DESC, false, true));
    items.push(container(
        "studio_carpet",
        "carpet",
        "studio",
        "A beautiful persian carpet covers much of the studio floor. Looking for clues you decide to raise it and with great surprise you find a mysterious key",
        "studio_key",
        "A beautiful persian carpet covers much of the studio floor.",
    ));
    items.push(plain(
        "studio_sword",
        "sword",
        "studio",
        "Hanging on the wall is a sword whose nameplate reads: \"The legend says that this is the sword belonged to King Artu', no sword is sharper and brighter\"\nWell, at least you have something to defend yourself with.",
        true,
        true,
    ));
    items.push(plain(
        "studio_crane",
        "crane",
        "studio",
        "An embalmed crane is standing on a pedestal. Its white and grey feathers and sharp beak make it an elegant hunter.Such an odd animal to keep in your studio, maybe it had some special meaning to the owner",
        true,
        false,
    ));

    // kitchen
    items.push(plain("kitchen_key", "key", "kitchen", KEY_DESC, false, true));
    items.push(container(
        "kitchen_soup",
        "soup",
        "kitchen",
        "In the middle of the kitchen table there is a soup that smells great. Tempted by its smell you taste it and spoon after spoon you finish it. On the bottom of the empty plate you find a key",
        "kitchen_key",
        "Your already ate the soup!!",
    ));
    items.push(plain(
        "kitchen_recipe",
        "recipe",
        "kitchen",
        "\"1 Gru\n2 cloveS of garlic\n1 sprig of rosemarY\nsalt and Pepper\neXtra virgin olive oil\n1 glass of wHite wine\n1 Lemon\n1 tablespoon of Apples\"\n What a weird choice of uppercase letters, I wonder if they mean something...",
        false,
        true,
    ));
    items.push(container(
        "kitchen_cookbook",
        "cookbook",
        "kitchen",
        "What an amazing discovery, the cook's recipe book. Among the many, a recipe in particular arouses your attention.",
        "kitchen_recipe",
        "The cook's recipe book contains many recipes of the best dishes in the world to satisfy the fine taste of the castle owner",
    ));
    items.push(container(
        "kitchen_oven",
        "oven",
        "kitchen",
        "Intrigued by the smell in the air you approach the oven. Looking inside you see a baking tray. Because it looks so good and smells so incredible, you decide to open the oven to inspect it.",
        "kitchen_tray",
        "The oven has been open since the last time you opened it, remember to use something not to burn yourself",
    ));
    items.push(plain(
        "kitchen_tray",
        "tray",
        "kitchen",
        "Inside the oven a baking tray contains a baked crane, the smell is delicious!",
        false,
        false,
    ));
    items.push(container(
        "kitchen_pantry",
        "pantry",
        "kitchen",
        "You expect the kitchen pantry to have an endless supply of the most sought-after ingredients from all over the world but instead you only find a bag of bad-smelling food",
        "kitchen_food",
        "Well, all the same here since the last check",
    ));
    items.push(plain(
        "kitchen_food",
        "food",
        "kitchen",
        "It definitely doesn't taste the best...",
        false,
        false,
    ));

    // lab
    items.push(plain(
        "lab_skull",
        "skull",
        "lab",
        "Leaning against a shelf there is a skull in plain sight. It is the skull of the legendary Hamlet, King of Denmark. ",
        true,
        true,
    ));
    items.push(plain(
        "lab_gloves",
        "gloves",
        "lab",
        "Ordinary-looking laboratory gloves, white in colour and made of a very durable material. ",
        false,
        true,
    ));
    items.push(container(
        "lab_drawer",
        "drawer",
        "lab",
        "Inside one of the many drawer in the lab you will find some safety devices, including gloves. ",
        "lab_gloves",
        "You already opened this drawer, nothing new appeared magically.",
    ));
    items.push(plain(
        "lab_hammer",
        "hammer",
        "lab",
        "The hammer looks powerful and seems to be very heavy, it will be useful if you need to break something.",
        true,
        true,
    ));
    items.push(plain(
        "lab_acid",
        "acid",
        "lab",
        "The bottle contains a clear, odourless liquid that is still steaming. Sulphuric acid has a powerful corrosive action, and must be handled with care.",
        false,
        true,
    ));
    items.push(locked(
        "lab_machine",
        "machine",
        "lab",
        "The laboratory machine seems to be very complex, it has thousands of tubes and as many steaming test tubes of every possible colour. The machine is used to create chemicals but requires the formula, maybe it is writter somewhere",
        false,
        &["studio_leaflet"],
        BlockedDef::Item("lab_acid".into()),
        "What an insight, you realised that H2SO4 is chemical formula of sulphuric acid. The machine just synthesized a test tube of it.",
        "You can synthesise other chemicals if you find other formulas around the castle.",
    ));
    items.push(locked(
        "lab_computer",
        "computer",
        "lab",
        "A modern-looking computer sits on top of the table. Intrigued by such a modern object you decide to open it, but to your misfortune it requires a password, maybe it is written on some piece of paper.",
        true,
        &["kitchen_recipe"],
        BlockedDef::Item("lab_machine".into()),
        "Well done, the password is correct. The computer has activated some gears and from the centre of the table rises a strange looking-machine.",
        "You have already entered the password, you can now use the machine",
    ));

    // dungeons
    items.push(plain(
        "dungeons_chichibio",
        "Chichibio",
        "dungeons",
        "\"We'd better find a way out before someone come back...\"",
        false,
        false,
    ));
    items.push(plain("dungeons_claudio", "Claudio", "dungeons", "", false, false));
    items.push(locked(
        "dungeons_left_cell",
        "left-cell",
        "dungeons",
        "Inside the cell there is Chichibio who introduces himself: \"I am a Venetian cook, I am accused of eating a leg of the crane intended for my master, but I am innocent, all he had to do was shout loudly and the second leg would come out, please help me\"",
        true,
        &["lab_hammer"],
        BlockedDef::Item("dungeons_chichibio".into()),
        "Well done, you freed Chichibio and now he can help you get out of this castle",
        "You have already opened the cell, it is now empty",
    ));
    items.push(locked(
        "dungeons_right_cell",
        "right-cell",
        "dungeons",
        "Inside the cell is Claudius, Hamlet's uncle, who introduces himself: \"my nephew Hamlet has accused me of killing my brother, but I am innocent, you must help me\".",
        true,
        &["lab_hammer"],
        BlockedDef::Item("dungeons_claudio".into()),
        "Claudius is a shrewd and ambitious character whose thirst for power leads him to commit nefarious acts. You open his cell and immediately he challenges you to a duel, after which he disappears into the darkness. ",
        "You have already opened the cell, it is now empty",
    ));
    items.push(plain(
        "dungeons_gateway",
        "gateway",
        "dungeons",
        "A huge, mighty-looking gateway is blocked by thoughtful gears. The exit might be hiding behind it, you need someone to help you turn the rusty gears, but choose well.",
        true,
        false,
    ));

    items
}

fn rules() -> Vec<RuleDef> {
    vec![
        RuleDef::CollectOnInteract { item: "gloves".into() },
        RuleDef::Hazard {
            item: "tray".into(),
            unless_holding: Some("gloves".into()),
            damage: 1,
            message: "You lost a life point because you didn't use gloves, the oven tray was glowing".into(),
        },
        RuleDef::Hazard {
            item: "food".into(),
            unless_holding: Some("gloves".into()),
            damage: 1,
            message: "You lost a life point because you ate rotten food".into(),
        },
        RuleDef::VictoryGate {
            item: "gateway".into(),
            requires_visible: "chichibio".into(),
        },
        RuleDef::ConcealOnOpen { item: "door".into() },
        RuleDef::ConcealOnOpen { item: "gate".into() },
        RuleDef::Duel {
            target: "right-cell".into(),
            weapon: "sword".into(),
            damage: 2,
            defeat_message: "You just lost two life points because you didn't have the sword to defend yourself".into(),
            victory_message: "Luckily you had the sword to defend yourself!!!".into(),
        },
        RuleDef::FragileTarget {
            tool: "hammer".into(),
            targets: vec!["gate".into(), "computer".into(), "machine".into()],
            damage: 1,
            message: "You lost a life point because you damaged the {target}. Remember, brute force is not always the solution!".into(),
        },
        RuleDef::ReusableTool { item: "gloves".into() },
        RuleDef::ReusableTool { item: "hammer".into() },
        RuleDef::HazardousPickup {
            item: "acid".into(),
            requires: "gloves".into(),
            damage: 1,
            message: "You lost 1 lifepoint.\nNext time make sure you have gloves before handling such dangerous substances".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_keys_share_a_name_but_not_an_id() {
        let world = castle_world();
        let keys: Vec<_> = world.items.iter().filter(|i| i.name == "key").collect();
        assert_eq!(keys.len(), 2);
        assert_ne!(keys[0].id, keys[1].id);
    }

    #[test]
    fn only_the_lab_and_dungeons_start_locked() {
        let world = castle_world();
        let locked: Vec<_> = world.rooms.iter().filter(|r| !r.unlocked).map(|r| r.id.as_str()).collect();
        assert_eq!(locked, vec!["lab", "dungeons"]);
    }
}
