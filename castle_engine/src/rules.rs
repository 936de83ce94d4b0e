//! Content-specific side effects layered onto interact, use and pick.
//!
//! Rules are evaluated as pure functions of the acting item, the target and the
//! names in the inventory. They return a [`RuleOutcome`]; the world applies it.
//!
//! Evaluation order is fixed by rule kind, then content order:
//! - interact: collect-on-interact, hazard, victory gate
//! - use: conceal-on-open, duel, fragile target, reusable tool
//! - pick: hazardous pickup

use std::collections::BTreeSet;

use castle_data::RuleDef;
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Item;

/// A state change requested by a rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Move the item into the inventory (from the room, if it is there).
    Collect(Uuid),
    /// Make the item invisible.
    Hide(Uuid),
    /// Put a consumed item back into the inventory.
    Return(Uuid),
    /// The player has escaped.
    Victory,
}

/// Everything the rules decided about one action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub messages: Vec<String>,
    /// Life points to take away.
    pub damage: i32,
    pub effects: Vec<Effect>,
}

impl RuleOutcome {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.damage == 0 && self.effects.is_empty()
    }

    /// Messages joined by newlines.
    pub fn message(&self) -> String {
        self.messages.join("\n")
    }

    fn hurt(&mut self, damage: i32, message: &str) {
        self.damage += damage;
        self.messages.push(message.to_string());
    }
}

/// What a rule sees when the player interacts with `subject`.
pub struct InteractContext<'a> {
    pub subject: &'a Item,
    /// Lowercased names in the inventory.
    pub held: &'a BTreeSet<String>,
    /// Lowercased names of the visible items in the current room.
    pub visible_here: &'a BTreeSet<String>,
}

/// What a rule sees when `used` is applied to `lock`.
pub struct UseContext<'a> {
    pub lock: &'a Item,
    pub used: &'a Item,
    /// True only for the use that emptied the lock's requirements.
    pub just_opened: bool,
    /// True if the lock guards a room that is now unlocked.
    pub blocked_room_unlocked: bool,
    pub held: &'a BTreeSet<String>,
}

/// A pick refused by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickPenalty {
    pub damage: i32,
    pub message: String,
}

/// The compiled rule table of a world.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    rules: Vec<RuleDef>,
}

fn rank(rule: &RuleDef) -> u8 {
    match rule {
        RuleDef::CollectOnInteract { .. } => 0,
        RuleDef::Hazard { .. } => 1,
        RuleDef::VictoryGate { .. } => 2,
        RuleDef::ConcealOnOpen { .. } => 3,
        RuleDef::Duel { .. } => 4,
        RuleDef::FragileTarget { .. } => 5,
        RuleDef::ReusableTool { .. } => 6,
        RuleDef::HazardousPickup { .. } => 7,
    }
}

fn same(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

impl RuleBook {
    pub fn new(mut rules: Vec<RuleDef>) -> Self {
        rules.sort_by_key(rank);
        Self { rules }
    }

    pub fn rules(&self) -> &[RuleDef] {
        &self.rules
    }

    /// Rules that fire when the player interacts with an item.
    pub fn on_interact(&self, ctx: &InteractContext<'_>) -> RuleOutcome {
        let mut out = RuleOutcome::default();
        let subject = ctx.subject;
        for rule in &self.rules {
            match rule {
                RuleDef::CollectOnInteract { item } if subject.is_named(item) => {
                    if !ctx.held.contains(&subject.key()) {
                        out.effects.push(Effect::Collect(subject.id));
                    }
                },
                RuleDef::Hazard {
                    item,
                    unless_holding,
                    damage,
                    message,
                } if subject.is_named(item) => {
                    let protected = unless_holding
                        .as_ref()
                        .is_some_and(|guard| ctx.held.contains(&guard.to_lowercase()));
                    if !protected {
                        out.hurt(*damage, message);
                    }
                },
                RuleDef::VictoryGate { item, requires_visible } if subject.is_named(item) => {
                    if ctx.visible_here.contains(&requires_visible.to_lowercase()) {
                        out.effects.push(Effect::Victory);
                    }
                },
                _ => {},
            }
        }
        if !out.is_empty() {
            info!("interact rules for '{}' fired: {:?}", subject.name, out);
        }
        out
    }

    /// Rules that fire when an inventory item is used on a lock.
    pub fn on_use(&self, ctx: &UseContext<'_>) -> RuleOutcome {
        let mut out = RuleOutcome::default();
        let (lock, used) = (ctx.lock, ctx.used);
        for rule in &self.rules {
            match rule {
                RuleDef::ConcealOnOpen { item } if lock.is_named(item) => {
                    if ctx.blocked_room_unlocked {
                        out.effects.push(Effect::Hide(lock.id));
                    }
                },
                RuleDef::Duel {
                    target,
                    weapon,
                    damage,
                    defeat_message,
                    victory_message,
                } if lock.is_named(target) && ctx.just_opened => {
                    if let Some(prisoner) = lock.lock().and_then(|state| state.blocks.item_id()) {
                        out.effects.push(Effect::Hide(prisoner));
                    }
                    if ctx.held.contains(&weapon.to_lowercase()) {
                        out.messages.push(victory_message.clone());
                    } else {
                        out.hurt(*damage, defeat_message);
                    }
                },
                RuleDef::FragileTarget {
                    tool,
                    targets,
                    damage,
                    message,
                } if used.is_named(tool) && targets.iter().any(|t| lock.is_named(t)) => {
                    out.hurt(*damage, &message.replace("{target}", &lock.name));
                },
                _ => {},
            }
        }
        if !out.is_empty() {
            info!("use rules for '{}' on '{}' fired: {:?}", used.name, lock.name, out);
        }
        out
    }

    /// True if `used` goes back into the inventory after being consumed.
    pub fn is_reusable(&self, used: &Item) -> bool {
        self.rules
            .iter()
            .any(|rule| matches!(rule, RuleDef::ReusableTool { item } if used.is_named(item)))
    }

    /// A penalty if picking up `name` is refused.
    pub fn on_pick(&self, name: &str, held: &BTreeSet<String>) -> Option<PickPenalty> {
        self.rules.iter().find_map(|rule| match rule {
            RuleDef::HazardousPickup {
                item,
                requires,
                damage,
                message,
            } if same(item, name.trim()) && !held.contains(&requires.to_lowercase()) => Some(PickPenalty {
                damage: *damage,
                message: message.clone(),
            }),
            _ => None,
        })
    }
}
