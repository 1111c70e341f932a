//! Characters - layered stats, hook table, buffs, attributes and progression.
//!
//! A [`Character`] only holds state. Everything that involves another
//! character (attacks, healing, kills, buff ticks) is driven through
//! [`crate::CombatEngine`], which owns every character by [`CharacterId`].

pub mod attribute;
pub mod intercept;
pub mod progression;

use core::fmt;
use std::collections::BTreeMap;

use crate::effect::ActiveBuff;
use crate::stats::{Alliance, CharacterStats, LayeredStats, Resource, Statistic};

pub use attribute::{Attribute, AttributeName};
pub use intercept::{Intercept, InterceptTable};
pub use progression::Progression;

/// Unique identifier for a character owned by an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A combatant.
#[derive(Debug)]
pub struct Character {
    id: CharacterId,
    stats: LayeredStats,
    intercepts: InterceptTable,
    buffs: Vec<ActiveBuff>,
    attributes: BTreeMap<AttributeName, Attribute>,
    progression: Option<Progression>,
    dead: bool,
}

impl Character {
    pub fn new(id: CharacterId, base: CharacterStats) -> Self {
        Self {
            id,
            stats: LayeredStats::new(base),
            intercepts: InterceptTable::new(),
            buffs: Vec::new(),
            attributes: BTreeMap::new(),
            progression: None,
            dead: false,
        }
    }

    /// Builder: track experience and levels for this character.
    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = Some(progression);
        self
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.stats.current().name
    }

    pub fn alliance(&self) -> Alliance {
        self.stats.current().alliance
    }

    pub fn stats(&self) -> &LayeredStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut LayeredStats {
        &mut self.stats
    }

    /// Effective value of a statistic.
    pub fn stat(&self, stat: Statistic) -> f32 {
        self.stats.get(stat)
    }

    pub fn health(&self) -> &Resource {
        self.stats.health()
    }

    pub fn secondary(&self) -> &Resource {
        self.stats.secondary()
    }

    pub fn intercepts(&self) -> &InterceptTable {
        &self.intercepts
    }

    pub fn intercepts_mut(&mut self) -> &mut InterceptTable {
        &mut self.intercepts
    }

    pub fn buffs(&self) -> &[ActiveBuff] {
        &self.buffs
    }

    pub(crate) fn push_buff(&mut self, buff: ActiveBuff) {
        self.buffs.push(buff);
    }

    pub(crate) fn take_buffs(&mut self) -> Vec<ActiveBuff> {
        std::mem::take(&mut self.buffs)
    }

    /// Put ticked buffs back in front of any spawned while they were detached.
    pub(crate) fn restore_buffs(&mut self, mut ticked: Vec<ActiveBuff>) {
        ticked.append(&mut self.buffs);
        self.buffs = ticked;
    }

    pub fn attribute(&self, name: AttributeName) -> Option<&Attribute> {
        self.attributes.get(&name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Attach the attribute at `value`, or rescale it if already attached.
    pub fn set_attribute(&mut self, name: AttributeName, value: i32) {
        let attribute = match self.attributes.remove(&name) {
            Some(mut attribute) => {
                attribute.set_value(self, value);
                attribute
            }
            None => Attribute::attach(name, value, self),
        };
        self.attributes.insert(name, attribute);
    }

    /// Detach an attribute, removing its modifiers and passive.
    pub fn remove_attribute(&mut self, name: AttributeName) -> Option<Attribute> {
        let attribute = self.attributes.remove(&name)?;
        attribute.detach(self);
        Some(attribute)
    }

    pub fn progression(&self) -> Option<&Progression> {
        self.progression.as_ref()
    }

    pub fn progression_mut(&mut self) -> Option<&mut Progression> {
        self.progression.as_mut()
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Mark the character dead. Returns `false` if it already was.
    pub(crate) fn mark_dead(&mut self) -> bool {
        !std::mem::replace(&mut self.dead, true)
    }
}
