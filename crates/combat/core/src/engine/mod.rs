//! Combat engine - the arena that owns every character.
//!
//! All cross-character interaction goes through [`CombatEngine`]: effects get
//! `&mut CombatEngine` plus character ids, so an effect fired inside one
//! pipeline can re-enter another (lifesteal healing the attacker while the
//! attack is still resolving, retribution striking back, and so on).
//!
//! - [`pipeline`]: attack, damage/heal, secondary resource, death
//! - [`buffs`]: per-step ticking of active buffs
//! - [`events`]: log of notable outcomes, drained by the host

mod buffs;
mod events;
mod pipeline;

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::character::{AttributeName, Character, CharacterId, Intercept, Progression};
use crate::config::EngineConfig;
use crate::effect::{ActiveBuff, Effect};
use crate::env::{PcgRng, RngOracle, compute_seed};
use crate::stats::{CharacterStats, StatModifier, Statistic};

pub use events::CombatEvent;

/// Owns characters, the injected RNG and the event log.
pub struct CombatEngine {
    characters: BTreeMap<CharacterId, Character>,
    next_id: u32,
    config: EngineConfig,
    rng: Arc<dyn RngOracle>,
    nonce: u64,
    events: Vec<CombatEvent>,
}

impl CombatEngine {
    /// Engine rolling with [`PcgRng`].
    pub fn new(config: EngineConfig) -> Self {
        Self {
            characters: BTreeMap::new(),
            next_id: 0,
            config,
            rng: Arc::new(PcgRng),
            nonce: 0,
            events: Vec::new(),
        }
    }

    /// Engine rolling with a caller-provided oracle.
    pub fn with_rng(rng: Arc<dyn RngOracle>, seed: u64) -> Self {
        Self {
            rng,
            ..Self::new(EngineConfig::with_seed(seed))
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Characters
    // ========================================================================

    /// Add a character built from `stats`, with full gauges.
    pub fn spawn(&mut self, stats: CharacterStats) -> CharacterId {
        let id = self.allocate_id();
        self.insert(Character::new(id, stats))
    }

    /// Add a character that gains experience and levels.
    pub fn spawn_player(&mut self, stats: CharacterStats) -> CharacterId {
        let id = self.allocate_id();
        let progression = Progression::new(
            self.config.initial_experience_max,
            self.config.experience_growth,
        );
        self.insert(Character::new(id, stats).with_progression(progression))
    }

    fn allocate_id(&mut self) -> CharacterId {
        let id = CharacterId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, character: Character) -> CharacterId {
        let id = character.id();
        debug!(%id, name = character.name(), "character spawned");
        self.characters.insert(id, character);
        id
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.characters.contains_key(&id)
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Remove a character. Effects it cast afterwards become pass-throughs.
    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        self.characters.remove(&id)
    }

    // ========================================================================
    // Modifiers, effects, attributes
    // ========================================================================

    /// Returns whether the modifier was inserted.
    pub fn add_modifier(&mut self, id: CharacterId, modifier: StatModifier) -> bool {
        self.characters
            .get_mut(&id)
            .is_some_and(|c| c.stats_mut().add_modifier(modifier))
    }

    /// Returns whether a matching modifier was removed.
    pub fn remove_modifier(&mut self, id: CharacterId, modifier: &StatModifier) -> bool {
        self.characters
            .get_mut(&id)
            .is_some_and(|c| c.stats_mut().remove_modifier(modifier))
    }

    /// Register an effect at a hook point of `id`.
    ///
    /// At [`Intercept::None`] the effect is not registered; it is invoked once,
    /// immediately, with the character as both caster and target.
    pub fn add_effect(&mut self, id: CharacterId, effect: Arc<Effect>, intercept: Intercept) {
        if intercept == Intercept::None {
            effect.call(
                self,
                Some(id),
                id,
                EngineConfig::IMMEDIATE_DAMAGE_TYPE,
                EngineConfig::IMMEDIATE_VALUE,
            );
            return;
        }
        if let Some(character) = self.characters.get_mut(&id) {
            character.intercepts_mut().register(intercept, effect);
        }
    }

    /// Unregister this exact effect (by identity). Returns whether it was found.
    pub fn remove_effect(
        &mut self,
        id: CharacterId,
        effect: &Arc<Effect>,
        intercept: Intercept,
    ) -> bool {
        self.characters
            .get_mut(&id)
            .is_some_and(|c| c.intercepts_mut().unregister(intercept, effect))
    }

    pub fn set_attribute(&mut self, id: CharacterId, name: AttributeName, value: i32) {
        if let Some(character) = self.characters.get_mut(&id) {
            character.set_attribute(name, value);
        }
    }

    pub(crate) fn attach_buff(&mut self, target: CharacterId, buff: ActiveBuff) {
        if let Some(character) = self.characters.get_mut(&target) {
            character.push_buff(buff);
        }
    }

    // ========================================================================
    // Progression
    // ========================================================================

    /// Credit experience to a character with progression. Returns the number of
    /// levels gained.
    pub fn gain_experience(&mut self, id: CharacterId, amount: f32) -> u32 {
        let Some(character) = self.characters.get_mut(&id) else {
            return 0;
        };
        let multiplier = character.stat(Statistic::ExperienceValue);
        let Some(progression) = character.progression_mut() else {
            return 0;
        };

        let gained = progression.gain(amount, multiplier);
        if gained > 0 {
            let level = progression.level();
            self.events.push(CombatEvent::LevelUp {
                character: id,
                level,
            });
        }
        gained
    }

    // ========================================================================
    // RNG and events
    // ========================================================================

    /// Uniform roll in `[0, 1)` for `character`, consuming one nonce.
    fn roll_unit(&mut self, character: CharacterId, context: u32) -> f32 {
        let seed = compute_seed(self.config.seed, self.nonce, character.0, context);
        self.nonce += 1;
        self.rng.roll_unit(seed)
    }

    fn record(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Take every recorded event, oldest first.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for CombatEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for CombatEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatEngine")
            .field("characters", &self.characters.len())
            .field("config", &self.config)
            .field("nonce", &self.nonce)
            .field("events", &self.events.len())
            .finish()
    }
}
