//! Effect execution context.

use crate::character::CharacterId;
use crate::engine::CombatEngine;

use super::damage::DamageType;

/// Context for one effect invocation.
///
/// Carries the engine mutably so that effects can re-enter the damage and
/// resource pipelines. The caster is guaranteed to exist when the context is
/// built by [`super::Effect::call`]; the target may not.
pub struct EffectContext<'a> {
    /// Mutable engine state.
    pub engine: &'a mut CombatEngine,

    /// The character on whose behalf the effect runs.
    pub caster: CharacterId,

    /// The other character of the interaction.
    pub target: CharacterId,

    /// Damage type of the interaction in transit.
    pub damage_type: DamageType,
}

impl<'a> EffectContext<'a> {
    pub fn new(
        engine: &'a mut CombatEngine,
        caster: CharacterId,
        target: CharacterId,
        damage_type: DamageType,
    ) -> Self {
        Self {
            engine,
            caster,
            target,
            damage_type,
        }
    }

    /// Character a primitive effect acts on.
    pub fn subject(&self, affects_caster: bool) -> CharacterId {
        if affects_caster {
            self.caster
        } else {
            self.target
        }
    }
}
