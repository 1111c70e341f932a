//! Effect enum and dispatcher.
//!
//! [`Effect`] wraps every concrete effect type. Each variant delegates to its
//! struct; the two value transforms are small enough to stay inline.

use tracing::trace;

use crate::character::CharacterId;
use crate::engine::CombatEngine;
use crate::stats::StatModifier;

use super::composite::{CallEffect, ConditionalEffect};
use super::condition::Condition;
use super::context::EffectContext;
use super::damage::{AttackEffect, DamageOrHealEffect, DamageType};
use super::modifier::StatModifierEffect;
use super::resource::ModifySecondaryEffect;
use super::timed::TimedEffect;

/// A transform `(caster, target, damage type, value) -> value` with optional
/// side effects on the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    // ========================================================================
    // Value transforms
    // ========================================================================
    /// `value + k`
    Increase(f32),
    /// `value * k`
    Multiply(f32),

    // ========================================================================
    // Health and resources
    // ========================================================================
    DamageOrHeal(DamageOrHealEffect),
    DamageOrHealUnmodified(AttackEffect),
    ModifySecondary(ModifySecondaryEffect),

    // ========================================================================
    // Stat modifiers
    // ========================================================================
    ApplyStatModifier(StatModifierEffect),
    RemoveStatModifier(StatModifierEffect),

    // ========================================================================
    // Composites
    // ========================================================================
    Call(CallEffect),
    Conditional(ConditionalEffect),
    Timed(TimedEffect),
}

impl Effect {
    pub fn damage_or_heal(amount: f32, affects_caster: bool) -> Self {
        Self::DamageOrHeal(DamageOrHealEffect::new(amount, affects_caster))
    }

    pub fn attack(multiplier: f32, affects_caster: bool) -> Self {
        Self::DamageOrHealUnmodified(AttackEffect::new(multiplier, affects_caster))
    }

    pub fn modify_secondary(amount: f32, affects_caster: bool) -> Self {
        Self::ModifySecondary(ModifySecondaryEffect::new(amount, affects_caster))
    }

    pub fn apply_modifier(modifier: StatModifier, affects_caster: bool) -> Self {
        Self::ApplyStatModifier(StatModifierEffect::new(modifier, affects_caster))
    }

    pub fn remove_modifier(modifier: StatModifier, affects_caster: bool) -> Self {
        Self::RemoveStatModifier(StatModifierEffect::new(modifier, affects_caster))
    }

    pub fn sequence(effects: Vec<Effect>) -> Self {
        Self::Call(CallEffect::new(effects))
    }

    pub fn timed(duration: f32, repeats: i32, start: Option<Effect>, end: Option<Effect>) -> Self {
        Self::Timed(TimedEffect::new(duration, repeats, start, end))
    }

    /// Builder: guard this effect with a condition.
    pub fn when(self, condition: Condition) -> Self {
        Self::Conditional(ConditionalEffect::new(self, condition))
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

impl Effect {
    /// Invoke the effect.
    ///
    /// An absent caster, or one the engine does not know, makes the call a
    /// pass-through returning `value` unchanged.
    pub fn call(
        &self,
        engine: &mut CombatEngine,
        caster: Option<CharacterId>,
        target: CharacterId,
        damage_type: DamageType,
        value: f32,
    ) -> f32 {
        let Some(caster) = caster.filter(|id| engine.contains(*id)) else {
            trace!(%target, "effect skipped: no caster");
            return value;
        };
        let mut ctx = EffectContext::new(engine, caster, target, damage_type);
        self.apply(&mut ctx, value)
    }

    /// Apply the effect inside an existing context.
    pub fn apply(&self, ctx: &mut EffectContext<'_>, value: f32) -> f32 {
        match self {
            Self::Increase(k) => value + k,
            Self::Multiply(k) => value * k,
            Self::DamageOrHeal(e) => e.apply(ctx, value),
            Self::DamageOrHealUnmodified(e) => e.apply(ctx, value),
            Self::ModifySecondary(e) => e.apply(ctx, value),
            Self::ApplyStatModifier(e) => e.attach(ctx, value),
            Self::RemoveStatModifier(e) => e.detach(ctx, value),
            Self::Call(e) => e.apply(ctx, value),
            Self::Conditional(e) => e.apply(ctx, value),
            Self::Timed(e) => e.apply(ctx, value),
        }
    }
}
