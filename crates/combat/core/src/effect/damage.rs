//! Damage and healing effects.

use super::context::EffectContext;

/// Damage type for defenses and damage-type conditions.
///
/// Physical damage is reduced by melee defense; every other type by magic
/// defense.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// Melee weapons, arrows.
    #[default]
    Physical,
    /// Pure arcane damage.
    Magic,
    Fire,
    Frost,
    Nature,
    Poison,
}

impl DamageType {
    /// Whether melee defense (rather than magic defense) mitigates this type.
    pub const fn is_physical(self) -> bool {
        matches!(self, Self::Physical)
    }
}

/// Direct damage (positive) or healing (negative) that bypasses every
/// interception hook.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOrHealEffect {
    pub amount: f32,
    pub affects_caster: bool,
    /// When set, the applied magnitude is `amount * value`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub proportional: bool,
}

impl DamageOrHealEffect {
    pub fn new(amount: f32, affects_caster: bool) -> Self {
        Self {
            amount,
            affects_caster,
            proportional: false,
        }
    }

    /// Builder: scale the magnitude by the value in transit.
    pub fn proportional(mut self) -> Self {
        self.proportional = true;
        self
    }

    pub fn apply(&self, ctx: &mut EffectContext<'_>, value: f32) -> f32 {
        let subject = ctx.subject(self.affects_caster);
        let amount = if self.proportional {
            self.amount * value
        } else {
            self.amount
        };
        ctx.engine
            .damage_or_heal(ctx.caster, subject, amount, ctx.damage_type, false);
        value
    }
}

/// Full attack pipeline for `multiplier × attack damage`, including the crit
/// roll and every interception hook of both characters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackEffect {
    pub multiplier: f32,
    pub affects_caster: bool,
}

impl AttackEffect {
    pub fn new(multiplier: f32, affects_caster: bool) -> Self {
        Self {
            multiplier,
            affects_caster,
        }
    }

    pub fn apply(&self, ctx: &mut EffectContext<'_>, value: f32) -> f32 {
        let subject = ctx.subject(self.affects_caster);
        ctx.engine
            .attack_target(ctx.caster, subject, self.multiplier, ctx.damage_type);
        value
    }
}
