//! Stat-modifier effects.

use crate::stats::StatModifier;

use super::context::EffectContext;

/// Attach or detach one [`StatModifier`] on the caster or the target.
///
/// Used both for [`super::Effect::ApplyStatModifier`] and
/// [`super::Effect::RemoveStatModifier`]; the variant decides the direction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifierEffect {
    pub modifier: StatModifier,
    pub affects_caster: bool,
}

impl StatModifierEffect {
    pub fn new(modifier: StatModifier, affects_caster: bool) -> Self {
        Self {
            modifier,
            affects_caster,
        }
    }

    pub fn attach(&self, ctx: &mut EffectContext<'_>, value: f32) -> f32 {
        let subject = ctx.subject(self.affects_caster);
        ctx.engine.add_modifier(subject, self.modifier);
        value
    }

    pub fn detach(&self, ctx: &mut EffectContext<'_>, value: f32) -> f32 {
        let subject = ctx.subject(self.affects_caster);
        ctx.engine.remove_modifier(subject, &self.modifier);
        value
    }
}
