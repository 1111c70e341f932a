//! Secondary-resource effects.

use super::context::EffectContext;

/// Spend (positive) or restore (negative) the secondary resource, bypassing
/// the Spend/RestoreSecondary hooks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifySecondaryEffect {
    pub amount: f32,
    pub affects_caster: bool,
    /// When set, the applied magnitude is `amount * value`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub proportional: bool,
}

impl ModifySecondaryEffect {
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
            .modify_secondary(subject, ctx.caster, amount, ctx.damage_type, false);
        value
    }
}
