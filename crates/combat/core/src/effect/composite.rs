//! Composite effects: sequences and condition-guarded effects.

use super::condition::Condition;
use super::context::EffectContext;
use super::kinds::Effect;

/// Invokes each child in order with the same input and returns the input
/// unchanged. Child results are discarded.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallEffect {
    pub effects: Vec<Effect>,
}

impl CallEffect {
    pub fn new(effects: Vec<Effect>) -> Self {
        Self { effects }
    }

    pub fn apply(&self, ctx: &mut EffectContext<'_>, value: f32) -> f32 {
        for effect in &self.effects {
            effect.apply(ctx, value);
        }
        value
    }
}

/// Runs the wrapped effect only when the condition holds for the value in
/// transit; otherwise the value passes through untouched.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalEffect {
    pub effect: Box<Effect>,
    pub condition: Condition,
}

impl ConditionalEffect {
    pub fn new(effect: Effect, condition: Condition) -> Self {
        Self {
            effect: Box::new(effect),
            condition,
        }
    }

    pub fn apply(&self, ctx: &mut EffectContext<'_>, value: f32) -> f32 {
        if self.condition.check(ctx, value) {
            self.effect.apply(ctx, value)
        } else {
            value
        }
    }
}
