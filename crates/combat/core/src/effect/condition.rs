//! Conditions for conditional effects.
//!
//! Conditions are stateless predicates over `(caster, target, damage type,
//! value)`. They read characters through the effect context but never mutate
//! anything.

use crate::character::Character;
use crate::stats::Alliance;

use super::context::EffectContext;
use super::damage::DamageType;

/// How the sub-results of a [`CombinedCondition`] are folded.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Combination {
    /// AND
    #[default]
    AllTrue,
    /// OR
    AnyTrue,
    /// NAND
    AllFalse,
    /// NOR
    AnyFalse,
}

impl Combination {
    /// Result when no sub-condition flips the outcome.
    const fn initial(self) -> bool {
        matches!(self, Self::AllTrue | Self::AllFalse)
    }

    /// Sub-result that flips the outcome and stops evaluation.
    const fn flips_on(self) -> bool {
        matches!(self, Self::AnyTrue | Self::AllFalse)
    }
}

/// Predicate guarding a [`super::ConditionalEffect`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Value(ValueCondition),
    Type(TypeCondition),
    Character(CharacterCondition),
    Combined(CombinedCondition),
}

impl Condition {
    pub fn check(&self, ctx: &EffectContext<'_>, value: f32) -> bool {
        match self {
            Self::Value(c) => c.check(ctx, value),
            Self::Type(c) => c.check(ctx.damage_type),
            Self::Character(c) => c.check(ctx),
            Self::Combined(c) => c.check(ctx, value),
        }
    }

    pub fn value(quantity: ComparedValue, comparison: Comparison, threshold: f32) -> Self {
        Self::Value(ValueCondition::new(quantity, comparison, threshold))
    }

    pub fn damage_type(damage_type: DamageType, equal_to: bool) -> Self {
        Self::Type(TypeCondition::new(damage_type, equal_to))
    }

    pub fn combined(combination: Combination, conditions: Vec<Condition>) -> Self {
        Self::Combined(CombinedCondition::new(combination, conditions))
    }
}

// ============================================================================
// Combined
// ============================================================================

/// Ordered list of sub-conditions folded with a [`Combination`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedCondition {
    pub combination: Combination,
    pub conditions: Vec<Condition>,
}

impl CombinedCondition {
    pub fn new(combination: Combination, conditions: Vec<Condition>) -> Self {
        Self {
            combination,
            conditions,
        }
    }

    /// Evaluates sub-conditions in order and short-circuits on the first one
    /// whose result equals the combination's flipping value.
    pub fn check(&self, ctx: &EffectContext<'_>, value: f32) -> bool {
        self.fold(|condition| condition.check(ctx, value))
    }

    fn fold(&self, mut eval: impl FnMut(&Condition) -> bool) -> bool {
        let initial = self.combination.initial();
        let flips_on = self.combination.flips_on();
        for condition in &self.conditions {
            if eval(condition) == flips_on {
                return !initial;
            }
        }
        initial
    }
}

// ============================================================================
// Value
// ============================================================================

/// Quantity read by a [`ValueCondition`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ComparedValue {
    /// The value in transit.
    Value,
    CasterHealth,
    CasterPercentHealth,
    CasterSecondary,
    CasterPercentSecondary,
    TargetHealth,
    TargetPercentHealth,
    TargetSecondary,
    TargetPercentSecondary,
}

/// Comparison operator of a [`ValueCondition`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Comparison {
    EqualTo,
    NotEqualTo,
    GreaterThan,
    LessThan,
}

impl Comparison {
    fn holds(self, lhs: f32, rhs: f32) -> bool {
        match self {
            Self::EqualTo => lhs == rhs,
            Self::NotEqualTo => lhs != rhs,
            Self::GreaterThan => lhs > rhs,
            Self::LessThan => lhs < rhs,
        }
    }
}

/// Compares a selected quantity against a constant.
///
/// Percent quantities are fractions in `[0, 1]` of the character's own
/// effective maximum. A quantity read from a character that no longer exists
/// makes the condition false.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueCondition {
    pub quantity: ComparedValue,
    pub comparison: Comparison,
    pub threshold: f32,
}

impl ValueCondition {
    pub fn new(quantity: ComparedValue, comparison: Comparison, threshold: f32) -> Self {
        Self {
            quantity,
            comparison,
            threshold,
        }
    }

    pub fn check(&self, ctx: &EffectContext<'_>, value: f32) -> bool {
        self.read(ctx, value)
            .is_some_and(|lhs| self.comparison.holds(lhs, self.threshold))
    }

    fn read(&self, ctx: &EffectContext<'_>, value: f32) -> Option<f32> {
        let caster = || ctx.engine.character(ctx.caster);
        let target = || ctx.engine.character(ctx.target);
        let quantity = match self.quantity {
            ComparedValue::Value => value,
            ComparedValue::CasterHealth => caster()?.health().value(),
            ComparedValue::CasterPercentHealth => caster()?.health().proportion(),
            ComparedValue::CasterSecondary => caster()?.secondary().value(),
            ComparedValue::CasterPercentSecondary => caster()?.secondary().proportion(),
            ComparedValue::TargetHealth => target()?.health().value(),
            ComparedValue::TargetPercentHealth => target()?.health().proportion(),
            ComparedValue::TargetSecondary => target()?.secondary().value(),
            ComparedValue::TargetPercentSecondary => target()?.secondary().proportion(),
        };
        Some(quantity)
    }
}

// ============================================================================
// Damage type
// ============================================================================

/// Damage-type equality, optionally negated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeCondition {
    pub damage_type: DamageType,
    /// `false` turns the check into "is not this type".
    pub equal_to: bool,
}

impl TypeCondition {
    pub fn new(damage_type: DamageType, equal_to: bool) -> Self {
        Self {
            damage_type,
            equal_to,
        }
    }

    pub fn check(&self, damage_type: DamageType) -> bool {
        (self.damage_type == damage_type) == self.equal_to
    }
}

// ============================================================================
// Character
// ============================================================================

/// Predicate over the target character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterCondition {
    /// Always true.
    #[default]
    Any,
    /// Target belongs to the given alliance.
    TargetAlliance(Alliance),
    /// Target is hostile to the caster.
    Hostile,
}

impl CharacterCondition {
    pub fn check(&self, ctx: &EffectContext<'_>) -> bool {
        let alliance = |id| ctx.engine.character(id).map(Character::alliance);
        match self {
            Self::Any => true,
            Self::TargetAlliance(expected) => alliance(ctx.target) == Some(*expected),
            Self::Hostile => match (alliance(ctx.caster), alliance(ctx.target)) {
                (Some(caster), Some(target)) => caster.is_hostile_to(&target),
                _ => false,
            },
        }
    }
}
