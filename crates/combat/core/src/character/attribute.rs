//! Attributes - integer character traits that scale stat modifiers and drive
//! passive effects.
//!
//! The mapping from attribute to modifiers and passive is a fixed balance
//! table. Each owned modifier keeps a per-point scale and is rescaled to
//! `scale * value` whenever the value changes.

use std::sync::Arc;

use tracing::debug;

use crate::config::EngineConfig;
use crate::effect::{
    CharacterCondition, Condition, DamageOrHealEffect, Effect, ModifySecondaryEffect,
};
use crate::stats::{ResourceKind, StatModifier, Statistic};

use super::Character;
use super::intercept::Intercept;

/// Attribute identifiers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttributeName {
    Attack,
    Defense,
    Agility,
    Intelligence,
    Constitution,
    Luck,
    Lifesteal,
    Replenishment,
    Healing,
    Retribution,
    Movement,
    Bleed,
    Weaken,
    Slaying,
    Massacre,
}

impl AttributeName {
    /// Attributes every character class distributes points into.
    pub const PRIMARY: [AttributeName; 6] = [
        Self::Attack,
        Self::Defense,
        Self::Constitution,
        Self::Agility,
        Self::Intelligence,
        Self::Luck,
    ];

    pub fn is_primary(self) -> bool {
        Self::PRIMARY.contains(&self)
    }

    /// Statistics scaled by this attribute for a character whose secondary
    /// resource is `secondary`. Every entry is multiplicative at
    /// [`EngineConfig::ATTRIBUTE_SCALE`] per point.
    pub fn scaled_statistics(self, secondary: ResourceKind) -> Vec<Statistic> {
        let mut stats = match self {
            Self::Attack => vec![Statistic::AttackDamage],
            Self::Defense => vec![Statistic::MagicDefense, Statistic::MeleeDefense],
            Self::Agility => vec![Statistic::AttackSpeed],
            Self::Intelligence => vec![Statistic::ExperienceValue],
            Self::Constitution => vec![Statistic::MaxHp],
            Self::Luck => vec![Statistic::Luck],
            Self::Movement => vec![Statistic::MovementSpeed],
            _ => Vec::new(),
        };
        let extra = match (self, secondary) {
            (Self::Attack, ResourceKind::Energy)
            | (Self::Intelligence, ResourceKind::Mana)
            | (Self::Constitution, ResourceKind::Focus) => Some(Statistic::MaxSecondary),
            (Self::Luck, ResourceKind::Focus) => Some(Statistic::CritChance),
            _ => None,
        };
        stats.extend(extra);
        stats
    }

    /// Passive effect granted at `value` points, and where it hooks in.
    pub fn passive(self, value: i32) -> Option<(Effect, Intercept)> {
        let fraction = value as f32 * EngineConfig::ATTRIBUTE_SCALE;
        match self {
            // Heal the attacker for a share of the damage dealt.
            Self::Lifesteal => Some((
                Effect::DamageOrHeal(DamageOrHealEffect::new(-fraction, true).proportional()),
                Intercept::DealDamage,
            )),
            Self::Replenishment => Some((
                Effect::ModifySecondary(ModifySecondaryEffect::new(-fraction, true).proportional()),
                Intercept::DealDamage,
            )),
            Self::Healing => Some((Effect::Multiply(1.0 + fraction), Intercept::CauseHealing)),
            // Runs on the receiver, whose effect target is the attacker.
            Self::Retribution => Some((
                Effect::DamageOrHeal(DamageOrHealEffect::new(fraction, false).proportional()),
                Intercept::ReceiveDamage,
            )),
            Self::Bleed | Self::Weaken | Self::Slaying => {
                let boost = 1.0 + value as f32 * EngineConfig::EXECUTION_SCALE;
                Some((
                    Effect::Multiply(boost).when(Condition::Character(CharacterCondition::Any)),
                    Intercept::DealDamage,
                ))
            }
            _ => None,
        }
    }
}

/// Stat modifier owned by an attribute, with its per-point scale.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ScaledModifier {
    modifier: StatModifier,
    per_point: f32,
}

/// A live attribute attached to its owner.
#[derive(Clone, Debug)]
pub struct Attribute {
    name: AttributeName,
    value: i32,
    modifiers: Vec<ScaledModifier>,
    passive: Option<(Arc<Effect>, Intercept)>,
}

impl Attribute {
    /// Build the attribute for `owner` and attach its modifiers and passive.
    pub fn attach(name: AttributeName, value: i32, owner: &mut Character) -> Self {
        let per_point = EngineConfig::ATTRIBUTE_SCALE;
        let secondary = owner.stats().base_stats().secondary_kind;
        let modifiers: Vec<ScaledModifier> = name
            .scaled_statistics(secondary)
            .into_iter()
            .map(|stat| ScaledModifier {
                modifier: StatModifier::multiplicative(stat, per_point * value as f32).stackable(),
                per_point,
            })
            .collect();

        for scaled in &modifiers {
            owner.stats_mut().add_modifier(scaled.modifier);
        }

        let passive = name
            .passive(value)
            .map(|(effect, intercept)| (Arc::new(effect), intercept));
        if let Some((effect, intercept)) = &passive {
            owner.intercepts_mut().register(*intercept, Arc::clone(effect));
        }

        debug!(owner = %owner.id(), attribute = %name, value, "attribute attached");
        Self {
            name,
            value,
            modifiers,
            passive,
        }
    }

    pub fn name(&self) -> AttributeName {
        self.name
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn is_primary(&self) -> bool {
        self.name.is_primary()
    }

    /// Currently applied modifiers.
    pub fn modifiers(&self) -> impl Iterator<Item = &StatModifier> {
        self.modifiers.iter().map(|scaled| &scaled.modifier)
    }

    pub fn passive(&self) -> Option<(&Arc<Effect>, Intercept)> {
        self.passive.as_ref().map(|(effect, intercept)| (effect, *intercept))
    }

    /// Change the value, rescaling every modifier (one recompute each) and
    /// regenerating the passive at the same hook.
    pub fn set_value(&mut self, owner: &mut Character, value: i32) {
        self.value = value;

        for scaled in &mut self.modifiers {
            let rescaled = scaled.modifier.with_amount(scaled.per_point * value as f32);
            owner.stats_mut().replace_modifier(&scaled.modifier, rescaled);
            scaled.modifier = rescaled;
        }

        if let Some((old, intercept)) = self.passive.take() {
            owner.intercepts_mut().unregister(intercept, &old);
            if let Some((effect, _)) = self.name.passive(value) {
                let effect = Arc::new(effect);
                owner.intercepts_mut().register(intercept, Arc::clone(&effect));
                self.passive = Some((effect, intercept));
            }
        }

        debug!(owner = %owner.id(), attribute = %self.name, value, "attribute rescaled");
    }

    /// Remove every modifier and the passive from the owner.
    pub fn detach(&self, owner: &mut Character) {
        for scaled in &self.modifiers {
            owner.stats_mut().remove_modifier(&scaled.modifier);
        }
        if let Some((effect, intercept)) = &self.passive {
            owner.intercepts_mut().unregister(*intercept, effect);
        }
    }
}
