//! Effect descriptions - designer-facing configuration compiled into effect
//! trees.
//!
//! A description is built with consuming setters and compiled once by
//! [`EffectDescription::get_effect`]; later calls return the cached tree.
//! Contradictory configurations are rejected at build time.

use std::cell::OnceCell;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{CombatError, ErrorSeverity};
use crate::stats::StatModifier;

use super::condition::{Combination, Condition};
use super::kinds::Effect;

/// Primitive effect selected by a description.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectType {
    Increase,
    Multiply,
    DamageOrHeal,
    DamageOrHealUnmodified,
    ModifySecondary,
    ApplyStatModifier,
    RemoveStatModifier,
    CallEffect,
}

impl EffectType {
    pub const fn takes_modifiers(self) -> bool {
        matches!(self, Self::ApplyStatModifier | Self::RemoveStatModifier)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Rejected effect configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectConfigError {
    /// Stat modifiers given to an effect type that ignores them.
    #[error("{effect_type} does not take stat modifiers ({count} given)")]
    UnexpectedModifiers { effect_type: EffectType, count: usize },

    /// Modifier effect type without any modifier.
    #[error("{effect_type} requires at least one stat modifier")]
    MissingModifiers { effect_type: EffectType },

    /// Sequences have no configurable children.
    #[error("call_effect cannot be built from a description")]
    UnsupportedCallEffect,

    #[error("duration must be finite and non-negative, got {0}")]
    InvalidDuration(f32),

    #[error("magnitude must be finite, got {0}")]
    NonFiniteMagnitude(f32),
}

impl CombatError for EffectConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnexpectedModifiers { .. } => "EFFECT_UNEXPECTED_MODIFIERS",
            Self::MissingModifiers { .. } => "EFFECT_MISSING_MODIFIERS",
            Self::UnsupportedCallEffect => "EFFECT_UNSUPPORTED_CALL",
            Self::InvalidDuration(_) => "EFFECT_INVALID_DURATION",
            Self::NonFiniteMagnitude(_) => "EFFECT_NON_FINITE_MAGNITUDE",
        }
    }
}

// ============================================================================
// Description
// ============================================================================

/// Configuration of one effect, as authored for an ability.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDescription {
    effect_type: EffectType,
    #[cfg_attr(feature = "serde", serde(default))]
    affects_caster: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    magnitude: f32,
    /// `0` means instantaneous.
    #[cfg_attr(feature = "serde", serde(default))]
    duration: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    repeats: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    conditions: Vec<Condition>,
    #[cfg_attr(feature = "serde", serde(default))]
    stat_modifiers: Vec<StatModifier>,
    #[cfg_attr(feature = "serde", serde(skip))]
    cache: OnceCell<Arc<Effect>>,
}

impl EffectDescription {
    pub fn new(effect_type: EffectType) -> Self {
        Self {
            effect_type,
            affects_caster: false,
            magnitude: 0.0,
            duration: 0.0,
            repeats: 0,
            conditions: Vec::new(),
            stat_modifiers: Vec::new(),
            cache: OnceCell::new(),
        }
    }

    /// Builder: act on the caster instead of the target.
    pub fn affects_caster(mut self) -> Self {
        self.affects_caster = true;
        self.cache = OnceCell::new();
        self
    }

    pub fn magnitude(mut self, magnitude: f32) -> Self {
        self.magnitude = magnitude;
        self.cache = OnceCell::new();
        self
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self.cache = OnceCell::new();
        self
    }

    pub fn repeats(mut self, repeats: i32) -> Self {
        self.repeats = repeats;
        self.cache = OnceCell::new();
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self.cache = OnceCell::new();
        self
    }

    pub fn modifier(mut self, modifier: StatModifier) -> Self {
        self.stat_modifiers.push(modifier);
        self.cache = OnceCell::new();
        self
    }

    pub fn effect_type(&self) -> EffectType {
        self.effect_type
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn stat_modifiers(&self) -> &[StatModifier] {
        &self.stat_modifiers
    }

    /// Whether the tree has already been built.
    pub fn is_built(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Build the effect tree on first use and return the cached tree after.
    pub fn get_effect(&self) -> Result<Arc<Effect>, EffectConfigError> {
        if let Some(effect) = self.cache.get() {
            return Ok(Arc::clone(effect));
        }

        let effect = Arc::new(self.build().inspect_err(|error| {
            warn!(effect_type = %self.effect_type, %error, "effect description rejected");
        })?);
        debug!(effect_type = %self.effect_type, "effect description built");
        Ok(Arc::clone(self.cache.get_or_init(|| effect)))
    }

    fn validate(&self) -> Result<(), EffectConfigError> {
        if self.effect_type == EffectType::CallEffect {
            return Err(EffectConfigError::UnsupportedCallEffect);
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(EffectConfigError::InvalidDuration(self.duration));
        }
        if !self.magnitude.is_finite() {
            return Err(EffectConfigError::NonFiniteMagnitude(self.magnitude));
        }
        match (self.effect_type.takes_modifiers(), self.stat_modifiers.len()) {
            (true, 0) => Err(EffectConfigError::MissingModifiers {
                effect_type: self.effect_type,
            }),
            (false, count) if count > 0 => Err(EffectConfigError::UnexpectedModifiers {
                effect_type: self.effect_type,
                count,
            }),
            _ => Ok(()),
        }
    }

    fn build(&self) -> Result<Effect, EffectConfigError> {
        self.validate()?;

        let timed = self.duration > 0.0;
        let effect = if self.effect_type == EffectType::ApplyStatModifier && timed {
            // Buff: apply every modifier now, remove them all when it expires.
            Effect::timed(
                self.duration,
                self.repeats,
                Some(self.modifier_sequence(Effect::apply_modifier)),
                Some(self.modifier_sequence(Effect::remove_modifier)),
            )
        } else {
            let primitive = self.primitive();
            if timed {
                Effect::timed(self.duration, self.repeats, None, Some(primitive))
            } else {
                primitive
            }
        };

        Ok(self.guard(effect))
    }

    fn primitive(&self) -> Effect {
        let (k, on_caster) = (self.magnitude, self.affects_caster);
        match self.effect_type {
            EffectType::Increase => Effect::Increase(k),
            EffectType::Multiply => Effect::Multiply(k),
            EffectType::DamageOrHeal => Effect::damage_or_heal(k, on_caster),
            EffectType::DamageOrHealUnmodified => Effect::attack(k, on_caster),
            EffectType::ModifySecondary => Effect::modify_secondary(k, on_caster),
            EffectType::ApplyStatModifier => self.modifier_sequence(Effect::apply_modifier),
            EffectType::RemoveStatModifier => self.modifier_sequence(Effect::remove_modifier),
            // Rejected by `validate`.
            EffectType::CallEffect => Effect::sequence(Vec::new()),
        }
    }

    fn modifier_sequence(&self, make: fn(StatModifier, bool) -> Effect) -> Effect {
        Effect::sequence(
            self.stat_modifiers
                .iter()
                .map(|m| make(*m, self.affects_caster))
                .collect(),
        )
    }

    fn guard(&self, effect: Effect) -> Effect {
        match self.conditions.as_slice() {
            [] => effect,
            [single] => effect.when(single.clone()),
            many => effect.when(Condition::combined(Combination::AllTrue, many.to_vec())),
        }
    }
}
