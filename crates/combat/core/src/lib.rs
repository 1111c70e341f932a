//! Combat effect and stat-modification engine.
//!
//! `combat-core` decides how abilities, buffs, debuffs and passive attributes
//! transform damage, healing and resource values, and keeps each character's
//! derived statistics consistent with its active modifiers. All state lives in
//! [`engine::CombatEngine`]; effects are immutable trees that run against it.
pub mod character;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod stats;

pub use character::{
    Attribute, AttributeName, Character, CharacterId, Intercept, InterceptTable, Progression,
};
pub use config::EngineConfig;
pub use effect::{
    ActiveBuff, CharacterCondition, Combination, CombinedCondition, ComparedValue, Comparison,
    Condition, DamageType, Effect, EffectConfigError, EffectDescription, EffectType, TimedEffect,
    TypeCondition, ValueCondition,
};
pub use engine::{CombatEngine, CombatEvent};
pub use env::{PcgRng, RngOracle, compute_seed};
pub use error::{CombatError, ErrorSeverity};
pub use stats::{
    Alliance, CharacterStats, LayeredStats, Resource, ResourceDisplay, ResourceKind, StatModifier,
    Statistic,
};
