//! Effect system - composable value transforms with side effects.
//!
//! Every effect maps `(caster, target, damage type, value)` to a new value.
//! Primitive kinds either transform the value (`Increase`, `Multiply`) or
//! pass it through while acting on the engine (damage, healing, secondary
//! resource, stat modifiers). Composites sequence, guard and time-box other
//! effects.
//!
//! # Architecture
//!
//! Enum + struct hybrid:
//! - each non-trivial kind is a struct in its own file with an `apply` method
//! - [`Effect`] wraps them and dispatches with a static `match`
//! - effect trees are immutable and shared (`Arc<Effect>`) by every
//!   invocation; live per-invocation state only exists in [`ActiveBuff`]

mod composite;
mod condition;
mod context;
mod damage;
mod description;
mod kinds;
mod modifier;
mod resource;
mod timed;

pub use composite::{CallEffect, ConditionalEffect};
pub use condition::{
    CharacterCondition, Combination, CombinedCondition, ComparedValue, Comparison, Condition,
    TypeCondition, ValueCondition,
};
pub use context::EffectContext;
pub use damage::{AttackEffect, DamageOrHealEffect, DamageType};
pub use description::{EffectConfigError, EffectDescription, EffectType};
pub use kinds::Effect;
pub use modifier::StatModifierEffect;
pub use resource::ModifySecondaryEffect;
pub use timed::{ActiveBuff, BuffPhase, TimedEffect};
