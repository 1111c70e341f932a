//! Interception points and the per-character hook table.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::effect::Effect;

/// Named hook point in the damage and resource pipelines.
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
pub enum Intercept {
    /// Not a hook: effects added here run once, immediately.
    None,
    Attack,
    DealDamage,
    CauseHealing,
    ReceiveDamage,
    ReceiveHealing,
    /// Reserved for the ability system.
    CastAbility,
    /// Reserved for the ability system.
    AbilityCooldown,
    RestoreSecondary,
    SpendSecondary,
    KillTarget,
    Die,
}

impl Intercept {
    /// Hook run by the dealer of `amount`.
    pub fn dealt(amount: f32) -> Self {
        if amount >= 0.0 {
            Self::DealDamage
        } else {
            Self::CauseHealing
        }
    }

    /// Hook run by the receiver of `amount`.
    pub fn received(amount: f32) -> Self {
        if amount >= 0.0 {
            Self::ReceiveDamage
        } else {
            Self::ReceiveHealing
        }
    }

    /// Hook run by the owner of a secondary change of `amount`.
    pub fn secondary(amount: f32) -> Self {
        if amount >= 0.0 {
            Self::SpendSecondary
        } else {
            Self::RestoreSecondary
        }
    }
}

/// Ordered lists of effects registered at each hook point.
///
/// Registration order is invocation order. Effects are identified by
/// allocation (`Arc::ptr_eq`), so two structurally equal effects registered
/// separately are removed separately.
#[derive(Clone, Debug, Default)]
pub struct InterceptTable {
    hooks: BTreeMap<Intercept, Vec<Arc<Effect>>>,
}

impl InterceptTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, intercept: Intercept, effect: Arc<Effect>) {
        self.hooks.entry(intercept).or_default().push(effect);
    }

    /// Remove the first registration of this exact effect. Returns whether one
    /// was found.
    pub fn unregister(&mut self, intercept: Intercept, effect: &Arc<Effect>) -> bool {
        let Some(effects) = self.hooks.get_mut(&intercept) else {
            return false;
        };
        let Some(index) = effects.iter().position(|e| Arc::ptr_eq(e, effect)) else {
            return false;
        };
        effects.remove(index);
        if effects.is_empty() {
            self.hooks.remove(&intercept);
        }
        true
    }

    /// Copy of the effect list at a hook, safe to iterate while the table is
    /// mutated.
    pub fn snapshot(&self, intercept: Intercept) -> Vec<Arc<Effect>> {
        self.hooks.get(&intercept).cloned().unwrap_or_default()
    }

    pub fn len(&self, intercept: Intercept) -> usize {
        self.hooks.get(&intercept).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
