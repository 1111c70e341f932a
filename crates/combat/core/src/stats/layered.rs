//! Layered stats - effective statistics derived from a base snapshot and the
//! set of active modifiers.
//!
//! # Calculation order
//!
//! ```text
//! effective = ((base + Σ additive) × (1 + Σ multiplicative≥0)) ÷ (1 + Σ (1/m − 1) for m < 0)
//! ```
//!
//! Each layer is only applied when at least one modifier feeds it. The snapshot
//! is always rebuilt from the base stats; nothing is patched incrementally, so
//! adding and removing the same modifier restores the exact previous values.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use tracing::trace;

use super::modifier::StatModifier;
use super::resources::{Resource, ResourceKind};
use super::statistic::{CharacterStats, Statistic};

/// Per-statistic accumulators for one recompute pass.
#[derive(Clone, Copy, Debug, Default)]
struct StatLayers {
    flat: Option<f32>,
    multiplier: Option<f32>,
    divisor: Option<f32>,
}

impl StatLayers {
    fn accumulate(slot: &mut Option<f32>, amount: f32) {
        *slot = Some(slot.unwrap_or(0.0) + amount);
    }

    fn push(&mut self, modifier: &StatModifier) {
        if !modifier.is_multiplicative {
            Self::accumulate(&mut self.flat, modifier.amount);
        } else if modifier.amount >= 0.0 {
            Self::accumulate(&mut self.multiplier, modifier.amount);
        } else {
            Self::accumulate(&mut self.divisor, divisor_contribution(modifier.amount));
        }
    }

    fn apply(&self, value: f32) -> f32 {
        let mut value = value;
        if let Some(flat) = self.flat {
            value += flat;
        }
        if let Some(multiplier) = self.multiplier {
            value *= 1.0 + multiplier;
        }
        if let Some(divisor) = self.divisor {
            value /= 1.0 + divisor;
        }
        value
    }
}

/// Divisor contribution `1/amount - 1` of a negative multiplicative modifier.
///
/// A zero amount never reaches this branch (zero is routed to the multiplier
/// layer), but should one arrive it is read as `-ε` rather than producing an
/// infinite contribution.
fn divisor_contribution(amount: f32) -> f32 {
    let amount = if amount == 0.0 { -f32::EPSILON } else { amount };
    1.0 / amount - 1.0
}

/// Effective statistics of a character plus its health and secondary gauges.
#[derive(Debug)]
pub struct LayeredStats {
    base: CharacterStats,
    current: CharacterStats,
    modifiers: Vec<StatModifier>,
    health: Resource,
    secondary: Resource,
}

impl LayeredStats {
    /// Create layered stats with both gauges full.
    pub fn new(base: CharacterStats) -> Self {
        let health = Resource::full(ResourceKind::Health, base.max_hp);
        let secondary = Resource::full(base.secondary_kind, base.max_secondary);
        Self {
            current: base.clone(),
            base,
            modifiers: Vec::new(),
            health,
            secondary,
        }
    }

    /// Effective value of a statistic.
    pub fn get(&self, stat: Statistic) -> f32 {
        self.current.get(stat)
    }

    /// Base value of a statistic.
    pub fn base(&self, stat: Statistic) -> f32 {
        self.base.get(stat)
    }

    /// Effective snapshot.
    pub fn current(&self) -> &CharacterStats {
        &self.current
    }

    pub fn base_stats(&self) -> &CharacterStats {
        &self.base
    }

    /// Replace the base snapshot (e.g. level scaling) and recompute.
    pub fn set_base(&mut self, base: CharacterStats) {
        self.base = base;
        self.recompute();
    }

    pub fn modifiers(&self) -> &[StatModifier] {
        &self.modifiers
    }

    /// Number of active modifiers equal to `modifier`.
    pub fn count(&self, modifier: &StatModifier) -> usize {
        self.modifiers.iter().filter(|m| *m == modifier).count()
    }

    pub fn health(&self) -> &Resource {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut Resource {
        &mut self.health
    }

    pub fn secondary(&self) -> &Resource {
        &self.secondary
    }

    pub fn secondary_mut(&mut self) -> &mut Resource {
        &mut self.secondary
    }

    /// Reset the live snapshot to the base stats.
    pub fn rebase(&mut self) {
        self.current.clone_from(&self.base);
    }

    /// Insert a modifier unless it is non-stackable and an equal non-stackable
    /// instance is already active. Stackable instances (attribute bonuses, for
    /// one) never block an insertion.
    ///
    /// Returns whether the modifier was inserted.
    pub fn add_modifier(&mut self, modifier: StatModifier) -> bool {
        if !modifier.stackable
            && self
                .modifiers
                .iter()
                .any(|m| !m.stackable && *m == modifier)
        {
            return false;
        }
        self.modifiers.push(modifier);
        self.recompute();
        true
    }

    /// Index of the instance `modifier` refers to: an equal one with the same
    /// `stackable` flag if any, otherwise any equal one.
    fn position(&self, modifier: &StatModifier) -> Option<usize> {
        self.modifiers
            .iter()
            .position(|m| m == modifier && m.stackable == modifier.stackable)
            .or_else(|| self.modifiers.iter().position(|m| m == modifier))
    }

    /// Remove one modifier equal to `modifier`. Returns whether one was found.
    pub fn remove_modifier(&mut self, modifier: &StatModifier) -> bool {
        let Some(index) = self.position(modifier) else {
            return false;
        };
        self.modifiers.remove(index);
        self.recompute();
        true
    }

    /// Swap one instance of `old` for `new` with a single recompute.
    ///
    /// When `old` is not active, `new` is inserted through the usual
    /// deduplication rule.
    pub fn replace_modifier(&mut self, old: &StatModifier, new: StatModifier) {
        match self.position(old) {
            Some(index) => {
                self.modifiers[index] = new;
                self.recompute();
            }
            None => {
                self.add_modifier(new);
            }
        }
    }

    /// Rebuild the effective snapshot from the base stats and every active
    /// modifier, then push the new maxima into the gauges.
    pub fn recompute(&mut self) {
        self.rebase();

        let mut layers: BTreeMap<Statistic, StatLayers> = BTreeMap::new();
        for modifier in &self.modifiers {
            layers.entry(modifier.statistic).or_default().push(modifier);
        }

        for stat in Statistic::iter() {
            if let Some(layer) = layers.get(&stat) {
                let value = self.current.get_mut(stat);
                *value = layer.apply(*value);
            }
        }

        self.health.set_max(self.current.max_hp);
        self.secondary.set_max(self.current.max_secondary);

        trace!(
            character = %self.current.name,
            modifiers = self.modifiers.len(),
            max_hp = self.current.max_hp,
            "stats recomputed"
        );
    }
}
