//! Damage, healing and secondary-resource pipelines.
//!
//! ```text
//! attack_target ── crit roll ── [attacker: Attack] ─┐
//!                                                   ▼
//! damage_or_heal ───────── [source: DealDamage | CauseHealing]
//!                                                   ▼
//! receive_damage_or_healing ── defense ── [receiver: ReceiveDamage | ReceiveHealing]
//!                                                   ▼
//!                                    health -= amount ── ≤ 0 ─▶ die
//! ```
//!
//! Hooks fold the running value through every registered effect in order.
//! With `modified == false` no hook runs and defenses are skipped.

use tracing::{debug, info, trace};

use crate::character::{CharacterId, Intercept};
use crate::config::EngineConfig;
use crate::effect::DamageType;
use crate::env::rng::context;
use crate::stats::Statistic;

use super::{CombatEngine, CombatEvent};

impl CombatEngine {
    /// Fold `value` through every effect registered at `intercept` on `owner`.
    ///
    /// The effect list is snapshotted first, so effects may register or
    /// unregister effects while the hook runs; changes apply from the next
    /// invocation.
    fn run_hook(
        &mut self,
        owner: CharacterId,
        intercept: Intercept,
        other: CharacterId,
        damage_type: DamageType,
        value: f32,
    ) -> f32 {
        let Some(effects) = self
            .characters
            .get(&owner)
            .map(|c| c.intercepts().snapshot(intercept))
        else {
            return value;
        };

        let result = effects.iter().fold(value, |value, effect| {
            effect.call(self, Some(owner), other, damage_type, value)
        });
        if !effects.is_empty() {
            trace!(%owner, %intercept, before = value, after = result, "hook ran");
        }
        result
    }

    /// Attack `target` for `multiplier × attack damage`.
    ///
    /// Rolls for a critical strike, runs the attacker's Attack hook, then
    /// continues through [`Self::damage_or_heal`] with hooks enabled.
    pub fn attack_target(
        &mut self,
        attacker: CharacterId,
        target: CharacterId,
        multiplier: f32,
        damage_type: DamageType,
    ) {
        let Some((attack, crit_chance, crit_damage)) = self.character(attacker).map(|c| {
            (
                c.stat(Statistic::AttackDamage),
                c.stat(Statistic::CritChance),
                c.stat(Statistic::CritDamage),
            )
        }) else {
            return;
        };

        let mut damage = multiplier * attack;
        if self.roll_unit(attacker, context::CRIT) < crit_chance {
            damage *= crit_damage;
            self.record(CombatEvent::CriticalHit {
                attacker,
                target,
                damage,
            });
        }

        debug!(%attacker, %target, %damage_type, damage, "attack");
        let damage = self.run_hook(attacker, Intercept::Attack, target, damage_type, damage);
        self.damage_or_heal(attacker, target, damage, damage_type, true);
    }

    /// Deal `amount` to `target` (negative heals).
    ///
    /// With `modified`, the source's DealDamage or CauseHealing hook runs
    /// first, selected by the sign of `amount`.
    pub fn damage_or_heal(
        &mut self,
        source: CharacterId,
        target: CharacterId,
        amount: f32,
        damage_type: DamageType,
        modified: bool,
    ) {
        let amount = if modified {
            self.run_hook(source, Intercept::dealt(amount), target, damage_type, amount)
        } else {
            amount
        };
        self.receive_damage_or_healing(target, source, amount, damage_type, modified);
    }

    /// Apply `amount` to the receiver's health.
    ///
    /// With `modified`, positive amounts are first divided by `1 + defense`
    /// (melee defense for physical damage, magic defense otherwise), then the
    /// receiver's ReceiveDamage or ReceiveHealing hook runs with the receiver
    /// as caster and the source as target.
    pub fn receive_damage_or_healing(
        &mut self,
        receiver: CharacterId,
        source: CharacterId,
        amount: f32,
        damage_type: DamageType,
        modified: bool,
    ) {
        let Some(character) = self.character(receiver) else {
            return;
        };

        let mut amount = amount;
        if modified {
            if amount > 0.0 {
                let defense = if damage_type.is_physical() {
                    Statistic::MeleeDefense
                } else {
                    Statistic::MagicDefense
                };
                amount /= 1.0 + character.stat(defense);
            }
            amount = self.run_hook(receiver, Intercept::received(amount), source, damage_type, amount);
        }

        let Some(character) = self.characters.get_mut(&receiver) else {
            return;
        };
        let health = character.stats_mut().health_mut();
        let before = health.value();
        health.set_value(before - amount);
        let after = health.value();

        trace!(%receiver, %source, amount, before, after, "health changed");
        self.record(CombatEvent::HealthChanged {
            character: receiver,
            source,
            damage_type,
            amount,
            before,
            after,
        });

        if after <= 0.0 {
            self.kill(receiver, source, damage_type);
        }
    }

    /// Spend (positive) or restore (negative) the owner's secondary resource.
    ///
    /// With `modified`, the owner's SpendSecondary or RestoreSecondary hook
    /// runs first, with the owner as caster and `source` as target.
    pub fn modify_secondary(
        &mut self,
        owner: CharacterId,
        source: CharacterId,
        amount: f32,
        damage_type: DamageType,
        modified: bool,
    ) {
        let amount = if modified {
            self.run_hook(owner, Intercept::secondary(amount), source, damage_type, amount)
        } else {
            amount
        };

        if let Some(character) = self.characters.get_mut(&owner) {
            let secondary = character.stats_mut().secondary_mut();
            secondary.set_value(secondary.value() - amount);
            trace!(%owner, amount, value = secondary.value(), "secondary changed");
        }
    }

    /// Kill `victim`, crediting `killer`. Only the first call has any effect.
    pub fn die(&mut self, victim: CharacterId, killer: CharacterId) {
        self.kill(victim, killer, EngineConfig::IMMEDIATE_DAMAGE_TYPE);
    }

    /// Mark dead, run the victim's Die hook and the killer's KillTarget hook,
    /// then award the victim's experience value to the killer.
    fn kill(&mut self, victim: CharacterId, killer: CharacterId, damage_type: DamageType) {
        let Some(character) = self.characters.get_mut(&victim) else {
            return;
        };
        if !character.mark_dead() {
            return;
        }
        let reward = character.stat(Statistic::ExperienceValue);

        info!(%victim, %killer, reward, "character died");
        self.record(CombatEvent::Died {
            character: victim,
            killer,
        });

        self.run_hook(victim, Intercept::Die, killer, damage_type, reward);
        if killer != victim {
            let reward = self.run_hook(killer, Intercept::KillTarget, victim, damage_type, reward);
            self.gain_experience(killer, reward);
        }
    }
}
