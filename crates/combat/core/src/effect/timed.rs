//! Timed effects and the live buff instances they spawn.
//!
//! A [`TimedEffect`] is a template. Each invocation fires the start effect and
//! attaches a fresh [`ActiveBuff`] to the target; the buff is ticked by
//! [`crate::CombatEngine::advance`] and fires the end effect when its duration
//! elapses.
//!
//! ```text
//! call ─▶ start ──(duration)──▶ end ─┬─ cycles left > 1 ─▶ start ─▶ …
//!                                    └─ otherwise ─▶ dropped
//! ```

use std::sync::Arc;

use tracing::trace;

use crate::character::CharacterId;
use crate::engine::CombatEngine;

use super::context::EffectContext;
use super::damage::DamageType;
use super::kinds::Effect;

/// Template for a time-boxed pair of effects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffect {
    /// Length of one cycle, in engine time units.
    pub duration: f32,
    /// Extra cycles after the first one. Negative values mean none.
    pub repeats: i32,
    pub start: Option<Arc<Effect>>,
    pub end: Option<Arc<Effect>>,
}

impl TimedEffect {
    pub fn new(duration: f32, repeats: i32, start: Option<Effect>, end: Option<Effect>) -> Self {
        Self {
            duration,
            repeats,
            start: start.map(Arc::new),
            end: end.map(Arc::new),
        }
    }

    /// Total number of start/end cycles a spawned buff runs.
    pub fn cycles(&self) -> u32 {
        1 + self.repeats.max(0).unsigned_abs()
    }

    /// Attach a new buff to the target, then fire the start effect.
    pub fn apply(&self, ctx: &mut EffectContext<'_>, value: f32) -> f32 {
        let buff = ActiveBuff::spawn(self, ctx.caster, ctx.target, ctx.damage_type, value);
        ctx.engine.attach_buff(ctx.target, buff);
        match &self.start {
            Some(start) => start.apply(ctx, value),
            None => value,
        }
    }
}

/// Outcome of one buff tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffPhase {
    Active,
    Expired,
}

/// A live instance of a [`TimedEffect`], owned by its target.
#[derive(Clone, Debug)]
pub struct ActiveBuff {
    source: CharacterId,
    target: CharacterId,
    damage_type: DamageType,
    value: f32,
    duration: f32,
    cycles_left: u32,
    elapsed: f32,
    start: Option<Arc<Effect>>,
    end: Option<Arc<Effect>>,
}

impl ActiveBuff {
    fn spawn(
        template: &TimedEffect,
        source: CharacterId,
        target: CharacterId,
        damage_type: DamageType,
        value: f32,
    ) -> Self {
        Self {
            source,
            target,
            damage_type,
            value,
            duration: template.duration,
            cycles_left: template.cycles(),
            elapsed: 0.0,
            start: template.start.clone(),
            end: template.end.clone(),
        }
    }

    pub fn source(&self) -> CharacterId {
        self.source
    }

    pub fn target(&self) -> CharacterId {
        self.target
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn cycles_left(&self) -> u32 {
        self.cycles_left
    }

    /// Advance the buff clock by `dt`.
    ///
    /// At most one end (and one re-start) fires per tick, however large `dt`
    /// is.
    pub fn tick(&mut self, engine: &mut CombatEngine, dt: f32) -> BuffPhase {
        self.elapsed += dt;
        if self.elapsed < self.duration {
            return BuffPhase::Active;
        }

        self.elapsed = 0.0;
        Self::fire(&self.end, engine, self.source, self.target, self.damage_type, self.value);

        if self.cycles_left > 1 {
            self.cycles_left -= 1;
            trace!(
                source = %self.source,
                target = %self.target,
                cycles_left = self.cycles_left,
                "buff cycle restarted"
            );
            Self::fire(&self.start, engine, self.source, self.target, self.damage_type, self.value);
            BuffPhase::Active
        } else {
            BuffPhase::Expired
        }
    }

    fn fire(
        effect: &Option<Arc<Effect>>,
        engine: &mut CombatEngine,
        source: CharacterId,
        target: CharacterId,
        damage_type: DamageType,
        value: f32,
    ) {
        if let Some(effect) = effect {
            effect.call(engine, Some(source), target, damage_type, value);
        }
    }
}
