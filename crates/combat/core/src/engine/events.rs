//! Combat events recorded by the engine and drained by the host.

use crate::character::CharacterId;
use crate::effect::DamageType;

/// Something the host may want to react to (floating numbers, sounds, loot).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// Health changed through the damage pipeline.
    HealthChanged {
        character: CharacterId,
        source: CharacterId,
        damage_type: DamageType,
        /// Positive for damage, negative for healing, after every hook.
        amount: f32,
        before: f32,
        after: f32,
    },

    /// An attack rolled a critical strike.
    CriticalHit {
        attacker: CharacterId,
        target: CharacterId,
        damage: f32,
    },

    Died {
        character: CharacterId,
        killer: CharacterId,
    },

    LevelUp {
        character: CharacterId,
        level: u32,
    },

    /// A buff ran its last cycle and was dropped.
    BuffExpired {
        source: CharacterId,
        target: CharacterId,
    },
}
