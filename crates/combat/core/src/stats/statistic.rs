//! Statistics and the base stat block of a character.
//!
//! Every numeric statistic is reachable through an explicit, exhaustive match
//! table ([`CharacterStats::get`] / [`CharacterStats::get_mut`]) so the layered
//! stat model can iterate statistics by enumeration without reflection.

use super::resources::ResourceKind;

/// A modifiable numeric statistic.
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
pub enum Statistic {
    MaxHp,
    MaxSecondary,
    AttackDamage,
    AttackSpeed,
    CritChance,
    CritDamage,
    MovementSpeed,
    MeleeDefense,
    MagicDefense,
    Luck,
    ExperienceValue,
}

/// Allegiance of a character.
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
pub enum Alliance {
    Friendly,
    Enemy,
    #[default]
    Neutral,
    /// Never treated as hostile by anyone.
    Immune,
}

impl Alliance {
    /// Two characters are hostile when their alliances differ and neither is
    /// immune.
    pub fn is_hostile_to(&self, other: &Alliance) -> bool {
        self != other && *self != Alliance::Immune && *other != Alliance::Immune
    }
}

/// Base stat block.
///
/// Used both as the immutable base snapshot and as the live effective
/// snapshot inside [`super::LayeredStats`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterStats {
    pub name: String,
    pub alliance: Alliance,
    pub secondary_kind: ResourceKind,

    pub max_hp: f32,
    pub max_secondary: f32,

    pub attack_damage: f32,
    pub attack_speed: f32,

    /// Probability in `[0, 1]` that an attack crits.
    pub crit_chance: f32,
    /// Damage multiplier applied on a critical strike.
    pub crit_damage: f32,

    pub movement_speed: f32,

    /// Physical damage is divided by `1 + melee_defense`.
    pub melee_defense: f32,
    /// Non-physical damage is divided by `1 + magic_defense`.
    pub magic_defense: f32,

    pub luck: f32,
    /// Experience granted to a killer; for players, the multiplier applied
    /// to experience gains.
    pub experience_value: f32,
}

impl CharacterStats {
    pub fn new(name: impl Into<String>, alliance: Alliance, secondary_kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            alliance,
            secondary_kind,
            ..Self::default()
        }
    }

    pub fn get(&self, stat: Statistic) -> f32 {
        match stat {
            Statistic::MaxHp => self.max_hp,
            Statistic::MaxSecondary => self.max_secondary,
            Statistic::AttackDamage => self.attack_damage,
            Statistic::AttackSpeed => self.attack_speed,
            Statistic::CritChance => self.crit_chance,
            Statistic::CritDamage => self.crit_damage,
            Statistic::MovementSpeed => self.movement_speed,
            Statistic::MeleeDefense => self.melee_defense,
            Statistic::MagicDefense => self.magic_defense,
            Statistic::Luck => self.luck,
            Statistic::ExperienceValue => self.experience_value,
        }
    }

    pub fn get_mut(&mut self, stat: Statistic) -> &mut f32 {
        match stat {
            Statistic::MaxHp => &mut self.max_hp,
            Statistic::MaxSecondary => &mut self.max_secondary,
            Statistic::AttackDamage => &mut self.attack_damage,
            Statistic::AttackSpeed => &mut self.attack_speed,
            Statistic::CritChance => &mut self.crit_chance,
            Statistic::CritDamage => &mut self.crit_damage,
            Statistic::MovementSpeed => &mut self.movement_speed,
            Statistic::MeleeDefense => &mut self.melee_defense,
            Statistic::MagicDefense => &mut self.magic_defense,
            Statistic::Luck => &mut self.luck,
            Statistic::ExperienceValue => &mut self.experience_value,
        }
    }

    pub fn set(&mut self, stat: Statistic, value: f32) {
        *self.get_mut(stat) = value;
    }

    // ===== builder helpers =====

    pub fn with(mut self, stat: Statistic, value: f32) -> Self {
        self.set(stat, value);
        self
    }
}

impl Default for CharacterStats {
    /// A neutral 100 HP / 100 secondary character with 10 attack damage,
    /// no crit chance and no defenses.
    fn default() -> Self {
        Self {
            name: String::new(),
            alliance: Alliance::Neutral,
            secondary_kind: ResourceKind::Mana,
            max_hp: 100.0,
            max_secondary: 100.0,
            attack_damage: 10.0,
            attack_speed: 1.0,
            crit_chance: 0.0,
            crit_damage: 2.0,
            movement_speed: 1.0,
            melee_defense: 0.0,
            magic_defense: 0.0,
            luck: 0.0,
            experience_value: 1.0,
        }
    }
}
