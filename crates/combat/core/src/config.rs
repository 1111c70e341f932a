use crate::effect::DamageType;

/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Seed mixed into every roll made by the engine.
    pub seed: u64,
    /// Experience needed for the first level-up.
    pub initial_experience_max: f32,
    /// Factor applied to the experience maximum on every level-up.
    pub experience_growth: f32,
}

impl EngineConfig {
    // ===== attribute scaling (fixed balance table) =====
    /// Stat modifier amount granted per attribute point (+1%).
    pub const ATTRIBUTE_SCALE: f32 = 0.01;
    /// Damage multiplier granted per point by the execution-style passives
    /// (Bleed, Weaken, Slaying).
    pub const EXECUTION_SCALE: f32 = 0.02;

    // ===== immediate ("None" hook) invocation =====
    /// Damage type used when an effect added at `Intercept::None` fires.
    pub const IMMEDIATE_DAMAGE_TYPE: DamageType = DamageType::Physical;
    /// Value passed when an effect added at `Intercept::None` fires.
    pub const IMMEDIATE_VALUE: f32 = 1.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x5eed;
    pub const DEFAULT_INITIAL_EXPERIENCE_MAX: f32 = 100.0;
    pub const DEFAULT_EXPERIENCE_GROWTH: f32 = 1.2;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            initial_experience_max: Self::DEFAULT_INITIAL_EXPERIENCE_MAX,
            experience_growth: Self::DEFAULT_EXPERIENCE_GROWTH,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
