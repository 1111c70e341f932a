//! Stat modifiers - the value objects fed into [`super::LayeredStats`].

use core::hash::{Hash, Hasher};

use super::statistic::Statistic;

/// An additive or multiplicative adjustment to one statistic.
///
/// Identity is `(statistic, amount, is_multiplicative)`. `stackable` is not
/// part of identity: a non-stackable modifier is refused only while an equal
/// non-stackable one is active, and removals prefer an instance whose flag
/// matches.
///
/// Amounts compare by bit pattern (with `-0.0` folded into `0.0`) so that
/// equality stays reflexive and agrees with `Hash`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub statistic: Statistic,
    pub amount: f32,
    pub is_multiplicative: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
}

impl StatModifier {
    pub const fn new(statistic: Statistic, amount: f32, is_multiplicative: bool) -> Self {
        Self {
            statistic,
            amount,
            is_multiplicative,
            stackable: false,
        }
    }

    /// `stat + amount`.
    pub const fn additive(statistic: Statistic, amount: f32) -> Self {
        Self::new(statistic, amount, false)
    }

    /// `stat * (1 + amount)` for `amount >= 0`, divisor contribution otherwise.
    pub const fn multiplicative(statistic: Statistic, amount: f32) -> Self {
        Self::new(statistic, amount, true)
    }

    /// Builder: allow duplicates of this modifier to stack.
    pub const fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    /// Copy of this modifier with a different amount.
    pub const fn with_amount(mut self, amount: f32) -> Self {
        self.amount = amount;
        self
    }

    fn amount_key(&self) -> u32 {
        if self.amount == 0.0 {
            0
        } else {
            self.amount.to_bits()
        }
    }
}

impl PartialEq for StatModifier {
    fn eq(&self, other: &Self) -> bool {
        self.statistic == other.statistic
            && self.amount_key() == other.amount_key()
            && self.is_multiplicative == other.is_multiplicative
    }
}

impl Eq for StatModifier {}

impl Hash for StatModifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.statistic.hash(state);
        self.amount_key().hash(state);
        self.is_multiplicative.hash(state);
    }
}
