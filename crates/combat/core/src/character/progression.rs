//! Experience and levels.

use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::stats::{Resource, ResourceKind};

/// Experience gauge plus current level.
#[derive(Debug)]
pub struct Progression {
    experience: Resource,
    level: u32,
    growth: f32,
}

impl Progression {
    /// Level 1 with an empty gauge of `initial_max`. Every level-up multiplies
    /// the maximum by `growth`, which must be finite and above 1; anything else
    /// falls back to [`EngineConfig::DEFAULT_EXPERIENCE_GROWTH`].
    pub fn new(initial_max: f32, growth: f32) -> Self {
        let growth = if growth.is_finite() && growth > 1.0 {
            growth
        } else {
            warn!(growth, "experience growth must exceed 1, using the default");
            EngineConfig::DEFAULT_EXPERIENCE_GROWTH
        };
        Self {
            experience: Resource::new(ResourceKind::Xp, 0.0, initial_max),
            level: 1,
            growth,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> &Resource {
        &self.experience
    }

    pub fn experience_mut(&mut self) -> &mut Resource {
        &mut self.experience
    }

    /// Add experience and return the number of levels gained.
    ///
    /// Positive gains are scaled by `multiplier` (the character's experience
    /// value statistic); overflow past the maximum carries into the next
    /// level, possibly several times. Non-positive amounts are applied
    /// unscaled and never lose a level.
    pub fn gain(&mut self, amount: f32, multiplier: f32) -> u32 {
        if amount <= 0.0 {
            self.experience.set_value(self.experience.value() + amount);
            return 0;
        }

        let scaled = amount * multiplier;
        if !scaled.is_finite() {
            warn!(amount, multiplier, "non-finite experience gain ignored");
            return 0;
        }

        let mut total = self.experience.value() + scaled;
        let mut max = self.experience.max();
        let mut gained = 0;
        while max > 0.0 && total >= max {
            total -= max;
            max *= self.growth;
            gained += 1;
        }

        if gained > 0 {
            self.level += gained;
            info!(level = self.level, next = max, "level up");
        }

        // Rebuilt rather than `set_max`, which would carry the raised delta.
        let display = self.experience.unbind_display();
        self.experience = Resource::new(ResourceKind::Xp, total, max);
        if let Some(display) = display {
            self.experience.bind_display(display);
        }
        gained
    }
}
