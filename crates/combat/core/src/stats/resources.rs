//! Resources - clamped gauges for health, the secondary resource and
//! experience.
//!
//! A resource owns `current` and `max`; `current` is kept in `[0, max]` by
//! every mutator. Maximum values for health and the secondary resource are not
//! set by hand: [`super::LayeredStats`] pushes them after each recompute.

use core::fmt;

/// Enum representing individual resource types.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    Health,
    Mana,
    Energy,
    Focus,
    Xp,
}

/// Sink receiving `current / max` whenever a bound resource changes.
///
/// The engine only ever writes to a display; it never reads one back.
pub trait ResourceDisplay {
    fn update(&self, proportion: f32);
}

/// A clamped numeric gauge.
pub struct Resource {
    kind: ResourceKind,
    current: f32,
    max: f32,
    display: Option<Box<dyn ResourceDisplay>>,
}

impl Resource {
    /// Create a resource. `current` is clamped into `[0, max]`; NaN reads as 0.
    pub fn new(kind: ResourceKind, current: f32, max: f32) -> Self {
        Self {
            kind,
            current: Self::clamped(current, max),
            max,
            display: None,
        }
    }

    // f32::clamp panics on a negative upper bound, and NaN inputs must not
    // leak into the gauge.
    fn clamped(value: f32, max: f32) -> f32 {
        if value.is_nan() {
            0.0
        } else {
            value.max(0.0).min(max.max(0.0))
        }
    }

    /// Create a full resource.
    pub fn full(kind: ResourceKind, max: f32) -> Self {
        Self::new(kind, max, max)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// `current / max`, or `0` for a resource without capacity.
    pub fn proportion(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    /// Assign `current`, clamped into `[0, max]`, and refresh the display.
    pub fn set_value(&mut self, value: f32) {
        self.current = Self::clamped(value, self.max);
        self.notify();
    }

    /// Assign `max`. Raising the maximum also raises `current` by the same
    /// delta; lowering it clamps `current`.
    pub fn set_max(&mut self, max: f32) {
        let previous = self.max;
        self.max = max;
        if max > previous {
            self.set_value(self.current + (max - previous));
        } else {
            self.set_value(self.current);
        }
    }

    /// Attach a display and push the current proportion to it.
    pub fn bind_display(&mut self, display: Box<dyn ResourceDisplay>) {
        display.update(self.proportion());
        self.display = Some(display);
    }

    pub fn unbind_display(&mut self) -> Option<Box<dyn ResourceDisplay>> {
        self.display.take()
    }

    fn notify(&self) {
        if let Some(display) = &self.display {
            display.update(self.proportion());
        }
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &self.kind)
            .field("current", &self.current)
            .field("max", &self.max)
            .field("bound", &self.display.is_some())
            .finish()
    }
}
