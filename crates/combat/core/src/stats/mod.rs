//! Stat system.
//!
//! ```text
//! [ CharacterStats (base) ]
//!      ↓   + StatModifier set
//! [ LayeredStats: flat → multiplier → divisor ]
//!      ↓
//! [ Resources: health.max / secondary.max synchronised ]
//! ```
//!
//! The effective snapshot is never patched: every change to the modifier set
//! rebuilds it from the base stats.

pub mod layered;
pub mod modifier;
pub mod resources;
pub mod statistic;

pub use layered::LayeredStats;
pub use modifier::StatModifier;
pub use resources::{Resource, ResourceDisplay, ResourceKind};
pub use statistic::{Alliance, CharacterStats, Statistic};
