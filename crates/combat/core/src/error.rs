//! Common error infrastructure for combat-core.
//!
//! Combat resolution itself never fails: missing casters, unknown targets and
//! absent start/end effects are silent pass-throughs. The only errors in the
//! crate are configuration errors raised when an effect tree is built, and
//! they are defined next to the builder that raises them
//! ([`crate::effect::EffectConfigError`]).

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Only configuration errors exist today, so validation is the only level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: an effect description whose fields contradict each other.
    Validation,
}

/// Common trait for all combat-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
