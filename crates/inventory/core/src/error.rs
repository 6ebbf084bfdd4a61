//! Common error infrastructure for inventory-core.
//!
//! Domain-specific errors (`ActionError`, `RecipeError`, `TransactionError`,
//! `RequestError`) live next to the code that raises them. This module holds
//! the classification shared by all of them.
//!
//! Note that a rejected transaction is *not* an error: stale slots, an
//! unbalanced batch or a cancelled hook are ordinary protocol outcomes and are
//! reported through [`crate::TransactionOutcome`].

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Malformed input from the client or a data file; reject and move on.
    ///
    /// Examples: hotbar slot out of range, recipe with too many ingredients
    Validation,

    /// The caller broke an API contract.
    ///
    /// Examples: same action added twice, inventory id that was never registered
    /// These indicate bugs and should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// Common trait for all inventory-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who is at fault, not by impact
/// - Error codes are stable strings suitable for metrics
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
