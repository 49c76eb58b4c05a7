//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`ActionError`, `SessionError`) live next to the
//! operations that produce them. This module only holds the shared
//! classification used by hosts to decide how to react to a rejection.

use crate::combatant::CombatantRef;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can pick another action or target and retry
/// - **Validation**: the request itself is malformed for the current state
/// - **Internal**: an engine invariant was violated
/// - **Fatal**: the encounter cannot be constructed or continued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Choose again: dead target, not enough MP, empty item stack.
    Recoverable,

    /// Invalid input: unknown combatant, wrong turn, illegal action for actor.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// Encounter cannot be built: unknown enemy group or template.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or fatal setup problem.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Combatant that triggered the error (if applicable).
    pub actor: Option<CombatantRef>,

    /// Action sequence number of the session when the error occurred.
    pub sequence: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context at the given sequence number.
    #[must_use]
    pub const fn new(sequence: u64) -> Self {
        Self {
            actor: None,
            sequence,
            message: None,
        }
    }

    /// Attaches an actor to this context (builder pattern).
    #[must_use]
    pub fn with_actor(mut self, actor: CombatantRef) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
