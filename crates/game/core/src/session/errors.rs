//! Session construction and driving errors.

use crate::action::ActionError;
use crate::combatant::CombatantRef;
use crate::error::{ErrorContext, ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("enemy group '{0}' is not in the bestiary")]
    UnknownEnemyGroup(String),

    #[error("enemy group '{group}' references unknown template '{template}'")]
    UnknownEnemyTemplate { group: String, template: String },

    #[error("guest '{0}' is not in the bestiary")]
    UnknownGuestTemplate(String),

    #[error("enemy group '{0}' has no members")]
    EmptyEnemyGroup(String),

    #[error("no character is available for combat")]
    NoAvailableCharacters,

    #[error("{0} appears more than once in the encounter")]
    DuplicateCombatant(CombatantRef),

    #[error("combat is over")]
    CombatOver,

    #[error("it is {expected}'s turn, not {actual}'s")]
    NotActiveCombatant {
        expected: CombatantRef,
        actual: CombatantRef,
    },

    #[error("{0} is controlled by the player")]
    NotAiControlled(CombatantRef),

    #[error("{0} is not part of this encounter")]
    UnknownCombatant(CombatantRef),

    #[error("session is mid-resolution and cannot take an action")]
    NotAwaitingAction,

    #[error("{0} has nobody left to target")]
    NoTargetAvailable(CombatantRef),

    #[error("action rejected: {error}")]
    Action {
        #[source]
        error: ActionError,
        context: ErrorContext,
    },
}

impl SessionError {
    pub(crate) fn action(error: ActionError, context: ErrorContext) -> Self {
        Self::Action { error, context }
    }

    /// The underlying action rejection, if any.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            Self::Action { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        use SessionError::*;
        match self {
            UnknownEnemyGroup(_)
            | UnknownEnemyTemplate { .. }
            | UnknownGuestTemplate(_)
            | EmptyEnemyGroup(_)
            | NoAvailableCharacters
            | DuplicateCombatant(_) => ErrorSeverity::Fatal,
            CombatOver | NotActiveCombatant { .. } | NotAiControlled(_) | UnknownCombatant(_) => {
                ErrorSeverity::Validation
            }
            NoTargetAvailable(_) | NotAwaitingAction => ErrorSeverity::Internal,
            Action { error, .. } => error.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Action { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        use SessionError::*;
        match self {
            UnknownEnemyGroup(_) => "SESSION_UNKNOWN_ENEMY_GROUP",
            UnknownEnemyTemplate { .. } => "SESSION_UNKNOWN_ENEMY_TEMPLATE",
            UnknownGuestTemplate(_) => "SESSION_UNKNOWN_GUEST_TEMPLATE",
            EmptyEnemyGroup(_) => "SESSION_EMPTY_ENEMY_GROUP",
            NoAvailableCharacters => "SESSION_NO_AVAILABLE_CHARACTERS",
            DuplicateCombatant(_) => "SESSION_DUPLICATE_COMBATANT",
            CombatOver => "SESSION_COMBAT_OVER",
            NotActiveCombatant { .. } => "SESSION_NOT_ACTIVE_COMBATANT",
            NotAiControlled(_) => "SESSION_NOT_AI_CONTROLLED",
            UnknownCombatant(_) => "SESSION_UNKNOWN_COMBATANT",
            NoTargetAvailable(_) => "SESSION_NO_TARGET_AVAILABLE",
            NotAwaitingAction => "SESSION_NOT_AWAITING_ACTION",
            Action { error, .. } => error.error_code(),
        }
    }
}
