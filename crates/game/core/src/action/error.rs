//! Action rejection errors.

use crate::combatant::{CombatantKind, CombatantRef};
use crate::error::{ErrorSeverity, GameError};

use super::ActionType;

/// Reasons an action is rejected. A rejected action mutates nothing and
/// appends no event; the caller must choose again.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("actor {0} is not part of this encounter")]
    ActorNotFound(CombatantRef),

    #[error("actor {0} is down")]
    ActorDead(CombatantRef),

    #[error("target {0} is not part of this encounter")]
    TargetNotFound(CombatantRef),

    #[error("target {0} is down")]
    TargetDead(CombatantRef),

    #[error("{actor} cannot {action:?} {target}")]
    InvalidTarget {
        actor: CombatantRef,
        target: CombatantRef,
        action: ActionType,
    },

    #[error("{kind:?} combatants cannot use {action:?}")]
    ActionNotAllowed {
        kind: CombatantKind,
        action: ActionType,
    },

    #[error("{0:?} requires an item or spell id")]
    MissingCatalogId(ActionType),

    #[error("not enough MP: {required} required, {available} available")]
    InsufficientMp { required: u32, available: u32 },

    #[error("no '{0}' left in the inventory")]
    ItemDepleted(String),

    #[error("no effect of '{0}' applies to {1}")]
    NoEligibleEffect(String, CombatantRef),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            ActorNotFound(_) | TargetNotFound(_) | MissingCatalogId(_) => ErrorSeverity::Validation,
            ActorDead(_) => ErrorSeverity::Internal,
            ActionNotAllowed { .. } => ErrorSeverity::Validation,
            TargetDead(_) | InvalidTarget { .. } => ErrorSeverity::Recoverable,
            InsufficientMp { .. } | ItemDepleted(_) | NoEligibleEffect(..) => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            ActorDead(_) => "ACTION_ACTOR_DEAD",
            TargetNotFound(_) => "ACTION_TARGET_NOT_FOUND",
            TargetDead(_) => "ACTION_TARGET_DEAD",
            InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            ActionNotAllowed { .. } => "ACTION_NOT_ALLOWED",
            MissingCatalogId(_) => "ACTION_MISSING_CATALOG_ID",
            InsufficientMp { .. } => "ACTION_INSUFFICIENT_MP",
            ItemDepleted(_) => "ACTION_ITEM_DEPLETED",
            NoEligibleEffect(..) => "ACTION_NO_ELIGIBLE_EFFECT",
        }
    }
}
