//! Errors raised while building a transaction.

use crate::action::ActionId;
use crate::error::{EngineError, ErrorSeverity};
use crate::inventory::InventoryId;

/// Misuse of the transaction API.
///
/// Rejections during `execute` are not errors; see [`super::TransactionOutcome`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    #[error("tried to add {0} to a transaction twice")]
    DuplicateAction(ActionId),

    #[error("{0} is not registered with the inventory store")]
    UnknownInventory(InventoryId),

    #[error("transaction has already executed")]
    AlreadyExecuted,

    #[error("transaction is limited to {limit} actions")]
    TooManyActions { limit: usize },
}

impl EngineError for TransactionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateAction(_) | Self::UnknownInventory(_) | Self::AlreadyExecuted => {
                ErrorSeverity::Internal
            }
            Self::TooManyActions { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateAction(_) => "TRANSACTION_DUPLICATE_ACTION",
            Self::UnknownInventory(_) => "TRANSACTION_UNKNOWN_INVENTORY",
            Self::AlreadyExecuted => "TRANSACTION_ALREADY_EXECUTED",
            Self::TooManyActions { .. } => "TRANSACTION_TOO_MANY_ACTIONS",
        }
    }
}
