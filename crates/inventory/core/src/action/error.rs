//! Action construction errors.

use crate::error::{EngineError, ErrorSeverity};
use crate::recipe::RecipeId;

/// Malformed arguments passed to an action constructor.
///
/// These are raised immediately and never coerced; they usually mean the
/// client sent something the protocol does not allow.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("{recipe} is a {kind} recipe and cannot back a craft action")]
    NotCraftingRecipe { recipe: RecipeId, kind: &'static str },

    #[error("drop action has no items to drop")]
    NothingToDrop,

    #[error("hotbar slot {slot} is outside the hotbar (size {size})")]
    InvalidHotbarSlot { slot: u8, size: u8 },
}

impl EngineError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotCraftingRecipe { .. } => "ACTION_NOT_CRAFTING_RECIPE",
            Self::NothingToDrop => "ACTION_NOTHING_TO_DROP",
            Self::InvalidHotbarSlot { .. } => "ACTION_INVALID_HOTBAR_SLOT",
        }
    }
}
