//! Decoded client requests.
//!
//! The network layer turns an inventory-transaction packet into a
//! [`TransactionRequest`]; [`TransactionRequest::build`] stamps, resolves and
//! collects the proposed actions into a [`Transaction`] ready to execute.

use crate::action::{Action, ActionClock, ActionError};
use crate::config::TransactionConfig;
use crate::error::{EngineError, ErrorSeverity};
use crate::inventory::{InventoryId, InventoryStore, SlotIndex};
use crate::item::ItemStack;
use crate::player::ActorId;
use crate::recipe::{RecipeBook, RecipeId};
use crate::transaction::{Transaction, TransactionError};

/// One operation as the client proposed it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ProposedAction {
    SlotChange {
        inventory: InventoryId,
        slot: SlotIndex,
        item: ItemStack,
    },
    Craft {
        recipe: RecipeId,
    },
    Drop {
        items: Vec<ItemStack>,
    },
    Equip {
        hotbar_slot: u8,
        inventory_slot: SlotIndex,
        item: ItemStack,
    },
}

/// A batch of proposed operations from a single packet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransactionRequest {
    pub actions: Vec<ProposedAction>,
}

/// Server-side state needed to turn a request into a transaction.
pub struct RequestContext<'a> {
    pub source: ActorId,
    pub source_inventory: InventoryId,
    pub clock: &'a mut ActionClock,
    pub recipes: &'a RecipeBook,
    pub inventories: &'a dyn InventoryStore,
    pub config: &'a TransactionConfig,
}

/// Errors raised while building a transaction from a request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("{0} is not in the recipe book")]
    UnknownRecipe(RecipeId),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

impl EngineError for RequestError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownRecipe(_) => ErrorSeverity::Validation,
            Self::Action(error) => error.severity(),
            Self::Transaction(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownRecipe(_) => "REQUEST_UNKNOWN_RECIPE",
            Self::Action(error) => error.error_code(),
            Self::Transaction(error) => error.error_code(),
        }
    }
}

impl TransactionRequest {
    pub fn new(actions: Vec<ProposedAction>) -> Self {
        Self { actions }
    }

    /// Stamps each proposal in order and adds it to a new transaction.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed proposal; nothing is executed.
    pub fn build(self, ctx: RequestContext<'_>) -> Result<Transaction, RequestError> {
        self.assemble(ctx).inspect_err(|error| {
            tracing::debug!(
                code = error.error_code(),
                severity = error.severity().as_str(),
                %error,
                "request refused"
            );
        })
    }

    fn assemble(self, ctx: RequestContext<'_>) -> Result<Transaction, RequestError> {
        if self.actions.len() > ctx.config.max_actions {
            return Err(TransactionError::TooManyActions {
                limit: ctx.config.max_actions,
            }
            .into());
        }

        let mut transaction =
            Transaction::with_config(ctx.source, ctx.source_inventory, ctx.config);
        for proposed in self.actions {
            let action = proposed.into_action(ctx.clock, ctx.recipes)?;
            transaction.add_action(action, ctx.inventories)?;
        }
        Ok(transaction)
    }
}

impl ProposedAction {
    fn into_action(
        self,
        clock: &mut ActionClock,
        recipes: &RecipeBook,
    ) -> Result<Action, RequestError> {
        let stamp = clock.stamp();
        let action = match self {
            ProposedAction::SlotChange {
                inventory,
                slot,
                item,
            } => Action::slot_change(stamp, inventory, slot, item),
            ProposedAction::Craft { recipe } => {
                let definition = recipes
                    .get(recipe)
                    .ok_or(RequestError::UnknownRecipe(recipe))?;
                Action::craft(stamp, recipe, definition)?
            }
            ProposedAction::Drop { items } => Action::drop_items(stamp, items)?,
            ProposedAction::Equip {
                hotbar_slot,
                inventory_slot,
                item,
            } => Action::equip(stamp, hotbar_slot, inventory_slot, item)?,
        };
        Ok(action)
    }
}
