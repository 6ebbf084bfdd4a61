use crate::item::ItemStack;
use crate::transaction::TransactionEnv;

use super::ActionError;

/// Throws stacks out of the inventory into the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropItemAction {
    items: Vec<ItemStack>,
}

impl DropItemAction {
    /// Empty stacks are discarded.
    ///
    /// # Errors
    ///
    /// [`ActionError::NothingToDrop`] when no non-empty stack remains.
    pub fn new(items: impl IntoIterator<Item = ItemStack>) -> Result<Self, ActionError> {
        let items: Vec<_> = items.into_iter().filter(|item| !item.is_empty()).collect();
        if items.is_empty() {
            return Err(ActionError::NothingToDrop);
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[ItemStack] {
        &self.items
    }

    /// All-or-nothing: every stack is checked before any is dropped.
    pub(super) fn on_pre_execute(&self, env: &mut TransactionEnv<'_>) -> bool {
        let source = env.player.id();
        self.items
            .iter()
            .all(|item| env.hooks.on_drop(source, item).is_allowed())
    }

    pub(super) fn execute(&self, env: &mut TransactionEnv<'_>) -> bool {
        for item in &self.items {
            env.player.drop_item(item.clone());
        }
        true
    }
}
