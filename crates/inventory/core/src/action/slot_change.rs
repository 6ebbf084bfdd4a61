use crate::inventory::{InventoryId, InventoryStore, SlotIndex};
use crate::item::ItemStack;
use crate::transaction::{Transaction, TransactionEnv};

use super::CreationTime;

/// "Slot `slot` of `inventory` should end up holding `target`."
///
/// The expected prior content (`source`) is resolved when the action joins a
/// transaction: it is the target of the previous change to the same slot in
/// that transaction, or the live slot content if there is none. Validation
/// later re-checks that assumption, which makes the write a compare-and-swap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotChangeAction {
    inventory: InventoryId,
    slot: SlotIndex,
    source: Option<ItemStack>,
    target: ItemStack,
}

impl SlotChangeAction {
    pub fn new(inventory: InventoryId, slot: SlotIndex, target: ItemStack) -> Self {
        Self {
            inventory,
            slot,
            source: None,
            target,
        }
    }

    pub fn inventory(&self) -> InventoryId {
        self.inventory
    }

    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    /// Expected prior content; empty until the action joins a transaction.
    pub fn source_item(&self) -> ItemStack {
        self.source.clone().unwrap_or(ItemStack::EMPTY)
    }

    pub fn target_item(&self) -> &ItemStack {
        &self.target
    }

    pub fn is_resolved(&self) -> bool {
        self.source.is_some()
    }

    pub(super) fn resolve_source(
        &mut self,
        created_at: CreationTime,
        transaction: &Transaction,
        inventories: &dyn InventoryStore,
    ) {
        let source = match transaction.chain_predecessor(self.inventory, self.slot, Some(created_at))
        {
            Some(previous) => previous.target.clone(),
            None => inventories
                .inventory(self.inventory)
                .map(|inventory| inventory.item(self.slot))
                .unwrap_or(ItemStack::EMPTY),
        };
        self.source = Some(source);
    }

    pub(super) fn is_valid(
        &self,
        created_at: CreationTime,
        transaction: &Transaction,
        inventories: &dyn InventoryStore,
    ) -> bool {
        let source = self.source_item();
        match transaction.chain_predecessor(self.inventory, self.slot, Some(created_at)) {
            Some(previous) => previous.target.equals_exact(&source),
            None => inventories.inventory(self.inventory).is_some_and(|inventory| {
                inventory.slot_exists(self.slot) && inventory.item(self.slot).equals_exact(&source)
            }),
        }
    }

    pub(super) fn execute(&self, env: &mut TransactionEnv<'_>) -> bool {
        env.inventories
            .inventory_mut(self.inventory)
            .is_some_and(|inventory| inventory.set_item(self.slot, self.target.clone(), false))
    }

    /// Everyone but the source sees the new content; the source predicted it.
    pub(super) fn on_execute_success(&self, env: &mut TransactionEnv<'_>) {
        let source = env.player.id();
        if let Some(inventory) = env.inventories.inventory_mut(self.inventory) {
            let mut viewers = inventory.viewers();
            viewers.retain(|viewer| *viewer != source);
            inventory.send_slot(self.slot, &viewers);
        }
    }

    /// Corrects the source's misprediction.
    pub(super) fn on_execute_fail(&self, env: &mut TransactionEnv<'_>) {
        let source = env.player.id();
        if let Some(inventory) = env.inventories.inventory_mut(self.inventory) {
            inventory.send_slot(self.slot, &[source]);
        }
    }
}
