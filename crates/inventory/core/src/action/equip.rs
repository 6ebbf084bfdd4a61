use crate::config::TransactionConfig;
use crate::inventory::{InventoryStore, SlotIndex};
use crate::item::{ItemStack, MatchFlags};
use crate::transaction::{Transaction, TransactionEnv};

use super::ActionError;

/// Points a hotbar slot at an inventory slot.
///
/// Carries no item flow; it only checks that the client agrees with the
/// server about what sits in `inventory_slot`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipItemAction {
    hotbar_slot: u8,
    inventory_slot: SlotIndex,
    equipped_item: ItemStack,
}

impl EquipItemAction {
    /// # Errors
    ///
    /// [`ActionError::InvalidHotbarSlot`] when `hotbar_slot` is outside the hotbar.
    pub fn new(
        hotbar_slot: u8,
        inventory_slot: SlotIndex,
        equipped_item: ItemStack,
    ) -> Result<Self, ActionError> {
        if hotbar_slot >= TransactionConfig::HOTBAR_SIZE {
            return Err(ActionError::InvalidHotbarSlot {
                slot: hotbar_slot,
                size: TransactionConfig::HOTBAR_SIZE,
            });
        }
        Ok(Self {
            hotbar_slot,
            inventory_slot,
            equipped_item,
        })
    }

    pub fn hotbar_slot(&self) -> u8 {
        self.hotbar_slot
    }

    pub fn inventory_slot(&self) -> SlotIndex {
        self.inventory_slot
    }

    pub fn equipped_item(&self) -> &ItemStack {
        &self.equipped_item
    }

    pub(super) fn is_valid(
        &self,
        transaction: &Transaction,
        inventories: &dyn InventoryStore,
    ) -> bool {
        let inventory = transaction.source_inventory();
        let expected = match transaction.chain_predecessor(inventory, self.inventory_slot, None) {
            Some(change) => change.target_item().clone(),
            None => inventories
                .inventory(inventory)
                .map(|inventory| inventory.item(self.inventory_slot))
                .unwrap_or(ItemStack::EMPTY),
        };
        expected.equals(&self.equipped_item, MatchFlags::default())
    }

    pub(super) fn execute(&self, env: &mut TransactionEnv<'_>) -> bool {
        env.player.equip_item(self.hotbar_slot, self.inventory_slot);
        env.player.set_action_flag(false);
        true
    }
}
