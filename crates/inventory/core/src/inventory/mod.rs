//! Inventory capabilities consumed by the transaction engine.
//!
//! The engine never owns inventories. Actions and transactions refer to them
//! by [`InventoryId`] and resolve them through an [`InventoryStore`] only while
//! a transaction is being built or executed.
mod arena;
mod slots;

pub use arena::InventoryArena;
pub use slots::{SlotInventory, SyncMessage};

use std::fmt;

use crate::item::ItemStack;
use crate::player::ActorId;

/// Position within an inventory.
pub type SlotIndex = u16;

/// Stable handle of an inventory, assigned by the owning store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryId(pub u32);

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inv#{}", self.0)
    }
}

/// Slot read/write contract of an authoritative inventory.
pub trait Inventory {
    fn id(&self) -> InventoryId;

    /// Number of addressable slots.
    fn size(&self) -> usize;

    fn slot_exists(&self, slot: SlotIndex) -> bool {
        usize::from(slot) < self.size()
    }

    /// Current content of `slot`; [`ItemStack::EMPTY`] for empty or missing slots.
    fn item(&self, slot: SlotIndex) -> ItemStack;

    /// Replaces the content of `slot`.
    ///
    /// When `notify` is true the change is pushed to every viewer. Returns
    /// false if the write was refused.
    fn set_item(&mut self, slot: SlotIndex, item: ItemStack, notify: bool) -> bool;

    /// Actors currently looking at this inventory.
    fn viewers(&self) -> Vec<ActorId>;

    /// Sends the full authoritative contents to `to`.
    fn send_contents(&mut self, to: ActorId);

    /// Sends the authoritative content of one slot to each of `to`.
    fn send_slot(&mut self, slot: SlotIndex, to: &[ActorId]);
}

/// Resolves inventory handles for the duration of a request.
pub trait InventoryStore {
    fn inventory(&self, id: InventoryId) -> Option<&dyn Inventory>;

    fn inventory_mut(&mut self, id: InventoryId) -> Option<&mut dyn Inventory>;

    fn contains(&self, id: InventoryId) -> bool {
        self.inventory(id).is_some()
    }
}
