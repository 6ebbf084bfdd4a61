//! Fixed-size slot inventory with an outgoing sync queue.

use crate::item::ItemStack;
use crate::player::ActorId;

use super::{Inventory, InventoryId, SlotIndex};

/// Authoritative state pushed to clients.
///
/// The engine only queues these; the network layer drains them with
/// [`SlotInventory::take_outbox`] and encodes them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyncMessage {
    Contents {
        to: ActorId,
        inventory: InventoryId,
        items: Vec<ItemStack>,
    },
    Slot {
        to: Vec<ActorId>,
        inventory: InventoryId,
        slot: SlotIndex,
        item: ItemStack,
    },
}

impl SyncMessage {
    /// Returns true if `actor` is a recipient of this message.
    pub fn is_for(&self, actor: ActorId) -> bool {
        match self {
            SyncMessage::Contents { to, .. } => *to == actor,
            SyncMessage::Slot { to, .. } => to.contains(&actor),
        }
    }
}

/// In-memory inventory backed by a vector of slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotInventory {
    id: InventoryId,
    slots: Vec<ItemStack>,
    viewers: Vec<ActorId>,
    locked: Vec<SlotIndex>,
    outbox: Vec<SyncMessage>,
}

impl SlotInventory {
    pub fn new(id: InventoryId, size: usize) -> Self {
        Self {
            id,
            slots: vec![ItemStack::EMPTY; size],
            viewers: Vec::new(),
            locked: Vec::new(),
            outbox: Vec::new(),
        }
    }

    /// Builder-style initial content; out-of-range slots are ignored.
    #[must_use]
    pub fn with_item(mut self, slot: SlotIndex, item: ItemStack) -> Self {
        if let Some(entry) = self.slots.get_mut(usize::from(slot)) {
            *entry = item;
        }
        self
    }

    pub fn add_viewer(&mut self, actor: ActorId) {
        if !self.viewers.contains(&actor) {
            self.viewers.push(actor);
        }
    }

    pub fn remove_viewer(&mut self, actor: ActorId) {
        self.viewers.retain(|viewer| *viewer != actor);
    }

    /// Makes writes to `slot` fail (e.g. a result-only slot).
    pub fn lock_slot(&mut self, slot: SlotIndex) {
        if !self.locked.contains(&slot) {
            self.locked.push(slot);
        }
    }

    pub fn unlock_slot(&mut self, slot: SlotIndex) {
        self.locked.retain(|locked| *locked != slot);
    }

    pub fn items(&self) -> &[ItemStack] {
        &self.slots
    }

    /// Messages queued since the last drain.
    pub fn outbox(&self) -> &[SyncMessage] {
        &self.outbox
    }

    pub fn take_outbox(&mut self) -> Vec<SyncMessage> {
        std::mem::take(&mut self.outbox)
    }
}

impl Inventory for SlotInventory {
    fn id(&self) -> InventoryId {
        self.id
    }

    fn size(&self) -> usize {
        self.slots.len()
    }

    fn item(&self, slot: SlotIndex) -> ItemStack {
        self.slots
            .get(usize::from(slot))
            .cloned()
            .unwrap_or(ItemStack::EMPTY)
    }

    fn set_item(&mut self, slot: SlotIndex, item: ItemStack, notify: bool) -> bool {
        if self.locked.contains(&slot) {
            return false;
        }
        let Some(entry) = self.slots.get_mut(usize::from(slot)) else {
            return false;
        };
        *entry = item;

        if notify {
            let viewers = self.viewers.clone();
            self.send_slot(slot, &viewers);
        }
        true
    }

    fn viewers(&self) -> Vec<ActorId> {
        self.viewers.clone()
    }

    fn send_contents(&mut self, to: ActorId) {
        self.outbox.push(SyncMessage::Contents {
            to,
            inventory: self.id,
            items: self.slots.clone(),
        });
    }

    fn send_slot(&mut self, slot: SlotIndex, to: &[ActorId]) {
        if to.is_empty() {
            return;
        }
        let item = self.item(slot);
        self.outbox.push(SyncMessage::Slot {
            to: to.to_vec(),
            inventory: self.id,
            slot,
            item,
        });
    }
}
