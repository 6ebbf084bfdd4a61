//! Arena that hands out inventory handles.

use super::{Inventory, InventoryId, InventoryStore, SlotInventory};

/// Owns every inventory of a server process and resolves [`InventoryId`]s.
///
/// Handles are indices and stay valid for the lifetime of the arena.
#[derive(Clone, Debug)]
pub struct InventoryArena<I = SlotInventory> {
    inventories: Vec<I>,
}

impl<I: Inventory> InventoryArena<I> {
    /// Inserts an inventory built from its freshly assigned handle.
    pub fn insert_with(&mut self, build: impl FnOnce(InventoryId) -> I) -> InventoryId {
        let id = InventoryId(self.inventories.len() as u32);
        self.inventories.push(build(id));
        id
    }

    pub fn get(&self, id: InventoryId) -> Option<&I> {
        self.inventories.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: InventoryId) -> Option<&mut I> {
        self.inventories.get_mut(id.0 as usize)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut I> {
        self.inventories.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.inventories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventories.is_empty()
    }
}

impl InventoryArena<SlotInventory> {
    /// Creates an arena of [`SlotInventory`]; use [`Default`] for other inventory types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slot inventory of `size` slots.
    pub fn create(&mut self, size: usize) -> InventoryId {
        self.insert_with(|id| SlotInventory::new(id, size))
    }
}

impl<I: Inventory> Default for InventoryArena<I> {
    fn default() -> Self {
        Self {
            inventories: Vec::new(),
        }
    }
}

impl<I: Inventory> InventoryStore for InventoryArena<I> {
    fn inventory(&self, id: InventoryId) -> Option<&dyn Inventory> {
        self.get(id).map(|inventory| inventory as &dyn Inventory)
    }

    fn inventory_mut(&mut self, id: InventoryId) -> Option<&mut dyn Inventory> {
        self.get_mut(id).map(|inventory| inventory as &mut dyn Inventory)
    }
}
