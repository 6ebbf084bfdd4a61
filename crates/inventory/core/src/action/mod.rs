//! Action domain - proposed inventory operations.
//!
//! Every action records what it consumes ("source items") and what it
//! produces ("target items") so the transaction can prove that a batch
//! neither creates nor destroys items.
//!
//! # Module Structure
//!
//! - `error`: construction errors ([`ActionError`])
//! - `slot_change`: "slot S of inventory I ends up holding T"
//! - `craft`: crafting-grid recipe application
//! - `drop`: spawning stacks into the world
//! - `equip`: hotbar selection
//!
//! [`Action`] wraps the variant with its id and creation time. All
//! dispatch is an exhaustive `match` over [`ActionKind`].

mod craft;
mod drop;
mod equip;
mod error;
mod slot_change;

pub use craft::{CraftItemAction, achievement_for};
pub use drop::DropItemAction;
pub use equip::EquipItemAction;
pub use error::ActionError;
pub use slot_change::SlotChangeAction;

use std::fmt;
use std::time::{Duration, Instant};

use crate::inventory::{InventoryId, InventoryStore, SlotIndex};
use crate::item::ItemStack;
use crate::recipe::{Recipe, RecipeId};
use crate::transaction::{Transaction, TransactionEnv};

/// Stable handle of an action, unique per [`ActionClock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionId(pub u64);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// Monotonic creation timestamp, measured from the clock's epoch.
///
/// Only used to order actions within a transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CreationTime(Duration);

impl CreationTime {
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(Duration::from_nanos(nanos))
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }
}

/// Identity and creation time handed to an action constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionStamp {
    pub id: ActionId,
    pub created_at: CreationTime,
}

impl ActionStamp {
    pub const fn new(id: ActionId, created_at: CreationTime) -> Self {
        Self { id, created_at }
    }
}

/// Issues action stamps for one session.
///
/// Creation times are strictly increasing even when two actions are stamped
/// within the same clock tick.
#[derive(Clone, Debug)]
pub struct ActionClock {
    epoch: Instant,
    last: Option<Duration>,
    next_id: u64,
}

impl ActionClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            last: None,
            next_id: 0,
        }
    }

    pub fn stamp(&mut self) -> ActionStamp {
        let mut now = self.epoch.elapsed();
        if let Some(last) = self.last
            && now <= last
        {
            now = last + Duration::from_nanos(1);
        }
        self.last = Some(now);

        let id = ActionId(self.next_id);
        self.next_id += 1;
        ActionStamp::new(id, CreationTime(now))
    }
}

impl Default for ActionClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Action variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    SlotChange(SlotChangeAction),
    Craft(CraftItemAction),
    Drop(DropItemAction),
    Equip(EquipItemAction),
}

impl From<SlotChangeAction> for ActionKind {
    fn from(action: SlotChangeAction) -> Self {
        Self::SlotChange(action)
    }
}

impl From<CraftItemAction> for ActionKind {
    fn from(action: CraftItemAction) -> Self {
        Self::Craft(action)
    }
}

impl From<DropItemAction> for ActionKind {
    fn from(action: DropItemAction) -> Self {
        Self::Drop(action)
    }
}

impl From<EquipItemAction> for ActionKind {
    fn from(action: EquipItemAction) -> Self {
        Self::Equip(action)
    }
}

/// A single proposed operation with its identity and creation time.
///
/// Cloning keeps the id, so a clone counts as the same action when added
/// to a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    id: ActionId,
    created_at: CreationTime,
    kind: ActionKind,
}

impl Action {
    pub fn new(stamp: ActionStamp, kind: impl Into<ActionKind>) -> Self {
        Self {
            id: stamp.id,
            created_at: stamp.created_at,
            kind: kind.into(),
        }
    }

    pub fn slot_change(
        stamp: ActionStamp,
        inventory: InventoryId,
        slot: SlotIndex,
        target: ItemStack,
    ) -> Self {
        Self::new(stamp, SlotChangeAction::new(inventory, slot, target))
    }

    pub fn craft(stamp: ActionStamp, id: RecipeId, recipe: &Recipe) -> Result<Self, ActionError> {
        Ok(Self::new(stamp, CraftItemAction::new(id, recipe)?))
    }

    pub fn drop_items(
        stamp: ActionStamp,
        items: impl IntoIterator<Item = ItemStack>,
    ) -> Result<Self, ActionError> {
        Ok(Self::new(stamp, DropItemAction::new(items)?))
    }

    pub fn equip(
        stamp: ActionStamp,
        hotbar_slot: u8,
        inventory_slot: SlotIndex,
        equipped_item: ItemStack,
    ) -> Result<Self, ActionError> {
        Ok(Self::new(
            stamp,
            EquipItemAction::new(hotbar_slot, inventory_slot, equipped_item)?,
        ))
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn created_at(&self) -> CreationTime {
        self.created_at
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn as_slot_change(&self) -> Option<&SlotChangeAction> {
        match &self.kind {
            ActionKind::SlotChange(action) => Some(action),
            _ => None,
        }
    }

    /// Inventory touched by this action, for actions bound to a slot.
    pub fn inventory(&self) -> Option<InventoryId> {
        match &self.kind {
            ActionKind::SlotChange(action) => Some(action.inventory()),
            ActionKind::Craft(_) | ActionKind::Drop(_) | ActionKind::Equip(_) => None,
        }
    }

    /// Stacks this action consumes.
    pub fn source_items(&self) -> Vec<ItemStack> {
        match &self.kind {
            ActionKind::SlotChange(action) => vec![action.source_item()],
            ActionKind::Craft(action) => action.results().to_vec(),
            ActionKind::Drop(_) | ActionKind::Equip(_) => Vec::new(),
        }
    }

    /// Stacks this action produces.
    pub fn target_items(&self) -> Vec<ItemStack> {
        match &self.kind {
            ActionKind::SlotChange(action) => vec![action.target_item().clone()],
            ActionKind::Craft(action) => action.ingredients().to_vec(),
            ActionKind::Drop(action) => action.items().to_vec(),
            ActionKind::Equip(_) => Vec::new(),
        }
    }

    /// Returns the snake_case name of the variant, for logging.
    pub fn as_snake_case(&self) -> &'static str {
        match &self.kind {
            ActionKind::SlotChange(_) => "slot_change",
            ActionKind::Craft(_) => "craft",
            ActionKind::Drop(_) => "drop",
            ActionKind::Equip(_) => "equip",
        }
    }

    /// Join hook, fired once when the action is appended to `transaction`.
    pub(crate) fn on_add_to_transaction(
        &mut self,
        transaction: &Transaction,
        inventories: &dyn InventoryStore,
    ) {
        if let ActionKind::SlotChange(action) = &mut self.kind {
            action.resolve_source(self.created_at, transaction, inventories);
        }
    }

    /// Pure validity check against the transaction and live inventories.
    pub fn is_valid(&self, transaction: &Transaction, inventories: &dyn InventoryStore) -> bool {
        match &self.kind {
            ActionKind::SlotChange(action) => {
                action.is_valid(self.created_at, transaction, inventories)
            }
            ActionKind::Craft(_) | ActionKind::Drop(_) => true,
            ActionKind::Equip(action) => action.is_valid(transaction, inventories),
        }
    }

    /// Fires cancellable hooks. Returning false aborts the whole transaction.
    pub fn on_pre_execute(&self, env: &mut TransactionEnv<'_>) -> bool {
        match &self.kind {
            ActionKind::Craft(action) => action.on_pre_execute(env),
            ActionKind::Drop(action) => action.on_pre_execute(env),
            ActionKind::SlotChange(_) | ActionKind::Equip(_) => true,
        }
    }

    /// Performs the mutation; returns whether it took effect.
    pub fn execute(&self, env: &mut TransactionEnv<'_>) -> bool {
        match &self.kind {
            ActionKind::SlotChange(action) => action.execute(env),
            ActionKind::Craft(_) => true,
            ActionKind::Drop(action) => action.execute(env),
            ActionKind::Equip(action) => action.execute(env),
        }
    }

    pub fn on_execute_success(&self, env: &mut TransactionEnv<'_>) {
        match &self.kind {
            ActionKind::SlotChange(action) => action.on_execute_success(env),
            ActionKind::Craft(action) => action.on_execute_success(env),
            ActionKind::Drop(_) | ActionKind::Equip(_) => {}
        }
    }

    pub fn on_execute_fail(&self, env: &mut TransactionEnv<'_>) {
        if let ActionKind::SlotChange(action) = &self.kind {
            action.on_execute_fail(env);
        }
    }
}
