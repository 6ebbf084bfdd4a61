//! Shared fixture for transaction scenarios.
#![allow(dead_code)]

use inventory_core::{
    Achievement, Action, ActionClock, ActionStamp, ActorId, HookChain, Inventory, InventoryArena,
    InventoryId, ItemKind, ItemStack, Player, SlotIndex, SlotInventory, SyncMessage, Transaction,
    TransactionConfig, TransactionEnv, TransactionHooks, TransactionOutcome, Verdict,
};

pub const PLAYER: ActorId = ActorId(1);
pub const OTHER: ActorId = ActorId(2);

pub fn stack(kind: ItemKind, count: u16) -> ItemStack {
    ItemStack::new(kind, 0, count)
}

/// Player double that records every side effect.
#[derive(Debug)]
pub struct TestPlayer {
    pub id: ActorId,
    pub inventory: InventoryId,
    pub dropped: Vec<ItemStack>,
    pub equipped: Vec<(u8, SlotIndex)>,
    pub action_flag: Option<bool>,
    pub achievements: Vec<Achievement>,
}

impl TestPlayer {
    pub fn new(id: ActorId, inventory: InventoryId) -> Self {
        Self {
            id,
            inventory,
            dropped: Vec::new(),
            equipped: Vec::new(),
            action_flag: Some(true),
            achievements: Vec::new(),
        }
    }
}

impl Player for TestPlayer {
    fn id(&self) -> ActorId {
        self.id
    }

    fn inventory_id(&self) -> InventoryId {
        self.inventory
    }

    fn drop_item(&mut self, item: ItemStack) {
        self.dropped.push(item);
    }

    fn equip_item(&mut self, hotbar_slot: u8, inventory_slot: SlotIndex) {
        self.equipped.push((hotbar_slot, inventory_slot));
    }

    fn set_action_flag(&mut self, value: bool) {
        self.action_flag = Some(value);
    }

    fn award_achievement(&mut self, achievement: Achievement) {
        self.achievements.push(achievement);
    }
}

/// Denies every drop.
pub struct DenyDrops;

impl TransactionHooks for DenyDrops {
    fn on_drop(&mut self, _source: ActorId, _item: &ItemStack) -> Verdict {
        Verdict::Deny
    }
}

/// Cancels every transaction.
pub struct CancelAll;

impl TransactionHooks for CancelAll {
    fn on_transaction(&mut self, _source: ActorId, _actions: &[Action]) -> Verdict {
        Verdict::Deny
    }
}

/// A player with a 36-slot inventory standing at a 27-slot chest that
/// [`OTHER`] is also looking at.
pub struct World {
    pub clock: ActionClock,
    pub arena: InventoryArena,
    pub player: TestPlayer,
    pub hooks: HookChain,
    pub inventory: InventoryId,
    pub chest: InventoryId,
}

impl World {
    pub fn new() -> Self {
        let mut arena = InventoryArena::new();
        let inventory = arena.insert_with(|id| {
            let mut inventory = SlotInventory::new(id, 36);
            inventory.add_viewer(PLAYER);
            inventory
        });
        let chest = arena.insert_with(|id| {
            let mut chest = SlotInventory::new(id, 27);
            chest.add_viewer(PLAYER);
            chest.add_viewer(OTHER);
            chest
        });

        Self {
            clock: ActionClock::new(),
            arena,
            player: TestPlayer::new(PLAYER, inventory),
            hooks: HookChain::new(),
            inventory,
            chest,
        }
    }

    pub fn with_hook(mut self, hook: impl TransactionHooks + 'static) -> Self {
        self.hooks = std::mem::take(&mut self.hooks).with(hook);
        self
    }

    /// Overwrites a slot without notifying anyone.
    pub fn put(&mut self, inventory: InventoryId, slot: SlotIndex, item: ItemStack) {
        let inventory = self.arena.get_mut(inventory).expect("inventory exists");
        assert!(inventory.set_item(slot, item, false), "slot is writable");
    }

    pub fn item(&self, inventory: InventoryId, slot: SlotIndex) -> ItemStack {
        self.arena
            .get(inventory)
            .expect("inventory exists")
            .item(slot)
    }

    pub fn take_outbox(&mut self, inventory: InventoryId) -> Vec<SyncMessage> {
        self.arena
            .get_mut(inventory)
            .expect("inventory exists")
            .take_outbox()
    }

    pub fn stamp(&mut self) -> ActionStamp {
        self.clock.stamp()
    }

    pub fn slot_change(&mut self, inventory: InventoryId, slot: SlotIndex, item: ItemStack) -> Action {
        Action::slot_change(self.stamp(), inventory, slot, item)
    }

    pub fn transaction(&self, actions: impl IntoIterator<Item = Action>) -> Transaction {
        let config = TransactionConfig::default();
        Transaction::with_actions(PLAYER, self.inventory, actions, &self.arena, &config)
            .expect("actions are well formed")
    }

    pub fn execute(&mut self, transaction: &mut Transaction) -> TransactionOutcome {
        let mut env = TransactionEnv::new(&mut self.player, &mut self.arena, &mut self.hooks);
        transaction.execute(&mut env)
    }
}
