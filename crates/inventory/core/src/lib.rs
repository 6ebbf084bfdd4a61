//! Server-authoritative inventory transactions.
//!
//! `inventory-core` validates batches of client-proposed inventory operations
//! (slot changes, crafting, dropping, hotbar equip) and applies them
//! all-or-nothing. Every mutation flows through [`Transaction::execute`];
//! inventories, the acting player and the policy hooks are borrowed
//! collaborators supplied through [`TransactionEnv`].
pub mod action;
pub mod config;
pub mod error;
pub mod hooks;
pub mod inventory;
pub mod item;
pub mod player;
pub mod recipe;
pub mod request;
pub mod transaction;
pub use action::{
    Action, ActionClock, ActionError, ActionId, ActionKind, ActionStamp, CraftItemAction,
    CreationTime, DropItemAction, EquipItemAction, SlotChangeAction, achievement_for,
};
pub use config::TransactionConfig;
pub use error::{EngineError, ErrorSeverity};
pub use hooks::{AllowAll, HookChain, TransactionHooks, Verdict};
pub use inventory::{
    Inventory, InventoryArena, InventoryId, InventoryStore, SlotIndex, SlotInventory, SyncMessage,
};
pub use item::{ItemError, ItemKind, ItemStack, ItemTag, MatchFlags, Variant};
pub use player::{Achievement, ActorId, Player};
pub use recipe::{
    FurnaceRecipe, Recipe, RecipeBook, RecipeError, RecipeId, ShapedRecipe, ShapelessRecipe,
};
pub use request::{ProposedAction, RequestContext, RequestError, TransactionRequest};
pub use transaction::{
    BalanceSheet, CommitReport, RejectReason, Rejection, Transaction, TransactionEnv,
    TransactionError, TransactionOutcome, TransactionPhase,
};
