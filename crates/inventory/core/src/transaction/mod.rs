//! Transaction coordinator.
//!
//! A [`Transaction`] collects the actions a client proposed in one request
//! and applies them all-or-nothing:
//!
//! 1. **Precheck** - one-shot guard and balance check (no side effects)
//! 2. **Validate** - every action's assumed prior state still holds
//! 3. **Authorize** - the transaction-level hook may cancel the batch
//! 4. **Pre-execute** - craft/drop hooks may cancel the batch
//! 5. **Commit** - every action executes; failures are reported per action
//!
//! Any rejection in phases 2-4 resends every involved inventory to the
//! source so the client drops its mispredicted view.

mod balance;
mod error;
mod outcome;

pub use balance::BalanceSheet;
pub use error::TransactionError;
pub use outcome::{CommitReport, RejectReason, Rejection, TransactionOutcome, TransactionPhase};

use std::collections::HashSet;

use crate::action::{Action, ActionId, CreationTime, SlotChangeAction};
use crate::config::TransactionConfig;
use crate::hooks::TransactionHooks;
use crate::inventory::{InventoryId, InventoryStore, SlotIndex};
use crate::player::{ActorId, Player};

/// Collaborators borrowed for the duration of [`Transaction::execute`].
pub struct TransactionEnv<'a> {
    pub(crate) player: &'a mut dyn Player,
    pub(crate) inventories: &'a mut dyn InventoryStore,
    pub(crate) hooks: &'a mut dyn TransactionHooks,
}

impl<'a> TransactionEnv<'a> {
    pub fn new(
        player: &'a mut dyn Player,
        inventories: &'a mut dyn InventoryStore,
        hooks: &'a mut dyn TransactionHooks,
    ) -> Self {
        Self {
            player,
            inventories,
            hooks,
        }
    }
}

/// An ordered, duplicate-free batch of actions proposed by one actor.
#[derive(Clone, Debug)]
pub struct Transaction {
    source: ActorId,
    source_inventory: InventoryId,
    actions: Vec<Action>,
    action_ids: HashSet<ActionId>,
    inventories: Vec<InventoryId>,
    max_actions: usize,
    has_executed: bool,
}

impl Transaction {
    /// Creates an empty transaction for `source`, whose own inventory is `source_inventory`.
    pub fn new(source: ActorId, source_inventory: InventoryId) -> Self {
        Self::with_config(source, source_inventory, &TransactionConfig::default())
    }

    pub fn with_config(
        source: ActorId,
        source_inventory: InventoryId,
        config: &TransactionConfig,
    ) -> Self {
        Self {
            source,
            source_inventory,
            actions: Vec::new(),
            action_ids: HashSet::new(),
            inventories: Vec::new(),
            max_actions: config.max_actions,
            has_executed: false,
        }
    }

    pub fn for_player(player: &dyn Player) -> Self {
        Self::new(player.id(), player.inventory_id())
    }

    /// Creates a transaction limited by `config` and adds `actions` in order.
    pub fn with_actions(
        source: ActorId,
        source_inventory: InventoryId,
        actions: impl IntoIterator<Item = Action>,
        inventories: &dyn InventoryStore,
        config: &TransactionConfig,
    ) -> Result<Self, TransactionError> {
        let mut transaction = Self::with_config(source, source_inventory, config);
        for action in actions {
            transaction.add_action(action, inventories)?;
        }
        Ok(transaction)
    }

    pub fn source(&self) -> ActorId {
        self.source
    }

    pub fn source_inventory(&self) -> InventoryId {
        self.source_inventory
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Distinct inventories touched by the actions, in first-seen order.
    pub fn inventories(&self) -> &[InventoryId] {
        &self.inventories
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn has_executed(&self) -> bool {
        self.has_executed
    }

    /// Appends `action`, resolving its lazy state against this transaction.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::DuplicateAction`] if an action with the same id was added
    /// - [`TransactionError::UnknownInventory`] if the action's inventory is not in `inventories`
    /// - [`TransactionError::AlreadyExecuted`] after [`Transaction::execute`] committed
    /// - [`TransactionError::TooManyActions`] past the configured limit
    pub fn add_action(
        &mut self,
        mut action: Action,
        inventories: &dyn InventoryStore,
    ) -> Result<ActionId, TransactionError> {
        if self.has_executed {
            return Err(TransactionError::AlreadyExecuted);
        }
        if self.action_ids.contains(&action.id()) {
            return Err(TransactionError::DuplicateAction(action.id()));
        }
        if self.actions.len() >= self.max_actions {
            return Err(TransactionError::TooManyActions {
                limit: self.max_actions,
            });
        }
        if let Some(inventory) = action.inventory()
            && !inventories.contains(inventory)
        {
            return Err(TransactionError::UnknownInventory(inventory));
        }

        action.on_add_to_transaction(self, inventories);

        let id = action.id();
        if let Some(inventory) = action.inventory()
            && !self.inventories.contains(&inventory)
        {
            self.inventories.push(inventory);
        }
        self.action_ids.insert(id);
        self.actions.push(action);
        Ok(id)
    }

    /// Slot changes on (`inventory`, `slot`) in insertion order, optionally
    /// only those created strictly before `before`.
    pub fn slot_changes(
        &self,
        inventory: InventoryId,
        slot: SlotIndex,
        before: Option<CreationTime>,
    ) -> impl Iterator<Item = &Action> + '_ {
        self.actions.iter().filter(move |action| {
            before.is_none_or(|before| action.created_at() < before)
                && action
                    .as_slot_change()
                    .is_some_and(|change| change.inventory() == inventory && change.slot() == slot)
        })
    }

    /// The most recent slot change on (`inventory`, `slot`) by creation time.
    pub fn chain_predecessor(
        &self,
        inventory: InventoryId,
        slot: SlotIndex,
        before: Option<CreationTime>,
    ) -> Option<&SlotChangeAction> {
        self.slot_changes(inventory, slot, before)
            .max_by_key(|action| action.created_at())
            .and_then(Action::as_slot_change)
    }

    /// Settled balance sheet of every action.
    pub fn balance_sheet(&self) -> BalanceSheet {
        let mut sheet = BalanceSheet::from_actions(&self.actions);
        sheet.settle();
        sheet
    }

    /// Whether the batch is non-empty and conserves items.
    pub fn can_execute(&self) -> bool {
        !self.actions.is_empty() && self.balance_sheet().is_balanced()
    }

    /// Runs the protocol once.
    pub fn execute(&mut self, env: &mut TransactionEnv<'_>) -> TransactionOutcome {
        if let Some(rejection) = self.precheck(env) {
            return self.reject(env, rejection);
        }

        tracing::trace!(source = %self.source, actions = self.actions.len(), "validating transaction");
        for action in &self.actions {
            if !action.is_valid(self, &*env.inventories) {
                let rejection = Rejection::new(
                    TransactionPhase::Validate,
                    RejectReason::InvalidAction(action.id()),
                );
                return self.reject(env, rejection);
            }
        }

        if env.hooks.on_transaction(self.source, &self.actions).is_denied() {
            let rejection = Rejection::new(TransactionPhase::Authorize, RejectReason::Cancelled);
            return self.reject(env, rejection);
        }

        for action in &self.actions {
            if !action.on_pre_execute(env) {
                let rejection =
                    Rejection::new(TransactionPhase::PreExecute, RejectReason::Denied(action.id()));
                return self.reject(env, rejection);
            }
        }

        tracing::trace!(source = %self.source, "committing transaction");
        let mut report = CommitReport::default();
        for action in &self.actions {
            if action.execute(env) {
                action.on_execute_success(env);
                report.succeeded.push(action.id());
            } else {
                tracing::warn!(
                    source = %self.source,
                    action = %action.id(),
                    kind = action.as_snake_case(),
                    "action failed during commit"
                );
                action.on_execute_fail(env);
                report.failed.push(action.id());
            }
        }

        self.has_executed = true;
        TransactionOutcome::Committed(report)
    }

    fn precheck(&self, env: &TransactionEnv<'_>) -> Option<Rejection> {
        let reason = if self.has_executed {
            RejectReason::AlreadyExecuted
        } else if env.player.id() != self.source {
            RejectReason::SourceMismatch {
                expected: self.source,
                found: env.player.id(),
            }
        } else if self.actions.is_empty() {
            RejectReason::Empty
        } else {
            let sheet = self.balance_sheet();
            if sheet.is_balanced() {
                return None;
            }
            RejectReason::Unbalanced {
                have: sheet.have().to_vec(),
                need: sheet.need(),
            }
        };
        Some(Rejection::new(TransactionPhase::Precheck, reason))
    }

    fn reject(&self, env: &mut TransactionEnv<'_>, rejection: Rejection) -> TransactionOutcome {
        tracing::debug!(
            source = %self.source,
            phase = rejection.phase.as_str(),
            reason = %rejection.reason,
            "transaction rejected"
        );

        if rejection.phase.resyncs() {
            self.send_inventories(env);
        }
        TransactionOutcome::Rejected(rejection)
    }

    /// Resends the full contents of every involved inventory to the source.
    fn send_inventories(&self, env: &mut TransactionEnv<'_>) {
        for id in &self.inventories {
            if let Some(inventory) = env.inventories.inventory_mut(*id) {
                inventory.send_contents(self.source);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionClock;
    use crate::inventory::{Inventory, InventoryArena};
    use crate::item::{ItemKind, ItemStack};

    fn log(count: u16) -> ItemStack {
        ItemStack::new(ItemKind::LOG, 0, count)
    }

    #[test]
    fn duplicate_action_is_rejected() {
        let mut arena = InventoryArena::new();
        let chest = arena.create(4);
        let mut clock = ActionClock::new();
        let mut transaction = Transaction::new(ActorId(1), chest);

        let action = Action::slot_change(clock.stamp(), chest, 0, log(1));
        transaction.add_action(action.clone(), &arena).unwrap();

        assert_eq!(
            transaction.add_action(action.clone(), &arena),
            Err(TransactionError::DuplicateAction(action.id()))
        );
        assert_eq!(transaction.len(), 1);
    }

    #[test]
    fn unknown_inventory_is_rejected() {
        let arena = InventoryArena::new();
        let mut clock = ActionClock::new();
        let mut transaction = Transaction::new(ActorId(1), InventoryId(0));

        let action = Action::slot_change(clock.stamp(), InventoryId(5), 0, log(1));
        assert_eq!(
            transaction.add_action(action, &arena),
            Err(TransactionError::UnknownInventory(InventoryId(5)))
        );
    }

    #[test]
    fn action_limit_is_enforced() {
        let mut arena = InventoryArena::new();
        let chest = arena.create(4);
        let mut clock = ActionClock::new();
        let config = TransactionConfig::with_max_actions(1);
        let mut transaction = Transaction::with_config(ActorId(1), chest, &config);

        transaction
            .add_action(Action::slot_change(clock.stamp(), chest, 0, log(1)), &arena)
            .unwrap();
        assert_eq!(
            transaction.add_action(Action::slot_change(clock.stamp(), chest, 1, log(1)), &arena),
            Err(TransactionError::TooManyActions { limit: 1 })
        );
    }

    #[test]
    fn with_actions_honours_configured_limit() {
        let mut arena = InventoryArena::new();
        let chest = arena.create(4);
        let mut clock = ActionClock::new();
        let actions = [
            Action::slot_change(clock.stamp(), chest, 0, log(1)),
            Action::slot_change(clock.stamp(), chest, 1, log(1)),
        ];

        let result = Transaction::with_actions(
            ActorId(1),
            chest,
            actions.clone(),
            &arena,
            &TransactionConfig::with_max_actions(1),
        );
        assert_eq!(result.err(), Some(TransactionError::TooManyActions { limit: 1 }));

        let transaction =
            Transaction::with_actions(ActorId(1), chest, actions, &arena, &TransactionConfig::default())
                .unwrap();
        assert_eq!(transaction.len(), 2);
    }

    #[test]
    fn inventories_are_deduplicated_in_first_seen_order() {
        let mut arena = InventoryArena::new();
        let player = arena.create(36);
        let chest = arena.create(27);
        let mut clock = ActionClock::new();
        let mut transaction = Transaction::new(ActorId(1), player);

        for (inventory, slot) in [(chest, 0), (player, 3), (chest, 5)] {
            let action = Action::slot_change(clock.stamp(), inventory, slot, ItemStack::EMPTY);
            transaction.add_action(action, &arena).unwrap();
        }

        assert_eq!(transaction.inventories(), &[chest, player]);
    }

    #[test]
    fn slot_changes_filter_by_slot_and_time() {
        let mut arena = InventoryArena::new();
        let chest = arena.create(4);
        let mut clock = ActionClock::new();
        let mut transaction = Transaction::new(ActorId(1), chest);

        let first = Action::slot_change(clock.stamp(), chest, 0, log(2));
        let other_slot = Action::slot_change(clock.stamp(), chest, 1, log(1));
        let second = Action::slot_change(clock.stamp(), chest, 0, log(1));
        let cutoff = second.created_at();
        for action in [first.clone(), other_slot, second.clone()] {
            transaction.add_action(action, &arena).unwrap();
        }

        let all: Vec<_> = transaction.slot_changes(chest, 0, None).map(Action::id).collect();
        assert_eq!(all, vec![first.id(), second.id()]);

        let before: Vec<_> = transaction
            .slot_changes(chest, 0, Some(cutoff))
            .map(Action::id)
            .collect();
        assert_eq!(before, vec![first.id()]);
    }

    #[test]
    fn live_read_resolves_source_once() {
        let mut arena = InventoryArena::new();
        let chest = arena.insert_with(|id| {
            crate::inventory::SlotInventory::new(id, 4).with_item(2, log(3))
        });
        let mut clock = ActionClock::new();
        let mut transaction = Transaction::new(ActorId(1), chest);

        transaction
            .add_action(Action::slot_change(clock.stamp(), chest, 2, log(1)), &arena)
            .unwrap();
        arena.get_mut(chest).unwrap().set_item(2, log(64), false);

        let change = transaction.actions()[0].as_slot_change().unwrap();
        assert!(change.is_resolved());
        assert_eq!(change.source_item(), log(3));
    }
}
