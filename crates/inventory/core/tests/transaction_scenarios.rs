//! End-to-end transaction scenarios against in-memory inventories.
mod common;

use common::{CancelAll, DenyDrops, OTHER, PLAYER, World, stack};
use inventory_core::{
    Action, ActorId, ItemKind, ItemStack, RejectReason, SyncMessage, TransactionEnv,
    TransactionError, TransactionPhase,
};

fn phase_and_reason(
    outcome: &inventory_core::TransactionOutcome,
) -> (TransactionPhase, RejectReason) {
    let rejection = outcome.rejection().expect("transaction should be rejected");
    (rejection.phase, rejection.reason.clone())
}

/// Moving a full stack from a chest into the player's inventory.
#[test]
fn move_stack_between_inventories() {
    let mut world = World::new();
    world.put(world.chest, 0, stack(ItemKind::LOG, 5));

    let take = world.slot_change(world.chest, 0, ItemStack::EMPTY);
    let place = world.slot_change(world.inventory, 0, stack(ItemKind::LOG, 5));
    let mut transaction = world.transaction([take.clone(), place.clone()]);
    assert!(transaction.can_execute());

    let outcome = world.execute(&mut transaction);
    let report = outcome.report().expect("transaction should commit");
    assert_eq!(report.succeeded, vec![take.id(), place.id()]);
    assert!(report.is_complete());

    assert!(world.item(world.chest, 0).is_empty());
    assert_eq!(world.item(world.inventory, 0), stack(ItemKind::LOG, 5));
    assert!(transaction.has_executed());
}

/// Only other viewers are told about committed slots; the source already
/// predicted them.
#[test]
fn commit_notifies_viewers_except_source() {
    let mut world = World::new();
    world.put(world.chest, 4, stack(ItemKind::DIAMOND, 2));

    let take = world.slot_change(world.chest, 4, ItemStack::EMPTY);
    let place = world.slot_change(world.inventory, 9, stack(ItemKind::DIAMOND, 2));
    let mut transaction = world.transaction([take, place]);
    assert!(world.execute(&mut transaction).is_committed());

    let chest_messages = world.take_outbox(world.chest);
    assert_eq!(
        chest_messages,
        vec![SyncMessage::Slot {
            to: vec![OTHER],
            inventory: world.chest,
            slot: 4,
            item: ItemStack::EMPTY,
        }]
    );
    assert!(world.take_outbox(world.inventory).is_empty());
}

#[test]
fn empty_transaction_is_rejected_without_resync() {
    let mut world = World::new();
    let mut transaction = world.transaction([]);
    assert!(!transaction.can_execute());

    let outcome = world.execute(&mut transaction);
    assert_eq!(
        phase_and_reason(&outcome),
        (TransactionPhase::Precheck, RejectReason::Empty)
    );
    assert!(!transaction.has_executed());
}

/// A lone slot change creates items out of nothing.
#[test]
fn unbalanced_transaction_changes_nothing() {
    let mut world = World::new();
    let conjure = world.slot_change(world.inventory, 0, stack(ItemKind::DIAMOND, 64));
    let mut transaction = world.transaction([conjure]);
    assert!(!transaction.can_execute());

    let outcome = world.execute(&mut transaction);
    assert_eq!(
        phase_and_reason(&outcome),
        (
            TransactionPhase::Precheck,
            RejectReason::Unbalanced {
                have: vec![],
                need: vec![stack(ItemKind::DIAMOND, 64)],
            }
        )
    );
    assert!(world.item(world.inventory, 0).is_empty());
    assert!(world.take_outbox(world.inventory).is_empty());
}

/// A wildcard written into a slot cannot launder a damaged tool into a new one.
#[test]
fn wildcard_slot_change_cannot_swap_variants() {
    let mut world = World::new();
    let worn = ItemStack::new(ItemKind::DIAMOND_PICKAXE, 1500, 1);
    world.put(world.inventory, 0, worn.clone());

    let blur = world.slot_change(
        world.inventory,
        0,
        ItemStack::wildcard(ItemKind::DIAMOND_PICKAXE, 1),
    );
    let repair = world.slot_change(
        world.inventory,
        0,
        ItemStack::new(ItemKind::DIAMOND_PICKAXE, 0, 1),
    );
    let mut transaction = world.transaction([blur, repair]);
    assert!(!transaction.can_execute());

    let outcome = world.execute(&mut transaction);
    assert_eq!(
        phase_and_reason(&outcome),
        (
            TransactionPhase::Precheck,
            RejectReason::Unbalanced {
                have: vec![worn.clone()],
                need: vec![ItemStack::new(ItemKind::DIAMOND_PICKAXE, 0, 1)],
            }
        )
    );
    assert_eq!(world.item(world.inventory, 0), worn);
}

/// Splitting a stack and then moving part of it again within one batch.
#[test]
fn chained_changes_resolve_against_previous_target() {
    let mut world = World::new();
    world.put(world.chest, 0, stack(ItemKind::LOG, 5));

    let take = world.slot_change(world.chest, 0, stack(ItemKind::LOG, 2));
    let place = world.slot_change(world.inventory, 0, stack(ItemKind::LOG, 3));
    let split = world.slot_change(world.inventory, 0, stack(ItemKind::LOG, 1));
    let spill = world.slot_change(world.inventory, 1, stack(ItemKind::LOG, 2));
    let mut transaction = world.transaction([take, place, split, spill]);

    let resolved = transaction.actions()[2]
        .as_slot_change()
        .expect("slot change");
    assert_eq!(resolved.source_item(), stack(ItemKind::LOG, 3));
    assert!(transaction.can_execute());

    assert!(world.execute(&mut transaction).is_committed());
    assert_eq!(world.item(world.chest, 0), stack(ItemKind::LOG, 2));
    assert_eq!(world.item(world.inventory, 0), stack(ItemKind::LOG, 1));
    assert_eq!(world.item(world.inventory, 1), stack(ItemKind::LOG, 2));
}

/// Another player took from the chest after the batch was built.
#[test]
fn stale_slot_rejects_and_resyncs() {
    let mut world = World::new();
    world.put(world.chest, 0, stack(ItemKind::LOG, 5));

    let take = world.slot_change(world.chest, 0, ItemStack::EMPTY);
    let place = world.slot_change(world.inventory, 0, stack(ItemKind::LOG, 5));
    let take_id = take.id();
    let mut transaction = world.transaction([take, place]);

    world.put(world.chest, 0, stack(ItemKind::LOG, 4));
    let outcome = world.execute(&mut transaction);
    assert_eq!(
        phase_and_reason(&outcome),
        (TransactionPhase::Validate, RejectReason::InvalidAction(take_id))
    );

    assert_eq!(world.item(world.chest, 0), stack(ItemKind::LOG, 4));
    assert!(world.item(world.inventory, 0).is_empty());

    for inventory in [world.chest, world.inventory] {
        let messages = world.take_outbox(inventory);
        assert_eq!(messages.len(), 1);
        assert!(matches!(
            &messages[0],
            SyncMessage::Contents { to, .. } if *to == PLAYER
        ));
    }
}

#[test]
fn transaction_executes_at_most_once() {
    let mut world = World::new();
    world.put(world.chest, 0, stack(ItemKind::STICK, 8));

    let take = world.slot_change(world.chest, 0, ItemStack::EMPTY);
    let place = world.slot_change(world.inventory, 0, stack(ItemKind::STICK, 8));
    let mut transaction = world.transaction([take, place]);
    assert!(world.execute(&mut transaction).is_committed());

    let again = world.execute(&mut transaction);
    assert_eq!(
        phase_and_reason(&again),
        (TransactionPhase::Precheck, RejectReason::AlreadyExecuted)
    );

    let late = world.slot_change(world.inventory, 1, ItemStack::EMPTY);
    assert_eq!(
        transaction.add_action(late, &world.arena),
        Err(TransactionError::AlreadyExecuted)
    );
}

/// Throwing a stack that a drop hook refuses leaves the slot untouched.
#[test]
fn denied_drop_cancels_whole_batch() {
    let mut world = World::new().with_hook(DenyDrops);
    world.put(world.inventory, 0, stack(ItemKind::LOG, 5));

    let take = world.slot_change(world.inventory, 0, ItemStack::EMPTY);
    let throw =
        Action::drop_items(world.stamp(), [stack(ItemKind::LOG, 5)]).expect("non-empty drop");
    let throw_id = throw.id();
    let mut transaction = world.transaction([take, throw]);
    assert!(transaction.can_execute());

    let outcome = world.execute(&mut transaction);
    assert_eq!(
        phase_and_reason(&outcome),
        (TransactionPhase::PreExecute, RejectReason::Denied(throw_id))
    );
    assert_eq!(world.item(world.inventory, 0), stack(ItemKind::LOG, 5));
    assert!(world.player.dropped.is_empty());
    assert_eq!(world.take_outbox(world.inventory).len(), 1);
    assert!(!transaction.has_executed());
}

#[test]
fn allowed_drop_spawns_items() {
    let mut world = World::new();
    world.put(world.inventory, 2, stack(ItemKind::STICK, 3));

    let take = world.slot_change(world.inventory, 2, stack(ItemKind::STICK, 1));
    let throw =
        Action::drop_items(world.stamp(), [stack(ItemKind::STICK, 2)]).expect("non-empty drop");
    let mut transaction = world.transaction([take, throw]);

    assert!(world.execute(&mut transaction).is_committed());
    assert_eq!(world.player.dropped, vec![stack(ItemKind::STICK, 2)]);
    assert_eq!(world.item(world.inventory, 2), stack(ItemKind::STICK, 1));
}

#[test]
fn transaction_hook_can_cancel() {
    let mut world = World::new().with_hook(CancelAll);
    world.put(world.chest, 0, stack(ItemKind::LOG, 1));

    let take = world.slot_change(world.chest, 0, ItemStack::EMPTY);
    let place = world.slot_change(world.inventory, 0, stack(ItemKind::LOG, 1));
    let mut transaction = world.transaction([take, place]);

    let outcome = world.execute(&mut transaction);
    assert_eq!(
        phase_and_reason(&outcome),
        (TransactionPhase::Authorize, RejectReason::Cancelled)
    );
    assert_eq!(world.item(world.chest, 0), stack(ItemKind::LOG, 1));
    assert_eq!(world.take_outbox(world.chest).len(), 1);
}

/// Executing with a different player than the one that built the batch.
#[test]
fn source_mismatch_is_rejected() {
    let mut world = World::new();
    world.put(world.chest, 0, stack(ItemKind::LOG, 1));
    let take = world.slot_change(world.chest, 0, ItemStack::EMPTY);
    let place = world.slot_change(world.inventory, 0, stack(ItemKind::LOG, 1));
    let mut transaction = world.transaction([take, place]);

    world.player.id = ActorId(9);
    let mut env = TransactionEnv::new(&mut world.player, &mut world.arena, &mut world.hooks);
    let outcome = transaction.execute(&mut env);
    assert_eq!(
        phase_and_reason(&outcome),
        (
            TransactionPhase::Precheck,
            RejectReason::SourceMismatch {
                expected: PLAYER,
                found: ActorId(9),
            }
        )
    );
}

/// A write that fails during commit is reported, earlier writes stay.
#[test]
fn commit_failure_is_reported_not_rolled_back() {
    let mut world = World::new();
    world.put(world.chest, 0, stack(ItemKind::LOG, 5));
    world
        .arena
        .get_mut(world.inventory)
        .expect("player inventory")
        .lock_slot(1);

    let take = world.slot_change(world.chest, 0, ItemStack::EMPTY);
    let place = world.slot_change(world.inventory, 1, stack(ItemKind::LOG, 5));
    let (take_id, place_id) = (take.id(), place.id());
    let mut transaction = world.transaction([take, place]);

    let outcome = world.execute(&mut transaction);
    let report = outcome.report().expect("commit never aborts");
    assert_eq!(report.succeeded, vec![take_id]);
    assert_eq!(report.failed, vec![place_id]);
    assert!(!report.is_complete());

    assert!(world.item(world.chest, 0).is_empty());
    assert!(world.item(world.inventory, 1).is_empty());
    assert_eq!(
        world.take_outbox(world.inventory),
        vec![SyncMessage::Slot {
            to: vec![PLAYER],
            inventory: world.inventory,
            slot: 1,
            item: ItemStack::EMPTY,
        }]
    );
}

#[test]
fn equip_checks_the_selected_slot() {
    let mut world = World::new();
    world.put(world.inventory, 12, stack(ItemKind::WOODEN_SWORD, 1));

    let equip = Action::equip(world.stamp(), 0, 12, stack(ItemKind::WOODEN_SWORD, 1))
        .expect("hotbar slot in range");
    let mut transaction = world.transaction([equip]);
    assert!(transaction.can_execute());
    assert!(world.execute(&mut transaction).is_committed());
    assert_eq!(world.player.equipped, vec![(0, 12)]);
    assert_eq!(world.player.action_flag, Some(false));

    let wrong = Action::equip(world.stamp(), 1, 12, stack(ItemKind::DIAMOND, 1))
        .expect("hotbar slot in range");
    let wrong_id = wrong.id();
    let mut transaction = world.transaction([wrong]);
    let outcome = world.execute(&mut transaction);
    assert_eq!(
        phase_and_reason(&outcome),
        (TransactionPhase::Validate, RejectReason::InvalidAction(wrong_id))
    );
    assert_eq!(world.player.equipped, vec![(0, 12)]);
}

/// Moving a sword into the hotbar and selecting it in the same batch.
#[test]
fn equip_sees_earlier_changes_in_the_batch() {
    let mut world = World::new();
    world.put(world.chest, 3, stack(ItemKind::WOODEN_SWORD, 1));

    let take = world.slot_change(world.chest, 3, ItemStack::EMPTY);
    let place = world.slot_change(world.inventory, 4, stack(ItemKind::WOODEN_SWORD, 1));
    let equip = Action::equip(world.stamp(), 4, 4, stack(ItemKind::WOODEN_SWORD, 1))
        .expect("hotbar slot in range");
    let mut transaction = world.transaction([take, place, equip]);

    assert!(world.execute(&mut transaction).is_committed());
    assert_eq!(world.player.equipped, vec![(4, 4)]);
    assert_eq!(world.item(world.inventory, 4), stack(ItemKind::WOODEN_SWORD, 1));
}
