//! The actor that proposes a transaction.

use std::fmt;

use crate::inventory::{InventoryId, SlotIndex};
use crate::item::ItemStack;

/// Unique identifier of a connected actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Progress milestones awarded for crafting particular items.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "camelCase")]
pub enum Achievement {
    BuildWorkBench,
    BuildPickaxe,
    BuildFurnace,
    BuildHoe,
    MakeBread,
    BakeCake,
    BuildBetterPickaxe,
    BuildSword,
    Diamond,
}

/// Side-effect entry point for the transaction's source.
///
/// Implemented by the server's session/player type. The engine calls these
/// only during the commit phase.
pub trait Player {
    fn id(&self) -> ActorId;

    /// Handle of the player's own inventory (hotbar + main slots).
    fn inventory_id(&self) -> InventoryId;

    /// Spawns `item` into the world in front of the player.
    fn drop_item(&mut self, item: ItemStack);

    /// Points hotbar slot `hotbar_slot` at `inventory_slot`.
    fn equip_item(&mut self, hotbar_slot: u8, inventory_slot: SlotIndex);

    /// Sets the "client is mid-action" flag broadcast to other players.
    fn set_action_flag(&mut self, value: bool);

    fn award_achievement(&mut self, achievement: Achievement);
}
