use crate::item::{ItemKind, ItemStack};
use crate::player::Achievement;
use crate::recipe::{Recipe, RecipeId};
use crate::transaction::TransactionEnv;

use super::ActionError;

/// Applies a crafting recipe.
///
/// The action itself mutates nothing: the grid and output slot writes travel
/// as slot changes in the same batch. It contributes the recipe's results as
/// consumed items and its ingredients as produced items, which is what lets
/// the balance check pair "ingredients left the grid" with "result appeared".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CraftItemAction {
    recipe: RecipeId,
    results: Vec<ItemStack>,
    ingredients: Vec<ItemStack>,
}

impl CraftItemAction {
    /// # Errors
    ///
    /// [`ActionError::NotCraftingRecipe`] for furnace recipes.
    pub fn new(id: RecipeId, recipe: &Recipe) -> Result<Self, ActionError> {
        if !recipe.is_crafting() {
            return Err(ActionError::NotCraftingRecipe {
                recipe: id,
                kind: recipe.as_snake_case(),
            });
        }

        Ok(Self {
            recipe: id,
            results: recipe.results(),
            ingredients: recipe.ingredients(),
        })
    }

    pub fn recipe(&self) -> RecipeId {
        self.recipe
    }

    pub fn results(&self) -> &[ItemStack] {
        &self.results
    }

    pub fn ingredients(&self) -> &[ItemStack] {
        &self.ingredients
    }

    pub(super) fn on_pre_execute(&self, env: &mut TransactionEnv<'_>) -> bool {
        let source = env.player.id();
        env.hooks.on_craft(source, self).is_allowed()
    }

    pub(super) fn on_execute_success(&self, env: &mut TransactionEnv<'_>) {
        for result in &self.results {
            if let Some(achievement) = achievement_for(result.kind()) {
                env.player.award_achievement(achievement);
            }
        }
    }
}

/// Achievement unlocked by crafting an item of `kind`, if any.
pub fn achievement_for(kind: ItemKind) -> Option<Achievement> {
    let achievement = match kind {
        ItemKind::CRAFTING_TABLE => Achievement::BuildWorkBench,
        ItemKind::WOODEN_PICKAXE => Achievement::BuildPickaxe,
        ItemKind::FURNACE => Achievement::BuildFurnace,
        ItemKind::WOODEN_HOE => Achievement::BuildHoe,
        ItemKind::BREAD => Achievement::MakeBread,
        ItemKind::CAKE => Achievement::BakeCake,
        ItemKind::STONE_PICKAXE
        | ItemKind::GOLDEN_PICKAXE
        | ItemKind::IRON_PICKAXE
        | ItemKind::DIAMOND_PICKAXE => Achievement::BuildBetterPickaxe,
        ItemKind::WOODEN_SWORD => Achievement::BuildSword,
        ItemKind::DIAMOND => Achievement::Diamond,
        _ => return None,
    };
    Some(achievement)
}
