use arrayvec::ArrayVec;

use crate::config::TransactionConfig;
use crate::item::ItemStack;

use super::{RecipeError, collect_results};

const MAX_INGREDIENTS: usize = TransactionConfig::MAX_SHAPELESS_INGREDIENTS;

/// Recipe whose ingredients may sit anywhere in the grid.
///
/// Ingredients are stored as single units: a `3x planks` argument becomes
/// three one-plank entries, and the total may not exceed the grid size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapelessRecipe {
    ingredients: ArrayVec<ItemStack, MAX_INGREDIENTS>,
    results: Vec<ItemStack>,
}

impl ShapelessRecipe {
    /// # Errors
    ///
    /// [`RecipeError::TooManyIngredients`] when the ingredient units exceed the
    /// grid, [`RecipeError::NoResults`] when every result is empty.
    pub fn new(
        ingredients: impl IntoIterator<Item = ItemStack>,
        results: impl IntoIterator<Item = ItemStack>,
    ) -> Result<Self, RecipeError> {
        let mut recipe = Self {
            ingredients: ArrayVec::new(),
            results: collect_results(results)?,
        };
        for ingredient in ingredients {
            recipe.add_ingredient(&ingredient)?;
        }
        Ok(recipe)
    }

    /// Appends `item.count()` single-unit ingredients.
    pub fn add_ingredient(&mut self, item: &ItemStack) -> Result<(), RecipeError> {
        let count = usize::from(item.count());
        if self.ingredients.len() + count > MAX_INGREDIENTS {
            return Err(RecipeError::TooManyIngredients {
                count: self.ingredients.len() + count,
                max: MAX_INGREDIENTS,
            });
        }

        let unit = item.with_count(1);
        for _ in 0..count {
            self.ingredients.push(unit.clone());
        }
        Ok(())
    }

    pub fn ingredients(&self) -> &[ItemStack] {
        &self.ingredients
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn results(&self) -> &[ItemStack] {
        &self.results
    }
}
