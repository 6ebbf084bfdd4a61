//! Recipes and the recipe book.
//!
//! The transaction engine only needs a recipe's ingredient list and results.
//! Matching a client's crafting grid against the book is the caller's job;
//! the book here is plain id-addressed storage owned by the server process.
mod furnace;
mod shaped;
mod shapeless;

pub use furnace::FurnaceRecipe;
pub use shaped::ShapedRecipe;
pub use shapeless::ShapelessRecipe;

use std::fmt;

use crate::error::{EngineError, ErrorSeverity};
use crate::item::ItemStack;

/// Handle of a recipe inside a [`RecipeBook`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeId(pub u32);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recipe#{}", self.0)
    }
}

/// Errors raised while constructing a recipe.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecipeError {
    #[error("shapeless recipes cannot have more than {max} ingredients (got {count})")]
    TooManyIngredients { count: usize, max: usize },

    #[error("shaped recipes may only have 1 to {max} rows, not {rows}")]
    InvalidRowCount { rows: usize, max: usize },

    #[error("shaped recipes may only have 1 to {max} columns, not {columns}")]
    InvalidColumnCount { columns: usize, max: usize },

    #[error("shaped recipe row {row} has {found} cells (expected {expected})")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("recipe has no results")]
    NoResults,
}

impl EngineError for RecipeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooManyIngredients { .. } => "RECIPE_TOO_MANY_INGREDIENTS",
            Self::InvalidRowCount { .. } => "RECIPE_INVALID_ROW_COUNT",
            Self::InvalidColumnCount { .. } => "RECIPE_INVALID_COLUMN_COUNT",
            Self::RaggedRow { .. } => "RECIPE_RAGGED_ROW",
            Self::NoResults => "RECIPE_NO_RESULTS",
        }
    }
}

/// Collects the non-empty stacks of `results`, failing if none remain.
pub(crate) fn collect_results(
    results: impl IntoIterator<Item = ItemStack>,
) -> Result<Vec<ItemStack>, RecipeError> {
    let results: Vec<_> = results.into_iter().filter(|item| !item.is_empty()).collect();
    if results.is_empty() {
        return Err(RecipeError::NoResults);
    }
    Ok(results)
}

/// Every recipe shape known to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recipe {
    Shaped(ShapedRecipe),
    Shapeless(ShapelessRecipe),
    Furnace(FurnaceRecipe),
}

impl Recipe {
    /// Stacks consumed by one craft.
    pub fn ingredients(&self) -> Vec<ItemStack> {
        match self {
            Recipe::Shaped(recipe) => recipe.ingredients(),
            Recipe::Shapeless(recipe) => recipe.ingredients().to_vec(),
            Recipe::Furnace(recipe) => vec![recipe.input().clone()],
        }
    }

    /// Stacks produced by one craft.
    pub fn results(&self) -> Vec<ItemStack> {
        match self {
            Recipe::Shaped(recipe) => recipe.results().to_vec(),
            Recipe::Shapeless(recipe) => recipe.results().to_vec(),
            Recipe::Furnace(recipe) => vec![recipe.output().clone()],
        }
    }

    /// Whether this recipe can back a crafting-grid action.
    pub fn is_crafting(&self) -> bool {
        !matches!(self, Recipe::Furnace(_))
    }

    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Recipe::Shaped(_) => "shaped",
            Recipe::Shapeless(_) => "shapeless",
            Recipe::Furnace(_) => "furnace",
        }
    }
}

impl From<ShapedRecipe> for Recipe {
    fn from(recipe: ShapedRecipe) -> Self {
        Self::Shaped(recipe)
    }
}

impl From<ShapelessRecipe> for Recipe {
    fn from(recipe: ShapelessRecipe) -> Self {
        Self::Shapeless(recipe)
    }
}

impl From<FurnaceRecipe> for Recipe {
    fn from(recipe: FurnaceRecipe) -> Self {
        Self::Furnace(recipe)
    }
}

/// Id-addressed recipe storage.
///
/// Ids come from the book's own counter, so two books never share state.
#[derive(Clone, Debug, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `recipe` and returns its id.
    pub fn register(&mut self, recipe: impl Into<Recipe>) -> RecipeId {
        let id = RecipeId(self.recipes.len() as u32);
        self.recipes.push(recipe.into());
        id
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecipeId, &Recipe)> {
        self.recipes
            .iter()
            .enumerate()
            .map(|(index, recipe)| (RecipeId(index as u32), recipe))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
