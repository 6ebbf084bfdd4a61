//! Recipe catalog loader.

use std::collections::HashMap;
use std::path::Path;

use inventory_core::{
    FurnaceRecipe, ItemKind, ItemStack, Recipe, RecipeBook, RecipeId, ShapedRecipe,
    ShapelessRecipe, Variant,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A stack as written in data files.
///
/// `variant` defaults to `Exact(0)`; use `Any` for wildcard ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSpec {
    pub kind: u16,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default = "one")]
    pub count: u16,
}

fn one() -> u16 {
    1
}

impl StackSpec {
    pub fn to_stack(&self) -> ItemStack {
        let kind = ItemKind(self.kind);
        match self.variant {
            Variant::Exact(variant) => ItemStack::new(kind, variant, self.count),
            Variant::Any => ItemStack::wildcard(kind, self.count),
        }
    }
}

/// One recipe entry.
///
/// Shaped recipes are drawn as rows of symbols; each symbol is looked up in
/// `key`, and a space marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipeSpec {
    Shaped {
        name: String,
        shape: Vec<String>,
        key: HashMap<char, StackSpec>,
        results: Vec<StackSpec>,
    },
    Shapeless {
        name: String,
        ingredients: Vec<StackSpec>,
        results: Vec<StackSpec>,
    },
    Furnace {
        name: String,
        input: StackSpec,
        output: StackSpec,
    },
}

impl RecipeSpec {
    pub fn name(&self) -> &str {
        match self {
            RecipeSpec::Shaped { name, .. }
            | RecipeSpec::Shapeless { name, .. }
            | RecipeSpec::Furnace { name, .. } => name,
        }
    }

    /// Builds the engine recipe, validating its shape.
    pub fn to_recipe(&self) -> LoadResult<Recipe> {
        let recipe: Recipe = match self {
            RecipeSpec::Shaped {
                name,
                shape,
                key,
                results,
            } => {
                let rows = shape
                    .iter()
                    .map(|row| {
                        row.chars()
                            .map(|symbol| match symbol {
                                ' ' => Ok(ItemStack::EMPTY),
                                _ => key.get(&symbol).map(StackSpec::to_stack).ok_or_else(|| {
                                    anyhow::anyhow!(
                                        "Recipe '{}' uses symbol '{}' missing from its key",
                                        name,
                                        symbol
                                    )
                                }),
                            })
                            .collect::<LoadResult<Vec<_>>>()
                    })
                    .collect::<LoadResult<Vec<_>>>()?;

                ShapedRecipe::new(rows, results.iter().map(StackSpec::to_stack))
                    .map_err(|e| anyhow::anyhow!("Invalid recipe '{}': {}", name, e))?
                    .into()
            }
            RecipeSpec::Shapeless {
                name,
                ingredients,
                results,
            } => ShapelessRecipe::new(
                ingredients.iter().map(StackSpec::to_stack),
                results.iter().map(StackSpec::to_stack),
            )
            .map_err(|e| anyhow::anyhow!("Invalid recipe '{}': {}", name, e))?
            .into(),
            RecipeSpec::Furnace { input, output, .. } => {
                FurnaceRecipe::new(input.to_stack(), output.to_stack()).into()
            }
        };
        Ok(recipe)
    }
}

/// Recipe catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeCatalog {
    pub recipes: Vec<RecipeSpec>,
}

/// A recipe book plus the data-file name of every registered recipe.
#[derive(Debug, Default)]
pub struct LoadedRecipes {
    pub book: RecipeBook,
    pub names: HashMap<String, RecipeId>,
}

impl LoadedRecipes {
    pub fn id(&self, name: &str) -> Option<RecipeId> {
        self.names.get(name).copied()
    }
}

/// Loader for recipe catalogs from RON files.
pub struct RecipeLoader;

impl RecipeLoader {
    /// Load a recipe catalog from a RON file and register every entry.
    pub fn load(path: &Path) -> LoadResult<LoadedRecipes> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a recipe catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<LoadedRecipes> {
        let catalog: RecipeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse recipe catalog RON: {}", e))?;
        Self::build(&catalog)
    }

    /// Register every recipe of `catalog` in catalog order.
    ///
    /// Recipe names must be unique.
    pub fn build(catalog: &RecipeCatalog) -> LoadResult<LoadedRecipes> {
        let mut loaded = LoadedRecipes::default();
        for spec in &catalog.recipes {
            anyhow::ensure!(
                !loaded.names.contains_key(spec.name()),
                "Duplicate recipe name '{}'",
                spec.name()
            );

            let id = loaded.book.register(spec.to_recipe()?);
            loaded.names.insert(spec.name().to_owned(), id);
        }

        tracing::info!(recipes = loaded.book.len(), "loaded recipe catalog");
        Ok(loaded)
    }
}
