//! Data-driven content for the inventory engine.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Recipe catalogs (shaped, shapeless and furnace recipes, via RON)
//! - Transaction configuration (via TOML)
//!
//! Loaded content is handed to `inventory-core` as a [`inventory_core::RecipeBook`]
//! and a [`inventory_core::TransactionConfig`]; it never appears in transaction state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, LoadedRecipes, RecipeCatalog, RecipeLoader,
    RecipeSpec, StackSpec,
};
