/// Transaction engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransactionConfig {
    /// Upper bound on actions accepted into a single transaction.
    /// A client batch larger than this is rejected while it is being built.
    pub max_actions: usize,
}

impl TransactionConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of hotbar slots a player can equip from.
    pub const HOTBAR_SIZE: u8 = 9;
    /// Maximum number of single-unit ingredients in a shapeless recipe.
    pub const MAX_SHAPELESS_INGREDIENTS: usize = 9;
    /// Maximum rows and columns of a shaped recipe grid.
    pub const MAX_SHAPED_DIMENSION: usize = 3;
    pub const MAX_SHAPED_CELLS: usize = Self::MAX_SHAPED_DIMENSION * Self::MAX_SHAPED_DIMENSION;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ACTIONS: usize = 64;

    pub fn new() -> Self {
        Self {
            max_actions: Self::DEFAULT_MAX_ACTIONS,
        }
    }

    pub fn with_max_actions(max_actions: usize) -> Self {
        Self { max_actions }
    }
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self::new()
    }
}
