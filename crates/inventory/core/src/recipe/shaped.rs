use arrayvec::ArrayVec;

use crate::config::TransactionConfig;
use crate::item::ItemStack;

use super::{RecipeError, collect_results};

const MAX_DIMENSION: usize = TransactionConfig::MAX_SHAPED_DIMENSION;

/// Recipe with a fixed grid layout.
///
/// Cells are stored row-major; empty cells hold [`ItemStack::EMPTY`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapedRecipe {
    width: usize,
    height: usize,
    cells: ArrayVec<ItemStack, { TransactionConfig::MAX_SHAPED_CELLS }>,
    results: Vec<ItemStack>,
}

impl ShapedRecipe {
    /// Builds a recipe from `rows` of cells.
    ///
    /// # Errors
    ///
    /// Fails when the grid is not 1 to 3 rows by 1 to 3 columns, when rows
    /// differ in length, or when every result is empty.
    pub fn new(
        rows: Vec<Vec<ItemStack>>,
        results: impl IntoIterator<Item = ItemStack>,
    ) -> Result<Self, RecipeError> {
        let height = rows.len();
        if !(1..=MAX_DIMENSION).contains(&height) {
            return Err(RecipeError::InvalidRowCount {
                rows: height,
                max: MAX_DIMENSION,
            });
        }

        let width = rows[0].len();
        if !(1..=MAX_DIMENSION).contains(&width) {
            return Err(RecipeError::InvalidColumnCount {
                columns: width,
                max: MAX_DIMENSION,
            });
        }

        let mut cells = ArrayVec::new();
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(RecipeError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            width,
            height,
            cells,
            results: collect_results(results)?,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y`; empty outside the grid.
    pub fn ingredient(&self, x: usize, y: usize) -> ItemStack {
        if x >= self.width || y >= self.height {
            return ItemStack::EMPTY;
        }
        self.cells[y * self.width + x].clone()
    }

    /// Non-empty cells in row-major order.
    pub fn ingredients(&self) -> Vec<ItemStack> {
        self.cells
            .iter()
            .filter(|cell| !cell.is_empty())
            .cloned()
            .collect()
    }

    pub fn results(&self) -> &[ItemStack] {
        &self.results
    }
}
