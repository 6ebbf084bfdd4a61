use crate::item::ItemStack;

/// Smelts one input stack into one output stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FurnaceRecipe {
    input: ItemStack,
    output: ItemStack,
}

impl FurnaceRecipe {
    pub fn new(input: ItemStack, output: ItemStack) -> Self {
        Self { input, output }
    }

    pub fn input(&self) -> &ItemStack {
        &self.input
    }

    pub fn output(&self) -> &ItemStack {
        &self.output
    }
}
