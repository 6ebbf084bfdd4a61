//! Item conservation check.

use crate::action::{Action, ActionKind};
use crate::item::{ItemStack, MatchFlags};

/// A produced stack waiting to be matched.
///
/// Only recipe ingredients may match by wildcard; every other need must be
/// met by an identical stack.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Need {
    item: ItemStack,
    ingredient: bool,
}

impl Need {
    fn is_wildcard(&self) -> bool {
        self.ingredient && self.item.has_any_variant()
    }

    fn accepts(&self, have: &ItemStack) -> bool {
        if self.ingredient {
            self.item.balances_with(have)
        } else {
            self.item.equals(have, MatchFlags::default())
        }
    }
}

/// Consumed ("have") and produced ("need") stacks of a batch.
///
/// [`BalanceSheet::settle`] cancels matching units on both sides. A batch is
/// balanced when nothing is left: every unit taken from somewhere was put
/// somewhere else, so the batch neither creates nor destroys items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceSheet {
    have: Vec<ItemStack>,
    need: Vec<Need>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects source items as "have" and target items as "need".
    ///
    /// Craft targets are recorded as ingredients.
    pub fn from_actions<'a>(actions: impl IntoIterator<Item = &'a Action>) -> Self {
        let mut sheet = Self::new();
        for action in actions {
            for item in action.source_items() {
                sheet.add_have(item);
            }
            let ingredient = matches!(action.kind(), ActionKind::Craft(_));
            for item in action.target_items() {
                if ingredient {
                    sheet.add_ingredient(item);
                } else {
                    sheet.add_need(item);
                }
            }
        }
        sheet
    }

    pub fn add_have(&mut self, item: ItemStack) {
        if !item.is_empty() {
            self.have.push(item);
        }
    }

    /// Adds a need that only an identical stack can meet.
    pub fn add_need(&mut self, item: ItemStack) {
        self.push_need(item, false);
    }

    /// Adds a recipe ingredient; a wildcard variant accepts any variant.
    pub fn add_ingredient(&mut self, item: ItemStack) {
        self.push_need(item, true);
    }

    fn push_need(&mut self, item: ItemStack, ingredient: bool) {
        if !item.is_empty() {
            self.need.push(Need { item, ingredient });
        }
    }

    /// Pairs equal stacks across the two sides and subtracts the smaller count
    /// from both, dropping stacks that reach zero.
    ///
    /// Wildcard ingredients settle last, after every concrete need has taken
    /// its exact match.
    pub fn settle(&mut self) {
        self.need.sort_by_key(Need::is_wildcard);

        for need in &mut self.need {
            for have in &mut self.have {
                if need.item.is_empty() {
                    break;
                }
                if have.is_empty() || !need.accepts(have) {
                    continue;
                }

                let amount = have.count().min(need.item.count());
                *have = have.pop(amount).1;
                need.item = need.item.pop(amount).1;
            }
        }

        self.have.retain(|item| !item.is_empty());
        self.need.retain(|need| !need.item.is_empty());
    }

    /// Consumed stacks not (yet) matched by a production.
    pub fn have(&self) -> &[ItemStack] {
        &self.have
    }

    /// Produced stacks not (yet) matched by a consumption.
    pub fn need(&self) -> Vec<ItemStack> {
        self.need.iter().map(|need| need.item.clone()).collect()
    }

    pub fn is_balanced(&self) -> bool {
        self.have.is_empty() && self.need.is_empty()
    }
}
