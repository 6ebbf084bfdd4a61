//! Cancellable pre-execution hooks.
//!
//! Hooks stand in for the server's event bus. They are consulted during the
//! authorize and pre-execute phases, before any inventory is touched, and can
//! veto the whole transaction by returning [`Verdict::Deny`].

use crate::action::{Action, CraftItemAction};
use crate::item::ItemStack;
use crate::player::ActorId;

/// Answer of a hook to a proposed operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verdict {
    #[default]
    Allow,
    Deny,
}

impl Verdict {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn is_denied(self) -> bool {
        matches!(self, Self::Deny)
    }
}

/// Listener for transaction-level, craft and drop intents.
///
/// Every method defaults to [`Verdict::Allow`]; implement only what you need.
pub trait TransactionHooks {
    /// Returns the priority of this hook when chained. Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    /// Called once per transaction with every action, after validation.
    fn on_transaction(&mut self, _source: ActorId, _actions: &[Action]) -> Verdict {
        Verdict::Allow
    }

    /// Called for each craft action before anything is committed.
    fn on_craft(&mut self, _source: ActorId, _craft: &CraftItemAction) -> Verdict {
        Verdict::Allow
    }

    /// Called for every stack a drop action would spawn.
    fn on_drop(&mut self, _source: ActorId, _item: &ItemStack) -> Verdict {
        Verdict::Allow
    }
}

/// Hook set that allows everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl TransactionHooks for AllowAll {}

/// Ordered collection of hooks; the first denial wins.
#[derive(Default)]
pub struct HookChain {
    hooks: Vec<Box<dyn TransactionHooks>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hook and keeps the chain sorted by priority (stable for ties).
    pub fn push(&mut self, hook: Box<dyn TransactionHooks>) {
        self.hooks.push(hook);
        self.hooks.sort_by_key(|hook| hook.priority());
    }

    #[must_use]
    pub fn with(mut self, hook: impl TransactionHooks + 'static) -> Self {
        self.push(Box::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    fn first_denial(&mut self, mut ask: impl FnMut(&mut dyn TransactionHooks) -> Verdict) -> Verdict {
        for hook in &mut self.hooks {
            if ask(hook.as_mut()).is_denied() {
                return Verdict::Deny;
            }
        }
        Verdict::Allow
    }
}

impl TransactionHooks for HookChain {
    fn on_transaction(&mut self, source: ActorId, actions: &[Action]) -> Verdict {
        self.first_denial(|hook| hook.on_transaction(source, actions))
    }

    fn on_craft(&mut self, source: ActorId, craft: &CraftItemAction) -> Verdict {
        self.first_denial(|hook| hook.on_craft(source, craft))
    }

    fn on_drop(&mut self, source: ActorId, item: &ItemStack) -> Verdict {
        self.first_denial(|hook| hook.on_drop(source, item))
    }
}
