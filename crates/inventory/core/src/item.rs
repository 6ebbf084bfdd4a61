//! Item stacks and the equality policies used to compare them.
//!
//! [`ItemStack`] is an immutable value. Changing a count produces a new stack
//! (see [`ItemStack::with_count`] and [`ItemStack::pop`]), so stacks can be
//! handed around freely without defensive copies.

use std::fmt;

use bitflags::bitflags;

/// Numeric item kind (block or item id). `0` is air.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemKind(pub u16);

impl ItemKind {
    pub const AIR: Self = Self(0);
    pub const PLANKS: Self = Self(5);
    pub const LOG: Self = Self(17);
    pub const CRAFTING_TABLE: Self = Self(58);
    pub const FURNACE: Self = Self(61);
    pub const STICK: Self = Self(280);
    pub const IRON_PICKAXE: Self = Self(257);
    pub const DIAMOND: Self = Self(264);
    pub const WOODEN_SWORD: Self = Self(268);
    pub const WOODEN_PICKAXE: Self = Self(270);
    pub const STONE_PICKAXE: Self = Self(274);
    pub const DIAMOND_PICKAXE: Self = Self(278);
    pub const GOLDEN_PICKAXE: Self = Self(285);
    pub const WOODEN_HOE: Self = Self(290);
    pub const WHEAT: Self = Self(296);
    pub const BREAD: Self = Self(297);
    pub const CAKE: Self = Self(354);

    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == Self::AIR.0
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Damage/metadata value of a stack.
///
/// Recipes use [`Variant::Any`] for ingredients that accept every variant
/// (e.g. "any planks").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    Exact(u16),
    Any,
}

impl Default for Variant {
    fn default() -> Self {
        Self::Exact(0)
    }
}

/// Opaque auxiliary data attached to a stack (enchantments, custom names).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTag(pub Box<[u8]>);

impl ItemTag {
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

bitflags! {
    /// Which properties besides the kind must match for two stacks to be equal.
    ///
    /// Counts are never part of the comparison; use [`ItemStack::equals_exact`]
    /// when they matter.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MatchFlags: u8 {
        const VARIANT = 1 << 0;
        const TAGS    = 1 << 1;
    }
}

impl Default for MatchFlags {
    fn default() -> Self {
        Self::VARIANT | Self::TAGS
    }
}

/// A stack of identical items.
///
/// Decoding goes through [`RawStack`], so air or a zero count arrives as
/// [`ItemStack::EMPTY`] and wildcard variants are refused.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawStack"))]
pub struct ItemStack {
    kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    variant: Variant,
    count: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    tag: Option<ItemTag>,
}

impl ItemStack {
    /// The canonical empty slot content.
    pub const EMPTY: Self = Self {
        kind: ItemKind::AIR,
        variant: Variant::Exact(0),
        count: 0,
        tag: None,
    };

    /// Creates a stack with an exact variant. Air or a zero count yields [`ItemStack::EMPTY`].
    pub fn new(kind: ItemKind, variant: u16, count: u16) -> Self {
        Self::build(kind, Variant::Exact(variant), count)
    }

    /// Creates a stack that matches any variant of `kind`.
    pub fn wildcard(kind: ItemKind, count: u16) -> Self {
        Self::build(kind, Variant::Any, count)
    }

    fn build(kind: ItemKind, variant: Variant, count: u16) -> Self {
        if kind.is_air() || count == 0 {
            return Self::EMPTY;
        }
        Self {
            kind,
            variant,
            count,
            tag: None,
        }
    }

    /// Returns a copy of this stack carrying `tag`.
    #[must_use]
    pub fn with_tag(&self, tag: ItemTag) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        Self {
            tag: Some(tag),
            ..self.clone()
        }
    }

    /// Returns a copy of this stack with a different count.
    #[must_use]
    pub fn with_count(&self, count: u16) -> Self {
        if self.is_empty() || count == 0 {
            return Self::EMPTY;
        }
        Self {
            count,
            ..self.clone()
        }
    }

    /// Splits `amount` units off this stack.
    ///
    /// Returns `(popped, remainder)`. The popped stack holds at most
    /// `self.count()` units.
    #[must_use]
    pub fn pop(&self, amount: u16) -> (Self, Self) {
        let taken = amount.min(self.count);
        (self.with_count(taken), self.with_count(self.count - taken))
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn tag(&self) -> Option<&ItemTag> {
        self.tag.as_ref()
    }

    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }

    pub fn has_any_variant(&self) -> bool {
        matches!(self.variant, Variant::Any)
    }

    /// Air or an exhausted stack.
    pub fn is_empty(&self) -> bool {
        self.kind.is_air() || self.count == 0
    }

    /// Compares identity under `flags`; counts are ignored.
    pub fn equals(&self, other: &Self, flags: MatchFlags) -> bool {
        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }

        self.kind == other.kind
            && (!flags.contains(MatchFlags::VARIANT) || self.variant == other.variant)
            && (!flags.contains(MatchFlags::TAGS) || self.tag == other.tag)
    }

    /// Kind, variant, tag and count must all match.
    pub fn equals_exact(&self, other: &Self) -> bool {
        self.equals(other, MatchFlags::default()) && self.count == other.count
    }

    /// Whether `other` satisfies `self` taken as a recipe ingredient.
    ///
    /// Tags always matter. The variant is skipped only when `self` is a
    /// wildcard; a wildcard `other` never stands in for a concrete variant.
    pub fn balances_with(&self, other: &Self) -> bool {
        let mut flags = MatchFlags::TAGS;
        if !self.has_any_variant() {
            flags |= MatchFlags::VARIANT;
        }
        self.equals(other, flags)
    }
}

/// Errors raised while decoding a stack.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("item {kind} carries a wildcard variant outside a recipe")]
    WildcardVariant { kind: ItemKind },
}

impl crate::error::EngineError for ItemError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WildcardVariant { .. } => "ITEM_WILDCARD_VARIANT",
        }
    }
}

/// Wire form of an [`ItemStack`] before normalization.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
pub struct RawStack {
    kind: ItemKind,
    #[serde(default)]
    variant: Variant,
    count: u16,
    #[serde(default)]
    tag: Option<ItemTag>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawStack> for ItemStack {
    type Error = ItemError;

    fn try_from(raw: RawStack) -> Result<Self, Self::Error> {
        let stack = match raw.variant {
            Variant::Exact(variant) => Self::new(raw.kind, variant, raw.count),
            Variant::Any if raw.kind.is_air() || raw.count == 0 => Self::EMPTY,
            Variant::Any => return Err(ItemError::WildcardVariant { kind: raw.kind }),
        };
        Ok(match raw.tag {
            Some(tag) => stack.with_tag(tag),
            None => stack,
        })
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "air");
        }
        match self.variant {
            Variant::Exact(variant) => write!(f, "{}:{}x{}", self.kind, variant, self.count),
            Variant::Any => write!(f, "{}:*x{}", self.kind, self.count),
        }
    }
}
