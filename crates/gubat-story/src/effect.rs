//! Effects applied when the player arrives at a node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// The side effects a node applies on arrival.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalEffect {
    /// Item added to the inventory.
    #[serde(default)]
    pub add_item: Option<ItemId>,
    /// Hit points lost.
    #[serde(default)]
    pub take_damage: Option<u32>,
}

impl ArrivalEffect {
    /// An effect that gives the player an item.
    pub fn add_item(item: impl Into<ItemId>) -> Self {
        Self {
            add_item: Some(item.into()),
            take_damage: None,
        }
    }

    /// An effect that deals damage.
    pub fn take_damage(amount: u32) -> Self {
        Self {
            add_item: None,
            take_damage: Some(amount),
        }
    }

    /// Add damage to this effect.
    pub fn with_damage(mut self, amount: u32) -> Self {
        self.take_damage = Some(amount);
        self
    }

    /// The individual components, items first. Zero damage is not a
    /// component.
    pub fn components(&self) -> Vec<EffectComponent<'_>> {
        let mut out = Vec::with_capacity(2);
        if let Some(item) = &self.add_item {
            out.push(EffectComponent::AddItem(item));
        }
        if let Some(amount) = self.take_damage
            && amount > 0
        {
            out.push(EffectComponent::TakeDamage(amount));
        }
        out
    }

    /// Whether the effect does nothing.
    pub fn is_empty(&self) -> bool {
        self.components().is_empty()
    }
}

/// The kind of an effect component. Part of the key that records which
/// effects have already been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// An item was added.
    AddItem,
    /// Damage was taken.
    TakeDamage,
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddItem => write!(f, "add item"),
            Self::TakeDamage => write!(f, "take damage"),
        }
    }
}

/// One component of an [`ArrivalEffect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectComponent<'a> {
    /// Add this item.
    AddItem(&'a ItemId),
    /// Lose this many hit points.
    TakeDamage(u32),
}

impl EffectComponent<'_> {
    /// The component's kind.
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::AddItem(_) => EffectKind::AddItem,
            Self::TakeDamage(_) => EffectKind::TakeDamage,
        }
    }
}

impl fmt::Display for ArrivalEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .components()
            .iter()
            .map(|c| match c {
                EffectComponent::AddItem(item) => format!("+{item}"),
                EffectComponent::TakeDamage(n) => format!("-{n} HP"),
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
