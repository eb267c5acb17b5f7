//! Choices and the inventory requirements that gate their visibility.

use serde::Deserialize;

use crate::ids::{ItemId, NodeId};

/// Anything that can answer inventory membership questions.
///
/// Implemented by the engine's game state; slices of items implement it
/// directly so requirements can be checked against a plain list.
pub trait ItemHolder {
    /// Whether `item` is held (case-insensitive).
    fn has_item(&self, item: &ItemId) -> bool;

    /// Whether every item in `items` is held. True for an empty list.
    fn has_all_items(&self, items: &[ItemId]) -> bool {
        items.iter().all(|item| self.has_item(item))
    }
}

impl ItemHolder for [ItemId] {
    fn has_item(&self, item: &ItemId) -> bool {
        self.iter().any(|held| held.matches(item))
    }
}

impl ItemHolder for Vec<ItemId> {
    fn has_item(&self, item: &ItemId) -> bool {
        self.as_slice().has_item(item)
    }
}

/// An inventory requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Requirement {
    /// No requirement; always met.
    #[default]
    None,
    /// A single item must be held.
    One(ItemId),
    /// At least one of the items must be held.
    AnyOf(Vec<ItemId>),
    /// Every item must be held.
    AllOf(Vec<ItemId>),
}

impl Requirement {
    /// Evaluate the requirement against an inventory.
    ///
    /// `AnyOf` of an empty list is never met; `AllOf` of an empty list always is.
    pub fn is_met<H: ItemHolder + ?Sized>(&self, holder: &H) -> bool {
        match self {
            Requirement::None => true,
            Requirement::One(item) => holder.has_item(item),
            Requirement::AnyOf(items) => items.iter().any(|item| holder.has_item(item)),
            Requirement::AllOf(items) => holder.has_all_items(items),
        }
    }

    /// Whether this is [`Requirement::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Requirement::None)
    }

    /// The items named by this requirement.
    pub fn items(&self) -> &[ItemId] {
        match self {
            Requirement::None => &[],
            Requirement::One(item) => std::slice::from_ref(item),
            Requirement::AnyOf(items) | Requirement::AllOf(items) => items,
        }
    }
}

/// A single choice leading out of a node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawChoice")]
pub struct Choice {
    /// The text shown to the player.
    pub text: String,
    /// The node this choice leads to.
    pub to: NodeId,
    /// Shown only if this is met (`One` or `AnyOf`).
    pub requires: Requirement,
    /// Shown only if this is met (`One` or `AllOf`).
    pub requires_all: Requirement,
    /// Hidden if any of these items is held (`One` or `AnyOf`).
    pub hide_if: Requirement,
}

impl Choice {
    /// Create an ungated choice.
    pub fn new(text: impl Into<String>, to: impl Into<NodeId>) -> Self {
        Self {
            text: text.into(),
            to: to.into(),
            requires: Requirement::None,
            requires_all: Requirement::None,
            hide_if: Requirement::None,
        }
    }

    /// Require at least one of `items`.
    pub fn requires_any<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        self.requires = list_requirement(items, Requirement::AnyOf);
        self
    }

    /// Require every one of `items`.
    pub fn requires_all<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        self.requires_all = list_requirement(items, Requirement::AllOf);
        self
    }

    /// Hide the choice once any of `items` is held.
    pub fn hide_if<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        self.hide_if = list_requirement(items, Requirement::AnyOf);
        self
    }

    /// Whether the choice should be offered for the given inventory.
    ///
    /// Rules are checked in a fixed order: `hide_if`, then `requires`, then
    /// `requires_all`.
    pub fn is_visible<H: ItemHolder + ?Sized>(&self, holder: &H) -> bool {
        if !self.hide_if.is_none() && self.hide_if.is_met(holder) {
            return false;
        }
        self.requires.is_met(holder) && self.requires_all.is_met(holder)
    }

    /// Whether the choice is gated on items the player must hold.
    pub fn is_gated(&self) -> bool {
        !self.requires.is_none() || !self.requires_all.is_none()
    }

    /// Items named by `requires` and `requires_all`, for display.
    pub fn required_items(&self) -> Vec<&ItemId> {
        self.requires
            .items()
            .iter()
            .chain(self.requires_all.items())
            .collect()
    }
}

fn list_requirement<I, T>(items: I, many: fn(Vec<ItemId>) -> Requirement) -> Requirement
where
    I: IntoIterator<Item = T>,
    T: Into<ItemId>,
{
    let mut items: Vec<ItemId> = items.into_iter().map(Into::into).collect();
    match items.len() {
        0 => Requirement::None,
        1 => Requirement::One(items.remove(0)),
        _ => many(items),
    }
}

/// A single item name or a list of them, as written in story files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemList {
    One(ItemId),
    Many(Vec<ItemId>),
}

impl ItemList {
    fn into_requirement(self, many: fn(Vec<ItemId>) -> Requirement) -> Requirement {
        match self {
            ItemList::One(item) => Requirement::One(item),
            ItemList::Many(items) => many(items),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChoice {
    text: String,
    to: NodeId,
    #[serde(default)]
    requires: Option<ItemList>,
    #[serde(default)]
    requires_all: Option<ItemList>,
    #[serde(default)]
    hide_if: Option<ItemList>,
    #[serde(default)]
    hide_if_has: Option<ItemList>,
}

impl From<RawChoice> for Choice {
    fn from(raw: RawChoice) -> Self {
        let requires = raw
            .requires
            .map_or(Requirement::None, |l| l.into_requirement(Requirement::AnyOf));
        let requires_all = raw
            .requires_all
            .map_or(Requirement::None, |l| l.into_requirement(Requirement::AllOf));

        // `hideIf` and `hideIfHas` are synonyms; when both appear, either hides.
        let hidden: Vec<ItemId> = [raw.hide_if, raw.hide_if_has]
            .into_iter()
            .flatten()
            .flat_map(|l| match l {
                ItemList::One(item) => vec![item],
                ItemList::Many(items) => items,
            })
            .collect();
        let hide_if = if hidden.is_empty() {
            Requirement::None
        } else {
            Requirement::AnyOf(hidden)
        };

        Self {
            text: raw.text,
            to: raw.to,
            requires,
            requires_all,
            hide_if,
        }
    }
}
