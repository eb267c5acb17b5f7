//! Arrival effects and the ledger that keeps them idempotent.
//!
//! Each component of a node's [`ArrivalEffect`] is keyed by
//! `(node, kind)`. A component runs only if its key is not yet in the
//! session's [`AppliedEffects`], so arriving at a node any number of times
//! leaves the same state as arriving once.

use std::collections::BTreeSet;
use std::fmt;

use gubat_story::{ArrivalEffect, EffectComponent, EffectKind, ItemId, NodeId};
use serde::{Deserialize, Serialize};

use crate::state::GameState;

/// Identifies one applied effect component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectKey {
    /// Node whose arrival effect this was.
    pub node: NodeId,
    /// Which component.
    pub kind: EffectKind,
}

impl EffectKey {
    /// Create a key.
    pub fn new(node: impl Into<NodeId>, kind: EffectKind) -> Self {
        Self {
            node: node.into(),
            kind,
        }
    }
}

impl fmt::Display for EffectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.node, self.kind)
    }
}

/// Set of effect keys already applied this session. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppliedEffects(BTreeSet<EffectKey>);

impl AppliedEffects {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` has been applied.
    pub fn contains(&self, key: &EffectKey) -> bool {
        self.0.contains(key)
    }

    /// Whether any component of `node`'s effect has been applied.
    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.0.iter().any(|key| &key.node == node)
    }

    /// Record `key`. Returns false if it was already present.
    pub(crate) fn record(&mut self, key: EffectKey) -> bool {
        self.0.insert(key)
    }

    /// Number of recorded keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been applied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded keys in order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectKey> {
        self.0.iter()
    }
}

/// What an applied effect did, for showing to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectNotice {
    /// An item was found.
    Found(ItemId),
    /// HP was lost.
    Lost(u32),
}

impl fmt::Display for EffectNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(item) => write!(f, "Found: {item}"),
            Self::Lost(amount) => write!(f, "Lost {amount} HP"),
        }
    }
}

/// Apply the components of `effect` not yet recorded for `node`.
///
/// Items already held are not added twice; damage is clamped to
/// `[0, max_hp]`. Returns a notice per component applied by this call.
pub fn apply_arrival(
    state: &mut GameState,
    node: &NodeId,
    effect: &ArrivalEffect,
) -> Vec<EffectNotice> {
    let mut notices = Vec::new();
    for component in effect.components() {
        let key = EffectKey::new(node.clone(), component.kind());
        if !state.applied_effects_mut().record(key) {
            continue;
        }
        match component {
            EffectComponent::AddItem(item) => {
                state.add_item(item.clone());
                notices.push(EffectNotice::Found(item.clone()));
            }
            EffectComponent::TakeDamage(amount) => {
                state.take_damage(amount);
                notices.push(EffectNotice::Lost(amount));
            }
        }
    }
    notices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use gubat_story::ItemHolder;
    use proptest::prelude::*;

    fn started() -> GameState {
        GameState::started(&GameConfig::default(), "Dante")
    }

    #[test]
    fn add_item_once() {
        let mut state = started();
        let node = NodeId::new("kitchen");
        let effect = ArrivalEffect::add_item("Asin");

        let first = apply_arrival(&mut state, &node, &effect);
        let second = apply_arrival(&mut state, &node, &effect);

        assert_eq!(first, vec![EffectNotice::Found(ItemId::new("Asin"))]);
        assert!(second.is_empty());
        let asin_count = state
            .inventory()
            .iter()
            .filter(|i| i.matches(&ItemId::new("Asin")))
            .count();
        assert_eq!(asin_count, 1);
        assert_eq!(state.applied_effects().len(), 1);
        assert!(
            state
                .applied_effects()
                .contains(&EffectKey::new("kitchen", EffectKind::AddItem))
        );
    }

    #[test]
    fn same_effect_on_different_nodes_applies_each() {
        let mut state = started();
        let effect = ArrivalEffect::take_damage(10);
        apply_arrival(&mut state, &NodeId::new("a"), &effect);
        apply_arrival(&mut state, &NodeId::new("b"), &effect);
        assert_eq!(state.hp(), 80);
        assert_eq!(state.applied_effects().len(), 2);
    }

    #[test]
    fn combined_effect_records_both_kinds() {
        let mut state = started();
        let node = NodeId::new("trap");
        let notices = apply_arrival(
            &mut state,
            &node,
            &ArrivalEffect::add_item("Agimat").with_damage(25),
        );
        assert_eq!(
            notices,
            vec![
                EffectNotice::Found(ItemId::new("Agimat")),
                EffectNotice::Lost(25)
            ]
        );
        assert!(state.has_item(&ItemId::new("agimat")));
        assert_eq!(state.hp(), 75);
        assert!(state.applied_effects().contains_node(&node));
    }

    #[test]
    fn damage_past_zero_clamps() {
        let mut state = started();
        apply_arrival(&mut state, &NodeId::new("pit"), &ArrivalEffect::take_damage(150));
        assert_eq!(state.hp(), 0);
    }

    #[test]
    fn zero_damage_leaves_no_trace() {
        let mut state = started();
        let notices = apply_arrival(
            &mut state,
            &NodeId::new("path"),
            &ArrivalEffect::take_damage(0),
        );
        assert!(notices.is_empty());
        assert_eq!(state.hp(), 100);
        assert!(state.applied_effects().is_empty());
    }

    #[test]
    fn notice_text() {
        assert_eq!(EffectNotice::Found(ItemId::new("Asin")).to_string(), "Found: Asin");
        assert_eq!(EffectNotice::Lost(20).to_string(), "Lost 20 HP");
    }

    #[test]
    fn ledger_serializes_as_list_of_keys() {
        let mut ledger = AppliedEffects::new();
        ledger.record(EffectKey::new("kitchen", EffectKind::AddItem));
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"[{"node":"kitchen","kind":"add_item"}]"#);
    }

    proptest! {
        #[test]
        fn repeated_arrival_is_idempotent(
            item in prop::option::of("[A-Za-z]{1,8}"),
            damage in prop::option::of(0u32..200),
            repeats in 1usize..5,
        ) {
            let effect = ArrivalEffect { add_item: item.map(ItemId::new), take_damage: damage };
            let node = NodeId::new("node");

            let mut once = started();
            apply_arrival(&mut once, &node, &effect);

            let mut many = started();
            for _ in 0..repeats {
                apply_arrival(&mut many, &node, &effect);
            }
            prop_assert_eq!(once, many);
        }
    }
}
