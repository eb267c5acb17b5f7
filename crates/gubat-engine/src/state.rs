//! The game state record.

use std::fmt;

use gubat_story::{ItemHolder, ItemId, NodeId};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::effects::AppliedEffects;

/// Progress of one play session. Serialized as-is to the save store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    player_name: String,
    hp: u32,
    max_hp: u32,
    inventory: Vec<ItemId>,
    current_node: NodeId,
    game_started: bool,
    game_ended: bool,
    applied_effects: AppliedEffects,
}

impl GameState {
    /// The pre-start state: nothing begun, full HP, starting inventory.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player_name: String::new(),
            hp: config.max_hp,
            max_hp: config.max_hp,
            inventory: config.starting_inventory.clone(),
            current_node: config.start_node.clone(),
            game_started: false,
            game_ended: false,
            applied_effects: AppliedEffects::new(),
        }
    }

    /// A freshly started game for `player_name`.
    pub fn started(config: &GameConfig, player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            game_started: true,
            ..Self::new(config)
        }
    }

    /// The player's name.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Current hit points.
    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Maximum hit points.
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Items held, in the order they were picked up.
    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    /// The node the player is at.
    pub fn current_node(&self) -> &NodeId {
        &self.current_node
    }

    /// Whether a game has been started.
    pub fn is_started(&self) -> bool {
        self.game_started
    }

    /// Whether the game has ended.
    pub fn is_ended(&self) -> bool {
        self.game_ended
    }

    /// Whether the player's HP has run out.
    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Effects already applied this session.
    pub fn applied_effects(&self) -> &AppliedEffects {
        &self.applied_effects
    }

    /// Health tier for display.
    pub fn hp_status(&self) -> HpStatus {
        HpStatus::from_hp(self.hp, self.max_hp)
    }

    pub(crate) fn applied_effects_mut(&mut self) -> &mut AppliedEffects {
        &mut self.applied_effects
    }

    pub(crate) fn set_current_node(&mut self, node: NodeId) {
        self.current_node = node;
    }

    pub(crate) fn set_ended(&mut self) {
        self.game_ended = true;
    }

    /// Add an item unless already held. Returns whether it was added.
    pub(crate) fn add_item(&mut self, item: ItemId) -> bool {
        if self.has_item(&item) {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Lose `amount` HP, clamped to `[0, max_hp]`.
    pub(crate) fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount).min(self.max_hp);
    }

    /// Repair a record read from storage: clamp HP and drop duplicate items.
    pub(crate) fn normalize(mut self) -> Self {
        self.hp = self.hp.min(self.max_hp);
        let mut inventory: Vec<ItemId> = Vec::with_capacity(self.inventory.len());
        for item in self.inventory {
            if !inventory.has_item(&item) {
                inventory.push(item);
            }
        }
        self.inventory = inventory;
        self
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl ItemHolder for GameState {
    fn has_item(&self, item: &ItemId) -> bool {
        self.inventory.has_item(item)
    }
}

/// Health tier, by percentage of maximum HP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpStatus {
    /// Above 70%.
    Healthy,
    /// Above 30%.
    Wounded,
    /// 30% or less.
    Critical,
}

impl HpStatus {
    /// Tier for `hp` out of `max_hp`.
    pub fn from_hp(hp: u32, max_hp: u32) -> Self {
        if max_hp == 0 {
            return Self::Critical;
        }
        let scaled = u64::from(hp) * 100;
        let max_hp = u64::from(max_hp);
        if scaled > 70 * max_hp {
            Self::Healthy
        } else if scaled > 30 * max_hp {
            Self::Wounded
        } else {
            Self::Critical
        }
    }
}

impl fmt::Display for HpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Wounded => write!(f, "wounded"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_state_is_not_started() {
        let state = GameState::default();
        assert!(!state.is_started());
        assert!(!state.is_ended());
        assert_eq!(state.hp(), 100);
        assert_eq!(state.current_node(), &NodeId::new("start"));
        assert!(state.player_name().is_empty());
    }

    #[test]
    fn started_state() {
        let state = GameState::started(&GameConfig::default(), "Dante");
        assert!(state.is_started());
        assert_eq!(state.player_name(), "Dante");
        assert_eq!(state.inventory(), &[ItemId::new("Bolo")]);
        assert!(state.applied_effects().is_empty());
    }

    #[test]
    fn has_item_ignores_case() {
        let state = GameState::default();
        assert!(state.has_item(&ItemId::new("bolo")));
        assert!(state.has_item(&ItemId::new("BOLO")));
        assert!(!state.has_item(&ItemId::new("Asin")));
    }

    #[test]
    fn has_all_items_of_empty_list() {
        let state = GameState::new(&GameConfig::default().with_starting_inventory(Vec::<ItemId>::new()));
        assert!(state.has_all_items(&[]));
    }

    #[test]
    fn inventory_is_a_set() {
        let mut state = GameState::default();
        assert!(state.add_item(ItemId::new("Asin")));
        assert!(!state.add_item(ItemId::new("asin")));
        assert_eq!(state.inventory().len(), 2);
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut state = GameState::default();
        state.take_damage(150);
        assert_eq!(state.hp(), 0);
        assert!(state.is_dead());
    }

    #[test]
    fn normalize_repairs_loaded_record() {
        let json = r#"{
            "playerName": "Dante", "hp": 250, "maxHp": 100,
            "inventory": ["Bolo", "bolo", "Asin"],
            "currentNode": "village", "gameStarted": true, "gameEnded": false,
            "appliedEffects": []
        }"#;
        let state: GameState = serde_json::from_str(json).unwrap();
        let state = state.normalize();
        assert_eq!(state.hp(), 100);
        assert_eq!(state.inventory(), &[ItemId::new("Bolo"), ItemId::new("Asin")]);
    }

    #[test]
    fn serialized_shape_uses_camel_case() {
        let state = GameState::started(&GameConfig::default(), "Dante");
        let value = serde_json::to_value(&state).unwrap();
        for key in [
            "playerName",
            "hp",
            "maxHp",
            "inventory",
            "currentNode",
            "gameStarted",
            "gameEnded",
            "appliedEffects",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn hp_status_tiers() {
        assert_eq!(HpStatus::from_hp(100, 100), HpStatus::Healthy);
        assert_eq!(HpStatus::from_hp(71, 100), HpStatus::Healthy);
        assert_eq!(HpStatus::from_hp(70, 100), HpStatus::Wounded);
        assert_eq!(HpStatus::from_hp(31, 100), HpStatus::Wounded);
        assert_eq!(HpStatus::from_hp(30, 100), HpStatus::Critical);
        assert_eq!(HpStatus::from_hp(0, 100), HpStatus::Critical);
        assert_eq!(HpStatus::from_hp(40, 50), HpStatus::Healthy);
    }

    #[test]
    fn hp_status_uses_exact_ratio() {
        assert_eq!(HpStatus::from_hp(141, 200), HpStatus::Healthy);
        assert_eq!(HpStatus::from_hp(140, 200), HpStatus::Wounded);
        assert_eq!(HpStatus::from_hp(61, 200), HpStatus::Wounded);
        assert_eq!(HpStatus::from_hp(60, 200), HpStatus::Critical);
        assert_eq!(HpStatus::from_hp(u32::MAX, u32::MAX), HpStatus::Healthy);
    }

    fn item_name() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["Bolo", "bolo", "Asin", "ASIN", "Bawang", "Agimat"])
            .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn hp_stays_in_range(damage in prop::collection::vec(0u32..300, 0..20)) {
            let mut state = GameState::default();
            for amount in damage {
                state.take_damage(amount);
                prop_assert!(state.hp() <= state.max_hp());
            }
        }

        #[test]
        fn has_all_items_matches_has_item(
            held in prop::collection::vec(item_name(), 0..6),
            wanted in prop::collection::vec(item_name(), 0..6),
        ) {
            let mut state = GameState::new(
                &GameConfig::default().with_starting_inventory(Vec::<ItemId>::new()),
            );
            for name in held {
                state.add_item(ItemId::new(name));
            }
            let wanted: Vec<ItemId> = wanted.into_iter().map(ItemId::new).collect();
            let expected = wanted.iter().all(|item| state.has_item(item));
            prop_assert_eq!(state.has_all_items(&wanted), expected);
        }
    }
}
