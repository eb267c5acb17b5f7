//! Configuration for a play session.

use gubat_story::{ItemId, NodeId};

/// Configuration for a game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Node every new game starts at.
    pub start_node: NodeId,
    /// Node the player is sent to when HP reaches zero.
    pub game_over_node: NodeId,
    /// Maximum (and starting) hit points.
    pub max_hp: u32,
    /// Items the player starts with.
    pub starting_inventory: Vec<ItemId>,
    /// Name used when the player gives a blank one.
    pub default_player_name: String,
    /// Key the save record is stored under.
    pub save_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_node: NodeId::new("start"),
            game_over_node: NodeId::new("gameOver_hp"),
            max_hp: 100,
            starting_inventory: vec![ItemId::new("Bolo")],
            default_player_name: "Hunter".to_string(),
            save_key: "aswangHunterSave".to_string(),
        }
    }
}

impl GameConfig {
    /// Set the start node.
    pub fn with_start_node(mut self, node: impl Into<NodeId>) -> Self {
        self.start_node = node.into();
        self
    }

    /// Set the HP game-over node.
    pub fn with_game_over_node(mut self, node: impl Into<NodeId>) -> Self {
        self.game_over_node = node.into();
        self
    }

    /// Set maximum HP (at least 1).
    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp.max(1);
        self
    }

    /// Set the starting inventory. Duplicates (ignoring case) are dropped.
    pub fn with_starting_inventory<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        let mut inventory: Vec<ItemId> = Vec::new();
        for item in items.into_iter().map(Into::into) {
            if !inventory.iter().any(|held| held.matches(&item)) {
                inventory.push(item);
            }
        }
        self.starting_inventory = inventory;
        self
    }

    /// Set the fallback player name.
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_player_name = name.into();
        self
    }

    /// Set the save key.
    pub fn with_save_key(mut self, key: impl Into<String>) -> Self {
        self.save_key = key.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.start_node, "start");
        assert_eq!(cfg.game_over_node, "gameOver_hp");
        assert_eq!(cfg.max_hp, 100);
        assert_eq!(cfg.starting_inventory, vec![ItemId::new("Bolo")]);
        assert_eq!(cfg.default_player_name, "Hunter");
        assert_eq!(cfg.save_key, "aswangHunterSave");
    }

    #[test]
    fn builder_methods() {
        let cfg = GameConfig::default()
            .with_start_node("intro")
            .with_game_over_node("dead")
            .with_max_hp(50)
            .with_default_name("Stranger")
            .with_save_key("slot1");
        assert_eq!(cfg.start_node, "intro");
        assert_eq!(cfg.game_over_node, "dead");
        assert_eq!(cfg.max_hp, 50);
        assert_eq!(cfg.default_player_name, "Stranger");
        assert_eq!(cfg.save_key, "slot1");
    }

    #[test]
    fn max_hp_at_least_one() {
        assert_eq!(GameConfig::default().with_max_hp(0).max_hp, 1);
    }

    #[test]
    fn starting_inventory_is_a_set() {
        let cfg = GameConfig::default().with_starting_inventory(["Bolo", "bolo", "Asin"]);
        assert_eq!(
            cfg.starting_inventory,
            vec![ItemId::new("Bolo"), ItemId::new("Asin")]
        );
        let empty = GameConfig::default().with_starting_inventory(Vec::<ItemId>::new());
        assert!(empty.starting_inventory.is_empty());
    }
}
