//! The game state store.
//!
//! `Game` is the single owner of a session's [`GameState`]. Every mutation
//! goes through it, and every mutation of a started game is written to the
//! [`SaveStore`] before the call returns.

use gubat_story::{ArrivalEffect, ItemHolder, ItemId, NodeId};
use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::effects::{EffectNotice, apply_arrival};
use crate::error::{EngineError, EngineResult};
use crate::state::GameState;
use crate::store::SaveStore;

/// Owns the game state and its persistence.
pub struct Game<S> {
    state: GameState,
    config: GameConfig,
    store: S,
}

impl<S: SaveStore> Game<S> {
    /// A game in the pre-start state. Does not read the store.
    pub fn new(config: GameConfig, store: S) -> Self {
        Self {
            state: GameState::new(&config),
            config,
            store,
        }
    }

    /// Resume from the saved record if there is one.
    ///
    /// A missing, unreadable, or corrupted record yields the pre-start state.
    /// Corrupted records are deleted.
    pub fn restore(config: GameConfig, mut store: S) -> Self {
        let key = config.save_key.clone();
        let state = match store.load(&key) {
            Ok(Some(data)) => match serde_json::from_str::<GameState>(&data) {
                Ok(state) => {
                    info!("resumed saved game at node \"{}\"", state.current_node());
                    Some(state.normalize())
                }
                Err(e) => {
                    warn!("discarding corrupted save \"{key}\": {e}");
                    if let Err(e) = store.remove(&key) {
                        warn!("failed to delete corrupted save \"{key}\": {e}");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("could not read save \"{key}\": {e}");
                None
            }
        };

        Self {
            state: state.unwrap_or_else(|| GameState::new(&config)),
            config,
            store,
        }
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Begin a new game, discarding any save.
    ///
    /// A blank name falls back to the configured default.
    pub fn start_game(&mut self, player_name: &str) -> EngineResult<()> {
        self.store.remove(&self.config.save_key)?;
        let name = match player_name.trim() {
            "" => self.config.default_player_name.clone(),
            name => name.to_string(),
        };
        info!("starting new game for {name}");
        self.state = GameState::started(&self.config, name);
        self.persist()
    }

    /// Discard the save and return to the pre-start state.
    pub fn reset_game(&mut self) -> EngineResult<()> {
        self.store.remove(&self.config.save_key)?;
        info!("game reset");
        self.state = GameState::new(&self.config);
        Ok(())
    }

    /// Move to `node`. Existence is not checked here; stories are validated
    /// when loaded.
    pub fn navigate_to_node(&mut self, node: NodeId) -> EngineResult<()> {
        self.ensure_started()?;
        if self.state.is_ended() {
            return Err(EngineError::GameEnded);
        }
        debug!("navigate {} -> {}", self.state.current_node(), node);
        self.state.set_current_node(node);
        self.persist()
    }

    /// Apply `node`'s arrival effect. Components already applied for this
    /// node are skipped, so repeated calls are harmless.
    pub fn apply_node_effects(
        &mut self,
        node: &NodeId,
        effect: &ArrivalEffect,
    ) -> EngineResult<Vec<EffectNotice>> {
        self.ensure_started()?;
        let notices = apply_arrival(&mut self.state, node, effect);
        if notices.is_empty() {
            return Ok(notices);
        }
        debug!(
            "applied effects at {node}: {} (hp {}/{})",
            effect,
            self.state.hp(),
            self.state.max_hp()
        );
        self.persist()?;
        Ok(notices)
    }

    /// Mark the game as ended. The game stays started so the ending can
    /// still be shown.
    pub fn end_game(&mut self) -> EngineResult<()> {
        self.ensure_started()?;
        if self.state.is_ended() {
            return Ok(());
        }
        info!("game ended at node \"{}\"", self.state.current_node());
        self.state.set_ended();
        self.persist()
    }

    /// Whether `item` is held (case-insensitive).
    pub fn has_item(&self, item: &ItemId) -> bool {
        self.state.has_item(item)
    }

    /// Whether every item is held. True for an empty list.
    pub fn has_all_items(&self, items: &[ItemId]) -> bool {
        self.state.has_all_items(items)
    }

    fn ensure_started(&self) -> EngineResult<()> {
        if self.state.is_started() {
            Ok(())
        } else {
            Err(EngineError::NoActiveSession)
        }
    }

    fn persist(&mut self) -> EngineResult<()> {
        if !self.state.is_started() {
            return Ok(());
        }
        let data = serde_json::to_string(&self.state)?;
        self.store.save(&self.config.save_key, &data)?;
        Ok(())
    }
}
