//! Navigation and ending detection.
//!
//! A [`Session`] pairs a validated story with a [`Game`] and runs the arrival
//! sequence whenever the current node changes:
//!
//! 1. If HP is zero, force the game-over node and end the game.
//! 2. Look up the node, failing with [`EngineError::NodeNotFound`].
//! 3. Apply its arrival effect (idempotent).
//! 4. End the game if it is an ending.
//!
//! Damage taken in step 3 is checked again afterwards, so a lethal node sends
//! the player to the game-over node within the same arrival.

use gubat_story::{Choice, EndingKind, ItemId, NodeId, Story, StoryNode};
use log::{debug, info};

use crate::effects::EffectNotice;
use crate::error::{EngineError, EngineResult};
use crate::game::Game;
use crate::state::{GameState, HpStatus};
use crate::store::SaveStore;

/// What happened on arriving at a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrival {
    /// The node the player ended up at.
    pub node: NodeId,
    /// Effects applied during this arrival.
    pub notices: Vec<EffectNotice>,
    /// Whether HP ran out and the player was sent to the game-over node.
    pub forced_game_over: bool,
    /// How the game ended, if it did.
    pub ending: Option<EndingKind>,
}

/// Everything a presenter needs to draw the current node.
#[derive(Debug, Clone)]
pub struct Screen<'a> {
    /// The current node.
    pub node: &'a StoryNode,
    /// Choices to offer, already filtered. Empty once the game has ended.
    pub choices: Vec<&'a Choice>,
    /// How the game ended, if it has.
    pub ending: Option<EndingKind>,
    /// Health tier.
    pub hp_status: HpStatus,
    /// The full game state.
    pub state: &'a GameState,
    /// Pending effect message, if not dismissed.
    pub effect_message: Option<String>,
}

/// A story being played.
pub struct Session<S> {
    story: Story,
    game: Game<S>,
    notices: Vec<EffectNotice>,
    show_effect: bool,
}

impl<S: SaveStore> Session<S> {
    /// Pair a story with a game. The story is validated against the game's
    /// start and game-over nodes.
    pub fn new(story: Story, game: Game<S>) -> EngineResult<Self> {
        let config = game.config();
        story.validate(&config.start_node, &config.game_over_node)?;
        Ok(Self {
            story,
            game,
            notices: Vec::new(),
            show_effect: false,
        })
    }

    /// The story.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// The game.
    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    /// The game state.
    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    /// Start a new game and arrive at the start node.
    pub fn start(&mut self, player_name: &str) -> EngineResult<Arrival> {
        self.dismiss_effect();
        self.game.start_game(player_name)?;
        self.arrive()
    }

    /// Abandon the game and return to the pre-start state.
    pub fn reset(&mut self) -> EngineResult<()> {
        self.dismiss_effect();
        self.notices.clear();
        self.game.reset_game()
    }

    /// Re-run arrival at the current node, e.g. after restoring a save.
    /// Effects already applied are not applied again.
    pub fn resume(&mut self) -> EngineResult<Arrival> {
        self.arrive()
    }

    /// The node the player is at.
    pub fn current_node(&self) -> EngineResult<&StoryNode> {
        let id = self.game.state().current_node();
        self.story
            .node(id)
            .ok_or_else(|| EngineError::NodeNotFound(id.clone()))
    }

    /// Choices to offer at the current node. Empty once the game has ended.
    pub fn visible_choices(&self) -> EngineResult<Vec<&Choice>> {
        let node = self.current_node()?;
        let state = self.game.state();
        if state.is_ended() {
            return Ok(Vec::new());
        }
        Ok(node.choices.iter().filter(|c| c.is_visible(state)).collect())
    }

    /// Take the `index`th visible choice (0-based).
    pub fn choose(&mut self, index: usize) -> EngineResult<Arrival> {
        if self.game.state().is_ended() {
            return Err(EngineError::GameEnded);
        }
        let to = self
            .visible_choices()?
            .get(index)
            .map(|c| c.to.clone())
            .ok_or(EngineError::InvalidChoice(index))?;
        self.dismiss_effect();
        self.navigate(to)
    }

    /// Move to `to` and arrive there.
    pub fn navigate(&mut self, to: NodeId) -> EngineResult<Arrival> {
        self.game.navigate_to_node(to)?;
        self.arrive()
    }

    /// Run the arrival sequence at the current node.
    pub fn arrive(&mut self) -> EngineResult<Arrival> {
        if !self.game.state().is_started() {
            return Err(EngineError::NoActiveSession);
        }

        let mut arrival = Arrival::default();
        if self.force_game_over_if_dead()? {
            arrival.forced_game_over = true;
        }
        self.settle(&mut arrival)?;
        if self.force_game_over_if_dead()? {
            arrival.forced_game_over = true;
            self.settle(&mut arrival)?;
        }

        let state = self.game.state();
        arrival.node = state.current_node().clone();
        if state.is_ended() {
            arrival.ending = self.current_node()?.ending_kind().or(Some(EndingKind::Default));
        }
        if !arrival.notices.is_empty() {
            self.notices = arrival.notices.clone();
            self.show_effect = true;
        }
        Ok(arrival)
    }

    /// Whether `item` is held.
    pub fn has_item(&self, item: &ItemId) -> bool {
        self.game.has_item(item)
    }

    /// Whether every item is held.
    pub fn has_all_items(&self, items: &[ItemId]) -> bool {
        self.game.has_all_items(items)
    }

    /// The latest effect message, while it is showing. A found item takes
    /// precedence over lost HP.
    pub fn effect_message(&self) -> Option<String> {
        if !self.show_effect {
            return None;
        }
        self.notices
            .iter()
            .find(|notice| matches!(notice, EffectNotice::Found(_)))
            .or_else(|| self.notices.first())
            .map(ToString::to_string)
    }

    /// Whether an effect message is showing.
    pub fn show_effect(&self) -> bool {
        self.show_effect
    }

    /// Hide the effect message.
    pub fn dismiss_effect(&mut self) {
        self.show_effect = false;
    }

    /// The current node, its visible choices, and status for display.
    pub fn screen(&self) -> EngineResult<Screen<'_>> {
        let node = self.current_node()?;
        let state = self.game.state();
        let ending = if state.is_ended() {
            Some(node.ending_kind().unwrap_or(EndingKind::Default))
        } else {
            None
        };
        Ok(Screen {
            node,
            choices: self.visible_choices()?,
            ending,
            hp_status: state.hp_status(),
            state,
            effect_message: self.effect_message(),
        })
    }

    /// Apply the current node's effect and detect endings.
    fn settle(&mut self, arrival: &mut Arrival) -> EngineResult<()> {
        let id = self.game.state().current_node().clone();
        let node = self
            .story
            .node(&id)
            .ok_or_else(|| EngineError::NodeNotFound(id.clone()))?;
        debug!("arrived at {id}");

        if let Some(effect) = &node.on_arrive {
            let notices = self.game.apply_node_effects(&id, effect)?;
            arrival.notices.extend(notices);
        }
        if node.is_ending {
            self.game.end_game()?;
        }
        Ok(())
    }

    /// Send the player to the game-over node if HP has run out.
    fn force_game_over_if_dead(&mut self) -> EngineResult<bool> {
        let game_over = self.game.config().game_over_node.clone();
        let state = self.game.state();
        if !state.is_dead() || state.is_ended() || state.current_node() == &game_over {
            return Ok(false);
        }
        info!("hp exhausted at {}; game over", state.current_node());
        self.game.navigate_to_node(game_over)?;
        self.game.end_game()?;
        Ok(true)
    }
}
