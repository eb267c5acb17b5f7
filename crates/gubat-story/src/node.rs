use serde::Deserialize;

use crate::choice::Choice;
use crate::effect::ArrivalEffect;
use crate::ending::EndingKind;
use crate::ids::NodeId;

/// A unit of narrative: text, outgoing choices, and what happens on arrival.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryNode {
    /// Identifier; filled in from the story map key when loading.
    #[serde(skip)]
    pub id: NodeId,
    /// Narrative text. Newlines separate paragraphs.
    pub text: String,
    /// Choices in authored order. Empty on ending nodes.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Effect applied once when the player first arrives.
    #[serde(default)]
    pub on_arrive: Option<ArrivalEffect>,
    /// Whether reaching this node ends the game.
    #[serde(default)]
    pub is_ending: bool,
}

impl StoryNode {
    /// Create a node with no choices.
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: Vec::new(),
            on_arrive: None,
            is_ending: false,
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Set the arrival effect.
    pub fn with_on_arrive(mut self, effect: ArrivalEffect) -> Self {
        self.on_arrive = Some(effect);
        self
    }

    /// Mark the node as an ending.
    pub fn ending(mut self) -> Self {
        self.is_ending = true;
        self
    }

    /// The text split into non-empty paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').map(str::trim).filter(|p| !p.is_empty())
    }

    /// Classification of this node as an ending, if it is one.
    pub fn ending_kind(&self) -> Option<EndingKind> {
        self.is_ending.then(|| EndingKind::classify(&self.text))
    }
}
