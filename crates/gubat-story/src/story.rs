use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::Path;

use crate::error::{StoryError, StoryIssue, StoryResult};
use crate::ids::NodeId;
use crate::node::StoryNode;

const BUNDLED_STORY: &str = include_str!("../assets/san_gubat.json");

/// The story graph. Owns every node; never mutated once loaded.
#[derive(Debug, Clone, Default)]
pub struct Story {
    nodes: BTreeMap<NodeId, StoryNode>,
}

impl Story {
    /// An empty story.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a story from JSON: an object mapping node ids to nodes.
    ///
    /// This only checks the schema; call [`Story::validate`] to check edges.
    pub fn from_json(src: &str) -> StoryResult<Self> {
        let raw: BTreeMap<NodeId, StoryNode> = serde_json::from_str(src)?;
        let nodes = raw
            .into_iter()
            .map(|(id, mut node)| {
                node.id = id.clone();
                (id, node)
            })
            .collect();
        Ok(Self { nodes })
    }

    /// Read and parse a story file.
    pub fn load(path: &Path) -> StoryResult<Self> {
        let src = std::fs::read_to_string(path).map_err(|source| StoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&src)
    }

    /// The story shipped with the game.
    pub fn bundled() -> StoryResult<Self> {
        Self::from_json(BUNDLED_STORY)
    }

    /// Add a node. Fails if a node with the same id exists.
    pub fn add_node(&mut self, node: StoryNode) -> StoryResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(StoryError::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Builder form of [`Story::add_node`].
    pub fn with_node(mut self, node: StoryNode) -> StoryResult<Self> {
        self.add_node(node)?;
        Ok(self)
    }

    /// Look up a node.
    pub fn node(&self, id: &NodeId) -> Option<&StoryNode> {
        self.nodes.get(id)
    }

    /// Whether a node exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes, ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the story has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ending nodes.
    pub fn endings(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.values().filter(|n| n.is_ending)
    }

    /// Total number of choices across all nodes.
    pub fn choice_count(&self) -> usize {
        self.nodes.values().map(|n| n.choices.len()).sum()
    }

    /// Collect every structural problem in the graph.
    ///
    /// `start` and `game_over` must exist, and the game-over node must be an
    /// ending. Every choice must lead to a defined node. Non-ending nodes need
    /// at least one choice and ending nodes must have none.
    pub fn issues(&self, start: &NodeId, game_over: &NodeId) -> Vec<StoryIssue> {
        let mut issues = Vec::new();

        for required in [start, game_over] {
            if !self.contains(required) {
                issues.push(StoryIssue::MissingNode(required.clone()));
            }
        }
        if let Some(node) = self.node(game_over)
            && !node.is_ending
        {
            issues.push(StoryIssue::GameOverNotEnding(game_over.clone()));
        }

        for node in self.nodes.values() {
            if node.is_ending && !node.choices.is_empty() {
                issues.push(StoryIssue::EndingWithChoices(node.id.clone()));
            }
            if !node.is_ending && node.choices.is_empty() {
                issues.push(StoryIssue::DeadEnd(node.id.clone()));
            }
            for (index, choice) in node.choices.iter().enumerate() {
                if !self.contains(&choice.to) {
                    issues.push(StoryIssue::DanglingChoice {
                        node: node.id.clone(),
                        index,
                        target: choice.to.clone(),
                    });
                }
            }
        }

        issues
    }

    /// Validate the graph, returning every issue at once.
    pub fn validate(&self, start: &NodeId, game_over: &NodeId) -> StoryResult<()> {
        let issues = self.issues(start, game_over);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(StoryError::Invalid { issues })
        }
    }

    /// Node ids reachable from `start` by following choices, ignoring gates.
    pub fn reachable_from(&self, start: &NodeId) -> BTreeSet<&NodeId> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::new();
        if let Some((id, _)) = self.nodes.get_key_value(start) {
            seen.insert(id);
            queue.push_back(id);
        }
        while let Some(id) = queue.pop_front() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            for choice in &node.choices {
                if let Some((target, _)) = self.nodes.get_key_value(&choice.to)
                    && seen.insert(target)
                {
                    queue.push_back(target);
                }
            }
        }
        seen
    }

    /// Nodes that cannot be reached from `start`, other than `also_live`
    /// (the game-over node is entered without a choice).
    pub fn unreachable_from(&self, start: &NodeId, also_live: &NodeId) -> Vec<&NodeId> {
        let reachable = self.reachable_from(start);
        self.nodes
            .keys()
            .filter(|id| !reachable.contains(id) && *id != also_live)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Choice;
    use crate::effect::ArrivalEffect;

    fn small_story() -> Story {
        Story::new()
            .with_node(
                StoryNode::new("start", "You wake.")
                    .with_choice(Choice::new("Get up", "kitchen")),
            )
            .unwrap()
            .with_node(
                StoryNode::new("kitchen", "Salt on the shelf.")
                    .with_on_arrive(ArrivalEffect::add_item("Asin"))
                    .with_choice(Choice::new("Leave", "end")),
            )
            .unwrap()
            .with_node(StoryNode::new("end", "You become a legend.").ending())
            .unwrap()
            .with_node(StoryNode::new("gameOver_hp", "GAME OVER.").ending())
            .unwrap()
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut story = small_story();
        let result = story.add_node(StoryNode::new("start", "again"));
        assert!(matches!(result, Err(StoryError::DuplicateNode(id)) if id == "start"));
    }

    #[test]
    fn valid_story_passes() {
        let story = small_story();
        assert!(story.validate(&"start".into(), &"gameOver_hp".into()).is_ok());
        assert_eq!(story.len(), 4);
        assert_eq!(story.endings().count(), 2);
        assert_eq!(story.choice_count(), 2);
    }

    #[test]
    fn dangling_choice_reported() {
        let story = small_story()
            .with_node(
                StoryNode::new("cellar", "Dark.").with_choice(Choice::new("Descend", "abyss")),
            )
            .unwrap();
        let issues = story.issues(&"start".into(), &"gameOver_hp".into());
        assert_eq!(
            issues,
            vec![StoryIssue::DanglingChoice {
                node: "cellar".into(),
                index: 0,
                target: "abyss".into(),
            }]
        );
    }

    #[test]
    fn missing_required_nodes_reported() {
        let story = Story::new()
            .with_node(StoryNode::new("only", "Alone.").ending())
            .unwrap();
        let err = story
            .validate(&"start".into(), &"gameOver_hp".into())
            .unwrap_err();
        match err {
            StoryError::Invalid { issues } => {
                assert!(issues.contains(&StoryIssue::MissingNode("start".into())));
                assert!(issues.contains(&StoryIssue::MissingNode("gameOver_hp".into())));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn dead_ends_and_bad_endings_reported() {
        let story = small_story()
            .with_node(StoryNode::new("pit", "Nothing here."))
            .unwrap()
            .with_node(
                StoryNode::new("fake_end", "The end?")
                    .with_choice(Choice::new("Continue", "start"))
                    .ending(),
            )
            .unwrap();
        let issues = story.issues(&"start".into(), &"gameOver_hp".into());
        assert!(issues.contains(&StoryIssue::DeadEnd("pit".into())));
        assert!(issues.contains(&StoryIssue::EndingWithChoices("fake_end".into())));
    }

    #[test]
    fn game_over_must_be_ending() {
        let story = Story::new()
            .with_node(StoryNode::new("start", "Go.").with_choice(Choice::new("Die", "dead")))
            .unwrap()
            .with_node(StoryNode::new("dead", "Dead.").with_choice(Choice::new("Again", "start")))
            .unwrap();
        let issues = story.issues(&"start".into(), &"dead".into());
        assert_eq!(issues, vec![StoryIssue::GameOverNotEnding("dead".into())]);
    }

    #[test]
    fn from_json_fills_ids() {
        let story = Story::from_json(
            r#"{
                "start": {"text": "Go.", "choices": [{"text": "On", "to": "end"}]},
                "end": {"text": "Done.", "isEnding": true}
            }"#,
        )
        .unwrap();
        assert_eq!(story.node(&"end".into()).unwrap().id, "end");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = Story::from_json(r#"{"start": {"choices": []}}"#).unwrap_err();
        assert!(matches!(err, StoryError::Parse(_)));
    }

    #[test]
    fn reachability() {
        let story = small_story()
            .with_node(StoryNode::new("orphan", "Nobody comes here.").ending())
            .unwrap();
        let start = NodeId::from("start");
        assert_eq!(story.reachable_from(&start).len(), 3);
        let unreachable = story.unreachable_from(&start, &"gameOver_hp".into());
        assert_eq!(unreachable, vec![&NodeId::from("orphan")]);
    }

    #[test]
    fn bundled_story_is_valid() {
        let story = Story::bundled().unwrap();
        story
            .validate(&"start".into(), &"gameOver_hp".into())
            .unwrap();
        let start = NodeId::from("start");
        assert!(story.unreachable_from(&start, &"gameOver_hp".into()).is_empty());
    }
}
