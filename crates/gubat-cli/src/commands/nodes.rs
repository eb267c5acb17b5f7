use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use gubat_engine::GameConfig;
use gubat_story::StoryNode;

pub fn run(path: Option<&Path>) -> Result<(), String> {
    let config = GameConfig::default();
    let story = super::load_story(path, &config)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Node", "Kind", "Choices", "On arrival"]);

    for node in story.nodes() {
        let kind = node_kind(node, &config);
        let effect = match &node.on_arrive {
            Some(effect) if !effect.is_empty() => effect.to_string(),
            _ => "-".to_string(),
        };
        table.add_row(vec![
            node.id.to_string(),
            kind,
            node.choices.len().to_string(),
            effect,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} nodes", story.len());

    Ok(())
}

fn node_kind(node: &StoryNode, config: &GameConfig) -> String {
    if let Some(ending) = node.ending_kind() {
        format!("ending ({ending})")
    } else if node.id == config.start_node {
        "start".to_string()
    } else {
        "scene".to_string()
    }
}
