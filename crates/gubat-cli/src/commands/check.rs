use std::path::Path;

use colored::Colorize;
use gubat_engine::GameConfig;

pub fn run(path: Option<&Path>) -> Result<(), String> {
    let config = GameConfig::default();
    let story = super::load_story(path, &config)?;

    for id in story.unreachable_from(&config.start_node, &config.game_over_node) {
        println!(
            "  {} node \"{id}\" cannot be reached from \"{}\"",
            "warning:".yellow(),
            config.start_node
        );
    }

    println!("  All checks passed for '{}'.", super::story_label(path));
    println!(
        "  {} nodes, {} endings, {} choices",
        story.len(),
        story.endings().count(),
        story.choice_count()
    );

    Ok(())
}
