pub mod check;
pub mod nodes;
pub mod play;
pub mod reset;
pub mod status;

use std::path::Path;

use gubat_engine::GameConfig;
use gubat_story::{Story, StoryError};

/// Human-readable name for where a story came from.
fn story_label(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "bundled story".to_string(),
    }
}

/// Load a story file, or the bundled story when no path is given, and
/// validate it against `config`. Problems are rendered to stderr.
fn load_story(path: Option<&Path>, config: &GameConfig) -> Result<Story, String> {
    let story = match path {
        Some(path) => Story::load(path),
        None => Story::bundled(),
    }
    .map_err(|e| report(e, path))?;

    story
        .validate(&config.start_node, &config.game_over_node)
        .map_err(|e| report(e, path))?;
    Ok(story)
}

/// Print a story error with miette's report handler and return a summary.
fn report(err: StoryError, path: Option<&Path>) -> String {
    eprintln!("{:?}", miette::Report::new(err));
    format!("could not load {}", story_label(path))
}
