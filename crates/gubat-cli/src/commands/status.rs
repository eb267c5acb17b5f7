use std::path::Path;

use gubat_engine::{FileStore, Game, GameConfig};
use gubat_story::ItemId;

/// Print the saved game. A corrupted record is discarded, as it would be on
/// the next `play`.
pub fn run(save_dir: &Path) -> Result<(), String> {
    let game = Game::restore(GameConfig::default(), FileStore::new(save_dir));
    let state = game.state();

    if !state.is_started() {
        println!("  No saved game.");
        return Ok(());
    }

    let inventory: Vec<&str> = state.inventory().iter().map(ItemId::as_str).collect();
    println!("  Player:    {}", state.player_name());
    println!("  Node:      {}", state.current_node());
    println!(
        "  HP:        {}/{} ({})",
        state.hp(),
        state.max_hp(),
        state.hp_status()
    );
    println!("  Inventory: {}", inventory.join(", "));
    println!("  Effects:   {} applied", state.applied_effects().len());
    if state.is_ended() {
        println!("  The story has ended.");
    }

    Ok(())
}
