use std::path::Path;

use gubat_engine::{FileStore, Game, GameConfig};

pub fn run(save_dir: &Path) -> Result<(), String> {
    let mut game = Game::new(GameConfig::default(), FileStore::new(save_dir));
    game.reset_game().map_err(|e| e.to_string())?;
    println!("  Saved game cleared.");
    Ok(())
}
