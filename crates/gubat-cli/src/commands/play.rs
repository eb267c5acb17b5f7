use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use gubat_engine::{FileStore, Game, GameConfig, HpStatus, SaveStore, Screen, Session};
use gubat_story::{ItemId, catalog};
use log::warn;

const HELP: &str = "  Commands:
    <number>      take that choice
    inventory, i  list what you carry
    status        show name, HP and inventory
    restart       start the story over
    help          show this help
    quit, q       leave (progress is saved)";

pub fn run(
    story: Option<&Path>,
    save_dir: &Path,
    name: Option<&str>,
    new: bool,
) -> Result<(), String> {
    let config = GameConfig::default();
    let story = super::load_story(story, &config)?;
    let store = FileStore::new(save_dir);
    let game = if new {
        Game::new(config, store)
    } else {
        Game::restore(config, store)
    };
    let mut session = Session::new(story, game).map_err(|e| e.to_string())?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    let mut resumed = false;
    if session.state().is_started() {
        match session.resume() {
            Ok(_) => {
                println!(
                    "  {} {}'s hunt.",
                    "Resuming".bold(),
                    session.state().player_name()
                );
                resumed = true;
            }
            Err(e) => warn!("cannot resume saved game: {e}"),
        }
    }
    if !resumed {
        let name = match name {
            Some(name) => name.to_string(),
            None => match prompt(&mut reader, "  What is your name, hunter? ")? {
                Some(name) => name,
                None => return Ok(()),
            },
        };
        session.start(&name).map_err(|e| e.to_string())?;
    }
    println!("  Type 'help' for commands, 'quit' to exit.");
    render(&session)?;

    loop {
        let Some(input) = prompt(&mut reader, "> ")? else {
            break;
        };
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "q" => break,
            "help" => println!("{HELP}\n"),
            "inventory" | "i" => print_inventory(session.state().inventory()),
            "status" => print_status(&session),
            "restart" => {
                let name = session.state().player_name().to_string();
                session.start(&name).map_err(|e| e.to_string())?;
                render(&session)?;
            }
            other => match other.parse::<usize>() {
                Ok(_) if session.state().is_ended() => {
                    println!(
                        "{}\n",
                        "  The story has ended. Type 'restart' or 'quit'.".yellow()
                    );
                }
                Ok(n) if n >= 1 => match session.choose(n - 1) {
                    Ok(_) => render(&session)?,
                    Err(e) => println!("  {}\n", e.to_string().yellow()),
                },
                _ => println!(
                    "  {}\n",
                    format!("Unknown command '{input}'. Type 'help'.").yellow()
                ),
            },
        }
    }

    Ok(())
}

/// Print `text`, then read one trimmed line. `None` at end of input.
fn prompt(reader: &mut impl BufRead, text: &str) -> Result<Option<String>, String> {
    print!("{text}");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
        Err(e) => Err(e.to_string()),
    }
}

fn render<S: SaveStore>(session: &Session<S>) -> Result<(), String> {
    let screen = session.screen().map_err(|e| e.to_string())?;
    println!();
    print_hud(&screen);
    if let Some(message) = &screen.effect_message {
        println!("  {}", message.cyan().bold());
    }
    println!();
    for paragraph in screen.node.paragraphs() {
        println!("  {paragraph}\n");
    }

    if let Some(ending) = screen.ending {
        println!("  *** {} ***\n", ending.title().bold());
        println!("  Type 'restart' to play again or 'quit' to exit.\n");
        return Ok(());
    }

    for (i, choice) in screen.choices.iter().enumerate() {
        let needs: Vec<&str> = choice.required_items().into_iter().map(ItemId::as_str).collect();
        if needs.is_empty() {
            println!("  {}. {}", i + 1, choice.text);
        } else {
            let badge = format!("[Needs: {}]", needs.join(", "));
            println!("  {}. {} {}", i + 1, choice.text, badge.dimmed());
        }
    }
    println!();
    Ok(())
}

fn print_hud(screen: &Screen<'_>) {
    let state = screen.state;
    let hp = format!("HP {}/{}", state.hp(), state.max_hp());
    let hp = match screen.hp_status {
        HpStatus::Healthy => hp.green(),
        HpStatus::Wounded => hp.yellow(),
        HpStatus::Critical => hp.red(),
    };
    println!(
        "  {} | {} | {}",
        state.player_name().bold(),
        hp,
        inventory_line(state.inventory())
    );
}

fn print_status<S: SaveStore>(session: &Session<S>) {
    let state = session.state();
    println!("  Name: {}", state.player_name());
    println!(
        "  HP:   {}/{} ({})",
        state.hp(),
        state.max_hp(),
        state.hp_status()
    );
    println!("  {}", inventory_line(state.inventory()));
    println!("  At:   {}\n", state.current_node());
}

fn print_inventory(items: &[ItemId]) {
    if items.is_empty() {
        println!("  Inventory: (empty)\n");
        return;
    }
    println!("  Inventory:");
    for item in items {
        println!(
            "    {} - {}",
            item.as_str().bold(),
            catalog::describe_or_unknown(item).dimmed()
        );
    }
    println!();
}

fn inventory_line(items: &[ItemId]) -> String {
    if items.is_empty() {
        return "Inventory: (empty)".to_string();
    }
    let names: Vec<&str> = items.iter().map(ItemId::as_str).collect();
    format!("Inventory: {}", names.join(", "))
}
