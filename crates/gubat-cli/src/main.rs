//! Terminal frontend for the San Gubat story engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "gubat",
    about = "San Gubat: hunt the aswang in a branching story",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story in the terminal
    Play {
        /// Story file (default: the bundled story)
        #[arg(short, long)]
        story: Option<PathBuf>,

        /// Directory holding the save record
        #[arg(long, default_value = ".gubat")]
        save_dir: PathBuf,

        /// Player name (prompted for when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Ignore any saved game and start over
        #[arg(long)]
        new: bool,
    },

    /// Validate a story file
    Check {
        /// Story file (default: the bundled story)
        #[arg(short, long)]
        story: Option<PathBuf>,
    },

    /// List the nodes of a story
    Nodes {
        /// Story file (default: the bundled story)
        #[arg(short, long)]
        story: Option<PathBuf>,
    },

    /// Show the saved game
    Status {
        /// Directory holding the save record
        #[arg(long, default_value = ".gubat")]
        save_dir: PathBuf,
    },

    /// Delete the saved game
    Reset {
        /// Directory holding the save record
        #[arg(long, default_value = ".gubat")]
        save_dir: PathBuf,
    },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the -v level.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            story,
            save_dir,
            name,
            new,
        } => commands::play::run(story.as_deref(), &save_dir, name.as_deref(), new),
        Commands::Check { story } => commands::check::run(story.as_deref()),
        Commands::Nodes { story } => commands::nodes::run(story.as_deref()),
        Commands::Status { save_dir } => commands::status::run(&save_dir),
        Commands::Reset { save_dir } => commands::reset::run(&save_dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
