//! CLI frontend for the False Prophet interactive fiction engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fp",
    about = "False Prophet: talk your way through a scenario",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scenario interactively
    Play {
        /// Scenario YAML file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Show keywords and allow dumping the context
        #[arg(long)]
        cheat: bool,

        /// Directory for saved games (default: ~/.false_prophet)
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Room a new game starts in
        #[arg(long, default_value = "throne")]
        start: String,

        /// Minimum similarity (0.0-1.0) for matching an utterance to a key
        #[arg(long, default_value = "0.85")]
        threshold: f64,
    },

    /// Say one thing to a character and print the reply and new context
    Say {
        /// Character to talk to
        character: String,

        /// What to say
        utterance: String,

        /// Scenario YAML file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Encoded context from a previous turn (default: a new game)
        #[arg(short, long)]
        context: Option<String>,

        /// Room a new game starts in
        #[arg(long, default_value = "throne")]
        start: String,

        /// Minimum similarity (0.0-1.0) for matching an utterance to a key
        #[arg(long, default_value = "0.85")]
        threshold: f64,
    },

    /// Validate a scenario and report diagnostics
    Check {
        /// Scenario YAML file
        #[arg(short, long)]
        scenario: PathBuf,
    },

    /// List the rooms and characters of a scenario
    List {
        /// Scenario YAML file
        #[arg(short, long)]
        scenario: PathBuf,
    },

    /// Show a room or character
    Show {
        /// Room or character name
        name: String,

        /// Scenario YAML file
        #[arg(short, long)]
        scenario: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            scenario,
            cheat,
            save_dir,
            start,
            threshold,
        } => {
            let save_dir = save_dir.unwrap_or_else(commands::play::default_save_dir);
            commands::load_engine(&scenario, &start, threshold)
                .and_then(|engine| commands::play::run(&engine, cheat, &save_dir))
        }
        Commands::Say {
            character,
            utterance,
            scenario,
            context,
            start,
            threshold,
        } => commands::load_engine(&scenario, &start, threshold).and_then(|engine| {
            commands::say::run(&engine, &character, &utterance, context.as_deref())
        }),
        Commands::Check { scenario } => commands::check::run(&scenario),
        Commands::List { scenario } => commands::list::run(&scenario),
        Commands::Show { name, scenario } => commands::show::run(&scenario, &name),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
