use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use settings::{load_settings, DEFAULT_SETTINGS_PATH};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{parse_step_target, Geometry, StepTarget};

#[derive(Parser, Debug)]
#[command(name = "startpage", about = "Start page command bar and carousel")]
struct Cli {
    /// Settings file; defaults to ./startpage.toml when present.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a settings file seeded with the default bookmarks.
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Evaluate an arithmetic expression.
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
        #[arg(long, allow_hyphen_values = true)]
        last: Option<f64>,
    },
    /// Show bookmark matches for a query.
    Route { query: String },
    /// Run a query the way the search box submit does.
    Submit {
        #[arg(allow_hyphen_values = true)]
        query: String,
        #[arg(long, allow_hyphen_values = true)]
        last: Option<f64>,
    },
    /// Move the carousel and print the scroll command.
    Step {
        #[command(flatten)]
        geometry: Geometry,
        /// `next`, `prev` or a target index.
        #[arg(value_parser = parse_step_target, allow_hyphen_values = true)]
        target: StepTarget,
    },
    /// Replay wheel, key and pointer events from stdin through the carousel.
    Gestures {
        #[command(flatten)]
        geometry: Geometry,
    },
    /// Render a Todoist task list read from stdin as the task card.
    Tasks,
    /// Print the current time in the configured format.
    Clock,
    /// Print the forecast request for the configured location.
    Weather,
    /// Read lines from stdin; `?text` previews, anything else submits.
    Shell,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    if let Command::Init { force } = cli.command {
        let path = cli
            .settings
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        return commands::init(&path, force, out);
    }

    let settings = load_settings(cli.settings.as_deref())?;

    match cli.command {
        Command::Init { .. } => Ok(()),
        Command::Eval { expression, last } => commands::eval(&expression, last, out),
        Command::Route { query } => commands::route_query(&settings, &query, out),
        Command::Submit { query, last } => commands::submit(&settings, &query, last, out),
        Command::Step { geometry, target } => commands::step(&settings, geometry, target, out),
        Command::Gestures { geometry } => {
            let stdin = std::io::stdin();
            commands::gestures(&settings, geometry, stdin.lock(), out)
        }
        Command::Tasks => {
            let stdin = std::io::stdin();
            commands::tasks(stdin.lock(), out)
        }
        Command::Clock => commands::clock(&settings, out),
        Command::Weather => commands::weather(&settings, out),
        Command::Shell => {
            let stdin = std::io::stdin();
            commands::shell(&settings, stdin.lock(), out)
        }
    }
}
