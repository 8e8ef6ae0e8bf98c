mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crossmark_core::{config, log};

#[derive(Parser)]
#[command(
    name = "crossmark",
    version,
    about = "A click-through crosshair overlay that tracks application windows"
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init(commands::init::InitArgs),
    /// Draw crosshairs over matching windows until they close
    Run(commands::run::RunArgs),
    /// List visible top-level windows
    List(commands::list::ListArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The subscriber must exist before `config::load` reports problems.
    let logging = config::try_load()
        .map(|config| config.logging)
        .unwrap_or_default();
    // Held until exit so the file appender flushes.
    let _guard = log::init(&logging, cli.verbose);
    let config = config::load();

    match cli.command {
        Commands::Init(args) => commands::init::execute(&args),
        Commands::Run(args) => commands::run::execute(&args, config),
        Commands::List(args) => commands::list::execute(&args),
    }
}
