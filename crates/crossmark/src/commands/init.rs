use std::process::ExitCode;

use clap::Args;
use crossmark_core::{ConfigError, config};

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    force: bool,
    /// Print the default configuration instead of writing it
    #[arg(long, conflicts_with = "force")]
    stdout: bool,
}

/// Writes the commented default configuration to
/// `~/.config/crossmark/config.toml`.
pub fn execute(args: &InitArgs) -> ExitCode {
    if args.stdout {
        print!("{}", config::template::generate());
        return ExitCode::SUCCESS;
    }

    let Some(path) = config::config_path() else {
        eprintln!("Error: could not determine home directory.");
        return ExitCode::FAILURE;
    };

    match config::write_default(&path, args.force) {
        Ok(()) => {
            println!("Created {}", path.display());
            println!("\nEdit this file to pick the target window and customize the overlay.");
            ExitCode::SUCCESS
        }
        Err(ConfigError::AlreadyExists { .. }) => {
            println!("Already exists: {} (use --force to overwrite)", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
