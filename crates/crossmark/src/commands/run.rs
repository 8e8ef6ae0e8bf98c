use std::process::ExitCode;

use clap::Args;
use crossmark_core::config::Config;

#[derive(Args)]
pub struct RunArgs {
    /// Window title to track (substring match unless --exact)
    title: Option<String>,
    /// Require the whole title to match and track only the first hit
    #[arg(long)]
    exact: bool,
    /// Delay between refreshes in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,
    /// Let the overlay be dragged with the left mouse button
    #[arg(long)]
    interactive: bool,
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(args: &RunArgs, mut config: Config) -> Config {
    if let Some(title) = &args.title {
        config.target.title = title.clone();
    }
    if args.exact {
        config.target.exact = true;
    }
    if let Some(ms) = args.interval_ms {
        config.refresh.interval_ms = ms;
    }
    if args.interactive {
        config.surface.interactive = true;
    }
    config.validate();
    config
}

#[cfg(windows)]
pub fn execute(args: &RunArgs, config: Config) -> ExitCode {
    use std::time::Duration;

    use crossmark_core::OverlayError;
    use crossmark_windows::RunOptions;

    let config = apply_overrides(args, config);
    let options = RunOptions {
        query: config.target.title.clone(),
        mode: config.target.match_mode(),
        frame: config.target.frame,
        style: config.style.resolve(),
        interval: Duration::from_millis(config.refresh.interval_ms),
        interactive: config.surface.interactive,
    };

    match crossmark_windows::run(options) {
        Ok(summary) => {
            tracing::info!(
                "tracked {} window(s), stopped: {:?}",
                summary.tracked,
                summary.exit
            );
            ExitCode::SUCCESS
        }
        Err(e @ OverlayError::NotFound { .. }) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(windows))]
pub fn execute(args: &RunArgs, config: Config) -> ExitCode {
    let config = apply_overrides(args, config);
    eprintln!(
        "Error: cannot track '{}': the overlay is only supported on Windows.",
        config.target.title
    );
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossmark_core::MatchMode;

    fn args() -> RunArgs {
        RunArgs {
            title: None,
            exact: false,
            interval_ms: None,
            interactive: false,
        }
    }

    #[test]
    fn no_flags_keeps_config() {
        // Arrange
        let config = Config::default();

        // Act
        let resolved = apply_overrides(&args(), config);

        // Assert
        assert_eq!(resolved.target.title, "Rechner");
        assert_eq!(resolved.target.match_mode(), MatchMode::Substring);
        assert_eq!(resolved.refresh.interval_ms, 30);
        assert!(!resolved.surface.interactive);
    }

    #[test]
    fn flags_override_config() {
        // Arrange
        let args = RunArgs {
            title: Some("Notepad".into()),
            exact: true,
            interval_ms: Some(100),
            interactive: true,
        };

        // Act
        let resolved = apply_overrides(&args, Config::default());

        // Assert
        assert_eq!(resolved.target.title, "Notepad");
        assert_eq!(resolved.target.match_mode(), MatchMode::Exact);
        assert_eq!(resolved.refresh.interval_ms, 100);
        assert!(resolved.surface.interactive);
    }

    #[test]
    fn interval_override_is_clamped() {
        // Arrange
        let args = RunArgs {
            interval_ms: Some(0),
            ..args()
        };

        // Act
        let resolved = apply_overrides(&args, Config::default());

        // Assert
        assert_eq!(resolved.refresh.interval_ms, 5);
    }
}
