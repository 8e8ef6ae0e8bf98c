use std::path::PathBuf;

use crate::window::WindowHandle;

/// Errors raised while locating, tracking or drawing over target windows.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Target window with name '{query}' not found")]
    NotFound { query: String },

    #[error("Window 0x{handle:X} no longer exists")]
    StaleHandle { handle: WindowHandle },

    #[error("Failed to query geometry of window 0x{handle:X}: {reason}")]
    GeometryQuery { handle: WindowHandle, reason: String },

    #[error("Overlay surface error: {0}")]
    Surface(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

impl OverlayError {
    /// True for per-window geometry failures that a refresh expects to
    /// recover from on the next tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StaleHandle { .. } | Self::GeometryQuery { .. })
    }
}

/// A result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },
}

impl ConfigError {
    /// True when the config file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
