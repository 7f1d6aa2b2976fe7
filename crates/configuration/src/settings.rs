use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub journal: Journal,
    pub server: Server,
    pub report: Report,
}

/// Where the journal file lives.
#[derive(Debug, Clone, Deserialize)]
pub struct Journal {
    /// Path to the JSON journal document holding the user's trades.
    pub path: PathBuf,
}

/// Bind parameters for the read-only API server.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

/// Defaults applied when a command does not specify them.
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    /// The period selector used when none is given on the command line
    /// (one of: all-time, daily, weekly, monthly, yearly).
    pub default_period: String,
}
