pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Journal, Report, Server, Settings};

/// Loads the application configuration from the `quill.toml` file.
///
/// The file is optional: every setting has a default, so a fresh checkout runs
/// without any configuration at all.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("journal.path", "journal.json")?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("report.default_period", "all-time")?
        // Tells the builder to look for a file named `quill.toml`, if present.
        .add_source(config::File::with_name("quill").required(false))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    tracing::debug!(journal = %settings.journal.path.display(), "configuration loaded");

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let settings = load_config().unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.report.default_period, "all-time");
    }
}
