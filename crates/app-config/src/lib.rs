// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, DebugSettings, MarketDataSettings, Provider, ServerSettings, Settings};

/// Loads the application settings from the `config/` directory of the working directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from("config", &environment)
}

/// Same as [`load_settings`], reading from an explicit directory and environment name.
pub fn load_settings_from(dir: &str, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name(&format!("{}/base", dir)))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&format!("{}/{}", dir, environment)).required(false))
        // 3. Load settings from environment variables (e.g., `APP__SERVER__PORT=8080`).
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;
    validate(&settings)?;

    Ok(settings)
}

fn validate(settings: &Settings) -> Result<()> {
    if settings.market_data.provider == Provider::Csv && settings.market_data.csv_path.is_none() {
        return Err(Error::Invalid(
            "market_data.csv_path is required when market_data.provider = \"csv\"".into(),
        ));
    }
    if settings.market_data.symbol.trim().is_empty() {
        return Err(Error::Invalid("market_data.symbol must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BASE: &str = r#"
[app]
environment = "development"
log_level = "info"

[server]
host = "127.0.0.1"
port = 5000

[market_data]
provider = "yahoo"
symbol = "BTC-USD"
"#;

    #[test]
    fn loads_base_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();

        let settings = load_settings_from(dir.path().to_str().unwrap(), "development").unwrap();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.server.static_dir, "static");
        assert_eq!(settings.market_data.provider, Provider::Yahoo);
        assert_eq!(settings.market_data.range, "max");
        assert!(settings.debug.csv_dump.is_none());
    }

    #[test]
    fn environment_file_overrides_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();
        fs::write(dir.path().join("staging.toml"), "[server]\nport = 8081\n").unwrap();

        let settings = load_settings_from(dir.path().to_str().unwrap(), "staging").unwrap();
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn csv_provider_requires_a_path() {
        let dir = tempfile::tempdir().unwrap();
        let body = BASE.replace("provider = \"yahoo\"", "provider = \"csv\"");
        fs::write(dir.path().join("base.toml"), body).unwrap();

        let err = load_settings_from(dir.path().to_str().unwrap(), "development").unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
    }
}
