// In crates/app-config/src/types.rs

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    pub server: ServerSettings,
    /// Where the daily price series comes from.
    pub market_data: MarketDataSettings,
    #[serde(default)]
    pub debug: DebugSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The default log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Directory holding `index.html` and `main.js`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Yahoo,
    Csv,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketDataSettings {
    pub provider: Provider,
    /// The symbol to chart (e.g. "BTC-USD").
    pub symbol: String,
    /// The REST base URL of the Yahoo chart API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// The history window requested from Yahoo (e.g. "1y", "max").
    #[serde(default = "default_range")]
    pub range: String,
    /// Required when `provider = "csv"`.
    pub csv_path: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DebugSettings {
    /// If set, every computed series is also written to this CSV file.
    pub csv_dump: Option<String>,
}

// Helper functions for serde defaults.
fn default_static_dir() -> String { "static".into() }
fn default_base_url() -> String { "https://query2.finance.yahoo.com".into() }
fn default_range() -> String { "max".into() }
