use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub directory: DirectorySettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geocoder_endpoint(),
            api_key: String::new(),
        }
    }
}

fn default_geocoder_endpoint() -> String { "https://api.opencagedata.com".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    #[serde(default = "default_directory_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_restaurants_table")]
    pub restaurants_table: String,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            endpoint: default_directory_endpoint(),
            api_key: String::new(),
            restaurants_table: default_restaurants_table(),
        }
    }
}

fn default_directory_endpoint() -> String { "http://localhost:54321".to_string() }
fn default_restaurants_table() -> String { "restaurants".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self { jwt_secret: default_jwt_secret() }
    }
}

fn default_jwt_secret() -> String { "change-me".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_capacity")]
    pub capacity: u64,
    #[serde(default = "default_session_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            capacity: default_session_capacity(),
            ttl_secs: default_session_ttl_secs(),
        }
    }
}

fn default_session_capacity() -> u64 { 10_000 }
fn default_session_ttl_secs() -> u64 { 1800 }

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationSettings {
    /// Quiet period before an address resolution fires.
    #[serde(default = "default_address_debounce_ms")]
    pub address_debounce_ms: u64,
    /// Quiet period before a name-availability check fires.
    #[serde(default = "default_name_debounce_ms")]
    pub name_debounce_ms: u64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            address_debounce_ms: default_address_debounce_ms(),
            name_debounce_ms: default_name_debounce_ms(),
        }
    }
}

// App heuristics carried over as-is
fn default_address_debounce_ms() -> u64 { 1000 }
fn default_name_debounce_ms() -> u64 { 500 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with SMAAK_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with SMAAK_)
            // e.g., SMAAK_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SMAAK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SMAAK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
