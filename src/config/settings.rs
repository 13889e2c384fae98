//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Login and token settings
    pub auth: AuthSettings,

    /// Simulated server links (ETOUR, SMOS)
    pub simulation: SimulationSettings,

    /// Banner upload limits
    pub banners: BannerSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Load the demo seed data into the in-memory repositories
    pub seed_demo_data: bool,

    /// `pretty` or `json`
    pub log_format: String,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Login configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Secret key for signing tokens
    pub jwt_secret: String,

    /// Access token expiry in minutes
    pub token_expiry_minutes: i64,

    /// Consecutive wrong passwords before an account locks
    pub max_failed_attempts: u32,
}

/// Simulated connection behaviour of the in-memory "servers".
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationSettings {
    /// Initial state of the ETOUR link
    pub etour_connected: bool,

    /// Initial state of the SMOS link
    pub smos_connected: bool,

    /// Artificial delay applied to every repository call
    pub latency_ms: u64,

    /// Probability (0.0..=1.0) that a repository call fails at random
    pub failure_rate: f64,
}

/// Banner upload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BannerSettings {
    /// Largest accepted image in bytes
    pub max_image_bytes: usize,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env); empty allows any origin
    pub allowed_origins: Vec<String>,

    /// Preflight cache lifetime
    pub max_age_secs: u64,
}

/// Minimum required length for JWT secret (256 bits = 32 bytes)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

const DEV_JWT_SECRET: &str = "usecase-desk-development-secret-0123456789";

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 4. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// if the JWT secret is too short, or if the failure rate is outside 0..=1.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Self::defaults(&environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("auth.jwt_secret", std::env::var("JWT_SECRET").ok())?
            .build()?
            .try_deserialize()
            .and_then(Self::checked)
    }

    /// Built-in defaults only, no files or environment. Used by tests and
    /// the console walkthrough.
    pub fn local() -> Result<Self, ConfigError> {
        Self::defaults("test")?
            .build()?
            .try_deserialize()
            .and_then(Self::checked)
    }

    fn defaults(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", environment)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("auth.jwt_secret", DEV_JWT_SECRET)?
            .set_default("auth.token_expiry_minutes", 60)?
            .set_default("auth.max_failed_attempts", 5)?
            .set_default("simulation.etour_connected", true)?
            .set_default("simulation.smos_connected", true)?
            .set_default("simulation.latency_ms", 0)?
            .set_default("simulation.failure_rate", 0.0)?
            .set_default("banners.max_image_bytes", 5_i64 * 1024 * 1024)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("cors.max_age_secs", 3600)?
            .set_default("seed_demo_data", true)?
            .set_default("log_format", "pretty")
    }

    fn checked(settings: Self) -> Result<Self, ConfigError> {
        if settings.auth.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "JWT secret must be at least {} characters. Current length: {}",
                MIN_JWT_SECRET_LENGTH,
                settings.auth.jwt_secret.len()
            )));
        }
        if !(0.0..=1.0).contains(&settings.simulation.failure_rate) {
            return Err(ConfigError::Message(format!(
                "simulation.failure_rate must be within 0.0..=1.0, got {}",
                settings.simulation.failure_rate
            )));
        }
        Ok(settings)
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
