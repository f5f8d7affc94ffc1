use crate::config::types::{Config, CrawlerConfig, DatabaseUrl};
use crate::config::validation::validate;
use crate::ConfigError;

/// Environment variable holding the database connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Loads the configuration from the process environment
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - `DATABASE_URL` is missing or invalid
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Loads the configuration using an arbitrary variable lookup
///
/// # Arguments
///
/// * `lookup` - Returns the value of an environment variable, if set
///
/// # Example
///
/// ```
/// use shelf_scraper::config::load_config_from;
///
/// let config = load_config_from(|key| match key {
///     "DATABASE_URL" => Some("sqlite://books.db".to_string()),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(config.database.to_string(), "sqlite://books.db");
/// ```
pub fn load_config_from<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = Config {
        database: database_url_from(&lookup)?,
        crawler: CrawlerConfig::default(),
    };

    validate(&config)?;

    Ok(config)
}

/// Loads only the database location, as needed by the query service
pub fn load_database_url() -> Result<DatabaseUrl, ConfigError> {
    load_database_url_from(|key| std::env::var(key).ok())
}

/// Loads the database location using an arbitrary variable lookup
pub fn load_database_url_from<F>(lookup: F) -> Result<DatabaseUrl, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    database_url_from(&lookup)
}

fn database_url_from<F>(lookup: &F) -> Result<DatabaseUrl, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(DATABASE_URL_VAR)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingVar(DATABASE_URL_VAR))?;

    DatabaseUrl::parse(&raw).ok_or_else(|| {
        ConfigError::Validation(format!("{} has no database path: '{}'", DATABASE_URL_VAR, raw))
    })
}
