use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Root listing page of the catalogue
pub const ROOT_URL: &str = "https://books.toscrape.com/";

/// Politeness pause between two listing pages
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

/// Main configuration structure for Shelf-Scraper
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseUrl,
    pub crawler: CrawlerConfig,
}

/// Crawl behaviour configuration
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// First listing page to fetch
    pub root_url: Url,

    /// Delay observed before following a next-page link
    pub page_delay: Duration,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            root_url: Url::parse(ROOT_URL).expect("ROOT_URL is a valid URL"),
            page_delay: DEFAULT_PAGE_DELAY,
            user_agent: format!("shelf-scraper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Location of the SQLite database holding the `books` table
///
/// Parsed from a connection string of the form `sqlite://<path>`,
/// `sqlite:<path>` or a bare filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseUrl {
    path: PathBuf,
}

impl DatabaseUrl {
    /// Wraps a filesystem path directly
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses a connection string, stripping any `sqlite:` scheme prefix
    ///
    /// Returns `None` when no path remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let path = raw
            .strip_prefix("sqlite://")
            .or_else(|| raw.strip_prefix("sqlite:"))
            .unwrap_or(raw);

        if path.is_empty() {
            return None;
        }

        Some(Self::from_path(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sqlite://{}", self.path.display())
    }
}
