use serde::Deserialize;

/// Main configuration structure for the course crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub index: IndexConfig,
}

/// Where the crawl starts and which branches of the hierarchy it keeps
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Root page of the catalog, listing the available terms
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Term code to crawl; added to the term allow-list
    #[serde(rename = "start-term", default)]
    pub start_term: Option<String>,

    /// Term codes whose schools are followed (empty = all)
    #[serde(default)]
    pub terms: Vec<String>,

    /// School codes whose subjects are followed (empty = all)
    #[serde(default)]
    pub schools: Vec<String>,
}

impl CatalogConfig {
    /// Term allow-list including the start term
    pub fn allowed_terms(&self) -> Vec<String> {
        let mut terms = self.terms.clone();
        if let Some(start) = &self.start_term {
            if !terms.contains(start) {
                terms.push(start.clone());
            }
        }
        terms
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches within one pass
    #[serde(rename = "max-concurrent-fetches", default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: u32,

    /// Minimum time between requests to the same origin (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent_fetches(),
            request_delay_ms: default_request_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_max_concurrent_fetches() -> u32 {
    16
}

fn default_request_delay_ms() -> u64 {
    50
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory holding course batch files; crawls write here and the
    /// index store loads from here
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

/// Index store configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexConfig {
    /// What to do with records whose quarter or section did not parse
    #[serde(rename = "unparsed-identity", default)]
    pub unparsed_identity: IdentityPolicy,
}

/// Handling of courses whose URL-derived quarter or section is zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityPolicy {
    /// Index the record anyway; a zero quarter only keeps it out of the term index
    #[default]
    Keep,
    /// Leave the record out of every index
    Exclude,
}
