//! Crawl session - level-by-level crawl orchestration
//!
//! This module contains the crawl loop that walks the catalog hierarchy:
//! - Harvesting each level's links from the current frontier
//! - Joining harvested hrefs onto their source pages to form the next frontier
//! - Handing the final frontier to the detail extractor
//!
//! Each level is visited exactly once. There is no global state; the session
//! returns everything it produced.

use crate::config::Config;
use crate::crawler::detail::DetailExtractor;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::harvester::{Harvester, LinkRecord, ScrapedLink};
use crate::crawler::levels::{Level, LinkFilters};
use crate::crawler::scheduler::Scheduler;
use crate::model::Course;
use crate::url::join;
use crate::CatalogError;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use url::Url;

/// Counts for one level of a finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelReport {
    pub level: Level,
    /// URLs scheduled for this level
    pub frontier: usize,
    /// Pages fetched successfully
    pub fetched: usize,
    /// Links kept, or courses built on the detail level
    pub kept: usize,
}

/// Everything a crawl produced
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// One record per fetched detail page, ordered by URL
    pub courses: Vec<Course>,
    pub levels: Vec<LevelReport>,
}

/// One crawl of a catalog, from the root page down to the detail pages
#[derive(Debug, Clone)]
pub struct CrawlSession {
    base_url: String,
    filters: LinkFilters,
    harvester: Harvester,
    details: DetailExtractor,
}

impl CrawlSession {
    /// Creates a session for the configured catalog
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSession)` - Ready to run
    /// * `Err(CatalogError)` - The base URL is invalid or the HTTP client
    ///   could not be built
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        Url::parse(&config.catalog.base_url)?;
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        let scheduler = Scheduler::new(&config.crawler);

        Ok(Self {
            base_url: config.catalog.base_url.clone(),
            filters: LinkFilters::from_config(&config.catalog),
            harvester: Harvester::new(client.clone(), scheduler.clone()),
            details: DetailExtractor::new(client, scheduler),
        })
    }

    /// Runs every level in order and returns the extracted courses
    pub async fn run(&self) -> CrawlOutcome {
        let start_time = Instant::now();
        tracing::info!("Starting crawl at {}", self.base_url);

        let mut seeds = vec![self.base_url.clone()];
        let mut levels = Vec::with_capacity(Level::HARVESTED.len() + 1);

        for level in Level::HARVESTED {
            let links = self.harvest_level(level, &seeds).await;
            let next = next_frontier(&seeds, &links);

            let report = LevelReport {
                level,
                frontier: seeds.len(),
                fetched: links.len(),
                kept: links.values().map(Vec::len).sum(),
            };
            tracing::info!(
                "Finished {} level: {}/{} pages fetched, {} links kept, {} URLs next",
                level,
                report.fetched,
                report.frontier,
                report.kept,
                next.len()
            );
            levels.push(report);
            seeds = next;
        }

        let courses = self.details.extract(&seeds).await;
        tracing::info!(
            "Finished {} level: {} courses from {} pages",
            Level::Detail,
            courses.len(),
            seeds.len()
        );
        levels.push(LevelReport {
            level: Level::Detail,
            frontier: seeds.len(),
            fetched: courses.len(),
            kept: courses.len(),
        });

        tracing::info!(
            "Crawl completed: {} courses in {:?}",
            courses.len(),
            start_time.elapsed()
        );

        CrawlOutcome { courses, levels }
    }

    /// Harvests one level's links from `seeds`
    pub async fn harvest_level(
        &self,
        level: Level,
        seeds: &[String],
    ) -> HashMap<String, Vec<ScrapedLink>> {
        let filters = self.filters.clone();
        self.harvester
            .harvest(
                seeds,
                move |text, href, source| filters.classify(level, text, href, source),
                ScrapedLink::new,
            )
            .await
    }
}

/// Builds the next frontier from a level's harvest
///
/// Seeds are visited in order and each link is joined onto its seed; the
/// first occurrence of a URL is kept.
pub fn next_frontier<T: LinkRecord>(
    seeds: &[String],
    links: &HashMap<String, Vec<T>>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut frontier = Vec::new();

    for seed in seeds {
        let Some(found) = links.get(seed) else {
            continue;
        };
        for link in found {
            let url = join(seed, link.href());
            if seen.insert(url.clone()) {
                frontier.push(url);
            }
        }
    }

    frontier
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use course_crawler::config::load_config;
/// use course_crawler::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let outcome = run_crawl(&config).await?;
/// println!("{} courses", outcome.courses.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, CatalogError> {
    let session = CrawlSession::new(config)?;
    Ok(session.run().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, CrawlerConfig, IndexConfig, OutputConfig, UserAgentConfig};

    fn create_test_config(base_url: &str) -> Config {
        Config {
            catalog: CatalogConfig {
                base_url: base_url.to_string(),
                start_term: None,
                terms: vec![],
                schools: vec![],
            },
            crawler: CrawlerConfig::default(),
            user_agent: UserAgentConfig {
                crawler_name: "TestCrawler".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            output: OutputConfig {
                data_dir: "./data".to_string(),
            },
            index: IndexConfig::default(),
        }
    }

    fn links(source: &str, hrefs: &[&str]) -> Vec<ScrapedLink> {
        hrefs
            .iter()
            .map(|href| ScrapedLink::new("", href, source))
            .collect()
    }

    #[test]
    fn test_next_frontier_joins_and_dedups() {
        let seeds = vec![
            "https://catalog.example.edu/4980".to_string(),
            "https://catalog.example.edu/4990".to_string(),
        ];
        let mut harvested = HashMap::new();
        harvested.insert(
            seeds[0].clone(),
            links(&seeds[0], &["WCAS", "MEAS", "WCAS"]),
        );
        harvested.insert(seeds[1].clone(), links(&seeds[1], &["4990/WCAS"]));

        assert_eq!(
            next_frontier(&seeds, &harvested),
            vec![
                "https://catalog.example.edu/4980/WCAS",
                "https://catalog.example.edu/4980/MEAS",
                "https://catalog.example.edu/4990/WCAS",
            ]
        );
    }

    #[test]
    fn test_next_frontier_skips_failed_seeds() {
        let seeds = vec!["https://a.example.edu/x".to_string()];
        let harvested: HashMap<String, Vec<ScrapedLink>> = HashMap::new();
        assert!(next_frontier(&seeds, &harvested).is_empty());
    }

    #[test]
    fn test_session_rejects_invalid_base_url() {
        let result = CrawlSession::new(&create_test_config("not a url"));
        assert!(matches!(result, Err(CatalogError::UrlParse(_))));
    }

    #[test]
    fn test_session_creation() {
        assert!(CrawlSession::new(&create_test_config("https://catalog.example.edu/")).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_catalog_yields_empty_outcome() {
        // Nothing listens on port 9 of localhost
        let session = CrawlSession::new(&create_test_config("http://127.0.0.1:9/")).unwrap();
        let outcome = session.run().await;

        assert!(outcome.courses.is_empty());
        assert_eq!(outcome.levels.len(), 5);
        assert_eq!(outcome.levels[0].frontier, 1);
        assert_eq!(outcome.levels[0].fetched, 0);
        assert_eq!(outcome.levels[1].frontier, 0);
    }
}
