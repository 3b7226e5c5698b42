//! Crawler module for walking the course catalog
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and failure classification
//! - HTML parsing of listing and detail pages
//! - Bounded-concurrency harvest passes with per-origin pacing
//! - Level-by-level crawl orchestration and detail extraction

mod accumulator;
mod coordinator;
mod detail;
mod fetcher;
mod harvester;
mod levels;
mod parser;
mod scheduler;

pub use accumulator::CourseAccumulator;
pub use coordinator::{next_frontier, run_crawl, CrawlOutcome, CrawlSession, LevelReport};
pub use detail::{apply_regions, DetailExtractor};
pub use fetcher::{build_http_client, fetch_body, fetch_url, format_user_agent, FetchResult};
pub use harvester::{select_links, Harvester, LinkRecord, ScrapedLink};
pub use levels::{Level, LinkFilters};
pub use parser::{extract_anchors, extract_regions, Anchor, DetailRegions};
pub use scheduler::Scheduler;
