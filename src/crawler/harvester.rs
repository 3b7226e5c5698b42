//! Bounded-concurrency link harvesting
//!
//! One harvest pass fetches every seed page, classifies each anchor on it
//! and groups the accepted links by the page they were found on.

use crate::crawler::fetcher::fetch_body;
use crate::crawler::parser::extract_anchors;
use crate::crawler::scheduler::Scheduler;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

/// A harvested link, as the level orchestrator sees it
pub trait LinkRecord {
    /// Visible text of the anchor, trimmed and in original case
    fn text(&self) -> &str;

    /// Raw href of the anchor
    fn href(&self) -> &str;

    /// Page the anchor was found on
    fn source_url(&self) -> &str;
}

/// The link record every catalog level produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedLink {
    pub text: String,
    pub href: String,
    pub source_url: String,
}

impl ScrapedLink {
    pub fn new(text: &str, href: &str, source_url: &str) -> Self {
        Self {
            text: text.to_string(),
            href: href.to_string(),
            source_url: source_url.to_string(),
        }
    }
}

impl LinkRecord for ScrapedLink {
    fn text(&self) -> &str {
        &self.text
    }

    fn href(&self) -> &str {
        &self.href
    }

    fn source_url(&self) -> &str {
        &self.source_url
    }
}

/// Runs harvest passes through a shared client and scheduler
#[derive(Debug, Clone)]
pub struct Harvester {
    client: Client,
    scheduler: Scheduler,
}

impl Harvester {
    pub fn new(client: Client, scheduler: Scheduler) -> Self {
        Self { client, scheduler }
    }

    /// Fetches every seed and collects the anchors accepted by `classify`
    ///
    /// `classify` receives the lower-cased visible text, the raw href and
    /// the seed URL. `build` receives the same values with the text in its
    /// original case. Seeds whose fetch fails are absent from the result;
    /// a fetched page with no accepted anchors maps to an empty list.
    ///
    /// Returns once every fetch of the pass has finished.
    pub async fn harvest<T, C, B>(
        &self,
        seeds: &[String],
        classify: C,
        build: B,
    ) -> HashMap<String, Vec<T>>
    where
        T: Send + 'static,
        C: Fn(&str, &str, &str) -> bool + Send + Sync + 'static,
        B: Fn(&str, &str, &str) -> T + Send + Sync + 'static,
    {
        let classify = Arc::new(classify);
        let build = Arc::new(build);
        let mut tasks = JoinSet::new();

        for seed in seeds {
            let seed = seed.clone();
            let client = self.client.clone();
            let scheduler = self.scheduler.clone();
            let classify = Arc::clone(&classify);
            let build = Arc::clone(&build);

            tasks.spawn(async move {
                let _permit = scheduler.acquire(&seed).await?;
                let body = fetch_body(&client, &seed).await?;
                let links = select_links(&body, &seed, classify.as_ref(), build.as_ref());
                Some((seed, links))
            });
        }

        let mut by_source = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some((seed, links))) => {
                    by_source.insert(seed, links);
                }
                Ok(None) => {}
                Err(e) => tracing::error!("Harvest task failed: {}", e),
            }
        }

        by_source
    }
}

/// Classifies the anchors of one page
pub fn select_links<T>(
    html: &str,
    source_url: &str,
    classify: impl Fn(&str, &str, &str) -> bool,
    build: impl Fn(&str, &str, &str) -> T,
) -> Vec<T> {
    extract_anchors(html)
        .into_iter()
        .filter(|anchor| classify(&anchor.text.to_lowercase(), &anchor.href, source_url))
        .map(|anchor| build(&anchor.text, &anchor.href, source_url))
        .collect()
}
