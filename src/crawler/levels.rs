//! Catalog levels and the link predicate of each
//!
//! The catalog is walked as term list, school list, subject list, section
//! list and finally the course detail pages.

use crate::config::CatalogConfig;
use crate::url::last_segment;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Term links read like "4980 Fall 2024"
static TERM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}").unwrap());

/// Section links read like "20: Lecture"
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+:").unwrap());

/// Level of the catalog hierarchy a crawl pass works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Root page listing terms
    Term,
    /// A term page listing schools
    School,
    /// A school page listing subjects
    Subject,
    /// A subject page listing sections
    Section,
    /// Course detail pages
    Detail,
}

impl Level {
    /// Levels that produce links to the next level, in crawl order
    pub const HARVESTED: [Level; 4] = [Level::Term, Level::School, Level::Subject, Level::Section];

    /// Returns the level following this one
    pub fn next(self) -> Option<Level> {
        match self {
            Level::Term => Some(Level::School),
            Level::School => Some(Level::Subject),
            Level::Subject => Some(Level::Section),
            Level::Section => Some(Level::Detail),
            Level::Detail => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Term => "term",
            Level::School => "school",
            Level::Subject => "subject",
            Level::Section => "section",
            Level::Detail => "detail",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Term and school allow-lists; an empty list allows everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilters {
    terms: Vec<String>,
    schools: Vec<String>,
}

impl LinkFilters {
    pub fn new(terms: Vec<String>, schools: Vec<String>) -> Self {
        Self { terms, schools }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.allowed_terms(), config.schools.clone())
    }

    /// Whether a page URL belongs to an allow-listed term
    pub fn allows_term(&self, url: &str) -> bool {
        self.terms.is_empty() || self.terms.iter().any(|term| url.contains(term.as_str()))
    }

    /// Whether a page URL belongs to an allow-listed school
    pub fn allows_school(&self, url: &str) -> bool {
        self.schools.is_empty() || self.schools.iter().any(|school| url.contains(school.as_str()))
    }

    /// Decides whether an anchor found on a page of `level` leads to the
    /// next level
    ///
    /// `text` must already be lower-cased.
    pub fn classify(&self, level: Level, text: &str, href: &str, source_url: &str) -> bool {
        match level {
            Level::Term => TERM_RE.is_match(text),
            Level::School => {
                self.allows_term(source_url) && (text.contains("school") || text.contains("college"))
            }
            Level::Subject => {
                self.allows_school(source_url) && href.starts_with(last_segment(source_url))
            }
            Level::Section => SECTION_RE.is_match(text),
            Level::Detail => false,
        }
    }
}
