//! Output module for crawl and index reports
//!
//! This module handles:
//! - Summarizing a finished crawl level by level
//! - Displaying statistics about a loaded course index

pub mod stats;

pub use stats::{print_crawl_report, print_statistics, render_crawl_report, render_statistics};
