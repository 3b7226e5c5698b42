//! Plain-text reports for crawls and loaded indices

use crate::crawler::CrawlOutcome;
use crate::store::IndexStatistics;
use std::fmt::Write;

/// Renders per-level counts of a finished crawl
pub fn render_crawl_report(outcome: &CrawlOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Crawl Report ===\n");

    let _ = writeln!(out, "{:<10} {:>10} {:>10} {:>10}", "Level", "Frontier", "Fetched", "Kept");
    for report in &outcome.levels {
        let _ = writeln!(
            out,
            "{:<10} {:>10} {:>10} {:>10}",
            report.level.as_str(),
            report.frontier,
            report.fetched,
            report.kept
        );
    }
    let _ = writeln!(out);

    let failed: usize = outcome
        .levels
        .iter()
        .map(|report| report.frontier.saturating_sub(report.fetched))
        .sum();
    let _ = writeln!(out, "Courses extracted: {}", outcome.courses.len());
    let _ = writeln!(out, "Pages failed: {}", failed);

    out
}

/// Prints the crawl report to stdout
pub fn print_crawl_report(outcome: &CrawlOutcome) {
    print!("{}", render_crawl_report(outcome));
}

/// Renders statistics of a loaded course index
pub fn render_statistics(stats: &IndexStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Course Index Statistics ===\n");

    let _ = writeln!(out, "Overview:");
    let _ = writeln!(out, "  Batch files loaded: {}", stats.files_loaded);
    let _ = writeln!(out, "  Courses indexed: {}", stats.total_courses);
    if stats.excluded_courses > 0 {
        let _ = writeln!(out, "  Courses excluded: {}", stats.excluded_courses);
    }
    let _ = writeln!(out, "  Subjects: {}", stats.subjects);
    let _ = writeln!(out, "  Distinct course keys: {}", stats.course_keys);
    let _ = writeln!(out);

    if !stats.courses_per_quarter.is_empty() {
        let _ = writeln!(out, "Courses by Term:");
        for (quarter, count) in &stats.courses_per_quarter {
            let percentage = if stats.total_courses > 0 {
                (*count as f64 / stats.total_courses as f64) * 100.0
            } else {
                0.0
            };
            let _ = writeln!(out, "  {}: {} ({:.1}%)", quarter, count, percentage);
        }
    }

    out
}

/// Prints index statistics to stdout
pub fn print_statistics(stats: &IndexStatistics) {
    print!("{}", render_statistics(stats));
}
