//! Course detail page extraction
//!
//! Each fetched detail page is split into its labelled regions and every
//! region is applied to the page's record as its own locked update.

use crate::crawler::accumulator::CourseAccumulator;
use crate::crawler::fetcher::fetch_body;
use crate::crawler::parser::{extract_regions, DetailRegions};
use crate::crawler::scheduler::Scheduler;
use crate::model::Course;
use crate::parse::{parse_instructor, parse_meeting_info};
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Fetches detail pages and builds course records from them
#[derive(Debug, Clone)]
pub struct DetailExtractor {
    client: Client,
    scheduler: Scheduler,
}

impl DetailExtractor {
    pub fn new(client: Client, scheduler: Scheduler) -> Self {
        Self { client, scheduler }
    }

    /// Extracts one course per successfully fetched URL, ordered by URL
    ///
    /// Pages that fail to fetch produce no record.
    pub async fn extract(&self, urls: &[String]) -> Vec<Course> {
        let accumulator = Arc::new(CourseAccumulator::new());
        let mut tasks = JoinSet::new();

        for url in urls {
            let url = url.clone();
            let client = self.client.clone();
            let scheduler = self.scheduler.clone();
            let accumulator = Arc::clone(&accumulator);

            tasks.spawn(async move {
                let Some(_permit) = scheduler.acquire(&url).await else {
                    return;
                };
                let Some(body) = fetch_body(&client, &url).await else {
                    return;
                };
                apply_regions(&accumulator, &url, extract_regions(&body));
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Detail task failed: {}", e);
            }
        }

        match Arc::try_unwrap(accumulator) {
            Ok(accumulator) => accumulator.into_courses(),
            Err(shared) => shared.snapshot(),
        }
    }
}

/// Applies the regions of one fetched page to its record
///
/// The record is created even when no region is present.
pub fn apply_regions(accumulator: &CourseAccumulator, url: &str, regions: DetailRegions) {
    accumulator.update(url, |_| ());

    if let Some(title) = regions.title {
        accumulator.update(url, |course| apply_title(course, &title));
    }

    if let Some(topic) = regions.topic {
        accumulator.update(url, |course| course.topic = topic.trim().to_string());
    }

    for block in &regions.instructors {
        let instructor = parse_instructor(block);
        accumulator.update(url, |course| course.instructors.push(instructor));
    }

    if let Some(meeting_info) = regions.meeting_info {
        let meetings = parse_meeting_info(&meeting_info);
        accumulator.update(url, |course| course.meeting_times = meetings);
    }

    if let Some(overview) = regions.overview {
        accumulator.update(url, |course| course.overview = overview.trim().to_string());
    }
}

/// Splits a heading like "Calculus (MATH 220-1-20)" into title and number
fn apply_title(course: &mut Course, heading: &str) {
    match heading.split_once('(') {
        Some((title, rest)) => {
            let rest = rest.trim();
            course.title = title.trim().to_string();
            course.number = rest.strip_suffix(')').unwrap_or(rest).to_string();
        }
        None => {
            course.title = heading.trim().to_string();
            course.number = String::new();
        }
    }
    course.apply_url_identity();
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://catalog.example.edu/4980/WCAS/COMP_SCI/20";

    fn course_for(regions: DetailRegions) -> Course {
        let accumulator = CourseAccumulator::new();
        apply_regions(&accumulator, URL, regions);
        accumulator.get(URL).unwrap()
    }

    #[test]
    fn test_apply_title_with_number() {
        let mut course = Course::new(URL);
        apply_title(&mut course, "  Data Structures (COMP_SCI 214-0-20) ");
        assert_eq!(course.title, "Data Structures");
        assert_eq!(course.number, "COMP_SCI 214-0-20");
        assert_eq!(course.subject, "COMP_SCI");
        assert_eq!(course.school, "WCAS");
        assert_eq!(course.section, 20);
        assert_eq!(course.quarter, 4980);
    }

    #[test]
    fn test_apply_title_without_parenthesis() {
        let mut course = Course::new(URL);
        apply_title(&mut course, " Independent Study ");
        assert_eq!(course.title, "Independent Study");
        assert_eq!(course.number, "");
    }

    #[test]
    fn test_apply_title_strips_one_paren() {
        let mut course = Course::new(URL);
        apply_title(&mut course, "Seminar (Topics (Special)) ");
        assert_eq!(course.title, "Seminar");
        assert_eq!(course.number, "Topics (Special)");
    }

    #[test]
    fn test_apply_regions() {
        let course = course_for(DetailRegions {
            title: Some("Data Structures (COMP_SCI 214-0-20)".to_string()),
            topic: Some("  Trees  ".to_string()),
            instructors: vec![
                "Jane Doe\n847-555-1234".to_string(),
                "John Roe".to_string(),
            ],
            meeting_info: Some("Tech LR3: MonWedFri 10:00AM - 10:50AM".to_string()),
            overview: Some("\n Overview text \n".to_string()),
        });

        assert_eq!(course.title, "Data Structures");
        assert_eq!(course.topic, "Trees");
        assert_eq!(course.overview, "Overview text");
        assert_eq!(course.instructors.len(), 2);
        assert_eq!(course.instructors[0].name, "Jane Doe");
        assert_eq!(course.instructors[0].phone, "847-555-1234");
        assert_eq!(course.meeting_times.len(), 1);
        assert_eq!(course.meeting_times[0].location, "Tech LR3");
        assert_eq!(course.meeting_times[0].days, vec!["Monday", "Wednesday", "Friday"]);
    }

    #[test]
    fn test_empty_page_still_creates_record() {
        let course = course_for(DetailRegions::default());
        assert_eq!(course.url, URL);
        assert_eq!(course.title, "");
        assert_eq!(course.quarter, 4980);
        assert!(course.meeting_times.is_empty());
    }

    #[test]
    fn test_meeting_info_replaces_previous_list() {
        let accumulator = CourseAccumulator::new();
        let regions = |info: &str| DetailRegions {
            meeting_info: Some(info.to_string()),
            ..DetailRegions::default()
        };

        apply_regions(&accumulator, URL, regions("A: Mon 9:00AM - 9:50AM\nB: Tues 1:00PM"));
        apply_regions(&accumulator, URL, regions("C: Fri 2:00PM - 3:00PM"));

        let course = accumulator.get(URL).unwrap();
        assert_eq!(course.meeting_times.len(), 1);
        assert_eq!(course.meeting_times[0].location, "C");
    }
}
