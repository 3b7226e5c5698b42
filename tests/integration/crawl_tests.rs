//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small five-level catalog and run
//! the full crawl cycle end-to-end against it.

use course_crawler::config::{
    CatalogConfig, Config, CrawlerConfig, IdentityPolicy, IndexConfig, OutputConfig,
    UserAgentConfig,
};
use course_crawler::crawler::{CrawlSession, Level};
use course_crawler::store::{write_batch, CourseStore};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for a catalog served at `base_url`
fn create_test_config(base_url: &str, terms: &[&str], schools: &[&str]) -> Config {
    Config {
        catalog: CatalogConfig {
            base_url: base_url.to_string(),
            start_term: None,
            terms: terms.iter().map(|t| t.to_string()).collect(),
            schools: schools.iter().map(|s| s.to_string()).collect(),
        },
        crawler: CrawlerConfig {
            max_concurrent_fetches: 4,
            request_delay_ms: 0,
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            data_dir: "./data".to_string(),
        },
        index: IndexConfig::default(),
    }
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}

fn detail_page(title: &str, topic: &str, meeting: &str) -> String {
    format!(
        r#"<html><body>
        <h1>{title}</h1>
        <h2>Topic</h2>
        <p>{topic}</p>
        <h2>Instructors</h2>
        <p>Jane Doe<br>847-555-1234<br>jdoe@example.edu<br>Office Hours: Mon 2-3pm<br>Lunt 105</p>
        <h2>Meeting Info</h2>
        <p>{meeting}</p>
        <h2>Overview of class</h2>
        <p> Derivatives and integrals. </p>
        </body></html>"#
    )
}

/// Mounts a catalog with two terms, two schools per term, one subject and
/// two sections. The detail page of section 21 is left to the caller.
///
/// Term codes are six digits so the allow-list, which matches anywhere in
/// the source URL, can never match the mock server's port.
async fn mount_catalog(server: &MockServer) {
    mount_page(
        server,
        "/",
        r#"<html><body>
        <a href="202410">202410 Fall 2024</a>
        <a href="202330">202330 Spring 2024</a>
        <a href="/about">About this catalog</a>
        </body></html>"#,
    )
    .await;

    for term in ["202410", "202330"] {
        mount_page(
            server,
            &format!("/{}", term),
            &format!(
                r#"<html><body>
                <a href="{term}/WCAS">Weinberg College of Arts and Sciences</a>
                <a href="MEAS">McCormick School of Engineering</a>
                <a href="/">Home</a>
                </body></html>"#
            ),
        )
        .await;
    }

    mount_page(
        server,
        "/202410/WCAS",
        r#"<html><body>
        <a href="WCAS/MATH">Mathematics</a>
        <a href="../">Back</a>
        </body></html>"#,
    )
    .await;

    mount_page(
        server,
        "/202410/MEAS",
        r#"<html><body><a href="MEAS/COMP_SCI">Computer Science</a></body></html>"#,
    )
    .await;

    mount_page(
        server,
        "/202410/WCAS/MATH",
        r#"<html><body>
        <a href="MATH/20">20: Lecture</a>
        <a href="21">21: Lecture</a>
        <a href="syllabus">Syllabus</a>
        </body></html>"#,
    )
    .await;

    mount_page(
        server,
        "/202410/WCAS/MATH/20",
        &detail_page(
            "Calculus (MATH 220-1-20)",
            "Limits",
            "Tech LR3: MonWedFri 10:00AM - 10:50AM",
        ),
    )
    .await;
}

async fn mount_second_section(server: &MockServer) {
    mount_page(
        server,
        "/202410/WCAS/MATH/21",
        &detail_page("Calculus (MATH 220-1-21)", "Series", "Lunt 105: TuesThurs 1:00PM"),
    )
    .await;
}

#[tokio::test]
async fn test_full_crawl_extracts_courses() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    mount_second_section(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), &["202410"], &["WCAS"]);
    let session = CrawlSession::new(&config).expect("Failed to create session");
    let outcome = session.run().await;

    assert_eq!(outcome.courses.len(), 2);

    let first = &outcome.courses[0];
    assert_eq!(first.url, format!("{}/202410/WCAS/MATH/20", mock_server.uri()));
    assert_eq!(first.title, "Calculus");
    assert_eq!(first.number, "MATH 220-1-20");
    assert_eq!(first.topic, "Limits");
    assert_eq!(first.overview, "Derivatives and integrals.");
    assert_eq!(first.quarter, 202410);
    assert_eq!(first.school, "WCAS");
    assert_eq!(first.subject, "MATH");
    assert_eq!(first.section, 20);
    assert_eq!(first.key(), "MATH 220-1");

    assert_eq!(first.instructors.len(), 1);
    let instructor = &first.instructors[0];
    assert_eq!(instructor.name, "Jane Doe");
    assert_eq!(instructor.phone, "847-555-1234");
    assert_eq!(instructor.email, "jdoe@example.edu");
    assert_eq!(instructor.office_hours, "Mon 2-3pm");
    assert_eq!(instructor.address, "Lunt 105");

    assert_eq!(first.meeting_times.len(), 1);
    let meeting = &first.meeting_times[0];
    assert_eq!(meeting.location, "Tech LR3");
    assert_eq!(meeting.days, vec!["Monday", "Wednesday", "Friday"]);
    assert_eq!(meeting.time_range, "10:00AM - 10:50AM");

    let second = &outcome.courses[1];
    assert_eq!(second.section, 21);
    assert_eq!(second.meeting_times[0].days, vec!["Tuesday", "Thursday"]);
    assert_eq!(second.meeting_times[0].time_range, "End: 1:00PM");
    assert!(second.meeting_times[0].start_time.is_none());
}

#[tokio::test]
async fn test_level_reports() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    mount_second_section(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), &["202410"], &["WCAS"]);
    let outcome = CrawlSession::new(&config).unwrap().run().await;

    let levels: Vec<Level> = outcome.levels.iter().map(|r| r.level).collect();
    assert_eq!(
        levels,
        vec![
            Level::Term,
            Level::School,
            Level::Subject,
            Level::Section,
            Level::Detail
        ]
    );

    // Both terms are listed on the root page
    assert_eq!(outcome.levels[0].kept, 2);
    // Only the allow-listed term yields schools
    assert_eq!(outcome.levels[1].frontier, 2);
    assert_eq!(outcome.levels[1].kept, 2);
    // Only the allow-listed school yields subjects
    assert_eq!(outcome.levels[2].frontier, 2);
    assert_eq!(outcome.levels[2].kept, 1);
    assert_eq!(outcome.levels[3].kept, 2);
    assert_eq!(outcome.levels[4].frontier, 2);
    assert_eq!(outcome.levels[4].fetched, 2);
}

#[tokio::test]
async fn test_term_allow_list_prunes_other_terms() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    mount_second_section(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), &["202410"], &[]);
    CrawlSession::new(&config).unwrap().run().await;

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();

    assert!(paths.contains(&"/202330".to_string()));
    assert!(!paths.iter().any(|p| p.starts_with("/202330/")));
    // An empty school allow-list follows every school
    assert!(paths.contains(&"/202410/MEAS/COMP_SCI".to_string()));
}

#[tokio::test]
async fn test_crawl_is_idempotent() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    mount_second_section(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), &["202410"], &["WCAS"]);
    let session = CrawlSession::new(&config).unwrap();

    let first = session.run().await;
    let second = session.run().await;

    assert_eq!(first.courses.len(), 2);
    assert_eq!(first.courses, second.courses);
}

#[tokio::test]
async fn test_failed_detail_page_is_omitted() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/202410/WCAS/MATH/21"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["202410"], &["WCAS"]);
    let outcome = CrawlSession::new(&config).unwrap().run().await;

    assert_eq!(outcome.courses.len(), 1);
    assert_eq!(outcome.courses[0].section, 20);
    assert!(!outcome
        .courses
        .iter()
        .any(|c| c.url.ends_with("/MATH/21")));

    let detail = outcome.levels.last().unwrap();
    assert_eq!(detail.frontier, 2);
    assert_eq!(detail.fetched, 1);
}

#[tokio::test]
async fn test_non_html_page_is_skipped() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/202410/WCAS/MATH/21"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["202410"], &["WCAS"]);
    let outcome = CrawlSession::new(&config).unwrap().run().await;

    assert_eq!(outcome.courses.len(), 1);
}

#[tokio::test]
async fn test_crawl_batch_feeds_index() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    mount_second_section(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), &["202410"], &["WCAS"]);
    let outcome = CrawlSession::new(&config).unwrap().run().await;

    let temp_dir = TempDir::new().unwrap();
    write_batch(temp_dir.path(), &outcome.courses).unwrap();

    let store = CourseStore::load(temp_dir.path(), IdentityPolicy::Keep).unwrap();
    assert_eq!(store.available_quarters(), &[202410]);
    assert_eq!(store.courses_by_quarter(202410).len(), 2);
    assert_eq!(store.courses_by_key("MATH 220-1").len(), 2);

    let summaries = store.courses_by_subject("MATH");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title, "Calculus");
    assert_eq!(summaries[0].quarters, vec![202410]);

    let reloaded: Vec<_> = store.courses_by_quarter(202410).into_iter().cloned().collect();
    let mut reloaded_urls: Vec<_> = reloaded.iter().map(|c| c.url.clone()).collect();
    reloaded_urls.sort();
    let crawled_urls: Vec<_> = outcome.courses.iter().map(|c| c.url.clone()).collect();
    assert_eq!(reloaded_urls, crawled_urls);
}
