//! HTML parser for catalog pages
//!
//! This module handles parsing HTML content to extract:
//! - Anchors on listing pages (visible text and raw href)
//! - The labelled regions of a course detail page
//!
//! Everything here takes `&str` and returns owned data so no parsed
//! document is ever held across an await point.

use scraper::{ElementRef, Html, Node, Selector};

/// A link as it appears on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Visible text, trimmed
    pub text: String,

    /// The `href` attribute exactly as written
    pub href: String,
}

/// Raw text of each labelled region of a detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailRegions {
    /// Text of the first `h1`
    pub title: Option<String>,
    pub topic: Option<String>,
    /// One block per instructor paragraph, at most three
    pub instructors: Vec<String>,
    pub meeting_info: Option<String>,
    pub overview: Option<String>,
}

const TOPIC_HEADING: &str = "Topic";
const INSTRUCTORS_HEADING: &str = "Instructors";
const MEETING_HEADING: &str = "Meeting Info";
const OVERVIEW_HEADING: &str = "Overview of class";

/// Instructor blocks read after the "Instructors" heading
const MAX_INSTRUCTOR_BLOCKS: usize = 3;

/// Extracts every `a[href]` on the page, in document order
///
/// # Example
///
/// ```
/// use course_crawler::crawler::extract_anchors;
///
/// let html = r#"<ul><li><a href="4980"> 4980 Fall 2024 </a></li></ul>"#;
/// let anchors = extract_anchors(html);
/// assert_eq!(anchors[0].text, "4980 Fall 2024");
/// assert_eq!(anchors[0].href, "4980");
/// ```
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);
    let mut anchors = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                anchors.push(Anchor {
                    text: element.text().collect::<String>().trim().to_string(),
                    href: href.to_string(),
                });
            }
        }
    }

    anchors
}

/// Extracts the title, topic, instructor, meeting and overview regions
///
/// Regions are located by an `h2` whose text contains the region label and
/// read from the `p` elements immediately following it.
pub fn extract_regions(html: &str) -> DetailRegions {
    let document = Html::parse_document(html);

    let title = Selector::parse("h1").ok().and_then(|selector| {
        document
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>())
    });

    let first_paragraph =
        |label: &str| paragraphs_after(&document, label, 1).into_iter().next();

    let topic = first_paragraph(TOPIC_HEADING);
    let meeting_info = first_paragraph(MEETING_HEADING);
    let overview = first_paragraph(OVERVIEW_HEADING);
    let instructors = paragraphs_after(&document, INSTRUCTORS_HEADING, MAX_INSTRUCTOR_BLOCKS);

    DetailRegions {
        title,
        topic,
        instructors,
        meeting_info,
        overview,
    }
}

/// Block text of up to `limit` consecutive `p` siblings following the
/// first `h2` whose text contains `label`
fn paragraphs_after(document: &Html, label: &str, limit: usize) -> Vec<String> {
    let Ok(selector) = Selector::parse("h2") else {
        return Vec::new();
    };

    let Some(heading) = document
        .select(&selector)
        .find(|h2| h2.text().collect::<String>().contains(label))
    else {
        return Vec::new();
    };

    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|element| element.value().name() == "p")
        .take(limit)
        .map(block_text)
        .collect()
}

/// Concatenated text of an element with each `<br>` rendered as a newline
fn block_text(element: ElementRef) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(chunk) => text.push_str(chunk),
            Node::Element(el) if el.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}
