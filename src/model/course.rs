use crate::url::UrlIdentity;
use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};

/// A single course offering scraped from one detail page
///
/// `section`, `subject`, `school` and `quarter` are derived from the detail
/// page URL rather than from page text, so they stay correct when the title
/// is malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub title: String,
    pub number: String,
    pub topic: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub instructors: Vec<Instructor>,
    #[serde(rename = "meetingTimes", deserialize_with = "null_as_empty")]
    pub meeting_times: Vec<MeetingTime>,
    pub overview: String,
    pub url: String,
    pub section: i32,
    pub subject: String,
    pub school: String,
    pub quarter: i32,
}

impl Course {
    /// Creates an empty record for a detail page URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Creates a record for a detail page URL with its URL identity applied
    pub fn from_detail_url(url: impl Into<String>) -> Self {
        let mut course = Self::new(url);
        course.apply_url_identity();
        course
    }

    /// Re-derives subject, school, section and quarter from the URL
    ///
    /// Section and quarter keep their current value when the segment is
    /// not an integer.
    pub fn apply_url_identity(&mut self) {
        let identity = UrlIdentity::from_url(&self.url);
        if let Some(section) = identity.section {
            self.section = section;
        }
        if let Some(quarter) = identity.quarter {
            self.quarter = quarter;
        }
        self.subject = identity.subject;
        self.school = identity.school;
    }

    /// Returns the cross-term identity of this course
    pub fn key(&self) -> String {
        course_key(&self.subject, &self.number)
    }
}

/// Computes the key that groups one course across terms
///
/// Only the last whitespace-separated token of the number takes part, and
/// only its first two `-` separated segments, so `COMP_SCI 211-0-20` and
/// `211-0-21` share the key `COMP_SCI 211-0`. Catalog titles repeat the
/// subject inside the number; it is dropped here.
pub fn course_key(subject: &str, number: &str) -> String {
    let token = number.split_whitespace().last().unwrap_or_default();
    let mut parts = token.split('-');
    let primary = parts.next().unwrap_or_default();
    let key = match parts.next() {
        Some(secondary) => format!("{} {}-{}", subject, primary, secondary),
        None => format!("{} {}", subject, primary),
    };
    key.to_uppercase()
}

/// Contact and office information for one instructor block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instructor {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "officehours")]
    pub office_hours: String,
    pub address: String,
}

/// One meeting line of a course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingTime {
    pub location: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub days: Vec<String>,
    #[serde(rename = "starttime", with = "super::clock")]
    pub start_time: Option<NaiveTime>,
    #[serde(rename = "endtime", with = "super::clock")]
    pub end_time: Option<NaiveTime>,
    /// Raw or normalized time text; populated even when the times parse
    #[serde(rename = "timerange")]
    pub time_range: String,
}

/// Merged view of one course key within a subject
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub title: String,
    pub number: String,
    pub topic: String,
    pub overview: String,
    pub quarters: Vec<i32>,
}

/// Reads a JSON `null` array as an empty vector
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
