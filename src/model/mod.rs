//! Course records produced by the crawler and consumed by the index store
//!
//! Field names on the wire follow the catalog's existing batch files, so a
//! batch written by an earlier crawl loads without conversion.

mod clock;
mod course;

pub use clock::{format_clock, ZERO_TIMESTAMP};
pub use course::{course_key, Course, Instructor, MeetingTime, SubjectSummary};
