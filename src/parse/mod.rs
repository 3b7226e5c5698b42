//! Parsers that recover structure from free-form course page text
//!
//! The catalog renders meeting and instructor blocks inconsistently: fields
//! are omitted, reordered or run together. Each parser tries an ordered list
//! of patterns and falls back to keeping the raw text, and reports which
//! branch it took so callers and tests can tell a match from a fallback.

mod day;
mod instructor;
mod meeting;

pub use day::normalize_day;
pub use instructor::{parse_instructor, parse_instructor_detailed, LineRule, ParsedInstructor};
pub use meeting::{parse_meeting_info, parse_meeting_lines, MeetingOutcome, ParsedMeeting};
