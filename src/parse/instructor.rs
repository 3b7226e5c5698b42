use crate::model::Instructor;
use regex::Regex;
use std::sync::LazyLock;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{3}[-/\s]?\d{3}[-/\s]?\d{4})").unwrap());

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

static OFFICE_HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)office\s+hours:(.+)").unwrap());

/// The rule that claimed one line of an instructor block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRule {
    Name,
    Phone,
    Email,
    OfficeHours,
    Address,
    /// A line left over after every field was tried; appended to office hours
    OfficeHoursOverflow,
}

/// Rules tried against each line after the name, in priority order
const LINE_RULES: [LineRule; 4] = [
    LineRule::Phone,
    LineRule::Email,
    LineRule::OfficeHours,
    LineRule::Address,
];

/// A parsed instructor block with the rule applied to each non-empty line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInstructor {
    pub instructor: Instructor,
    pub rules: Vec<LineRule>,
}

/// Parses one instructor block
pub fn parse_instructor(text: &str) -> Instructor {
    parse_instructor_detailed(text).instructor
}

/// Parses one instructor block, reporting which rule claimed each line
///
/// The first non-empty line is the name. Later lines are matched against
/// phone, email and office hours patterns; the first line none of them claim
/// is the address. Any line after that is appended to office hours. That
/// last rule is a heuristic for blocks with extra free text, not a promise
/// about what the text means.
pub fn parse_instructor_detailed(text: &str) -> ParsedInstructor {
    let mut instructor = Instructor::default();
    let mut claimed: Vec<LineRule> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if claimed.is_empty() {
            instructor.name = line.to_string();
            claimed.push(LineRule::Name);
            continue;
        }

        let rule = LINE_RULES
            .into_iter()
            .filter(|rule| !claimed.contains(rule))
            .find(|rule| apply_rule(*rule, line, &mut instructor))
            .unwrap_or_else(|| {
                append_office_hours(&mut instructor, line);
                LineRule::OfficeHoursOverflow
            });

        if rule == LineRule::OfficeHoursOverflow {
            tracing::debug!("Unclassified instructor line appended to office hours: {}", line);
        }
        claimed.push(rule);
    }

    ParsedInstructor {
        instructor,
        rules: claimed,
    }
}

/// Fills the rule's field from `line` if the rule matches
fn apply_rule(rule: LineRule, line: &str, instructor: &mut Instructor) -> bool {
    match rule {
        LineRule::Phone => match PHONE_RE.captures(line) {
            Some(caps) => {
                instructor.phone = caps[1].to_string();
                true
            }
            None => false,
        },
        LineRule::Email => match EMAIL_RE.find(line) {
            Some(m) => {
                instructor.email = m.as_str().to_string();
                true
            }
            None => false,
        },
        LineRule::OfficeHours => match OFFICE_HOURS_RE.captures(line) {
            Some(caps) => {
                instructor.office_hours = caps[1].trim().to_string();
                true
            }
            None => false,
        },
        LineRule::Address => {
            instructor.address = line.to_string();
            true
        }
        LineRule::Name | LineRule::OfficeHoursOverflow => false,
    }
}

fn append_office_hours(instructor: &mut Instructor, line: &str) {
    if instructor.office_hours.is_empty() {
        instructor.office_hours = line.to_string();
    } else {
        instructor.office_hours.push(' ');
        instructor.office_hours.push_str(line);
    }
}
