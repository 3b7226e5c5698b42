use crate::model::MeetingTime;
use crate::parse::normalize_day;
use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

/// Day abbreviations as the catalog prints them
const DAY_TOKENS: [&str; 7] = ["Mon", "Tues", "Wed", "Thurs", "Fri", "Sa", "Su"];

const DAY_SEPARATOR: char = '|';

static TIME_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+:\d+[AP]M)\s*-\s*(\d+:\d+[AP]M)").unwrap());

static SINGLE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+:\d+[AP]M)").unwrap());

/// Which branch of the meeting parser produced a [`MeetingTime`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingOutcome {
    /// Start and end times both parsed
    Range,
    /// Only one time was present; it was recorded as the end time
    EndOnly,
    /// Location and days were split off but the time text was kept raw
    RawTime,
    /// The line had no `location:` prefix and was kept verbatim
    RawLine,
}

/// A parsed meeting line together with the branch that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMeeting {
    pub meeting: MeetingTime,
    pub outcome: MeetingOutcome,
}

/// Parses a meeting-info block into one [`MeetingTime`] per non-empty line
pub fn parse_meeting_info(text: &str) -> Vec<MeetingTime> {
    parse_meeting_lines(text)
        .into_iter()
        .map(|parsed| parsed.meeting)
        .collect()
}

/// Parses a meeting-info block, keeping the outcome of every line
///
/// Each line reads `Location: DaysTimes`, for example
/// `Tech LR3: MonWedFri 10:00AM - 10:50AM`. Days may be run together or
/// separated by spaces or commas. Nothing is dropped: text the parser cannot
/// structure ends up in `time_range`.
pub fn parse_meeting_lines(text: &str) -> Vec<ParsedMeeting> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> ParsedMeeting {
    let Some((location, schedule)) = line.split_once(':') else {
        return ParsedMeeting {
            meeting: MeetingTime {
                time_range: line.to_string(),
                ..MeetingTime::default()
            },
            outcome: MeetingOutcome::RawLine,
        };
    };

    let mut meeting = MeetingTime {
        location: location.trim().to_string(),
        ..MeetingTime::default()
    };

    let marked = mark_days(schedule.trim());
    let segments: Vec<&str> = marked.split(DAY_SEPARATOR).collect();

    for segment in segments.iter().skip(1) {
        let segment = segment.trim();
        let day = match segment.find(' ') {
            Some(idx) => &segment[..idx],
            None if !segment.is_empty() && !segment.contains(':') => segment,
            None => continue,
        };
        meeting.days.push(normalize_day(day));
    }

    let time_text = segments.last().map(|s| s.trim()).unwrap_or_default();
    let outcome = apply_time(&mut meeting, time_text);

    ParsedMeeting { meeting, outcome }
}

/// Inserts a separator before every day token
fn mark_days(schedule: &str) -> String {
    let mut marked = schedule.to_string();
    for day in DAY_TOKENS {
        marked = marked.replace(&format!("{},", day), &format!("{} ", day));
        marked = marked.replace(day, &format!("{}{}", DAY_SEPARATOR, day));
    }
    marked
}

fn apply_time(meeting: &mut MeetingTime, time_text: &str) -> MeetingOutcome {
    if let Some(caps) = TIME_RANGE_RE.captures(time_text) {
        let (start, end) = (&caps[1], &caps[2]);
        if let (Some(start_time), Some(end_time)) = (parse_clock(start), parse_clock(end)) {
            meeting.start_time = Some(start_time);
            meeting.end_time = Some(end_time);
            meeting.time_range = format!("{} - {}", start, end);
            return MeetingOutcome::Range;
        }
    } else if let Some(caps) = SINGLE_TIME_RE.captures(time_text) {
        let value = &caps[1];
        if let Some(end_time) = parse_clock(value) {
            meeting.end_time = Some(end_time);
            meeting.time_range = format!("End: {}", value);
            return MeetingOutcome::EndOnly;
        }
    }

    meeting.time_range = time_text.to_string();
    MeetingOutcome::RawTime
}

fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%I:%M%p").ok()
}
