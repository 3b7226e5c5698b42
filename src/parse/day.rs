/// Maps a weekday abbreviation to its full name
///
/// Lookup is case-insensitive on the trimmed token. Tokens that are not a
/// known abbreviation come back trimmed but otherwise unchanged, so applying
/// the function twice gives the same result as applying it once. A blank
/// token therefore comes back empty; the meeting parser never passes one.
///
/// # Examples
///
/// ```
/// use course_crawler::parse::normalize_day;
///
/// assert_eq!(normalize_day("Tues"), "Tuesday");
/// assert_eq!(normalize_day("TBA"), "TBA");
/// ```
pub fn normalize_day(token: &str) -> String {
    let token = token.trim();

    let full = match token.to_lowercase().as_str() {
        "mon" => "Monday",
        "tues" | "tue" => "Tuesday",
        "wed" => "Wednesday",
        "thurs" | "thu" => "Thursday",
        "fri" => "Friday",
        "sa" => "Saturday",
        "su" => "Sunday",
        _ => return token.to_string(),
    };

    full.to_string()
}
