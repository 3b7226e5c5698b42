use url::Url;

/// Joins a resolved URL with an href discovered on its page
///
/// Catalog links often repeat the last path segment of the page they sit on
/// (`.../4980/WCAS` links to `WCAS/COMP_SCI`). When the last segment of
/// `left` equals the first segment of `right` the repeated segment is
/// collapsed; otherwise the two are concatenated with a single `/`.
/// An href that is already an absolute http(s) URL is returned unchanged.
///
/// # Examples
///
/// ```
/// use course_crawler::url::join;
///
/// assert_eq!(join("a/b/c", "c/d"), "a/b/c/d");
/// assert_eq!(join("a/b", "c/d"), "a/b/c/d");
/// ```
pub fn join(left: &str, right: &str) -> String {
    if let Ok(absolute) = Url::parse(right) {
        if absolute.scheme() == "http" || absolute.scheme() == "https" {
            return right.to_string();
        }
    }

    let left_last = left.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    let right_segments: Vec<&str> = right.trim_start_matches('/').split('/').collect();
    let right_first = right_segments.first().copied().unwrap_or("");

    if !left_last.is_empty() && left_last == right_first {
        let rest = right_segments[1..].join("/");
        return if left.ends_with('/') {
            format!("{}{}", left, rest)
        } else {
            format!("{}/{}", left, rest)
        };
    }

    match (left.ends_with('/'), right.starts_with('/')) {
        (true, true) => format!("{}{}", left, &right[1..]),
        (false, false) => format!("{}/{}", left, right),
        _ => format!("{}{}", left, right),
    }
}
