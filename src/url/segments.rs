/// Course identity encoded in a detail page URL
///
/// Detail pages live at `<base>/<quarter>/<school>/<subject>/<section>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlIdentity {
    /// Section number, `None` when the segment is not an integer
    pub section: Option<i32>,
    pub subject: String,
    pub school: String,
    /// Term code, `None` when the segment is not an integer
    pub quarter: Option<i32>,
}

impl UrlIdentity {
    /// Reads the last four path segments of `url`, innermost first
    ///
    /// A trailing slash makes the innermost segment empty, as does a URL
    /// with fewer segments than expected.
    pub fn from_url(url: &str) -> Self {
        let mut segments = url.rsplit('/');
        let mut next = || segments.next().unwrap_or_default();

        let section = next();
        let subject = next();
        let school = next();
        let quarter = next();

        Self {
            section: section.parse().ok(),
            subject: subject.to_string(),
            school: school.to_string(),
            quarter: quarter.parse().ok(),
        }
    }
}

/// Returns the last non-empty path segment of a URL
pub fn last_segment(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}
