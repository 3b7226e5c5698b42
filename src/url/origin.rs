use url::Url;

/// Returns the key that politeness delays are tracked under
///
/// This is the lowercase host plus an explicit port, so two fixture servers
/// on different ports of `127.0.0.1` are paced independently. Strings that
/// do not parse as URLs are their own key.
///
/// # Examples
///
/// ```
/// use course_crawler::url::extract_origin;
///
/// assert_eq!(extract_origin("https://EXAMPLE.edu/4980"), "example.edu");
/// assert_eq!(extract_origin("http://127.0.0.1:8080/a"), "127.0.0.1:8080");
/// ```
pub fn extract_origin(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };

    match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host.to_lowercase(), port),
        (Some(host), None) => host.to_lowercase(),
        (None, _) => url.to_string(),
    }
}
