use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use alyze::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if the domain ends with one of the given suffixes (e.g. ".tk")
pub fn has_suffix_in(domain: &str, suffixes: &[&str]) -> bool {
    let domain = domain.to_lowercase();
    suffixes.iter().any(|suffix| domain.ends_with(suffix))
}

/// Length of the longest run of consecutive ASCII digits in the domain
pub fn longest_digit_run(domain: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in domain.chars() {
        if c.is_ascii_digit() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Blog.Example.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_has_suffix_in() {
        assert!(has_suffix_in("free-prizes.tk", &[".tk", ".ml"]));
        assert!(has_suffix_in("FREE.ML", &[".tk", ".ml"]));
        assert!(!has_suffix_in("example.com", &[".tk", ".ml"]));
        assert!(!has_suffix_in("stock", &[".tk"]));
    }

    #[test]
    fn test_longest_digit_run() {
        assert_eq!(longest_digit_run("example.com"), 0);
        assert_eq!(longest_digit_run("shop24.com"), 2);
        assert_eq!(longest_digit_run("win12345prize.top"), 5);
        assert_eq!(longest_digit_run("1a22b333"), 3);
    }
}
