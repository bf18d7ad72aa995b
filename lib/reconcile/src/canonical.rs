use url::Url;

/// Host names that identify the same site.
///
/// URLs on any of the `aliases` are rewritten to the `preferred` host before comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalHosts {
    pub preferred: String,
    pub aliases: Vec<String>,
}

impl Default for CanonicalHosts {
    fn default() -> Self {
        Self {
            preferred: "www.tripadvisor.com".to_owned(),
            aliases: [
                "tripadvisor.com",
                "www.tripadvisor.co.uk",
                "www.tripadvisor.ca",
                "www.tripadvisor.com.au",
                "www.tripadvisor.de",
                "www.tripadvisor.fr",
                "www.tripadvisor.it",
                "www.tripadvisor.es",
                "www.tripadvisor.ie",
                "www.tripadvisor.in",
                "www.tripadvisor.nl",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        }
    }
}

impl CanonicalHosts {
    /// The preferred host for aliases, the host itself otherwise.
    pub fn canonical_host<'host>(&'host self, host: &'host str) -> &'host str {
        if self
            .aliases
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(host))
        {
            &self.preferred
        } else {
            host
        }
    }
}

/// Normalizes a URL to `host + path [+ "?" + query]`.
///
/// The scheme and fragment are dropped, the host is lower-cased and alias hosts are rewritten to
/// the preferred one. A trailing `/` is removed unless the path is the root. Strings that are not
/// absolute URLs with a host are returned trimmed. Returns [None] for blank input.
pub fn canonical_url(url: &str, hosts: &CanonicalHosts) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Some(parsed) = Url::parse(trimmed).ok().filter(|parsed| parsed.has_host()) else {
        return Some(trimmed.to_owned());
    };
    let host = parsed.host_str()?.to_ascii_lowercase();

    let mut path = parsed.path();
    if path.len() > 1 {
        path = path.strip_suffix('/').unwrap_or(path);
    }

    let mut canonical = format!("{}{path}", hosts.canonical_host(&host));
    if let Some(query) = parsed.query() {
        canonical.push('?');
        canonical.push_str(query);
    }
    Some(canonical)
}

/// The lower-cased host of an absolute URL.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url.trim())
        .ok()?
        .host_str()
        .map(str::to_ascii_lowercase)
}

/// Whether `host` equals `allowed` or is one of its subdomains. Both must be lower-case.
pub fn host_matches(host: &str, allowed: &str) -> bool {
    host == allowed
        || host
            .strip_suffix(allowed)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(url: &str) -> Option<String> {
        canonical_url(url, &CanonicalHosts::default())
    }

    #[test]
    fn drops_scheme_fragment_and_trailing_slash() {
        assert_eq!(
            canonical("https://www.tripadvisor.com/Restaurant_Review-x/#reviews").as_deref(),
            Some("www.tripadvisor.com/Restaurant_Review-x")
        );
        assert_eq!(
            canonical("http://Example.COM/").as_deref(),
            Some("example.com/")
        );
    }

    #[test]
    fn keeps_query() {
        assert_eq!(
            canonical("https://example.com/search?q=pizza&page=2").as_deref(),
            Some("example.com/search?q=pizza&page=2")
        );
    }

    #[test]
    fn rewrites_alias_hosts() {
        assert_eq!(
            canonical("https://www.TripAdvisor.co.uk/Restaurant_Review-x").as_deref(),
            Some("www.tripadvisor.com/Restaurant_Review-x")
        );
        assert_eq!(
            canonical("https://tripadvisor.com/Restaurant_Review-x"),
            canonical("https://www.tripadvisor.com/Restaurant_Review-x")
        );
    }

    #[test]
    fn unparsable_urls_are_compared_verbatim() {
        assert_eq!(canonical("  not a url ").as_deref(), Some("not a url"));
        assert_eq!(canonical("   "), None);
    }

    #[test]
    fn hosts_match_exactly_or_as_subdomain() {
        assert!(host_matches("tripadvisor.com", "tripadvisor.com"));
        assert!(host_matches("www.tripadvisor.com", "tripadvisor.com"));
        assert!(!host_matches("nottripadvisor.com", "tripadvisor.com"));
        assert!(!host_matches("tripadvisor.com.evil.org", "tripadvisor.com"));
        assert_eq!(
            host_of("https://WWW.Example.com/x").as_deref(),
            Some("www.example.com")
        );
        assert_eq!(host_of("example.com/x"), None);
    }
}
