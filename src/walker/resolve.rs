//! `Location` header resolution.
//!
//! Resolution is textual: the result is compared against previously visited
//! URLs as a plain string, so no normalization happens here beyond what the
//! four rules below produce.

use std::sync::LazyLock;

use regex::Regex;

use super::WalkError;

/// `scheme:` prefix per RFC 3986 section 3.1.
static SCHEME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme pattern is a valid regex")
});

/// Returns true when `value` starts with a URI scheme.
pub fn has_scheme(value: &str) -> bool {
    SCHEME_PREFIX.is_match(value)
}

/// Resolves a `Location` value against the URL that returned it.
///
/// - absolute (`https://other.com/c`): used verbatim
/// - scheme-relative (`//cdn.example.com/c`): prefixed with the current scheme
/// - root-relative (`/c`): prefixed with the current scheme, host and port
/// - anything else: appended to the current directory path
///
/// Scheme, host and port are copied from `current` exactly as written, so
/// case, explicit default ports and IDN spellings survive.
///
/// # Errors
///
/// Returns `WalkError::InvalidUrl` if `current` has no `scheme://host` prefix.
pub fn resolve_location(current: &str, location: &str) -> Result<String, WalkError> {
    if has_scheme(location) {
        return Ok(location.to_string());
    }

    let invalid = |reason: &str| WalkError::InvalidUrl {
        url: current.to_string(),
        reason: reason.to_string(),
    };

    let scheme_len = SCHEME_PREFIX
        .find(current)
        .map(|m| m.end())
        .ok_or_else(|| invalid("URL has no scheme"))?;
    let after_scheme = &current[scheme_len..];
    let authority_part = after_scheme
        .strip_prefix("//")
        .ok_or_else(|| invalid("URL has no host component"))?;
    let authority_len = authority_part
        .find(['/', '?', '#'])
        .unwrap_or(authority_part.len());
    if authority_len == 0 {
        return Err(invalid("URL has no host component"));
    }

    if let Some(rest) = location.strip_prefix("//") {
        // scheme_len includes the trailing ':'
        return Ok(format!("{}//{}", &current[..scheme_len], rest));
    }

    let origin_len = scheme_len + 2 + authority_len;
    let origin = &current[..origin_len];
    if location.starts_with('/') {
        return Ok(format!("{origin}{location}"));
    }

    let tail = &current[origin_len..];
    let path = &tail[..tail.find(['?', '#']).unwrap_or(tail.len())];
    let directory = match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => "/",
    };
    Ok(format!("{origin}{directory}{location}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_location_is_verbatim() {
        assert_eq!(
            resolve_location("https://example.com/a/b", "https://other.com/c").unwrap(),
            "https://other.com/c"
        );
        // No normalization: trailing path and case survive as-is
        assert_eq!(
            resolve_location("https://example.com/a/b", "HTTP://Other.com").unwrap(),
            "HTTP://Other.com"
        );
    }

    #[test]
    fn test_scheme_relative_location() {
        assert_eq!(
            resolve_location("https://example.com/a/b", "//cdn.example.com/c").unwrap(),
            "https://cdn.example.com/c"
        );
        assert_eq!(
            resolve_location("http://example.com/", "//cdn.example.com").unwrap(),
            "http://cdn.example.com"
        );
    }

    #[test]
    fn test_root_relative_location() {
        assert_eq!(
            resolve_location("https://example.com/a/b", "/c").unwrap(),
            "https://example.com/c"
        );
        assert_eq!(
            resolve_location("https://example.com/a/b?x=1", "/c?y=2").unwrap(),
            "https://example.com/c?y=2"
        );
    }

    #[test]
    fn test_root_relative_keeps_non_default_port() {
        assert_eq!(
            resolve_location("http://example.com:8080/a/b", "/c").unwrap(),
            "http://example.com:8080/c"
        );
    }

    #[test]
    fn test_origin_is_copied_as_written() {
        assert_eq!(
            resolve_location("https://Example.COM/a/b", "/a/b").unwrap(),
            "https://Example.COM/a/b"
        );
        assert_eq!(
            resolve_location("HTTPS://Example.COM/a/b", "c").unwrap(),
            "HTTPS://Example.COM/a/c"
        );
        assert_eq!(
            resolve_location("HTTP://Example.COM/a", "//cdn.example.com/c").unwrap(),
            "HTTP://cdn.example.com/c"
        );
    }

    #[test]
    fn test_explicit_default_port_is_kept() {
        assert_eq!(
            resolve_location("http://example.com:80/a", "c").unwrap(),
            "http://example.com:80/c"
        );
        assert_eq!(
            resolve_location("https://example.com:443/a", "/c").unwrap(),
            "https://example.com:443/c"
        );
    }

    #[test]
    fn test_userinfo_and_idn_hosts_are_not_rewritten() {
        assert_eq!(
            resolve_location("https://user@bücher.example/a/b", "/c").unwrap(),
            "https://user@bücher.example/c"
        );
    }

    #[test]
    fn test_directory_relative_location() {
        assert_eq!(
            resolve_location("https://example.com/a/b", "c").unwrap(),
            "https://example.com/a/c"
        );
        assert_eq!(
            resolve_location("https://example.com/a/", "c").unwrap(),
            "https://example.com/a/c"
        );
        assert_eq!(
            resolve_location("https://example.com", "c").unwrap(),
            "https://example.com/c"
        );
    }

    #[test]
    fn test_directory_relative_drops_query() {
        assert_eq!(
            resolve_location("https://example.com/a/b?q=1", "c").unwrap(),
            "https://example.com/a/c"
        );
        // A slash inside the query or fragment is not a directory boundary
        assert_eq!(
            resolve_location("https://example.com/a/b?next=/x/y", "c").unwrap(),
            "https://example.com/a/c"
        );
        assert_eq!(
            resolve_location("https://example.com/a#frag/x", "c").unwrap(),
            "https://example.com/c"
        );
        assert_eq!(
            resolve_location("https://example.com?q=/x", "c").unwrap(),
            "https://example.com/c"
        );
    }

    #[test]
    fn test_dot_segments_are_not_collapsed() {
        assert_eq!(
            resolve_location("https://example.com/a/b", "../c").unwrap(),
            "https://example.com/a/../c"
        );
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://example.com"));
        assert!(has_scheme("mailto:someone@example.com"));
        assert!(has_scheme("svn+ssh://host/repo"));
        assert!(!has_scheme("//cdn.example.com"));
        assert!(!has_scheme("/path"));
        assert!(!has_scheme("path/with:colon"));
        assert!(!has_scheme("1http://x"));
    }

    #[test]
    fn test_unparseable_base_is_an_error() {
        assert!(resolve_location("not a url", "c").is_err());
        assert!(resolve_location("mailto:someone@example.com", "/c").is_err());
        assert!(resolve_location("https:///path", "c").is_err());
        // Absolute locations never touch the base
        assert!(resolve_location("not a url", "https://example.com").is_ok());
    }
}
