//! URL validation and normalization for walk candidates.

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::UrlValidationError;
use crate::security::validate_url_safe;

/// Normalizes a candidate URL.
///
/// Trims whitespace, adds an `https://` prefix when no http(s) scheme is
/// present, then checks the result parses as an http/https URL with a host.
/// The returned string is the normalized input, not the parser's
/// re-serialization, so `example.com` becomes `https://example.com` rather
/// than `https://example.com/`.
///
/// # Errors
///
/// Returns a `UrlValidationError` for empty, over-long, unparseable or
/// non-http(s) input.
pub fn normalize_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong {
            len: trimmed.len(),
            max: MAX_URL_LENGTH,
        });
    }

    let lower = trimmed.to_ascii_lowercase();
    let normalized = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else if crate::walker::has_scheme(trimmed) && !looks_like_host_port(trimmed) {
        // ftp://, file:, javascript: ... are rejected rather than prefixed
        let scheme = trimmed.split(':').next().unwrap_or_default().to_string();
        return Err(UrlValidationError::UnsupportedScheme { scheme });
    } else {
        format!("https://{trimmed}")
    };

    // Re-check after adding the prefix
    if normalized.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong {
            len: normalized.len(),
            max: MAX_URL_LENGTH,
        });
    }

    let parsed = url::Url::parse(&normalized).map_err(|e| UrlValidationError::Parse {
        input: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(UrlValidationError::UnsupportedScheme {
                scheme: scheme.to_string(),
            })
        }
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(normalized),
        _ => Err(UrlValidationError::MissingHost(trimmed.to_string())),
    }
}

/// Normalizes `input` and, unless `allow_private` is set, rejects localhost
/// and private-network targets.
///
/// # Errors
///
/// Any `UrlValidationError` from normalization or the SSRF check.
pub fn validate_candidate(input: &str, allow_private: bool) -> Result<String, UrlValidationError> {
    let normalized = normalize_url(input)?;
    if !allow_private {
        validate_url_safe(&normalized)?;
    }
    Ok(normalized)
}

/// `example.com:8080` parses as scheme `example.com`; treat `host:digits` as a host.
fn looks_like_host_port(value: &str) -> bool {
    match value.split_once(':') {
        Some((_, rest)) => {
            let port = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_adds_https() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
    }

    #[test]
    fn test_normalize_url_preserves_scheme() {
        assert_eq!(
            normalize_url("http://example.com").unwrap(),
            "http://example.com"
        );
        assert_eq!(
            normalize_url("HTTPS://example.com/a").unwrap(),
            "HTTPS://example.com/a"
        );
    }

    #[test]
    fn test_normalize_url_trims_whitespace() {
        assert_eq!(
            normalize_url("  example.com/path \n").unwrap(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_normalize_url_with_port_and_path() {
        assert_eq!(
            normalize_url("example.com:8080").unwrap(),
            "https://example.com:8080"
        );
        assert_eq!(
            normalize_url("example.com:8080/path?q=1").unwrap(),
            "https://example.com:8080/path?q=1"
        );
    }

    #[test]
    fn test_normalize_url_ipv6() {
        assert_eq!(
            normalize_url("[2001:db8::1]/path").unwrap(),
            "https://[2001:db8::1]/path"
        );
    }

    #[test]
    fn test_normalize_url_rejects_other_schemes() {
        assert!(matches!(
            normalize_url("ftp://example.com"),
            Err(UrlValidationError::UnsupportedScheme { .. })
        ));
        assert!(matches!(
            normalize_url("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_normalize_url_rejects_garbage() {
        assert_eq!(normalize_url(""), Err(UrlValidationError::Empty));
        assert_eq!(normalize_url("   "), Err(UrlValidationError::Empty));
        assert!(normalize_url("not a valid url!!!").is_err());
        assert!(normalize_url("https://").is_err());
    }

    #[test]
    fn test_normalize_url_rejects_too_long() {
        let long = format!("example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            normalize_url(&long),
            Err(UrlValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_candidate_blocks_private_hosts() {
        assert!(matches!(
            validate_candidate("localhost:3000", false),
            Err(UrlValidationError::Unsafe(_))
        ));
        assert!(matches!(
            validate_candidate("http://10.0.0.5/admin", false),
            Err(UrlValidationError::Unsafe(_))
        ));
        assert_eq!(
            validate_candidate("http://127.0.0.1:8080", true).unwrap(),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_looks_like_host_port() {
        assert!(looks_like_host_port("example.com:8080"));
        assert!(looks_like_host_port("localhost:3000/x"));
        assert!(!looks_like_host_port("mailto:someone"));
        assert!(!looks_like_host_port("example.com"));
    }
}
