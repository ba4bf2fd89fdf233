//! URL validation and SSRF protection.
//!
//! Blocks probes to:
//! - Private/internal IP addresses (RFC 1918, RFC 4193, etc.)
//! - Localhost addresses
//! - Non-HTTP/HTTPS schemes (file://, ftp://, etc.)
//! - Link-local addresses
//!
//! Applied to every redirect target as well as the start URL, so a public site
//! cannot bounce the walker into an internal network.

use std::net::{Ipv4Addr, Ipv6Addr};

use url::Url;

use crate::error_handling::UrlValidationError;

/// Validates that a URL is safe to probe.
///
/// Checks the scheme is http/https and the host is not localhost, a private
/// range, link-local, multicast or reserved.
///
/// # Examples
///
/// ```
/// use redirect_walker::security::validate_url_safe;
///
/// assert!(validate_url_safe("https://example.com").is_ok());
/// assert!(validate_url_safe("http://192.0.2.1").is_ok()); // Public test IP
///
/// assert!(validate_url_safe("http://127.0.0.1").is_err());
/// assert!(validate_url_safe("http://192.168.1.1").is_err());
/// assert!(validate_url_safe("file:///etc/passwd").is_err());
/// ```
pub fn validate_url_safe(url_str: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(url_str).map_err(|e| UrlValidationError::Parse {
        input: url_str.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(UrlValidationError::UnsupportedScheme {
                scheme: scheme.to_string(),
            });
        }
    }

    match url.host() {
        Some(url::Host::Domain(domain)) => {
            if is_localhost_domain(domain) {
                return Err(UrlValidationError::Unsafe(format!(
                    "localhost domain '{}' is not allowed",
                    domain
                )));
            }
        }
        Some(url::Host::Ipv4(ip)) => {
            if is_private_ipv4(ip) {
                return Err(UrlValidationError::Unsafe(format!(
                    "private IPv4 address '{}' is not allowed",
                    ip
                )));
            }
        }
        Some(url::Host::Ipv6(ip)) => {
            if is_private_ipv6(ip) {
                return Err(UrlValidationError::Unsafe(format!(
                    "private IPv6 address '{}' is not allowed",
                    ip
                )));
            }
        }
        None => return Err(UrlValidationError::MissingHost(url_str.to_string())),
    }

    Ok(())
}

/// Private, loopback, link-local, multicast and reserved IPv4 ranges.
pub(crate) fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    let octets = ip.octets();

    ip.is_loopback()                                   // 127.0.0.0/8
        || octets[0] == 10                             // 10.0.0.0/8
        || (octets[0] == 172 && (16..=31).contains(&octets[1])) // 172.16.0.0/12
        || (octets[0] == 192 && octets[1] == 168)      // 192.168.0.0/16
        || ip.is_link_local()                          // 169.254.0.0/16
        || octets[0] == 0                              // 0.0.0.0/8
        || (octets[0] == 100 && (64..=127).contains(&octets[1])) // 100.64.0.0/10 CGNAT
        || ip.is_multicast()                           // 224.0.0.0/4
        || octets[0] >= 240 // 240.0.0.0/4 reserved, broadcast
}

/// Loopback, unique local, link-local, multicast and IPv4-mapped private
/// IPv6 addresses.
pub(crate) fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_private_ipv4(v4);
    }

    let segments = ip.segments();
    ip.is_loopback()
        || ip.is_unspecified()
        || (segments[0] & 0xfe00) == 0xfc00 // fc00::/7
        || (segments[0] & 0xffc0) == 0xfe80 // fe80::/10
        || ip.is_multicast()
}

fn is_localhost_domain(domain: &str) -> bool {
    let domain_lower = domain.to_lowercase();
    matches!(
        domain_lower.as_str(),
        "localhost" | "localhost." | "localhost.localdomain" | "localhost.localdomain."
    ) || domain_lower.ends_with(".localhost")
        || domain_lower.ends_with(".localhost.")
}
