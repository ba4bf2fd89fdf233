//! DNS resolver that refuses non-public addresses.
//!
//! `validate_url_safe` only sees the URL text, so a hostname that resolves to
//! a private or loopback address passes it. This resolver plugs into
//! `reqwest::ClientBuilder::dns_resolver` and filters the addresses returned
//! by the system resolver before any socket is opened.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, LazyLock};

use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use tokio::sync::Semaphore;

use super::url_validation::{is_private_ipv4, is_private_ipv6};

/// Text carried by the resolution error, used to categorize it as blocked.
pub const BLOCKED_RESOLUTION_MARKER: &str = "resolves only to non-public addresses";

/// Caps concurrent system lookups so a large batch cannot exhaust the
/// resolver thread pool.
static LOOKUP_PERMITS: LazyLock<Arc<Semaphore>> = LazyLock::new(|| Arc::new(Semaphore::new(64)));

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Resolves through `tokio::net::lookup_host` and keeps only public addresses.
///
/// Resolution fails when every address for a name is private, loopback,
/// link-local, multicast or reserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeResolver;

impl Resolve for SafeResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            let _permit = LOOKUP_PERMITS
                .acquire()
                .await
                .map_err(|e| -> BoxError { Box::new(e) })?;

            let host = name.as_str().to_string();
            let resolved: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0))
                .await
                .map_err(|e| -> BoxError { Box::new(e) })?
                .collect();

            let public = public_addrs(resolved);
            if public.is_empty() {
                log::warn!("Refusing to connect to {host}: {BLOCKED_RESOLUTION_MARKER}");
                return Err(Box::new(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("host '{host}' {BLOCKED_RESOLUTION_MARKER}"),
                )) as BoxError);
            }

            let addrs: Addrs = Box::new(public.into_iter());
            Ok(addrs)
        })
    }
}

fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => !is_private_ipv4(v4),
        IpAddr::V6(v6) => !is_private_ipv6(v6),
    }
}

fn public_addrs(addrs: impl IntoIterator<Item = SocketAddr>) -> Vec<SocketAddr> {
    addrs.into_iter().filter(|a| is_public_ip(a.ip())).collect()
}
