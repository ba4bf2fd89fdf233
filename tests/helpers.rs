// Shared test helpers for building walkers against local mock servers.

use std::time::Duration;

use redirect_walker::initialization::init_crypto_provider;
use redirect_walker::{init_probe_client, Config, RedirectWalker, ReqwestProbe, WalkOptions};

/// Config for tests that talk to servers on 127.0.0.1.
#[allow(dead_code)] // Used by other test files
pub fn local_config() -> Config {
    Config {
        allow_private: true,
        probe_timeout_ms: 2_000,
        ..Default::default()
    }
}

/// Real `ReqwestProbe` with the private-target guard off, so mock servers are reachable.
#[allow(dead_code)] // Used by other test files
pub fn local_probe() -> ReqwestProbe {
    init_crypto_provider();
    let client = init_probe_client(&local_config()).expect("Failed to build test client");
    ReqwestProbe::new(client).block_private_targets(false)
}

/// Walker over [`local_probe`] with the given hop limit and a short probe timeout.
#[allow(dead_code)] // Used by other test files
pub fn local_walker(max_hops: usize, probe_timeout: Duration) -> RedirectWalker<ReqwestProbe> {
    RedirectWalker::new(
        local_probe(),
        WalkOptions {
            max_hops,
            probe_timeout,
        },
    )
}

/// Real `ReqwestProbe` whose only private-network protection is the client's
/// DNS resolver: the text guard is off, IP literals connect directly and
/// hostnames must resolve to public addresses.
#[allow(dead_code)] // Used by other test files
pub fn resolver_only_guard() -> ReqwestProbe {
    init_crypto_provider();
    let config = Config {
        allow_private: false,
        ..local_config()
    };
    let client = init_probe_client(&config).expect("Failed to build test client");
    ReqwestProbe::new(client).block_private_targets(false)
}
