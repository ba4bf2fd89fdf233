//! Request headers sent with every probe.

/// Headers attached to each probe request.
///
/// The `User-Agent` is set on the client itself; these identify what the
/// probe accepts. `Accept-Encoding: identity` keeps servers from bothering to
/// compress a body that is never read.
pub struct ProbeHeaders;

impl ProbeHeaders {
    /// Returns headers as (name, value) tuples, e.g. for logging.
    pub fn as_vec() -> Vec<(String, String)> {
        vec![
            ("accept".to_string(), "*/*".to_string()),
            ("accept-encoding".to_string(), "identity".to_string()),
            ("cache-control".to_string(), "no-cache".to_string()),
        ]
    }

    /// Applies the probe headers to a `reqwest::RequestBuilder`.
    pub fn apply_to_request_builder(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(reqwest::header::ACCEPT, "*/*")
            .header(reqwest::header::ACCEPT_ENCODING, "identity")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
    }
}
