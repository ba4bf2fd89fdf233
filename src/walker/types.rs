//! Redirect chain data model.
//!
//! A walk produces one [`RedirectStep`] per probed URL, collected in hop order
//! inside a [`RedirectResult`] together with the reason the walk stopped.

use strum_macros::EnumIter as EnumIterMacro;

/// Redirect semantics of a single hop.
///
/// Derived only from the status code and whether a `Location` header was
/// present. A 3xx response without `Location` is a [`RedirectKind::FinalDestination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum RedirectKind {
    /// 301 Moved Permanently
    Permanent301,
    /// 302 Found
    Temporary302,
    /// 303 See Other
    SeeOther303,
    /// 307 Temporary Redirect
    Temporary307,
    /// 308 Permanent Redirect
    Permanent308,
    /// Any other 3xx carrying a `Location` header
    OtherRedirect,
    /// Not a redirect; the chain ends at this hop
    FinalDestination,
}

impl RedirectKind {
    /// Classifies a response.
    pub fn classify(status_code: u16, has_location: bool) -> Self {
        if !has_location || !(300..400).contains(&status_code) {
            return RedirectKind::FinalDestination;
        }
        match status_code {
            301 => RedirectKind::Permanent301,
            302 => RedirectKind::Temporary302,
            303 => RedirectKind::SeeOther303,
            307 => RedirectKind::Temporary307,
            308 => RedirectKind::Permanent308,
            _ => RedirectKind::OtherRedirect,
        }
    }

    /// Returns true for every kind except [`RedirectKind::FinalDestination`].
    pub fn is_redirect(&self) -> bool {
        !matches!(self, RedirectKind::FinalDestination)
    }

    /// Human-readable label used at the report boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectKind::Permanent301 => "Permanent (301)",
            RedirectKind::Temporary302 => "Temporary (302)",
            RedirectKind::SeeOther303 => "See Other (303)",
            RedirectKind::Temporary307 => "Temporary (307)",
            RedirectKind::Permanent308 => "Permanent (308)",
            RedirectKind::OtherRedirect => "Redirect (3xx)",
            RedirectKind::FinalDestination => "Final Destination",
        }
    }
}

impl std::fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Terminal {
    /// Reached a non-redirect response
    Completed,
    /// A resolved URL was already visited in this walk
    LoopDetected,
    /// Followed `max_hops` redirects without reaching a final destination
    TooManyRedirects,
    /// The probe failed with a network or timeout error
    ProbeFailed,
}

impl Terminal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Terminal::Completed => "Completed",
            Terminal::LoopDetected => "Redirect loop detected",
            Terminal::TooManyRedirects => "Too many redirects",
            Terminal::ProbeFailed => "Probe failed",
        }
    }
}

/// One hop in a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectStep {
    /// URL probed at this hop
    pub url: String,
    pub status_code: u16,
    pub status_text: String,
    pub redirect_kind: RedirectKind,
    /// Raw `Location` header, only set when this hop is a redirect
    pub location: Option<String>,
    /// Wall-clock duration of the probe in milliseconds
    pub response_time_ms: u64,
}

/// Outcome of walking from one origin URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResult {
    pub original_url: String,
    /// Hops in the order they were probed
    pub chain: Vec<RedirectStep>,
    /// Last URL the walk reached (probed or about to be probed)
    pub final_url: Option<String>,
    pub final_status_code: Option<u16>,
    /// Redirect hops followed; excludes the final non-redirect hop
    pub hop_count: usize,
    pub terminal: Terminal,
    pub total_time_ms: u64,
    pub error_message: Option<String>,
}

impl RedirectResult {
    pub fn has_loop(&self) -> bool {
        self.terminal == Terminal::LoopDetected
    }

    pub fn has_too_many_redirects(&self) -> bool {
        self.terminal == Terminal::TooManyRedirects
    }

    pub fn is_completed(&self) -> bool {
        self.terminal == Terminal::Completed
    }

    /// True when the first hop and the final URL use different schemes,
    /// e.g. an `http://` origin that lands on `https://`.
    pub fn changed_scheme(&self) -> bool {
        let Some(final_url) = self.final_url.as_deref() else {
            return false;
        };
        scheme_of(&self.original_url) != scheme_of(final_url)
    }
}

fn scheme_of(url: &str) -> Option<String> {
    url.split_once(':').map(|(scheme, _)| scheme.to_ascii_lowercase())
}
