//! HTTP API data structures.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error_handling::ProcessingStats;
use crate::export::WalkReport;
use crate::fetch::HttpProbe;
use crate::run::BatchOptions;
use crate::walker::{RedirectWalker, WalkOptions};

/// Probe type the server walks with; erased so tests can inject their own.
pub type SharedProbe = Arc<dyn HttpProbe>;

/// Shared state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub walker: Arc<RedirectWalker<SharedProbe>>,
    pub options: BatchOptions,
    /// Totals across every request served
    pub stats: Arc<ProcessingStats>,
}

impl AppState {
    pub fn new<P: HttpProbe + 'static>(
        probe: P,
        walk_options: WalkOptions,
        options: BatchOptions,
    ) -> Self {
        let probe: SharedProbe = Arc::new(probe);
        Self {
            walker: Arc::new(RedirectWalker::new(probe, walk_options)),
            options,
            stats: Arc::new(ProcessingStats::new()),
        }
    }
}

/// Body of `POST /api/redirects`. Either field may be used; both are merged.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectRequest {
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RedirectRequest {
    pub fn into_inputs(self) -> Vec<String> {
        let mut inputs = self.urls;
        inputs.extend(self.url);
        inputs
    }
}

/// JSON response for `POST /api/redirects`
#[derive(Debug, Serialize, Deserialize)]
pub struct RedirectResponse {
    pub results: Vec<WalkReport>,
}

/// JSON body for rejected requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
