//! Request handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, info};

use super::types::{AppState, ErrorResponse, RedirectRequest, RedirectResponse};
use crate::config::MAX_URLS_PER_REQUEST;
use crate::export::WalkReport;
use crate::run::{walk_batch, BatchCounters};

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Walks every URL in the request body and returns one report per URL, in order.
pub async fn redirects_handler(
    State(state): State<AppState>,
    payload: Result<Json<RedirectRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            return bad_request(format!("Invalid request body: {}", rejection.body_text()));
        }
    };

    let inputs = request.into_inputs();
    if inputs.is_empty() {
        return bad_request("No URLs provided; send {\"urls\": [...]} or {\"url\": \"...\"}");
    }
    if inputs.len() > MAX_URLS_PER_REQUEST {
        return bad_request(format!(
            "Too many URLs ({} > {})",
            inputs.len(),
            MAX_URLS_PER_REQUEST
        ));
    }

    info!("Walking {} URL(s) for API request", inputs.len());
    let counters = BatchCounters {
        stats: Arc::clone(&state.stats),
        ..Default::default()
    };
    let items = walk_batch(Arc::clone(&state.walker), inputs, &state.options, &counters).await;
    let results = items.iter().map(WalkReport::from).collect();

    (StatusCode::OK, Json(RedirectResponse { results })).into_response()
}

/// Liveness probe
pub async fn health_handler() -> &'static str {
    "ok"
}
