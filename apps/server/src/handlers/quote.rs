//! Live pricing and rule feedback for a draft configuration.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use shoelab_core::{compute_total, explain, format_price, is_submittable, validate, Violation};
use tracing::debug;

use super::ConfigBody;
use crate::AppState;

/// Everything the builder form shows next to a draft.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub total: i64,
    pub total_label: String,
    pub violations: Vec<Violation>,
    pub submittable: bool,
    pub explanation: String,
}

/// `POST /api/quote`
///
/// Never fails on content: an empty body quotes the base price and reports
/// `EMPTY_CONFIG`.
pub async fn quote(State(state): State<AppState>, ConfigBody(config): ConfigBody) -> Json<QuoteResponse> {
    let total = compute_total(config.as_ref());
    let violations = validate(config.as_ref());
    let submittable = is_submittable(&violations);

    debug!(total, violations = violations.len(), submittable, "Quoted draft");

    Json(QuoteResponse {
        total,
        total_label: format_price(total, &state.config.currency, &state.config.locale),
        explanation: explain(&violations),
        submittable,
        violations,
    })
}
