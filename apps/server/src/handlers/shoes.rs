//! # Shoe Handlers
//!
//! CRUD over saved shoe configurations.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    POST /api/shoes                                      │
//! │                                                                         │
//! │  JSON body ──► ConfigBody (lenient ids: 9 or "9")                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  NewShoe::try_from   ── missing fields? ──► 400 "Missing required..."  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_shoe_name  ── blank / too long? ──► 400                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate() (if enforce_rules) ── any error? ──► 422 + violations      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ShoeRepository::insert ──► 201 + ShoeView                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! PATCH follows the same path, except the rules run on the stored row
//! merged with the patch. The read, the check and the write share one
//! write transaction, so two concurrent patches that are each harmless
//! can't combine into a blocked shoe.

use std::time::Instant;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};

use super::ConfigBody;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use shoelab_core::validation::validate_shoe_name;
use shoelab_core::{
    compute_total, format_price, is_submittable, validate, CoreError, NewShoe, Shoe, ShoeConfig,
    ShoeField,
};

/// A saved shoe with its current price.
///
/// Prices are derived from the catalog on every read, never stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoeView {
    #[serde(flatten)]
    pub shoe: Shoe,
    pub price: i64,
    pub price_label: String,
}

impl ShoeView {
    fn new(shoe: Shoe, state: &AppState) -> Self {
        let price = compute_total(Some(&shoe.config()));
        ShoeView {
            price_label: format_price(price, &state.config.currency, &state.config.locale),
            price,
            shoe,
        }
    }
}

/// Rejects a configuration with blocking violations when rules are enforced.
fn check_rules(state: &AppState, config: &ShoeConfig) -> Result<(), CoreError> {
    if !state.config.enforce_rules {
        return Ok(());
    }

    let violations = validate(Some(config));
    if is_submittable(&violations) {
        return Ok(());
    }

    info!(
        blocking = violations.iter().filter(|v| v.is_error()).count(),
        "Rejected shoe configuration"
    );
    Err(CoreError::Rejected { violations })
}

fn check_name(config: &ShoeConfig) -> Result<(), CoreError> {
    if let Some(name) = config.shoe_name.as_deref() {
        validate_shoe_name(name)?;
    }
    Ok(())
}

/// `GET /api/shoes`
pub async fn list_shoes(State(state): State<AppState>) -> ApiResult<Json<Vec<ShoeView>>> {
    let start = Instant::now();

    let shoes = state.db.shoes().list().await?;
    let views: Vec<ShoeView> = shoes
        .into_iter()
        .map(|shoe| ShoeView::new(shoe, &state))
        .collect();

    debug!(
        count = views.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Listed shoes"
    );
    Ok(Json(views))
}

/// `GET /api/shoes/{id}`
pub async fn get_shoe(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ShoeView>> {
    let Path(id) = path?;

    let shoe = state
        .db
        .shoes()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::ShoeNotFound(id))?;

    Ok(Json(ShoeView::new(shoe, &state)))
}

/// `POST /api/shoes`
pub async fn create_shoe(
    State(state): State<AppState>,
    ConfigBody(body): ConfigBody,
) -> ApiResult<(StatusCode, Json<ShoeView>)> {
    let config = body.unwrap_or_default();

    let new_shoe = NewShoe::try_from(&config)?;
    check_name(&config)?;
    check_rules(&state, &config)?;

    let saved = state.db.shoes().insert(&new_shoe).await?;
    info!(id = saved.id, name = %saved.shoe_name, "Created shoe");

    Ok((StatusCode::CREATED, Json(ShoeView::new(saved, &state))))
}

/// `PATCH /api/shoes/{id}`
pub async fn update_shoe(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ConfigBody(body): ConfigBody,
) -> ApiResult<Json<ShoeView>> {
    let Path(id) = path?;
    let patch = body.unwrap_or_default();

    if patch.is_empty() {
        return Err(CoreError::NoFieldsToUpdate.into());
    }
    if patch.shoe_name.as_deref() == Some("") {
        return Err(CoreError::MissingFields(vec![ShoeField::ShoeName]).into());
    }
    check_name(&patch)?;

    let repo = state.db.shoes();
    let updated = if state.config.enforce_rules {
        repo.update_checked(id, &patch, |merged| {
            check_rules(&state, merged).map_err(ApiError::from)
        })
        .await?
    } else {
        repo.update(id, &patch).await?
    };
    info!(id, fields = patch.provided().len(), "Updated shoe");

    Ok(Json(ShoeView::new(updated, &state)))
}

/// `DELETE /api/shoes/{id}`
pub async fn delete_shoe(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;

    state.db.shoes().delete(id).await?;
    info!(id, "Deleted shoe");

    Ok(StatusCode::NO_CONTENT)
}
