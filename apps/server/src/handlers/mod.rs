//! # HTTP Handlers
//!
//! ## Route Map
//! ```text
//! GET    /healthz            health::healthz
//! GET    /debug/db           health::debug_db
//! GET    /api/catalog        catalog::get_catalog
//! POST   /api/quote          quote::quote
//! GET    /api/shoes          shoes::list_shoes
//! POST   /api/shoes          shoes::create_shoe
//! GET    /api/shoes/{id}     shoes::get_shoe
//! PATCH  /api/shoes/{id}     shoes::update_shoe
//! DELETE /api/shoes/{id}     shoes::delete_shoe
//! ```

pub mod catalog;
pub mod health;
pub mod quote;
pub mod shoes;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use shoelab_core::ShoeConfig;

use crate::error::ApiError;

/// A JSON shoe configuration body that may be absent.
///
/// An empty body and a literal `null` both yield `None`, so callers decide
/// what "nothing sent" means. The Content-Type header is not checked.
#[derive(Debug)]
pub struct ConfigBody(pub Option<ShoeConfig>);

impl<S> FromRequest<S> for ConfigBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ConfigBody(None));
        }

        let config: Option<ShoeConfig> = serde_json::from_slice(&bytes)?;
        Ok(ConfigBody(config))
    }
}
