use actix_web::{post, web, HttpResponse};
use std::sync::Arc;
use tracing::debug;

use crate::error::AppError;
use crate::models::FeedRequest;
use crate::services::FeedService;

pub struct FeedHandlerState {
    pub service: Arc<FeedService>,
}

/// POST /api/v1/feed
#[post("/feed")]
pub async fn generate_feed(
    body: web::Json<FeedRequest>,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse, AppError> {
    debug!("Feed request: viewer_id={:?}", body.viewer_id());

    let response = state.service.generate_feed(&body).await?;
    Ok(HttpResponse::Ok().json(response))
}
