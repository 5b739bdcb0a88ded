use actix_web::{get, web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::services::EmojiPackService;

pub struct EmojiHandlerState {
    pub service: Arc<EmojiPackService>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackAnimatedResponse {
    pub pack_id: String,
    pub animated: bool,
}

/// GET /api/v1/emoji-packs/{pack_id}/animated
#[get("/emoji-packs/{pack_id}/animated")]
pub async fn get_pack_animated(
    path: web::Path<String>,
    state: web::Data<EmojiHandlerState>,
) -> Result<HttpResponse, AppError> {
    let pack_id = path.into_inner();

    match state.service.is_animated(&pack_id).await? {
        Some(animated) => Ok(HttpResponse::Ok().json(PackAnimatedResponse { pack_id, animated })),
        None => Err(AppError::NotFound(format!("Emoji pack {} not found", pack_id))),
    }
}
