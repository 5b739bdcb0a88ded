pub mod emoji;
pub mod feed;

use actix_web::{web, HttpResponse};

pub use emoji::{get_pack_animated, EmojiHandlerState, PackAnimatedResponse};
pub use feed::{generate_feed, FeedHandlerState};

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

/// Register every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::scope("/api/v1")
                .service(generate_feed)
                .service(get_pack_animated),
        );
}
