pub mod error_code;
pub mod health;
pub mod helpers;
pub mod newsletter;
pub mod redirect;
pub mod short_urls;
pub mod thumbnails;
pub mod titles;
pub mod types;
pub mod youtube;

use actix_web::web;

pub use error_code::{ApiDomain, ErrorCode};
pub use health::{AppStartTime, HealthService, health_routes};
pub use helpers::json_config;
pub use newsletter::{ClientIpKeyExtractor, newsletter_rate_limiter};
pub use redirect::{RedirectService, redirect_routes};
pub use types::ApiResponse;

/// JSON API 路由，挂载在 `/api` 下
///
/// 订阅限流器随 worker 创建，计数按 worker 独立。
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .app_data(json_config())
        .route(
            "/youtube/thumbnails",
            web::post().to(youtube::youtube_thumbnails),
        )
        .route("/thumbnails", web::post().to(thumbnails::create_thumbnail))
        .route("/thumbnails/{id}", web::get().to(thumbnails::get_thumbnail))
        .route(
            "/thumbnails/{id}/enhancement",
            web::post().to(thumbnails::record_enhancement),
        )
        .route(
            "/thumbnails/{id}/title-optimizations",
            web::get().to(thumbnails::list_title_optimizations),
        )
        .route(
            "/title-optimizations",
            web::post().to(titles::create_title_optimization),
        )
        .route(
            "/title-optimizations/{id}",
            web::get().to(titles::get_title_optimization),
        )
        .route(
            "/title-optimizations/{id}/scores",
            web::post().to(titles::record_title_scores),
        )
        .route(
            "/newsletter/subscribe",
            web::post()
                .to(newsletter::subscribe)
                .wrap(newsletter_rate_limiter()),
        )
        .route(
            "/newsletter/unsubscribe",
            web::post().to(newsletter::unsubscribe),
        )
        .service(
            web::resource("/short-urls")
                .route(web::get().to(short_urls::list_short_urls))
                .route(web::post().to(short_urls::create_short_url)),
        )
        .route(
            "/short-urls/{code}",
            web::get().to(short_urls::get_short_url),
        )
}
