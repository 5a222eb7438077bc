//! 短链接跳转
//!
//! `?platform=` 优先于 User-Agent 推断；非法或未知短码直接 404。

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, error, trace};

use crate::errors::GinywowError;
use crate::services::{Platform, ShortUrlService};

use super::types::RedirectQuery;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        query: web::Query<RedirectQuery>,
        service: web::Data<Arc<ShortUrlService>>,
    ) -> impl Responder {
        let code = path.into_inner();
        let platform = Self::detect_platform(&req, &query);
        trace!("Redirect request for {} from {:?}", code, platform);

        match service.resolve(&code, platform).await {
            Ok(destination) => HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                .insert_header((header::LOCATION, destination))
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish(),
            Err(GinywowError::NotFound(_)) => {
                debug!("Short code not found: {}", code);
                Self::not_found_response()
            }
            Err(e) => {
                error!("Redirect failed for {}: {}", code, e);
                Self::error_response()
            }
        }
    }

    fn detect_platform(req: &HttpRequest, query: &RedirectQuery) -> Platform {
        if let Some(platform) = query
            .platform
            .as_deref()
            .and_then(|p| p.parse::<Platform>().ok())
        {
            return platform;
        }

        req.headers()
            .get(header::USER_AGENT)
            .and_then(|h| h.to_str().ok())
            .map(Platform::from_user_agent)
            .unwrap_or(Platform::Other)
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "public, max-age=60"))
            .body("Not Found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// 跳转路由，挂载在 `/s` 下
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("/s")
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect))
}
