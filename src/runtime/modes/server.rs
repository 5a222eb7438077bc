//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::MAX_JSON_BODY_BYTES;
use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::{AppStartTime, api_routes, health_routes, redirect_routes};
use crate::config::CorsConfig;
use crate::runtime::lifetime;
use crate::runtime::lifetime::startup::StartupContext;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS allowed_origins is empty. \
            No cross-origin requests will be allowed."
        );
    } else if cors_config.allowed_origins.iter().any(|o| o == "*") {
        warn!("CORS allows any origin");
    }
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();

    // Empty origins = same-origin only
    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods([Method::GET, Method::HEAD, Method::POST, Method::OPTIONS])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allowed_header("X-Request-ID")
        .expose_headers(["X-Request-ID"])
        .max_age(cors_config.max_age)
}

/// 注册共享状态和全部路由
///
/// 服务器和集成测试共用同一套注册逻辑。
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    context: &StartupContext,
    app_start_time: &AppStartTime,
) {
    cfg.app_data(web::Data::new(context.storage.clone()))
        .app_data(web::Data::new(context.thumbnail_service.clone()))
        .app_data(web::Data::new(context.title_service.clone()))
        .app_data(web::Data::new(context.newsletter_service.clone()))
        .app_data(web::Data::new(context.short_url_service.clone()))
        .app_data(web::Data::new(app_start_time.clone()))
        .app_data(web::PayloadConfig::new(MAX_JSON_BODY_BYTES))
        .service(health_routes())
        .service(api_routes())
        .service(redirect_routes());
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime::now();

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let config = crate::config::get_config();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    // Clone db reference before startup moves into HttpServer closure
    let db_for_shutdown = startup.storage.get_db().clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .wrap(Compress::default())
            .wrap(build_cors_middleware(&cors_config))
            .wrap(RequestIdMiddleware)
            .configure(|cfg| configure_app(cfg, &startup, &app_start_time))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
