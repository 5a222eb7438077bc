//! HTTP API 集成测试
//!
//! 使用与服务器相同的路由注册逻辑，跑在临时 SQLite 数据库上。

use std::net::SocketAddr;
use std::sync::{Arc, Once};

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::test::{self, TestRequest};
use actix_web::{App, dev::ServiceResponse};
use serde_json::{Value, json};
use tempfile::TempDir;

use ginywow::api::middleware::RequestIdMiddleware;
use ginywow::api::services::{AppStartTime, ErrorCode};
use ginywow::config::init_config;
use ginywow::runtime::lifetime::startup::StartupContext;
use ginywow::runtime::modes::server::configure_app;
use ginywow::storage::backend::SeaOrmStorage;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_context() -> (StartupContext, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("api.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (StartupContext::from_storage(Arc::new(storage)), temp_dir)
}

macro_rules! init_app {
    ($ctx:expr) => {{
        let ctx = $ctx.clone();
        let start = AppStartTime::now();
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .configure(move |cfg| configure_app(cfg, &ctx, &start)),
        )
        .await
    }};
}

fn peer(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([10, 0, 0, last_octet], 40000))
}

async fn read_json<B: actix_web::body::MessageBody>(resp: ServiceResponse<B>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response is not JSON")
}

// =============================================================================
// YouTube thumbnail downloader
// =============================================================================

#[actix_rt::test]
async fn test_youtube_thumbnails_ok() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/youtube/thumbnails")
        .set_json(json!({"url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let body = read_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["videoId"], "dQw4w9WgXcQ");
    let thumbnails = body["data"]["thumbnails"].as_array().unwrap();
    assert_eq!(thumbnails.len(), 5);
    assert_eq!(thumbnails[0]["quality"], "maxresdefault");
    assert_eq!(
        thumbnails[0]["url"],
        "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
    );
}

#[actix_rt::test]
async fn test_youtube_thumbnails_rejects_other_sites() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/youtube/thumbnails")
        .set_json(json!({"url": "https://vimeo.com/12345"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = read_json(resp).await;
    assert_eq!(body["code"], ErrorCode::InvalidYoutubeUrl as i32);
    assert_eq!(body["message"], "Please enter a valid YouTube URL");
}

#[actix_rt::test]
async fn test_malformed_json_uses_envelope() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/thumbnails")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = read_json(resp).await;
    assert_eq!(body["code"], ErrorCode::BadRequest as i32);
}

// =============================================================================
// Thumbnails & titles
// =============================================================================

#[actix_rt::test]
async fn test_thumbnail_enhancement_flow() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/thumbnails")
        .set_json(json!({
            "originalImageData": "iVBORw0KGgo=",
            "fileName": "cover.png",
            "fileSize": 4096
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = read_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(body["data"]["enhancedImageData"].is_null());

    let enhancement = json!({
        "enhancedImageData": "iVBORw0KGgo=",
        "enhancementMetrics": {
            "contrast": 10.0,
            "saturation": 4.0,
            "clarity": 12.0,
            "ctrImprovement": 3.0
        }
    });

    let req = TestRequest::post()
        .uri(&format!("/api/thumbnails/{}/enhancement", id))
        .set_json(&enhancement)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["data"]["enhancementMetrics"]["ctrImprovement"], 3.0);

    let req = TestRequest::post()
        .uri(&format!("/api/thumbnails/{}/enhancement", id))
        .set_json(&enhancement)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = read_json(resp).await;
    assert_eq!(body["code"], ErrorCode::ThumbnailAlreadyEnhanced as i32);

    let req = TestRequest::get()
        .uri("/api/thumbnails/unknown-id")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_thumbnail_validation_message() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/thumbnails")
        .set_json(json!({
            "originalImageData": "iVBORw0KGgo=",
            "fileName": "cover.png",
            "fileSize": 0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = read_json(resp).await;
    assert_eq!(body["code"], ErrorCode::ThumbnailInvalid as i32);
    assert_eq!(body["message"], "File size must be a positive number");
}

#[actix_rt::test]
async fn test_title_optimization_flow() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/title-optimizations")
        .set_json(json!({"originalTitle": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(resp).await["message"], "Title cannot be empty");

    let req = TestRequest::post()
        .uri("/api/title-optimizations")
        .set_json(json!({"originalTitle": "How I learned Rust"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = read_json(resp).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let req = TestRequest::post()
        .uri(&format!("/api/title-optimizations/{}/scores", id))
        .set_json(json!({
            "optimizedTitles": [{
                "title": "I Learned Rust In 30 Days",
                "score": 88,
                "estimatedCtr": 6.1,
                "seoScore": 72,
                "tags": ["rust", "programming"]
            }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri(&format!("/api/title-optimizations/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = read_json(resp).await;
    assert_eq!(
        body["data"]["optimizedTitles"][0]["title"],
        "I Learned Rust In 30 Days"
    );
}

// =============================================================================
// Newsletter
// =============================================================================

fn subscribe_request(email: &str, ip: u8) -> TestRequest {
    TestRequest::post()
        .uri("/api/newsletter/subscribe")
        .peer_addr(peer(ip))
        .set_json(json!({"email": email}))
}

#[actix_rt::test]
async fn test_newsletter_subscribe_lifecycle() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let resp = test::call_service(&app, subscribe_request("a@b.com", 1).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = read_json(resp).await;
    assert_eq!(body["data"]["isActive"], true);
    let id = body["data"]["id"].clone();

    let resp = test::call_service(&app, subscribe_request("a@b.com", 1).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = read_json(resp).await;
    assert_eq!(body["code"], ErrorCode::AlreadySubscribed as i32);
    assert_eq!(body["message"], "This email is already subscribed");

    let req = TestRequest::post()
        .uri("/api/newsletter/unsubscribe")
        .set_json(json!({"email": "a@b.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["data"]["isActive"], false);

    let resp = test::call_service(&app, subscribe_request("a@b.com", 1).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["isActive"], true);
}

#[actix_rt::test]
async fn test_newsletter_invalid_email() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let resp = test::call_service(&app, subscribe_request("not-an-email", 2).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = read_json(resp).await;
    assert_eq!(body["code"], ErrorCode::SubscriptionInvalid as i32);
    assert_eq!(body["message"], "Please enter a valid email address");
}

#[actix_rt::test]
async fn test_newsletter_rate_limited_per_ip() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    // 默认突发 5 次
    for i in 0..5 {
        let resp =
            test::call_service(&app, subscribe_request(&format!("user{}@example.com", i), 3).to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = test::call_service(&app, subscribe_request("user5@example.com", 3).to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = read_json(resp).await;
    assert_eq!(body["code"], 1029);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Too many requests")
    );
    assert!(body["data"].is_null());

    // 其他 IP 不受影响
    let resp = test::call_service(&app, subscribe_request("other@example.com", 4).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

// =============================================================================
// Short URLs & redirect
// =============================================================================

#[actix_rt::test]
async fn test_short_url_create_and_redirect() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/short-urls")
        .set_json(json!({
            "shortCode": "rick",
            "originalUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = read_json(resp).await;
    assert_eq!(body["data"]["urlType"], "video");
    let ios = body["data"]["iosDeepLink"].as_str().unwrap().to_string();
    let android = body["data"]["androidDeepLink"].as_str().unwrap().to_string();

    let req = TestRequest::get()
        .uri("/s/rick")
        .insert_header((
            header::USER_AGENT,
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), ios.as_str());

    let req = TestRequest::get()
        .uri("/s/rick?platform=android")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), android.as_str());

    let req = TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/s/rick")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
    );

    let req = TestRequest::get().uri("/api/short-urls/rick").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["clickCount"], 3);
}

#[actix_rt::test]
async fn test_short_url_duplicate_and_missing() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let payload = json!({
        "shortCode": "chan",
        "originalUrl": "https://www.youtube.com/@GinyWow"
    });
    let req = TestRequest::post()
        .uri("/api/short-urls")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(read_json(resp).await["data"]["urlType"], "channel");

    let req = TestRequest::post()
        .uri("/api/short-urls")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        read_json(resp).await["code"],
        ErrorCode::ShortCodeExists as i32
    );

    let req = TestRequest::get().uri("/s/nothing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get().uri("/api/short-urls/nothing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json(resp).await["code"],
        ErrorCode::ShortUrlNotFound as i32
    );
}

#[actix_rt::test]
async fn test_short_url_list_with_limit() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    for code in ["first", "second", "third"] {
        let req = TestRequest::post()
            .uri("/api/short-urls")
            .set_json(json!({
                "shortCode": code,
                "originalUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = TestRequest::get().uri("/api/short-urls").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["data"].as_array().unwrap().len(), 3);

    let req = TestRequest::get().uri("/api/short-urls?limit=2").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["shortCode"], "third");
    assert_eq!(listed[1]["shortCode"], "second");

    // limit=0 按 1 处理
    let req = TestRequest::get().uri("/api/short-urls?limit=0").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Health
// =============================================================================

#[actix_rt::test]
async fn test_health_reports_storage() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["storage"]["backend"], "sqlite");
    assert_eq!(body["data"]["storage"]["short_urls"], 0);

    let req = TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
