//! Newsletter 订阅端点

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::{HttpResponse, HttpResponseBuilder, Responder, web};
use governor::NotUntil;
use governor::clock::{Clock, DefaultClock, QuantaInstant};
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tracing::debug;

use crate::config::get_config;
use crate::services::{NewsletterService, SubscribeOutcome};
use crate::validation::{NewsletterInput, UnsubscribeInput};

use super::error_code::{ApiDomain, ErrorCode};
use super::helpers::{api_result, created_response, error_from_ginywow, success_response};
use super::types::ApiResponse;

/// 按连接 IP 限流
///
/// 只信任 TCP peer address，不读取 X-Forwarded-For。
#[derive(Clone, Copy)]
pub struct ClientIpKeyExtractor;

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        req.connection_info()
            .peer_addr()
            .map(str::to_string)
            .ok_or_else(|| SimpleKeyExtractionError::new("Unable to extract peer IP"))
    }

    /// 超限响应同样使用统一信封
    fn exceed_rate_limit_response(
        &self,
        negative: &NotUntil<QuantaInstant>,
        mut response: HttpResponseBuilder,
    ) -> HttpResponse {
        let wait_time = negative
            .wait_time_from(DefaultClock::default().now())
            .as_secs();
        response
            .content_type("application/json; charset=utf-8")
            .json(ApiResponse::<()> {
                code: ErrorCode::RateLimitExceeded as i32,
                message: format!("Too many requests, retry in {}s", wait_time),
                data: None,
            })
    }
}

/// 创建订阅限流器，超限返回 429
pub fn newsletter_rate_limiter() -> Governor<ClientIpKeyExtractor, NoOpMiddleware> {
    let config = get_config();
    let seconds = config.newsletter.rate_limit_seconds_per_request.max(1);
    let burst = config.newsletter.rate_limit_burst.max(1);

    let governor_config = GovernorConfigBuilder::default()
        .seconds_per_request(seconds)
        .burst_size(burst)
        .key_extractor(ClientIpKeyExtractor)
        .finish()
        .expect("rate limit period and burst are clamped to at least 1");

    debug!(
        "Newsletter rate limiter created: 1 req/{}s, burst {}",
        seconds, burst
    );
    Governor::new(&governor_config)
}

/// 新订阅返回 201，重新激活返回 200
pub async fn subscribe(
    service: web::Data<Arc<NewsletterService>>,
    body: web::Json<NewsletterInput>,
) -> impl Responder {
    match service.subscribe(&body).await {
        Ok(SubscribeOutcome::Created(subscription)) => created_response(subscription),
        Ok(SubscribeOutcome::Reactivated(subscription)) => success_response(subscription),
        Err(e) => error_from_ginywow(&e, ApiDomain::Newsletter),
    }
}

pub async fn unsubscribe(
    service: web::Data<Arc<NewsletterService>>,
    body: web::Json<UnsubscribeInput>,
) -> impl Responder {
    api_result(service.unsubscribe(&body).await, ApiDomain::Newsletter)
}
