//! 短链接管理端点

use actix_web::{Responder, web};
use std::sync::Arc;

use crate::services::ShortUrlService;
use crate::validation::ShortUrlInput;

use super::error_code::ApiDomain;
use super::helpers::{api_created, api_result};
use super::types::ListQuery;

const DEFAULT_LIST_LIMIT: u64 = 100;
const MAX_LIST_LIMIT: u64 = 1000;

pub async fn create_short_url(
    service: web::Data<Arc<ShortUrlService>>,
    body: web::Json<ShortUrlInput>,
) -> impl Responder {
    api_created(service.create(&body).await, ApiDomain::ShortUrl)
}

pub async fn get_short_url(
    service: web::Data<Arc<ShortUrlService>>,
    path: web::Path<String>,
) -> impl Responder {
    api_result(service.get(&path).await, ApiDomain::ShortUrl)
}

/// 最新创建的短链接，`limit` 限制在 1..=1000
pub async fn list_short_urls(
    service: web::Data<Arc<ShortUrlService>>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    api_result(service.list(limit).await, ApiDomain::ShortUrl)
}
