//! 缩略图与增强结果端点

use actix_web::{Responder, web};
use std::sync::Arc;

use crate::services::{ThumbnailService, TitleService};
use crate::validation::{EnhancementInput, ThumbnailInput};

use super::error_code::ApiDomain;
use super::helpers::{api_created, api_result};

pub async fn create_thumbnail(
    service: web::Data<Arc<ThumbnailService>>,
    body: web::Json<ThumbnailInput>,
) -> impl Responder {
    api_created(service.create(&body).await, ApiDomain::Thumbnail)
}

pub async fn get_thumbnail(
    service: web::Data<Arc<ThumbnailService>>,
    path: web::Path<String>,
) -> impl Responder {
    api_result(service.get(&path).await, ApiDomain::Thumbnail)
}

pub async fn record_enhancement(
    service: web::Data<Arc<ThumbnailService>>,
    path: web::Path<String>,
    body: web::Json<EnhancementInput>,
) -> impl Responder {
    api_result(
        service.record_enhancement(&path, &body).await,
        ApiDomain::Thumbnail,
    )
}

/// 缩略图关联的标题优化记录
pub async fn list_title_optimizations(
    titles: web::Data<Arc<TitleService>>,
    path: web::Path<String>,
) -> impl Responder {
    api_result(titles.list_for_thumbnail(&path).await, ApiDomain::Thumbnail)
}
