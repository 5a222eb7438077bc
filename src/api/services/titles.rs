//! 标题优化端点

use actix_web::{Responder, web};
use std::sync::Arc;

use crate::services::TitleService;
use crate::validation::{TitleOptimizationInput, TitleScoresInput};

use super::error_code::ApiDomain;
use super::helpers::{api_created, api_result};

pub async fn create_title_optimization(
    service: web::Data<Arc<TitleService>>,
    body: web::Json<TitleOptimizationInput>,
) -> impl Responder {
    api_created(service.create(&body).await, ApiDomain::Title)
}

pub async fn get_title_optimization(
    service: web::Data<Arc<TitleService>>,
    path: web::Path<String>,
) -> impl Responder {
    api_result(service.get(&path).await, ApiDomain::Title)
}

pub async fn record_title_scores(
    service: web::Data<Arc<TitleService>>,
    path: web::Path<String>,
    body: web::Json<TitleScoresInput>,
) -> impl Responder {
    api_result(service.record_scores(&path, &body).await, ApiDomain::Title)
}
