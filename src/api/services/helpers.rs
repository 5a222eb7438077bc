//! API 帮助函数

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::errors::GinywowError;

use super::error_code::{ApiDomain, ErrorCode};
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建 201 Created 响应
pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 GinywowError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
///
/// 5xx 错误不向客户端暴露内部细节。
pub fn error_from_ginywow(err: &GinywowError, domain: ApiDomain) -> HttpResponse {
    let status = err.http_status();
    let error_code = ErrorCode::from_error(err, domain);

    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
        let message = if status == StatusCode::SERVICE_UNAVAILABLE {
            "Service temporarily unavailable"
        } else {
            "Internal server error"
        };
        return error_response(status, error_code, message);
    }

    error_response(status, error_code, err.message())
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时按业务域映射错误码。
pub fn api_result<T: Serialize>(
    result: crate::errors::Result<T>,
    domain: ApiDomain,
) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_ginywow(&e, domain),
    }
}

/// 同 [`api_result`]，成功时返回 201
pub fn api_created<T: Serialize>(
    result: crate::errors::Result<T>,
    domain: ApiDomain,
) -> HttpResponse {
    match result {
        Ok(data) => created_response(data),
        Err(e) => error_from_ginywow(&e, domain),
    }
}

/// 请求体解析失败时同样返回统一信封
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected JSON body on {}: {}", req.path(), err);
    let response = error_response(
        StatusCode::BAD_REQUEST,
        ErrorCode::BadRequest,
        "Request body must be a valid JSON object",
    );
    InternalError::from_response(err, response).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(crate::api::MAX_JSON_BODY_BYTES)
        .error_handler(json_error_handler)
}
