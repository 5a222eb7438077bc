//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::GinywowError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 缩略图 / YouTube 表单
/// - 3000-3099: 标题优化
/// - 4000-4099: Newsletter
/// - 5000-5099: 短链接
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    ServiceUnavailable = 1030,

    // 缩略图 2000-2099
    ThumbnailInvalid = 2000,
    ThumbnailNotFound = 2001,
    ThumbnailAlreadyEnhanced = 2002,
    InvalidYoutubeUrl = 2010,

    // 标题优化 3000-3099
    TitleInvalid = 3000,
    TitleNotFound = 3001,
    TitleAlreadyScored = 3002,

    // Newsletter 4000-4099
    SubscriptionInvalid = 4000,
    SubscriptionNotFound = 4001,
    AlreadySubscribed = 4002,

    // 短链接 5000-5099
    ShortUrlInvalid = 5000,
    ShortUrlNotFound = 5001,
    ShortCodeExists = 5002,
}

/// 错误所属的业务域，决定 4xx 错误使用哪一组错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiDomain {
    General,
    Youtube,
    Thumbnail,
    Title,
    Newsletter,
    ShortUrl,
}

impl ErrorCode {
    pub fn from_error(err: &GinywowError, domain: ApiDomain) -> Self {
        use ApiDomain as D;

        match (err, domain) {
            (GinywowError::Validation(_), D::Youtube) => ErrorCode::InvalidYoutubeUrl,
            (GinywowError::Validation(_), D::Thumbnail) => ErrorCode::ThumbnailInvalid,
            (GinywowError::Validation(_), D::Title) => ErrorCode::TitleInvalid,
            (GinywowError::Validation(_), D::Newsletter) => ErrorCode::SubscriptionInvalid,
            (GinywowError::Validation(_), D::ShortUrl) => ErrorCode::ShortUrlInvalid,
            (GinywowError::Validation(_), _) => ErrorCode::BadRequest,

            (GinywowError::NotFound(_), D::Thumbnail) => ErrorCode::ThumbnailNotFound,
            (GinywowError::NotFound(_), D::Title) => ErrorCode::TitleNotFound,
            (GinywowError::NotFound(_), D::Newsletter) => ErrorCode::SubscriptionNotFound,
            (GinywowError::NotFound(_), D::ShortUrl) => ErrorCode::ShortUrlNotFound,
            (GinywowError::NotFound(_), _) => ErrorCode::NotFound,

            (GinywowError::Conflict(_), D::Thumbnail) => ErrorCode::ThumbnailAlreadyEnhanced,
            (GinywowError::Conflict(_), D::Title) => ErrorCode::TitleAlreadyScored,
            (GinywowError::Conflict(_), D::Newsletter) => ErrorCode::AlreadySubscribed,
            (GinywowError::Conflict(_), D::ShortUrl) => ErrorCode::ShortCodeExists,
            (GinywowError::Conflict(_), _) => ErrorCode::Conflict,

            (GinywowError::DatabaseConnection(_), _) => ErrorCode::ServiceUnavailable,
            (GinywowError::DatabaseConfig(_), _)
            | (GinywowError::DatabaseOperation(_), _)
            | (GinywowError::Serialization(_), _)
            | (GinywowError::FileOperation(_), _) => ErrorCode::InternalServerError,
        }
    }
}
