//! API 类型定义

use serde::{Deserialize, Serialize};

use crate::utils::youtube::ThumbnailVariant;

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

/// 缩略图下载器结果
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeThumbnailsResponse {
    pub video_id: String,
    pub thumbnails: Vec<ThumbnailVariant>,
}

#[derive(Serialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_urls: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    /// 运行秒数
    pub uptime: u64,
    pub storage: HealthStorageCheck,
    pub response_time_ms: u32,
}

/// 短链接列表查询参数
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    pub limit: Option<u64>,
}

/// 跳转查询参数，`platform` 覆盖 User-Agent 推断
#[derive(Deserialize, Debug, Default)]
pub struct RedirectQuery {
    pub platform: Option<String>,
}
