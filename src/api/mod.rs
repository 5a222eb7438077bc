pub mod middleware;
pub mod services;

/// JSON 请求体上限，足够容纳 base64 编码的缩略图
pub const MAX_JSON_BODY_BYTES: usize = 10 * 1024 * 1024;
