//! Short URL service
//!
//! Creates short codes for YouTube links and resolves them to the
//! destination matching the visitor's platform.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use moka::sync::Cache;
use tracing::{debug, info, warn};

use crate::config::get_config;
use crate::errors::{GinywowError, Result};
use crate::storage::{SeaOrmStorage, ShortUrl};
use crate::utils::{generate_random_code, is_valid_short_code};
use crate::validation::{ShortUrlInput, validate_short_url};

/// 自动生成短码的最大尝试次数
const MAX_GENERATE_ATTEMPTS: usize = 8;

/// Visitor platform used to pick a redirect destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    Other,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        if ["iPhone", "iPad", "iPod"]
            .iter()
            .any(|device| user_agent.contains(device))
        {
            Platform::Ios
        } else if user_agent.contains("Android") {
            Platform::Android
        } else {
            Platform::Other
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "web" | "other" => Ok(Platform::Other),
            other => Err(format!("Unknown platform: {}", other)),
        }
    }
}

impl ShortUrl {
    /// 按平台选择跳转目标
    pub fn destination_for(&self, platform: Platform) -> &str {
        match platform {
            Platform::Ios => &self.ios_deep_link,
            Platform::Android => &self.android_deep_link,
            Platform::Other => &self.original_url,
        }
    }
}

pub struct ShortUrlService {
    storage: Arc<SeaOrmStorage>,
    /// 跳转查询缓存，TTL 为 0 时禁用
    cache: Option<Cache<String, ShortUrl>>,
    code_length: usize,
}

impl ShortUrlService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        let config = get_config();
        let settings = &config.short_url;

        let cache = (settings.cache_ttl_secs > 0).then(|| {
            Cache::builder()
                .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
                .max_capacity(settings.cache_capacity)
                .build()
        });

        Self {
            storage,
            cache,
            code_length: settings.code_length,
        }
    }

    pub async fn create(&self, input: &ShortUrlInput) -> Result<ShortUrl> {
        let draft = validate_short_url(input)?;
        let now = Utc::now();
        let record = |short_code: String| ShortUrl {
            id: 0,
            short_code,
            original_url: draft.original_url.clone(),
            ios_deep_link: draft.ios_deep_link.clone(),
            android_deep_link: draft.android_deep_link.clone(),
            url_type: draft.url_type,
            created_at: now,
            click_count: 0,
        };

        if let Some(code) = draft.short_code.clone() {
            return self.storage.insert_short_url(&record(code)).await;
        }

        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let code = generate_random_code(self.code_length);
            match self.storage.insert_short_url(&record(code.clone())).await {
                Ok(created) => return Ok(created),
                Err(GinywowError::Conflict(_)) => {
                    debug!(
                        "Generated short code '{}' collided (attempt {}/{})",
                        code, attempt, MAX_GENERATE_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            "Failed to generate a unique short code after {} attempts",
            MAX_GENERATE_ATTEMPTS
        );
        Err(GinywowError::conflict(
            "Unable to generate a unique short code, please try again",
        ))
    }

    pub async fn get(&self, code: &str) -> Result<ShortUrl> {
        let not_found = || GinywowError::not_found(format!("Short URL '{}' not found", code));
        if !is_valid_short_code(code) {
            return Err(not_found());
        }
        self.storage.get_short_url(code).await?.ok_or_else(not_found)
    }

    pub async fn list(&self, limit: u64) -> Result<Vec<ShortUrl>> {
        self.storage.list_short_urls(limit).await
    }

    /// 计数并返回跳转目标
    ///
    /// 点击数总是直接写库，缓存只用于查找目标地址。
    pub async fn resolve(&self, code: &str, platform: Platform) -> Result<String> {
        let not_found = || GinywowError::not_found(format!("Short URL '{}' not found", code));
        if !is_valid_short_code(code) {
            return Err(not_found());
        }

        if !self.storage.increment_click_count(code).await? {
            if let Some(cache) = &self.cache {
                cache.invalidate(code);
            }
            return Err(not_found());
        }

        let url = match self.cache.as_ref().and_then(|c| c.get(code)) {
            Some(url) => url,
            None => {
                let url = self.storage.get_short_url(code).await?.ok_or_else(not_found)?;
                if let Some(cache) = &self.cache {
                    cache.insert(code.to_string(), url.clone());
                }
                url
            }
        };

        let destination = url.destination_for(platform).to_string();
        info!("Resolved {} ({:?}) -> {}", code, platform, destination);
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::UrlType;

    fn sample() -> ShortUrl {
        ShortUrl {
            id: 1,
            short_code: "rick".to_string(),
            original_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            ios_deep_link: "youtube://watch?v=dQw4w9WgXcQ".to_string(),
            android_deep_link: "vnd.youtube://watch?v=dQw4w9WgXcQ".to_string(),
            url_type: UrlType::Video,
            created_at: Utc::now(),
            click_count: 0,
        }
    }

    #[test]
    fn test_platform_from_user_agent() {
        assert_eq!(
            Platform::from_user_agent(
                "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
            ),
            Platform::Ios
        );
        assert_eq!(
            Platform::from_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/120"),
            Platform::Android
        );
        assert_eq!(
            Platform::from_user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) Firefox/121"),
            Platform::Other
        );
        assert_eq!(Platform::from_user_agent(""), Platform::Other);
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("iOS".parse::<Platform>(), Ok(Platform::Ios));
        assert_eq!("android".parse::<Platform>(), Ok(Platform::Android));
        assert_eq!("web".parse::<Platform>(), Ok(Platform::Other));
        assert!("symbian".parse::<Platform>().is_err());
    }

    #[test]
    fn test_destination_for_platform() {
        let url = sample();
        assert_eq!(
            url.destination_for(Platform::Ios),
            "youtube://watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            url.destination_for(Platform::Android),
            "vnd.youtube://watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            url.destination_for(Platform::Other),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }
}
