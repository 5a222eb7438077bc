use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 图片增强评分
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementMetrics {
    pub contrast: f64,
    pub saturation: f64,
    pub clarity: f64,
    pub ctr_improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub id: String,
    pub original_image_data: String,
    pub enhanced_image_data: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    pub enhancement_metrics: Option<EnhancementMetrics>,
    pub created_at: DateTime<Utc>,
}

impl Thumbnail {
    pub fn is_enhanced(&self) -> bool {
        self.enhanced_image_data.is_some()
    }
}

/// 单个候选标题及其评分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedTitle {
    pub title: String,
    pub score: f64,
    pub estimated_ctr: f64,
    pub seo_score: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOptimization {
    pub id: String,
    pub original_title: String,
    pub optimized_titles: Option<Vec<OptimizedTitle>>,
    pub thumbnail_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: i32,
    pub email: String,
    pub is_active: bool,
    pub subscription_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub source: Option<String>,
}

/// 短链接指向的 YouTube 资源类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UrlType {
    Video,
    Channel,
    Playlist,
    Shorts,
}

impl UrlType {
    /// 所有合法取值，逗号分隔（用于错误提示）
    pub fn valid_values() -> String {
        UrlType::iter()
            .map(|t| t.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for UrlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for UrlType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "channel" => Ok(Self::Channel),
            "playlist" => Ok(Self::Playlist),
            "shorts" => Ok(Self::Shorts),
            _ => Err(format!(
                "Invalid URL type '{}'. Valid: {}",
                s,
                Self::valid_values()
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrl {
    pub id: i32,
    pub short_code: String,
    pub original_url: String,
    pub ios_deep_link: String,
    pub android_deep_link: String,
    pub url_type: UrlType,
    pub created_at: DateTime<Utc>,
    pub click_count: u64,
}

/// 存储后端信息
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
