use sea_orm::ActiveValue::{NotSet, Set};

use crate::errors::{GinywowError, Result};
use crate::storage::models::{
    EnhancementMetrics, NewsletterSubscription, OptimizedTitle, ShortUrl, Thumbnail,
    TitleOptimization, UrlType,
};
use migration::entities::{newsletter_subscription, short_url, thumbnail, title_optimization};

/// is_active 列的文本表示
pub fn bool_to_flag(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// 解析 is_active 列
///
/// 与查询条件 `is_active = 'true'` 保持一致：只有精确的 "true" 视为有效。
pub fn flag_to_bool(value: &str) -> bool {
    value == bool_to_flag(true)
}

/// 将 Sea-ORM Model 转换为 Thumbnail
pub fn model_to_thumbnail(model: thumbnail::Model) -> Result<Thumbnail> {
    let enhancement_metrics = model
        .enhancement_metrics
        .map(serde_json::from_value::<EnhancementMetrics>)
        .transpose()
        .map_err(|e| {
            GinywowError::serialization(format!(
                "Corrupt enhancement_metrics on thumbnail '{}': {}",
                model.id, e
            ))
        })?;

    Ok(Thumbnail {
        id: model.id,
        original_image_data: model.original_image_data,
        enhanced_image_data: model.enhanced_image_data,
        file_name: model.file_name,
        file_size: model.file_size,
        enhancement_metrics,
        created_at: model.created_at,
    })
}

/// 将 Thumbnail 转换为 ActiveModel（仅用于插入）
pub fn thumbnail_to_active_model(thumbnail: &Thumbnail) -> Result<thumbnail::ActiveModel> {
    let metrics = thumbnail
        .enhancement_metrics
        .as_ref()
        .map(serde_json::to_value)
        .transpose()?;

    Ok(thumbnail::ActiveModel {
        id: Set(thumbnail.id.clone()),
        original_image_data: Set(thumbnail.original_image_data.clone()),
        enhanced_image_data: Set(thumbnail.enhanced_image_data.clone()),
        file_name: Set(thumbnail.file_name.clone()),
        file_size: Set(thumbnail.file_size),
        enhancement_metrics: Set(metrics),
        created_at: Set(thumbnail.created_at),
    })
}

pub fn model_to_title_optimization(model: title_optimization::Model) -> Result<TitleOptimization> {
    let optimized_titles = model
        .optimized_titles
        .map(serde_json::from_value::<Vec<OptimizedTitle>>)
        .transpose()
        .map_err(|e| {
            GinywowError::serialization(format!(
                "Corrupt optimized_titles on title optimization '{}': {}",
                model.id, e
            ))
        })?;

    Ok(TitleOptimization {
        id: model.id,
        original_title: model.original_title,
        optimized_titles,
        thumbnail_id: model.thumbnail_id,
        created_at: model.created_at,
    })
}

pub fn title_optimization_to_active_model(
    record: &TitleOptimization,
) -> Result<title_optimization::ActiveModel> {
    let titles = record
        .optimized_titles
        .as_ref()
        .map(serde_json::to_value)
        .transpose()?;

    Ok(title_optimization::ActiveModel {
        id: Set(record.id.clone()),
        original_title: Set(record.original_title.clone()),
        optimized_titles: Set(titles),
        thumbnail_id: Set(record.thumbnail_id.clone()),
        created_at: Set(record.created_at),
    })
}

pub fn model_to_subscription(model: newsletter_subscription::Model) -> NewsletterSubscription {
    NewsletterSubscription {
        id: model.id,
        email: model.email,
        is_active: flag_to_bool(&model.is_active),
        subscription_date: model.subscription_date,
        last_updated: model.last_updated,
        source: model.source,
    }
}

/// 新订阅的 ActiveModel（id 由数据库自增生成）
pub fn subscription_to_active_model(
    subscription: &NewsletterSubscription,
) -> newsletter_subscription::ActiveModel {
    newsletter_subscription::ActiveModel {
        id: NotSet,
        email: Set(subscription.email.clone()),
        is_active: Set(bool_to_flag(subscription.is_active)),
        subscription_date: Set(subscription.subscription_date),
        last_updated: Set(subscription.last_updated),
        source: Set(subscription.source.clone()),
    }
}

pub fn model_to_short_url(model: short_url::Model) -> Result<ShortUrl> {
    let url_type = model.url_type.parse::<UrlType>().map_err(|e| {
        GinywowError::serialization(format!(
            "Corrupt url_type on short url '{}': {}",
            model.short_code, e
        ))
    })?;

    Ok(ShortUrl {
        id: model.id,
        short_code: model.short_code,
        original_url: model.original_url,
        ios_deep_link: model.ios_deep_link,
        android_deep_link: model.android_deep_link,
        url_type,
        created_at: model.created_at,
        // 负数视为 0
        click_count: model.click_count.max(0) as u64,
    })
}

/// 新短链接的 ActiveModel，click_count 从 0 开始
pub fn short_url_to_active_model(url: &ShortUrl) -> short_url::ActiveModel {
    short_url::ActiveModel {
        id: NotSet,
        short_code: Set(url.short_code.clone()),
        original_url: Set(url.original_url.clone()),
        ios_deep_link: Set(url.ios_deep_link.clone()),
        android_deep_link: Set(url.android_deep_link.clone()),
        url_type: Set(url.url_type.to_string()),
        created_at: Set(url.created_at),
        click_count: Set(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    fn short_url_model(url_type: &str, click_count: i64) -> short_url::Model {
        short_url::Model {
            id: 7,
            short_code: "abc123".to_string(),
            original_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            ios_deep_link: "youtube://watch?v=dQw4w9WgXcQ".to_string(),
            android_deep_link: "vnd.youtube://watch?v=dQw4w9WgXcQ".to_string(),
            url_type: url_type.to_string(),
            created_at: Utc::now(),
            click_count,
        }
    }

    #[test]
    fn test_flag_conversion() {
        assert_eq!(bool_to_flag(true), "true");
        assert_eq!(bool_to_flag(false), "false");
        assert!(flag_to_bool("true"));
        assert!(!flag_to_bool("false"));
        assert!(!flag_to_bool(""));
        // 非规范值一律视为未激活，与 SQL 过滤一致
        assert!(!flag_to_bool("TRUE"));
        assert!(!flag_to_bool("1"));
    }

    #[test]
    fn test_model_to_short_url() {
        let url = model_to_short_url(short_url_model("video", 42)).unwrap();
        assert_eq!(url.url_type, UrlType::Video);
        assert_eq!(url.click_count, 42);
        assert_eq!(url.short_code, "abc123");
    }

    #[test]
    fn test_model_to_short_url_negative_click_count() {
        let url = model_to_short_url(short_url_model("shorts", -10)).unwrap();
        assert_eq!(url.click_count, 0);
    }

    #[test]
    fn test_model_to_short_url_rejects_unknown_type() {
        let err = model_to_short_url(short_url_model("music", 0)).unwrap_err();
        assert!(matches!(err, GinywowError::Serialization(_)));
    }

    #[test]
    fn test_short_url_active_model_starts_at_zero_clicks() {
        let url = model_to_short_url(short_url_model("playlist", 99)).unwrap();
        let active = short_url_to_active_model(&url);

        assert!(matches!(active.id, ActiveValue::NotSet));
        assert!(matches!(active.click_count, ActiveValue::Set(0)));
        if let ActiveValue::Set(url_type) = active.url_type {
            assert_eq!(url_type, "playlist");
        }
    }

    #[test]
    fn test_thumbnail_metrics_roundtrip_through_json_column() {
        let thumbnail = Thumbnail {
            id: "t-1".to_string(),
            original_image_data: "aGVsbG8=".to_string(),
            enhanced_image_data: Some("d29ybGQ=".to_string()),
            file_name: "cover.jpg".to_string(),
            file_size: 2048,
            enhancement_metrics: Some(EnhancementMetrics {
                contrast: 1.2,
                saturation: 1.1,
                clarity: 0.9,
                ctr_improvement: 14.5,
            }),
            created_at: Utc::now(),
        };

        let active = thumbnail_to_active_model(&thumbnail).unwrap();
        let ActiveValue::Set(Some(json)) = active.enhancement_metrics else {
            panic!("metrics should be set");
        };
        assert_eq!(json["ctrImprovement"], 14.5);

        let model = thumbnail::Model {
            id: thumbnail.id.clone(),
            original_image_data: thumbnail.original_image_data.clone(),
            enhanced_image_data: thumbnail.enhanced_image_data.clone(),
            file_name: thumbnail.file_name.clone(),
            file_size: thumbnail.file_size,
            enhancement_metrics: Some(json),
            created_at: thumbnail.created_at,
        };
        assert_eq!(model_to_thumbnail(model).unwrap(), thumbnail);
    }

    #[test]
    fn test_corrupt_optimized_titles_is_serialization_error() {
        let model = title_optimization::Model {
            id: "o-1".to_string(),
            original_title: "My video".to_string(),
            optimized_titles: Some(serde_json::json!({"not": "a list"})),
            thumbnail_id: None,
            created_at: Utc::now(),
        };
        let err = model_to_title_optimization(model).unwrap_err();
        assert!(matches!(err, GinywowError::Serialization(_)));
    }

    #[test]
    fn test_subscription_model_conversion() {
        let now = Utc::now();
        let model = newsletter_subscription::Model {
            id: 3,
            email: "a@b.com".to_string(),
            is_active: "false".to_string(),
            subscription_date: now,
            last_updated: now,
            source: Some("footer".to_string()),
        };
        let sub = model_to_subscription(model);
        assert!(!sub.is_active);

        let active = subscription_to_active_model(&sub);
        assert!(matches!(active.is_active, ActiveValue::Set(ref v) if v == "false"));
        assert!(matches!(active.id, ActiveValue::NotSet));
    }
}
