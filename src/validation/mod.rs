//! 表单输入校验
//!
//! 每种实体一个输入结构体（字段全部为 `Option`，缺失字段给出明确提示而不是反序列化错误）
//! 和一个纯函数 `validate_*`，成功时返回规范化后的草稿，失败时返回
//! [`GinywowError::Validation`](crate::errors::GinywowError::Validation)。

mod newsletter;
mod short_url;
mod thumbnail;
mod title;
mod youtube;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub use newsletter::{
    NewSubscription, NewsletterInput, UnsubscribeInput, is_valid_email, normalize_email,
    validate_newsletter, validate_unsubscribe,
};
pub use short_url::{ShortUrlDraft, ShortUrlInput, validate_short_url};
pub use thumbnail::{
    EnhancementInput, EnhancementMetricsInput, EnhancementResult, NewThumbnail, ThumbnailInput,
    validate_enhancement, validate_thumbnail,
};
pub use title::{
    NewTitleOptimization, OptimizedTitleInput, TitleOptimizationInput, TitleScoresInput,
    validate_title_optimization, validate_title_scores,
};
pub use youtube::{YoutubeUrlInput, validate_youtube_url};

/// 可选的 `data:<mime>;base64,` 前缀之后必须是合法的标准 base64
pub(crate) fn is_valid_base64_image(data: &str) -> bool {
    let payload = match data.strip_prefix("data:") {
        Some(rest) => match rest.split_once(";base64,") {
            Some((mime, payload)) if !mime.is_empty() && !mime.contains(',') => payload,
            _ => return false,
        },
        None => data,
    };

    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return false;
    }
    STANDARD.decode(compact.as_bytes()).is_ok()
}

/// 去除首尾空白，空串视为缺失
pub(crate) fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_image_plain() {
        assert!(is_valid_base64_image("aGVsbG8="));
        assert!(is_valid_base64_image("aGVs\nbG8="));
        assert!(!is_valid_base64_image("not base64!"));
        assert!(!is_valid_base64_image(""));
        assert!(!is_valid_base64_image("aGVsbG8"));
    }

    #[test]
    fn test_base64_image_data_uri() {
        assert!(is_valid_base64_image("data:image/png;base64,aGVsbG8="));
        assert!(!is_valid_base64_image("data:image/png;base64,"));
        assert!(!is_valid_base64_image("data:;base64,aGVsbG8="));
        assert!(!is_valid_base64_image("data:image/png,aGVsbG8="));
    }

    #[test]
    fn test_non_blank() {
        let value = "  x ".to_string();
        assert_eq!(non_blank(Some(&value)), Some("x"));
        let blank = "   ".to_string();
        assert_eq!(non_blank(Some(&blank)), None);
        assert_eq!(non_blank(None), None);
    }
}
