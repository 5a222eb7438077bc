use serde::Deserialize;

use super::non_blank;
use crate::errors::{GinywowError, Result};
use crate::storage::models::UrlType;
use crate::utils::url_validator::{parse_http_url, validation_error_message};
use crate::utils::youtube::{classify_url, deep_links};
use crate::utils::{MAX_SHORT_CODE_LENGTH, is_valid_short_code};

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlInput {
    pub short_code: Option<String>,
    pub original_url: Option<String>,
    pub ios_deep_link: Option<String>,
    pub android_deep_link: Option<String>,
    pub url_type: Option<String>,
}

/// 校验通过的短链接草稿
///
/// `short_code` 为 `None` 时由调用方生成随机短码。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrlDraft {
    pub short_code: Option<String>,
    pub original_url: String,
    pub ios_deep_link: String,
    pub android_deep_link: String,
    pub url_type: UrlType,
}

pub fn validate_short_url(input: &ShortUrlInput) -> Result<ShortUrlDraft> {
    let short_code = non_blank(input.short_code.as_ref())
        .map(validate_short_code)
        .transpose()?;

    let Some(original_url) = non_blank(input.original_url.as_ref()) else {
        return Err(GinywowError::validation("Original URL is required"));
    };
    parse_http_url(original_url)
        .map_err(|e| GinywowError::validation(validation_error_message(&e)))?;

    let url_type = match non_blank(input.url_type.as_ref()) {
        Some(raw) => raw.parse::<UrlType>().map_err(GinywowError::validation)?,
        None => classify_url(original_url).ok_or_else(|| {
            GinywowError::validation("Unable to detect URL type, please provide urlType")
        })?,
    };

    let ios = non_blank(input.ios_deep_link.as_ref());
    let android = non_blank(input.android_deep_link.as_ref());
    let (ios_deep_link, android_deep_link) = match (ios, android) {
        (Some(ios), Some(android)) => (ios.to_string(), android.to_string()),
        _ => {
            let derived = deep_links(original_url, url_type).ok_or_else(|| {
                GinywowError::validation(
                    "Unable to derive deep links for this URL, please provide iosDeepLink and androidDeepLink",
                )
            })?;
            (
                ios.map(str::to_string).unwrap_or(derived.ios),
                android.map(str::to_string).unwrap_or(derived.android),
            )
        }
    };

    Ok(ShortUrlDraft {
        short_code,
        original_url: original_url.to_string(),
        ios_deep_link,
        android_deep_link,
        url_type,
    })
}

fn validate_short_code(code: &str) -> Result<String> {
    if code.chars().count() > MAX_SHORT_CODE_LENGTH {
        return Err(GinywowError::validation(format!(
            "Short code must be at most {} characters",
            MAX_SHORT_CODE_LENGTH
        )));
    }
    if !is_valid_short_code(code) {
        return Err(GinywowError::validation(
            "Short code may only contain letters, digits, '-' and '_'",
        ));
    }
    Ok(code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(code: Option<&str>, url: &str, url_type: Option<&str>) -> ShortUrlInput {
        ShortUrlInput {
            short_code: code.map(str::to_string),
            original_url: Some(url.to_string()),
            ios_deep_link: None,
            android_deep_link: None,
            url_type: url_type.map(str::to_string),
        }
    }

    #[test]
    fn test_derives_type_and_deep_links() {
        let draft = validate_short_url(&input(
            Some("rick"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            None,
        ))
        .unwrap();

        assert_eq!(draft.short_code.as_deref(), Some("rick"));
        assert_eq!(draft.url_type, UrlType::Video);
        assert_eq!(draft.ios_deep_link, "youtube://watch?v=dQw4w9WgXcQ");
        assert_eq!(draft.android_deep_link, "vnd.youtube://watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_missing_code_is_left_for_generation() {
        let draft =
            validate_short_url(&input(Some("  "), "https://youtu.be/dQw4w9WgXcQ", None)).unwrap();
        assert_eq!(draft.short_code, None);
    }

    #[test]
    fn test_short_code_rules() {
        let err = validate_short_url(&input(
            Some("abcdefghijk"),
            "https://youtu.be/dQw4w9WgXcQ",
            None,
        ))
        .unwrap_err();
        assert_eq!(err.message(), "Short code must be at most 10 characters");

        let err = validate_short_url(&input(Some("a/b"), "https://youtu.be/dQw4w9WgXcQ", None))
            .unwrap_err();
        assert!(err.message().starts_with("Short code may only contain"));
    }

    #[test]
    fn test_invalid_url_type() {
        let err = validate_short_url(&input(
            None,
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            Some("music"),
        ))
        .unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid URL type 'music'. Valid: video, channel, playlist, shorts"
        );
    }

    #[test]
    fn test_explicit_links_allow_non_youtube_targets() {
        let draft = validate_short_url(&ShortUrlInput {
            short_code: Some("promo".to_string()),
            original_url: Some("https://example.com/landing".to_string()),
            ios_deep_link: Some("example://landing".to_string()),
            android_deep_link: Some("intent://landing".to_string()),
            url_type: Some("channel".to_string()),
        })
        .unwrap();
        assert_eq!(draft.url_type, UrlType::Channel);
        assert_eq!(draft.ios_deep_link, "example://landing");
    }

    #[test]
    fn test_underivable_fields_are_rejected() {
        let err = validate_short_url(&input(None, "https://example.com/x", None)).unwrap_err();
        assert!(err.message().contains("urlType"));

        let err =
            validate_short_url(&input(None, "https://example.com/x", Some("video"))).unwrap_err();
        assert!(err.message().contains("deep links"));
    }

    #[test]
    fn test_original_url_rules() {
        let err = validate_short_url(&ShortUrlInput::default()).unwrap_err();
        assert_eq!(err.message(), "Original URL is required");

        let err = validate_short_url(&input(None, "javascript:alert(1)", Some("video")))
            .unwrap_err();
        assert_eq!(err.message(), "This URL protocol is not allowed");
    }
}
