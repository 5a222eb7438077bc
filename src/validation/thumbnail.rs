use serde::Deserialize;
use serde_json::Value;

use super::{is_valid_base64_image, non_blank};
use crate::errors::{GinywowError, Result};
use crate::storage::models::EnhancementMetrics;

/// file_name 列为 VARCHAR(255)
const MAX_FILE_NAME_CHARS: usize = 255;

/// 能被 f64 精确表示的最大整数
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Request body for thumbnail upload.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailInput {
    pub original_image_data: Option<String>,
    pub file_name: Option<String>,
    /// 任意 JSON 值，非正整数统一给出同一提示
    pub file_size: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewThumbnail {
    pub original_image_data: String,
    pub file_name: String,
    pub file_size: i64,
}

pub fn validate_thumbnail(input: &ThumbnailInput) -> Result<NewThumbnail> {
    let Some(original_image_data) = non_blank(input.original_image_data.as_ref()) else {
        return Err(GinywowError::validation("Original image data is required"));
    };
    if !is_valid_base64_image(original_image_data) {
        return Err(GinywowError::validation(
            "Original image data must be valid base64",
        ));
    }

    let Some(file_name) = non_blank(input.file_name.as_ref()) else {
        return Err(GinywowError::validation("File name is required"));
    };
    if file_name.chars().count() > MAX_FILE_NAME_CHARS {
        return Err(GinywowError::validation(format!(
            "File name must be at most {} characters",
            MAX_FILE_NAME_CHARS
        )));
    }

    let file_size = input
        .file_size
        .as_ref()
        .and_then(positive_whole_number)
        .ok_or_else(|| GinywowError::validation("File size must be a positive number"))?;

    Ok(NewThumbnail {
        original_image_data: original_image_data.to_string(),
        file_name: file_name.to_string(),
        file_size,
    })
}

fn positive_whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return (n > 0).then_some(n);
    }
    // 1024.0 这类整数值浮点也接受
    let f = value.as_f64()?;
    (f.is_finite() && f > 0.0 && f.fract() == 0.0 && f <= MAX_SAFE_INTEGER).then_some(f as i64)
}

/// Enhancement metrics reported by the image processor.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementMetricsInput {
    pub contrast: Option<f64>,
    pub saturation: Option<f64>,
    pub clarity: Option<f64>,
    pub ctr_improvement: Option<f64>,
}

/// Request body for recording an enhancement result.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementInput {
    pub enhanced_image_data: Option<String>,
    pub enhancement_metrics: Option<EnhancementMetricsInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnhancementResult {
    pub enhanced_image_data: String,
    pub metrics: EnhancementMetrics,
}

pub fn validate_enhancement(input: &EnhancementInput) -> Result<EnhancementResult> {
    let Some(enhanced_image_data) = non_blank(input.enhanced_image_data.as_ref()) else {
        return Err(GinywowError::validation("Enhanced image data is required"));
    };
    if !is_valid_base64_image(enhanced_image_data) {
        return Err(GinywowError::validation(
            "Enhanced image data must be valid base64",
        ));
    }

    let Some(metrics) = input.enhancement_metrics.as_ref() else {
        return Err(GinywowError::validation("Enhancement metrics are required"));
    };

    Ok(EnhancementResult {
        enhanced_image_data: enhanced_image_data.to_string(),
        metrics: EnhancementMetrics {
            contrast: finite_metric("contrast", metrics.contrast)?,
            saturation: finite_metric("saturation", metrics.saturation)?,
            clarity: finite_metric("clarity", metrics.clarity)?,
            ctr_improvement: finite_metric("ctrImprovement", metrics.ctr_improvement)?,
        },
    })
}

fn finite_metric(name: &str, value: Option<f64>) -> Result<f64> {
    value.filter(|v| v.is_finite()).ok_or_else(|| {
        GinywowError::validation(format!("Enhancement metric '{}' must be a number", name))
    })
}
