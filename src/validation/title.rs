use serde::Deserialize;

use super::non_blank;
use crate::errors::{GinywowError, Result};
use crate::storage::models::OptimizedTitle;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOptimizationInput {
    pub original_title: Option<String>,
    pub thumbnail_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTitleOptimization {
    pub original_title: String,
    pub thumbnail_id: Option<String>,
}

pub fn validate_title_optimization(input: &TitleOptimizationInput) -> Result<NewTitleOptimization> {
    let Some(original_title) = non_blank(input.original_title.as_ref()) else {
        return Err(GinywowError::validation("Title cannot be empty"));
    };

    Ok(NewTitleOptimization {
        original_title: original_title.to_string(),
        thumbnail_id: non_blank(input.thumbnail_id.as_ref()).map(str::to_string),
    })
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedTitleInput {
    pub title: Option<String>,
    pub score: Option<f64>,
    pub estimated_ctr: Option<f64>,
    pub seo_score: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub reasoning: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleScoresInput {
    pub optimized_titles: Option<Vec<OptimizedTitleInput>>,
}

/// 校验外部评分器返回的候选标题列表，顺序保持不变
pub fn validate_title_scores(input: &TitleScoresInput) -> Result<Vec<OptimizedTitle>> {
    let titles = input
        .optimized_titles
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GinywowError::validation("Optimized titles cannot be empty"))?;

    titles
        .iter()
        .enumerate()
        .map(|(i, t)| validate_optimized_title(i + 1, t))
        .collect()
}

fn validate_optimized_title(position: usize, input: &OptimizedTitleInput) -> Result<OptimizedTitle> {
    let Some(title) = non_blank(input.title.as_ref()) else {
        return Err(GinywowError::validation(format!(
            "Optimized title #{} cannot be empty",
            position
        )));
    };

    let score = percentage(input.score).ok_or_else(|| {
        GinywowError::validation(format!(
            "Optimized title #{}: score must be between 0 and 100",
            position
        ))
    })?;
    let seo_score = percentage(input.seo_score).ok_or_else(|| {
        GinywowError::validation(format!(
            "Optimized title #{}: SEO score must be between 0 and 100",
            position
        ))
    })?;
    let estimated_ctr = input
        .estimated_ctr
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| {
            GinywowError::validation(format!(
                "Optimized title #{}: estimated CTR must be a non-negative number",
                position
            ))
        })?;

    let tags = input
        .tags
        .iter()
        .flatten()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    Ok(OptimizedTitle {
        title: title.to_string(),
        score,
        estimated_ctr,
        seo_score,
        tags,
        reasoning: input
            .reasoning
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    })
}

fn percentage(value: Option<f64>) -> Option<f64> {
    value.filter(|v| (0.0..=100.0).contains(v))
}
