//! Title optimization service

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{GinywowError, Result};
use crate::storage::{SeaOrmStorage, TitleOptimization};
use crate::validation::{
    TitleOptimizationInput, TitleScoresInput, validate_title_optimization, validate_title_scores,
};

pub struct TitleService {
    storage: Arc<SeaOrmStorage>,
}

impl TitleService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    async fn ensure_thumbnail(&self, thumbnail_id: &str) -> Result<()> {
        if self.storage.thumbnail_exists(thumbnail_id).await? {
            Ok(())
        } else {
            Err(GinywowError::not_found(format!(
                "Thumbnail '{}' not found",
                thumbnail_id
            )))
        }
    }

    pub async fn create(&self, input: &TitleOptimizationInput) -> Result<TitleOptimization> {
        let draft = validate_title_optimization(input)?;
        if let Some(thumbnail_id) = draft.thumbnail_id.as_deref() {
            self.ensure_thumbnail(thumbnail_id).await?;
        }

        let record = TitleOptimization {
            id: Uuid::new_v4().to_string(),
            original_title: draft.original_title,
            optimized_titles: None,
            thumbnail_id: draft.thumbnail_id,
            created_at: Utc::now(),
        };
        self.storage.insert_title_optimization(&record).await?;

        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Result<TitleOptimization> {
        self.storage
            .get_title_optimization(id)
            .await?
            .ok_or_else(|| {
                GinywowError::not_found(format!("Title optimization '{}' not found", id))
            })
    }

    /// 写入评分结果，只能写一次
    pub async fn record_scores(
        &self,
        id: &str,
        input: &TitleScoresInput,
    ) -> Result<TitleOptimization> {
        let titles = validate_title_scores(input)?;

        if !self.storage.record_title_scores(id, &titles).await? {
            // 不存在时 get 返回 NotFound
            self.get(id).await?;
            warn!("Scores for title optimization {} were already recorded", id);
            return Err(GinywowError::conflict(
                "Optimized titles have already been recorded for this title",
            ));
        }

        info!("Title optimization {} scored ({} titles)", id, titles.len());
        self.get(id).await
    }

    pub async fn list_for_thumbnail(&self, thumbnail_id: &str) -> Result<Vec<TitleOptimization>> {
        self.ensure_thumbnail(thumbnail_id).await?;
        self.storage
            .list_title_optimizations_for_thumbnail(thumbnail_id)
            .await
    }
}
