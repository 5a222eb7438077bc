//! Thumbnail service
//!
//! Stores uploaded thumbnails and records the one-off enhancement result
//! produced by the external image processor.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{GinywowError, Result};
use crate::storage::{SeaOrmStorage, Thumbnail};
use crate::validation::{EnhancementInput, ThumbnailInput, validate_enhancement, validate_thumbnail};

pub struct ThumbnailService {
    storage: Arc<SeaOrmStorage>,
}

impl ThumbnailService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, input: &ThumbnailInput) -> Result<Thumbnail> {
        let draft = validate_thumbnail(input)?;

        let thumbnail = Thumbnail {
            id: Uuid::new_v4().to_string(),
            original_image_data: draft.original_image_data,
            enhanced_image_data: None,
            file_name: draft.file_name,
            file_size: draft.file_size,
            enhancement_metrics: None,
            created_at: Utc::now(),
        };
        self.storage.insert_thumbnail(&thumbnail).await?;

        Ok(thumbnail)
    }

    pub async fn get(&self, id: &str) -> Result<Thumbnail> {
        self.storage
            .get_thumbnail(id)
            .await?
            .ok_or_else(|| GinywowError::not_found(format!("Thumbnail '{}' not found", id)))
    }

    /// 记录增强结果，每个缩略图只能记录一次
    pub async fn record_enhancement(&self, id: &str, input: &EnhancementInput) -> Result<Thumbnail> {
        let result = validate_enhancement(input)?;

        let updated = self
            .storage
            .record_enhancement(id, &result.enhanced_image_data, &result.metrics)
            .await?;

        if !updated {
            // 区分“不存在”和“已增强”
            if self.storage.thumbnail_exists(id).await? {
                warn!("Enhancement for thumbnail {} was already recorded", id);
                return Err(GinywowError::conflict(
                    "Enhancement has already been recorded for this thumbnail",
                ));
            }
            return Err(GinywowError::not_found(format!(
                "Thumbnail '{}' not found",
                id
            )));
        }

        info!(
            "Thumbnail {} enhanced (ctr +{:.1}%)",
            id, result.metrics.ctr_improvement
        );
        self.get(id).await
    }
}
