//! Thumbnail 读写

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, sea_query::Expr};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{model_to_thumbnail, thumbnail_to_active_model};
use super::retry;
use crate::errors::{GinywowError, Result};
use crate::storage::models::{EnhancementMetrics, Thumbnail};

use migration::entities::thumbnail;

impl SeaOrmStorage {
    pub async fn insert_thumbnail(&self, record: &Thumbnail) -> Result<()> {
        let db = &self.db;
        let active = thumbnail_to_active_model(record)?;

        retry::with_retry(
            &format!("insert_thumbnail({})", record.id),
            self.retry_config,
            || {
                let active = active.clone();
                async move {
                    thumbnail::Entity::insert(active)
                        .exec_without_returning(db)
                        .await
                }
            },
        )
        .await
        .map_err(|e| GinywowError::database_operation(format!("保存缩略图失败: {}", e)))?;

        info!(
            "Thumbnail stored: {} ({}, {} bytes)",
            record.id, record.file_name, record.file_size
        );
        Ok(())
    }

    pub async fn get_thumbnail(&self, id: &str) -> Result<Option<Thumbnail>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get_thumbnail({})", id), self.retry_config, || {
            thumbnail::Entity::find_by_id(id.to_string()).one(db)
        })
        .await
        .map_err(|e| GinywowError::database_operation(format!("查询缩略图失败: {}", e)))?;

        model.map(model_to_thumbnail).transpose()
    }

    pub async fn thumbnail_exists(&self, id: &str) -> Result<bool> {
        let db = &self.db;

        let count = retry::with_retry(
            &format!("thumbnail_exists({})", id),
            self.retry_config,
            || {
                thumbnail::Entity::find()
                    .filter(thumbnail::Column::Id.eq(id))
                    .count(db)
            },
        )
        .await
        .map_err(|e| GinywowError::database_operation(format!("查询缩略图失败: {}", e)))?;

        Ok(count > 0)
    }

    /// 写入增强结果，仅在尚未增强时生效
    ///
    /// 返回 `false` 表示该行不存在或已经记录过增强结果。
    pub async fn record_enhancement(
        &self,
        id: &str,
        enhanced_image_data: &str,
        metrics: &EnhancementMetrics,
    ) -> Result<bool> {
        let db = &self.db;
        let metrics_json = serde_json::to_value(metrics)?;

        let result = retry::with_retry(
            &format!("record_enhancement({})", id),
            self.retry_config,
            || {
                thumbnail::Entity::update_many()
                    .col_expr(
                        thumbnail::Column::EnhancedImageData,
                        Expr::val(enhanced_image_data.to_string()),
                    )
                    .col_expr(
                        thumbnail::Column::EnhancementMetrics,
                        Expr::val(metrics_json.clone()),
                    )
                    .filter(thumbnail::Column::Id.eq(id))
                    .filter(thumbnail::Column::EnhancedImageData.is_null())
                    .exec(db)
            },
        )
        .await
        .map_err(|e| GinywowError::database_operation(format!("写入增强结果失败: {}", e)))?;

        debug!(
            "record_enhancement({}) affected {} rows",
            id, result.rows_affected
        );
        Ok(result.rows_affected > 0)
    }
}
