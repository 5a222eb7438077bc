//! TitleOptimization 读写

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, sea_query::Expr};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{model_to_title_optimization, title_optimization_to_active_model};
use super::retry;
use crate::errors::{GinywowError, Result};
use crate::storage::models::{OptimizedTitle, TitleOptimization};

use migration::entities::title_optimization;

impl SeaOrmStorage {
    pub async fn insert_title_optimization(&self, record: &TitleOptimization) -> Result<()> {
        let db = &self.db;
        let active = title_optimization_to_active_model(record)?;

        retry::with_retry(
            &format!("insert_title_optimization({})", record.id),
            self.retry_config,
            || {
                let active = active.clone();
                async move {
                    title_optimization::Entity::insert(active)
                        .exec_without_returning(db)
                        .await
                }
            },
        )
        .await
        .map_err(|e| GinywowError::database_operation(format!("保存标题优化记录失败: {}", e)))?;

        info!(
            "Title optimization stored: {} (thumbnail: {})",
            record.id,
            record.thumbnail_id.as_deref().unwrap_or("-")
        );
        Ok(())
    }

    pub async fn get_title_optimization(&self, id: &str) -> Result<Option<TitleOptimization>> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("get_title_optimization({})", id),
            self.retry_config,
            || title_optimization::Entity::find_by_id(id.to_string()).one(db),
        )
        .await
        .map_err(|e| GinywowError::database_operation(format!("查询标题优化记录失败: {}", e)))?;

        model.map(model_to_title_optimization).transpose()
    }

    /// 写入候选标题，仅在尚未评分时生效
    pub async fn record_title_scores(&self, id: &str, titles: &[OptimizedTitle]) -> Result<bool> {
        let db = &self.db;
        let titles_json = serde_json::to_value(titles)?;

        let result = retry::with_retry(
            &format!("record_title_scores({})", id),
            self.retry_config,
            || {
                title_optimization::Entity::update_many()
                    .col_expr(
                        title_optimization::Column::OptimizedTitles,
                        Expr::val(titles_json.clone()),
                    )
                    .filter(title_optimization::Column::Id.eq(id))
                    .filter(title_optimization::Column::OptimizedTitles.is_null())
                    .exec(db)
            },
        )
        .await
        .map_err(|e| GinywowError::database_operation(format!("写入标题评分失败: {}", e)))?;

        debug!(
            "record_title_scores({}) affected {} rows",
            id, result.rows_affected
        );
        Ok(result.rows_affected > 0)
    }

    /// 某个缩略图关联的全部标题优化记录（按创建时间倒序）
    pub async fn list_title_optimizations_for_thumbnail(
        &self,
        thumbnail_id: &str,
    ) -> Result<Vec<TitleOptimization>> {
        let db = &self.db;

        let models = retry::with_retry(
            &format!("list_title_optimizations_for_thumbnail({})", thumbnail_id),
            self.retry_config,
            || {
                title_optimization::Entity::find()
                    .filter(title_optimization::Column::ThumbnailId.eq(thumbnail_id))
                    .order_by_desc(title_optimization::Column::CreatedAt)
                    .all(db)
            },
        )
        .await
        .map_err(|e| GinywowError::database_operation(format!("查询标题优化记录失败: {}", e)))?;

        models
            .into_iter()
            .map(model_to_title_optimization)
            .collect()
    }
}
