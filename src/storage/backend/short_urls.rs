//! ShortUrl 读写与点击计数

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::Expr,
};
use tracing::{debug, info};

use super::converters::{model_to_short_url, short_url_to_active_model};
use super::{SeaOrmStorage, is_unique_violation, retry};
use crate::errors::{GinywowError, Result};
use crate::storage::models::ShortUrl;
use crate::utils::is_valid_short_code;

use migration::entities::short_url;

impl SeaOrmStorage {
    /// 插入短链接，短码已存在时返回 Conflict
    pub async fn insert_short_url(&self, url: &ShortUrl) -> Result<ShortUrl> {
        let db = &self.db;
        let active = short_url_to_active_model(url);

        let model = retry::with_retry(
            &format!("insert_short_url({})", url.short_code),
            self.retry_config,
            || active.clone().insert(db),
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                GinywowError::conflict(format!("Short code '{}' already exists", url.short_code))
            } else {
                GinywowError::database_operation(format!("保存短链接失败: {}", e))
            }
        })?;

        info!(
            "Short URL created: {} -> {} ({})",
            model.short_code, model.original_url, model.url_type
        );
        model_to_short_url(model)
    }

    pub async fn get_short_url(&self, code: &str) -> Result<Option<ShortUrl>> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("get_short_url({})", code),
            self.retry_config,
            || {
                short_url::Entity::find()
                    .filter(short_url::Column::ShortCode.eq(code))
                    .one(db)
            },
        )
        .await
        .map_err(|e| GinywowError::database_operation(format!("查询短链接失败: {}", e)))?;

        model.map(model_to_short_url).transpose()
    }

    /// 原子递增点击数：UPDATE short_urls SET click_count = click_count + 1
    ///
    /// 返回 `false` 表示短码不存在。
    pub async fn increment_click_count(&self, code: &str) -> Result<bool> {
        if !is_valid_short_code(code) {
            return Ok(false);
        }
        let db = &self.db;

        // 连接中断时语句可能已提交，重试会重复计数
        let result = retry::with_retry_non_idempotent(
            &format!("increment_click_count({})", code),
            self.retry_config,
            || {
                short_url::Entity::update_many()
                    .col_expr(
                        short_url::Column::ClickCount,
                        Expr::col(short_url::Column::ClickCount).add(1i64),
                    )
                    .filter(short_url::Column::ShortCode.eq(code))
                    .exec(db)
            },
        )
        .await
        .map_err(|e| GinywowError::database_operation(format!("更新点击数失败: {}", e)))?;

        debug!("Click counted for {}", code);
        Ok(result.rows_affected > 0)
    }

    /// 最近创建的短链接
    pub async fn list_short_urls(&self, limit: u64) -> Result<Vec<ShortUrl>> {
        let db = &self.db;

        let models = retry::with_retry("list_short_urls", self.retry_config, || {
            short_url::Entity::find()
                .order_by_desc(short_url::Column::CreatedAt)
                .order_by_desc(short_url::Column::Id)
                .limit(limit)
                .all(db)
        })
        .await
        .map_err(|e| GinywowError::database_operation(format!("查询短链接列表失败: {}", e)))?;

        models.into_iter().map(model_to_short_url).collect()
    }

    pub async fn count_short_urls(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count_short_urls", self.retry_config, || {
            short_url::Entity::find().count(db)
        })
        .await
        .map_err(|e| GinywowError::database_operation(format!("统计短链接失败: {}", e)))
    }
}
