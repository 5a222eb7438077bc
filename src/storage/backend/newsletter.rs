//! Newsletter 订阅读写
//!
//! is_active 以文本 "true"/"false" 存储，读写时统一经过 converters。

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};
use tracing::info;

use super::converters::{bool_to_flag, model_to_subscription, subscription_to_active_model};
use super::{SeaOrmStorage, is_unique_violation, retry};
use crate::errors::{GinywowError, Result};
use crate::storage::models::NewsletterSubscription;

use migration::entities::newsletter_subscription;

impl SeaOrmStorage {
    /// 按邮箱查找（调用方负责传入规范化后的邮箱）
    pub async fn find_subscription(&self, email: &str) -> Result<Option<NewsletterSubscription>> {
        let db = &self.db;

        let model = retry::with_retry("find_subscription", self.retry_config, || {
            newsletter_subscription::Entity::find()
                .filter(newsletter_subscription::Column::Email.eq(email))
                .one(db)
        })
        .await
        .map_err(|e| GinywowError::database_operation(format!("查询订阅失败: {}", e)))?;

        Ok(model.map(model_to_subscription))
    }

    /// 插入新订阅，邮箱重复时返回 Conflict
    pub async fn insert_subscription(
        &self,
        subscription: &NewsletterSubscription,
    ) -> Result<NewsletterSubscription> {
        let db = &self.db;
        let active = subscription_to_active_model(subscription);

        let model = retry::with_retry("insert_subscription", self.retry_config, || {
            active.clone().insert(db)
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                GinywowError::conflict("订阅邮箱已存在")
            } else {
                GinywowError::database_operation(format!("保存订阅失败: {}", e))
            }
        })?;

        info!("Newsletter subscription created: id={}", model.id);
        Ok(model_to_subscription(model))
    }

    /// 修改订阅状态
    ///
    /// 只更新状态与目标不同的行，返回是否发生了变更。
    /// `source` 为 `Some` 时一并覆盖来源标签。
    pub async fn set_subscription_active(
        &self,
        email: &str,
        active: bool,
        source: Option<&str>,
    ) -> Result<bool> {
        let db = &self.db;
        let target = bool_to_flag(active);

        let result = retry::with_retry("set_subscription_active", self.retry_config, || {
            let mut update = newsletter_subscription::Entity::update_many()
                .col_expr(
                    newsletter_subscription::Column::IsActive,
                    Expr::val(target.clone()),
                )
                .col_expr(
                    newsletter_subscription::Column::LastUpdated,
                    Expr::val(Utc::now()),
                );
            if let Some(source) = source {
                update = update.col_expr(
                    newsletter_subscription::Column::Source,
                    Expr::val(source.to_string()),
                );
            }
            update
                .filter(newsletter_subscription::Column::Email.eq(email))
                .filter(newsletter_subscription::Column::IsActive.ne(target.as_str()))
                .exec(db)
        })
        .await
        .map_err(|e| GinywowError::database_operation(format!("更新订阅状态失败: {}", e)))?;

        Ok(result.rows_affected > 0)
    }

    /// 所有有效订阅（按订阅时间升序）
    pub async fn list_active_subscriptions(&self) -> Result<Vec<NewsletterSubscription>> {
        let db = &self.db;

        let models = retry::with_retry("list_active_subscriptions", self.retry_config, || {
            newsletter_subscription::Entity::find()
                .filter(newsletter_subscription::Column::IsActive.eq(bool_to_flag(true)))
                .order_by_asc(newsletter_subscription::Column::SubscriptionDate)
                .all(db)
        })
        .await
        .map_err(|e| GinywowError::database_operation(format!("查询订阅列表失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_subscription).collect())
    }

    pub async fn count_active_subscriptions(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count_active_subscriptions", self.retry_config, || {
            newsletter_subscription::Entity::find()
                .filter(newsletter_subscription::Column::IsActive.eq(bool_to_flag(true)))
                .count(db)
        })
        .await
        .map_err(|e| GinywowError::database_operation(format!("统计订阅失败: {}", e)))
    }
}
