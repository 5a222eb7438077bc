//! Newsletter 订阅表迁移
//!
//! is_active 以文本 "true"/"false" 存储，与前端历史数据保持一致。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsletterSubscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsletterSubscriptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NewsletterSubscriptions::Email)
                            .string_len(254)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(NewsletterSubscriptions::IsActive)
                            .string_len(5)
                            .not_null()
                            .default("true"),
                    )
                    .col(
                        ColumnDef::new(NewsletterSubscriptions::SubscriptionDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NewsletterSubscriptions::LastUpdated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NewsletterSubscriptions::Source)
                            .string_len(50)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_newsletter_is_active")
                    .table(NewsletterSubscriptions::Table)
                    .col(NewsletterSubscriptions::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_newsletter_is_active")
                    .table(NewsletterSubscriptions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(NewsletterSubscriptions::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum NewsletterSubscriptions {
    Table,
    Id,
    Email,
    IsActive,
    SubscriptionDate,
    LastUpdated,
    Source,
}
