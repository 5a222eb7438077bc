//! 短链接表迁移
//!
//! 每条短链接保存原始 URL 以及 iOS / Android 应用深链。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShortUrls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShortUrls::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ShortUrls::ShortCode)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ShortUrls::OriginalUrl).text().not_null())
                    .col(ColumnDef::new(ShortUrls::IosDeepLink).text().not_null())
                    .col(
                        ColumnDef::new(ShortUrls::AndroidDeepLink)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrls::UrlType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrls::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrls::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建时间索引（列表按时间倒序）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_urls_created_at")
                    .table(ShortUrls::Table)
                    .col(ShortUrls::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_short_urls_created_at")
                    .table(ShortUrls::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ShortUrls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShortUrls {
    Table,
    Id,
    ShortCode,
    OriginalUrl,
    IosDeepLink,
    AndroidDeepLink,
    UrlType,
    CreatedAt,
    ClickCount,
}
