//! 缩略图与标题优化表迁移
//!
//! - thumbnails: 上传的原图（base64）及增强结果
//! - title_optimizations: 标题优化记录，可选关联 thumbnails

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        // 创建 thumbnails 表
        manager
            .create_table(
                Table::create()
                    .table(Thumbnails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Thumbnails::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(image_data_column(backend, Thumbnails::OriginalImageData).not_null())
                    .col(image_data_column(backend, Thumbnails::EnhancedImageData).null())
                    .col(
                        ColumnDef::new(Thumbnails::FileName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Thumbnails::FileSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Thumbnails::EnhancementMetrics).json().null())
                    .col(
                        ColumnDef::new(Thumbnails::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 title_optimizations 表
        manager
            .create_table(
                Table::create()
                    .table(TitleOptimizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TitleOptimizations::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TitleOptimizations::OriginalTitle)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TitleOptimizations::OptimizedTitles)
                            .json()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TitleOptimizations::ThumbnailId)
                            .string_len(36)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TitleOptimizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_title_optimizations_thumbnail")
                            .from(TitleOptimizations::Table, TitleOptimizations::ThumbnailId)
                            .to(Thumbnails::Table, Thumbnails::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 按缩略图查询标题优化记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_title_optimizations_thumbnail_id")
                    .table(TitleOptimizations::Table)
                    .col(TitleOptimizations::ThumbnailId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_title_optimizations_thumbnail_id")
                    .table(TitleOptimizations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TitleOptimizations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Thumbnails::Table).to_owned())
            .await
    }
}

/// base64 图片列
///
/// MySQL 的 TEXT 最多 65,535 字节，改用 LONGTEXT；其他后端 TEXT 无此限制。
fn image_data_column<T: IntoIden>(backend: DatabaseBackend, column: T) -> ColumnDef {
    let mut def = ColumnDef::new(column);
    match backend {
        DatabaseBackend::MySql => def.custom(Alias::new("LONGTEXT")),
        _ => def.text(),
    };
    def
}

#[derive(DeriveIden)]
enum Thumbnails {
    Table,
    Id,
    OriginalImageData,
    EnhancedImageData,
    FileName,
    FileSize,
    EnhancementMetrics,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TitleOptimizations {
    Table,
    Id,
    OriginalTitle,
    OptimizedTitles,
    ThumbnailId,
    CreatedAt,
}
