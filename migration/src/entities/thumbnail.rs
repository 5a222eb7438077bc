use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "thumbnails")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// MySQL 上迁移建为 LONGTEXT
    #[sea_orm(column_type = "Text")]
    pub original_image_data: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub enhanced_image_data: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    /// {contrast, saturation, clarity, ctrImprovement}
    #[sea_orm(column_type = "Json", nullable)]
    pub enhancement_metrics: Option<Json>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::title_optimization::Entity")]
    TitleOptimization,
}

impl Related<super::title_optimization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TitleOptimization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
