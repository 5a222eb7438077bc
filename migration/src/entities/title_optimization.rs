use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "title_optimizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub original_title: String,
    /// 有序数组：[{title, score, estimatedCtr, seoScore, tags, reasoning}]
    #[sea_orm(column_type = "Json", nullable)]
    pub optimized_titles: Option<Json>,
    pub thumbnail_id: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::thumbnail::Entity",
        from = "Column::ThumbnailId",
        to = "super::thumbnail::Column::Id",
        on_delete = "SetNull"
    )]
    Thumbnail,
}

impl Related<super::thumbnail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Thumbnail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
