use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "response_cache")]
pub struct Model {
    /// One of the fixed slot keys ("1".."4").
    #[sea_orm(primary_key, auto_increment = false)]
    pub slot: String,

    /// Serialized JSON payload
    #[sea_orm(column_type = "Text")]
    pub payload: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
