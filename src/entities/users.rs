use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Stored exactly as entered; lookups are case-sensitive.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    pub name: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::saved_recipes::Entity")]
    SavedRecipes,
}

impl Related<super::saved_recipes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedRecipes.def()
    }
}

impl Related<super::recipes::Entity> for Entity {
    fn to() -> RelationDef {
        super::saved_recipes::Relation::Recipe.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::saved_recipes::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
