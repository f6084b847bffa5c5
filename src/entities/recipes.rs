use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub dish_name: String,

    pub dish_photo: Option<String>,

    /// JSON array of step objects
    #[sea_orm(column_type = "Text")]
    pub instructions: String,

    /// JSON array of ingredient lines
    #[sea_orm(column_type = "Text")]
    pub ingredients: String,

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

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::saved_recipes::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::saved_recipes::Relation::Recipe.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
