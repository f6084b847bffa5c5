use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, sea_query::OnConflict,
};
use serde::Serialize;

use crate::db::error::{StoreError, StoreResult, is_unique_violation};
use crate::domain::{RecipeDetails, RecipeId, Step};
use crate::entities::{prelude::*, recipes};

/// A persisted recipe with its JSON columns decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub dish_name: String,
    pub dish_photo: Option<String>,
    pub instructions: Vec<Step>,
    pub ingredients: Vec<String>,
    pub created_at: String,
}

impl TryFrom<recipes::Model> for Recipe {
    type Error = StoreError;

    fn try_from(model: recipes::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecipeId::new(model.id),
            instructions: serde_json::from_str(&model.instructions)?,
            ingredients: serde_json::from_str(&model.ingredients)?,
            dish_name: model.dish_name,
            dish_photo: model.dish_photo,
            created_at: model.created_at,
        })
    }
}

pub struct RecipeRepository {
    conn: DatabaseConnection,
}

impl RecipeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_name(&self, dish_name: &str) -> StoreResult<Option<Recipe>> {
        find_by_name(&self.conn, dish_name)
            .await?
            .map(Recipe::try_from)
            .transpose()
    }

    pub async fn get_by_id(&self, id: RecipeId) -> StoreResult<Option<Recipe>> {
        Recipes::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .map(Recipe::try_from)
            .transpose()
    }

    /// Fails with [`StoreError::DuplicateName`] if the dish is already stored.
    pub async fn create(&self, details: &RecipeDetails) -> StoreResult<Recipe> {
        insert(&self.conn, details).await?.try_into()
    }

    /// Returns the stored recipe named `details.dish_name`, inserting it first
    /// if it is not there yet.
    pub async fn find_or_create(&self, details: &RecipeDetails) -> StoreResult<Recipe> {
        find_or_insert(&self.conn, details).await?.try_into()
    }
}

async fn find_by_name<C: ConnectionTrait>(
    conn: &C,
    dish_name: &str,
) -> StoreResult<Option<recipes::Model>> {
    Ok(Recipes::find()
        .filter(recipes::Column::DishName.eq(dish_name))
        .one(conn)
        .await?)
}

fn active_model(details: &RecipeDetails) -> StoreResult<recipes::ActiveModel> {
    Ok(recipes::ActiveModel {
        dish_name: Set(details.dish_name.clone()),
        dish_photo: Set(details.dish_photo.clone()),
        instructions: Set(serde_json::to_string(&details.instructions)?),
        ingredients: Set(serde_json::to_string(&details.ingredients)?),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    })
}

async fn insert<C: ConnectionTrait>(conn: &C, details: &RecipeDetails) -> StoreResult<recipes::Model> {
    match active_model(details)?.insert(conn).await {
        Ok(model) => Ok(model),
        Err(e) if is_unique_violation(&e) => {
            Err(StoreError::DuplicateName(details.dish_name.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Stored recipes are immutable, so an existing row wins over `details`.
///
/// The insert comes first so concurrent callers queue on the write lock
/// instead of failing to upgrade a read.
async fn find_or_insert<C: ConnectionTrait>(
    conn: &C,
    details: &RecipeDetails,
) -> StoreResult<recipes::Model> {
    Recipes::insert(active_model(details)?)
        .on_conflict(
            OnConflict::column(recipes::Column::DishName)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_name(conn, &details.dish_name)
        .await?
        .ok_or_else(|| StoreError::Internal(format!("recipe {} vanished after insert", details.dish_name)))
}
