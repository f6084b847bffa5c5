use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
    sea_query::OnConflict,
};

use super::recipe::Recipe;
use crate::db::error::StoreResult;
use crate::domain::{RecipeId, SavedState, UserId};
use crate::entities::{prelude::*, recipes, saved_recipes};

/// Access to the user ⇄ recipe association table.
///
/// Mutations always lead with a write. `SQLite` then queues concurrent callers
/// on the busy timeout instead of failing a read-to-write lock upgrade.
pub struct SavedRecipeRepository {
    conn: DatabaseConnection,
}

impl SavedRecipeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn is_saved(&self, user_id: UserId, recipe_id: RecipeId) -> StoreResult<bool> {
        is_saved(&self.conn, user_id, recipe_id).await
    }

    /// Returns `true` if a row was added, `false` if the pair already existed.
    pub async fn save(&self, user_id: UserId, recipe_id: RecipeId) -> StoreResult<bool> {
        insert_if_absent(&self.conn, user_id, recipe_id).await
    }

    /// Returns `true` if a row was removed.
    pub async fn unsave(&self, user_id: UserId, recipe_id: RecipeId) -> StoreResult<bool> {
        delete_pair(&self.conn, user_id, recipe_id).await
    }

    /// Saves the pair if it was not saved, otherwise removes it.
    pub async fn toggle(&self, user_id: UserId, recipe_id: RecipeId) -> StoreResult<SavedState> {
        let txn = self.conn.begin().await?;

        let state = if insert_if_absent(&txn, user_id, recipe_id).await? {
            SavedState::Saved
        } else {
            delete_pair(&txn, user_id, recipe_id).await?;
            SavedState::NotSaved
        };

        txn.commit().await?;
        Ok(state)
    }

    /// Recipes saved by the user, oldest save first.
    pub async fn list_for_user(&self, user_id: UserId) -> StoreResult<Vec<Recipe>> {
        Recipes::find()
            .join(JoinType::InnerJoin, recipes::Relation::SavedRecipes.def())
            .filter(saved_recipes::Column::UserId.eq(user_id.value()))
            .order_by_asc(saved_recipes::Column::SavedAt)
            .order_by_asc(saved_recipes::Column::RecipeId)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(Recipe::try_from)
            .collect()
    }

    pub async fn count_for_user(&self, user_id: UserId) -> StoreResult<u64> {
        Ok(SavedRecipes::find()
            .filter(saved_recipes::Column::UserId.eq(user_id.value()))
            .count(&self.conn)
            .await?)
    }
}

async fn is_saved<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    recipe_id: RecipeId,
) -> StoreResult<bool> {
    let row = SavedRecipes::find_by_id((user_id.value(), recipe_id.value()))
        .one(conn)
        .await?;
    Ok(row.is_some())
}

async fn insert_if_absent<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    recipe_id: RecipeId,
) -> StoreResult<bool> {
    let active = saved_recipes::ActiveModel {
        user_id: Set(user_id.value()),
        recipe_id: Set(recipe_id.value()),
        saved_at: Set(
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
        ),
    };

    let inserted = SavedRecipes::insert(active)
        .on_conflict(
            OnConflict::columns([
                saved_recipes::Column::UserId,
                saved_recipes::Column::RecipeId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(inserted > 0)
}

async fn delete_pair<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    recipe_id: RecipeId,
) -> StoreResult<bool> {
    let result = SavedRecipes::delete_by_id((user_id.value(), recipe_id.value()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
