use crate::entities::{prelude::*, response_cache};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set};

pub struct CacheRepository {
    conn: DatabaseConnection,
}

impl CacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, slot: &str) -> Result<Option<String>> {
        let row = ResponseCache::find_by_id(slot.to_string())
            .one(&self.conn)
            .await?;

        Ok(row.map(|m| m.payload))
    }

    /// Inserts or replaces the payload of `slot` in a single statement.
    pub async fn put(&self, slot: &str, payload: String) -> Result<()> {
        let active_model = response_cache::ActiveModel {
            slot: Set(slot.to_string()),
            payload: Set(payload),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        ResponseCache::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(response_cache::Column::Slot)
                    .update_columns([
                        response_cache::Column::Payload,
                        response_cache::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = ResponseCache::delete_many().exec(&self.conn).await?;
        Ok(result.rows_affected)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(ResponseCache::find().count(&self.conn).await?)
    }
}
