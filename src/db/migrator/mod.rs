use sea_orm_migration::prelude::*;

mod m20250301_create_users;
mod m20250301_create_recipes;
mod m20250302_create_saved_recipes;
mod m20250303_create_response_cache;

/// Schema of the durable store: users, recipes and the saved-recipes relation.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_create_users::Migration),
            Box::new(m20250301_create_recipes::Migration),
            Box::new(m20250302_create_saved_recipes::Migration),
        ]
    }
}

/// Schema of the response cache.
///
/// Tracked in its own migrations table so the cache may share a database
/// file with the durable store without either migrator seeing the other's
/// history.
pub struct CacheMigrator;

#[async_trait::async_trait]
impl MigratorTrait for CacheMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250303_create_response_cache::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("seaql_cache_migrations").into_iden()
    }
}
