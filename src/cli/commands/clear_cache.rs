use crate::config::Config;
use crate::db::CacheStore;

pub async fn cmd_clear_cache(config: &Config) -> anyhow::Result<()> {
    let cache = CacheStore::new(&config.general.cache_database_path).await?;
    let removed = cache.clear().await?;

    println!("✓ Cleared {removed} cached response(s).");
    Ok(())
}
