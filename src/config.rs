use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Largest page the results view ever shows.
pub const MAX_PAGE_SIZE: u32 = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub spoonacular: SpoonacularConfig,

    pub cache: CacheConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Users, recipes and saved-recipe links.
    pub database_path: String,

    /// Response cache. Cleared on shutdown, so keep it apart from user data.
    pub cache_database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/cookbook.db".to_string(),
            cache_database_path: "sqlite:data/cache.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Whether to set the Secure flag on session cookies.
    /// Default: true for production safety. Set to false for local development without HTTPS.
    pub secure_cookies: bool,

    /// Session inactivity timeout.
    pub session_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 5000,
            cors_allowed_origins: vec![
                "http://localhost:5000".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ],
            secure_cookies: true,
            session_minutes: 7 * 24 * 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoonacularConfig {
    pub base_url: String,

    /// Overridden by `SPOONACULAR_API_KEY` (or `API_KEY`) when set.
    pub api_key: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,

    /// `number` sent with every complex search.
    pub page_size: u32,

    /// How many random recipes the home page asks for.
    pub home_batch_size: u32,
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.spoonacular.com".to_string(),
            api_key: String::new(),
            request_timeout_seconds: 30,
            page_size: MAX_PAGE_SIZE,
            home_batch_size: MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub clear_on_shutdown: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            clear_on_shutdown: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB (default: 8192 = 8MB)
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations) - higher = more CPU work
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,

    pub min_password_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
            min_password_length: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            spoonacular: SpoonacularConfig::default(),
            cache: CacheConfig::default(),
            security: SecurityConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        let key = std::env::var("SPOONACULAR_API_KEY").or_else(|_| std::env::var("API_KEY"));
        if let Ok(key) = key
            && !key.trim().is_empty()
        {
            self.spoonacular.api_key = key.trim().to_string();
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cookbook").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cookbook").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.spoonacular.base_url.trim().is_empty() {
            anyhow::bail!("Spoonacular base URL cannot be empty");
        }

        url::Url::parse(&self.spoonacular.base_url)
            .with_context(|| format!("Invalid Spoonacular base URL: {}", self.spoonacular.base_url))?;

        for (name, value) in [
            ("page_size", self.spoonacular.page_size),
            ("home_batch_size", self.spoonacular.home_batch_size),
        ] {
            if value == 0 || value > MAX_PAGE_SIZE {
                anyhow::bail!("spoonacular.{name} must be between 1 and {MAX_PAGE_SIZE}");
            }
        }

        if self.general.database_path == self.general.cache_database_path {
            tracing::warn!(
                "Cache and user data share {}; only the cache table is cleared on shutdown",
                self.general.database_path
            );
        }

        Ok(())
    }
}
