pub mod response_cache;
pub use response_cache::{CacheError, ResponseCache};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, Registration};
pub use auth_service_impl::SeaOrmAuthService;

pub mod recipe_service;
pub mod recipe_service_impl;
pub use recipe_service::{RecipeError, RecipeService};
pub use recipe_service_impl::SeaOrmRecipeService;

pub mod discovery;
pub use discovery::{DiscoveryError, DiscoveryService, RecipeCard};
