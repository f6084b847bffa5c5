pub mod prelude;

pub mod recipes;
pub mod response_cache;
pub mod saved_recipes;
pub mod users;
